//! andropy: device sessions over the Android Debug Bridge
//!
//! A [`Bridge`] starts the adb background server; [`Bridge::enter`] checks that
//! at least one device is connected and hands out a [`Session`] for device
//! operations. Dropping either releases the server.
//!
//! ```ignore
//! use andropy::Bridge;
//!
//! fn main() -> andropy::Result<()> {
//!     let session = Bridge::new()?.enter()?;
//!
//!     let apps = session.shell("ls /data/app")?;
//!     println!("{} apps installed", apps.len());
//!
//!     let props = session.build_props()?;
//!     println!("model: {:?}", props.get("ro.product.device"));
//!     Ok(())
//! }
//! ```

mod bridge;
mod device;
mod error;
mod props;
mod reboot;
mod response;

pub use andropy_runtime::{HostPlatform, InstallReport, InstalledTool, Provisioner, Tool};
pub use bridge::{Bridge, DeviceSummary, Session};
pub use device::{DeviceId, parse_devices};
pub use error::{Error, Result};
pub use props::{BuildProps, parse_build_props};
pub use reboot::RebootTarget;
pub use response::{classify_response, parse_shell_output};
