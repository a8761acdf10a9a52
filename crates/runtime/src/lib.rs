//! andropy runtime - adb location, provisioning, and server lifecycle
//!
//! This crate provides the low-level pieces the device session is built on:
//!
//! - **Tool location**: Finding the installed `adb` executable
//! - **Provisioning**: Downloading `adb` / `fastboot` for the host platform
//! - **Server lease**: Reference-counted start/stop of the adb background server
//! - **Process helpers**: Blocking invocation of the bridge with captured output
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  andropy-rs  │  Bridge session (devices, shell, props, reboot)
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │   runtime    │  This crate
//! │  ┌────────┐  │
//! │  │ Lease  │  │  start-server / kill-server
//! │  └────────┘  │
//! │  ┌────────┐  │
//! │  │ Driver │  │  Executable location
//! │  └────────┘  │
//! │  ┌────────┐  │
//! │  │Install │  │  Download into ~/.andropy/bin
//! │  └────────┘  │
//! └──────────────┘
//! ```

pub mod dirs;
pub mod driver;
pub mod error;
pub mod install;
pub mod process;
pub mod server;

pub use driver::{Tool, get_adb_executable, resolve_tool_executable};
pub use error::{Error, Result};
pub use install::{DEFAULT_BASE_URL, HostPlatform, InstallReport, InstalledTool, Provisioner};
pub use process::{BridgeOutput, run_bridge, run_bridge_best_effort, run_bridge_status};
pub use server::ServerLease;
