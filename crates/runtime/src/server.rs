//! adb background server lifecycle
//!
//! The adb server is a singleton per host. Every lease issues `start-server`;
//! the server is stopped with `kill-server` only when the last lease held by
//! this process for the same executable is released.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::Result;
use crate::process::{run_bridge, run_bridge_best_effort};

static LEASES: LazyLock<Mutex<HashMap<PathBuf, usize>>> = LazyLock::new(|| Mutex::new(HashMap::new()));

/// A claim on the running adb background server.
///
/// Dropping the lease releases the claim.
#[derive(Debug)]
pub struct ServerLease {
	exe: PathBuf,
}

impl ServerLease {
	/// Start the background server (if not already running) and take a lease on it.
	///
	/// # Errors
	///
	/// Returns the launch or exit error of the `start-server` invocation.
	/// No lease is recorded in that case.
	pub fn acquire(exe: &Path) -> Result<Self> {
		let mut leases = LEASES.lock();
		run_bridge(exe, &["start-server"])?;

		let count = leases.entry(exe.to_path_buf()).or_insert(0);
		*count += 1;
		debug!(target = "andropy", exe = %exe.display(), leases = *count, "acquired server lease");

		Ok(Self { exe: exe.to_path_buf() })
	}

	/// Path of the bridge executable this lease belongs to.
	pub fn executable(&self) -> &Path {
		&self.exe
	}

	/// Number of live leases for `exe` in this process.
	pub fn active(exe: &Path) -> usize {
		LEASES.lock().get(exe).copied().unwrap_or(0)
	}
}

impl Drop for ServerLease {
	fn drop(&mut self) {
		let mut leases = LEASES.lock();
		let remaining = match leases.get_mut(&self.exe) {
			Some(count) => {
				*count = count.saturating_sub(1);
				*count
			}
			None => 0,
		};

		if remaining == 0 {
			leases.remove(&self.exe);
			debug!(target = "andropy", exe = %self.exe.display(), "last lease released; stopping server");
			run_bridge_best_effort(&self.exe, &["kill-server"]);
		} else {
			debug!(target = "andropy", exe = %self.exe.display(), leases = remaining, "released server lease");
		}
	}
}
