//! Host identity: implements the `Privileges` port.

use crate::application::ports::Privileges;

/// Reads the effective uid of the current process.
pub struct HostPrivileges;

impl Privileges for HostPrivileges {
    #[cfg(unix)]
    fn is_root(&self) -> bool {
        rustix::process::geteuid().is_root()
    }

    #[cfg(not(unix))]
    fn is_root(&self) -> bool {
        false
    }
}
