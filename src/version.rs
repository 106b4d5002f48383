// Service identity baked in at build time

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Wire shape of GET /version.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version: &'static str,
}

pub fn current() -> VersionInfo {
    VersionInfo {
        name: NAME,
        version: VERSION,
    }
}
