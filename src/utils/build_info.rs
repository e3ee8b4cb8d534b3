use std::fmt;

/// Build details embedded by `build.rs`, shown by the `version` command.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub built_at: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

macro_rules! embedded {
    ($name:literal) => {
        match option_env!($name) {
            Some(value) => value,
            None => "unknown",
        }
    };
}

pub const BUILD: BuildInfo = BuildInfo {
    version: CLI_VERSION,
    git_hash: embedded!("YEN_TRACKER_BUILD_HASH"),
    git_status: embedded!("YEN_TRACKER_BUILD_STATUS"),
    built_at: embedded!("YEN_TRACKER_BUILD_TIMESTAMP"),
    target: embedded!("YEN_TRACKER_BUILD_TARGET"),
    profile: embedded!("YEN_TRACKER_BUILD_PROFILE"),
    rustc: embedded!("YEN_TRACKER_BUILD_RUSTC"),
};

impl BuildInfo {
    /// Label/value pairs in display order.
    pub fn rows(&self) -> [(&'static str, String); 5] {
        [
            ("Build hash", format!("{} ({})", self.git_hash, self.git_status)),
            ("Built at", self.built_at.to_string()),
            ("Target", self.target.to_string()),
            ("Profile", self.profile.to_string()),
            ("Rustc", self.rustc.to_string()),
        ]
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "yen_tracker {} ({})", self.version, self.git_hash)
    }
}
