/// Operating system families package managers care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl Os {
    /// The OS this binary was built for
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Os::Linux
        } else if cfg!(target_os = "macos") {
            Os::MacOs
        } else if cfg!(target_os = "windows") {
            Os::Windows
        } else {
            Os::Other
        }
    }
}

/// Platforms a manager runs on
pub const ANY_OS: &[Os] = &[Os::Linux, Os::MacOs, Os::Windows, Os::Other];
pub const LINUX: &[Os] = &[Os::Linux];
pub const MACOS: &[Os] = &[Os::MacOs];
pub const UNIX_LIKE: &[Os] = &[Os::Linux, Os::MacOs];

/// Whether the current OS is one of `platforms`
pub fn is_supported(platforms: &[Os]) -> bool {
    platforms.contains(&Os::current())
}

pub fn current_os_tag() -> &'static str {
    std::env::consts::OS
}
