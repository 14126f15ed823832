//! Host platform detection
//!
//! Derives the shell, path-separator and executable-suffix conventions the
//! orchestrator uses when locating interpreters and tools. Detection is a
//! pure query against compile-time platform metadata; unrecognized platforms
//! fall back to generic POSIX conventions instead of failing.

use std::path::{Path, PathBuf};

/// Operating system family the orchestrator distinguishes between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl OsFamily {
    /// Human-readable family name for status output
    pub fn name(self) -> &'static str {
        match self {
            OsFamily::Windows => "Windows",
            OsFamily::MacOs => "macOS",
            OsFamily::Linux => "Linux",
            OsFamily::Other => "Unknown",
        }
    }
}

/// Platform conventions derived once at startup
#[derive(Debug, Clone)]
pub struct SystemProfile {
    pub os: OsFamily,
    /// Default interactive shell on this platform
    pub shell: &'static str,
    pub path_separator: char,
    pub exe_suffix: &'static str,
    pub arch: &'static str,
}

impl SystemProfile {
    /// Detect the host platform
    pub fn detect() -> Self {
        Self::for_os(match std::env::consts::OS {
            "windows" => OsFamily::Windows,
            "macos" => OsFamily::MacOs,
            "linux" => OsFamily::Linux,
            _ => OsFamily::Other,
        })
    }

    /// Build the profile for a given OS family
    pub fn for_os(os: OsFamily) -> Self {
        let (shell, path_separator, exe_suffix) = match os {
            OsFamily::Windows => ("cmd", '\\', ".exe"),
            OsFamily::MacOs => ("zsh", '/', ""),
            OsFamily::Linux => ("bash", '/', ""),
            OsFamily::Other => ("sh", '/', ""),
        };

        Self {
            os,
            shell,
            path_separator,
            exe_suffix,
            arch: std::env::consts::ARCH,
        }
    }

    /// System interpreter used to create the runtime environment
    pub fn system_python(&self) -> &'static str {
        match self.os {
            OsFamily::Windows => "python",
            _ => "python3",
        }
    }

    /// Interpreter inside the runtime environment
    pub fn venv_interpreter(&self, venv_dir: &Path) -> PathBuf {
        match self.os {
            OsFamily::Windows => venv_dir.join("Scripts").join("python.exe"),
            _ => venv_dir.join("bin").join("python"),
        }
    }

    /// Package installer inside the runtime environment
    pub fn venv_pip(&self, venv_dir: &Path) -> PathBuf {
        match self.os {
            OsFamily::Windows => venv_dir.join("Scripts").join("pip.exe"),
            _ => venv_dir.join("bin").join("pip"),
        }
    }

    /// Frontend build tool program name
    ///
    /// npm is a batch file on Windows, so the bare name does not resolve
    /// without a shell there.
    pub fn npm_program(&self) -> &'static str {
        match self.os {
            OsFamily::Windows => "npm.cmd",
            _ => "npm",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_conventions() {
        let profile = SystemProfile::for_os(OsFamily::Windows);
        assert_eq!(profile.shell, "cmd");
        assert_eq!(profile.path_separator, '\\');
        assert_eq!(profile.exe_suffix, ".exe");
        assert_eq!(profile.npm_program(), "npm.cmd");
        assert_eq!(profile.system_python(), "python");
    }

    #[test]
    fn test_macos_conventions() {
        let profile = SystemProfile::for_os(OsFamily::MacOs);
        assert_eq!(profile.shell, "zsh");
        assert_eq!(profile.path_separator, '/');
        assert_eq!(profile.exe_suffix, "");
    }

    #[test]
    fn test_linux_conventions() {
        let profile = SystemProfile::for_os(OsFamily::Linux);
        assert_eq!(profile.shell, "bash");
        assert_eq!(profile.path_separator, '/');
        assert_eq!(profile.exe_suffix, "");
    }

    #[test]
    fn test_unknown_platform_uses_generic_defaults() {
        let profile = SystemProfile::for_os(OsFamily::Other);
        assert_eq!(profile.shell, "sh");
        assert_eq!(profile.path_separator, '/');
        assert_eq!(profile.exe_suffix, "");
    }

    #[test]
    fn test_venv_paths_unix() {
        let profile = SystemProfile::for_os(OsFamily::Linux);
        let venv = Path::new("/project/venv");
        assert_eq!(
            profile.venv_interpreter(venv),
            PathBuf::from("/project/venv/bin/python")
        );
        assert_eq!(profile.venv_pip(venv), PathBuf::from("/project/venv/bin/pip"));
    }

    #[test]
    fn test_venv_paths_windows() {
        let profile = SystemProfile::for_os(OsFamily::Windows);
        let venv = Path::new("venv");
        assert!(
            profile
                .venv_interpreter(venv)
                .to_string_lossy()
                .ends_with("python.exe")
        );
        assert!(profile.venv_pip(venv).to_string_lossy().ends_with("pip.exe"));
    }

    #[test]
    fn test_detect_current_host() {
        let profile = SystemProfile::detect();
        assert!(!profile.shell.is_empty());
        assert!(profile.path_separator == '/' || profile.path_separator == '\\');
    }
}
