//! Administrator checks and the elevated relaunch
//!
//! On Windows the process asks for elevation by starting a second copy of
//! itself through `ShellExecuteW` with the `runas` verb, then exits with
//! [`ELEVATION_EXIT_CODE`]. Platforms without that concept assume the
//! process already has enough privilege and refuse the ACL grant.

use crate::error::{Result, SplashError};
use std::path::{Path, PathBuf};

/// Exit code of the process that handed work to its elevated copy
pub const ELEVATION_EXIT_CODE: i32 = 1829;

/// Well-known SID of the built-in Users group
pub const USERS_SID: &str = "S-1-5-32-545";

/// Privilege level of the running process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    Elevated,
    NeedsEscalation,
}

/// Check-and-escalate capability of the host OS
pub trait PrivilegeBroker {
    fn current(&self) -> Privilege;

    /// Starts an elevated copy of this program with `args`
    fn relaunch_elevated(&self, args: &[String]) -> Result<()>;

    /// Grants the Users group full control over `path`
    fn grant_full_control(&self, path: &Path) -> Result<()>;
}

/// Broker backed by the real operating system
#[derive(Debug, Clone)]
pub struct SystemPrivilege {
    exe_path: PathBuf,
}

impl SystemPrivilege {
    pub fn new() -> Result<Self> {
        let exe_path = std::env::current_exe().map_err(|e| {
            SplashError::Elevation(format!("cannot determine current executable: {}", e))
        })?;
        Ok(Self { exe_path })
    }

    /// Directory the elevated copy starts in
    #[cfg_attr(not(windows), allow(dead_code))]
    fn exe_dir(&self) -> PathBuf {
        self.exe_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(windows)]
impl PrivilegeBroker for SystemPrivilege {
    fn current(&self) -> Privilege {
        let is_admin = unsafe { windows::Win32::UI::Shell::IsUserAnAdmin() }.as_bool();
        if is_admin {
            Privilege::Elevated
        } else {
            Privilege::NeedsEscalation
        }
    }

    fn relaunch_elevated(&self, args: &[String]) -> Result<()> {
        use std::ffi::OsStr;
        use std::os::windows::ffi::OsStrExt;
        use windows::core::PCWSTR;
        use windows::Win32::Foundation::HWND;
        use windows::Win32::UI::Shell::ShellExecuteW;
        use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;

        let to_wide = |s: &OsStr| -> Vec<u16> {
            s.encode_wide().chain(std::iter::once(0)).collect()
        };
        let verb = to_wide(OsStr::new("runas"));
        let file = to_wide(self.exe_path.as_os_str());
        let parameters = to_wide(OsStr::new(&join_command_line(args)));
        let directory = to_wide(self.exe_dir().as_os_str());

        let result = unsafe {
            ShellExecuteW(
                HWND::default(),
                PCWSTR(verb.as_ptr()),
                PCWSTR(file.as_ptr()),
                PCWSTR(parameters.as_ptr()),
                PCWSTR(directory.as_ptr()),
                SW_SHOWNORMAL,
            )
        };

        // ShellExecuteW returns a value > 32 on success
        let code = result.0 as usize;
        if code <= 32 {
            return Err(SplashError::Elevation(format!(
                "ShellExecuteW failed with code {} (the UAC prompt may have been cancelled)",
                code
            )));
        }

        Ok(())
    }

    fn grant_full_control(&self, path: &Path) -> Result<()> {
        use std::process::Command;

        let output = Command::new("icacls")
            .args(grant_args(path))
            .output()
            .map_err(|e| SplashError::Permission {
                path: path.to_path_buf(),
                reason: format!("failed to run icacls: {}", e),
            })?;

        if !output.status.success() {
            let mut reason = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if reason.is_empty() {
                reason = String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
            return Err(SplashError::Permission {
                path: path.to_path_buf(),
                reason,
            });
        }

        Ok(())
    }
}

#[cfg(not(windows))]
impl PrivilegeBroker for SystemPrivilege {
    fn current(&self) -> Privilege {
        Privilege::Elevated
    }

    fn relaunch_elevated(&self, _args: &[String]) -> Result<()> {
        Err(SplashError::Elevation(format!(
            "elevated relaunch of {} is only supported on Windows",
            self.exe_path.display()
        )))
    }

    fn grant_full_control(&self, path: &Path) -> Result<()> {
        Err(SplashError::Permission {
            path: path.to_path_buf(),
            reason: "ACL grants are only supported on Windows".to_string(),
        })
    }
}

/// Quotes one argument so the Windows command-line parser reads it back
/// unchanged. Backslashes are only special when they precede a quote.
#[cfg_attr(not(windows), allow(dead_code))]
fn quote_arg(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains([' ', '\t', '\n', '"']) {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    let mut backslashes = 0;
    for c in arg.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                quoted.extend(std::iter::repeat('\\').take(backslashes * 2 + 1));
                backslashes = 0;
            }
            _ => {
                quoted.extend(std::iter::repeat('\\').take(backslashes));
                backslashes = 0;
            }
        }
        if c != '\\' {
            quoted.push(c);
        }
    }
    // Trailing backslashes sit right before the closing quote
    quoted.extend(std::iter::repeat('\\').take(backslashes * 2));
    quoted.push('"');
    quoted
}

/// Builds the parameter string for the relaunched process
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn join_command_line(args: &[String]) -> String {
    args.iter()
        .map(|arg| quote_arg(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// icacls arguments replacing the Users group's rules with full control
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn grant_args(path: &Path) -> Vec<String> {
    vec![
        path.to_string_lossy().into_owned(),
        "/grant:r".to_string(),
        format!("*{}:F", USERS_SID),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevation_exit_code() {
        assert_eq!(ELEVATION_EXIT_CODE, 1829);
    }

    #[test]
    fn test_plain_arguments_are_not_quoted() {
        let line = join_command_line(&["edit".to_string(), r"C:\pics\banner.png".to_string()]);
        assert_eq!(line, r"edit C:\pics\banner.png");
    }

    #[test]
    fn test_arguments_with_spaces_are_quoted() {
        let line = join_command_line(&["edit".to_string(), r"C:\my pics\banner.png".to_string()]);
        assert_eq!(line, r#"edit "C:\my pics\banner.png""#);
    }

    #[test]
    fn test_trailing_backslash_is_doubled_inside_quotes() {
        let line = join_command_line(&["edit".to_string(), r"C:\my dir\".to_string()]);
        assert_eq!(line, r#"edit "C:\my dir\\""#);
    }

    #[test]
    fn test_embedded_quote_without_space_is_escaped() {
        assert_eq!(join_command_line(&[r#"a"b"#.to_string()]), r#""a\"b""#);
        assert_eq!(join_command_line(&[r#"a\"b"#.to_string()]), r#""a\\\"b""#);
    }

    #[test]
    fn test_empty_argument_survives() {
        assert_eq!(
            join_command_line(&["edit".to_string(), String::new()]),
            r#"edit """#
        );
    }

    #[test]
    fn test_no_arguments_is_empty_line() {
        assert_eq!(join_command_line(&[]), "");
    }

    #[test]
    fn test_grant_args_target_users_sid() {
        let args = grant_args(Path::new("/apps/Assets/SplashScreen.png"));
        assert_eq!(
            args,
            vec![
                "/apps/Assets/SplashScreen.png".to_string(),
                "/grant:r".to_string(),
                "*S-1-5-32-545:F".to_string(),
            ]
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn test_non_windows_assumes_privilege_and_refuses_grant() {
        let broker = SystemPrivilege::new().unwrap();
        assert_eq!(broker.current(), Privilege::Elevated);

        let err = broker
            .grant_full_control(Path::new("/apps/Assets/SplashScreen.png"))
            .unwrap_err();
        assert!(matches!(err, SplashError::Permission { .. }));
    }
}
