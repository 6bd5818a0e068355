//! Installation lookup
//!
//! The installer records the full path of its executable in the 32-bit
//! registry view. The install directory is the parent of that path.

use crate::error::{Result, SplashError};
use std::path::{Path, PathBuf};

/// Source of the target application's installation directory
pub trait InstallLocator {
    fn install_dir(&self) -> Result<PathBuf>;
}

/// Reads the installation directory from HKEY_LOCAL_MACHINE
#[derive(Debug, Clone)]
pub struct RegistryLocator {
    subkey: String,
    value: String,
}

impl RegistryLocator {
    pub fn new(subkey: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            subkey: subkey.into(),
            value: value.into(),
        }
    }

    fn resolution_error(&self, reason: impl Into<String>) -> SplashError {
        SplashError::Resolution {
            key: format!(r"HKLM\{}\{}", self.subkey, self.value),
            reason: reason.into(),
        }
    }
}

impl InstallLocator for RegistryLocator {
    fn install_dir(&self) -> Result<PathBuf> {
        let exe_path = read_registry_string(&self.subkey, &self.value)
            .map_err(|reason| self.resolution_error(reason))?;

        install_dir_from_exe(&exe_path)
            .ok_or_else(|| self.resolution_error(format!("`{}` has no parent directory", exe_path)))
    }
}

/// Always answers with a known directory
#[derive(Debug, Clone)]
pub struct FixedLocator(pub PathBuf);

impl InstallLocator for FixedLocator {
    fn install_dir(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}

/// Directory that contains the executable named by `exe_path`
fn install_dir_from_exe(exe_path: &str) -> Option<PathBuf> {
    let trimmed = exe_path.trim().trim_matches('"');
    if trimmed.is_empty() {
        return None;
    }

    Path::new(trimmed)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

#[cfg(windows)]
fn read_registry_string(subkey: &str, value: &str) -> std::result::Result<String, String> {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::ERROR_SUCCESS;
    use windows::Win32::System::Registry::{
        RegGetValueW, HKEY_LOCAL_MACHINE, RRF_RT_REG_SZ, RRF_SUBKEY_WOW6432KEY,
    };

    let to_wide = |s: &str| -> Vec<u16> {
        OsStr::new(s)
            .encode_wide()
            .chain(std::iter::once(0))
            .collect()
    };
    let subkey_w = to_wide(subkey);
    let value_w = to_wide(value);
    let flags = RRF_RT_REG_SZ | RRF_SUBKEY_WOW6432KEY;

    // First call only asks for the size in bytes
    let mut size: u32 = 0;
    let status = unsafe {
        RegGetValueW(
            HKEY_LOCAL_MACHINE,
            PCWSTR(subkey_w.as_ptr()),
            PCWSTR(value_w.as_ptr()),
            flags,
            None,
            None,
            Some(&mut size as *mut u32),
        )
    };
    if status != ERROR_SUCCESS {
        return Err(format!("key or value missing (error code {})", status.0));
    }

    let mut buffer = vec![0u16; (size as usize).div_ceil(2)];
    let status = unsafe {
        RegGetValueW(
            HKEY_LOCAL_MACHINE,
            PCWSTR(subkey_w.as_ptr()),
            PCWSTR(value_w.as_ptr()),
            flags,
            None,
            Some(buffer.as_mut_ptr().cast()),
            Some(&mut size as *mut u32),
        )
    };
    if status != ERROR_SUCCESS {
        return Err(format!("failed to read value (error code {})", status.0));
    }

    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    Ok(String::from_utf16_lossy(&buffer[..len]))
}

#[cfg(not(windows))]
fn read_registry_string(_subkey: &str, _value: &str) -> std::result::Result<String, String> {
    Err("the Windows registry is not available on this platform".to_string())
}
