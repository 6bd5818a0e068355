use crate::attributes;
use crate::config::EditorConfig;
use crate::error::{Result, SplashError};
use crate::session_log::SessionLog;
use std::fs;
use std::path::{Path, PathBuf};

/// Which image to put in place of the banner
#[derive(Debug, Clone, PartialEq)]
pub enum BannerSource {
    /// Bundled edited image under the working directory
    Edited,
    /// Bundled stock image under the working directory
    Default,
    /// Any caller-supplied file, used as-is
    Custom(PathBuf),
}

impl BannerSource {
    pub fn resolve(&self, config: &EditorConfig) -> PathBuf {
        match self {
            BannerSource::Edited => config.edited_image(),
            BannerSource::Default => config.default_image(),
            BannerSource::Custom(path) => path.clone(),
        }
    }
}

/// Overwrites `target` with `source`, leaving `target` read-only.
///
/// The source is not validated. If the copy fails the target keeps its
/// old content, gets its read-only flag back, and the copy error is
/// returned.
pub fn replace_banner(source: &Path, target: &Path, log: &SessionLog) -> Result<()> {
    attributes::clear_readonly(target)?;
    log.debug(&format!("Cleared read-only on {}", target.display()));

    if let Err(e) = fs::copy(source, target) {
        log.warn(&format!(
            "Copy from {} failed ({}), restoring read-only on {}",
            source.display(),
            e,
            target.display()
        ));
        if let Err(restore_err) = attributes::set_readonly(target) {
            log.error(&format!("Could not restore read-only flag: {}", restore_err));
        }
        return Err(SplashError::fs("copy banner image from", source, e));
    }
    log.debug(&format!(
        "Copied {} to {}",
        source.display(),
        target.display()
    ));

    attributes::set_readonly(target)?;
    log.debug(&format!("Set read-only on {}", target.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use tempfile::TempDir;

    fn banner_fixture(temp_dir: &TempDir, readonly: bool) -> PathBuf {
        let target = temp_dir.path().join("SplashScreen.png");
        fs::write(&target, b"original banner").unwrap();
        if readonly {
            attributes::set_readonly(&target).unwrap();
        }
        target
    }

    #[test]
    fn test_replace_readonly_target() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let target = banner_fixture(&temp_dir, true);
        let source = temp_dir.path().join("new.png");
        fs::write(&source, b"new banner bytes")?;

        replace_banner(&source, &target, &SessionLog::discard())?;

        assert_eq!(fs::read(&target)?, b"new banner bytes");
        assert!(attributes::is_readonly(&target)?);
        Ok(())
    }

    #[test]
    fn test_replace_writable_target_ends_readonly() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let target = banner_fixture(&temp_dir, false);
        let source = temp_dir.path().join("new.png");
        fs::write(&source, b"other bytes")?;

        replace_banner(&source, &target, &SessionLog::discard())?;

        assert_eq!(fs::read(&target)?, b"other bytes");
        assert!(attributes::is_readonly(&target)?);
        Ok(())
    }

    #[test]
    fn test_missing_source_leaves_target_untouched() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let target = banner_fixture(&temp_dir, true);
        let missing = temp_dir.path().join("does-not-exist.png");

        let err = replace_banner(&missing, &target, &SessionLog::discard()).unwrap_err();

        assert_eq!(err.io_kind(), Some(ErrorKind::NotFound));
        assert_eq!(fs::read(&target)?, b"original banner");
        assert!(attributes::is_readonly(&target)?);
        Ok(())
    }

    #[test]
    fn test_missing_target_fails_before_copy() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("new.png");
        fs::write(&source, b"bytes").unwrap();
        let target = temp_dir.path().join("Assets").join("SplashScreen.png");

        let err = replace_banner(&source, &target, &SessionLog::discard()).unwrap_err();

        assert_eq!(err.io_kind(), Some(ErrorKind::NotFound));
        assert!(!target.exists());
    }

    #[test]
    fn test_steps_reach_the_log_file() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let target = banner_fixture(&temp_dir, true);
        let source = temp_dir.path().join("new.png");
        fs::write(&source, b"bytes")?;
        let missing = temp_dir.path().join("missing.png");
        let log = SessionLog::open(&temp_dir.path().join("log"))?;

        replace_banner(&source, &target, &log)?;
        assert!(replace_banner(&missing, &target, &log).is_err());

        let content = fs::read_to_string(log.log_path().unwrap())?;
        assert!(content.contains("[DEBUG] Copied"));
        assert!(content.contains("[DEBUG] Set read-only on"));
        assert!(content.contains("[WARN] Copy from"));
        assert!(content.contains("missing.png"));
        Ok(())
    }

    #[test]
    fn test_source_resolution() {
        let config = EditorConfig::with_working_dir("/tool");

        assert_eq!(
            BannerSource::Edited.resolve(&config),
            PathBuf::from("/tool/images/EditedSplashBanner.png")
        );
        assert_eq!(
            BannerSource::Default.resolve(&config),
            PathBuf::from("/tool/images/DefaultSplashScreen.png")
        );
        assert_eq!(
            BannerSource::Custom(PathBuf::from("/custom/banner.png")).resolve(&config),
            PathBuf::from("/custom/banner.png")
        );
    }
}
