use anyhow::{Context, Result};
use splashedit_core::{
    Command, EditorConfig, Outcome, SessionLog, SplashEditor, ELEVATION_EXIT_CODE,
};
use std::path::Path;

mod cli;

/// Dispatches `raw_args` against `working_dir`.
///
/// Returns `None` when no command matched. Nothing is written in that case,
/// not even the log file.
fn run(raw_args: &[String], working_dir: &Path) -> Result<Option<Outcome>> {
    let Some(command) = Command::from_args(raw_args) else {
        log::debug!("No command matches {:?}, nothing to do", raw_args);
        return Ok(None);
    };

    let config = EditorConfig::with_working_dir(working_dir);
    let log = SessionLog::open(&config.log_dir())?;

    let result = SplashEditor::for_system(config, log.clone(), raw_args.to_vec())
        .and_then(|editor| editor.run(command));

    match result {
        Ok(outcome) => Ok(Some(outcome)),
        Err(e) => {
            let err = anyhow::Error::from(e);
            log.error(&format!("{:#}", err));
            Err(err)
        }
    }
}

fn main() -> Result<()> {
    let invocation = match cli::parse_args() {
        cli::Request::Help => {
            cli::print_help()?;
            return Ok(());
        }
        cli::Request::Version => {
            cli::print_version();
            return Ok(());
        }
        cli::Request::Run(invocation) => invocation,
    };

    // Console output unless --no-log was given
    if !invocation.no_log {
        if std::env::var("RUST_LOG").is_err() {
            if invocation.verbose {
                std::env::set_var("RUST_LOG", "debug");
            } else {
                std::env::set_var("RUST_LOG", "info");
            }
        }
        env_logger::init();
    }

    let working_dir = std::env::current_dir().context("Failed to read working directory")?;

    match run(&invocation.args, &working_dir)? {
        Some(Outcome::Relaunched) => std::process::exit(ELEVATION_EXIT_CODE),
        Some(Outcome::Completed) | None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Working directory with bundled images and a banner beside it
    fn workspace() -> (TempDir, std::path::PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let images = temp_dir.path().join("images");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("EditedSplashBanner.png"), b"edited").unwrap();
        fs::write(images.join("DefaultSplashScreen.png"), b"default").unwrap();

        let banner = temp_dir.path().join("banner.png");
        fs::write(&banner, b"vendor banner").unwrap();
        (temp_dir, banner)
    }

    fn raw(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unmatched_arguments_touch_nothing() -> Result<()> {
        let (temp_dir, banner) = workspace();
        let cases: [&[&str]; 6] = [
            &[],
            &["restore"],
            &["default", "--no-log"],
            &["edit", "a.png", "--no-log"],
            &["edit", "a.png", "b.png"],
            &["admin", "now"],
        ];

        for args in cases {
            let outcome = run(&raw(args), temp_dir.path())?;
            assert_eq!(outcome, None, "args {:?}", args);
        }

        assert!(!temp_dir.path().join("log").exists());
        assert_eq!(fs::read(&banner)?, b"vendor banner");
        Ok(())
    }

    #[cfg(not(windows))]
    #[test]
    fn test_matched_command_failure_is_written_to_log() -> Result<()> {
        let (temp_dir, banner) = workspace();

        // No registry here, so resolving the installation fails
        let err = run(&raw(&["default"]), temp_dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("could not resolve installation"));

        let log_dir = temp_dir.path().join("log");
        let entries: Vec<_> = fs::read_dir(&log_dir)?.collect::<std::io::Result<_>>()?;
        assert_eq!(entries.len(), 1);
        let content = fs::read_to_string(entries[0].path())?;
        assert!(content.contains("[ERROR] could not resolve installation"));

        assert_eq!(fs::read(&banner)?, b"vendor banner");
        Ok(())
    }
}
