use std::path::{Path, PathBuf};

mod attributes;
mod command;
mod config;
mod error;
mod locator;
mod privilege;
mod replacer;
mod session_log;

// Re-export public types
pub use attributes::{clear_readonly, is_readonly, set_readonly};
pub use command::Command;
pub use config::EditorConfig;
pub use error::{Result, SplashError};
pub use locator::{FixedLocator, InstallLocator, RegistryLocator};
pub use privilege::{Privilege, PrivilegeBroker, SystemPrivilege, ELEVATION_EXIT_CODE, USERS_SID};
pub use replacer::{replace_banner, BannerSource};
pub use session_log::SessionLog;

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The work was done in this process
    Completed,
    /// An elevated copy was started; this process should exit with
    /// [`ELEVATION_EXIT_CODE`]
    Relaunched,
}

/// Replaces the EasiNote splash banner and keeps it protected
pub struct SplashEditor {
    config: EditorConfig,
    locator: Box<dyn InstallLocator>,
    privilege: Box<dyn PrivilegeBroker>,
    log: SessionLog,
    args: Vec<String>,
}

impl SplashEditor {
    /// Create an editor. `args` are the raw process arguments, replayed on
    /// an elevated relaunch.
    pub fn new(
        config: EditorConfig,
        locator: Box<dyn InstallLocator>,
        privilege: Box<dyn PrivilegeBroker>,
        log: SessionLog,
        args: Vec<String>,
    ) -> Self {
        Self {
            config,
            locator,
            privilege,
            log,
            args,
        }
    }

    /// Editor wired to the registry and the host OS
    pub fn for_system(config: EditorConfig, log: SessionLog, args: Vec<String>) -> Result<Self> {
        let locator = RegistryLocator::new(&config.registry_subkey, &config.registry_value);
        let privilege = SystemPrivilege::new()?;
        Ok(Self::new(
            config,
            Box::new(locator),
            Box::new(privilege),
            log,
            args,
        ))
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Absolute path of the banner inside the installation
    pub fn banner_image_path(&self) -> Result<PathBuf> {
        let install_dir = self.locator.install_dir()?;
        let banner = self.config.banner_path_in(&install_dir);
        self.log.debug(&format!("Banner target: {}", banner.display()));
        Ok(banner)
    }

    /// Runs one dispatched command to completion
    pub fn run(&self, command: Command) -> Result<Outcome> {
        self.log.debug(&format!("Running {:?}", command));

        match command {
            Command::RestoreDefault => self.restore_default_banner(),
            Command::ApplyEdited => self.apply_edited_banner(),
            Command::ApplyCustom(path) => self.apply_custom_banner(&path),
            Command::GrantPermissions => return self.grant_permissions(),
        }?;

        Ok(Outcome::Completed)
    }

    pub fn restore_default_banner(&self) -> Result<()> {
        self.change_banner_image(&BannerSource::Default)
    }

    pub fn apply_edited_banner(&self) -> Result<()> {
        self.change_banner_image(&BannerSource::Edited)
    }

    pub fn apply_custom_banner(&self, image_path: &Path) -> Result<()> {
        self.change_banner_image(&BannerSource::Custom(image_path.to_path_buf()))
    }

    /// Copies the selected image over the banner and marks it read-only
    pub fn change_banner_image(&self, source: &BannerSource) -> Result<()> {
        let target = self.banner_image_path()?;
        let source_path = source.resolve(&self.config);

        replace_banner(&source_path, &target, &self.log)?;

        self.log.info(&format!(
            "Changed banner image to {}",
            source_path.display()
        ));
        Ok(())
    }

    /// Grants the Users group full control over the banner.
    ///
    /// Without administrator rights nothing is changed here: an elevated
    /// copy is started with the same arguments instead.
    pub fn grant_permissions(&self) -> Result<Outcome> {
        if self.privilege.current() == Privilege::NeedsEscalation {
            self.log
                .warn("No administrator permission! Request permission and retry.");
            self.log
                .debug(&format!("Relaunching elevated with {:?}", self.args));
            self.privilege.relaunch_elevated(&self.args)?;
            return Ok(Outcome::Relaunched);
        }

        let target = self.banner_image_path()?;
        self.privilege.grant_full_control(&target)?;

        self.log.info("Get permission successfully!");
        Ok(Outcome::Completed)
    }
}
