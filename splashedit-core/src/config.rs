use std::path::{Path, PathBuf};

/// Fixed locations the editor works with
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Registry subkey under HKEY_LOCAL_MACHINE, read through the 32-bit view
    pub registry_subkey: String,
    /// String value holding the installed executable's full path
    pub registry_value: String,
    /// Directory under the install dir that holds the banner
    pub asset_dir: String,
    pub banner_file_name: String,
    /// Directory (relative to `working_dir`) with the bundled images
    pub images_dir: String,
    pub edited_image_name: String,
    pub default_image_name: String,
    /// Directory (relative to `working_dir`) for daily log files
    pub log_dir_name: String,
    /// Base for every relative path above
    pub working_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            registry_subkey: r"SOFTWARE\Seewo\EasiNote5".to_string(),
            registry_value: "ActualExePath".to_string(),
            asset_dir: "Assets".to_string(),
            banner_file_name: "SplashScreen.png".to_string(),
            images_dir: "images".to_string(),
            edited_image_name: "EditedSplashBanner.png".to_string(),
            default_image_name: "DefaultSplashScreen.png".to_string(),
            log_dir_name: "log".to_string(),
            working_dir: PathBuf::from("."),
        }
    }
}

impl EditorConfig {
    /// Default configuration rooted at the given working directory
    pub fn with_working_dir(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            ..Self::default()
        }
    }

    pub fn edited_image(&self) -> PathBuf {
        self.working_dir
            .join(&self.images_dir)
            .join(&self.edited_image_name)
    }

    pub fn default_image(&self) -> PathBuf {
        self.working_dir
            .join(&self.images_dir)
            .join(&self.default_image_name)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.working_dir.join(&self.log_dir_name)
    }

    /// Full banner path for a given installation directory
    pub fn banner_path_in(&self, install_dir: &Path) -> PathBuf {
        install_dir
            .join(&self.asset_dir)
            .join(&self.banner_file_name)
    }
}
