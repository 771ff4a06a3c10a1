use std::{
    fmt::Display,
    path::{
        Path,
        PathBuf,
    },
};

use color_eyre::eyre::{
    Context,
    eyre,
};
use directories::{
    ProjectDirs,
    UserDirs,
};
use serde::{
    Serialize,
    de::DeserializeOwned,
};

use crate::Error;

/// Where the app keeps its config and data.
#[derive(Clone, Debug)]
pub struct AppFiles {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl AppFiles {
    pub fn new(config_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    pub fn from_project_dirs(project_dirs: &ProjectDirs) -> Self {
        Self::new(
            project_dirs.config_local_dir(),
            project_dirs.data_local_dir(),
        )
    }

    /// Uses the platform's directories and creates them.
    pub fn open() -> Result<Self, Error> {
        let project_dirs = ProjectDirs::from("", "huebox", std::env!("CARGO_PKG_NAME"))
            .ok_or_else(|| eyre!("Could not determine the home directory"))?;
        let app_files = Self::from_project_dirs(&project_dirs);
        app_files.create_directories()?;
        Ok(app_files)
    }

    pub fn create_directories(&self) -> Result<(), Error> {
        std::fs::create_dir_all(&self.config_dir).with_context(|| {
            format!(
                "Could not create config directory: {}",
                format_path(&self.config_dir)
            )
        })?;
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Could not create data directory: {}",
                format_path(&self.data_dir)
            )
        })?;
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Directory for the key-value store holding the palette and theme.
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    /// Read config file, or create one if it doesn't exist yet.
    pub fn read_config_or_create<T>(&self) -> Result<T, Error>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let path = self.config_path();

        let config = if !path.exists() {
            tracing::info!(path = %path.display(), "Creating config file");
            let config = T::default();
            let toml = toml::to_string_pretty(&config)?;
            std::fs::write(&path, &toml)
                .with_context(|| format!("Could not write config file: {}", path.display()))?;
            config
        }
        else {
            tracing::info!(path = %path.display(), "Reading config file");
            let toml = std::fs::read_to_string(&path)
                .with_context(|| format!("Could not read config file: {}", path.display()))?;

            toml::from_str(&toml)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        };

        Ok(config)
    }
}

/// Format a path for display
pub fn format_path<P>(path: P) -> FormatPath<P>
where
    P: AsRef<Path>,
{
    FormatPath { path }
}

#[derive(Clone, Copy, Debug)]
pub struct FormatPath<P> {
    pub path: P,
}

impl<P> Display for FormatPath<P>
where
    P: AsRef<Path>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self.path.as_ref();

        if let Some(user_dirs) = UserDirs::new() {
            let home = user_dirs.home_dir();

            if let Ok(relative_path) = path.strip_prefix(home) {
                return write!(f, "~/{}", relative_path.to_string_lossy());
            }
        }

        write!(f, "{}", path.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::AppConfig,
        files::AppFiles,
    };

    #[test]
    fn it_creates_the_config_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let app_files = AppFiles::new(dir.path().join("config"), dir.path().join("data"));
        app_files.create_directories().unwrap();

        let config: AppConfig = app_files.read_config_or_create().unwrap();
        assert_eq!(config.export.swatch_width, 50);
        assert!(app_files.config_path().exists());

        std::fs::write(app_files.config_path(), "[export]\nswatch_width = 7\n").unwrap();
        let config: AppConfig = app_files.read_config_or_create().unwrap();
        assert_eq!(config.export.swatch_width, 7);
    }

    #[test]
    fn it_reports_invalid_config_files() {
        let dir = tempfile::tempdir().unwrap();
        let app_files = AppFiles::new(dir.path(), dir.path());

        std::fs::write(app_files.config_path(), "export = 5").unwrap();
        let error = app_files.read_config_or_create::<AppConfig>().unwrap_err();
        assert!(error.to_string().starts_with("Invalid config file"));
    }

    #[test]
    fn it_keeps_the_store_under_the_data_dir() {
        let app_files = AppFiles::new("/config", "/data");
        assert_eq!(app_files.store_dir(), std::path::Path::new("/data/store"));
    }
}
