use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tango_config::Config;

fn project_dirs() -> anyhow::Result<ProjectDirs> {
    ProjectDirs::from("dev", "tango", "tango").context("No home directory found")
}

/// Platform data directory, used when `storage.data_dir` is unset
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

/// A config file given on the command line, bare `Config` JSON
pub fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Invalid config {}", path.display()))
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Named configs stored as `<name>.json` in one directory
pub struct Profiles {
    dir: PathBuf,
}

impl Profiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `profiles/` under the platform config directory
    pub fn from_project_dirs() -> anyhow::Result<Self> {
        Ok(Self::new(project_dirs()?.config_dir().join("profiles")))
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Create the folder and the main profile if missing
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let main_profile = self.path("main");
        if !main_profile.exists() {
            self.write(&Profile {
                name: "main".into(),
                value: Config::new(),
            })?;
            tracing::info!("Created main profile in {}", self.dir.display());
        }

        Ok(())
    }

    /// Load a profile by name, falling back to main, then to defaults
    pub fn load(&self, name: &str) -> anyhow::Result<Config> {
        let profile_file = self.path(name);
        if profile_file.exists() {
            return self.read(&profile_file);
        }

        tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
        let main_file = self.path("main");
        if main_file.exists() {
            self.read(&main_file)
        } else {
            Ok(Config::new())
        }
    }

    /// Add a new profile cloned from main
    pub fn add_from_main(&self, new_name: &str) -> anyhow::Result<PathBuf> {
        let value = self.load("main")?;
        let file = self.write(&Profile {
            name: new_name.into(),
            value,
        })?;
        tracing::info!("Created new profile: {new_name}");
        Ok(file)
    }

    fn read(&self, file: &Path) -> anyhow::Result<Config> {
        let data = fs::read_to_string(file)
            .with_context(|| format!("Failed to read profile {}", file.display()))?;
        let profile: Profile = serde_json::from_str(&data)
            .with_context(|| format!("Invalid profile {}", file.display()))?;
        Ok(profile.value)
    }

    fn write(&self, profile: &Profile) -> anyhow::Result<PathBuf> {
        let file = self.path(&profile.name);
        fs::write(&file, serde_json::to_string_pretty(profile)?)
            .with_context(|| format!("Failed to write profile {}", file.display()))?;
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_main_once() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = Profiles::new(dir.path().join("profiles"));

        profiles.init().unwrap();
        let main = dir.path().join("profiles/main.json");
        assert!(main.exists());

        fs::write(
            &main,
            r#"{"name":"main","value":{"ocr":{"confidence_threshold":55.0}}}"#,
        )
        .unwrap();
        profiles.init().unwrap();

        assert_eq!(profiles.load("main").unwrap().ocr.confidence_threshold, 55.0);
    }

    #[test]
    fn unknown_profile_falls_back_to_main() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = Profiles::new(dir.path());
        profiles.init().unwrap();
        fs::write(
            dir.path().join("main.json"),
            r#"{"name":"main","value":{"ocr":{"language":"jpn+eng"}}}"#,
        )
        .unwrap();

        assert_eq!(profiles.load("travel").unwrap().ocr.language, "jpn+eng");

        let created = profiles.add_from_main("travel").unwrap();
        assert_eq!(created, dir.path().join("travel.json"));
        assert_eq!(profiles.load("travel").unwrap().ocr.language, "jpn+eng");
    }

    #[test]
    fn missing_directory_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = Profiles::new(dir.path().join("nowhere"));
        let config = profiles.load("main").unwrap();
        assert_eq!(config.storage.vocabulary_key, "vocabulary");
    }

    #[test]
    fn config_file_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
