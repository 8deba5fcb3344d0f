use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{FormsError, Result};
use crate::session::{Credentials, DEFAULT_PASSWORD, DEFAULT_USERNAME};
use crate::utils::{
    paths,
    persistence::{ensure_dir, load_json, save_json},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub admin_username: String,
    pub admin_password: String,
    pub profile_allow_direct_step_jump: bool,
    pub admin_allow_direct_step_jump: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    pub screen_reader_mode: bool,
    pub high_contrast_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_username: DEFAULT_USERNAME.into(),
            admin_password: DEFAULT_PASSWORD.into(),
            profile_allow_direct_step_jump: true,
            admin_allow_direct_step_jump: false,
            export_dir: None,
            screen_reader_mode: false,
            high_contrast_mode: false,
        }
    }
}

pub const KEYS: &[&str] = &[
    "admin_username",
    "admin_password",
    "profile_allow_direct_step_jump",
    "admin_allow_direct_step_jump",
    "export_dir",
    "screen_reader_mode",
    "high_contrast_mode",
];

impl Config {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.admin_username.clone(),
            password: self.admin_password.clone(),
        }
    }

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "admin_username" => self.admin_username = non_empty(key, value)?,
            "admin_password" => self.admin_password = non_empty(key, value)?,
            "profile_allow_direct_step_jump" => {
                self.profile_allow_direct_step_jump = parse_flag(key, value)?
            }
            "admin_allow_direct_step_jump" => {
                self.admin_allow_direct_step_jump = parse_flag(key, value)?
            }
            "export_dir" => {
                let value = value.trim();
                self.export_dir = match value {
                    "" | "default" | "none" => None,
                    path => Some(PathBuf::from(path)),
                };
            }
            "screen_reader_mode" => self.screen_reader_mode = parse_flag(key, value)?,
            "high_contrast_mode" => self.high_contrast_mode = parse_flag(key, value)?,
            other => {
                return Err(FormsError::Config(format!(
                    "unknown setting `{}` (expected one of: {})",
                    other,
                    KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs for display; the password is masked.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("admin_username", self.admin_username.clone()),
            ("admin_password", "*".repeat(self.admin_password.len())),
            (
                "profile_allow_direct_step_jump",
                self.profile_allow_direct_step_jump.to_string(),
            ),
            (
                "admin_allow_direct_step_jump",
                self.admin_allow_direct_step_jump.to_string(),
            ),
            (
                "export_dir",
                self.export_dir
                    .as_ref()
                    .map(|dir| dir.display().to_string())
                    .unwrap_or_else(|| "(default)".into()),
            ),
            ("screen_reader_mode", self.screen_reader_mode.to_string()),
            ("high_contrast_mode", self.high_contrast_mode.to_string()),
        ]
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormsError::Config(format!("`{}` cannot be empty", key)));
    }
    Ok(value.to_string())
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(FormsError::Config(format!(
            "`{}` expects true/false, got `{}`",
            key, other
        ))),
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        Ok(load_json(&self.path)?.unwrap_or_default())
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        save_json(config, &self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn session_file(&self) -> PathBuf {
        paths::session_file_in(&self.base)
    }

    pub fn export_dir(&self, config: &Config) -> PathBuf {
        config
            .export_dir
            .clone()
            .unwrap_or_else(|| paths::export_dir_in(&self.base))
    }
}
