use dirs::home_dir;
use std::{env, path::PathBuf};

pub const HOME_ENV: &str = "COLLEGE_FORMS_HOME";

const DEFAULT_DIR_NAME: &str = ".college_forms";
const CONFIG_FILE: &str = "config.json";
const SESSION_FILE: &str = "session.json";
const EXPORT_DIR: &str = "exports";

/// Returns the application data directory, defaulting to `~/.college_forms`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Key/value file standing in for the browser's local storage.
pub fn session_file_in(base: &std::path::Path) -> PathBuf {
    base.join(SESSION_FILE)
}

/// Default destination for CSV exports when the config leaves it unset.
pub fn export_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(EXPORT_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn files_live_under_the_base_directory() {
        let base = Path::new("/tmp/forms-home");
        assert_eq!(config_file_in(base), base.join("config.json"));
        assert_eq!(session_file_in(base), base.join("session.json"));
        assert_eq!(export_dir_in(base), base.join("exports"));
    }
}
