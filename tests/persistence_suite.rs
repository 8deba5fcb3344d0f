use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

use college_forms::config::{Config, ConfigManager};
use college_forms::session::{AdminSession, Credentials, JsonSessionStore, SessionStore};

#[test]
fn session_flag_is_written_as_literal_true() {
    let home = TempDir::new().unwrap();
    let file = home.child("session.json");
    let store = JsonSessionStore::open(file.path()).unwrap();
    let mut session = AdminSession::new(Box::new(store), Credentials::default());
    assert!(session.login("admin", "admin123").unwrap());

    file.assert(predicate::str::contains(r#""admin_logged_in": "true""#));

    let reopened = JsonSessionStore::open(file.path()).unwrap();
    assert_eq!(reopened.get("admin_logged_in").as_deref(), Some("true"));

    session.logout().unwrap();
    file.assert(predicate::str::contains("admin_logged_in").not());
}

#[test]
fn config_is_saved_as_pretty_json() {
    let home = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(home.path().to_path_buf()).unwrap();
    let mut config = Config::default();
    config.set("screen_reader_mode", "yes").unwrap();
    manager.save(&config).unwrap();

    home.child("config.json")
        .assert(predicate::str::contains("\"screen_reader_mode\": true"));
    assert!(!home.child("config.tmp").path().exists());
    assert_eq!(manager.load().unwrap(), config);
}

#[test]
fn custom_credentials_replace_the_defaults() {
    let mut config = Config::default();
    config.set("admin_username", "registrar").unwrap();
    config.set("admin_password", "s3cret").unwrap();

    let mut session = AdminSession::in_memory();
    session.set_credentials(config.credentials());
    assert!(!session.login("admin", "admin123").unwrap());
    assert!(session.login("registrar", "s3cret").unwrap());
    assert_eq!(session.username(), "registrar");
}

#[test]
fn masked_password_in_display_entries() {
    let config = Config::default();
    let entries = config.entries();
    let password = entries
        .iter()
        .find(|(key, _)| *key == "admin_password")
        .map(|(_, value)| value.as_str());
    assert_eq!(password, Some("********"));
}
