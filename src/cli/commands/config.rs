use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

use super::rest;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and manage CLI preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 2 {
                return Err(CommandError::InvalidArguments(
                    "usage: config set <key> <value>".into(),
                ));
            }
            set_config_value(context, args[1], &rest(&args[2..]))
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}` (use show or set)",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output_section("Configuration");
    for (key, value) in context.config.entries() {
        io::print_info(format!("  {:<32} {}", key, value));
    }
    io::print_info(format!(
        "  {:<32} {}",
        "(file)",
        context.config_manager.path().display()
    ));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let key = key.to_lowercase();
    if is_credential_key(&key) && !context.session.is_logged_in() {
        return Err(CommandError::AdminLoginRequired);
    }
    let mut updated = context.config.clone();
    updated.set(&key, value)?;
    context.config_manager.save(&updated)?;
    context.config = updated;
    context.apply_output_preferences();
    context.session.set_credentials(context.config.credentials());
    tracing::info!(key = %key, "configuration updated");
    io::print_success(format!("`{}` updated.", key));
    if key.ends_with("direct_step_jump") && context.active.is_some() {
        io::print_hint("Takes effect the next time a wizard starts.");
    }
    Ok(())
}

fn is_credential_key(key: &str) -> bool {
    matches!(key, "admin_username" | "admin_password")
}

#[cfg(test)]
mod tests {
    use crate::cli::core::process_script;
    use crate::config::{Config, ConfigManager};
    use tempfile::TempDir;

    #[test]
    fn unknown_key_leaves_config_untouched() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let app = process_script(manager, &["config set colour blue"]).unwrap();
        assert_eq!(app.config, Config::default());
    }

    #[test]
    fn failed_save_keeps_previous_config() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut app = process_script(manager, &[]).unwrap();
        std::fs::create_dir_all(app.config_manager.path()).unwrap();

        assert!(app.process_line("config set screen_reader_mode on").is_err());
        assert_eq!(app.config, Config::default());
        assert!(!app.config.screen_reader_mode);
    }

    #[test]
    fn credentials_cannot_change_without_login() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let app = process_script(
            manager,
            &["config set admin_password hijack", "login admin admin123"],
        )
        .unwrap();
        assert_eq!(app.config, Config::default());
        assert!(app.session.is_logged_in());
        assert!(!app.config_manager.path().exists());
    }

    #[test]
    fn new_password_is_required_after_change() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let app = process_script(
            manager,
            &[
                "login admin admin123",
                "config set admin_password s3cret",
                "logout",
                "login admin admin123",
            ],
        )
        .unwrap();
        assert!(!app.session.is_logged_in());

        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let app = process_script(manager, &["login admin s3cret"]).unwrap();
        assert!(app.session.is_logged_in());
    }
}
