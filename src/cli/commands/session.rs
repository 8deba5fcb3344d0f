use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "login",
            "Log in as administrator",
            "login <username> <password>",
            cmd_login,
        ),
        CommandEntry::new("logout", "End the admin session", "logout", cmd_logout),
        CommandEntry::new("whoami", "Show the admin session state", "whoami", cmd_whoami),
    ]
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [username, password] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: login <username> <password>".into(),
        ));
    };
    if context.session.login(username, password)? {
        io::print_success(format!("Logged in as {}.", username));
        io::print_hint("Use `college-add` to add a college.");
    } else {
        io::print_error("Invalid username or password.");
    }
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.session.is_logged_in() {
        io::print_info("Not logged in.");
        return Ok(());
    }
    context.session.logout()?;
    context.close_admin_flows();
    io::print_success("Logged out.");
    Ok(())
}

fn cmd_whoami(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.session.is_logged_in() {
        io::print_info(format!("Logged in as {}.", context.session.username()));
    } else {
        io::print_info("Not logged in.");
    }
    Ok(())
}
