pub mod config;
pub mod entries;
pub mod session;
pub mod system;
pub mod wizard;

use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(wizard::definitions());
    commands.extend(entries::definitions());
    commands.extend(session::definitions());
    commands.extend(config::definitions());
    commands
}

/// Joins the trailing arguments of a command back into one value.
pub(crate) fn rest(args: &[&str]) -> String {
    args.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn command_names_are_unique() {
        let definitions = all_definitions();
        let names: HashSet<_> = definitions.iter().map(|entry| entry.name).collect();
        assert_eq!(names.len(), definitions.len());
    }

    #[test]
    fn rest_rejoins_words() {
        assert_eq!(rest(&["Asha", "Rao"]), "Asha Rao");
        assert_eq!(rest(&[]), "");
    }
}
