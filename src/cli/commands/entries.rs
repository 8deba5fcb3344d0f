use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::wizard::{Direction, EntryOp};

use super::rest;

const USAGE: &str = "entry add|remove|up|down|set <list> [position] [column value...]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "entry",
        "Edit a repeatable list on the current step",
        USAGE,
        cmd_entry,
    )]
}

fn usage() -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", USAGE))
}

fn position(args: &[&str]) -> Result<usize, CommandError> {
    args.get(2)
        .and_then(|raw| raw.parse::<usize>().ok())
        .filter(|position| *position > 0)
        .ok_or_else(usage)
}

fn cmd_entry(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (Some(action), Some(list)) = (args.first(), args.get(1)) else {
        return Err(usage());
    };
    let handle = context.wizard_mut()?;
    let op = match action.to_lowercase().as_str() {
        "add" => EntryOp::Add,
        "remove" => EntryOp::Remove(handle.entry_id(list, position(args)?)?),
        "up" => EntryOp::Move(handle.entry_id(list, position(args)?)?, Direction::Up),
        "down" => EntryOp::Move(handle.entry_id(list, position(args)?)?, Direction::Down),
        "set" => {
            let id = handle.entry_id(list, position(args)?)?;
            let column = args.get(3).ok_or_else(usage)?;
            EntryOp::Set {
                id,
                column: column.to_string(),
                value: rest(&args[4..]),
            }
        }
        _ => return Err(usage()),
    };
    let removing = matches!(op, EntryOp::Remove(_));
    let changed = handle.edit_entries(list, op)?;
    if !changed && removing {
        io::print_warning("The last entry cannot be removed; clear its fields instead.");
    } else if !changed {
        io::print_info("No change.");
    }
    context.print_step()
}
