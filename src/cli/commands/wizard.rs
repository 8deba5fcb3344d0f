use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::prompts::{self, DialoguerPrompter, ScriptedPrompter, TEST_INPUTS_ENV};
use crate::cli::registry::CommandEntry;
use crate::flows::Flow;
use crate::wizard::{FieldPath, SubmissionStatus};

use super::rest;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "profile",
            "Start the student profile wizard",
            "profile",
            cmd_profile,
        ),
        CommandEntry::new(
            "predictor",
            "Start the college predictor",
            "predictor",
            cmd_predictor,
        ),
        CommandEntry::new(
            "college-add",
            "Start the add-college wizard (admin only)",
            "college-add",
            cmd_college_add,
        ),
        CommandEntry::new("show", "Show the current step", "show", cmd_show),
        CommandEntry::new(
            "set",
            "Set a field on the current step",
            "set <field> <value...>",
            cmd_set,
        ),
        CommandEntry::new("next", "Validate and move to the next step", "next", cmd_next),
        CommandEntry::new("back", "Move to the previous step", "back", cmd_back),
        CommandEntry::new(
            "goto",
            "Jump to a step by number",
            "goto <step>",
            cmd_goto,
        ),
        CommandEntry::new("submit", "Submit from the final step", "submit", cmd_submit),
        CommandEntry::new(
            "reset",
            "Clear all answers and return to step 1",
            "reset",
            cmd_reset,
        ),
        CommandEntry::new("cancel", "Close the running wizard", "cancel", cmd_cancel),
        CommandEntry::new(
            "summary",
            "Review every step before submitting",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "search",
            "Filter a searchable field's options",
            "search <field> <text...>",
            cmd_search,
        ),
        CommandEntry::new(
            "pick",
            "Choose a match from the last search",
            "pick <field> <n>",
            cmd_pick,
        ),
        CommandEntry::new(
            "blur",
            "Close a searchable field's dropdown",
            "blur <field>",
            cmd_blur,
        ),
        CommandEntry::new(
            "fill",
            "Answer every field of the current step in turn",
            "fill",
            cmd_fill,
        ),
    ]
}

fn cmd_profile(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.start_flow(Flow::StudentProfile)
}

fn cmd_predictor(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.start_flow(Flow::Predictor)
}

fn cmd_college_add(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.start_flow(Flow::CollegeAdd)
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.print_step()
}

fn field_path(raw: Option<&&str>, usage: &str) -> Result<FieldPath, CommandError> {
    let raw = raw.ok_or_else(|| CommandError::InvalidArguments(format!("usage: {}", usage)))?;
    Ok(FieldPath::parse(raw)?)
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = field_path(args.first(), "set <field> <value...>")?;
    let value = rest(&args[1..]);
    let update = context.wizard_mut()?.set_value(&path, &value)?;
    match update.inline_error {
        Some(message) => io::print_warning(message),
        None => io::print_info(format!("{} = {}", args[0], value)),
    }
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let change = context.wizard_mut()?.advance();
    context.report_step_change(change)
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let change = context.wizard_mut()?.retreat();
    context.report_step_change(change)
}

fn cmd_goto(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let step = args
        .first()
        .and_then(|raw| raw.parse::<usize>().ok())
        .and_then(|step| step.checked_sub(1))
        .ok_or_else(|| CommandError::InvalidArguments("usage: goto <step> (1-based)".into()))?;
    let change = context.wizard_mut()?.jump_to(step);
    context.report_step_change(change)
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let outcome = context.wizard_mut()?.submit();
    context.report_submit(outcome)
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.wizard()?;
    if !context.confirm("Clear every answer in this wizard?")? {
        return Ok(());
    }
    context.wizard_mut()?.reset();
    io::print_info("Wizard reset.");
    context.print_step()
}

fn cmd_cancel(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let Some(active) = &context.active else {
        return Err(CommandError::NoActiveWizard);
    };
    let flow = active.flow;
    if active.handle.status() != SubmissionStatus::Submitted
        && !context.confirm(&format!("Discard the unfinished {} wizard?", flow.title()))?
    {
        return Ok(());
    }
    context.active = None;
    tracing::info!(wizard = flow.name(), "wizard cancelled");
    io::print_info(format!("Closed the `{}` wizard.", flow.name()));
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let handle = context.wizard()?;
    output_section("Review");
    for line in handle.summary() {
        output::line(format!("  {}", line));
    }
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = field_path(args.first(), "search <field> <text...>")?;
    let text = rest(&args[1..]);
    let matches = context.wizard_mut()?.search(&path, &text)?;
    if matches.is_empty() {
        io::print_info(format!("No matches for `{}`; the typed text is kept.", text));
        return Ok(());
    }
    for (index, option) in matches.iter().enumerate() {
        output::line(format!("  {}. {}", index + 1, option));
    }
    io::print_hint(format!("Use `pick {} <n>` to choose.", args[0]));
    Ok(())
}

fn cmd_pick(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = field_path(args.first(), "pick <field> <n>")?;
    let index = args
        .get(1)
        .and_then(|raw| raw.parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| CommandError::InvalidArguments("usage: pick <field> <n>".into()))?;
    match context.wizard_mut()?.pick(&path, index)? {
        Some(option) => io::print_info(format!("{} = {}", args[0], option)),
        None => io::print_warning(format!(
            "No match number {}; run `search {}` first.",
            index + 1,
            args[0]
        )),
    }
    Ok(())
}

fn cmd_blur(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = field_path(args.first(), "blur <field>")?;
    context.wizard_mut()?.blur(&path);
    Ok(())
}

fn cmd_fill(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let handle = context
        .active
        .as_mut()
        .map(|active| active.handle.as_mut())
        .ok_or(CommandError::NoActiveWizard)?;
    let written = match context.mode {
        CliMode::Interactive => {
            let mut prompter = DialoguerPrompter::new(&context.theme);
            prompts::fill_current_step(handle, &mut prompter)?
        }
        CliMode::Script => {
            let mut prompter = ScriptedPrompter::from_env().ok_or_else(|| {
                CommandError::Message(format!(
                    "`fill` needs a terminal; set {} to script answers.",
                    TEST_INPUTS_ENV
                ))
            })?;
            prompts::fill_current_step(handle, &mut prompter)?
        }
    };
    io::print_info(format!("{} field(s) updated.", written));
    context.print_step()
}

#[cfg(test)]
mod tests {
    use crate::cli::core::process_script;
    use crate::config::ConfigManager;
    use crate::flows::Flow;
    use crate::wizard::FieldPath;
    use tempfile::TempDir;

    fn run(lines: &[&str]) -> crate::cli::core::ShellContext {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        process_script(manager, lines).unwrap()
    }

    #[test]
    fn blocked_next_keeps_step() {
        let app = run(&["profile", "set mobile_number 12345", "next"]);
        let handle = app.wizard().unwrap();
        assert_eq!(handle.current_step(), 0);
        assert_eq!(
            handle.current_errors(),
            vec![
                "Full name is required".to_string(),
                "Please enter a valid 10-digit mobile number".to_string(),
                "City is required".to_string(),
            ]
        );
    }

    #[test]
    fn malformed_cell_path_is_reported_and_shell_continues() {
        let app = run(&["profile", "set x].y[3 Pune", "set city_you_live_in Pune"]);
        assert!(app.running);
        let handle = app.wizard().unwrap();
        assert_eq!(
            handle
                .value(&FieldPath::Field("city_you_live_in".into()))
                .unwrap(),
            "Pune"
        );
    }

    #[test]
    fn goto_is_one_based() {
        let app = run(&["predictor", "goto 3"]);
        assert_eq!(app.wizard().unwrap().current_step(), 2);
    }

    #[test]
    fn search_then_pick_binds_value() {
        let app = run(&["profile", "goto 3", "search preferred_course tech", "pick preferred_course 1"]);
        let value = app
            .wizard()
            .unwrap()
            .value(&FieldPath::Field("preferred_course".into()))
            .unwrap();
        assert!(value.to_lowercase().contains("tech"));
    }

    #[test]
    fn unmatched_search_keeps_raw_text() {
        let app = run(&["profile", "goto 3", "search preferred_course zzz"]);
        let value = app
            .wizard()
            .unwrap()
            .value(&FieldPath::Field("preferred_course".into()))
            .unwrap();
        assert_eq!(value, "zzz");
    }

    #[test]
    fn cancel_closes_wizard() {
        let app = run(&["predictor", "cancel"]);
        assert!(app.active.is_none());
    }

    #[test]
    fn starting_another_flow_replaces_the_first() {
        let app = run(&["profile", "predictor"]);
        assert_eq!(app.active_flow(), Some(Flow::Predictor));
    }

    #[test]
    fn reset_returns_to_first_step() {
        let app = run(&["predictor", "goto 2", "reset"]);
        assert_eq!(app.wizard().unwrap().current_step(), 0);
    }
}
