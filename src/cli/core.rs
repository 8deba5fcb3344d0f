//! Core CLI loop, dispatch, and shell context helpers.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::{
    config::ConfigManager,
    errors::FormsError,
    export::CsvExportSink,
    flows::{college_add, predictor, student_profile, Flow, PredictionSink},
    session::{AdminSession, JsonSessionStore},
    wizard::{
        BoundWizard, ConsoleSink, FieldError, StepChange, SubmissionStatus, SubmitOutcome,
        WizardHandle, WizardOptions,
    },
};

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
use super::shell_context::ActiveWizard;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_manager(mode, config_manager)
    }

    pub fn with_manager(mode: CliMode, config_manager: ConfigManager) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let store = JsonSessionStore::open(config_manager.session_file())?;
        let session = AdminSession::new(Box::new(store), config.credentials());
        if mode == CliMode::Script {
            colored::control::set_override(false);
        }
        let context = Self {
            mode,
            registry: CommandRegistry::from_entries(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            session,
            active: None,
            last_command: None,
            running: true,
        };
        context.apply_output_preferences();
        tracing::debug!(mode = ?mode, "shell context ready");
        Ok(context)
    }

    pub(crate) fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            screen_reader_mode: self.config.screen_reader_mode,
            high_contrast_mode: self.config.high_contrast_mode,
        });
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        match &self.active {
            Some(active) => format!(
                "college-forms [{} {}/{}]> ",
                active.flow.name(),
                active.handle.current_step() + 1,
                active.handle.total_steps()
            ),
            None => "college-forms> ".to_string(),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let raw = &tokens[0];
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        Ok(self.confirm("Exit shell?")?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match &err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::NoActiveWizard => {
                cli_io::print_error(&err);
                cli_io::print_hint("Try `profile` to build your student profile.");
            }
            CommandError::AdminLoginRequired => {
                cli_io::print_error(&err);
                cli_io::print_hint("Use `login admin <password>` first.");
            }
            other => cli_io::print_error(other),
        }
        Ok(())
    }

    pub(crate) fn wizard(&self) -> Result<&dyn WizardHandle, CommandError> {
        self.active
            .as_ref()
            .map(|active| active.handle.as_ref())
            .ok_or(CommandError::NoActiveWizard)
    }

    pub(crate) fn wizard_mut(&mut self) -> Result<&mut dyn WizardHandle, CommandError> {
        match self.active.as_mut() {
            Some(active) => Ok(active.handle.as_mut()),
            None => Err(CommandError::NoActiveWizard),
        }
    }

    pub(crate) fn options_for(&self, flow: Flow) -> WizardOptions {
        let allow_direct_step_jump = match flow {
            Flow::StudentProfile => self.config.profile_allow_direct_step_jump,
            Flow::Predictor => predictor::default_options().allow_direct_step_jump,
            Flow::CollegeAdd => self.config.admin_allow_direct_step_jump,
        };
        WizardOptions {
            allow_direct_step_jump,
        }
    }

    fn build_wizard(&self, flow: Flow) -> Box<dyn WizardHandle> {
        let options = self.options_for(flow);
        match flow {
            Flow::StudentProfile => Box::new(BoundWizard::new(
                student_profile::wizard(options),
                Box::new(ConsoleSink::stdout(student_profile::SUBMIT_NOTICE)),
            )),
            Flow::Predictor => Box::new(BoundWizard::new(
                predictor::wizard(options),
                Box::new(PredictionSink::stdout()),
            )),
            Flow::CollegeAdd => Box::new(BoundWizard::new(
                college_add::wizard(options),
                Box::new(CsvExportSink::new(
                    self.config_manager.export_dir(&self.config),
                )),
            )),
        }
    }

    /// Starts `flow`, replacing any unfinished wizard after confirmation.
    pub(crate) fn start_flow(&mut self, flow: Flow) -> CommandResult {
        if flow.requires_admin() && !self.session.is_logged_in() {
            return Err(CommandError::AdminLoginRequired);
        }
        if let Some(active) = &self.active {
            let unfinished = active.handle.status() != SubmissionStatus::Submitted;
            if unfinished {
                let prompt = format!("Discard the unfinished {} wizard?", active.flow.title());
                if !self.confirm(&prompt)? {
                    return Ok(());
                }
                cli_io::print_warning(format!(
                    "Discarded unfinished `{}` wizard.",
                    active.flow.name()
                ));
            }
        }
        self.active = Some(ActiveWizard {
            flow,
            handle: self.build_wizard(flow),
        });
        tracing::info!(wizard = flow.name(), "wizard started");
        output::section(flow.title());
        self.print_step()
    }

    /// Drops the running wizard if it is only reachable as admin.
    pub(crate) fn close_admin_flows(&mut self) {
        if let Some(flow) = self.active_flow().filter(|flow| flow.requires_admin()) {
            self.active = None;
            cli_io::print_warning(format!("Closed the `{}` wizard.", flow.name()));
        }
    }

    pub(crate) fn print_step(&self) -> CommandResult {
        let handle = self.wizard()?;
        let navigator = handle.navigator();
        let prefs = output::preferences();
        if prefs.screen_reader_mode || self.mode == CliMode::Script {
            output::line(navigator.render());
        } else {
            output::line(navigator.render_styled());
        }
        output::line(navigator.header());
        for line in handle.render_current() {
            output::line(format!("  {}", line));
        }
        for message in handle.current_errors() {
            cli_io::print_error(message);
        }
        Ok(())
    }

    /// Error banner for a failed step gate; interactive sessions jump back to
    /// the top of the screen so the banner is visible.
    pub(crate) fn report_blocked(&self, errors: &[String]) -> CommandResult {
        if self.mode == CliMode::Interactive {
            let mut stdout = io::stdout();
            execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
            stdout.flush()?;
            self.print_step()?;
        } else {
            for message in errors {
                cli_io::print_error(message);
            }
        }
        cli_io::print_error("Please fix the errors above before continuing.");
        Ok(())
    }

    pub(crate) fn report_step_change(&self, change: StepChange) -> CommandResult {
        match change {
            StepChange::Moved { .. } => self.print_step(),
            StepChange::Blocked { errors, .. } => self.report_blocked(&errors),
            StepChange::Unchanged => {
                cli_io::print_info("No step change.");
                Ok(())
            }
            StepChange::JumpDisabled => {
                cli_io::print_warning("Direct step navigation is disabled for this wizard.");
                Ok(())
            }
            StepChange::OutOfRange(step) => Err(CommandError::InvalidArguments(format!(
                "Step {} does not exist.",
                step + 1
            ))),
        }
    }

    pub(crate) fn report_submit(&self, outcome: SubmitOutcome) -> CommandResult {
        match outcome {
            SubmitOutcome::Submitted => {
                let flow = self.active_flow().map(Flow::title).unwrap_or("Wizard");
                cli_io::print_success(format!("{} submitted.", flow));
                if let Some(receipt) = self.wizard()?.receipt() {
                    cli_io::print_info(receipt);
                }
            }
            SubmitOutcome::Blocked { errors, .. } => self.report_blocked(&errors)?,
            SubmitOutcome::NotFinalStep => {
                let handle = self.wizard()?;
                cli_io::print_warning(format!(
                    "Submit is only available on the final step (you are on step {} of {}).",
                    handle.current_step() + 1,
                    handle.total_steps()
                ));
            }
            SubmitOutcome::AlreadySubmitted => {
                cli_io::print_info("Already submitted. Use `reset` to start over.");
            }
            SubmitOutcome::Failed(message) => {
                cli_io::print_error(format!("Submission failed: {}", message));
                cli_io::print_hint("Run `submit` again to retry.");
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error("No wizard is running. Start one with `profile`, `predictor` or `college-add`.")]
    NoActiveWizard,
    #[error("Admin login required.")]
    AdminLoginRequired,
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] FormsError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failures that end the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] FormsError),
    #[error("Input error: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Input(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

/// Runs `lines` through a script-mode shell rooted at `config_manager`.
#[cfg(test)]
pub(crate) fn process_script(
    config_manager: ConfigManager,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_manager(CliMode::Script, config_manager)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn run(dir: &TempDir, lines: &[&str]) -> ShellContext {
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        process_script(manager, lines).unwrap()
    }

    #[test]
    fn exit_stops_processing() {
        let dir = TempDir::new().unwrap();
        let app = run(&dir, &["exit", "profile"]);
        assert!(!app.running);
        assert!(app.active.is_none());
    }

    #[test]
    fn profile_wizard_advances_through_commands() {
        let dir = TempDir::new().unwrap();
        let app = run(
            &dir,
            &[
                "profile",
                "set full_name Asha Rao",
                "set mobile_number 9876543210",
                "set city_you_live_in Pune",
                "next",
            ],
        );
        let handle = app.wizard().unwrap();
        assert_eq!(handle.current_step(), 1);
        assert_eq!(app.prompt(), "college-forms [student-profile 2/4]> ");
    }

    #[test]
    fn college_add_requires_login() {
        let dir = TempDir::new().unwrap();
        let app = run(&dir, &["college-add"]);
        assert!(app.active.is_none());

        let app = run(&dir, &["login admin admin123", "college-add"]);
        assert_eq!(app.active_flow(), Some(Flow::CollegeAdd));
    }

    #[test]
    fn logout_closes_admin_wizard() {
        let dir = TempDir::new().unwrap();
        let app = run(&dir, &["login admin admin123", "college-add", "logout"]);
        assert!(app.active.is_none());
        assert!(!app.session.is_logged_in());
    }

    #[test]
    fn admin_jump_follows_config() {
        let dir = TempDir::new().unwrap();
        let app = run(&dir, &["config set admin_allow_direct_step_jump true"]);
        assert!(app.options_for(Flow::CollegeAdd).allow_direct_step_jump);
        let reloaded = ConfigManager::with_base_dir(dir.path().to_path_buf())
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(
            reloaded,
            Config {
                admin_allow_direct_step_jump: true,
                ..Config::default()
            }
        );
    }
}
