use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    flows::Flow,
    session::AdminSession,
    wizard::WizardHandle,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// The wizard currently driven by the shell.
pub struct ActiveWizard {
    pub flow: Flow,
    pub handle: Box<dyn WizardHandle>,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub session: AdminSession,
    pub active: Option<ActiveWizard>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn active_flow(&self) -> Option<Flow> {
        self.active.as_ref().map(|active| active.flow)
    }

    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, wizard: {:?}, admin: {} }}",
            self.running,
            self.last_command,
            self.active_flow().map(Flow::name),
            self.session.is_logged_in()
        )
    }
}
