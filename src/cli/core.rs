//! Shell context, dispatch and CLI error types.

use std::io;

use chrono::{Local, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    core::{
        services::{BudgetSource, ServiceError},
        Tracker,
    },
    domain::row::parse_date,
    errors::LedgerError,
    receipt::ReceiptSuggestion,
    storage::JsonSheet,
};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failures that end the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    Command(String),
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Input(err.to_string())
    }
}

/// Failures of a single command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Ledger(err) => CommandError::Core(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

/// State shared by every command for the lifetime of the shell.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub tracker: Tracker,
    /// Receipt suggestion waiting for `accept`.
    pub pending: Option<ReceiptSuggestion>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let sheet = JsonSheet::with_settings_cell(
            config_manager.sheet_path(&config),
            &config.settings_sheet,
            &config.budget_cell,
        );
        tracing::debug!(
            sheet = %sheet.path().display(),
            budget_cell = sheet.budget_cell(),
            "opening expense sheet"
        );
        let tracker = Tracker::new(Box::new(sheet), &config);
        Ok(Self::with_parts(mode, config_manager, config, tracker))
    }

    pub(crate) fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        tracker: Tracker,
    ) -> Self {
        output::set_plain(!config.ui_color_enabled);
        let context = Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            tracker,
            pending: None,
            running: true,
        };
        context.report_budget_source();
        context
    }

    pub(crate) fn prompt(&self) -> String {
        if self.pending.is_some() {
            "yen (receipt pending)> ".into()
        } else {
            "yen> ".into()
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// `today` or any accepted date spelling.
    pub(crate) fn parse_date_arg(&self, raw: &str) -> Result<NaiveDate, CommandError> {
        if raw.eq_ignore_ascii_case("today") {
            return Ok(self.today());
        }
        parse_date(raw).ok_or_else(|| {
            CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", raw))
        })
    }

    pub(crate) fn report_budget_source(&self) {
        match &self.tracker.budget().source {
            BudgetSource::Stored => {}
            BudgetSource::DefaultConfigMissing(reason) => output::warning(format!(
                "Budget setting unusable ({}); using the default.",
                reason
            )),
            BudgetSource::DefaultStoreUnavailable(reason) => output::warning(format!(
                "Budget setting unreachable ({}); using the default.",
                reason
            )),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let handler = self.registry.get(command).map(|definition| definition.handler);
        if let Some(handler) = handler {
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

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        match self.mode {
            CliMode::Script => Ok(true),
            CliMode::Interactive => Confirm::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(true)
                .interact()
                .map_err(CommandError::from),
        }
    }

    /// Prints a command failure. Only configuration failures end the shell.
    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(LedgerError::StoreUnavailable(inner)) => {
                output::error(format!("Expense sheet unavailable: {}", inner));
                output::info("Nothing was saved. Check the sheet and try again.");
                Ok(())
            }
            CommandError::Core(LedgerError::Parse(inner)) => {
                output::error(format!("Could not read receipt ({}).", inner));
                output::info("Retry the scan or enter the expense with `add`.");
                Ok(())
            }
            CommandError::Core(inner) if !inner.is_recoverable() => {
                tracing::error!(error = %inner, "unrecoverable failure");
                Err(CliError::Core(inner))
            }
            other => {
                output::error(other.to_string());
                Ok(())
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some(first) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&first.to_lowercase(), first, &args)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::MemorySheet;
    use tempfile::TempDir;

    pub(crate) fn script_context(temp: &TempDir) -> ShellContext {
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            ui_color_enabled: false,
            ..Config::default()
        };
        let tracker = Tracker::new(Box::new(MemorySheet::new()), &config);
        ShellContext::with_parts(CliMode::Script, manager, config, tracker)
    }

    #[test]
    fn exit_stops_the_loop() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(&temp);
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
        assert_eq!(context.process_line("").unwrap(), LoopControl::Continue);
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(&temp);
        assert_eq!(context.process_line("sumary").unwrap(), LoopControl::Continue);
    }

    #[test]
    fn only_config_failures_end_the_shell() {
        let temp = TempDir::new().unwrap();
        let context = script_context(&temp);
        let err = CommandError::Core(LedgerError::StoreUnavailable(
            crate::errors::StoreError::Unavailable("offline".into()),
        ));
        assert!(context.report_error(err).is_ok());
        let err = CommandError::InvalidArguments("missing amount".into());
        assert!(context.report_error(err).is_ok());
        let err = CommandError::Core(LedgerError::Config("unreadable".into()));
        assert!(context.report_error(err).is_err());
    }

    #[test]
    fn dates_accept_today_keyword() {
        let temp = TempDir::new().unwrap();
        let context = script_context(&temp);
        assert_eq!(context.parse_date_arg("today").unwrap(), context.today());
        assert_eq!(
            context.parse_date_arg("2024/05/03").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()
        );
        assert!(context.parse_date_arg("someday").is_err());
    }
}
