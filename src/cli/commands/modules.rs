//! Modules command implementation.
//!
//! The `pyverify modules` command imports every standard-library module the
//! runtime should ship.

use crate::checks::stdlib;
use crate::cli::args::ModulesArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::runtime::{Runtime, RuntimeVersion};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::show_report;

/// The modules command implementation.
pub struct ModulesCommand<'a> {
    runtime: &'a dyn Runtime,
    settings: &'a Settings,
    args: ModulesArgs,
}

impl<'a> ModulesCommand<'a> {
    pub fn new(runtime: &'a dyn Runtime, settings: &'a Settings, args: ModulesArgs) -> Self {
        Self {
            runtime,
            settings,
            args,
        }
    }
}

impl Command for ModulesCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let requested = self
            .args
            .version
            .as_deref()
            .map(RuntimeVersion::parse)
            .transpose()?;

        let report = stdlib::check(
            self.runtime,
            requested.as_ref(),
            &self.settings.modules.exclude,
        )?;
        Ok(show_report(ui, &report, "All expected modules imported"))
    }
}
