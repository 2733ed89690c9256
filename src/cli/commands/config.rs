//! Config command implementation.
//!
//! The `pyverify config` command validates where the runtime's libraries
//! live, how it was linked and which OpenSSL it was built against.

use crate::checks::build_config::{self, ConfigRequest, Profile};
use crate::cli::args::ConfigArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::runtime::Runtime;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::show_report;

/// The config command implementation.
pub struct ConfigCommand<'a> {
    runtime: &'a dyn Runtime,
    settings: &'a Settings,
    args: ConfigArgs,
}

impl<'a> ConfigCommand<'a> {
    pub fn new(runtime: &'a dyn Runtime, settings: &'a Settings, args: ConfigArgs) -> Self {
        Self {
            runtime,
            settings,
            args,
        }
    }

    /// Merge flags, environment and settings into a request.
    ///
    /// The tools directory comes from `--tools-directory` (or its
    /// environment variable), then the settings file.
    pub fn request(&self) -> ConfigRequest {
        let profile = self
            .args
            .profile
            .unwrap_or_else(|| Profile::implied(self.args.native_version.is_some()));

        ConfigRequest {
            version: self.args.version.clone(),
            native_version: self.args.native_version.clone(),
            profile,
            tools_directory: self
                .args
                .tools_directory
                .clone()
                .or_else(|| self.settings.config.tools_directory.clone()),
            os: self.args.os.clone(),
        }
    }
}

impl Command for ConfigCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let request = self.request();
        tracing::debug!("Validating build config with {:?}", request);
        let report = build_config::check(self.runtime, &request)?;
        Ok(show_report(ui, &report, "Runtime build configuration is valid"))
    }
}
