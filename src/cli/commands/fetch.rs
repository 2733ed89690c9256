//! Fetch command implementation.
//!
//! The `pyverify fetch` command downloads a byte-stable file and checks that
//! it arrived intact.

use crate::checks::fetch::{self, FetchExpectation, FetchVia, HttpFetcher, InterpreterFetcher};
use crate::cli::args::FetchArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::runtime::Runtime;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::show_report;

/// The fetch command implementation.
pub struct FetchCommand<'a> {
    runtime: &'a dyn Runtime,
    settings: &'a Settings,
    args: FetchArgs,
}

impl<'a> FetchCommand<'a> {
    pub fn new(runtime: &'a dyn Runtime, settings: &'a Settings, args: FetchArgs) -> Self {
        Self {
            runtime,
            settings,
            args,
        }
    }

    /// Flags win over settings, settings over the pinned defaults.
    pub fn expectation(&self) -> FetchExpectation {
        let defaults = FetchExpectation::default();
        let configured = &self.settings.fetch;

        FetchExpectation {
            url: self
                .args
                .url
                .clone()
                .or_else(|| configured.url.clone())
                .unwrap_or(defaults.url),
            length: self
                .args
                .expected_length
                .or(configured.expected_length)
                .unwrap_or(defaults.length),
            sha256: configured.expected_sha256.clone(),
        }
    }
}

impl Command for FetchCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let expected = self.expectation();
        let report = match self.args.via {
            FetchVia::Interpreter => {
                fetch::check(&InterpreterFetcher::new(self.runtime), &expected)?
            }
            FetchVia::Native => fetch::check(&HttpFetcher::new()?, &expected)?,
        };
        Ok(show_report(ui, &report, "Fetched content is intact"))
    }
}
