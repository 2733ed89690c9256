//! Sqlite command implementation.

use crate::checks::sqlite;
use crate::cli::args::SqliteArgs;
use crate::error::Result;
use crate::runtime::{DatabaseTarget, Runtime};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::show_report;

/// The sqlite command implementation.
pub struct SqliteCommand<'a> {
    runtime: &'a dyn Runtime,
    args: SqliteArgs,
}

impl<'a> SqliteCommand<'a> {
    pub fn new(runtime: &'a dyn Runtime, args: SqliteArgs) -> Self {
        Self { runtime, args }
    }

    fn target(&self) -> DatabaseTarget {
        match &self.args.database {
            Some(path) => DatabaseTarget::File(path.clone()),
            None => DatabaseTarget::InMemory,
        }
    }
}

impl Command for SqliteCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = sqlite::check(self.runtime, &self.target(), self.args.enable_extensions)?;
        Ok(show_report(ui, &report, "sqlite3 driver works"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{SqliteReport, StaticRuntime};
    use crate::ui::MockUI;
    use std::path::PathBuf;

    #[test]
    fn defaults_to_in_memory() {
        let runtime = StaticRuntime::linux("3.12.1");
        let mut ui = MockUI::new();

        let result = SqliteCommand::new(&runtime, SqliteArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(runtime.connections(), vec![(DatabaseTarget::InMemory, false)]);
        assert!(ui
            .messages()
            .contains(&"SQLite library version: 3.45.1".to_string()));
    }

    #[test]
    fn database_flag_selects_file() {
        let runtime = StaticRuntime::linux("3.12.1");
        let args = SqliteArgs {
            database: Some(PathBuf::from("/tmp/smoke.db")),
            enable_extensions: true,
        };
        let mut ui = MockUI::new();

        SqliteCommand::new(&runtime, args).execute(&mut ui).unwrap();

        assert_eq!(
            runtime.connections(),
            vec![(DatabaseTarget::File(PathBuf::from("/tmp/smoke.db")), true)]
        );
    }

    #[test]
    fn connect_error_is_printed_and_fails() {
        let runtime = StaticRuntime::linux("3.12.1").with_sqlite(SqliteReport {
            error: Some("unable to open database file".to_string()),
            released: true,
            ..Default::default()
        });
        let mut ui = MockUI::new();

        let result = SqliteCommand::new(&runtime, SqliteArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("unable to open database file"));
    }
}
