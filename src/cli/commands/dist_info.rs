//! Dist-info command implementation.
//!
//! The `pyverify dist-info` command looks for packages installed twice into
//! the same site-packages.

use std::path::PathBuf;

use crate::checks::dist_info;
use crate::cli::args::DistInfoArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::runtime::Runtime;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::show_report;

/// The dist-info command implementation.
pub struct DistInfoCommand<'a> {
    runtime: &'a dyn Runtime,
    settings: &'a Settings,
    args: DistInfoArgs,
}

impl<'a> DistInfoCommand<'a> {
    pub fn new(runtime: &'a dyn Runtime, settings: &'a Settings, args: DistInfoArgs) -> Self {
        Self {
            runtime,
            settings,
            args,
        }
    }

    /// Roots from flags, then settings, then the interpreter.
    fn roots(&self) -> Result<Vec<PathBuf>> {
        if !self.args.roots.is_empty() {
            return Ok(self.args.roots.clone());
        }
        if !self.settings.dist_info.roots.is_empty() {
            return Ok(self.settings.dist_info.roots.clone());
        }

        let facts = self.runtime.facts()?;
        Ok(facts.site_roots().into_iter().map(PathBuf::from).collect())
    }
}

impl Command for DistInfoCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let roots = self.roots()?;
        let report = dist_info::check(&roots)?;
        Ok(show_report(ui, &report, "No duplicate dist-info found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::StaticRuntime;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn uses_interpreter_site_roots_by_default() {
        let temp = TempDir::new().unwrap();
        let site = temp.path().join("site-packages");
        fs::create_dir_all(site.join("six-1.16.0.dist-info")).unwrap();
        fs::create_dir_all(site.join("six-1.15.0.dist-info")).unwrap();
        let site = site.to_string_lossy().to_string();

        let runtime = StaticRuntime::linux("3.12.1").with_site_roots(&site, &site);
        let settings = Settings::default();
        let cmd = DistInfoCommand::new(&runtime, &settings, DistInfoArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.errors().len(), 1);
        assert!(ui.errors()[0].starts_with("multiple dist-info found for six: ["));
    }

    #[test]
    fn flag_roots_win_over_settings() {
        let flagged = TempDir::new().unwrap();
        let configured = TempDir::new().unwrap();
        fs::create_dir_all(configured.path().join("a-1.dist-info")).unwrap();
        fs::create_dir_all(configured.path().join("a-2.dist-info")).unwrap();

        let runtime = StaticRuntime::linux("3.12.1");
        let mut settings = Settings::default();
        settings.dist_info.roots = vec![configured.path().to_path_buf()];
        let args = DistInfoArgs {
            roots: vec![flagged.path().to_path_buf()],
        };
        let mut ui = MockUI::new();

        let result = DistInfoCommand::new(&runtime, &settings, args)
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_success("No duplicate dist-info found"));
    }

    #[test]
    fn settings_roots_used_without_flags() {
        let configured = TempDir::new().unwrap();
        fs::create_dir_all(configured.path().join("a-1.dist-info")).unwrap();
        fs::create_dir_all(configured.path().join("a-2.dist-info")).unwrap();

        let runtime = StaticRuntime::linux("3.12.1");
        let mut settings = Settings::default();
        settings.dist_info.roots = vec![configured.path().to_path_buf()];
        let mut ui = MockUI::new();

        let result = DistInfoCommand::new(&runtime, &settings, DistInfoArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(!result.success);
    }
}
