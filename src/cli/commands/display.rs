//! Shared rendering of check reports.

use crate::checks::{CheckReport, Severity};
use crate::ui::UserInterface;

use super::dispatcher::CommandResult;

/// Print every finding of `report`, then the overall verdict.
///
/// `passed` is shown only when the report has no failure.
pub fn show_report(
    ui: &mut dyn UserInterface,
    report: &CheckReport,
    passed: &str,
) -> CommandResult {
    ui.show_header(report.check);
    let show_info = ui.output_mode().shows_info();

    for finding in &report.findings {
        match finding.severity {
            Severity::Info if show_info => {
                ui.message(&finding.message);
                for detail in &finding.details {
                    ui.detail(detail);
                }
            }
            Severity::Info => {}
            Severity::Warning => {
                ui.warning(&finding.message);
                for detail in &finding.details {
                    ui.error_detail(detail);
                }
            }
            Severity::Failure => {
                ui.error(&finding.message);
                for detail in &finding.details {
                    ui.error_detail(detail);
                }
            }
        }
    }

    if report.passed() {
        ui.success(passed);
        CommandResult::success()
    } else {
        CommandResult::failure(1)
    }
}
