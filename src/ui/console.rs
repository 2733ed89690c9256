//! Console UI used by the binary.

use super::theme::VerifyTheme;
use super::{OutputMode, UserInterface};

/// Prints check results to stdout, problems to stderr.
pub struct ConsoleUI {
    mode: OutputMode,
    theme: VerifyTheme,
}

impl ConsoleUI {
    /// Create a console UI.
    ///
    /// Colors are used only when `colors` is true.
    pub fn new(mode: OutputMode, colors: bool) -> Self {
        let theme = if colors {
            VerifyTheme::new()
        } else {
            VerifyTheme::plain()
        };
        Self { mode, theme }
    }
}

impl UserInterface for ConsoleUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn detail(&mut self, msg: &str) {
        println!("{}", self.theme.format_detail(msg));
    }

    fn error_detail(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_detail(msg));
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_headers() {
            println!("{}", self.theme.format_header(title));
        }
    }
}
