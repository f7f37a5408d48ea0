//! Non-interactive UI for CI/headless environments.
//!
//! Confirmations are answered with their default; no terminal
//! capabilities are assumed. This is the UI the bootstrap uses when
//! running under CI or when `--non-interactive` is passed.

use crate::error::Result;

use super::{Confirm, OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn confirm(&mut self, prompt: &Confirm) -> Result<bool> {
        // No operator present: take the default.
        Ok(prompt.default)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_status() {
            println!("… {}", message);
        }
        Box::new(LogSpinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints line-oriented status.
struct LogSpinner;

impl SpinnerHandle for LogSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_returns_default_true() {
        let mut ui = NonInteractiveUI::new(OutputMode::Quiet);
        let prompt = Confirm {
            key: "install_uv".to_string(),
            question: "Install uv now?".to_string(),
            default: true,
        };
        assert!(ui.confirm(&prompt).unwrap());
    }

    #[test]
    fn confirm_returns_default_false() {
        let mut ui = NonInteractiveUI::new(OutputMode::Quiet);
        let prompt = Confirm {
            key: "install_uv".to_string(),
            question: "Install uv now?".to_string(),
            default: false,
        };
        assert!(!ui.confirm(&prompt).unwrap());
    }

    #[test]
    fn never_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }
}
