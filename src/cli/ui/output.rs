use console::style;

use crate::types::InferenceError;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    /// Printed to stderr
    pub fn warning(&self, message: &str) {
        eprintln!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// `  label  value` row with a dimmed label column
    pub fn field(&self, label: &str, value: &str) {
        println!("  {:<14} {}", style(label).dim(), value);
    }

    pub fn caption(&self, message: &str) {
        println!("{}", style(message).dim().italic());
    }

    /// Classified inference failure on stderr
    pub fn failure(&self, err: &InferenceError) {
        eprintln!(
            "{} {} {}",
            style("✗").red(),
            style(err.kind).red().bold(),
            err.message
        );
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
