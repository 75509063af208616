use colored::*;
use std::fmt::Display;

/// Terminal output helpers. This is the CLI's "status message area": every
/// flow reports its outcome through one of these instead of printing directly.
/// Never instantiated—just a namespace.
/// Brand colors: blue (0, 87, 183) and yellow (255, 215, 0).
pub struct Logger;

impl Logger {
    /// General information with a blue bullet.
    pub fn info<T: Display>(msg: T) {
        println!("{} {}", "•".truecolor(0, 87, 183).bold(), msg);
    }

    /// Green checkmark. The flow finished and the user got what they wanted.
    pub fn success<T: Display>(msg: T) {
        println!("{} {}", "✔".green().bold(), msg);
    }

    /// Red X. Something failed, but nothing here is fatal—the user can
    /// always rerun the command.
    pub fn error<T: Display>(msg: T) {
        println!("{} {}", "✖".red().bold(), msg);
    }

    /// Yellow warning symbol. Use sparingly.
    pub fn warn<T: Display>(msg: T) {
        println!("{} {}", "⚠".yellow().bold(), msg);
    }

    /// Returns the string in brand yellow, for highlighting names and emails
    /// inside formatted messages.
    pub fn highlight<T: Display>(msg: T) -> String {
        msg.to_string().truecolor(255, 215, 0).bold().to_string()
    }

    /// Dimmed secondary text.
    pub fn dim<T: Display>(msg: T) -> String {
        msg.to_string().dimmed().to_string()
    }
}
