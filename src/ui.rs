//! Styled terminal output helpers.

use console::style;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_debug(enabled: bool, message: &str) {
    if enabled {
        println!("{} {}", style("DEBUG:").dim(), message);
    }
}

/// Print one run output as `KEY: value`, key emphasized.
pub fn display_output(key: &str, value: &str) {
    println!("{} {}", style(format!("{}:", key)).bold(), value);
}
