//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::config::{SettingValue, SiteConfig, GENERATOR_NAMES};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Build a table of settings with their generator names
pub fn settings_table(config: &SiteConfig) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Option").fg(Color::Cyan),
            Cell::new("Generator").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    let settings = config.settings();
    for (option, generator) in GENERATOR_NAMES {
        let (value, color) = match settings.get(option) {
            Some(SettingValue::Flag(true)) => ("true".to_string(), Color::Green),
            Some(SettingValue::Flag(false)) => ("false".to_string(), Color::Red),
            Some(value) => (value.to_string(), Color::Reset),
            None => ("-".to_string(), Color::DarkGrey),
        };

        table.add_row(vec![
            Cell::new(option),
            Cell::new(generator),
            Cell::new(value).fg(color),
        ]);
    }

    table
}

/// Print a table of settings
pub fn print_settings_table(config: &SiteConfig) {
    println!("{}", settings_table(config));
}
