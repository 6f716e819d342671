//! Command handlers -- one module per subcommand

pub mod bom;
pub mod config;
pub mod explain;
pub mod identify;

use colored::{ColoredString, Colorize};

/// Paint text with a risk level display color (`red`, `orange`, `yellow`, `green`, `gray`).
pub(crate) fn paint(text: &str, color: &str) -> ColoredString {
    match color {
        "red" => text.red(),
        "orange" => text.truecolor(255, 165, 0),
        "yellow" => text.yellow(),
        "green" => text.green(),
        "gray" => text.bright_black(),
        _ => text.normal(),
    }
}
