/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// OK → green, NOT_OK → red, missing → grey.
pub fn colorize_status(value: &str) -> String {
    match value {
        "OK" => format!("{GREEN}{value}{RESET}"),
        "NOT_OK" => format!("{RED}{value}{RESET}"),
        "" => format!("{GREY}--{RESET}"),
        other => other.to_string(),
    }
}

/// Completion colour: 100 green, ≥50 yellow, otherwise red.
pub fn color_for_percentage(value: f64) -> &'static str {
    if value >= 100.0 {
        GREEN
    } else if value >= 50.0 {
        YELLOW
    } else {
        RED
    }
}

/// Grey out empty values and placeholders.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
