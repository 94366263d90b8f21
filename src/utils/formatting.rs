//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Keep only the last digit visible.
pub fn mask_pin(pin: &str) -> String {
    let n = pin.chars().count();
    if n <= 1 {
        return "*".repeat(n);
    }
    let last: String = pin.chars().skip(n - 1).collect();
    format!("{}{}", "*".repeat(n - 1), last)
}

/// Text bar proportional to `percentage` (0..=100).
pub fn bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(width - filled))
}
