use ratatui::{
    style::Style,
    text::{Line, Span},
};

use super::theme::ThemeColors;

/// Format a showtime start for display
pub fn format_timestamp(timestamp: &chrono::DateTime<chrono::Utc>) -> String {
    timestamp.format("%a %d %b %H:%M").to_string()
}

/// Format a server-side price (decimal units) for display
pub fn format_price(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Format a running time in minutes as "2h 05m"
pub fn format_duration(minutes: i32) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

/// Wrap a block of text into styled lines
pub fn wrap_text(content: &str, max_width: usize, theme: &ThemeColors) -> Vec<Line<'static>> {
    let mut lines = vec![];

    for line in content.lines() {
        let wrapped = textwrap::wrap(line, max_width.max(1));
        for wrapped_line in wrapped {
            lines.push(Line::from(Span::styled(
                wrapped_line.to_string(),
                Style::default().fg(theme.text),
            )));
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(""));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(116), "1h 56m");
        assert_eq!(format_duration(60), "1h 00m");
        assert_eq!(format_duration(45), "0h 45m");
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(20.0), "20.00");
        assert_eq!(format_price(10.5), "10.50");
    }
}
