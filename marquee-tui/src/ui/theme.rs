use ratatui::style::Color;

pub struct ThemeColors {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_dim: Color,
    pub background: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub highlight_bg: Color,
}

/// Marquee palette: warm gold on a dark auditorium background, red for the
/// occupied/error states. One fixed theme.
pub fn theme() -> ThemeColors {
    ThemeColors {
        primary: Color::Rgb(255, 200, 60),      // Marquee gold
        secondary: Color::Rgb(200, 150, 40),    // Dimmer gold
        accent: Color::Rgb(255, 120, 120),      // Soft red
        text: Color::Rgb(220, 215, 200),        // Warm off-white
        text_dim: Color::Rgb(130, 125, 110),    // Faded text
        background: Color::Rgb(18, 16, 20),     // Near-black purple
        border: Color::Rgb(90, 80, 50),         // Dark brass
        success: Color::Rgb(120, 220, 130),     // Green
        warning: Color::Rgb(255, 210, 90),      // Amber
        error: Color::Rgb(235, 80, 70),         // Red
        highlight_bg: Color::Rgb(55, 45, 25),   // Dark gold wash
    }
}
