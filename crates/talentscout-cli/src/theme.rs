use ratatui::style::Color;

/// Colours for the hiring-assistant screen.
///
/// `candidate` and `scout` colour the two sides of the interview; failed replies
/// (`"Error: ..."`) use `error_reply` so they never read as a normal answer.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub text: Color,
    pub heading: Color,
    pub muted: Color,
    pub frame: Color,
    pub candidate: Color,
    pub scout: Color,
    pub error_reply: Color,
    pub notice: Color,
    pub sidebar_frame: Color,
    pub sidebar_key: Color,
    pub command: Color,
}

pub const THEME_NAMES: &[&str] = &["scout", "paper", "contrast"];

impl Theme {
    /// Same blue / green / red split as the browser page.
    pub fn scout() -> Self {
        Self {
            name: "scout",
            text: Color::Rgb(226, 228, 233),
            heading: Color::Rgb(31, 119, 180),
            muted: Color::Rgb(128, 132, 142),
            frame: Color::Rgb(58, 62, 72),
            candidate: Color::Rgb(86, 156, 214),
            scout: Color::Rgb(44, 160, 44),
            error_reply: Color::Rgb(214, 39, 40),
            notice: Color::Rgb(255, 187, 120),
            sidebar_frame: Color::Rgb(31, 119, 180),
            sidebar_key: Color::Rgb(255, 127, 14),
            command: Color::Rgb(148, 103, 189),
        }
    }

    /// For light terminal backgrounds.
    pub fn paper() -> Self {
        Self {
            name: "paper",
            text: Color::Rgb(34, 34, 34),
            heading: Color::Rgb(20, 70, 140),
            muted: Color::Rgb(120, 120, 120),
            frame: Color::Rgb(200, 204, 212),
            candidate: Color::Rgb(20, 90, 170),
            scout: Color::Rgb(20, 120, 40),
            error_reply: Color::Rgb(180, 20, 30),
            notice: Color::Rgb(150, 90, 0),
            sidebar_frame: Color::Rgb(160, 170, 190),
            sidebar_key: Color::Rgb(20, 70, 140),
            command: Color::Rgb(110, 50, 150),
        }
    }

    /// Named ANSI colours only, for terminals without truecolor.
    pub fn contrast() -> Self {
        Self {
            name: "contrast",
            text: Color::White,
            heading: Color::LightCyan,
            muted: Color::Gray,
            frame: Color::White,
            candidate: Color::LightBlue,
            scout: Color::LightGreen,
            error_reply: Color::LightRed,
            notice: Color::LightYellow,
            sidebar_frame: Color::LightCyan,
            sidebar_key: Color::LightMagenta,
            command: Color::LightMagenta,
        }
    }

    /// Unknown names fall back to `scout`.
    pub fn by_name(name: &str) -> Self {
        match name {
            "paper" => Self::paper(),
            "contrast" => Self::contrast(),
            _ => Self::scout(),
        }
    }

    pub fn exists(name: &str) -> bool {
        THEME_NAMES.contains(&name)
    }

    pub fn all_names() -> &'static [&'static str] {
        THEME_NAMES
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::scout()
    }
}
