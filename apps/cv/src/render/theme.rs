//! Light/dark theme state for one page session.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Reads a `prefers-color-scheme` style value; anything but `dark` is light.
    pub fn from_system_preference(preference: Option<&str>) -> Self {
        match preference.and_then(Theme::parse) {
            Some(Theme::Dark) => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

/// Anything that carries a document-level theme attribute.
pub trait Themed {
    fn set_theme(&mut self, theme: Theme);
}

/// Explicit theme context owned by the rendering surface.
///
/// Seeded once from the system preference; changed only by `toggle`.
/// Every change is pushed to the document through `apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeContext {
    theme: Theme,
}

impl ThemeContext {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn from_system_preference(preference: Option<&str>) -> Self {
        Self::new(Theme::from_system_preference(preference))
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// The single boundary where the theme reaches the document. Idempotent.
    pub fn apply<D: Themed + ?Sized>(&self, document: &mut D) {
        document.set_theme(self.theme);
    }
}
