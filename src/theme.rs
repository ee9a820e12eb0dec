//! Light/dark preference.
//!
//! The preference lives in a browser cookie so it survives reloads. It is
//! purely cosmetic and never touches chat state.

use std::str::FromStr;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Cookie holding the chosen theme.
pub const THEME_COOKIE: &str = "theme";

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    /// No explicit choice; follow the browser's `prefers-color-scheme`.
    #[default]
    System,
}

impl Theme {
    /// Read the preference from request cookies.
    #[must_use]
    pub fn from_cookies(jar: &CookieJar) -> Self {
        jar.get(THEME_COOKIE)
            .and_then(|c| c.value().parse().ok())
            .unwrap_or_default()
    }

    /// Theme chosen by the toggle switch.
    #[must_use]
    pub fn from_toggle(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Class put on `<html>`; `System` leaves it to the client.
    #[must_use]
    pub fn html_class(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light | Self::System => "",
        }
    }

    /// Build the cookie persisting this preference.
    #[must_use]
    pub fn cookie(self) -> Cookie<'static> {
        Cookie::build((THEME_COOKIE, self.as_str()))
            .path("/")
            .same_site(SameSite::Lax)
            .permanent()
            .build()
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}
