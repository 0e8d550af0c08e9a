#![forbid(unsafe_code)]

//! Translation capability.
//!
//! String resolution lives in the host; the widget only asks for the handful
//! of keys it surfaces itself (welcome text, connectivity tooltips) and
//! re-asks when the language changes. [`EnglishStrings`] is the fallback
//! used when no host translator is wired up.

/// Resolve a translation key for a language.
pub trait Translator {
    /// Returns the translated string, or `None` when the key is unknown so
    /// the caller can fall back.
    fn translate(&self, key: &str, lang: &str) -> Option<String>;
}

/// Keys the widget itself resolves.
pub mod keys {
    pub const WELCOME: &str = "chat.welcome";
    pub const TOOLTIP_CONNECTED: &str = "chat.status.connected";
    pub const TOOLTIP_OFFLINE: &str = "chat.status.offline";
}

/// Built-in English strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishStrings;

impl Translator for EnglishStrings {
    fn translate(&self, key: &str, _lang: &str) -> Option<String> {
        let text = match key {
            keys::WELCOME => "Hi! Ask me anything about these papers.",
            keys::TOOLTIP_CONNECTED => "Connected",
            keys::TOOLTIP_OFFLINE => "Offline - Start your local AI server",
            _ => return None,
        };
        Some(text.to_owned())
    }
}
