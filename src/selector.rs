//! Button selectors for simulated clicks.
//!
//! A selector must single out exactly one button on a message's keyboard;
//! the control facade rejects zero or multiple matches. Any closure over a
//! button works, and [`ButtonMatch`] covers the common declarative cases.

use crate::types::InlineKeyboardButton;

/// Predicate over a single inline keyboard button.
pub trait ButtonSelector {
    fn matches(&self, button: &InlineKeyboardButton) -> bool;
}

impl<F> ButtonSelector for F
where
    F: Fn(&InlineKeyboardButton) -> bool,
{
    fn matches(&self, button: &InlineKeyboardButton) -> bool {
        self(button)
    }
}

/// Declarative button matchers.
#[derive(Debug, Clone)]
pub enum ButtonMatch {
    /// Label equals the given text.
    Text(String),
    /// Label contains the given text.
    TextContains(String),
    /// Callback payload equals the given data.
    CallbackData(String),
}

impl ButtonMatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn text_contains(text: impl Into<String>) -> Self {
        Self::TextContains(text.into())
    }

    pub fn callback_data(data: impl Into<String>) -> Self {
        Self::CallbackData(data.into())
    }
}

impl ButtonSelector for ButtonMatch {
    fn matches(&self, button: &InlineKeyboardButton) -> bool {
        match self {
            Self::Text(text) => button.text == *text,
            Self::TextContains(text) => button.text.contains(text.as_str()),
            Self::CallbackData(data) => button.callback_data.as_deref() == Some(data.as_str()),
        }
    }
}
