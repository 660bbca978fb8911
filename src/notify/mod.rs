mod notifier_error;
mod telegram;

pub use notifier_error::NotifierError;
pub use telegram::TelegramNotifier;

use serde::Serialize;

/// Formatting dialect the chat should apply to the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    Markdown,
}

/// A composed message, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub parse_mode: Option<ParseMode>,
}

/// Delivers notifications to one fixed destination.
pub trait Notifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifierError>;
}
