//! Handler implementations: logging, user registration, and the weather conversation.

mod conversation;
mod logging;
mod registration;

pub use conversation::ConversationHandler;
pub use logging::LoggingHandler;
pub use registration::UserRegistrationHandler;
