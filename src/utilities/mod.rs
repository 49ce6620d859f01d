pub mod format;
pub mod messages;
pub mod token;
