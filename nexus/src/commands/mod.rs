/// Configure command handler
pub mod configure;

/// Image command handlers and logic
pub mod image;

/// Version command handlers
pub mod version;
