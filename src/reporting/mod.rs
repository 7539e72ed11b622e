//! Reporting
//!
//! Structured logging for the application. Result lines themselves are
//! written by [`crate::ui::output`].

pub mod logging;

// Re-export commonly used items
pub use logging::{init_logger, log_action, log_config_info, log_extraction_summary};
