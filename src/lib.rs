//! Concurrent link validation.
//!
//! File paths go in, every `http(s)` URL inside those files is probed once,
//! and one classified [`Action`] per distinct URL comes out. Hosts that
//! answer `429 Too Many Requests` are left alone until their `Retry-After`
//! window has passed.

pub mod config;
pub mod core;
pub mod discovery;
pub mod reporting;
pub mod ui;
pub mod validation;

pub use crate::config::{CliConfig, Config};
pub use crate::core::{Action, LinchError, Link, Outcome, Result};
pub use crate::discovery::Extractor;
pub use crate::validation::{HttpProbe, PoolSettings, SharedState, ValidatorPool};
