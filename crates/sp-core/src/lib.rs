//! # sp-core
//!
//! Shared foundation for the streampack workspace: the unified [`Error`]
//! type with HTTP status mapping, and the TOML application [`config`].

pub mod config;
mod error;

pub use config::{Config, PackagingConfig, ServerConfig, ToolsConfig};
pub use error::{Error, Result};
