//! # wikirefs configuration
//!
//! Typed configuration for the wikirefs renderer. Every recognized option is
//! enumerated here with its default, so rendering code never has to fall back
//! to ad-hoc defaults of its own.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wikirefs_config::{ConfigLoader, WikiRefsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::load_from_file("wikirefs.toml").await?;
//!     assert!(config.attrs.enable);
//!
//!     let defaults = WikiRefsConfig::default();
//!     assert_eq!(defaults.css.wiki, "wiki");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod css;
mod loader;

pub use config::*;
pub use css::*;
pub use loader::*;
