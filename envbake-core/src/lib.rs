//! envbake core library: environment prefixes, solution layout, configuration.
//!
//! Public API surface:
//! - [`types`] — newtypes and the fixed environment prefix list
//! - [`layout`] — where each environment copy lands on disk
//! - [`config`] — config file + environment variable resolution
//! - [`error`] — [`LayoutError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod layout;
pub mod types;

pub use config::{GithubSettings, Settings};
pub use error::{ConfigError, LayoutError};
pub use layout::SolutionLayout;
pub use types::{Destination, EnvPrefix, SolutionName};
