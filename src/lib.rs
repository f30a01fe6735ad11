//! Annotated, validated configuration fields.
//!
//! A config module declares fields whose annotations (`Lock`, `Min[n]`,
//! `Max[n]`, `Range[lo, hi]`) constrain them. Loading the module installs
//! each field into a [`Config`], and every later read or write goes through
//! the field's handler chain.
//!
//! ```no_run
//! use confstar::{handlers, Config};
//!
//! # fn main() -> Result<(), confstar::ConfigError> {
//! let mut config = Config::new();
//! config.add_handlers(handlers::builtin());
//! config.import_module("config")?;
//!
//! println!("{}", config.get("PUBLIC_RANGE_FIELD")?);
//! config.set("PUBLIC_RANGE_FIELD", 6).unwrap_err();
//! # Ok(())
//! # }
//! ```

pub mod annotation;
pub mod error;
pub mod handlers;
pub mod loader;
pub mod observability;
pub mod proxy;
pub mod registry;
pub mod value;

pub use error::{ConfigError, ConfigResult};
pub use handlers::{Annotation, Handler, HandlerConstructor, Lock, Max, Min, Range};
pub use loader::{LoadReport, LoaderSettings};
pub use proxy::{Config, Field};
pub use registry::HandlerRegistry;
pub use value::{Number, Value};
