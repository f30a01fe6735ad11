//! Annotation handlers.
//!
//! # Data Flow
//! ```text
//! annotation text ("Min[2]")
//!     → annotation.rs (parse into name + arguments)
//!     → registry.rs (look up constructor by name)
//!     → Annotation::configure (validate arguments, build instance)
//!     → Arc<dyn Handler> attached to one field
//!
//! Config::set(field, value)
//!     → handler[0].set → handler[1].set → ... → stored
//! ```
//!
//! # Design Decisions
//! - Handlers own no storage; the config passes the stored value in
//! - Every annotation occurrence yields its own immutable instance, so two
//!   fields annotated `Min[2]` and `Min[5]` never share a bound
//! - Arguments are checked in `configure`, before any value flows through

use std::fmt;
use std::sync::Arc;

use crate::error::{ConfigError, ConfigResult};
use crate::value::{Number, Value};

pub mod lock;
pub mod max;
pub mod min;
pub mod range;

pub use lock::Lock;
pub use max::Max;
pub use min::Min;
pub use range::Range;

/// A validation policy attached to a declared field.
pub trait Handler: fmt::Debug + Send + Sync {
    /// Annotation name this handler was built from.
    fn name(&self) -> &'static str;

    /// Accept (and possibly transform) a proposed value, or reject it.
    ///
    /// `stored` is the field's current value, always `None` during install.
    fn set(&self, field: &str, stored: Option<&Value>, value: Value) -> ConfigResult<Value>;

    /// Report the field's current value.
    fn get<'v>(&self, field: &str, stored: Option<&'v Value>) -> ConfigResult<&'v Value> {
        stored.ok_or_else(|| ConfigError::UnsetField(field.to_string()))
    }

    /// Whether a field guarded by this handler keeps its value when re-declared.
    fn is_write_once(&self) -> bool {
        false
    }
}

/// A handler that can be configured from annotation arguments.
pub trait Annotation: Handler + Sized + 'static {
    /// Name used in annotation expressions, e.g. `"Min"`.
    const NAME: &'static str;

    /// Validate `args` and build a handler instance.
    fn configure(args: &[Value]) -> ConfigResult<Self>;
}

/// Type-erased constructor stored in the handler registry.
#[derive(Debug, Clone, Copy)]
pub struct HandlerConstructor {
    name: &'static str,
    build: fn(&[Value]) -> ConfigResult<Arc<dyn Handler>>,
}

impl HandlerConstructor {
    pub fn of<H: Annotation>() -> Self {
        Self {
            name: H::NAME,
            build: build_handler::<H>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn build(&self, args: &[Value]) -> ConfigResult<Arc<dyn Handler>> {
        (self.build)(args)
    }
}

fn build_handler<H: Annotation>(args: &[Value]) -> ConfigResult<Arc<dyn Handler>> {
    Ok(Arc::new(H::configure(args)?))
}

/// Constructors for Lock, Min, Max and Range, in that order.
pub fn builtin() -> [HandlerConstructor; 4] {
    [
        HandlerConstructor::of::<Lock>(),
        HandlerConstructor::of::<Min>(),
        HandlerConstructor::of::<Max>(),
        HandlerConstructor::of::<Range>(),
    ]
}

pub(crate) fn expect_arity(name: &str, args: &[Value], expected: usize) -> ConfigResult<()> {
    if args.len() != expected {
        return Err(ConfigError::Configuration(format!(
            "{} expects {} parameter(s), got {}",
            name,
            expected,
            args.len()
        )));
    }
    Ok(())
}

pub(crate) fn numeric_arg(name: &str, arg: &Value) -> ConfigResult<Number> {
    arg.as_number().ok_or_else(|| {
        ConfigError::Configuration(format!(
            "{} bound must be numeric, got {} {}",
            name,
            arg.type_name(),
            arg
        ))
    })
}

pub(crate) fn length_of(handler: &str, field: &str, value: &Value) -> ConfigResult<usize> {
    value.len().ok_or_else(|| {
        ConfigError::validation(
            field,
            format!("{} needs a sized value, got {}", handler, value.type_name()),
        )
    })
}
