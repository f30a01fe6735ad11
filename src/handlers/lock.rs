//! Write-once guard.

use crate::error::{ConfigError, ConfigResult};
use crate::handlers::{expect_arity, Annotation, Handler};
use crate::value::Value;

/// Rejects every write once the field holds a value.
///
/// Installs always pass because they run with no stored value; a re-declared
/// field keeps the value it already holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lock;

impl Handler for Lock {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn set(&self, field: &str, stored: Option<&Value>, value: Value) -> ConfigResult<Value> {
        if stored.is_some() {
            return Err(ConfigError::DuplicateAssignment {
                field: field.to_string(),
            });
        }
        Ok(value)
    }

    fn is_write_once(&self) -> bool {
        true
    }
}

impl Annotation for Lock {
    const NAME: &'static str = "Lock";

    fn configure(args: &[Value]) -> ConfigResult<Self> {
        expect_arity(Self::NAME, args, 0)?;
        Ok(Lock)
    }
}
