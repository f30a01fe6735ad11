//! Minimum length constraint for strings and lists.

use crate::error::{ConfigError, ConfigResult};
use crate::handlers::{expect_arity, length_of, Annotation, Handler};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Min {
    bound: usize,
}

impl Min {
    pub fn new(bound: i64) -> ConfigResult<Self> {
        let bound = usize::try_from(bound).map_err(|_| {
            ConfigError::Configuration(format!(
                "Min bound must be a non-negative integer, got {}",
                bound
            ))
        })?;
        Ok(Self { bound })
    }

    pub fn bound(&self) -> usize {
        self.bound
    }
}

impl Handler for Min {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn set(&self, field: &str, _stored: Option<&Value>, value: Value) -> ConfigResult<Value> {
        let len = length_of(Self::NAME, field, &value)?;
        if len < self.bound {
            return Err(ConfigError::validation(
                field,
                format!("length {} is smaller than min value ({})", len, self.bound),
            ));
        }
        Ok(value)
    }
}

impl Annotation for Min {
    const NAME: &'static str = "Min";

    fn configure(args: &[Value]) -> ConfigResult<Self> {
        expect_arity(Self::NAME, args, 1)?;
        match &args[0] {
            Value::Integer(bound) => Self::new(*bound),
            other => Err(ConfigError::Configuration(format!(
                "Min bound must be an integer, got {} {}",
                other.type_name(),
                other
            ))),
        }
    }
}
