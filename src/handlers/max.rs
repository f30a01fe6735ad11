//! Maximum length constraint for strings and lists.

use std::cmp::Ordering;

use crate::error::{ConfigError, ConfigResult};
use crate::handlers::{expect_arity, length_of, numeric_arg, Annotation, Handler};
use crate::value::{Number, Value};

/// Length ceiling; the bound may be an integer or a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Max {
    bound: Number,
}

impl Max {
    pub fn new(bound: impl Into<Number>) -> ConfigResult<Self> {
        let bound = bound.into();
        if !matches!(
            bound.partial_cmp(&Number::Int(0)),
            Some(Ordering::Greater | Ordering::Equal)
        ) {
            return Err(ConfigError::Configuration(format!(
                "Max bound must be non-negative, got {}",
                bound
            )));
        }
        Ok(Self { bound })
    }

    pub fn bound(&self) -> Number {
        self.bound
    }
}

impl Handler for Max {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn set(&self, field: &str, _stored: Option<&Value>, value: Value) -> ConfigResult<Value> {
        let len = length_of(Self::NAME, field, &value)?;
        let len_num = Number::Int(i64::try_from(len).unwrap_or(i64::MAX));
        if len_num > self.bound {
            return Err(ConfigError::validation(
                field,
                format!("length {} is bigger than max value ({})", len, self.bound),
            ));
        }
        Ok(value)
    }
}

impl Annotation for Max {
    const NAME: &'static str = "Max";

    fn configure(args: &[Value]) -> ConfigResult<Self> {
        expect_arity(Self::NAME, args, 1)?;
        Self::new(numeric_arg(Self::NAME, &args[0])?)
    }
}
