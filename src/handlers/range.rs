//! Inclusive numeric range constraint.

use std::cmp::Ordering;

use crate::error::{ConfigError, ConfigResult};
use crate::handlers::{expect_arity, numeric_arg, Annotation, Handler};
use crate::value::{Number, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    low: Number,
    high: Number,
}

impl Range {
    pub fn new(low: impl Into<Number>, high: impl Into<Number>) -> ConfigResult<Self> {
        let (low, high) = (low.into(), high.into());
        if !matches!(
            low.partial_cmp(&high),
            Some(Ordering::Less | Ordering::Equal)
        ) {
            return Err(ConfigError::Configuration(format!(
                "Range bounds out of order: [{}, {}]",
                low, high
            )));
        }
        Ok(Self { low, high })
    }

    pub fn bounds(&self) -> (Number, Number) {
        (self.low, self.high)
    }
}

impl Handler for Range {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn set(&self, field: &str, _stored: Option<&Value>, value: Value) -> ConfigResult<Value> {
        let Some(n) = value.as_number() else {
            return Err(ConfigError::validation(
                field,
                format!("Range needs a numeric value, got {}", value.type_name()),
            ));
        };
        let within = n >= self.low && n <= self.high;
        if !within {
            return Err(ConfigError::validation(
                field,
                format!("{} is outside range [{}, {}]", n, self.low, self.high),
            ));
        }
        Ok(value)
    }
}

impl Annotation for Range {
    const NAME: &'static str = "Range";

    fn configure(args: &[Value]) -> ConfigResult<Self> {
        expect_arity(Self::NAME, args, 2)?;
        Self::new(
            numeric_arg(Self::NAME, &args[0])?,
            numeric_arg(Self::NAME, &args[1])?,
        )
    }
}
