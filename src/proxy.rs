//! The config proxy: field storage with guarded reads and writes.
//!
//! # Data Flow
//! ```text
//! install (loader or declare)
//!     → chain runs as if the field were empty, so Lock never rejects it
//!     → write-once fields that already hold a value keep it
//!     → field committed
//!
//! Config::set(name, value)
//!     → handler chain, in declaration order, each fed the previous output
//!     → first failure aborts, stored value untouched
//!     → success replaces the stored value
//! ```
//!
//! # Design Decisions
//! - Explicit `get`/`set` by name instead of attribute interception
//! - Writes are all-or-nothing
//! - Handler errors propagate unchanged so callers can match on the kind

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ConfigError, ConfigResult};
use crate::handlers::{Annotation, Handler, HandlerConstructor};
use crate::loader::LoaderSettings;
use crate::registry::HandlerRegistry;
use crate::value::Value;

/// A declared configuration field.
#[derive(Clone)]
pub struct Field {
    name: String,
    handlers: Vec<Arc<dyn Handler>>,
    value: Option<Value>,
    module: Option<String>,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stored value, bypassing the handler chain's `get`.
    pub fn raw_value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    /// Module the field was last declared in, if it came from the loader.
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field(
                "handlers",
                &self.handlers.iter().map(|h| h.name()).collect::<Vec<_>>(),
            )
            .field("value", &self.value)
            .field("module", &self.module)
            .finish()
    }
}

/// Validated configuration fields, keyed by name.
#[derive(Debug, Default)]
pub struct Config {
    registry: HandlerRegistry,
    settings: LoaderSettings,
    fields: Vec<Field>,
    index: HashMap<String, usize>,
}

impl Config {
    /// Empty config with no registered handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with Lock, Min, Max and Range already registered.
    pub fn with_builtin_handlers() -> Self {
        Self {
            registry: HandlerRegistry::builtin(),
            ..Self::default()
        }
    }

    pub fn with_settings(mut self, settings: LoaderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut LoaderSettings {
        &mut self.settings
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Register handler constructors, preserving order.
    pub fn add_handlers<I>(&mut self, constructors: I) -> &mut Self
    where
        I: IntoIterator<Item = HandlerConstructor>,
    {
        self.registry.extend(constructors);
        self
    }

    pub fn add_handler<H: Annotation>(&mut self) -> &mut Self {
        self.registry.register_type::<H>();
        self
    }

    /// Declare a field directly and install its initial value.
    ///
    /// Re-declaring an existing field replaces its chain. The new value (or
    /// the stored one, when `initial` is `None` or the chain is write-once)
    /// must satisfy the new chain.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        handlers: Vec<Arc<dyn Handler>>,
        initial: Option<Value>,
    ) -> ConfigResult<()> {
        let field = self.stage(name.into(), handlers, initial, None)?;
        self.commit(vec![field]);
        Ok(())
    }

    /// Declare a field from an annotation expression, e.g. `"Lock | Max[3]"`.
    pub fn declare_annotated(
        &mut self,
        name: impl Into<String>,
        annotation: &str,
        initial: Option<Value>,
    ) -> ConfigResult<()> {
        let handlers = self.registry.resolve_annotation(annotation)?;
        self.declare(name, handlers, initial)
    }

    /// Read a field through its handler chain.
    pub fn get(&self, name: &str) -> ConfigResult<&Value> {
        let field = self.field(name).ok_or_else(|| unknown(name))?;
        let mut current = field.value.as_ref();
        for handler in &field.handlers {
            current = Some(handler.get(name, current)?);
        }
        current.ok_or_else(|| ConfigError::UnsetField(name.to_string()))
    }

    /// Write a field through its handler chain.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> ConfigResult<()> {
        let idx = *self.index.get(name).ok_or_else(|| unknown(name))?;
        let field = &self.fields[idx];

        let accepted = run_chain(name, &field.handlers, field.value.as_ref(), value.into())
            .inspect_err(|e| {
                tracing::warn!(field = name, kind = e.kind(), error = %e, "Write rejected");
            })?;

        tracing::debug!(field = name, value = %accepted, "Field updated");
        self.fields[idx].value = Some(accepted);
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.index.get(name).map(|&idx| &self.fields[idx])
    }

    /// Fields in the order they were first declared.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn handler_names(&self, name: &str) -> ConfigResult<Vec<&'static str>> {
        let field = self.field(name).ok_or_else(|| unknown(name))?;
        Ok(field.handlers.iter().map(|h| h.name()).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate an install without touching the config.
    pub(crate) fn stage(
        &self,
        name: String,
        handlers: Vec<Arc<dyn Handler>>,
        initial: Option<Value>,
        module: Option<&str>,
    ) -> ConfigResult<Field> {
        let stored = self.field(&name).and_then(|f| f.value.as_ref());
        let write_once = handlers.iter().any(|h| h.is_write_once());
        let candidate = match (initial, stored) {
            (_, Some(current)) if write_once => Some(current.clone()),
            (Some(v), _) => Some(v),
            (None, current) => current.cloned(),
        };
        // Install is not a write: run the chain as if the field were empty.
        let value = candidate
            .map(|v| run_chain(&name, &handlers, None, v))
            .transpose()?;
        Ok(Field {
            name,
            handlers,
            value,
            module: module.map(str::to_string),
        })
    }

    /// Install staged fields. Cannot fail.
    pub(crate) fn commit(&mut self, staged: Vec<Field>) {
        for field in staged {
            tracing::debug!(
                field = %field.name,
                handlers = ?field.handlers.iter().map(|h| h.name()).collect::<Vec<_>>(),
                "Field installed"
            );
            match self.index.get(&field.name) {
                Some(&idx) => self.fields[idx] = field,
                None => {
                    self.index.insert(field.name.clone(), self.fields.len());
                    self.fields.push(field);
                }
            }
        }
    }
}

fn unknown(name: &str) -> ConfigError {
    ConfigError::UnknownField(name.to_string())
}

fn run_chain(
    name: &str,
    handlers: &[Arc<dyn Handler>],
    stored: Option<&Value>,
    value: Value,
) -> ConfigResult<Value> {
    handlers
        .iter()
        .try_fold(value, |value, handler| handler.set(name, stored, value))
}
