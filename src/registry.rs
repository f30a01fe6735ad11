//! Handler registry.
//!
//! # Responsibilities
//! - Keep the ordered set of handler constructors a config recognises
//! - Resolve parsed annotation components to configured handler instances
//!
//! # Design Decisions
//! - Registration order is preserved; the first registration of a name wins
//! - Unknown names fail fast instead of leaving a field unguarded

use std::sync::Arc;

use crate::annotation::{self, Component};
use crate::error::{ConfigError, ConfigResult};
use crate::handlers::{Annotation, Handler, HandlerConstructor};

#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    constructors: Vec<HandlerConstructor>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with Lock, Min, Max and Range.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.extend(crate::handlers::builtin());
        registry
    }

    /// Register a constructor. Returns `false` if the name was already known.
    pub fn register(&mut self, constructor: HandlerConstructor) -> bool {
        if self.lookup(constructor.name()).is_some() {
            tracing::debug!(handler = constructor.name(), "Handler already registered");
            return false;
        }
        tracing::debug!(handler = constructor.name(), "Handler registered");
        self.constructors.push(constructor);
        true
    }

    pub fn register_type<H: Annotation>(&mut self) -> bool {
        self.register(HandlerConstructor::of::<H>())
    }

    pub fn lookup(&self, name: &str) -> Option<&HandlerConstructor> {
        self.constructors.iter().find(|c| c.name() == name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.iter().map(|c| c.name())
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Build the handler for one annotation component.
    pub fn resolve(&self, component: &Component) -> ConfigResult<Arc<dyn Handler>> {
        let constructor = self.lookup(&component.name).ok_or_else(|| {
            ConfigError::Configuration(format!(
                "handler {} is not registered (known: {})",
                component.name,
                self.names().collect::<Vec<_>>().join(", ")
            ))
        })?;
        constructor.build(&component.args)
    }

    /// Parse an annotation expression and build its handler chain.
    pub fn resolve_annotation(&self, annotation: &str) -> ConfigResult<Vec<Arc<dyn Handler>>> {
        annotation::parse(annotation)?
            .iter()
            .map(|component| self.resolve(component))
            .collect()
    }
}

impl Extend<HandlerConstructor> for HandlerRegistry {
    fn extend<I: IntoIterator<Item = HandlerConstructor>>(&mut self, iter: I) {
        for constructor in iter {
            self.register(constructor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{Lock, Max, Min, Range};

    #[test]
    fn test_registration_order_and_duplicates() {
        let mut registry = HandlerRegistry::new();
        assert!(registry.register_type::<Max>());
        assert!(registry.register_type::<Lock>());
        assert!(!registry.register_type::<Max>());
        assert_eq!(registry.names().collect::<Vec<_>>(), ["Max", "Lock"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_resolve_composite_annotation() {
        let registry = HandlerRegistry::builtin();
        let chain = registry.resolve_annotation("Lock | Max[3]").unwrap();
        let names: Vec<_> = chain.iter().map(|h| h.name()).collect();
        assert_eq!(names, ["Lock", "Max"]);
    }

    #[test]
    fn test_unregistered_handler_is_named() {
        let mut registry = HandlerRegistry::new();
        registry.register_type::<Min>();
        let err = registry.resolve_annotation("Range[1, 5]").unwrap_err();
        match err {
            ConfigError::Configuration(msg) => assert!(msg.contains("Range"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_parameters_fail_at_configuration() {
        let mut registry = HandlerRegistry::new();
        registry.register_type::<Range>();
        registry.register_type::<Min>();
        assert!(matches!(
            registry.resolve_annotation("Range[1]"),
            Err(ConfigError::Configuration(_))
        ));
        assert!(matches!(
            registry.resolve_annotation("Min[\"x\"]"),
            Err(ConfigError::Configuration(_))
        ));
    }
}
