//! Contextual bindings: "when building C, if D is needed, use E".

use crate::binding::Factory;
use crate::container::Container;
use crate::error::Result;
use crate::value::{Parameters, Value};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Prefix marking a needed identifier as a constructor parameter name.
pub const VARIABLE_PREFIX: char = '$';

/// What a contextual rule supplies.
#[derive(Clone)]
pub enum Given {
  /// Resolve this identifier through the container.
  Class(String),
  /// Invoke this factory.
  Factory(Factory),
  /// Use this value as-is.
  Value(Value),
}

impl Given {
  pub fn class(name: impl Into<String>) -> Self {
    Given::Class(name.into())
  }

  pub fn factory<F>(factory: F) -> Self
  where
    F: Fn(&Container, &Parameters) -> Result<Value> + Send + Sync + 'static,
  {
    Given::Factory(Arc::new(factory))
  }

  pub fn value<T: Any + Send + Sync>(inner: T) -> Self {
    Given::Value(Arc::new(inner))
  }
}

impl fmt::Debug for Given {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Given::Class(name) => f.debug_tuple("Class").field(name).finish(),
      Given::Factory(_) => f.write_str("Factory(..)"),
      Given::Value(_) => f.write_str("Value(..)"),
    }
  }
}

#[derive(Default)]
pub(crate) struct ContextualBindings {
  // consumer -> needed -> given
  rules: HashMap<String, HashMap<String, Given>>,
}

impl ContextualBindings {
  pub(crate) fn add(&mut self, consumer: String, needed: String, given: Given) {
    self.rules.entry(consumer).or_default().insert(needed, given);
  }

  pub(crate) fn find(&self, consumer: &str, needed: &str) -> Option<Given> {
    self.rules.get(consumer)?.get(needed).cloned()
  }

  pub(crate) fn clear(&mut self) {
    self.rules.clear();
  }
}

/// First step of `when(..).needs(..).give(..)`.
#[must_use = "a contextual binding is only registered once `give` is called"]
pub struct ContextualBindingBuilder<'a> {
  container: &'a Container,
  consumers: Vec<String>,
}

impl<'a> ContextualBindingBuilder<'a> {
  pub(crate) fn new(container: &'a Container, consumers: Vec<String>) -> Self {
    Self {
      container,
      consumers,
    }
  }

  /// The identifier (type, interface or alias) the rule overrides.
  pub fn needs(self, abstract_: impl Into<String>) -> ContextualNeeds<'a> {
    ContextualNeeds {
      container: self.container,
      consumers: self.consumers,
      needed: abstract_.into(),
    }
  }

  /// The untyped constructor parameter named `name` the rule supplies.
  pub fn needs_variable(self, name: &str) -> ContextualNeeds<'a> {
    let name = name.trim_start_matches(VARIABLE_PREFIX);
    self.needs(format!("{}{}", VARIABLE_PREFIX, name))
  }
}

/// Second step of `when(..).needs(..).give(..)`.
#[must_use = "a contextual binding is only registered once `give` is called"]
pub struct ContextualNeeds<'a> {
  container: &'a Container,
  consumers: Vec<String>,
  needed: String,
}

impl ContextualNeeds<'_> {
  pub fn give(self, given: Given) -> Result<()> {
    for consumer in &self.consumers {
      self
        .container
        .add_contextual_binding(consumer, &self.needed, given.clone())?;
    }
    Ok(())
  }

  pub fn give_class(self, class: impl Into<String>) -> Result<()> {
    self.give(Given::class(class))
  }

  pub fn give_factory<F>(self, factory: F) -> Result<()>
  where
    F: Fn(&Container, &Parameters) -> Result<Value> + Send + Sync + 'static,
  {
    self.give(Given::factory(factory))
  }

  pub fn give_value<T: Any + Send + Sync>(self, inner: T) -> Result<()> {
    self.give(Given::value(inner))
  }
}
