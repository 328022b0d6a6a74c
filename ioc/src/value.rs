//! Type-erased values and the parameter/argument sets that flow through resolution.

use crate::error::{ContainerError, Result};
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A resolved value. Everything the container hands out is shared behind an `Arc`,
/// so identity can be checked with `Arc::ptr_eq`.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Wraps any thread-safe value into a [`Value`].
pub fn value<T: Any + Send + Sync>(inner: T) -> Value {
  Arc::new(inner)
}

/// Downcasts a [`Value`] to a concrete type, keeping the shared allocation.
pub fn downcast<T: Any + Send + Sync>(value: &Value) -> Option<Arc<T>> {
  value.clone().downcast::<T>().ok()
}

/// Overrides supplied by a caller of `make_with` or `call`.
///
/// Named entries are matched against parameter names. Positional entries are
/// consumed in order by `call` and handed untouched to factories.
#[derive(Clone, Default)]
pub struct Parameters {
  named: HashMap<String, Value>,
  positional: Vec<Value>,
}

impl Parameters {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a named override.
  pub fn with<T: Any + Send + Sync>(self, name: impl Into<String>, inner: T) -> Self {
    self.with_value(name, Arc::new(inner))
  }

  /// Adds a named override that is already a [`Value`].
  pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
    self.named.insert(name.into(), value);
    self
  }

  /// Appends a positional value.
  pub fn push<T: Any + Send + Sync>(self, inner: T) -> Self {
    self.push_value(Arc::new(inner))
  }

  pub fn push_value(mut self, value: Value) -> Self {
    self.positional.push(value);
    self
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    self.named.get(name)
  }

  pub fn get_as<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
    self.named.get(name).and_then(downcast::<T>)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.named.contains_key(name)
  }

  pub fn positional(&self) -> &[Value] {
    &self.positional
  }

  pub fn is_empty(&self) -> bool {
    self.named.is_empty() && self.positional.is_empty()
  }

  pub fn len(&self) -> usize {
    self.named.len() + self.positional.len()
  }

  pub(crate) fn into_parts(self) -> (HashMap<String, Value>, Vec<Value>) {
    (self.named, self.positional)
  }
}

impl fmt::Debug for Parameters {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut names: Vec<&String> = self.named.keys().collect();
    names.sort();
    f.debug_struct("Parameters")
      .field("named", &names)
      .field("positional", &self.positional.len())
      .finish()
  }
}

/// The fully resolved argument list handed to a constructor, method or closure.
#[derive(Clone, Default)]
pub struct Arguments {
  entries: Vec<(String, Value)>,
  extra: Vec<Value>,
}

impl Arguments {
  pub(crate) fn new(entries: Vec<(String, Value)>, extra: Vec<Value>) -> Self {
    Self { entries, extra }
  }

  /// Returns the argument bound to the named parameter.
  pub fn value(&self, name: &str) -> Result<Value> {
    self
      .entries
      .iter()
      .find(|(param, _)| param == name)
      .map(|(_, value)| value.clone())
      .ok_or_else(|| ContainerError::factory(format!("No argument named [${}]", name)))
  }

  /// Returns the named argument downcast to `T`.
  pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    let value = self.value(name)?;
    downcast::<T>(&value).ok_or_else(|| ContainerError::TypeMismatch {
      id: format!("${}", name),
      expected: type_name::<T>(),
    })
  }

  /// Returns the variadic argument collected under `name`.
  pub fn variadic(&self, name: &str) -> Result<Arc<Vec<Value>>> {
    self.get::<Vec<Value>>(name)
  }

  /// Positional access over declared parameters followed by extra values.
  pub fn at(&self, index: usize) -> Option<&Value> {
    if index < self.entries.len() {
      Some(&self.entries[index].1)
    } else {
      self.extra.get(index - self.entries.len())
    }
  }

  pub fn len(&self) -> usize {
    self.entries.len() + self.extra.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Every argument, declared first, then any extra positional values.
  pub fn all(&self) -> Vec<Value> {
    self
      .entries
      .iter()
      .map(|(_, value)| value.clone())
      .chain(self.extra.iter().cloned())
      .collect()
  }
}

impl fmt::Debug for Arguments {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let names: Vec<&str> = self.entries.iter().map(|(name, _)| name.as_str()).collect();
    f.debug_struct("Arguments")
      .field("declared", &names)
      .field("extra", &self.extra.len())
      .finish()
  }
}
