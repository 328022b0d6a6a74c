//! Bindings, aliases and the instance cache.

use crate::container::Container;
use crate::error::{ContainerError, Result};
use crate::value::{Parameters, Value};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Produces an instance given the container and the caller's parameters.
pub type Factory = Arc<dyn Fn(&Container, &Parameters) -> Result<Value> + Send + Sync>;

/// How a binding produces its value.
#[derive(Clone)]
pub enum Concrete {
  /// Invoke a factory closure.
  Factory(Factory),
  /// Resolve another identifier, or build the class reflectively when it names
  /// the bound identifier itself.
  Class(String),
}

impl Concrete {
  pub fn factory<F>(factory: F) -> Self
  where
    F: Fn(&Container, &Parameters) -> Result<Value> + Send + Sync + 'static,
  {
    Concrete::Factory(Arc::new(factory))
  }

  pub fn class(name: impl Into<String>) -> Self {
    Concrete::Class(name.into())
  }
}

impl fmt::Debug for Concrete {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Concrete::Factory(_) => f.write_str("Factory(..)"),
      Concrete::Class(name) => f.debug_tuple("Class").field(name).finish(),
    }
  }
}

/// A registered construction strategy.
#[derive(Debug, Clone)]
pub struct Binding {
  concrete: Concrete,
  shared: bool,
}

impl Binding {
  pub(crate) fn new(concrete: Concrete, shared: bool) -> Self {
    Self { concrete, shared }
  }

  pub fn concrete(&self) -> &Concrete {
    &self.concrete
  }

  pub fn is_shared(&self) -> bool {
    self.shared
  }
}

#[derive(Default)]
pub(crate) struct BindingRegistry {
  pub(crate) bindings: HashMap<String, Binding>,
  // alias -> abstract
  pub(crate) aliases: HashMap<String, String>,
  // abstract -> every alias pointing at it
  pub(crate) abstract_aliases: HashMap<String, Vec<String>>,
  pub(crate) instances: HashMap<String, Value>,
  pub(crate) resolved: HashSet<String>,
}

impl BindingRegistry {
  /// Follows the alias chain to its terminal identifier.
  pub(crate) fn resolve_alias(&self, id: &str) -> Result<String> {
    let mut current = id.to_string();
    let mut visited = HashSet::new();
    while let Some(next) = self.aliases.get(&current) {
      if *next == current || !visited.insert(current.clone()) {
        return Err(ContainerError::SelfAlias(current));
      }
      current = next.clone();
    }
    Ok(current)
  }

  pub(crate) fn add_alias(&mut self, abstract_: &str, alias: &str) {
    self
      .aliases
      .insert(alias.to_string(), abstract_.to_string());
    let aliases = self.abstract_aliases.entry(abstract_.to_string()).or_default();
    if !aliases.iter().any(|existing| existing == alias) {
      aliases.push(alias.to_string());
    }
  }

  /// Detaches `searched` from every abstract's alias list if it is an alias.
  pub(crate) fn remove_abstract_alias(&mut self, searched: &str) {
    if !self.aliases.contains_key(searched) {
      return;
    }
    for aliases in self.abstract_aliases.values_mut() {
      aliases.retain(|alias| alias != searched);
    }
  }

  pub(crate) fn is_alias(&self, id: &str) -> bool {
    self.aliases.contains_key(id)
  }

  pub(crate) fn is_bound(&self, id: &str) -> bool {
    self.bindings.contains_key(id) || self.instances.contains_key(id) || self.is_alias(id)
  }

  /// Resolved-ness of an already alias-resolved identifier.
  pub(crate) fn is_resolved(&self, id: &str) -> bool {
    self.resolved.contains(id) || self.instances.contains_key(id)
  }

  pub(crate) fn is_shared(&self, id: &str) -> bool {
    self.instances.contains_key(id)
      || self
        .bindings
        .get(id)
        .map(|binding| binding.shared)
        .unwrap_or(false)
  }

  pub(crate) fn drop_stale_instances(&mut self, id: &str) {
    self.instances.remove(id);
    self.aliases.remove(id);
  }

  pub(crate) fn remove(&mut self, id: &str) {
    self.bindings.remove(id);
    self.instances.remove(id);
    self.resolved.remove(id);
  }

  pub(crate) fn clear(&mut self) {
    self.bindings.clear();
    self.aliases.clear();
    self.abstract_aliases.clear();
    self.instances.clear();
    self.resolved.clear();
  }
}
