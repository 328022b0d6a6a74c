//! Resolving and rebinding callbacks.

use crate::container::Container;
use crate::error::Result;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Fired with each freshly resolved value.
pub type ResolvingCallback = Arc<dyn Fn(&Value, &Container) + Send + Sync>;

/// Fired with the new value when an already resolved identifier is re-registered.
pub type RebindingCallback = Arc<dyn Fn(&Container, &Value) -> Result<()> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
  Resolving,
  AfterResolving,
}

#[derive(Default)]
struct PhaseCallbacks {
  global: Vec<ResolvingCallback>,
  // Kept in registration order; the type name may be an abstract or an ancestor.
  typed: Vec<(String, ResolvingCallback)>,
}

#[derive(Default)]
pub(crate) struct EventRegistry {
  resolving: PhaseCallbacks,
  after_resolving: PhaseCallbacks,
  rebinding: HashMap<String, Vec<RebindingCallback>>,
}

impl EventRegistry {
  fn phase_mut(&mut self, phase: Phase) -> &mut PhaseCallbacks {
    match phase {
      Phase::Resolving => &mut self.resolving,
      Phase::AfterResolving => &mut self.after_resolving,
    }
  }

  pub(crate) fn add_global(&mut self, phase: Phase, callback: ResolvingCallback) {
    self.phase_mut(phase).global.push(callback);
  }

  pub(crate) fn add_typed(&mut self, phase: Phase, type_name: String, callback: ResolvingCallback) {
    self.phase_mut(phase).typed.push((type_name, callback));
  }

  /// Global callbacks first, then every typed callback whose type `matches`.
  pub(crate) fn callbacks<M>(&self, phase: Phase, matches: M) -> Vec<ResolvingCallback>
  where
    M: Fn(&str) -> bool,
  {
    let callbacks = match phase {
      Phase::Resolving => &self.resolving,
      Phase::AfterResolving => &self.after_resolving,
    };
    callbacks
      .global
      .iter()
      .cloned()
      .chain(
        callbacks
          .typed
          .iter()
          .filter(|(type_name, _)| matches(type_name))
          .map(|(_, callback)| callback.clone()),
      )
      .collect()
  }

  pub(crate) fn add_rebinding(&mut self, abstract_: &str, callback: RebindingCallback) {
    self
      .rebinding
      .entry(abstract_.to_string())
      .or_default()
      .push(callback);
  }

  pub(crate) fn rebinding_for(&self, abstract_: &str) -> Vec<RebindingCallback> {
    self.rebinding.get(abstract_).cloned().unwrap_or_default()
  }
}
