//! Ordered decorator chains applied to freshly built values.

use crate::container::Container;
use crate::error::Result;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Receives the current value and returns its replacement.
pub type Extender = Arc<dyn Fn(Value, &Container) -> Result<Value> + Send + Sync>;

#[derive(Default)]
pub(crate) struct ExtensionChains {
  chains: HashMap<String, Vec<Extender>>,
}

impl ExtensionChains {
  pub(crate) fn push(&mut self, abstract_: &str, extender: Extender) {
    self
      .chains
      .entry(abstract_.to_string())
      .or_default()
      .push(extender);
  }

  /// A snapshot of the chain, so it can run without holding container state.
  pub(crate) fn get(&self, abstract_: &str) -> Vec<Extender> {
    self.chains.get(abstract_).cloned().unwrap_or_default()
  }

  pub(crate) fn forget(&mut self, abstract_: &str) {
    self.chains.remove(abstract_);
  }
}

/// Applies `chain` left to right.
pub(crate) fn apply(chain: &[Extender], value: Value, container: &Container) -> Result<Value> {
  if !chain.is_empty() {
    trace!(extenders = chain.len(), "Applying extenders");
  }
  chain
    .iter()
    .try_fold(value, |current, extender| extender(current, container))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::value::{downcast, value};

  #[test]
  fn chain_is_applied_left_to_right_and_forgotten_per_id() {
    let container = Container::new();
    let mut chains = ExtensionChains::default();
    chains.push("n", Arc::new(|v: Value, _: &Container| Ok(value(*downcast::<i32>(&v).unwrap() + 1))));
    chains.push("n", Arc::new(|v: Value, _: &Container| Ok(value(*downcast::<i32>(&v).unwrap() * 10))));

    let result = apply(&chains.get("n"), value(1_i32), &container).unwrap();
    assert_eq!(*downcast::<i32>(&result).unwrap(), 20);

    chains.forget("n");
    assert!(chains.get("n").is_empty());
  }
}
