//! Core, non-public data structures for the IoC container.

use crate::binding::BindingRegistry;
use crate::bound_method::MethodBinding;
use crate::container::Container;
use crate::contextual::ContextualBindings;
use crate::error::{ContainerError, Result};
use crate::events::EventRegistry;
use crate::extension::ExtensionChains;
use crate::value::{Parameters, Value};
use std::collections::HashMap;

/// All mutable container state. It lives behind the container's single lock and
/// is only ever borrowed for short, callback-free sections.
#[derive(Default)]
pub(crate) struct State {
  pub(crate) registry: BindingRegistry,
  pub(crate) contextual: ContextualBindings,
  pub(crate) extenders: ExtensionChains,
  pub(crate) events: EventRegistry,
  pub(crate) tags: HashMap<String, Vec<String>>,
  pub(crate) method_bindings: HashMap<String, MethodBinding>,
  // Identifiers under construction, outermost first.
  pub(crate) build_stack: Vec<String>,
  // One parameter set per in-flight `make`.
  pub(crate) with: Vec<Parameters>,
}

impl State {
  /// Named override visible to the current build, innermost frame first.
  pub(crate) fn parameter_override(&self, name: &str) -> Option<Value> {
    self
      .with
      .iter()
      .rev()
      .find_map(|parameters| parameters.get(name).cloned())
  }
}

/// An RAII guard for one build-stack frame.
///
/// Entering pushes the identifier and enforces the maximum build depth, which is
/// how unbounded (circular) construction is detected. Dropping pops the frame on
/// every exit path, including errors.
pub(crate) struct BuildFrame<'a> {
  container: &'a Container,
}

impl<'a> BuildFrame<'a> {
  pub(crate) fn enter(container: &'a Container, id: &str) -> Result<Self> {
    let max_depth = container.config().max_build_depth;
    container.with_state(|state| {
      if state.build_stack.len() >= max_depth {
        let mut chain = state.build_stack.clone();
        chain.push(id.to_string());
        return Err(ContainerError::depth_exceeded(id, max_depth, &chain));
      }
      state.build_stack.push(id.to_string());
      Ok(())
    })?;
    Ok(Self { container })
  }
}

impl Drop for BuildFrame<'_> {
  fn drop(&mut self) {
    self.container.with_state(|state| {
      state.build_stack.pop();
    });
  }
}

/// An RAII guard for one parameter-override frame. Once the outermost frame is
/// dropped the override stack is empty again.
///
/// Every uncached resolution enters one, so the frame count also bounds
/// recursion that never reaches a build, such as two classes bound to each other.
pub(crate) struct ParameterFrame<'a> {
  container: &'a Container,
}

impl<'a> ParameterFrame<'a> {
  pub(crate) fn enter(container: &'a Container, id: &str, parameters: Parameters) -> Result<Self> {
    let max_depth = container.config().max_build_depth;
    container.with_state(|state| {
      if state.with.len() >= max_depth {
        let mut chain = state.build_stack.clone();
        chain.push(id.to_string());
        return Err(ContainerError::depth_exceeded(id, max_depth, &chain));
      }
      state.with.push(parameters);
      Ok(())
    })?;
    Ok(Self { container })
  }
}

impl Drop for ParameterFrame<'_> {
  fn drop(&mut self) {
    self.container.with_state(|state| {
      state.with.pop();
    });
  }
}
