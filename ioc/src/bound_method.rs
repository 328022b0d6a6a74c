//! Invoking closures, functions and methods with injected arguments.

use crate::container::Container;
use crate::error::{ContainerError, Result};
use crate::reflector::{Callable, MethodMeta, Signature};
use crate::value::{Arguments, Parameters, Value};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Replaces a method call entirely: receives the resolved target and the container.
pub type MethodBinding = Arc<dyn Fn(&Value, &Container) -> Result<Value> + Send + Sync>;

const CLASS_METHOD_SEPARATOR: char = '@';
const STATIC_SEPARATOR: &str = "::";

/// The `Class@method` key under which method bindings are stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodKey(String);

impl MethodKey {
  pub fn new(class: &str, method: &str) -> Self {
    MethodKey(format!("{}{}{}", class, CLASS_METHOD_SEPARATOR, method))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for MethodKey {
  /// Accepts both `Class@method` and `Class::method`.
  fn from(key: &str) -> Self {
    match key.split_once(STATIC_SEPARATOR) {
      Some((class, method)) => MethodKey::new(class, method),
      None => MethodKey(key.to_string()),
    }
  }
}

impl From<(&str, &str)> for MethodKey {
  fn from((class, method): (&str, &str)) -> Self {
    MethodKey::new(class, method)
  }
}

impl fmt::Display for MethodKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Something `Container::call` can invoke.
#[derive(Clone)]
pub enum CallTarget {
  /// A closure with a declared signature.
  Closure(Callable),
  /// A method on an already resolved value.
  Method { target: Value, method: String },
  /// `Class@method`: the class is resolved through the container first. An empty
  /// method falls back to the caller's default method.
  ClassMethod { class: String, method: String },
  /// `Class::method`: a static method.
  Static { class: String, method: String },
  /// A free function registered in the reflector.
  Function(String),
}

impl CallTarget {
  /// Parses `Class::method`, `Class@method` or a bare function name.
  pub fn parse(target: &str) -> Self {
    if let Some((class, method)) = target.split_once(STATIC_SEPARATOR) {
      return CallTarget::Static {
        class: class.to_string(),
        method: method.to_string(),
      };
    }
    match target.split_once(CLASS_METHOD_SEPARATOR) {
      Some((class, method)) => CallTarget::ClassMethod {
        class: class.to_string(),
        method: method.to_string(),
      },
      None => CallTarget::Function(target.to_string()),
    }
  }

  pub fn method(target: Value, method: impl Into<String>) -> Self {
    CallTarget::Method {
      target,
      method: method.into(),
    }
  }
}

impl From<&str> for CallTarget {
  fn from(target: &str) -> Self {
    CallTarget::parse(target)
  }
}

impl From<Callable> for CallTarget {
  fn from(callable: Callable) -> Self {
    CallTarget::Closure(callable)
  }
}

impl From<(Value, &str)> for CallTarget {
  fn from((target, method): (Value, &str)) -> Self {
    CallTarget::method(target, method)
  }
}

impl fmt::Debug for CallTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CallTarget::Closure(callable) => f.debug_tuple("Closure").field(callable).finish(),
      CallTarget::Method { method, .. } => f
        .debug_struct("Method")
        .field("method", method)
        .finish_non_exhaustive(),
      CallTarget::ClassMethod { class, method } => write!(f, "{}@{}", class, method),
      CallTarget::Static { class, method } => write!(f, "{}::{}", class, method),
      CallTarget::Function(name) => f.debug_tuple("Function").field(name).finish(),
    }
  }
}

pub(crate) fn call(
  container: &Container,
  target: CallTarget,
  parameters: Parameters,
  default_method: Option<&str>,
) -> Result<Value> {
  trace!(?target, ?parameters, "Calling");
  match target {
    CallTarget::Closure(callable) => {
      let args = resolve_arguments(container, callable.signature(), parameters, "function", "{closure}")?;
      callable.invoke(&args)
    }
    CallTarget::Function(name) => match default_method {
      Some(method) => call_class(container, &name, method, parameters),
      None => {
        let function = container
          .reflector()
          .function(&name)
          .ok_or_else(|| ContainerError::CallableNotFound(format!("Function {}() does not exist", name)))?;
        let args = resolve_arguments(container, function.signature(), parameters, "function", &name)?;
        function.invoke(&args)
      }
    },
    CallTarget::ClassMethod { class, method } => {
      let method = match (method.is_empty(), default_method) {
        (false, _) => method,
        (true, Some(default)) => default.to_string(),
        (true, None) => return Err(ContainerError::CallableNotFound("Method not provided.".to_string())),
      };
      call_class(container, &class, &method, parameters)
    }
    CallTarget::Static { class, method } => {
      let meta = container
        .reflector()
        .class(&class)
        .ok_or_else(|| method_not_found(&class, &method))?;
      let static_method = meta
        .method(&method)
        .filter(|candidate| candidate.is_static())
        .ok_or_else(|| method_not_found(&class, &method))?;
      invoke_method(container, &class, static_method, None, parameters)
    }
    CallTarget::Method { target, method } => call_bound_method(container, &target, &method, parameters),
  }
}

fn call_class(container: &Container, class: &str, method: &str, parameters: Parameters) -> Result<Value> {
  let instance = container.make(class)?;
  call_bound_method(container, &instance, method, parameters)
}

/// A registered method binding wins over the method itself, which need not exist.
fn call_bound_method(container: &Container, target: &Value, method: &str, parameters: Parameters) -> Result<Value> {
  let meta = container
    .reflector()
    .class_of_value(target)
    .ok_or_else(|| ContainerError::CallableNotFound(format!("Method {}() called on an unregistered class", method)))?;
  let key = MethodKey::new(meta.name(), method);
  if container.has_method_binding(key.as_str()) {
    return container.call_method_binding(key.as_str(), target);
  }
  let bound = meta
    .method(method)
    .ok_or_else(|| method_not_found(meta.name(), method))?;
  invoke_method(container, meta.name(), bound, Some(target), parameters)
}

fn invoke_method(
  container: &Container,
  class: &str,
  method: &MethodMeta,
  receiver: Option<&Value>,
  parameters: Parameters,
) -> Result<Value> {
  let args = resolve_arguments(container, method.signature(), parameters, "class", class)?;
  trace!(class = %class, method = %method.name(), ?args, "Invoking method");
  method.invoke(receiver, &args)
}

fn method_not_found(class: &str, method: &str) -> ContainerError {
  ContainerError::CallableNotFound(format!("Method {}::{}() does not exist", class, method))
}

/// Matches each formal parameter against, in order: a named parameter, the
/// container (for typed parameters), the declared default, the remaining
/// positional values (variadic), and the next positional value. Positional
/// values left over are passed along as extra arguments.
fn resolve_arguments(
  container: &Container,
  signature: &Signature,
  parameters: Parameters,
  kind: &str,
  owner: &str,
) -> Result<Arguments> {
  let (mut named, positional) = parameters.into_parts();
  let mut positional: VecDeque<Value> = positional.into();
  let mut entries = Vec::with_capacity(signature.len());

  for (position, parameter) in signature.parameters().iter().enumerate() {
    let value = if let Some(value) = named.remove(parameter.name()) {
      value
    } else if let Some(class) = parameter.class() {
      match container.make(class) {
        Ok(value) => value,
        Err(err) if err.is_build_failure() && parameter.has_default() => match parameter.default_value() {
          Some(default) => default.clone(),
          None => return Err(err),
        },
        Err(err) => return Err(err),
      }
    } else if let Some(default) = parameter.default_value() {
      default.clone()
    } else if parameter.is_variadic() {
      let rest: Vec<Value> = positional.drain(..).collect();
      Arc::new(rest)
    } else if let Some(value) = positional.pop_front() {
      value
    } else {
      return Err(ContainerError::unresolvable_parameter(
        &parameter.describe(position),
        kind,
        owner,
        &container.build_stack(),
      ));
    };
    entries.push((parameter.name().to_string(), value));
  }

  Ok(Arguments::new(entries, positional.into()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn targets_parse_by_separator() {
    assert!(matches!(
      CallTarget::parse("Mailer::boot"),
      CallTarget::Static { class, method } if class == "Mailer" && method == "boot"
    ));
    assert!(matches!(
      CallTarget::parse("Mailer@send"),
      CallTarget::ClassMethod { class, method } if class == "Mailer" && method == "send"
    ));
    assert!(matches!(
      CallTarget::parse("Mailer@"),
      CallTarget::ClassMethod { method, .. } if method.is_empty()
    ));
    assert!(matches!(CallTarget::parse("strlen"), CallTarget::Function(name) if name == "strlen"));
  }

  #[test]
  fn method_keys_normalize_static_syntax() {
    assert_eq!(MethodKey::from("Mailer::send").as_str(), "Mailer@send");
    assert_eq!(MethodKey::from("Mailer@send"), MethodKey::from(("Mailer", "send")));
  }
}
