use thiserror::Error;

/// The main error type for the `weft_ioc` library.
#[derive(Debug, Error)]
pub enum ContainerError {
  /// A target could not be constructed. `chain` holds the identifiers that were
  /// being built when the failure happened, outermost first.
  #[error("{message}")]
  BuildResolution {
    target: String,
    chain: Vec<String>,
    message: String,
  },

  #[error("Entry [{0}] not found in the container.")]
  EntryNotFound(String),

  #[error("[{0}] is aliased to itself.")]
  SelfAlias(String),

  #[error("{0}")]
  CallableNotFound(String),

  #[error("Value resolved for [{id}] is not a `{expected}`.")]
  TypeMismatch { id: String, expected: &'static str },

  /// A user-supplied factory, extender or method reported its own failure.
  #[error("{0}")]
  Factory(String),

  #[error("Failed to read configuration file: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  ConfigParse(String),

  #[error("Invalid configuration value for '{field}': {message}")]
  InvalidConfigValue { field: String, message: String },
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = ContainerError> = std::result::Result<T, E>;

impl ContainerError {
  /// Creates a `Factory` error from any displayable message.
  pub fn factory(message: impl Into<String>) -> Self {
    ContainerError::Factory(message.into())
  }

  pub(crate) fn not_instantiable(target: &str, chain: &[String]) -> Self {
    Self::build_failure(target, chain, format!("Target [{}] is not instantiable", target))
  }

  pub(crate) fn class_not_found(target: &str, chain: &[String]) -> Self {
    Self::build_failure(target, chain, format!("Target class [{}] does not exist", target))
  }

  /// `kind` is `class` for constructors and methods, `function` for closures
  /// and free functions.
  pub(crate) fn unresolvable_parameter(
    parameter: &str,
    kind: &str,
    owner: &str,
    chain: &[String],
  ) -> Self {
    ContainerError::BuildResolution {
      target: owner.to_string(),
      chain: chain.to_vec(),
      message: format!(
        "Unresolvable dependency resolving [{}] in {} {}",
        parameter, kind, owner
      ),
    }
  }

  pub(crate) fn depth_exceeded(target: &str, max_depth: usize, chain: &[String]) -> Self {
    ContainerError::BuildResolution {
      target: target.to_string(),
      chain: chain.to_vec(),
      message: format!(
        "Maximum build depth of {} exceeded while building [{}]",
        max_depth,
        chain.join(", ")
      ),
    }
  }

  fn build_failure(target: &str, chain: &[String], head: String) -> Self {
    let message = if chain.is_empty() {
      format!("{}.", head)
    } else {
      format!("{} while building [{}].", head, chain.join(", "))
    };
    ContainerError::BuildResolution {
      target: target.to_string(),
      chain: chain.to_vec(),
      message,
    }
  }

  /// Returns `true` for build-resolution failures.
  pub fn is_build_failure(&self) -> bool {
    matches!(self, ContainerError::BuildResolution { .. })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn not_instantiable_message_includes_chain_only_when_present() {
    let bare = ContainerError::not_instantiable("Contract", &[]);
    assert_eq!(bare.to_string(), "Target [Contract] is not instantiable.");

    let nested = ContainerError::not_instantiable(
      "Contract",
      &["Outer".to_string(), "Inner".to_string()],
    );
    assert_eq!(
      nested.to_string(),
      "Target [Contract] is not instantiable while building [Outer, Inner]."
    );
  }

  #[test]
  fn unresolvable_parameter_names_position_and_owner() {
    let err = ContainerError::unresolvable_parameter(
      "Parameter #0 [ <required> $first ]",
      "class",
      "MixedPrimitive",
      &[],
    );
    assert_eq!(
      err.to_string(),
      "Unresolvable dependency resolving [Parameter #0 [ <required> $first ]] in class MixedPrimitive"
    );
    assert!(err.is_build_failure());
  }
}
