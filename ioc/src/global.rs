//! The ambient "current" container and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

// The process-wide slot. Empty until first accessed or explicitly set.
static CURRENT: Lazy<RwLock<Option<Arc<Container>>>> = Lazy::new(|| RwLock::new(None));

impl Container {
  /// Returns the current container, creating an empty one if the slot is empty.
  pub fn get_instance() -> Arc<Container> {
    if let Some(current) = CURRENT.read().as_ref() {
      return current.clone();
    }
    let mut slot = CURRENT.write();
    slot
      .get_or_insert_with(|| {
        debug!("Creating ambient container");
        Arc::new(Container::new())
      })
      .clone()
  }

  /// Replaces the current container and returns the previous one. Passing `None`
  /// clears the slot, so the next `get_instance` starts fresh.
  pub fn set_instance(container: Option<Arc<Container>>) -> Option<Arc<Container>> {
    std::mem::replace(&mut *CURRENT.write(), container)
  }
}

/// Shorthand for [`Container::get_instance`].
///
/// # Examples
///
/// ```
/// use weft_ioc::{global, value};
///
/// global().instance("app.name", value("weft")).unwrap();
/// let name = global().make_as::<&str>("app.name").unwrap();
/// assert_eq!(*name, "weft");
/// ```
pub fn global() -> Arc<Container> {
  Container::get_instance()
}
