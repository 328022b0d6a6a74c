//! Public macros for ergonomic service resolution.

/// Resolves a service from the current container and downcasts it.
///
/// `resolve!(Type)` looks `Type` up under its [`Injectable::class_name`];
/// `resolve!(Type, "id")` looks it up under an explicit identifier.
///
/// # Panics
///
/// Panics if the service cannot be resolved or is not a `Type`. For a
/// non-panicking version, use `global().make_as::<Type>(..)` directly.
///
/// # Examples
///
/// ```
/// use weft_ioc::{global, resolve, value};
///
/// global().singleton("greeting", |_, _| Ok(value(String::from("hello")))).unwrap();
///
/// let message = resolve!(String, "greeting");
/// assert_eq!(*message, "hello");
/// ```
///
/// [`Injectable::class_name`]: crate::Injectable::class_name
#[macro_export]
macro_rules! resolve {
  ($type:ty) => {
    $crate::resolve!($type, <$type as $crate::Injectable>::class_name())
  };

  ($type:ty, $id:expr) => {{
    let id: &str = $id;
    $crate::Container::get_instance()
      .make_as::<$type>(id)
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required service '{}' as {}: {}",
          id,
          std::any::type_name::<$type>(),
          err
        )
      })
  }};
}
