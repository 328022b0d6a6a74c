use std::panic;
use weft_ioc::{global, resolve, ContainerError};

fn main() {
  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!(String, "unregistered.service");
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `get()` and `make()` ---
  println!("\nNow, attempting to resolve using the fallible `get()` method...");

  match global().get("unregistered.service") {
    Err(ContainerError::EntryNotFound(_)) => println!("Correctly received EntryNotFound for the missing service."),
    _ => panic!("Should not have found the service!"),
  }

  // `make` treats an unknown identifier as a class name and reports a build failure.
  let err = global().make("unregistered.service").unwrap_err();
  assert!(err.is_build_failure());
  println!("make() reported: {}", err);
}
