use weft_ioc::{global, value, Container, ContainerError};

// A function that configures dependencies and runs some logic.
// By accepting a `&Container`, it can be tested with a controlled environment.
fn process_data(container: &Container) -> Result<String, ContainerError> {
  // Register a data source ONLY within the scope of this container.
  container.instance("source.data", value(String::from("test data")))?;

  let data = container.make_as::<String>("source.data")?;
  Ok(format!("Processed: {}", data.to_uppercase()))
}

fn main() -> Result<(), ContainerError> {
  println!("--- Running with a local container ---");
  let test_container = Container::new();
  let result = process_data(&test_container)?;

  println!("Result: {}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // --- Verify Isolation ---
  // The service registered in `test_container` should NOT exist in the current one.
  match global().get("source.data") {
    Err(ContainerError::EntryNotFound(id)) => println!("\n[{}] did not leak into the current container.", id),
    other => panic!("Dependency should not have leaked into the current container: {:?}", other.is_ok()),
  }
  Ok(())
}
