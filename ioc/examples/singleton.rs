use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use weft_ioc::{value, Container, Result};

struct DatabasePool {
  id: usize,
}

static POOLS_CREATED: AtomicUsize = AtomicUsize::new(0);

fn main() -> Result<()> {
  let container = Container::new();

  // Shared: the factory runs once, on first resolution.
  container.singleton("db.pool", |_, _| {
    let id = POOLS_CREATED.fetch_add(1, Ordering::SeqCst) + 1;
    println!("Creating database pool #{}", id);
    Ok(value(DatabasePool { id }))
  })?;

  // Transient: a fresh value on every resolution.
  container.bind("request.id", |_, _| Ok(value(POOLS_CREATED.load(Ordering::SeqCst))))?;

  let first = container.make_as::<DatabasePool>("db.pool")?;
  let second = container.make_as::<DatabasePool>("db.pool")?;
  println!("Resolved pools #{} and #{}", first.id, second.id);
  assert!(Arc::ptr_eq(&first, &second));

  let a = container.make("request.id")?;
  let b = container.make("request.id")?;
  assert!(!Arc::ptr_eq(&a, &b));

  // Decorate the cached pool in place.
  container.extend("db.pool", |pool, _| {
    println!("Extending the already-created pool");
    Ok(pool)
  })?;
  assert_eq!(POOLS_CREATED.load(Ordering::SeqCst), 1);
  Ok(())
}
