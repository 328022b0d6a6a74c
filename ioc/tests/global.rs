use serial_test::serial;
use std::sync::Arc;
use weft_ioc::{global, resolve, value, Arguments, Container, Injectable, Parameter, Result, Signature};

// --- Test Fixtures ---

struct AppConfig {
  database_url: String,
}

impl Injectable for AppConfig {
  fn class_name() -> &'static str {
    "global.AppConfig"
  }

  fn signature() -> Signature {
    Signature::new().param(Parameter::new("database_url").with_default(String::from("postgres://localhost/app")))
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(AppConfig {
      database_url: (*args.get::<String>("database_url")?).clone(),
    })
  }
}

struct UserService {
  config: Arc<AppConfig>,
}

impl Injectable for UserService {
  fn class_name() -> &'static str {
    "global.UserService"
  }

  fn signature() -> Signature {
    Signature::new().param(Parameter::of::<AppConfig>("config"))
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(UserService {
      config: args.get("config")?,
    })
  }
}

/// Installs a fresh current container with the fixtures registered.
fn fresh() -> Arc<Container> {
  let container = Arc::new(Container::new());
  container.register::<AppConfig>();
  container.register::<UserService>();
  Container::set_instance(Some(container.clone()));
  container
}

// --- Current Instance ---

#[test]
#[serial]
fn test_get_instance_creates_once() {
  Container::set_instance(None);

  let first = Container::get_instance();
  let second = Container::get_instance();
  assert!(Arc::ptr_eq(&first, &second));
  assert!(Arc::ptr_eq(&first, &global()));
}

#[test]
#[serial]
fn test_set_instance_replaces_and_returns_previous() {
  let previous = fresh();
  let replacement = Arc::new(Container::new());

  let returned = Container::set_instance(Some(replacement.clone())).unwrap();
  assert!(Arc::ptr_eq(&returned, &previous));
  assert!(Arc::ptr_eq(&global(), &replacement));
}

#[test]
#[serial]
fn test_clearing_the_slot_forces_a_new_container() {
  let previous = fresh();
  previous.instance("marker", value(1_u8)).unwrap();

  Container::set_instance(None);
  let current = global();
  assert!(!Arc::ptr_eq(&current, &previous));
  assert!(!current.bound("marker"));
}

// --- Macros ---

#[test]
#[serial]
fn test_resolve_by_class_name() {
  fresh();
  global().singleton_self(AppConfig::class_name()).unwrap();

  let service = resolve!(UserService);
  let config = resolve!(AppConfig);

  assert_eq!(service.config.database_url, "postgres://localhost/app");
  assert!(Arc::ptr_eq(&service.config, &config));
}

#[test]
#[serial]
fn test_resolve_by_identifier() {
  fresh();
  global()
    .singleton("test_config_named", |_, _| {
      Ok(value(AppConfig {
        database_url: String::from("mysql://db"),
      }))
    })
    .unwrap();

  let config = resolve!(AppConfig, "test_config_named");
  assert_eq!(config.database_url, "mysql://db");
}

#[test]
#[serial]
fn test_factories_can_use_the_macro() {
  fresh();
  global()
    .bind("greeting", |_, _| Ok(value(String::from("Hello, World!"))))
    .unwrap();
  global()
    .bind("shout", |_, _| {
      let greeting = resolve!(String, "greeting");
      Ok(value(greeting.to_uppercase()))
    })
    .unwrap();

  assert_eq!(*resolve!(String, "shout"), "HELLO, WORLD!");
}

#[test]
#[serial]
#[should_panic(expected = "Failed to resolve required service 'non_existent_service'")]
fn test_resolve_panics_when_missing() {
  fresh();
  let _ = resolve!(String, "non_existent_service");
}

#[test]
#[serial]
#[should_panic(expected = "as alloc::string::String")]
fn test_resolve_panics_on_wrong_type() {
  fresh();
  global().instance("number", value(5_u32)).unwrap();
  let _ = resolve!(String, "number");
}
