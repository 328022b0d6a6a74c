mod common;

use common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use weft_ioc::{value, CallTarget, Callable, ContainerError, Parameter, Parameters, Signature, Value};

fn values(result: &Value) -> Arc<Vec<Value>> {
  cast::<Vec<Value>>(result)
}

fn injecting_closure() -> Callable {
  Callable::new(
    Signature::new()
      .param(Parameter::of::<ConcreteStub>("stub"))
      .param(Parameter::new("default").with_default(String::from("taylor"))),
    |args| Ok(value(args.all())),
  )
}

#[test]
fn test_call_with_dependencies() {
  let container = container();
  let result = container.call(injecting_closure(), Parameters::new(), None).unwrap();
  let result = values(&result);

  assert!(is::<ConcreteStub>(&result[0]));
  assert_eq!(*cast::<String>(&result[1]), "taylor");
}

#[test]
fn test_named_parameters_take_precedence() {
  let container = container();
  let stub = value(ConcreteStub);
  let result = container
    .call(
      injecting_closure(),
      Parameters::new()
        .with_value("stub", stub.clone())
        .with("default", String::from("otwell")),
      None,
    )
    .unwrap();
  let result = values(&result);

  assert!(Arc::ptr_eq(&result[0], &stub));
  assert_eq!(*cast::<String>(&result[1]), "otwell");
}

#[test]
fn test_call_with_at_sign_based_class_references() {
  let container = container();
  let result = container.call("TestCallStub@inject", Parameters::new(), None).unwrap();
  let result = values(&result);

  assert!(is::<ConcreteStub>(&result[0]));
  assert_eq!(*cast::<String>(&result[1]), "taylor");
}

#[test]
fn test_positional_values_are_passed_through() {
  let container = container();
  let result = container
    .call("TestCallStub@work", Parameters::new().push("foo").push("bar"), None)
    .unwrap();
  let result = values(&result);

  assert_eq!(result.len(), 2);
  assert_eq!(*cast::<&str>(&result[0]), "foo");
  assert_eq!(*cast::<&str>(&result[1]), "bar");
}

#[test]
fn test_call_with_default_method() {
  let container = container();
  let result = container
    .call("TestCallStub", Parameters::new().push("foo"), Some("work"))
    .unwrap();

  assert_eq!(values(&result).len(), 1);
}

#[test]
fn test_empty_method_uses_default_method() {
  let container = container();
  let result = container
    .call("TestCallStub@", Parameters::new(), Some("inject"))
    .unwrap();

  assert_eq!(values(&result).len(), 2);
}

#[test]
fn test_empty_method_without_default_fails() {
  let container = container();
  let err = container.call("TestCallStub@", Parameters::new(), None).unwrap_err();

  assert!(matches!(err, ContainerError::CallableNotFound(_)));
  assert_eq!(err.to_string(), "Method not provided.");
}

#[test]
fn test_call_with_static_method_name_string() {
  let container = container();
  let result = container
    .call("TestCallStub::inject_static", Parameters::new(), None)
    .unwrap();
  let result = values(&result);

  assert!(is::<ConcreteStub>(&result[0]));
  assert_eq!(*cast::<String>(&result[1]), "taylor");
}

#[test]
fn test_instance_methods_are_not_static() {
  let container = container();
  let err = container.call("TestCallStub::work", Parameters::new(), None).unwrap_err();

  assert_eq!(err.to_string(), "Method TestCallStub::work() does not exist");
}

#[test]
fn test_call_on_a_resolved_value() {
  let container = container();
  let target = container.make("TestCallStub").unwrap();
  let result = container
    .call(CallTarget::method(target, "inject"), Parameters::new(), None)
    .unwrap();

  assert_eq!(values(&result).len(), 2);
}

#[test]
fn test_missing_method_fails() {
  let container = container();
  let err = container.call("TestCallStub@missing", Parameters::new(), None).unwrap_err();

  assert_eq!(err.to_string(), "Method TestCallStub::missing() does not exist");
}

#[test]
fn test_unresolvable_method_parameter_names_position() {
  let container = container();
  let err = container
    .call("TestCallStub@unresolvable", Parameters::new(), None)
    .unwrap_err();

  assert!(err.is_build_failure());
  assert_eq!(
    err.to_string(),
    "Unresolvable dependency resolving [Parameter #0 [ <required> $foo ]] in class TestCallStub"
  );
}

#[test]
fn test_partially_supplied_parameters_report_the_missing_one() {
  let container = container();
  let err = container
    .call("TestCallStub@unresolvable", Parameters::new().with("foo", 1_i32), None)
    .unwrap_err();

  assert_eq!(
    err.to_string(),
    "Unresolvable dependency resolving [Parameter #1 [ <required> $bar ]] in class TestCallStub"
  );
}

#[test]
fn test_positional_values_fill_untyped_parameters() {
  let container = container();
  let result = container
    .call(
      "TestCallStub@unresolvable",
      Parameters::new().with("bar", "named").push("positional"),
      None,
    )
    .unwrap();
  let result = values(&result);

  assert_eq!(*cast::<&str>(&result[0]), "positional");
  assert_eq!(*cast::<&str>(&result[1]), "named");
}

#[test]
fn test_variadic_parameter_collects_remaining_values() {
  let container = container();
  let result = container
    .call("TestCallStub@collect", Parameters::new().push(1_i32).push(2_i32).push(3_i32), None)
    .unwrap();
  let result = values(&result);

  assert_eq!(*cast::<i32>(&result[0]), 1);
  let rest = cast::<Vec<Value>>(&result[1]);
  assert_eq!(rest.len(), 2);
  assert_eq!(*cast::<i32>(&rest[1]), 3);
}

#[test]
fn test_unresolvable_closure_parameter() {
  let container = container();
  let closure = Callable::new(Signature::new().param(Parameter::new("name")), |args| {
    args.value("name")
  });
  let err = container.call(closure, Parameters::new(), None).unwrap_err();

  assert_eq!(
    err.to_string(),
    "Unresolvable dependency resolving [Parameter #0 [ <required> $name ]] in function {closure}"
  );
}

#[test]
fn test_call_registered_function() {
  let container = container();
  container.reflector().register_function(
    "greet",
    Callable::new(
      Signature::new().param(Parameter::new("name").with_default("world")),
      |args| Ok(value(format!("hello {}", args.get::<&str>("name")?))),
    ),
  );

  let greeting = container.call("greet", Parameters::new(), None).unwrap();
  assert_eq!(*cast::<String>(&greeting), "hello world");
}

#[test]
fn test_call_unknown_function() {
  let container = container();
  let err = container.call("nope", Parameters::new(), None).unwrap_err();

  assert_eq!(err.to_string(), "Function nope() does not exist");
}

#[test]
fn test_bound_method_intercepts_the_call() {
  let container = container();
  container.bind_method("TestCallStub@unresolvable", |instance, _| {
    assert!(is::<TestCallStub>(instance));
    Ok(value("intercepted"))
  });

  assert!(container.has_method_binding("TestCallStub@unresolvable"));
  let result = container
    .call("TestCallStub@unresolvable", Parameters::new(), None)
    .unwrap();
  assert_eq!(*cast::<&str>(&result), "intercepted");
}

#[test]
fn test_bound_method_accepts_static_syntax_and_missing_methods() {
  let container = container();
  container.bind_method("TestCallStub::absent", |_, _| Ok(value(42_u32)));

  assert!(container.has_method_binding("TestCallStub@absent"));
  let target = container.make("TestCallStub").unwrap();
  let result = container.call((target.clone(), "absent"), Parameters::new(), None).unwrap();
  assert_eq!(*cast::<u32>(&result), 42);
  assert_eq!(
    *cast::<u32>(&container.call_method_binding("TestCallStub@absent", &target).unwrap()),
    42
  );
}

#[test]
fn test_method_bindings_survive_flush() {
  let container = container();
  container.bind_method("TestCallStub@work", |_, _| Ok(value(())));
  container.flush();

  assert!(container.has_method_binding("TestCallStub@work"));
}

#[test]
fn test_wrap_defers_the_call() {
  let container = container();
  let wrapped = container.wrap(CallTarget::from("TestCallStub@work"), Parameters::new().push(7_i32));

  let result = wrapped().unwrap();
  assert_eq!(*cast::<i32>(&values(&result)[0]), 7);
}
