//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use weft_ioc::{
  downcast, value, Arguments, ClassBuilder, Container, ContainerConfig, Injectable, Parameter, Reflector, Result, Signature, Value,
};

pub const CONTRACT: &str = "IContractStub";

// --- Test Fixtures ---

#[derive(Debug)]
pub struct ConcreteStub;

impl Injectable for ConcreteStub {
  fn class_name() -> &'static str {
    "ConcreteStub"
  }

  fn construct(_args: &Arguments) -> Result<Self> {
    Ok(ConcreteStub)
  }
}

#[derive(Debug)]
pub struct ImplementationStub;

impl Injectable for ImplementationStub {
  fn class_name() -> &'static str {
    "ImplementationStub"
  }

  fn construct(_args: &Arguments) -> Result<Self> {
    Ok(ImplementationStub)
  }

  fn describe(class: ClassBuilder) -> ClassBuilder {
    class.implements(CONTRACT)
  }
}

#[derive(Debug)]
pub struct ImplementationStubTwo;

impl Injectable for ImplementationStubTwo {
  fn class_name() -> &'static str {
    "ImplementationStubTwo"
  }

  fn construct(_args: &Arguments) -> Result<Self> {
    Ok(ImplementationStubTwo)
  }

  fn describe(class: ClassBuilder) -> ClassBuilder {
    class.implements(CONTRACT)
  }
}

/// Depends on the contract interface.
pub struct DependentStub {
  pub implementation: Value,
}

impl Injectable for DependentStub {
  fn class_name() -> &'static str {
    "DependentStub"
  }

  fn signature() -> Signature {
    Signature::new().param(Parameter::new("impl").typed(CONTRACT))
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(DependentStub {
      implementation: args.value("impl")?,
    })
  }
}

pub struct NestedDependentStub {
  pub inner: Arc<DependentStub>,
}

impl Injectable for NestedDependentStub {
  fn class_name() -> &'static str {
    "NestedDependentStub"
  }

  fn signature() -> Signature {
    Signature::new().param(Parameter::of::<DependentStub>("inner"))
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(NestedDependentStub {
      inner: args.get("inner")?,
    })
  }
}

pub struct DefaultValueStub {
  pub stub: Arc<ConcreteStub>,
  pub default: String,
}

impl Injectable for DefaultValueStub {
  fn class_name() -> &'static str {
    "DefaultValueStub"
  }

  fn signature() -> Signature {
    Signature::new()
      .param(Parameter::of::<ConcreteStub>("stub"))
      .param(Parameter::new("default").with_default(String::from("taylor")))
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(DefaultValueStub {
      stub: args.get("stub")?,
      default: (*args.get::<String>("default")?).clone(),
    })
  }
}

pub struct MixedPrimitiveStub {
  pub first: i32,
  pub stub: Arc<ConcreteStub>,
  pub last: i32,
}

impl Injectable for MixedPrimitiveStub {
  fn class_name() -> &'static str {
    "MixedPrimitiveStub"
  }

  fn signature() -> Signature {
    Signature::new()
      .param(Parameter::new("first"))
      .param(Parameter::of::<ConcreteStub>("stub"))
      .param(Parameter::new("last"))
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(MixedPrimitiveStub {
      first: *args.get::<i32>("first")?,
      stub: args.get("stub")?,
      last: *args.get::<i32>("last")?,
    })
  }
}

pub struct InjectVariableStub {
  pub something: Value,
}

impl Injectable for InjectVariableStub {
  fn class_name() -> &'static str {
    "InjectVariableStub"
  }

  fn signature() -> Signature {
    Signature::new()
      .param(Parameter::of::<ConcreteStub>("concrete"))
      .param(Parameter::new("something"))
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(InjectVariableStub {
      something: args.value("something")?,
    })
  }
}

/// A contract dependency whose resolution may fail, with a fallback default.
pub struct OptionalContractStub {
  pub implementation: Value,
}

impl Injectable for OptionalContractStub {
  fn class_name() -> &'static str {
    "OptionalContractStub"
  }

  fn signature() -> Signature {
    Signature::new().param(
      Parameter::new("impl")
        .typed(CONTRACT)
        .with_default(String::from("fallback")),
    )
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(OptionalContractStub {
      implementation: args.value("impl")?,
    })
  }
}

pub struct VariadicStub {
  pub items: Arc<Vec<Value>>,
}

impl Injectable for VariadicStub {
  fn class_name() -> &'static str {
    "VariadicStub"
  }

  fn signature() -> Signature {
    Signature::new().param(Parameter::new("items").variadic())
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(VariadicStub {
      items: args.variadic("items")?,
    })
  }
}

macro_rules! context_consumer {
  ($name:ident) => {
    pub struct $name {
      pub implementation: Value,
    }

    impl Injectable for $name {
      fn class_name() -> &'static str {
        stringify!($name)
      }

      fn signature() -> Signature {
        Signature::new().param(Parameter::new("impl").typed(CONTRACT))
      }

      fn construct(args: &Arguments) -> Result<Self> {
        Ok($name {
          implementation: args.value("impl")?,
        })
      }
    }
  };
}

context_consumer!(ContextInjectOne);
context_consumer!(ContextInjectTwo);
context_consumer!(ContextInjectThree);

/// Two classes that require each other.
pub struct CircularA;
pub struct CircularB;

impl Injectable for CircularA {
  fn class_name() -> &'static str {
    "CircularA"
  }

  fn signature() -> Signature {
    Signature::new().param(Parameter::of::<CircularB>("b"))
  }

  fn construct(_args: &Arguments) -> Result<Self> {
    Ok(CircularA)
  }
}

impl Injectable for CircularB {
  fn class_name() -> &'static str {
    "CircularB"
  }

  fn signature() -> Signature {
    Signature::new().param(Parameter::of::<CircularA>("a"))
  }

  fn construct(_args: &Arguments) -> Result<Self> {
    Ok(CircularB)
  }
}

/// Exposes instance and static methods for the bound-method invoker.
pub struct TestCallStub;

impl Injectable for TestCallStub {
  fn class_name() -> &'static str {
    "TestCallStub"
  }

  fn construct(_args: &Arguments) -> Result<Self> {
    Ok(TestCallStub)
  }

  fn describe(class: ClassBuilder) -> ClassBuilder {
    class
      .method::<TestCallStub, _>("work", Signature::new(), |_this, args| Ok(value(args.all())))
      .method::<TestCallStub, _>(
        "inject",
        Signature::new()
          .param(Parameter::of::<ConcreteStub>("stub"))
          .param(Parameter::new("default").with_default(String::from("taylor"))),
        |_this, args| Ok(value(args.all())),
      )
      .method::<TestCallStub, _>(
        "unresolvable",
        Signature::new().param(Parameter::new("foo")).param(Parameter::new("bar")),
        |_this, args| Ok(value(args.all())),
      )
      .method::<TestCallStub, _>(
        "collect",
        Signature::new().param(Parameter::new("first")).param(Parameter::new("rest").variadic()),
        |_this, args| Ok(value(args.all())),
      )
      .static_method(
        "inject_static",
        Signature::new()
          .param(Parameter::of::<ConcreteStub>("stub"))
          .param(Parameter::new("default").with_default(String::from("taylor"))),
        |args| Ok(value(args.all())),
      )
  }
}

// --- Helpers ---

/// A container with its own class catalog holding every fixture.
pub fn container() -> Container {
  container_with(ContainerConfig::default())
}

pub fn container_with(config: ContainerConfig) -> Container {
  Container::with_config(config).with_reflector(reflector())
}

/// A fresh class catalog holding every fixture.
pub fn reflector() -> Arc<Reflector> {
  let reflector = Arc::new(Reflector::new());
  reflector.register_interface(CONTRACT);
  reflector.register::<ConcreteStub>();
  reflector.register::<ImplementationStub>();
  reflector.register::<ImplementationStubTwo>();
  reflector.register::<DependentStub>();
  reflector.register::<NestedDependentStub>();
  reflector.register::<DefaultValueStub>();
  reflector.register::<MixedPrimitiveStub>();
  reflector.register::<InjectVariableStub>();
  reflector.register::<OptionalContractStub>();
  reflector.register::<VariadicStub>();
  reflector.register::<ContextInjectOne>();
  reflector.register::<ContextInjectTwo>();
  reflector.register::<ContextInjectThree>();
  reflector.register::<CircularA>();
  reflector.register::<CircularB>();
  reflector.register::<TestCallStub>();
  reflector
}

/// Whether `value` holds a `T`.
pub fn is<T: Send + Sync + 'static>(value: &Value) -> bool {
  downcast::<T>(value).is_some()
}

/// Downcasts a value the test expects to hold a `T`.
pub fn cast<T: Send + Sync + 'static>(value: &Value) -> Arc<T> {
  downcast::<T>(value).unwrap_or_else(|| panic!("expected a {}", std::any::type_name::<T>()))
}
