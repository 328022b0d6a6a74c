//! # Weft IoC
//!
//! A reflective, context-aware Inversion of Control (IoC) container for Rust.
//!
//! Services are registered under string identifiers and resolved on demand. Classes
//! describe their constructor once, as an explicit [`Signature`], and the container
//! builds whole object graphs from those descriptions.
//!
//! ## Core Concepts
//!
//! - **Container**: maps identifiers to factories, classes or cached instances.
//! - **Reflector**: the catalog of class and method signatures that replaces runtime
//!   reflection. Types opt in by implementing [`Injectable`].
//! - **Contextual bindings**: `when(consumer).needs(dependency).give(..)` changes what
//!   one consumer receives without touching anyone else.
//! - **Extenders and callbacks**: decorate values after they are built and observe
//!   resolutions and re-registrations.
//! - **Bound methods**: [`Container::call`] invokes closures and methods, injecting
//!   their parameters.
//! - **Current container**: a process-wide slot reached through [`global()`] and the
//!   [`resolve!`] macro.
//!
//! ## Quick Start
//!
//! ```
//! use weft_ioc::{Arguments, Container, Injectable, Parameter, Result, Signature};
//!
//! struct Clock;
//!
//! impl Injectable for Clock {
//!   fn class_name() -> &'static str {
//!     "quickstart.Clock"
//!   }
//!
//!   fn construct(_args: &Arguments) -> Result<Self> {
//!     Ok(Clock)
//!   }
//! }
//!
//! struct Scheduler {
//!   clock: std::sync::Arc<Clock>,
//!   tick_ms: u64,
//! }
//!
//! impl Injectable for Scheduler {
//!   fn class_name() -> &'static str {
//!     "quickstart.Scheduler"
//!   }
//!
//!   fn signature() -> Signature {
//!     Signature::new()
//!       .param(Parameter::of::<Clock>("clock"))
//!       .param(Parameter::new("tick_ms").with_default(100_u64))
//!   }
//!
//!   fn construct(args: &Arguments) -> Result<Self> {
//!     Ok(Scheduler {
//!       clock: args.get::<Clock>("clock")?,
//!       tick_ms: *args.get::<u64>("tick_ms")?,
//!     })
//!   }
//! }
//!
//! let container = Container::new();
//! container.register::<Clock>();
//! container.register::<Scheduler>();
//! container.singleton_self(Clock::class_name()).unwrap();
//!
//! let first = container.make_as::<Scheduler>(Scheduler::class_name()).unwrap();
//! let second = container.make_as::<Scheduler>(Scheduler::class_name()).unwrap();
//!
//! assert_eq!(first.tick_ms, 100);
//! assert!(std::sync::Arc::ptr_eq(&first.clock, &second.clock));
//! assert!(!std::sync::Arc::ptr_eq(&first, &second));
//! ```

mod binding;
mod bound_method;
mod config;
mod container;
mod contextual;
mod core;
mod error;
mod events;
mod extension;
mod global;
mod macros;
mod reflector;
mod value;

pub use binding::{Binding, Concrete, Factory};
pub use bound_method::{CallTarget, MethodBinding, MethodKey};
pub use config::ContainerConfig;
pub use container::Container;
pub use contextual::{ContextualBindingBuilder, ContextualNeeds, Given, VARIABLE_PREFIX};
pub use error::{ContainerError, Result};
pub use events::{RebindingCallback, ResolvingCallback};
pub use extension::Extender;
pub use global::global;
pub use reflector::{
  Callable, ClassBuilder, ClassKind, ClassMeta, Constructor, Injectable, MethodMeta, Parameter, Reflector,
  Signature,
};
pub use value::{downcast, value, Arguments, Parameters, Value};
