//! The class catalog: explicit constructor and method signatures standing in for
//! runtime reflection.
//!
//! A class is described once, when it is registered, and the resulting
//! [`ClassMeta`] is cached and shared by every container that uses the catalog.

use crate::error::{ContainerError, Result};
use crate::value::{Arguments, Value};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::{type_name, Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Body of a constructor, closure or free function.
pub type InvokeFn = Arc<dyn Fn(&Arguments) -> Result<Value> + Send + Sync>;

/// Body of a method. Instance methods receive their target, static methods `None`.
pub type MethodFn = Arc<dyn Fn(Option<&Value>, &Arguments) -> Result<Value> + Send + Sync>;

// The process-wide catalog, created on first access.
static GLOBAL_REFLECTOR: Lazy<Arc<Reflector>> = Lazy::new(|| Arc::new(Reflector::new()));

/// A single formal parameter of a constructor, method or closure.
#[derive(Clone)]
pub struct Parameter {
  name: String,
  class: Option<String>,
  default: Option<Value>,
  variadic: bool,
}

impl Parameter {
  /// An untyped ("primitive") parameter.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      class: None,
      default: None,
      variadic: false,
    }
  }

  /// A parameter typed by an injectable class.
  pub fn of<T: Injectable>(name: impl Into<String>) -> Self {
    Self::new(name).typed(T::class_name())
  }

  /// Declares the class or interface this parameter expects.
  pub fn typed(mut self, class: impl Into<String>) -> Self {
    self.class = Some(class.into());
    self
  }

  pub fn with_default<T: Any + Send + Sync>(self, default: T) -> Self {
    self.with_default_value(Arc::new(default))
  }

  pub fn with_default_value(mut self, default: Value) -> Self {
    self.default = Some(default);
    self
  }

  pub fn variadic(mut self) -> Self {
    self.variadic = true;
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn class(&self) -> Option<&str> {
    self.class.as_deref()
  }

  pub fn default_value(&self) -> Option<&Value> {
    self.default.as_ref()
  }

  pub fn has_default(&self) -> bool {
    self.default.is_some()
  }

  pub fn is_variadic(&self) -> bool {
    self.variadic
  }

  /// Renders the parameter as `Parameter #N [ <required> $name ]`.
  pub fn describe(&self, position: usize) -> String {
    let requirement = if self.has_default() || self.variadic {
      "optional"
    } else {
      "required"
    };
    format!("Parameter #{} [ <{}> ${} ]", position, requirement, self.name)
  }
}

impl fmt::Debug for Parameter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Parameter")
      .field("name", &self.name)
      .field("class", &self.class)
      .field("has_default", &self.has_default())
      .field("variadic", &self.variadic)
      .finish()
  }
}

/// The ordered parameter list of a callable.
#[derive(Debug, Clone, Default)]
pub struct Signature {
  parameters: Vec<Parameter>,
}

impl Signature {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn empty() -> Self {
    Self::default()
  }

  pub fn param(mut self, parameter: Parameter) -> Self {
    self.parameters.push(parameter);
    self
  }

  pub fn parameters(&self) -> &[Parameter] {
    &self.parameters
  }

  pub fn len(&self) -> usize {
    self.parameters.len()
  }

  pub fn is_empty(&self) -> bool {
    self.parameters.is_empty()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
  Concrete,
  Abstract,
  Interface,
}

#[derive(Clone)]
pub struct Constructor {
  signature: Signature,
  body: InvokeFn,
}

impl Constructor {
  pub fn signature(&self) -> &Signature {
    &self.signature
  }

  pub(crate) fn invoke(&self, args: &Arguments) -> Result<Value> {
    (self.body)(args)
  }
}

#[derive(Clone)]
pub struct MethodMeta {
  name: String,
  signature: Signature,
  is_static: bool,
  body: MethodFn,
}

impl MethodMeta {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn signature(&self) -> &Signature {
    &self.signature
  }

  pub fn is_static(&self) -> bool {
    self.is_static
  }

  pub(crate) fn invoke(&self, receiver: Option<&Value>, args: &Arguments) -> Result<Value> {
    (self.body)(receiver, args)
  }
}

/// Everything the container knows about a class.
#[derive(Clone)]
pub struct ClassMeta {
  name: String,
  kind: ClassKind,
  type_id: Option<TypeId>,
  parents: Vec<String>,
  constructor: Option<Constructor>,
  methods: HashMap<String, MethodMeta>,
}

impl ClassMeta {
  /// Describes an [`Injectable`] type.
  pub fn of<T: Injectable>() -> Self {
    let class = ClassBuilder::concrete::<T>(T::class_name()).constructor(T::signature(), T::construct);
    T::describe(class).build()
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn kind(&self) -> ClassKind {
    self.kind
  }

  /// Direct parents: implemented interfaces and extended classes.
  pub fn parents(&self) -> &[String] {
    &self.parents
  }

  pub fn constructor(&self) -> Option<&Constructor> {
    self.constructor.as_ref()
  }

  pub fn method(&self, name: &str) -> Option<&MethodMeta> {
    self.methods.get(name)
  }

  pub fn is_instantiable(&self) -> bool {
    self.kind == ClassKind::Concrete && self.constructor.is_some()
  }
}

impl fmt::Debug for ClassMeta {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut methods: Vec<&String> = self.methods.keys().collect();
    methods.sort();
    f.debug_struct("ClassMeta")
      .field("name", &self.name)
      .field("kind", &self.kind)
      .field("parents", &self.parents)
      .field("constructor", &self.constructor.as_ref().map(|c| c.signature.len()))
      .field("methods", &methods)
      .finish()
  }
}

/// A builder for [`ClassMeta`].
pub struct ClassBuilder {
  meta: ClassMeta,
}

impl ClassBuilder {
  /// Starts describing a concrete class backed by the Rust type `T`.
  pub fn concrete<T: Any + Send + Sync>(name: impl Into<String>) -> Self {
    Self::with_kind(name, ClassKind::Concrete, Some(TypeId::of::<T>()))
  }

  pub fn interface(name: impl Into<String>) -> Self {
    Self::with_kind(name, ClassKind::Interface, None)
  }

  pub fn abstract_class(name: impl Into<String>) -> Self {
    Self::with_kind(name, ClassKind::Abstract, None)
  }

  fn with_kind(name: impl Into<String>, kind: ClassKind, type_id: Option<TypeId>) -> Self {
    Self {
      meta: ClassMeta {
        name: name.into(),
        kind,
        type_id,
        parents: Vec::new(),
        constructor: None,
        methods: HashMap::new(),
      },
    }
  }

  pub fn implements(mut self, interface: impl Into<String>) -> Self {
    self.meta.parents.push(interface.into());
    self
  }

  pub fn extends(mut self, parent: impl Into<String>) -> Self {
    self.meta.parents.push(parent.into());
    self
  }

  pub fn constructor<T, F>(mut self, signature: Signature, construct: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Arguments) -> Result<T> + Send + Sync + 'static,
  {
    let body: InvokeFn = Arc::new(move |args: &Arguments| {
      let instance = construct(args)?;
      Ok(Arc::new(instance) as Value)
    });
    self.meta.constructor = Some(Constructor { signature, body });
    self
  }

  /// Adds an instance method. The receiver is downcast to `T` before `f` runs.
  pub fn method<T, F>(self, name: impl Into<String>, signature: Signature, f: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&T, &Arguments) -> Result<Value> + Send + Sync + 'static,
  {
    let name = name.into();
    let owner = format!("{}::{}()", self.meta.name, name);
    let body: MethodFn = Arc::new(move |receiver: Option<&Value>, args: &Arguments| {
      let this = receiver
        .and_then(|target| (**target).downcast_ref::<T>())
        .ok_or_else(|| {
          ContainerError::factory(format!(
            "Method {} requires an instance of {}",
            owner,
            type_name::<T>()
          ))
        })?;
      f(this, args)
    });
    self.insert_method(name, signature, false, body)
  }

  pub fn static_method<F>(self, name: impl Into<String>, signature: Signature, f: F) -> Self
  where
    F: Fn(&Arguments) -> Result<Value> + Send + Sync + 'static,
  {
    let body: MethodFn = Arc::new(move |_receiver: Option<&Value>, args: &Arguments| f(args));
    self.insert_method(name.into(), signature, true, body)
  }

  fn insert_method(mut self, name: String, signature: Signature, is_static: bool, body: MethodFn) -> Self {
    self.meta.methods.insert(
      name.clone(),
      MethodMeta {
        name,
        signature,
        is_static,
        body,
      },
    );
    self
  }

  pub fn build(self) -> ClassMeta {
    self.meta
  }
}

/// A closure or free function together with its declared signature.
#[derive(Clone)]
pub struct Callable {
  signature: Signature,
  body: InvokeFn,
}

impl Callable {
  pub fn new<F>(signature: Signature, f: F) -> Self
  where
    F: Fn(&Arguments) -> Result<Value> + Send + Sync + 'static,
  {
    Self {
      signature,
      body: Arc::new(f),
    }
  }

  pub fn signature(&self) -> &Signature {
    &self.signature
  }

  pub(crate) fn invoke(&self, args: &Arguments) -> Result<Value> {
    (self.body)(args)
  }
}

impl fmt::Debug for Callable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Callable")
      .field("signature", &self.signature)
      .finish_non_exhaustive()
  }
}

/// A type the container can construct by itself.
///
/// # Examples
///
/// ```
/// use weft_ioc::{Arguments, Injectable, Parameter, Result, Signature};
///
/// struct Mailer {
///   host: String,
/// }
///
/// impl Injectable for Mailer {
///   fn signature() -> Signature {
///     Signature::new().param(Parameter::new("host").with_default(String::from("localhost")))
///   }
///
///   fn construct(args: &Arguments) -> Result<Self> {
///     Ok(Mailer { host: (*args.get::<String>("host")?).clone() })
///   }
/// }
/// ```
pub trait Injectable: Any + Send + Sync + Sized {
  /// The identifier the class is registered under.
  fn class_name() -> &'static str {
    type_name::<Self>()
  }

  fn signature() -> Signature {
    Signature::empty()
  }

  fn construct(args: &Arguments) -> Result<Self>;

  /// Hook for declaring interfaces and methods.
  fn describe(class: ClassBuilder) -> ClassBuilder {
    class
  }
}

/// A thread-safe catalog of classes and free functions.
#[derive(Default)]
pub struct Reflector {
  classes: DashMap<String, Arc<ClassMeta>>,
  types: DashMap<TypeId, String>,
  functions: DashMap<String, Callable>,
}

impl Reflector {
  pub fn new() -> Self {
    Self::default()
  }

  /// The process-wide catalog used by containers that were not given their own.
  pub fn global() -> Arc<Reflector> {
    GLOBAL_REFLECTOR.clone()
  }

  pub fn register<T: Injectable>(&self) -> Arc<ClassMeta> {
    self.register_class(ClassMeta::of::<T>())
  }

  pub fn register_class(&self, meta: ClassMeta) -> Arc<ClassMeta> {
    if let Some(type_id) = meta.type_id {
      self.types.insert(type_id, meta.name.clone());
    }
    let meta = Arc::new(meta);
    self.classes.insert(meta.name.clone(), meta.clone());
    meta
  }

  pub fn register_interface(&self, name: impl Into<String>) -> Arc<ClassMeta> {
    self.register_class(ClassBuilder::interface(name).build())
  }

  pub fn register_function(&self, name: impl Into<String>, callable: Callable) {
    self.functions.insert(name.into(), callable);
  }

  pub fn class(&self, name: &str) -> Option<Arc<ClassMeta>> {
    self.classes.get(name).map(|entry| entry.value().clone())
  }

  pub fn has_class(&self, name: &str) -> bool {
    self.classes.contains_key(name)
  }

  pub fn function(&self, name: &str) -> Option<Callable> {
    self.functions.get(name).map(|entry| entry.value().clone())
  }

  pub fn signature_of(&self, class: &str) -> Option<Signature> {
    self
      .class(class)
      .and_then(|meta| meta.constructor().map(|ctor| ctor.signature().clone()))
  }

  /// Finds the registered class of a resolved value by its runtime type.
  pub fn class_of_value(&self, value: &Value) -> Option<Arc<ClassMeta>> {
    let type_id = (**value).type_id();
    let name = self.types.get(&type_id)?.value().clone();
    self.class(&name)
  }

  /// Whether `class` is `ancestor` or transitively extends/implements it.
  pub fn is_a(&self, class: &str, ancestor: &str) -> bool {
    let mut pending = vec![class.to_string()];
    let mut seen = HashSet::new();
    while let Some(current) = pending.pop() {
      if current == ancestor {
        return true;
      }
      if !seen.insert(current.clone()) {
        continue;
      }
      if let Some(meta) = self.class(&current) {
        pending.extend(meta.parents.iter().cloned());
      }
    }
    false
  }
}
