//! The main `Container` struct and its associated methods.

use crate::binding::{Binding, Concrete};
use crate::bound_method::{self, CallTarget, MethodBinding, MethodKey};
use crate::config::ContainerConfig;
use crate::contextual::{ContextualBindingBuilder, Given, VARIABLE_PREFIX};
use crate::core::{BuildFrame, ParameterFrame, State};
use crate::error::{ContainerError, Result};
use crate::events::{Phase, RebindingCallback, ResolvingCallback};
use crate::extension::{self, Extender};
use crate::reflector::{ClassMeta, Injectable, Parameter, Reflector, Signature};
use crate::value::{downcast, Arguments, Parameters, Value};
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::any::{type_name, Any};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// The Inversion of Control (IoC) container.
///
/// Maps identifiers to construction strategies and builds object graphs from the
/// signatures recorded in its [`Reflector`]. All state sits behind one re-entrant
/// lock: a resolution holds it from start to finish, so the build stack is always a
/// single linear sequence, while factories running on the same thread may call
/// back into the container freely.
pub struct Container {
  inner: ReentrantMutex<RefCell<State>>,
  reflector: Arc<Reflector>,
  config: ContainerConfig,
}

impl Default for Container {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let guard = self.inner.lock();
    let state = guard.borrow();
    let mut bindings: Vec<&String> = state.registry.bindings.keys().collect();
    bindings.sort();
    f.debug_struct("Container")
      .field("bindings", &bindings)
      .field("instances", &state.registry.instances.len())
      .field("aliases", &state.registry.aliases.len())
      .field("config", &self.config)
      .finish_non_exhaustive()
  }
}

impl Container {
  /// Creates a new, empty `Container` backed by the global [`Reflector`].
  pub fn new() -> Self {
    Self::with_config(ContainerConfig::default())
  }

  pub fn with_config(config: ContainerConfig) -> Self {
    Self {
      inner: ReentrantMutex::new(RefCell::new(State::default())),
      reflector: Reflector::global(),
      config,
    }
  }

  /// Replaces the class catalog, e.g. to isolate a test from the global one.
  pub fn with_reflector(mut self, reflector: Arc<Reflector>) -> Self {
    self.reflector = reflector;
    self
  }

  pub fn reflector(&self) -> &Arc<Reflector> {
    &self.reflector
  }

  pub fn config(&self) -> &ContainerConfig {
    &self.config
  }

  /// Describes `T` in this container's class catalog.
  pub fn register<T: Injectable>(&self) -> Arc<ClassMeta> {
    self.reflector.register::<T>()
  }

  // --- PRIVATE HELPERS ---

  fn lock(&self) -> ReentrantMutexGuard<'_, RefCell<State>> {
    self.inner.lock()
  }

  /// Runs `f` with exclusive access to the state. `f` must not call user code.
  pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
    let guard = self.inner.lock();
    let mut state = guard.borrow_mut();
    f(&mut *state)
  }

  fn rebound(&self, abstract_: &str) -> Result<()> {
    let callbacks = self.with_state(|state| state.events.rebinding_for(abstract_));
    if callbacks.is_empty() {
      return Ok(());
    }
    let instance = self.make(abstract_)?;
    debug!(abstract_ = %abstract_, callbacks = callbacks.len(), "Firing rebinding callbacks");
    for callback in callbacks {
      callback(self, &instance)?;
    }
    Ok(())
  }

  fn contextual_concrete(&self, abstract_: &str) -> Option<Given> {
    self.with_state(|state| {
      let consumer = state.build_stack.last()?;
      if let Some(given) = state.contextual.find(consumer, abstract_) {
        return Some(given);
      }
      state
        .registry
        .abstract_aliases
        .get(abstract_)?
        .iter()
        .find_map(|alias| state.contextual.find(consumer, alias))
    })
  }

  fn resolve(&self, abstract_: &str, parameters: Parameters) -> Result<Value> {
    let _lock = self.lock();
    let abstract_ = self.get_alias(abstract_)?;
    let contextual = self.contextual_concrete(&abstract_);
    let needs_contextual_build = !parameters.is_empty() || contextual.is_some();

    if !needs_contextual_build {
      let cached = self.with_state(|state| state.registry.instances.get(&abstract_).cloned());
      if let Some(instance) = cached {
        trace!(abstract_ = %abstract_, "Resolved from instance cache");
        return Ok(instance);
      }
    }

    trace!(abstract_ = %abstract_, contextual = contextual.is_some(), ?parameters, "Resolving");
    let _frame = ParameterFrame::enter(self, &abstract_, parameters.clone())?;

    let object = match contextual {
      Some(given) => self.resolve_given(&abstract_, given, &parameters),
      None => self.resolve_concrete(&abstract_, &parameters),
    }
    .map_err(|err| {
      debug!(abstract_ = %abstract_, error = %err, "Resolution failed");
      err
    })?;

    let extenders = self.with_state(|state| state.extenders.get(&abstract_));
    let object = extension::apply(&extenders, object, self)?;

    self.with_state(|state| {
      // Overrides from an enclosing call may have shaped this build.
      let overridden = state.with.iter().any(|frame| !frame.is_empty());
      if !needs_contextual_build && !overridden && state.registry.is_shared(&abstract_) {
        state
          .registry
          .instances
          .insert(abstract_.clone(), object.clone());
      }
      state.registry.resolved.insert(abstract_.clone());
    });

    self.fire_resolving_callbacks(&abstract_, &object);
    Ok(object)
  }

  fn resolve_concrete(&self, abstract_: &str, parameters: &Parameters) -> Result<Value> {
    let concrete = self.with_state(|state| {
      state
        .registry
        .bindings
        .get(abstract_)
        .map(|binding| binding.concrete().clone())
    });
    match concrete {
      Some(Concrete::Factory(factory)) => {
        let _frame = BuildFrame::enter(self, abstract_)?;
        factory(self, parameters)
      }
      Some(Concrete::Class(class)) if class != abstract_ => self.resolve(&class, parameters.clone()),
      _ => self.build(abstract_),
    }
  }

  fn resolve_given(&self, abstract_: &str, given: Given, parameters: &Parameters) -> Result<Value> {
    match given {
      Given::Class(class) if class == abstract_ => self.build(&class),
      Given::Class(class) => self.make(&class),
      Given::Factory(factory) => {
        let _frame = BuildFrame::enter(self, abstract_)?;
        factory(self, parameters)
      }
      Given::Value(value) => Ok(value),
    }
  }

  fn resolve_dependencies(&self, owner: &str, signature: &Signature) -> Result<Arguments> {
    let mut entries = Vec::with_capacity(signature.len());
    for (position, parameter) in signature.parameters().iter().enumerate() {
      let overridden = self.with_state(|state| state.parameter_override(parameter.name()));
      let value = match (overridden, parameter.class()) {
        (Some(value), _) => value,
        (None, Some(class)) => self.resolve_class_parameter(class, parameter)?,
        (None, None) => self.resolve_primitive(owner, position, parameter)?,
      };
      entries.push((parameter.name().to_string(), value));
    }
    Ok(Arguments::new(entries, Vec::new()))
  }

  fn resolve_class_parameter(&self, class: &str, parameter: &Parameter) -> Result<Value> {
    match self.make(class) {
      Ok(value) => Ok(value),
      Err(err) if err.is_build_failure() => match parameter.default_value() {
        Some(default) => Ok(default.clone()),
        None => Err(err),
      },
      Err(err) => Err(err),
    }
  }

  fn resolve_primitive(&self, owner: &str, position: usize, parameter: &Parameter) -> Result<Value> {
    let variable = format!("{}{}", VARIABLE_PREFIX, parameter.name());
    let given = self.with_state(|state| {
      let consumer = state.build_stack.last()?;
      state.contextual.find(consumer, &variable)
    });
    match given {
      Some(Given::Value(value)) => return Ok(value),
      Some(Given::Factory(factory)) => return factory(self, &Parameters::new()),
      Some(Given::Class(class)) => return self.make(&class),
      None => {}
    }
    if let Some(default) = parameter.default_value() {
      return Ok(default.clone());
    }
    if parameter.is_variadic() {
      return Ok(Arc::new(Vec::<Value>::new()));
    }
    Err(ContainerError::unresolvable_parameter(
      &parameter.describe(position),
      "class",
      owner,
      &self.build_stack(),
    ))
  }

  fn fire_resolving_callbacks(&self, abstract_: &str, object: &Value) {
    let class = self
      .reflector
      .class_of_value(object)
      .map(|meta| meta.name().to_string());
    let matches = |type_name: &str| {
      type_name == abstract_
        || class
          .as_deref()
          .map(|class| self.reflector.is_a(class, type_name))
          .unwrap_or(false)
    };
    let (resolving, after) = self.with_state(|state| {
      (
        state.events.callbacks(Phase::Resolving, &matches),
        state.events.callbacks(Phase::AfterResolving, &matches),
      )
    });
    for callback in resolving.iter().chain(after.iter()) {
      callback(object, self);
    }
  }

  // --- PUBLIC API ---

  // --- Registration ---

  /// Registers a binding. `None` binds the identifier to itself, to be built
  /// reflectively. Re-binding an identifier that was already resolved drops the
  /// stale instance and fires its rebinding callbacks.
  pub fn bind_concrete(&self, abstract_: &str, concrete: Option<Concrete>, shared: bool) -> Result<()> {
    let _lock = self.lock();
    let concrete = concrete.unwrap_or_else(|| Concrete::Class(abstract_.to_string()));
    let was_resolved = self.with_state(|state| {
      let was_resolved = state.registry.is_resolved(abstract_);
      state.registry.drop_stale_instances(abstract_);
      state
        .registry
        .bindings
        .insert(abstract_.to_string(), Binding::new(concrete, shared));
      was_resolved
    });
    debug!(abstract_ = %abstract_, shared, "Registered binding");
    if was_resolved {
      self.rebound(abstract_)?;
    }
    Ok(())
  }

  pub fn bind<F>(&self, abstract_: &str, factory: F) -> Result<()>
  where
    F: Fn(&Container, &Parameters) -> Result<Value> + Send + Sync + 'static,
  {
    self.bind_concrete(abstract_, Some(Concrete::factory(factory)), false)
  }

  pub fn bind_class(&self, abstract_: &str, class: &str) -> Result<()> {
    self.bind_concrete(abstract_, Some(Concrete::class(class)), false)
  }

  pub fn bind_self(&self, abstract_: &str) -> Result<()> {
    self.bind_concrete(abstract_, None, false)
  }

  /// Like [`bind`](Self::bind), but does nothing when `abstract_` is already bound.
  pub fn bind_if<F>(&self, abstract_: &str, factory: F) -> Result<()>
  where
    F: Fn(&Container, &Parameters) -> Result<Value> + Send + Sync + 'static,
  {
    self.bind_concrete_if(abstract_, Concrete::factory(factory), false)
  }

  /// Shared form of [`bind_if`](Self::bind_if).
  pub fn singleton_if<F>(&self, abstract_: &str, factory: F) -> Result<()>
  where
    F: Fn(&Container, &Parameters) -> Result<Value> + Send + Sync + 'static,
  {
    self.bind_concrete_if(abstract_, Concrete::factory(factory), true)
  }

  fn bind_concrete_if(&self, abstract_: &str, concrete: Concrete, shared: bool) -> Result<()> {
    let _lock = self.lock();
    if self.bound(abstract_) {
      return Ok(());
    }
    self.bind_concrete(abstract_, Some(concrete), shared)
  }

  pub fn singleton<F>(&self, abstract_: &str, factory: F) -> Result<()>
  where
    F: Fn(&Container, &Parameters) -> Result<Value> + Send + Sync + 'static,
  {
    self.bind_concrete(abstract_, Some(Concrete::factory(factory)), true)
  }

  pub fn singleton_class(&self, abstract_: &str, class: &str) -> Result<()> {
    self.bind_concrete(abstract_, Some(Concrete::class(class)), true)
  }

  pub fn singleton_self(&self, abstract_: &str) -> Result<()> {
    self.bind_concrete(abstract_, None, true)
  }

  /// Stores `instance` as the shared value for `abstract_` and returns it.
  pub fn instance(&self, abstract_: &str, instance: Value) -> Result<Value> {
    let _lock = self.lock();
    let was_resolved = self.with_state(|state| {
      state.registry.remove_abstract_alias(abstract_);
      let was_resolved = state.registry.is_resolved(abstract_);
      state.registry.aliases.remove(abstract_);
      state
        .registry
        .instances
        .insert(abstract_.to_string(), instance.clone());
      state.registry.resolved.insert(abstract_.to_string());
      was_resolved
    });
    debug!(abstract_ = %abstract_, "Registered instance");
    if was_resolved {
      self.rebound(abstract_)?;
    }
    Ok(instance)
  }

  /// Binds `abstract_` to a factory returning `value` on every resolution.
  pub fn set(&self, abstract_: &str, value: Value) -> Result<()> {
    self.bind(abstract_, move |_, _| Ok(value.clone()))
  }

  /// Drops the binding, cached instance and resolved marker of `abstract_`.
  pub fn remove(&self, abstract_: &str) {
    self.with_state(|state| state.registry.remove(abstract_));
  }

  /// Makes `alias` resolve to `abstract_`. Self-aliases are reported when the
  /// alias is first looked up, not here.
  pub fn alias(&self, abstract_: &str, alias: &str) {
    self.with_state(|state| state.registry.add_alias(abstract_, alias));
  }

  /// Appends a decorator for `abstract_`. An instance that is already cached is
  /// decorated immediately instead, and the decorator is not kept.
  pub fn extend<F>(&self, abstract_: &str, extender: F) -> Result<()>
  where
    F: Fn(Value, &Container) -> Result<Value> + Send + Sync + 'static,
  {
    let _lock = self.lock();
    let abstract_ = self.get_alias(abstract_)?;
    let extender: Extender = Arc::new(extender);
    let cached = self.with_state(|state| state.registry.instances.get(&abstract_).cloned());

    // A cached instance is decorated in place; the chain only applies to future builds.
    if let Some(existing) = cached {
      let extended = extender(existing, self)?;
      trace!(abstract_ = %abstract_, "Extended cached instance");
      self.with_state(|state| {
        state
          .registry
          .instances
          .insert(abstract_.clone(), extended)
      });
      return self.rebound(&abstract_);
    }

    let resolved = self.with_state(|state| {
      state.extenders.push(&abstract_, extender);
      state.registry.is_resolved(&abstract_)
    });
    if resolved {
      self.rebound(&abstract_)?;
    }
    Ok(())
  }

  pub fn forget_extenders(&self, abstract_: &str) -> Result<()> {
    let abstract_ = self.get_alias(abstract_)?;
    self.with_state(|state| state.extenders.forget(&abstract_));
    Ok(())
  }

  /// Number of decorators currently registered for `abstract_`.
  pub fn extenders(&self, abstract_: &str) -> Result<usize> {
    let abstract_ = self.get_alias(abstract_)?;
    Ok(self.with_state(|state| state.extenders.get(&abstract_).len()))
  }

  /// Adds every identifier in `abstracts` to each tag in `tags`.
  pub fn tag(&self, abstracts: &[&str], tags: &[&str]) {
    self.with_state(|state| {
      for tag in tags {
        let members = state.tags.entry(tag.to_string()).or_default();
        for abstract_ in abstracts {
          if !members.iter().any(|member| member == abstract_) {
            members.push(abstract_.to_string());
          }
        }
      }
    });
  }

  /// Resolves every identifier carrying `tag`, in tagging order.
  pub fn tagged(&self, tag: &str) -> Result<Vec<Value>> {
    let _lock = self.lock();
    let members = self.with_state(|state| state.tags.get(tag).cloned().unwrap_or_default());
    members.iter().map(|abstract_| self.make(abstract_)).collect()
  }

  /// Starts a contextual binding for one consumer.
  pub fn when(&self, consumer: &str) -> ContextualBindingBuilder<'_> {
    ContextualBindingBuilder::new(self, vec![consumer.to_string()])
  }

  /// Starts a contextual binding shared by several consumers.
  pub fn when_all(&self, consumers: &[&str]) -> ContextualBindingBuilder<'_> {
    ContextualBindingBuilder::new(self, consumers.iter().map(|c| c.to_string()).collect())
  }

  pub fn add_contextual_binding(&self, consumer: &str, needed: &str, given: Given) -> Result<()> {
    let consumer = self.get_alias(consumer)?;
    let needed = self.get_alias(needed)?;
    trace!(consumer = %consumer, needed = %needed, ?given, "Registered contextual binding");
    self.with_state(|state| state.contextual.add(consumer, needed, given));
    Ok(())
  }

  /// Fires `callback` for every value resolved as, or that is-a, `abstract_`.
  pub fn resolving<F>(&self, abstract_: &str, callback: F) -> Result<()>
  where
    F: Fn(&Value, &Container) + Send + Sync + 'static,
  {
    self.add_typed_callback(Phase::Resolving, abstract_, Arc::new(callback))
  }

  /// Fires `callback` for every resolution.
  pub fn resolving_any<F>(&self, callback: F)
  where
    F: Fn(&Value, &Container) + Send + Sync + 'static,
  {
    self.with_state(|state| state.events.add_global(Phase::Resolving, Arc::new(callback)));
  }

  pub fn after_resolving<F>(&self, abstract_: &str, callback: F) -> Result<()>
  where
    F: Fn(&Value, &Container) + Send + Sync + 'static,
  {
    self.add_typed_callback(Phase::AfterResolving, abstract_, Arc::new(callback))
  }

  pub fn after_resolving_any<F>(&self, callback: F)
  where
    F: Fn(&Value, &Container) + Send + Sync + 'static,
  {
    self.with_state(|state| state.events.add_global(Phase::AfterResolving, Arc::new(callback)));
  }

  fn add_typed_callback(&self, phase: Phase, abstract_: &str, callback: ResolvingCallback) -> Result<()> {
    let abstract_ = self.get_alias(abstract_)?;
    self.with_state(|state| state.events.add_typed(phase, abstract_, callback));
    Ok(())
  }

  /// Registers a rebinding callback. When `abstract_` is already bound, it is
  /// resolved and the current value returned.
  pub fn rebinding<F>(&self, abstract_: &str, callback: F) -> Result<Option<Value>>
  where
    F: Fn(&Container, &Value) + Send + Sync + 'static,
  {
    self.add_rebinding(
      abstract_,
      Arc::new(move |container: &Container, instance: &Value| {
        callback(container, instance);
        Ok(())
      }),
    )
  }

  fn add_rebinding(&self, abstract_: &str, callback: RebindingCallback) -> Result<Option<Value>> {
    let _lock = self.lock();
    let abstract_ = self.get_alias(abstract_)?;
    self.with_state(|state| state.events.add_rebinding(&abstract_, callback));
    if self.bound(&abstract_) {
      return self.make(&abstract_).map(Some);
    }
    Ok(None)
  }

  /// On rebinding, calls `method` on `target` with the new value.
  pub fn refresh(&self, abstract_: &str, target: Value, method: &str) -> Result<Option<Value>> {
    let method = method.to_string();
    self.add_rebinding(
      abstract_,
      Arc::new(move |container: &Container, instance: &Value| {
        let call = CallTarget::Method {
          target: target.clone(),
          method: method.clone(),
        };
        container
          .call(call, Parameters::new().push_value(instance.clone()), None)
          .map(|_| ())
          .map_err(|err| {
            warn!(method = %method, error = %err, "Refresh callback failed");
            err
          })
      }),
    )
  }

  /// Intercepts calls to `method`, e.g. `"Mailer@send"`.
  pub fn bind_method<F>(&self, method: impl Into<MethodKey>, callback: F)
  where
    F: Fn(&Value, &Container) -> Result<Value> + Send + Sync + 'static,
  {
    let key = method.into();
    let callback: MethodBinding = Arc::new(callback);
    self.with_state(|state| state.method_bindings.insert(key.to_string(), callback));
  }

  pub fn has_method_binding(&self, method: &str) -> bool {
    self.with_state(|state| state.method_bindings.contains_key(method))
  }

  pub fn call_method_binding(&self, method: &str, instance: &Value) -> Result<Value> {
    let binding = self
      .with_state(|state| state.method_bindings.get(method).cloned())
      .ok_or_else(|| ContainerError::CallableNotFound(format!("Method binding [{}] does not exist", method)))?;
    trace!(method = %method, "Calling bound method override");
    binding(instance, self)
  }

  // --- Resolution ---

  pub fn make(&self, abstract_: &str) -> Result<Value> {
    self.resolve(abstract_, Parameters::new())
  }

  /// Resolves with parameter overrides. Overrides always force a fresh build.
  pub fn make_with(&self, abstract_: &str, parameters: Parameters) -> Result<Value> {
    self.resolve(abstract_, parameters)
  }

  /// Resolves and downcasts to `T`.
  pub fn make_as<T: Any + Send + Sync>(&self, abstract_: &str) -> Result<Arc<T>> {
    let value = self.make(abstract_)?;
    downcast::<T>(&value).ok_or_else(|| ContainerError::TypeMismatch {
      id: abstract_.to_string(),
      expected: type_name::<T>(),
    })
  }

  /// Builds `concrete` reflectively, ignoring bindings for the class itself.
  pub fn build(&self, concrete: &str) -> Result<Value> {
    let _lock = self.lock();
    let meta = match self.reflector.class(concrete) {
      Some(meta) => meta,
      None => return Err(ContainerError::class_not_found(concrete, &self.build_stack())),
    };
    let constructor = match meta.constructor() {
      Some(constructor) if meta.is_instantiable() => constructor.clone(),
      _ => return Err(ContainerError::not_instantiable(concrete, &self.build_stack())),
    };

    let _frame = BuildFrame::enter(self, concrete)?;
    let args = self.resolve_dependencies(concrete, constructor.signature())?;
    trace!(class = %concrete, ?args, "Constructing");
    constructor.invoke(&args)
  }

  /// Ambient lookup: unknown identifiers fail with `EntryNotFound` instead of a
  /// build error.
  pub fn get(&self, id: &str) -> Result<Value> {
    let buildable = self
      .reflector
      .class(id)
      .map_or(false, |meta| meta.is_instantiable());
    if self.has(id) || buildable {
      return self.make(id);
    }
    Err(ContainerError::EntryNotFound(id.to_string()))
  }

  /// Invokes `target`, injecting each parameter from `parameters` or the container.
  pub fn call(
    &self,
    target: impl Into<CallTarget>,
    parameters: Parameters,
    default_method: Option<&str>,
  ) -> Result<Value> {
    let _lock = self.lock();
    bound_method::call(self, target.into(), parameters, default_method)
  }

  /// Returns a closure that calls `target` with `parameters` on demand.
  pub fn wrap(&self, target: CallTarget, parameters: Parameters) -> impl Fn() -> Result<Value> + '_ {
    move || self.call(target.clone(), parameters.clone(), None)
  }

  /// Returns a closure that resolves `abstract_` on demand.
  pub fn factory(&self, abstract_: &str) -> impl Fn() -> Result<Value> + '_ {
    let abstract_ = abstract_.to_string();
    move || self.make(&abstract_)
  }

  // --- Introspection ---

  pub fn bound(&self, abstract_: &str) -> bool {
    self.with_state(|state| state.registry.is_bound(abstract_))
  }

  pub fn has(&self, id: &str) -> bool {
    self.bound(id)
  }

  pub fn resolved(&self, abstract_: &str) -> Result<bool> {
    let abstract_ = self.get_alias(abstract_)?;
    Ok(self.with_state(|state| state.registry.is_resolved(&abstract_)))
  }

  pub fn is_shared(&self, abstract_: &str) -> Result<bool> {
    let abstract_ = self.get_alias(abstract_)?;
    Ok(self.with_state(|state| state.registry.is_shared(&abstract_)))
  }

  pub fn is_alias(&self, name: &str) -> bool {
    self.with_state(|state| state.registry.is_alias(name))
  }

  /// Follows the alias chain of `abstract_` to its terminal identifier.
  pub fn get_alias(&self, abstract_: &str) -> Result<String> {
    self.with_state(|state| state.registry.resolve_alias(abstract_))
  }

  /// A snapshot of every registered binding.
  pub fn get_bindings(&self) -> HashMap<String, Binding> {
    self.with_state(|state| state.registry.bindings.clone())
  }

  /// Identifiers currently under construction, outermost first.
  pub fn build_stack(&self) -> Vec<String> {
    self.with_state(|state| state.build_stack.clone())
  }

  pub fn forget_instance(&self, abstract_: &str) {
    self.with_state(|state| {
      state.registry.instances.remove(abstract_);
    });
  }

  pub fn forget_instances(&self) {
    self.with_state(|state| state.registry.instances.clear());
  }

  /// Clears bindings, aliases, instances, resolved markers, tags, contextual
  /// rules and the build and parameter stacks. Extenders, lifecycle callbacks
  /// and method bindings are kept.
  pub fn flush(&self) {
    self.with_state(|state| {
      state.registry.clear();
      state.contextual.clear();
      state.tags.clear();
      state.build_stack.clear();
      state.with.clear();
    });
    debug!("Flushed container");
  }
}
