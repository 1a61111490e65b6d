//! Service Registry
//!
//! Type-keyed container the composition root binds services into. Each
//! binding is keyed by the `TypeId` of the type it is requested as, which
//! may be a concrete type or a trait object (`dyn SubscriptionServiceInterface`).
//!
//! Three lifecycles are supported:
//!
//! | Lifecycle | Registered with | Resolved by |
//! |-----------|-----------------|-------------|
//! | [`Lifecycle::Eager`] | `register_singleton` | `get`, `get_async` |
//! | [`Lifecycle::LazySync`] | `register_factory` | `get`, `get_async` |
//! | [`Lifecycle::LazyAsync`] | `register_async_factory` | `get_async`, then `get` |
//!
//! Lazy bindings build their instance once and cache it. Concurrent
//! `get_async` callers share the in-flight construction and receive the
//! same `Arc`. A failed construction caches nothing, so the next lookup
//! runs the factory again.
//!
//! Factories receive the registry and may resolve their own dependencies.
//! A factory that (directly or through other factories) asks for the type
//! it is building fails with `CircularDependency` instead of deadlocking.
//! The chain is tracked per thread for synchronous resolution and per task
//! for asynchronous resolution.

use futures::FutureExt;
use futures::future::BoxFuture;
use pdiary_domain::error::{Error, Result};
use std::any::{Any, TypeId, type_name};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

type Instance = Arc<dyn Any + Send + Sync>;
type SyncFactory = Box<dyn Fn(&ServiceRegistry) -> Result<Instance> + Send + Sync>;
type AsyncFactory = Box<dyn Fn(ServiceRegistry) -> BoxFuture<'static, Result<Instance>> + Send + Sync>;

/// How a binding produces its instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Instance constructed before registration
    Eager,
    /// Built on first lookup by a synchronous factory
    LazySync,
    /// Built on first asynchronous lookup by an async factory
    LazyAsync,
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lifecycle::Eager => write!(f, "eager"),
            Lifecycle::LazySync => write!(f, "lazy-sync"),
            Lifecycle::LazyAsync => write!(f, "lazy-async"),
        }
    }
}

enum Binding {
    Eager(Instance),
    LazySync {
        factory: SyncFactory,
        instance: once_cell::sync::OnceCell<Instance>,
    },
    LazyAsync {
        factory: AsyncFactory,
        instance: tokio::sync::OnceCell<Instance>,
    },
}

struct Registration {
    type_id: TypeId,
    type_name: &'static str,
    binding: Binding,
}

impl Registration {
    fn lifecycle(&self) -> Lifecycle {
        match self.binding {
            Binding::Eager(_) => Lifecycle::Eager,
            Binding::LazySync { .. } => Lifecycle::LazySync,
            Binding::LazyAsync { .. } => Lifecycle::LazyAsync,
        }
    }
}

thread_local! {
    static SYNC_RESOLUTION_CHAIN: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

tokio::task_local! {
    static ASYNC_RESOLUTION_CHAIN: Vec<TypeId>;
}

/// Marks a type as being resolved on the current thread until dropped
struct SyncResolutionGuard;

impl SyncResolutionGuard {
    fn enter(registration: &Registration) -> Result<Self> {
        SYNC_RESOLUTION_CHAIN.with(|chain| {
            let mut chain = chain.borrow_mut();
            if chain.contains(&registration.type_id) {
                return Err(Error::circular_dependency(registration.type_name));
            }
            chain.push(registration.type_id);
            Ok(Self)
        })
    }
}

impl Drop for SyncResolutionGuard {
    fn drop(&mut self) {
        SYNC_RESOLUTION_CHAIN.with(|chain| {
            chain.borrow_mut().pop();
        });
    }
}

/// Type-keyed service container
///
/// Cloning is cheap and every clone shares the same bindings.
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    bindings: Arc<RwLock<HashMap<TypeId, Arc<Registration>>>>,
}

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an already constructed instance
    ///
    /// Replaces any existing binding for `T`. Instances handed out before
    /// the replacement are unaffected.
    pub fn register_singleton<T>(&self, instance: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.insert::<T>(Binding::Eager(erase(instance)));
    }

    /// Bind a synchronous constructor, invoked on first lookup
    pub fn register_factory<T, F>(&self, factory: F)
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceRegistry) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.insert::<T>(Binding::LazySync {
            factory: Box::new(move |registry: &ServiceRegistry| {
                factory(registry).map(erase::<T>)
            }),
            instance: once_cell::sync::OnceCell::new(),
        });
    }

    /// Bind an asynchronous constructor, invoked on first `get_async`
    pub fn register_async_factory<T, F, Fut>(&self, factory: F)
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(ServiceRegistry) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<T>>> + Send + 'static,
    {
        self.insert::<T>(Binding::LazyAsync {
            factory: Box::new(move |registry: ServiceRegistry| {
                factory(registry).map(|built| built.map(erase::<T>)).boxed()
            }),
            instance: tokio::sync::OnceCell::new(),
        });
    }

    /// Resolve `T` synchronously
    ///
    /// Fails with `NotRegistered` when `T` is unbound and with
    /// `RequiresAsyncInitialization` when `T` is bound to an async factory
    /// that has not been resolved through [`ServiceRegistry::get_async`] yet.
    pub fn get<T>(&self) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let registration = self.registration::<T>()?;
        let instance = match &registration.binding {
            Binding::Eager(instance) => Arc::clone(instance),
            Binding::LazySync { factory, instance } => {
                self.resolve_sync(&registration, factory, instance)?
            }
            Binding::LazyAsync { instance, .. } => instance
                .get()
                .cloned()
                .ok_or_else(|| Error::requires_async_initialization(registration.type_name))?,
        };
        downcast::<T>(&instance, registration.type_name)
    }

    /// Resolve `T`, running its factory (sync or async) if needed
    pub async fn get_async<T>(&self) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let registration = self.registration::<T>()?;
        let instance = match &registration.binding {
            Binding::Eager(instance) => Arc::clone(instance),
            Binding::LazySync { factory, instance } => {
                self.resolve_sync(&registration, factory, instance)?
            }
            Binding::LazyAsync { factory, instance } => {
                self.resolve_async(&registration, factory, instance).await?
            }
        };
        downcast::<T>(&instance, registration.type_name)
    }

    /// Whether a binding exists for `T`
    pub fn is_registered<T>(&self) -> bool
    where
        T: ?Sized + 'static,
    {
        self.read().contains_key(&TypeId::of::<T>())
    }

    /// Lifecycle of the binding for `T`
    pub fn lifecycle_of<T>(&self) -> Option<Lifecycle>
    where
        T: ?Sized + 'static,
    {
        self.read()
            .get(&TypeId::of::<T>())
            .map(|registration| registration.lifecycle())
    }

    /// Remove the binding for `T`, returning whether one existed
    pub fn unregister<T>(&self) -> bool
    where
        T: ?Sized + 'static,
    {
        let removed = self.write().remove(&TypeId::of::<T>()).is_some();
        if removed {
            debug!(service = type_name::<T>(), "Service unregistered");
        }
        removed
    }

    /// Remove every binding
    pub fn clear(&self) {
        self.write().clear();
        debug!("Service registry cleared");
    }

    /// Names of the bound types, sorted
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.read().values().map(|r| r.type_name).collect();
        names.sort_unstable();
        names
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the registry has no bindings
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn insert<T>(&self, binding: Binding)
    where
        T: ?Sized + 'static,
    {
        let registration = Arc::new(Registration {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            binding,
        });
        let lifecycle = registration.lifecycle();
        let replaced = self
            .write()
            .insert(registration.type_id, registration)
            .is_some();
        debug!(
            service = type_name::<T>(),
            lifecycle = %lifecycle,
            replaced,
            "Service registered"
        );
    }

    fn registration<T>(&self) -> Result<Arc<Registration>>
    where
        T: ?Sized + 'static,
    {
        self.read()
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or_else(|| Error::not_registered(type_name::<T>()))
    }

    fn resolve_sync(
        &self,
        registration: &Registration,
        factory: &SyncFactory,
        instance: &once_cell::sync::OnceCell<Instance>,
    ) -> Result<Instance> {
        if let Some(instance) = instance.get() {
            return Ok(Arc::clone(instance));
        }

        let _guard = SyncResolutionGuard::enter(registration)?;
        instance
            .get_or_try_init(|| {
                debug!(service = registration.type_name, "Constructing service");
                factory(self)
            })
            .cloned()
    }

    async fn resolve_async(
        &self,
        registration: &Registration,
        factory: &AsyncFactory,
        instance: &tokio::sync::OnceCell<Instance>,
    ) -> Result<Instance> {
        if let Some(instance) = instance.get() {
            return Ok(Arc::clone(instance));
        }

        let mut chain = ASYNC_RESOLUTION_CHAIN
            .try_with(Clone::clone)
            .unwrap_or_default();
        if chain.contains(&registration.type_id) {
            return Err(Error::circular_dependency(registration.type_name));
        }
        chain.push(registration.type_id);

        instance
            .get_or_try_init(|| {
                debug!(service = registration.type_name, "Constructing service asynchronously");
                ASYNC_RESOLUTION_CHAIN.scope(chain, factory(self.clone()))
            })
            .await
            .cloned()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<TypeId, Arc<Registration>>> {
        self.bindings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<TypeId, Arc<Registration>>> {
        self.bindings.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.registered_types())
            .finish()
    }
}

fn erase<T>(instance: Arc<T>) -> Instance
where
    T: ?Sized + Send + Sync + 'static,
{
    Arc::new(instance)
}

fn downcast<T>(instance: &Instance, type_name: &str) -> Result<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    instance
        .downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or_else(|| Error::internal(format!("Binding for {type_name} holds a different type")))
}
