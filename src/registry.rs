use crate::{BoxFuture, Handler, HandlerResult, Stub};
use std::{collections::BTreeMap, future::Future, sync::Arc};
use thiserror::Error;

/// Maps method names to [`Handler`]s.
///
/// Handlers are registered with [`insert`](Self::insert) or
/// [`insert_fn`](Self::insert_fn) at startup. Once the registry is moved into a
/// [`Dispatcher`](crate::Dispatcher) it can no longer change.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, Arc<dyn Handler + Send + Sync + 'static>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<H>(&mut self, handler: H) -> Result<(), RegistryError>
    where
        H: Handler + Send + Sync + 'static,
    {
        let name = handler.name().to_owned();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.handlers.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.handlers.insert(name, Arc::new(handler));
        Ok(())
    }

    /// Registers a closure that only looks at the invocation arguments.
    pub fn insert_fn<F, Fut>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        F: Fn(Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.insert(FnHandler {
            name: name.to_owned(),
            f,
        })
    }

    pub fn get(&self, name: &str) -> Option<&(dyn Handler + Send + Sync + 'static)> {
        self.handlers.get(name).map(|handler| handler.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered method names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a handler named {0} is already registered")]
    Duplicate(String),

    #[error("handler names must not be empty")]
    EmptyName,
}

struct FnHandler<F> {
    name: String,
    f: F,
}

impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Vec<String>) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call<'call>(
        &'call self,
        _stub: &'call dyn Stub,
        args: Vec<String>,
    ) -> BoxFuture<'call, HandlerResult> {
        Box::pin((self.f)(args))
    }
}
