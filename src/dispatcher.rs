use crate::{
    logging::Logger,
    registry::HandlerRegistry,
    stub::Stub,
    types::{InvocationRequest, InvocationResult},
};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};
use thiserror::Error;

/// Routes invocations to the handlers of an immutable [`HandlerRegistry`].
///
/// Every call to [`dispatch`](Self::dispatch) ends in exactly one
/// [`InvocationResult`]: unknown methods, handler errors and handler panics all
/// become [`InvocationResult::Failure`].
pub struct Dispatcher {
    name: String,
    registry: HandlerRegistry,
    logger: Arc<dyn Logger>,
}

impl Dispatcher {
    pub fn new(name: impl Into<String>, registry: HandlerRegistry, logger: Arc<dyn Logger>) -> Self {
        Self {
            name: name.into(),
            registry,
            logger,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn methods(&self) -> Vec<String> {
        self.registry.names().map(str::to_owned).collect()
    }

    pub fn initialize(&self) -> InvocationResult {
        self.logger.info(&format!("{} init", self.name));
        InvocationResult::success(None)
    }

    /// Extracts the request from `stub` and dispatches it.
    pub async fn invoke(&self, stub: &dyn Stub) -> InvocationResult {
        let request = InvocationRequest::from(stub.function_and_parameters());
        self.dispatch(stub, request).await
    }

    pub async fn dispatch(&self, stub: &dyn Stub, request: InvocationRequest) -> InvocationResult {
        self.logger.info(&format!(
            "invoking {} with {:?}",
            request.method_name, request.arguments
        ));
        match self.call(stub, request).await {
            Ok(payload) => InvocationResult::success(Some(payload)),
            Err(err) => {
                match &err {
                    DispatchError::UnknownMethod(name) => {
                        self.logger.info(&format!("no function of name:{name} found"))
                    }
                    DispatchError::Handler { method, source } => {
                        self.logger.info(&format!("{method} failed: {source}"))
                    }
                }
                InvocationResult::error(err.to_string())
            }
        }
    }

    /// Looks up and runs the handler for `request`, without normalizing the outcome.
    pub async fn call(&self, stub: &dyn Stub, request: InvocationRequest) -> CallResult {
        let InvocationRequest {
            method_name,
            arguments,
        } = request;
        let Some(handler) = self.registry.get(&method_name) else {
            return Err(DispatchError::UnknownMethod(method_name));
        };
        // Both building the future and polling it may panic.
        let call = AssertUnwindSafe(|| handler.call(stub, arguments));
        let outcome = match panic::catch_unwind(call) {
            Ok(fut) => AssertUnwindSafe(fut)
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(panicked(panic))),
            Err(panic) => Err(panicked(panic)),
        };
        outcome.map_err(|source| DispatchError::Handler {
            method: method_name,
            source,
        })
    }
}

pub type CallResult = Result<Vec<u8>, DispatchError>;

#[derive(Serialize, Deserialize, Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Received unknown function {0} invocation")]
    UnknownMethod(String),

    #[error("{source}")]
    Handler {
        method: String,
        source: HandlerError,
    },
}

/// Why a handler failed. Its `Display` output becomes the failure message.
#[derive(Serialize, Deserialize, Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("{0}")]
    Message(String),

    #[error("incorrect number of arguments: expected {expected}, got {got}")]
    ArgumentCount { expected: usize, got: usize },

    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl HandlerError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Fails with [`HandlerError::ArgumentCount`] unless exactly `expected` arguments were given.
    pub fn expect_args(args: &[String], expected: usize) -> Result<(), Self> {
        if args.len() == expected {
            Ok(())
        } else {
            Err(Self::ArgumentCount {
                expected,
                got: args.len(),
            })
        }
    }
}

fn panicked(panic: Box<dyn Any + Send>) -> HandlerError {
    HandlerError::Panicked(panic_message(&*panic))
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
