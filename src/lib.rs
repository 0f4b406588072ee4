use std::future::Future;

pub mod chaincode;
pub mod config;
pub mod dispatcher;
pub mod logging;
pub mod macros;
pub mod net;
pub mod registry;
pub mod stub;
pub mod types;

pub use dispatcher::{DispatchError, Dispatcher, HandlerError};
pub use futures::future::BoxFuture;
pub use logging::{Logger, MemoryLogger, TracingLogger};
pub use registry::{HandlerRegistry, RegistryError};
pub use stub::{ChaincodeStub, Stub};
pub use types::{FunctionAndParameters, InvocationRequest, InvocationResult};

/// What a handler hands back to the dispatcher: the response payload, or why it failed.
pub type HandlerResult = Result<Vec<u8>, HandlerError>;

/// A chaincode method that can be looked up by name and called with string arguments.
pub trait Handler {
    fn name(&self) -> &str;

    fn call<'call>(
        &'call self,
        stub: &'call dyn Stub,
        args: Vec<String>,
    ) -> BoxFuture<'call, HandlerResult>;
}

#[doc(hidden)]
pub fn boxed_handler_future<'a, F>(fut: F) -> BoxFuture<'a, HandlerResult>
where
    F: Future<Output = HandlerResult> + Send + 'a,
{
    Box::pin(fut)
}
