//! The very-simple chaincode: a dispatcher serving `ping`.

use crate::{
    call, name, Dispatcher, Handler, HandlerError, HandlerRegistry, Logger, RegistryError,
};
use serde::Serialize;
use std::sync::Arc;

pub const NAME: &str = "very-simple";

#[derive(Serialize)]
struct Pong {
    ping: &'static str,
}

/// Answers every call with `{"ping":"pong"}`.
pub struct Ping {
    logger: Arc<dyn Logger>,
}

impl Ping {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl Handler for Ping {
    name!("ping");
    call! {
        async fn call(&self, _stub, _args) {
            self.logger.info("ping called");
            serde_json::to_vec(&Pong { ping: "pong" }).map_err(|e| HandlerError::msg(e.to_string()))
        }
    }
}

pub fn very_simple(logger: Arc<dyn Logger>) -> Result<Dispatcher, RegistryError> {
    let mut registry = HandlerRegistry::new();
    registry.insert(Ping::new(logger.clone()))?;
    Ok(Dispatcher::new(NAME, registry, logger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChaincodeStub, InvocationResult, MemoryLogger};

    #[tokio::test]
    async fn ping_returns_pong() {
        let logger = Arc::new(MemoryLogger::default());
        let stub = ChaincodeStub::default();
        let payload = Ping::new(logger.clone())
            .call(&stub, vec!["ignored".into()])
            .await
            .unwrap();
        assert_eq!(payload, br#"{"ping":"pong"}"#);
        assert_eq!(logger.lines(), ["ping called"]);
    }

    #[tokio::test]
    async fn very_simple_only_serves_ping() {
        let logger = Arc::new(MemoryLogger::default());
        let chaincode = very_simple(logger).unwrap();
        assert_eq!(chaincode.name(), "very-simple");
        assert_eq!(chaincode.methods(), ["ping"]);

        let result = chaincode.invoke(&ChaincodeStub::new(["Init"])).await;
        assert_eq!(
            result,
            InvocationResult::error("Received unknown function Init invocation")
        );
    }
}
