//! Invocation context handed to handlers.

use crate::types::FunctionAndParameters;
use serde::{Deserialize, Serialize};

/// Read access to the transaction a handler runs in.
pub trait Stub: Send + Sync {
    /// Raw invocation arguments; the first one names the function.
    fn args(&self) -> &[String];

    fn tx_id(&self) -> &str;

    fn channel_id(&self) -> &str;

    /// Splits [`args`](Stub::args) into the function name and its parameters.
    /// An empty argument list yields an empty function name.
    fn function_and_parameters(&self) -> FunctionAndParameters {
        match self.args().split_first() {
            Some((fcn, params)) => FunctionAndParameters {
                fcn: fcn.clone(),
                params: params.to_vec(),
            },
            None => FunctionAndParameters::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeStub {
    tx_id: String,
    channel_id: String,
    args: Vec<String>,
}

impl ChaincodeStub {
    pub fn new<S>(args: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.tx_id = tx_id.into();
        self
    }

    pub fn with_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }
}

impl Stub for ChaincodeStub {
    fn args(&self) -> &[String] {
        &self.args
    }

    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn channel_id(&self) -> &str {
        &self.channel_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_argument_is_the_function() {
        let stub = ChaincodeStub::new(["transfer", "alice", "bob", "10"]);
        let fp = stub.function_and_parameters();
        assert_eq!(fp.fcn, "transfer");
        assert_eq!(fp.params, ["alice", "bob", "10"]);
    }

    #[test]
    fn no_arguments_means_empty_function() {
        let stub = ChaincodeStub::new(Vec::<String>::new());
        assert_eq!(stub.function_and_parameters(), FunctionAndParameters::default());
    }

    #[test]
    fn builder_sets_ids() {
        let stub = ChaincodeStub::new(["ping"])
            .with_tx_id("tx1")
            .with_channel_id("mychannel");
        assert_eq!(stub.tx_id(), "tx1");
        assert_eq!(stub.channel_id(), "mychannel");
        assert_eq!(stub.args(), ["ping"]);
    }
}
