//! Local invocation service: a [`Dispatcher`](crate::Dispatcher) served over TCP
//! with bincode frames. Meant for development, not as the peer protocol.

pub mod client;
pub mod server;

use crate::{stub::ChaincodeStub, types::InvocationResult};
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug)]
pub(crate) enum Request {
    Ping,
    Methods,
    Init(ChaincodeStub),
    Invoke(ChaincodeStub),
}

#[derive(Serialize, Deserialize, Debug)]
pub(crate) enum Response {
    Pong,
    Methods(Vec<String>),
    Result(InvocationResult),
}

#[derive(Debug, Error)]
pub enum NetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("bincode error: {0}")]
    Codec(String),

    #[error("connection closed before a response arrived")]
    Closed,

    #[error("unexpected response: {0}")]
    Unexpected(String),
}
