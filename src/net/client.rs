use super::{NetError, Request, Response};
use crate::{stub::ChaincodeStub, types::InvocationResult};
use async_bincode::{tokio::AsyncBincodeStream, AsyncDestination};
use futures::{SinkExt, StreamExt};
use tokio::{
    io::BufStream,
    net::{TcpStream, ToSocketAddrs},
};

pub struct Client {
    sock: AsyncBincodeStream<BufStream<TcpStream>, Response, Request, AsyncDestination>,
}

impl Client {
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, NetError> {
        let sock = TcpStream::connect(addr).await?;
        let sock = BufStream::new(sock);
        let sock = AsyncBincodeStream::from(sock).for_async();
        Ok(Self { sock })
    }

    async fn send_recv(&mut self, req: Request) -> Result<Response, NetError> {
        self.sock
            .send(req)
            .await
            .map_err(|e| NetError::Codec(e.to_string()))?;
        self.sock
            .next()
            .await
            .ok_or(NetError::Closed)?
            .map_err(|e| NetError::Codec(e.to_string()))
    }

    pub async fn ping(&mut self) -> Result<(), NetError> {
        match self.send_recv(Request::Ping).await? {
            Response::Pong => Ok(()),
            other => Err(NetError::Unexpected(format!("{other:?}"))),
        }
    }

    pub async fn methods(&mut self) -> Result<Vec<String>, NetError> {
        match self.send_recv(Request::Methods).await? {
            Response::Methods(names) => Ok(names),
            other => Err(NetError::Unexpected(format!("{other:?}"))),
        }
    }

    pub async fn init(&mut self, stub: ChaincodeStub) -> Result<InvocationResult, NetError> {
        self.result(Request::Init(stub)).await
    }

    pub async fn invoke(&mut self, stub: ChaincodeStub) -> Result<InvocationResult, NetError> {
        self.result(Request::Invoke(stub)).await
    }

    async fn result(&mut self, req: Request) -> Result<InvocationResult, NetError> {
        match self.send_recv(req).await? {
            Response::Result(result) => Ok(result),
            other => Err(NetError::Unexpected(format!("{other:?}"))),
        }
    }
}
