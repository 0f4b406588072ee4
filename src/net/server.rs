use crate::{
    dispatcher::Dispatcher,
    net::{Request, Response},
};
use async_bincode::tokio::AsyncBincodeStream;
use futures::{SinkExt, StreamExt};
use std::{io, sync::Arc, time::Duration};
use tokio::{
    io::BufStream,
    net::{TcpListener, TcpStream, ToSocketAddrs},
    task, time,
};

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct Server {
    dispatcher: Dispatcher,
}

impl Server {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    async fn handle_request(&self, req: Request) -> Response {
        match req {
            Request::Ping => Response::Pong,
            Request::Methods => Response::Methods(self.dispatcher.methods()),
            Request::Init(_stub) => Response::Result(self.dispatcher.initialize()),
            Request::Invoke(stub) => Response::Result(self.dispatcher.invoke(&stub).await),
        }
    }

    pub async fn serve_tcp(self, addr: impl ToSocketAddrs) -> io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Accepts connections forever, one task per connection. A failed accept is
    /// logged and skipped.
    pub async fn serve(self, listener: TcpListener) -> io::Result<()> {
        tracing::info!(
            chaincode = self.dispatcher.name(),
            addr = %listener.local_addr()?,
            "serving"
        );
        let root_arc = Arc::new(self);
        loop {
            let arc_self = root_arc.clone();
            let (sock, addr) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::warn!("failed to accept connection: {e}");
                    time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };
            tracing::debug!(%addr, "accepted connection");
            task::spawn(async move {
                arc_self.handle_connection(sock).await;
                tracing::debug!(%addr, "connection closed");
            });
        }
    }

    async fn handle_connection(&self, sock: TcpStream) {
        let mut sock =
            AsyncBincodeStream::<_, Request, Response, _>::from(BufStream::new(sock)).for_async();

        while let Some(request) = sock.next().await {
            let request = match request {
                Ok(request) => request,
                Err(e) => {
                    tracing::warn!("undecodable request: {e}");
                    return;
                }
            };
            let response = self.handle_request(request).await;
            if let Err(e) = sock.send(response).await {
                tracing::warn!("failed to send response: {e}");
                return;
            }
        }
    }
}
