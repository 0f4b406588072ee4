use chaincode_dispatch::{
    chaincode::very_simple,
    net::{client::Client, server::Server},
    ChaincodeStub, InvocationResult, MemoryLogger,
};
use std::sync::Arc;
use tokio::{
    io::AsyncWriteExt,
    net::{TcpListener, TcpStream},
    task,
};

async fn start() -> (std::net::SocketAddr, Arc<MemoryLogger>) {
    let logger = Arc::new(MemoryLogger::default());
    let chaincode = very_simple(logger.clone()).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    task::spawn(Server::new(chaincode).serve(listener));
    (addr, logger)
}

#[tokio::test]
async fn ping_init_and_invoke_over_tcp() {
    let (addr, logger) = start().await;
    let mut client = Client::connect(addr).await.unwrap();

    client.ping().await.unwrap();
    assert_eq!(client.methods().await.unwrap(), ["ping"]);

    let init = client.init(ChaincodeStub::new(["Init"])).await.unwrap();
    assert_eq!(init, InvocationResult::success(None));

    let pong = client
        .invoke(ChaincodeStub::new(["ping"]).with_tx_id("tx1"))
        .await
        .unwrap();
    assert_eq!(
        pong,
        InvocationResult::success(Some(br#"{"ping":"pong"}"#.to_vec()))
    );

    let unknown = client.invoke(ChaincodeStub::new(["pong"])).await.unwrap();
    assert_eq!(unknown.status(), InvocationResult::ERROR);
    assert_eq!(
        unknown.message(),
        Some("Received unknown function pong invocation")
    );

    assert!(logger.lines().contains(&"very-simple init".to_owned()));
    assert!(logger.lines().contains(&"ping called".to_owned()));
}

#[tokio::test]
async fn separate_clients_get_their_own_answers() {
    let (addr, _logger) = start().await;

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            task::spawn(async move {
                let mut client = Client::connect(addr).await.unwrap();
                let method = if i % 2 == 0 { "ping" } else { "missing" };
                let result = client.invoke(ChaincodeStub::new([method])).await.unwrap();
                (method, result)
            })
        })
        .collect();

    for task in tasks {
        let (method, result) = task.await.unwrap();
        assert_eq!(result.is_success(), method == "ping");
    }
}

#[tokio::test]
async fn broken_connections_do_not_stop_the_server() {
    let (addr, _logger) = start().await;

    for _ in 0..3 {
        let mut raw = TcpStream::connect(addr).await.unwrap();
        raw.write_all(&[0xff; 3]).await.unwrap();
        drop(raw);
    }

    let mut client = Client::connect(addr).await.unwrap();
    client.ping().await.unwrap();
    let pong = client.invoke(ChaincodeStub::new(["ping"])).await.unwrap();
    assert!(pong.is_success());
}
