//! Integration tests for the WebSocket transport.
//!
//! These tests spin up a real WebSocket server and client to verify that
//! data actually flows over the network correctly, including the origin
//! gate and the split sink/source behavior the server relies on.

#[cfg(feature = "websocket")]
mod websocket {
    use std::time::Duration;

    use futures_util::{SinkExt, StreamExt};
    use raidcore_transport::{Connection, Transport, WebSocketTransport};
    use tokio_tungstenite::tungstenite::client::IntoClientRequest;
    use tokio_tungstenite::tungstenite::http::HeaderValue;
    use tokio_tungstenite::tungstenite::Message;

    type ClientWs = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    /// Binds a transport on a random port and returns it with its address.
    async fn bind_transport() -> (WebSocketTransport, String) {
        let transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport
            .local_addr()
            .expect("should have local addr")
            .to_string();
        (transport, addr)
    }

    async fn connect_client(addr: &str) -> ClientWs {
        let url = format!("ws://{addr}");
        let (ws, _) = tokio_tungstenite::connect_async(&url)
            .await
            .expect("client should connect");
        ws
    }

    #[tokio::test]
    async fn test_websocket_accept_and_send_receive() {
        let (mut transport, addr) = bind_transport().await;

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.expect("task should complete");

        assert!(server_conn.id().into_inner() > 0);

        // --- Server sends, client receives ---
        server_conn
            .send(b"hello from server")
            .await
            .expect("send should succeed");

        let msg = client_ws.next().await.unwrap().unwrap();
        assert_eq!(msg.into_data().as_ref(), b"hello from server");

        // --- Client sends, server receives ---
        client_ws
            .send(Message::Binary(b"hello from client".to_vec().into()))
            .await
            .unwrap();

        let received = server_conn
            .recv()
            .await
            .expect("recv should succeed")
            .expect("should have data");
        assert_eq!(received, b"hello from client");

        server_conn.close().await.expect("close should succeed");
    }

    #[tokio::test]
    async fn test_websocket_text_frames_received_as_bytes() {
        // Browser clients send JSON as text frames, not binary.
        let (mut transport, addr) = bind_transport().await;

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.unwrap();

        client_ws
            .send(Message::Text(r#"{"type":"joinRoom"}"#.into()))
            .await
            .unwrap();

        let received = server_conn.recv().await.unwrap().unwrap();
        assert_eq!(received, br#"{"type":"joinRoom"}"#);
    }

    #[tokio::test]
    async fn test_websocket_recv_returns_none_on_client_close() {
        let (mut transport, addr) = bind_transport().await;

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.unwrap();

        client_ws.send(Message::Close(None)).await.unwrap();

        let result = server_conn.recv().await.expect("recv should not error");
        assert!(result.is_none(), "should return None on client close");
    }

    #[tokio::test]
    async fn test_websocket_send_completes_while_recv_pending() {
        // The connection is split: a pending read must not block writes.
        let (mut transport, addr) = bind_transport().await;

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.unwrap();

        // Park a recv with nothing to read.
        let reader = server_conn.clone();
        let recv_task =
            tokio::spawn(async move { reader.recv().await });

        tokio::time::sleep(Duration::from_millis(20)).await;

        // Writes must still go through.
        tokio::time::timeout(
            Duration::from_secs(1),
            server_conn.send(b"pushed while reading"),
        )
        .await
        .expect("send should not block on the pending recv")
        .expect("send should succeed");

        let msg = client_ws.next().await.unwrap().unwrap();
        assert_eq!(msg.into_data().as_ref(), b"pushed while reading");

        // Unblock the parked recv.
        client_ws
            .send(Message::Binary(b"reply".to_vec().into()))
            .await
            .unwrap();
        let received = recv_task.await.unwrap().unwrap().unwrap();
        assert_eq!(received, b"reply");
    }

    #[tokio::test]
    async fn test_origin_gate_rejects_mismatched_origin() {
        let transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind")
            .with_allowed_origin("http://game.example");
        let addr = transport.local_addr().unwrap().to_string();

        let mut transport = transport;
        let server_handle =
            tokio::spawn(async move { transport.accept().await });

        let mut request = format!("ws://{addr}")
            .into_client_request()
            .expect("request");
        request.headers_mut().insert(
            "Origin",
            HeaderValue::from_static("http://elsewhere.example"),
        );

        let result = tokio_tungstenite::connect_async(request).await;
        match result {
            Err(tokio_tungstenite::tungstenite::Error::Http(resp)) => {
                assert_eq!(resp.status(), 403);
            }
            other => panic!("expected 403 rejection, got {other:?}"),
        }

        assert!(server_handle.await.unwrap().is_err());
    }

    #[tokio::test]
    async fn test_origin_gate_admits_matching_and_absent_origin() {
        let transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind")
            .with_allowed_origin("http://game.example");
        let addr = transport.local_addr().unwrap().to_string();

        let mut transport = transport;
        let server_handle = tokio::spawn(async move {
            let first = transport.accept().await.expect("matching origin");
            let second = transport.accept().await.expect("absent origin");
            (first, second)
        });

        // Matching Origin header.
        let mut request = format!("ws://{addr}")
            .into_client_request()
            .expect("request");
        request.headers_mut().insert(
            "Origin",
            HeaderValue::from_static("http://game.example"),
        );
        tokio_tungstenite::connect_async(request)
            .await
            .expect("matching origin should connect");

        // No Origin header at all (non-browser client).
        connect_client(&addr).await;

        let (first, second) = server_handle.await.unwrap();
        assert_ne!(first.id(), second.id());
    }
}
