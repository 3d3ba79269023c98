mod common;

use common::{TestServerConfig, WsTestClient, create_test_server, create_test_server_with_config};

use sa_core::{ClientMessage, ServerMessage};

use axum::http::StatusCode;
use googletest::prelude::*;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use uuid::Uuid;

#[tokio::test]
async fn given_new_connection_when_connected_then_first_message_carries_uuid_client_id() {
    // Given
    let server = create_test_server().await;

    // When
    let client = WsTestClient::connect(&server.server, None).await;

    // Then
    assert_that!(Uuid::parse_str(&client.client_id).is_ok(), eq(true));
    client.close().await;
}

#[tokio::test]
async fn given_connected_client_when_ping_then_pong() {
    // Given
    let server = create_test_server().await;
    let mut client = WsTestClient::connect(&server.server, Some("main-scene")).await;

    // When
    client.send(ClientMessage::Ping).await;

    // Then
    assert_that!(client.receive().await, eq(&ServerMessage::Pong));
    client.close().await;
}

#[tokio::test]
async fn given_malformed_json_when_sent_then_connection_stays_open() {
    // Given
    let server = create_test_server().await;
    let mut client = WsTestClient::connect(&server.server, None).await;

    // When
    client.send_text("{not json").await;
    client.send_text(r#"{"type":"dance"}"#).await;
    client.send(ClientMessage::Ping).await;

    // Then
    assert_that!(client.receive().await, eq(&ServerMessage::Pong));
    client.close().await;
}

#[tokio::test]
async fn given_two_connections_when_connected_then_client_ids_differ() {
    // Given
    let server = create_test_server().await;

    // When
    let first = WsTestClient::connect(&server.server, None).await;
    let second = WsTestClient::connect(&server.server, None).await;

    // Then
    assert_that!(first.client_id, not(eq(&second.client_id)));
    first.close().await;
    second.close().await;
}

#[tokio::test]
async fn given_malformed_channel_when_upgrading_then_bad_request() {
    // Given
    let server = create_test_server().await;

    // When
    let response = server
        .server
        .get_websocket("/ws")
        .add_query_param("channel", "Not Valid!")
        .expect_failure()
        .await;

    // Then
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_connection_limit_reached_when_upgrading_then_service_unavailable() {
    // Given
    let server = create_test_server_with_config(TestServerConfig::with_strict_limits()).await;
    let _first = WsTestClient::connect(&server.server, None).await;
    let _second = WsTestClient::connect(&server.server, None).await;

    // When
    let response = server
        .server
        .get_websocket("/ws")
        .expect_failure()
        .await;

    // Then
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn given_abandoned_handshakes_when_client_connects_then_slot_is_available() {
    // Given
    let server = create_test_server_with_config(TestServerConfig {
        max_connections_total: 1,
        ..Default::default()
    })
    .await;
    let address = server
        .server
        .server_address()
        .expect("http transport has an address");
    let host = format!(
        "{}:{}",
        address.host_str().unwrap_or("127.0.0.1"),
        address.port().unwrap_or(80)
    );

    // When
    for _ in 0..3 {
        let mut stream = TcpStream::connect(&host).await.unwrap();
        stream
            .write_all(
                b"GET /ws HTTP/1.1\r\n\
                  Host: localhost\r\n\
                  Connection: Upgrade\r\n\
                  Upgrade: websocket\r\n\
                  Sec-WebSocket-Version: 13\r\n\
                  Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\r\n",
            )
            .await
            .unwrap();
        drop(stream);
    }
    for _ in 0..50 {
        if server.app_state.registry.total_count().await == 0 {
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
    }

    // Then
    assert_that!(server.app_state.registry.total_count().await, eq(0));
    let client = WsTestClient::connect(&server.server, None).await;
    assert_that!(server.app_state.registry.total_count().await, eq(1));
    client.close().await;
}

#[tokio::test]
async fn given_rate_limit_exhausted_when_pinging_then_excess_is_dropped() {
    // Given
    let server =
        create_test_server_with_config(TestServerConfig::with_strict_rate_limits()).await;
    let mut client = WsTestClient::connect(&server.server, None).await;

    // When
    client.send(ClientMessage::Ping).await;
    client.send(ClientMessage::Ping).await;
    client.send(ClientMessage::Ping).await;

    // Then
    assert_that!(client.receive().await, eq(&ServerMessage::Pong));
    assert_that!(client.receive().await, eq(&ServerMessage::Pong));
    assert_that!(server.app_state.registry.total_count().await, eq(1));
    client.close().await;
}

#[tokio::test]
async fn given_connected_client_when_closed_then_registry_is_cleaned_up() {
    // Given
    let server = create_test_server().await;
    let client = WsTestClient::connect(&server.server, Some("side-cam")).await;

    // When
    client.close().await;
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    // Then
    assert_that!(server.app_state.registry.total_count().await, eq(0));
    assert_that!(
        server.app_state.broadcaster.subscriber_count("side-cam").await,
        eq(0)
    );
}

#[tokio::test]
async fn given_connected_client_when_server_shuts_down_then_connection_is_released() {
    // Given
    let server = create_test_server().await;
    let _client = WsTestClient::connect(&server.server, None).await;

    // When
    server.app_state.shutdown.shutdown();
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    // Then
    assert_that!(server.app_state.registry.total_count().await, eq(0));
}
