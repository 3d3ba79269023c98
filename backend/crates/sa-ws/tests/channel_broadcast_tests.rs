mod common;

use common::{
    TEST_OWNER, TestServerConfig, WsTestClient, create_test_server, create_test_server_with_config,
};

use sa_core::{
    BrowserSourceChannel, ClientMessage, EventAction, EventOccurrence, EventType, ServerMessage,
    compose_test_alert,
};
use sa_db::{BrowserSourceChannelRepository, EventActionRepository};
use sa_ws::DispatchOutcome;

use googletest::prelude::*;
use tokio::time::{Duration, timeout};

#[tokio::test]
async fn given_clients_on_two_channels_when_event_dispatched_then_only_target_channel_receives() {
    // Given
    let server = create_test_server().await;
    BrowserSourceChannelRepository::new(server.pool.clone())
        .create(&BrowserSourceChannel::new(TEST_OWNER, "main-scene"))
        .await
        .unwrap();
    let mut action = EventAction::new(TEST_OWNER, EventType::Follow);
    action.browser_source_channel = "main-scene".to_string();
    action.text.enabled = true;
    EventActionRepository::new(server.pool.clone())
        .create(&action)
        .await
        .unwrap();

    let mut main_a = WsTestClient::connect(&server.server, Some("main-scene")).await;
    let mut main_b = WsTestClient::connect(&server.server, Some("main-scene")).await;
    let mut other = WsTestClient::connect(&server.server, None).await;

    // When
    let occurrence = EventOccurrence::new(TEST_OWNER, EventType::Follow).with("username", "bob");
    let outcome = server
        .app_state
        .dispatcher
        .dispatch(&occurrence)
        .await
        .unwrap();

    // Then
    assert_that!(
        outcome,
        eq(&DispatchOutcome::Delivered {
            channel: "main-scene".to_string(),
            receivers: 2,
        })
    );
    for client in [&mut main_a, &mut main_b] {
        let ServerMessage::Alert { payload } = client.receive().await else {
            panic!("expected an alert");
        };
        assert_that!(payload.text.map(|t| t.content), some(eq("bob")));
    }

    // The default channel saw nothing: its next message is the pong
    other.send(ClientMessage::Ping).await;
    assert_that!(other.receive().await, eq(&ServerMessage::Pong));
}

#[tokio::test]
async fn given_client_when_test_alert_requested_then_its_channel_receives_alert() {
    // Given
    let server = create_test_server().await;
    let mut requester = WsTestClient::connect(&server.server, Some("side-cam")).await;
    let mut neighbour = WsTestClient::connect(&server.server, Some("side-cam")).await;

    // When
    requester.send(ClientMessage::TestAlert).await;

    // Then
    for client in [&mut requester, &mut neighbour] {
        let message = timeout(Duration::from_secs(2), client.receive())
            .await
            .expect("alert not received");
        let ServerMessage::Alert { payload } = message else {
            panic!("expected an alert, got {message:?}");
        };
        assert_that!(
            payload.text.map(|t| t.content),
            some(contains_substring("side-cam"))
        );
    }
}

#[tokio::test]
async fn given_burst_larger_than_send_buffer_when_broadcast_then_every_alert_arrives_in_order() {
    // Given
    let server =
        create_test_server_with_config(TestServerConfig::with_small_send_buffer(4)).await;
    let mut client = WsTestClient::connect(&server.server, None).await;

    // When
    for i in 0..20 {
        let mut payload = compose_test_alert("default");
        if let Some(text) = payload.text.as_mut() {
            text.content = format!("raid-{i}");
        }
        server
            .app_state
            .broadcaster
            .broadcast("default", ServerMessage::Alert { payload })
            .await;
    }

    // Then
    for i in 0..20 {
        let message = timeout(Duration::from_secs(2), client.receive())
            .await
            .expect("alert not received");
        let ServerMessage::Alert { payload } = message else {
            panic!("expected an alert, got {message:?}");
        };
        let expected = format!("raid-{i}");
        assert_that!(payload.text.map(|t| t.content), some(eq(expected.as_str())));
    }
    client.close().await;
}
