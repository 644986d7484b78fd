use serde_json::json;
use tandem_core::ServerEvent;

use crate::integration::init_tracing;
use crate::utils::TestServer;

#[tokio::test]
async fn test_malformed_events_are_dropped() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");
    let mut client = server.connect().await.expect("Failed to connect");

    for frame in [
        "not json at all".to_string(),
        json!({"op": "teleport", "d": {"room": "r"}}).to_string(),
        json!({"op": "offer", "d": {"payload": {"sdp": "x"}}}).to_string(),
        json!({"op": "join", "d": {"room": ""}}).to_string(),
        json!({"op": "join"}).to_string(),
    ] {
        client.send_raw(frame).await.expect("Failed to send frame");
    }

    client.expect_silence().await.expect("Malformed input must be dropped");
    assert_eq!(server.session.rooms().room_count(), 0);

    // The connection is still usable
    assert_eq!(client.join("r").await.unwrap(), ServerEvent::Created);
}
