use tandem_core::ServerEvent;

use crate::integration::init_tracing;
use crate::utils::TestServer;

#[tokio::test]
async fn test_disconnect_frees_slot() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");

    let mut a = server.connect().await.expect("Failed to connect a");
    let mut b = server.connect().await.expect("Failed to connect b");
    let mut c = server.connect().await.expect("Failed to connect c");

    assert_eq!(a.join("room1").await.unwrap(), ServerEvent::Created);
    assert_eq!(b.join("room1").await.unwrap(), ServerEvent::Joined);
    assert_eq!(c.join("room1").await.unwrap(), ServerEvent::Full);

    a.close().await.expect("Failed to close a");
    server
        .wait_for_occupants("room1", 1)
        .await
        .expect("room1 should keep only b");

    // The remaining peer is not told about the departure
    b.expect_silence().await.expect("b should hear nothing");

    assert_eq!(c.join("room1").await.unwrap(), ServerEvent::Joined);

    b.close().await.expect("Failed to close b");
    c.close().await.expect("Failed to close c");
    server
        .wait_for_occupants("room1", 0)
        .await
        .expect("room1 should be gone");
    assert_eq!(server.session.rooms().room_count(), 0);

    let mut d = server.connect().await.expect("Failed to connect d");
    assert_eq!(d.join("room1").await.unwrap(), ServerEvent::Created);
}
