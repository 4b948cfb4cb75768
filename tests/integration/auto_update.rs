use std::time::Duration;
use tracechain::config::TraceConfig;
use tracechain::record::Stage;
use tracechain::session::Session;

fn session() -> Session {
    let mut config = TraceConfig::default();
    config.chain.difficulty = 0;
    config.feed.seed = Some(11);
    Session::new(config).unwrap()
}

#[tokio::test(start_paused = true)]
async fn feed_appends_after_delay_and_interval() {
    let session = session();
    assert!(session.start_auto_update().unwrap());
    assert!(!session.start_auto_update().unwrap());

    // Default delay 5s plus interval 25s.
    tokio::time::sleep(Duration::from_secs(29)).await;
    assert_eq!(session.chain().len(), 1);

    tokio::time::sleep(Duration::from_secs(2)).await;
    tokio::task::yield_now().await;
    assert_eq!(session.chain().len(), 2);

    let latest = session.chain().latest();
    assert!(latest.payload.is_automated);
    assert!(Stage::PIPELINE[..5].contains(&latest.payload.stage));
    assert!(session.chain().is_valid());

    tokio::time::sleep(Duration::from_secs(50)).await;
    tokio::task::yield_now().await;
    assert_eq!(session.chain().len(), 4);
    assert_eq!(session.updater().appended_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn nothing_appends_after_stop() {
    let session = session();
    session.start_auto_update().unwrap();
    tokio::time::sleep(Duration::from_secs(31)).await;
    tokio::task::yield_now().await;
    assert!(session.stop_auto_update());
    assert!(!session.stop_auto_update());

    let len = session.chain().len();
    tokio::time::sleep(Duration::from_secs(300)).await;
    tokio::task::yield_now().await;
    assert_eq!(session.chain().len(), len);
    assert!(!session.updater().is_running());
}

#[test]
fn start_without_runtime_is_an_error() {
    let session = session();
    assert!(session.start_auto_update().is_err());
    assert!(!session.updater().is_running());
}
