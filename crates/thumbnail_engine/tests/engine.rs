use std::sync::Arc;
use std::time::Duration;

use thumbnail_core::{FetchMode, FetchTier, ImageHost, Item};
use thumbnail_engine::{EngineConfig, EngineEvent, EngineHandle};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wait_for_completion(engine: &EngineHandle) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while let Some(event) = engine.recv() {
        let done = matches!(
            event,
            EngineEvent::BuildCompleted(_) | EngineEvent::SaveCompleted(_)
        );
        events.push(event);
        if done {
            break;
        }
    }
    events
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn engine_builds_and_saves_archive_with_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/steam/apps/1/header.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("one", "image/jpeg"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp = tempfile::TempDir::new().unwrap();
    let mut config = EngineConfig::default_with_output(temp.path().to_path_buf());
    config.host = ImageHost::parse(&server.uri()).unwrap();
    config.generated_utc = Arc::new(|| "2024-01-01T00:00:00Z".to_string());
    let engine = EngineHandle::new(config).unwrap();

    engine.build(
        vec![Item::new(1, "One"), Item::new(2, "Two")],
        FetchMode::Exact(FetchTier::Header),
    );
    let events = tokio::task::block_in_place(|| wait_for_completion(&engine));

    assert!(events
        .iter()
        .any(|e| matches!(e, EngineEvent::Progress(p) if p.image_percent == 100)));
    let summary = match events.last() {
        Some(EngineEvent::BuildCompleted(Ok(summary))) => summary.clone(),
        other => panic!("unexpected final event {other:?}"),
    };
    assert_eq!(summary.packaged, 1);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].id, 2);

    engine.save("Test.zip");
    let events = tokio::task::block_in_place(|| wait_for_completion(&engine));
    let saved = match events.last() {
        Some(EngineEvent::SaveCompleted(Ok(saved))) => saved.clone(),
        other => panic!("unexpected final event {other:?}"),
    };
    assert_eq!(saved.archive_path, temp.path().join("Test.zip"));
    assert_eq!(
        saved.report_path.as_deref(),
        Some(temp.path().join("Test.failures.json").as_path())
    );
    assert!(std::fs::metadata(&saved.archive_path).unwrap().len() > 0);
}

#[test]
fn save_before_build_reports_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let engine =
        EngineHandle::new(EngineConfig::default_with_output(temp.path().to_path_buf())).unwrap();

    engine.save("Nothing.zip");
    let mut event = None;
    for _ in 0..50 {
        event = engine.try_recv();
        if event.is_some() {
            break;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    assert!(matches!(event, Some(EngineEvent::SaveCompleted(Err(_)))));
}
