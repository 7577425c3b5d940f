use axum::{
    Json, Router,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use counter_badge::{
    BadgeConfig, FetchErrorKind, Lang, NullSink, Profile, RenderUpdate, mount,
};
use once_cell::sync::Lazy;
use serde_json::json;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
});

const STALE_DELAY: Duration = Duration::from_millis(300);

async fn profile(Path(slug): Path<String>) -> Response {
    match slug.as_str() {
        "missing" => StatusCode::NOT_FOUND.into_response(),
        "garbled" => (
            [(header::CONTENT_TYPE, "application/json")],
            "this is not json",
        )
            .into_response(),
        "slow-old" => {
            // Simulates a response that arrives after the host has already
            // switched to another slug.
            sleep(STALE_DELAY).await;
            Json(profile_json("Old", "slow-old")).into_response()
        }
        _ => Json(profile_json("Ada", &slug)).into_response(),
    }
}

fn profile_json(nickname: &str, slug: &str) -> serde_json::Value {
    json!({
        "user": { "nickname": nickname, "slug": slug },
        "thankus": { "collected": 42, "sent": 7 }
    })
}

async fn spawn_api() -> String {
    Lazy::force(&TRACING);
    let app = Router::new().route("/api/profile/:slug", get(profile));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub api");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub api serve");
    });
    format!("http://{addr}")
}

fn config(origin: &str, slug: &str) -> BadgeConfig {
    BadgeConfig::new()
        .origin(origin)
        .slug(slug)
        .duration(Duration::from_millis(25))
}

#[tokio::test]
async fn connected_badge_loads_profile_and_rotates() {
    let origin = spawn_api().await;
    let mut handle = mount(config(&origin, "ada"), NullSink);
    handle.connect();

    let state = handle.wait_for(|s| s.profile.is_loaded()).await;
    let data = match &state.profile {
        Profile::Loaded(data) => data.clone(),
        other => panic!("expected loaded profile, got {other:?}"),
    };
    assert_eq!(data.user.nickname, "Ada");
    assert_eq!(data.thankus.collected, 42);
    assert_eq!(data.thankus.sent, 7);

    let state = timeout(Duration::from_secs(2), handle.wait_for(|s| s.step > 0))
        .await
        .expect("step should advance after a tick");
    assert!(state.timer.is_some());
    assert!(state.step < 4);
    handle.close();
}

#[tokio::test]
async fn http_404_fails_without_starting_timer() {
    let origin = spawn_api().await;
    let mut handle = mount(config(&origin, "missing"), NullSink);
    handle.connect();

    let state = handle
        .wait_for(|s| matches!(s.profile, Profile::Failed(_)))
        .await;
    match &state.profile {
        Profile::Failed(error) => assert_eq!(error.kind, FetchErrorKind::DataNotAvailable),
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(state.connected);
    assert!(state.timer.is_none());

    // The timer stays off even after a generous wait.
    sleep(Duration::from_millis(100)).await;
    let state = handle.state();
    assert!(state.timer.is_none());
    assert_eq!(state.step, 0);
    handle.close();
}

#[tokio::test]
async fn unparseable_body_is_reported_as_malformed() {
    let origin = spawn_api().await;
    let mut handle = mount(config(&origin, "garbled"), NullSink);

    let state = handle
        .wait_for(|s| matches!(s.profile, Profile::Failed(_)))
        .await;
    match &state.profile {
        Profile::Failed(error) => assert_eq!(error.kind, FetchErrorKind::DataMalformed),
        other => panic!("expected failure, got {other:?}"),
    }
    handle.close();
}

#[tokio::test]
async fn unreachable_origin_is_a_connection_problem() {
    let mut handle = mount(config("http://127.0.0.1:9", "ada"), NullSink);

    let state = handle
        .wait_for(|s| matches!(s.profile, Profile::Failed(_)))
        .await;
    match &state.profile {
        Profile::Failed(error) => assert_eq!(error.kind, FetchErrorKind::ConnectionProblems),
        other => panic!("expected failure, got {other:?}"),
    }
    handle.close();
}

#[tokio::test]
async fn slug_change_discards_stale_response() {
    let origin = spawn_api().await;
    let mut handle = mount(config(&origin, "slow-old"), NullSink);

    // Switch slugs while the first fetch is still pending.
    handle.set_slug("ada");
    let state = handle.wait_for(|s| s.profile.is_loaded()).await;
    match &state.profile {
        Profile::Loaded(data) => assert_eq!(data.user.slug, "ada"),
        other => panic!("expected loaded profile, got {other:?}"),
    }

    // Let the old response land; it must not overwrite the newer data.
    sleep(STALE_DELAY + Duration::from_millis(100)).await;
    match &handle.state().profile {
        Profile::Loaded(data) => assert_eq!(data.user.slug, "ada"),
        other => panic!("stale response overwrote state: {other:?}"),
    }
    handle.close();
}

#[tokio::test]
async fn duration_update_leaves_exactly_one_timer() {
    let origin = spawn_api().await;
    let mut handle = mount(config(&origin, "ada"), NullSink);
    handle.connect();

    let first_timer = handle
        .wait_for(|s| s.profile.is_loaded() && s.timer.is_some())
        .await
        .timer;

    // Slow the rotation right down; the restart must replace the 25ms timer.
    handle.set_duration(Duration::from_secs(5));
    let state = handle
        .wait_for(|s| s.duration == Duration::from_secs(5) && s.timer != first_timer)
        .await;
    assert!(state.timer.is_some());

    // If the old fast timer leaked, the step would keep climbing. A short
    // settle window lets any tick that raced the restart drain first.
    sleep(Duration::from_millis(100)).await;
    let settled = handle.state().step;
    sleep(Duration::from_millis(200)).await;
    assert_eq!(handle.state().step, settled);
    handle.close();
}

#[tokio::test]
async fn disconnect_stops_rotation() {
    let origin = spawn_api().await;
    let mut handle = mount(config(&origin, "ada"), NullSink);
    handle.connect();
    handle
        .wait_for(|s| s.profile.is_loaded() && s.step > 0)
        .await;

    handle.disconnect();
    handle.wait_for(|s| !s.connected && s.timer.is_none()).await;
    // Let any tick that raced the stop drain before freezing.
    sleep(Duration::from_millis(100)).await;
    let frozen = handle.state().step;

    sleep(Duration::from_millis(150)).await;
    assert_eq!(handle.state().step, frozen);
    handle.close();
}

#[tokio::test]
async fn renders_full_then_step_updates() {
    let origin = spawn_api().await;
    let (sink_tx, mut sink_rx) = mpsc::unbounded_channel();
    let handle = mount(config(&origin, "ada"), move |update: RenderUpdate| {
        let _ = sink_tx.send(update);
    });
    handle.connect();

    // First full render carries the badge markup once the profile loads;
    // subsequent ticks only toggle the step.
    let mut saw_loaded_full = false;
    let mut saw_step = false;
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while let Ok(Some(update)) = timeout(Duration::from_secs(2), sink_rx.recv()).await {
        match update {
            RenderUpdate::Full(html) => {
                if html.contains("container--steps") {
                    assert!(html.contains("https://thx.to/:ada/en"));
                    saw_loaded_full = true;
                }
            }
            RenderUpdate::Step(step) => {
                assert!(saw_loaded_full, "step update before any full render");
                assert!(step < 4);
                saw_step = true;
                break;
            }
        }
        if tokio::time::Instant::now() > deadline {
            break;
        }
    }
    assert!(saw_loaded_full);
    assert!(saw_step);
    handle.close();
}

#[tokio::test]
async fn lang_update_triggers_localized_full_render() {
    let origin = spawn_api().await;
    let (sink_tx, mut sink_rx) = mpsc::unbounded_channel();
    let mut handle = mount(config(&origin, "ada"), move |update: RenderUpdate| {
        let _ = sink_tx.send(update);
    });

    handle.wait_for(|s| s.profile.is_loaded()).await;
    handle.set_lang(Lang::De);
    handle.wait_for(|s| s.lang == Lang::De).await;

    let mut saw_german = false;
    while let Ok(Some(update)) = timeout(Duration::from_secs(2), sink_rx.recv()).await {
        if let RenderUpdate::Full(html) = update {
            if html.contains("https://thx.to/:ada/de") {
                assert!(html.contains("ThankU-Seite von Ada besuchen"));
                saw_german = true;
                break;
            }
        }
    }
    assert!(saw_german);
    handle.close();
}

#[tokio::test]
async fn badges_are_independent() {
    let origin = spawn_api().await;
    let mut first = mount(config(&origin, "ada"), NullSink);
    let mut second = mount(config(&origin, "grace"), NullSink);
    first.connect();
    second.connect();

    let a = first.wait_for(|s| s.profile.is_loaded()).await;
    let b = second.wait_for(|s| s.profile.is_loaded()).await;
    match (&a.profile, &b.profile) {
        (Profile::Loaded(a), Profile::Loaded(b)) => {
            assert_eq!(a.user.slug, "ada");
            assert_eq!(b.user.slug, "grace");
        }
        other => panic!("expected two loaded profiles, got {other:?}"),
    }

    // Tearing one down leaves the other rotating.
    first.close();
    let before = second.state().step;
    second
        .wait_for(|s| s.step != before)
        .await;
    second.close();
}
