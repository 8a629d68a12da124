use std::sync::Once;
use std::time::Duration;

use jobhub_core::{update, AppState, Effect, JobRecord, JobStatus, Msg, PendingState};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(jobhub_logging::initialize_for_tests);
}

const URL: &str = "https://jobs.example.com/posting/42";

fn submit(state: AppState, url: &str, now_ms: u64) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::UrlSubmitted {
            url: url.to_string(),
            now_ms,
        },
    )
}

fn pending_id_of(effects: &[Effect]) -> String {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SubmitUrl { pending_id, .. } => Some(pending_id.clone()),
            _ => None,
        })
        .expect("submit effect")
}

fn request_of(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::LoadJobs { request } => Some(*request),
            _ => None,
        })
        .expect("load effect")
}

#[test]
fn submit_prepends_placeholder_and_emits_effect() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://first.example.com", 1_000);
    let (state, effects) = submit(state, &format!("  {URL}  "), 2_000);

    assert_eq!(
        effects,
        vec![Effect::SubmitUrl {
            pending_id: "pending-2000-2".to_string(),
            url: URL.to_string(),
        }]
    );
    let pending = state.pending();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].url, URL);
    assert_eq!(pending[0].status(), JobStatus::New);
    assert_eq!(pending[0].state, PendingState::Submitting);
    assert!(state.is_loading());

    let view = state.view();
    assert_eq!(view.pending_rows[0].headline, "Fetching...");
    assert_eq!(view.metrics[0].value, "2");
}

#[test]
fn invalid_urls_are_rejected_without_effects() {
    init_logging();
    for bad in ["", "   ", "not a url", "ftp://files.example.com/x"] {
        let (state, effects) = submit(AppState::new(), bad, 0);
        assert!(effects.is_empty(), "{bad:?} should be rejected");
        assert!(state.pending().is_empty());
        assert!(state.error().is_some());
    }
}

#[test]
fn placeholder_is_pruned_once_job_appears() {
    init_logging();
    let (state, effects) = submit(AppState::new(), URL, 10);
    let pending_id = pending_id_of(&effects);

    let (state, effects) = update(
        state,
        Msg::ScrapeFinished {
            pending_id,
            result: Ok(()),
        },
    );
    let request = request_of(&effects);
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request,
            result: Ok(vec![
                JobRecord {
                    url: URL.to_string(),
                    company: "Initech".to_string(),
                    ..JobRecord::new("42")
                },
                JobRecord::new("7"),
            ]),
        },
    );

    assert!(state.pending().is_empty());
    let view = state.view();
    let matching: Vec<_> = view
        .rows
        .iter()
        .filter(|row| row.url.as_deref() == Some(URL))
        .collect();
    assert_eq!(matching.len(), 1);
    assert!(view.pending_rows.is_empty());
}

#[test]
fn jobs_without_url_never_prune_placeholders() {
    init_logging();
    let (state, effects) = submit(AppState::new(), URL, 10);
    let (state, effects) = update(
        state,
        Msg::ScrapeFinished {
            pending_id: pending_id_of(&effects),
            result: Ok(()),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request: request_of(&effects),
            result: Ok(vec![JobRecord::new("1")]),
        },
    );
    assert_eq!(state.pending().len(), 1);
}

#[test]
fn failed_scrape_marks_placeholder_and_keeps_error_through_reload() {
    init_logging();
    let (state, effects) = submit(AppState::new(), URL, 10);
    let pending_id = pending_id_of(&effects);

    let (state, effects) = update(
        state,
        Msg::ScrapeFinished {
            pending_id,
            result: Err("Scrape request failed: 500".to_string()),
        },
    );
    assert_eq!(state.error(), Some("Scrape request failed: 500"));
    assert_eq!(
        state.pending()[0].state,
        PendingState::Failed("Scrape request failed: 500".to_string())
    );

    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request: request_of(&effects),
            result: Ok(vec![JobRecord::new("1")]),
        },
    );
    assert_eq!(state.error(), Some("Scrape request failed: 500"));
    let view = state.view();
    assert!(view.pending_rows[0].failed);
    assert!(view.pending_rows[0].headline.starts_with("Scrape failed"));
}

#[test]
fn orphaned_placeholders_expire_after_ttl() {
    init_logging();
    let state = AppState::new().with_pending_ttl(Some(Duration::from_secs(60)));
    let (state, _) = submit(state, URL, 1_000);

    let (mut state, _) = update(state, Msg::Tick { now_ms: 30_000 });
    assert_eq!(state.pending()[0].state, PendingState::Submitting);
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::Tick { now_ms: 61_000 });
    assert_eq!(state.pending()[0].state, PendingState::Expired);
    assert!(state.consume_dirty());
    assert_eq!(state.view().pending_rows[0].headline, "Scrape timed out");

    let pending_id = state.pending()[0].id.clone();
    let (state, _) = update(state, Msg::PendingDismissed { pending_id });
    assert!(state.pending().is_empty());
}

#[test]
fn disabled_ttl_keeps_placeholders_submitting() {
    init_logging();
    let state = AppState::new().with_pending_ttl(None);
    let (state, _) = submit(state, URL, 0);
    let (state, _) = update(state, Msg::Tick { now_ms: u64::MAX });
    assert_eq!(state.pending()[0].state, PendingState::Submitting);
}
