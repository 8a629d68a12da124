use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_detached() && !matches!(msg, Msg::NoOp) {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::ReloadRequested => {
            let request = state.begin_reload(false);
            vec![Effect::LoadJobs { request }]
        }
        Msg::JobsLoaded { request, result } => {
            state.apply_jobs_loaded(request, result);
            Vec::new()
        }
        Msg::UrlSubmitted { url, now_ms } => match validate_url(&url) {
            Ok(url) => {
                let pending_id = state.push_pending(url.clone(), now_ms);
                state.set_loading(true);
                vec![Effect::SubmitUrl { pending_id, url }]
            }
            Err(message) => {
                state.set_error(message);
                Vec::new()
            }
        },
        Msg::ScrapeFinished { pending_id, result } => {
            // Reload regardless of outcome; a failure stays visible through it.
            let request = match result {
                Ok(()) => state.begin_reload(false),
                Err(message) => {
                    state.mark_pending_failed(&pending_id, &message);
                    state.set_error(message);
                    state.begin_reload(true)
                }
            };
            vec![Effect::LoadJobs { request }]
        }
        Msg::StatusPillClicked { job_id } => {
            state.toggle_picker(job_id);
            Vec::new()
        }
        Msg::StatusChosen { job_id, status } => {
            let current = state.find_job(&job_id).map(|job| state.displayed_status(job));
            state.close_picker();
            match current {
                Some(current) if current != status => {
                    state.set_overlay(job_id.clone(), status);
                    vec![Effect::UpdateStatus { job_id, status }]
                }
                _ => Vec::new(),
            }
        }
        Msg::StatusUpdateFinished { result, .. } => match result {
            Ok(()) => {
                let request = state.begin_reload(false);
                vec![Effect::LoadJobs { request }]
            }
            // Optimistic value stays until the next reload replaces it.
            Err(_) => Vec::new(),
        },
        Msg::PendingDismissed { pending_id } => {
            state.dismiss_pending(&pending_id);
            Vec::new()
        }
        Msg::Tick { now_ms } => {
            state.expire_pending(now_ms);
            Vec::new()
        }
        Msg::Detached => {
            state.detach();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn validate_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("URL is required".to_string());
    }
    match url::Url::parse(trimmed) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(trimmed.to_string()),
        Ok(parsed) => Err(format!("Unsupported URL scheme: {}", parsed.scheme())),
        Err(err) => Err(format!("Invalid URL {trimmed}: {err}")),
    }
}
