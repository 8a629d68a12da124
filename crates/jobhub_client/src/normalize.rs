//! Field-tolerant mapping from backend JSON to [`JobRecord`].
//!
//! The backend has shipped several shapes over time; each logical field is
//! looked up under a list of JSON pointers and the first present, non-null
//! scalar wins. An empty string still counts as present.

use std::collections::HashMap;

use jobhub_core::{JobRecord, JobStatus};
use serde_json::Value;

use crate::filename::short_hash;

const ID: &[&str] = &["/id", "/_id", "/jobId", "/uuid", "/url"];
const COMPANY: &[&str] = &["/company", "/companyName", "/employer"];
const STATUS: &[&str] = &["/status", "/currentStatus", "/state"];
const POSITION: &[&str] = &["/position", "/title", "/role"];
const SCORE: &[&str] = &["/score", "/fitScore", "/matchScore"];
const SALARY_POSTED: &[&str] = &["/salaryPosted", "/postedSalary", "/salary", "/salary_posted"];
const SALARY_ESTIMATE: &[&str] = &[
    "/salaryEstimate",
    "/estimatedSalary",
    "/salaryRange",
    "/salary_predicted",
    "/salaryPredicted",
];
const SNAPSHOT: &[&str] = &[
    "/latest_snapshot/raw_html_preview",
    "/raw_html_preview",
    "/snapshotHtml",
    "/snapshot_html",
    "/htmlSnapshot",
    "/html_snapshot",
];
const URL: &[&str] = &["/url"];

pub fn normalize_job(raw: &Value) -> JobRecord {
    let id = first_text(raw, ID).unwrap_or_else(|| anonymous_id(raw));
    JobRecord {
        id,
        company: first_text(raw, COMPANY).unwrap_or_default(),
        status: JobStatus::parse_lenient(&first_text(raw, STATUS).unwrap_or_default()),
        position: first_text(raw, POSITION).unwrap_or_default(),
        score: first_score(raw),
        salary_posted: first_text(raw, SALARY_POSTED).unwrap_or_default(),
        salary_estimate: first_text(raw, SALARY_ESTIMATE).unwrap_or_default(),
        snapshot: first_text(raw, SNAPSHOT).filter(|html| !html.trim().is_empty()),
        url: first_text(raw, URL).unwrap_or_default(),
    }
}

/// Accepts a bare array or `{ "data": [...] }`; any other shape is an empty list.
pub fn normalize_list(body: &Value) -> Vec<JobRecord> {
    let items: &[Value] = match body {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    let mut seen_anonymous: HashMap<String, usize> = HashMap::new();
    items
        .iter()
        .map(|item| {
            let mut job = normalize_job(item);
            if job.id.starts_with(ANONYMOUS_PREFIX) {
                let count = seen_anonymous.entry(job.id.clone()).or_insert(0);
                *count += 1;
                if *count > 1 {
                    job.id = format!("{}-{count}", job.id);
                }
            }
            job
        })
        .collect()
}

const ANONYMOUS_PREFIX: &str = "anon-";

/// Records without any id field get a content hash so the id survives reloads.
fn anonymous_id(raw: &Value) -> String {
    format!("{ANONYMOUS_PREFIX}{}", short_hash(&raw.to_string()))
}

fn first_present<'a>(raw: &'a Value, pointers: &[&str]) -> Option<&'a Value> {
    pointers
        .iter()
        .filter_map(|pointer| raw.pointer(pointer))
        .find(|value| !value.is_null())
}

fn first_text(raw: &Value, pointers: &[&str]) -> Option<String> {
    pointers
        .iter()
        .filter_map(|pointer| raw.pointer(pointer))
        .find_map(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn first_score(raw: &Value) -> Option<f64> {
    let score = match first_present(raw, SCORE)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    score.filter(|score| score.is_finite())
}
