use std::path::{Path, PathBuf};

use jobhub_core::JobRecord;
use jobhub_logging::jobhub_info;
use scraper::{Html, Selector};
use thiserror::Error;

use crate::{preview_filename, PersistError, PreviewWriter};

const MAX_EXCERPT_CHARS: usize = 280;
const TRUNCATED_MARKER: &str = "...";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("job {0} has no captured snapshot")]
    Missing(String),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// A captured page re-serialized as a standalone document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPreview {
    pub title: Option<String>,
    pub excerpt: String,
    pub document_html: String,
}

/// Parses possibly fragmentary HTML into a complete document.
pub fn prepare_snapshot(html: &str) -> SnapshotPreview {
    let doc = Html::parse_document(html);
    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| {
            doc.select(&sel)
                .next()
                .map(|node| node.text().collect::<String>())
        })
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    let body_text = Selector::parse("body")
        .ok()
        .and_then(|sel| doc.select(&sel).next().map(|node| node.text().collect::<Vec<_>>()))
        .unwrap_or_default()
        .into_iter()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    SnapshotPreview {
        title,
        excerpt: excerpt(&body_text),
        document_html: format!("<!DOCTYPE html>\n{}", doc.root_element().html()),
    }
}

/// Materializes the job's snapshot as an HTML file a browser can open.
pub fn write_snapshot_preview(
    dir: &Path,
    job: &JobRecord,
) -> Result<(PathBuf, SnapshotPreview), SnapshotError> {
    let html = job
        .snapshot
        .as_deref()
        .ok_or_else(|| SnapshotError::Missing(job.id.clone()))?;
    let preview = prepare_snapshot(html);

    let label = [job.company.trim(), job.position.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let filename = preview_filename((!label.is_empty()).then_some(label.as_str()), &job.id);

    let path = PreviewWriter::new(dir).write(&filename, &preview.document_html)?;
    jobhub_info!("Wrote snapshot preview for job {} to {:?}", job.id, path);
    Ok((path, preview))
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(MAX_EXCERPT_CHARS) {
        Some((end, _)) => format!("{}{TRUNCATED_MARKER}", &text[..end]),
        None => text.to_string(),
    }
}
