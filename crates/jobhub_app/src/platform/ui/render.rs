use std::fmt::Write;
use std::path::Path;

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use jobhub_client::SnapshotPreview;
use jobhub_core::{
    Accent, AppViewModel, JobRowView, JobStatus, PendingRowView, ScoreDisplay, TableNotice,
    TextCell, Tone,
};

const BAR_WIDTH: usize = 10;

pub fn render_dashboard(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Job Dashboard");
    let _ = writeln!(out, "{}", metrics_table(view));
    let _ = writeln!(out, "{}", insight_line(view));
    let _ = writeln!(out, "{}", legend_line(view));
    let _ = writeln!(out, "{}", jobs_table(view));
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "{}", notice_text(notice));
    }
    out
}

pub fn render_snapshot(path: &Path, preview: &SnapshotPreview) -> String {
    let mut out = format!("Snapshot written to {}", path.display());
    if let Some(title) = &preview.title {
        let _ = write!(out, "\nTitle: {title}");
    }
    if !preview.excerpt.is_empty() {
        let _ = write!(out, "\n{}", preview.excerpt);
    }
    out
}

fn metrics_table(view: &AppViewModel) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value", "Hint", "Trend"]);
    for card in &view.metrics {
        table.add_row(vec![
            Cell::new(card.label),
            Cell::new(&card.value)
                .fg(accent_color(card.accent))
                .add_attribute(Attribute::Bold),
            Cell::new(&card.hint),
            Cell::new(card.trend.as_deref().unwrap_or("")),
        ]);
    }
    table
}

fn insight_line(view: &AppViewModel) -> String {
    let badge = if view.scoring_active() {
        "AI scoring active"
    } else {
        "Waiting on data"
    };
    match &view.insight {
        Some(top) => format!(
            "Highest-fit role [{badge}]: {} - {} ({}) {}% match",
            or_unknown(&top.company),
            or_unknown(&top.position),
            top.status,
            top.score.value.unwrap_or(0.0)
        ),
        None => format!("Highest-fit role [{badge}]: add a posting to start seeing highlights."),
    }
}

fn legend_line(view: &AppViewModel) -> String {
    let counts = &view.status_counts;
    format!(
        "Applied: {} | Interview: {} | Offers: {}",
        counts.applied, counts.interview, counts.offer
    )
}

fn jobs_table(view: &AppViewModel) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "#",
            "Company",
            "Status",
            "Position",
            "Score",
            "Salary (Posted)",
            "Salary (Estimate)",
            "Links",
        ]);
    for (index, pending) in view.pending_rows.iter().enumerate() {
        table.add_row(pending_row(index + 1, pending));
    }
    for (index, row) in view.rows.iter().enumerate() {
        table.add_row(job_row(index + 1, row));
    }
    table
}

fn pending_row(number: usize, pending: &PendingRowView) -> Vec<Cell> {
    let headline = Cell::new(&pending.headline);
    let headline = if pending.failed {
        headline.fg(Color::Red)
    } else {
        headline.add_attribute(Attribute::Dim)
    };
    vec![
        Cell::new(format!("p{number}")),
        headline,
        status_cell(pending.status, None),
        placeholder_cell("Waiting for analysis"),
        Cell::new(score_bar(&jobhub_core::score_display(None))).add_attribute(Attribute::Dim),
        placeholder_cell("Pending"),
        placeholder_cell("Pending"),
        Cell::new(&pending.url),
    ]
}

fn job_row(number: usize, row: &JobRowView) -> Vec<Cell> {
    vec![
        Cell::new(number),
        text_cell(&row.company),
        status_cell(row.status, row.picker.as_deref()),
        text_cell(&row.position),
        Cell::new(score_bar(&row.score)),
        text_cell(&row.salary_posted),
        text_cell(&row.salary_estimate),
        links_cell(row),
    ]
}

fn status_cell(status: JobStatus, picker: Option<&[JobStatus]>) -> Cell {
    let text = match picker {
        Some(options) => {
            let options = options
                .iter()
                .map(|option| option.label())
                .collect::<Vec<_>>()
                .join(" | ");
            format!("{status} > {options}")
        }
        None => status.to_string(),
    };
    Cell::new(text).fg(tone_color(status.style().tone))
}

fn links_cell(row: &JobRowView) -> Cell {
    let mut parts = Vec::new();
    if let Some(url) = &row.url {
        parts.push(url.clone());
    }
    if row.has_snapshot {
        parts.push("[snapshot]".to_string());
    }
    if parts.is_empty() {
        placeholder_cell("No link")
    } else {
        Cell::new(parts.join("\n"))
    }
}

fn text_cell(cell: &TextCell) -> Cell {
    if cell.placeholder {
        placeholder_cell(&cell.text)
    } else {
        Cell::new(&cell.text)
    }
}

fn placeholder_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Dim)
}

/// `██████░░░░ 60`; pending scores use a shaded partial bar.
pub fn score_bar(score: &ScoreDisplay) -> String {
    let filled = ((score.bar_percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let fill = if score.is_loading() { '▒' } else { '█' };
    let bar: String = std::iter::repeat(fill)
        .take(filled)
        .chain(std::iter::repeat('░').take(BAR_WIDTH - filled))
        .collect();
    format!("{bar} {}", score.label)
}

fn notice_text(notice: &TableNotice) -> String {
    match notice {
        TableNotice::Loading => "Loading jobs...".to_string(),
        TableNotice::Error(message) => format!("Error: {message}"),
        TableNotice::Empty => "No jobs found".to_string(),
    }
}

fn or_unknown(text: &str) -> &str {
    if text.trim().is_empty() {
        "Unknown"
    } else {
        text
    }
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Neutral => Color::Grey,
        Tone::Info => Color::Blue,
        Tone::Danger => Color::Red,
        Tone::Accent => Color::Magenta,
        Tone::Success => Color::Green,
    }
}

fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Primary => Color::Cyan,
        Accent::Accent => Color::Magenta,
        Accent::Muted => Color::Grey,
        Accent::Success => Color::Green,
    }
}
