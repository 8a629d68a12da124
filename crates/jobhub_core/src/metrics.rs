use crate::{JobRecord, JobStatus};

/// Average fit the dashboard compares against.
pub const TARGET_FIT: i64 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub new: usize,
    pub applied: usize,
    pub rejected: usize,
    pub interview: usize,
    pub offer: usize,
}

impl StatusCounts {
    pub fn from_jobs(jobs: &[JobRecord]) -> Self {
        let mut counts = Self::default();
        for job in jobs {
            *counts.slot(job.status) += 1;
        }
        counts
    }

    pub fn get(&self, status: JobStatus) -> usize {
        match status {
            JobStatus::New => self.new,
            JobStatus::Applied => self.applied,
            JobStatus::Rejected => self.rejected,
            JobStatus::Interview => self.interview,
            JobStatus::Offer => self.offer,
        }
    }

    fn slot(&mut self, status: JobStatus) -> &mut usize {
        match status {
            JobStatus::New => &mut self.new,
            JobStatus::Applied => &mut self.applied,
            JobStatus::Rejected => &mut self.rejected,
            JobStatus::Interview => &mut self.interview,
            JobStatus::Offer => &mut self.offer,
        }
    }
}

/// Mean of all finite scores, rounded half-up; `None` when nothing is scored.
pub fn average_score(jobs: &[JobRecord]) -> Option<i64> {
    let scores: Vec<f64> = jobs
        .iter()
        .filter_map(|job| job.score)
        .filter(|score| score.is_finite())
        .collect();
    if scores.is_empty() {
        return None;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    Some((mean + 0.5).floor() as i64)
}

/// Highest scoring job; unscored jobs rank as 0 and the earliest wins ties.
pub fn top_job(jobs: &[JobRecord]) -> Option<&JobRecord> {
    let mut best: Option<(&JobRecord, f64)> = None;
    for job in jobs {
        let score = job.score.filter(|s| s.is_finite()).unwrap_or(0.0);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((job, score)),
        }
    }
    best.map(|(job, _)| job)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Primary,
    Accent,
    Muted,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
    pub hint: String,
    pub trend: Option<String>,
    pub accent: Accent,
}

pub fn metric_cards(
    counts: &StatusCounts,
    average: Option<i64>,
    job_count: usize,
    pending_count: usize,
) -> Vec<MetricCard> {
    let interviews = counts.interview;
    let offers = counts.offer;
    vec![
        MetricCard {
            label: "Total tracked",
            value: (job_count + pending_count).to_string(),
            hint: format!("{pending_count} pending job scrapes"),
            trend: (pending_count > 0).then(|| format!("+{pending_count}")),
            accent: Accent::Primary,
        },
        MetricCard {
            label: "Interviews",
            value: interviews.to_string(),
            hint: "Moving through the funnel".to_string(),
            trend: (interviews > 0).then(|| "+on schedule".to_string()),
            accent: Accent::Accent,
        },
        MetricCard {
            label: "Average fit",
            value: average.map_or_else(|| "Pending".to_string(), |avg| format!("{avg}%")),
            hint: "Based on AI scoring".to_string(),
            trend: average.map(|avg| {
                let delta = avg - TARGET_FIT;
                let sign = if delta >= 0 { "+" } else { "" };
                format!("{sign}{delta}% vs target")
            }),
            accent: Accent::Muted,
        },
        MetricCard {
            label: "Offers",
            value: offers.to_string(),
            hint: "Ready for decision".to_string(),
            trend: (offers > 0).then(|| "+progress".to_string()),
            accent: Accent::Success,
        },
    ]
}
