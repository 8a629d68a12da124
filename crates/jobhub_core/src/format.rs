/// Width of the bar drawn while a score is still being computed.
pub const LOADING_BAR_PERCENT: f64 = 40.0;

const CURRENCY_PREFIX: char = '$';
const SALARY_PLACEHOLDER: &str = "Not available";
const SCORE_PLACEHOLDER: &str = "Pending";

/// Display text plus whether it is a stand-in for missing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCell {
    pub text: String,
    pub placeholder: bool,
}

impl TextCell {
    pub fn value(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placeholder: false,
        }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placeholder: true,
        }
    }

    /// `text` when non-blank, otherwise the given placeholder.
    pub fn or_placeholder(text: &str, placeholder: &str) -> Self {
        if text.trim().is_empty() {
            Self::placeholder(placeholder)
        } else {
            Self::value(text)
        }
    }
}

pub fn format_salary(raw: &str) -> TextCell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return TextCell::placeholder(SALARY_PLACEHOLDER);
    }
    if trimmed.starts_with(CURRENCY_PREFIX) {
        TextCell::value(trimmed)
    } else {
        TextCell::value(format!("{CURRENCY_PREFIX}{trimmed}"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreDisplay {
    /// Clamped score, `None` while scoring is pending.
    pub value: Option<f64>,
    /// Bar fill in percent.
    pub bar_percent: f64,
    pub label: String,
}

impl ScoreDisplay {
    pub fn is_loading(&self) -> bool {
        self.value.is_none()
    }
}

pub fn score_display(raw: Option<f64>) -> ScoreDisplay {
    match raw.filter(|score| score.is_finite()) {
        Some(score) => {
            let clamped = score.clamp(0.0, 100.0);
            ScoreDisplay {
                value: Some(clamped),
                bar_percent: clamped,
                label: clamped.to_string(),
            }
        }
        None => ScoreDisplay {
            value: None,
            bar_percent: LOADING_BAR_PERCENT,
            label: SCORE_PLACEHOLDER.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_salary_is_placeholder() {
        assert_eq!(format_salary(""), TextCell::placeholder("Not available"));
        assert_eq!(format_salary("   "), TextCell::placeholder("Not available"));
    }

    #[test]
    fn salary_gets_currency_prefix_once() {
        assert_eq!(format_salary("120,000").text, "$120,000");
        assert_eq!(format_salary(" $115,000 ").text, "$115,000");
        assert!(!format_salary("90k").placeholder);
    }

    #[test]
    fn scores_are_clamped_into_range() {
        for (raw, expected) in [(-12.0, 0.0), (42.5, 42.5), (100.0, 100.0), (250.0, 100.0)] {
            let display = score_display(Some(raw));
            assert_eq!(display.value, Some(expected));
            assert_eq!(display.bar_percent, expected);
        }
        assert_eq!(score_display(Some(72.0)).label, "72");
    }

    #[test]
    fn missing_or_non_finite_score_is_pending() {
        for raw in [None, Some(f64::NAN), Some(f64::INFINITY)] {
            let display = score_display(raw);
            assert!(display.is_loading());
            assert_eq!(display.label, "Pending");
            assert_eq!(display.bar_percent, LOADING_BAR_PERCENT);
        }
    }

    #[test]
    fn blank_text_uses_placeholder() {
        assert_eq!(
            TextCell::or_placeholder("", "Unknown"),
            TextCell::placeholder("Unknown")
        );
        assert_eq!(TextCell::or_placeholder("Acme", "Unknown").text, "Acme");
    }
}
