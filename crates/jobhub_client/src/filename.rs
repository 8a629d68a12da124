use sha2::{Digest, Sha256};

const MAX_LABEL_LEN: usize = 80;

/// Deterministic, filesystem-safe preview name: `{sanitized_label}--{short_hash(key)}.html`
pub fn preview_filename(label: Option<&str>, key: &str) -> String {
    let sanitized = sanitize_label(label.unwrap_or("snapshot"));
    format!("{sanitized}--{}.html", short_hash(key))
}

/// First four bytes of the SHA-256 digest, hex encoded.
pub(crate) fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().take(4).map(|byte| format!("{byte:02x}")).collect()
}

/// Keeps letters, digits, `-` and `.`; every other run of characters becomes one `_`.
/// The `--hash` suffix keeps the stem clear of device names such as `CON`.
fn sanitize_label(input: &str) -> String {
    let mut label = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_alphanumeric() || c == '-' || c == '.' {
            label.push(c);
        } else if !label.ends_with('_') {
            label.push('_');
        }
    }
    let label = label.trim_matches(&['_', '.', '-'][..]);
    if label.is_empty() {
        return "snapshot".to_string();
    }
    let end = label
        .char_indices()
        .nth(MAX_LABEL_LEN)
        .map_or(label.len(), |(index, _)| index);
    label[..end].to_string()
}
