use std::sync::LazyLock;

use regex::Regex;

use crate::domain::truncate_chars;

const MAX_VISIBLE_CHARS: usize = 100;

static SECRET_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"Bearer\s+\S+").unwrap(), "Bearer [REDACTED]"),
        (Regex::new(r"sk-[A-Za-z0-9_\-]{8,}").unwrap(), "sk-[REDACTED]"),
        (
            Regex::new(r#"(?i)(api_key|password|secret|token)=[^\s&"']*"#).unwrap(),
            "$1=[REDACTED]",
        ),
    ]
});

/// Shortens prompt or query text for log output and redacts credentials.
///
/// Document excerpts can be long and may hold personal health data, so only
/// the first 100 characters are ever logged.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        format!(
            "{}... ({} chars total)",
            truncate_chars(trimmed, MAX_VISIBLE_CHARS),
            total_chars
        )
    } else {
        trimmed.to_string()
    };

    SECRET_PATTERNS
        .iter()
        .fold(visible, |text, (pattern, replacement)| {
            pattern.replace_all(&text, *replacement).into_owned()
        })
}
