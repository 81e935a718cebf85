use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static BROKEN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)-[ \t]*\r?\n[ \t]*(\w)").unwrap());
static HORIZONTAL_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").unwrap());
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalizes one page of extracted PDF text: NFKC, words split across line
/// ends rejoined, runs of spaces collapsed, at most one blank line between
/// paragraphs.
pub fn normalize_page_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let unbroken = BROKEN_WORD.replace_all(&normalized, "$1$2");

    let lines: Vec<String> = unbroken
        .lines()
        .map(|line| HORIZONTAL_RUN.replace_all(line.trim(), " ").into_owned())
        .collect();

    BLANK_RUN
        .replace_all(&lines.join("\n"), "\n\n")
        .trim()
        .to_string()
}
