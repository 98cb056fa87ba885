use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());

/// Normalize one page of extracted PDF text: NFKC (folds ligatures),
/// rejoin words hyphenated across line breaks, collapse runs of
/// whitespace, and reduce blank-line runs to single paragraph breaks.
pub fn sanitize_page_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let de_hyphenated = HYPHEN_NEWLINE.replace_all(&normalized, "$prefix$suffix");

    let mut paragraph_break = false;
    let mut out = String::with_capacity(de_hyphenated.len());

    for line in de_hyphenated.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            paragraph_break = true;
            continue;
        }

        if !out.is_empty() {
            out.push_str(if paragraph_break { "\n\n" } else { "\n" });
        }
        push_collapsed(trimmed, &mut out);
        paragraph_break = false;
    }

    out
}

fn push_collapsed(line: &str, out: &mut String) {
    let mut prev_was_space = false;
    for ch in line.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }
}
