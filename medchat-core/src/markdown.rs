//! Markdown rendering for assistant replies
//!
//! Converts the small markdown subset assistant replies use into HTML
//! markup through a fixed, ordered chain of rewrite rules. Code spans
//! are lifted out into placeholders first so the line-oriented rules
//! cannot rewrite their contents, and restored at the end.
//!
//! The renderer does no escaping; the rendering consumer owns that.
//! Human-authored messages are displayed as literal text and never pass
//! through here.

use regex::Regex;

/// Render markdown source into HTML markup.
///
/// Stateless and deterministic; empty input yields an empty string.
pub fn render(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut result = text.to_string();

    // Protect fenced code blocks
    let mut code_blocks: Vec<String> = Vec::new();
    let code_block_re = Regex::new(r"```[\w]*\n?([\s\S]*?)```").unwrap();
    result = code_block_re
        .replace_all(&result, |caps: &regex::Captures| {
            let idx = code_blocks.len();
            code_blocks.push(caps[1].to_string());
            format!("\x00CB{idx}\x00")
        })
        .to_string();

    // Protect inline code
    let mut inline_codes: Vec<String> = Vec::new();
    let inline_code_re = Regex::new(r"`([^`\n]+)`").unwrap();
    result = inline_code_re
        .replace_all(&result, |caps: &regex::Captures| {
            let idx = inline_codes.len();
            inline_codes.push(caps[1].to_string());
            format!("\x00IC{idx}\x00")
        })
        .to_string();

    // Headers, longest prefix first so ### is not consumed as #
    let h3_re = Regex::new(r"(?m)^### (.*)$").unwrap();
    result = h3_re.replace_all(&result, "<h3>$1</h3>").to_string();
    let h2_re = Regex::new(r"(?m)^## (.*)$").unwrap();
    result = h2_re.replace_all(&result, "<h2>$1</h2>").to_string();
    let h1_re = Regex::new(r"(?m)^# (.*)$").unwrap();
    result = h1_re.replace_all(&result, "<h1>$1</h1>").to_string();

    // Bold before italic so ** pairs are consumed ahead of single *
    let bold_re = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    result = bold_re.replace_all(&result, "<strong>$1</strong>").to_string();
    let italic_re = Regex::new(r"\*([^*\n]+)\*").unwrap();
    result = italic_re.replace_all(&result, "<em>$1</em>").to_string();

    // List items, then each maximal run of consecutive items becomes
    // one <ul>
    let item_re = Regex::new(r"(?m)^- (.*)$").unwrap();
    result = item_re.replace_all(&result, "<li>$1</li>").to_string();
    let run_re = Regex::new(r"<li>[^\n]*</li>(?:\n<li>[^\n]*</li>)*").unwrap();
    result = run_re
        .replace_all(&result, |caps: &regex::Captures| {
            format!("<ul>{}</ul>", caps[0].replace('\n', ""))
        })
        .to_string();

    // Paragraph boundaries, then remaining newlines become hard breaks
    result = result.replace("\n\n", "</p><p>");
    result = result.replace('\n', "<br/>");

    // Restore inline code
    for (i, code) in inline_codes.iter().enumerate() {
        result = result.replace(&format!("\x00IC{i}\x00"), &format!("<code>{code}</code>"));
    }

    // Restore code blocks, newlines intact
    for (i, code) in code_blocks.iter().enumerate() {
        result = result.replace(
            &format!("\x00CB{i}\x00"),
            &format!("<pre><code>{code}</code></pre>"),
        );
    }

    if !result.starts_with('<') {
        result = format!("<p>{result}</p>");
    }

    result
}
