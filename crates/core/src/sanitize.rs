//! Plain-text and rich-text sanitization.
//!
//! - `sanitize_text_field` reduces input to a single line of plain text.
//! - `kses_post` keeps a permissive allowlist of formatting tags and strips
//!   everything executable.
//! - `trim_words` produces word-limited excerpts.

use std::fmt::Write;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex"));
static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("valid regex"));
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));
static ANY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[a-zA-Z!][^<>]*>").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n\t ]+").expect("valid regex"));
static OCTET: Lazy<Regex> = Lazy::new(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("valid regex"));
static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)((?:[^<>])*?)(/?)>").expect("valid regex")
});
static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z][a-zA-Z0-9]*);?").expect("valid regex")
});
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*("[^"]*"|'[^']*'|[^\s"'>]+))?"#)
        .expect("valid regex")
});

/// Tags kept by `kses_post`.
const ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "address", "b", "blockquote", "br", "code", "del", "div", "em", "h1", "h2",
    "h3", "h4", "h5", "h6", "hr", "i", "img", "ins", "li", "ol", "p", "pre", "small", "span",
    "strike", "strong", "sub", "sup", "table", "tbody", "td", "th", "thead", "tr", "u", "ul",
];

/// Attributes kept on allowed tags.
const ALLOWED_ATTRIBUTES: &[&str] = &[
    "align", "alt", "cite", "class", "colspan", "datetime", "dir", "height", "href", "id",
    "lang", "rel", "rowspan", "src", "target", "title", "width",
];

const URL_ATTRIBUTES: &[&str] = &["href", "src", "cite"];

const BAD_PROTOCOLS: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Removes script/style blocks, comments and every tag.
#[must_use]
pub fn strip_all_tags(input: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(input, "");
    let text = STYLE_BLOCK.replace_all(&text, "");
    let text = COMMENT.replace_all(&text, "");
    ANY_TAG.replace_all(&text, "").trim().to_string()
}

/// Sanitizes a single-line plain-text field.
///
/// Strips tags, escapes stray `<`, collapses whitespace (including line breaks
/// and tabs), removes percent-encoded octets and trims.
#[must_use]
pub fn sanitize_text_field(input: &str) -> String {
    let mut text = input.replace('\0', "");

    if text.contains('<') {
        text = strip_all_tags(&text).replace('<', "&lt;");
    }

    let mut text = WHITESPACE.replace_all(&text, " ").into_owned();

    loop {
        let stripped = OCTET.replace_all(&text, "").into_owned();
        if stripped == text {
            break;
        }
        text = stripped;
    }

    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Sanitizes rich text, keeping the formatting tags allowed in post content.
///
/// Any `<` that does not open a kept tag is escaped.
#[must_use]
pub fn kses_post(input: &str) -> String {
    let text = input.replace('\0', "");
    let text = SCRIPT_BLOCK.replace_all(&text, "");
    let text = STYLE_BLOCK.replace_all(&text, "");
    let text = COMMENT.replace_all(&text, "");

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in TAG.captures_iter(&text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..whole.start()].replace('<', "&lt;"));
        out.push_str(&rewrite_tag(&caps));
        last = whole.end();
    }
    out.push_str(&text[last..].replace('<', "&lt;"));
    out
}

fn rewrite_tag(caps: &Captures<'_>) -> String {
    let closing = &caps[1];
    let name = caps[2].to_ascii_lowercase();
    if !ALLOWED_TAGS.contains(&name.as_str()) {
        return String::new();
    }
    if !closing.is_empty() {
        return format!("</{name}>");
    }

    let attributes = filter_attributes(&caps[3]);
    let self_closing = if caps[4].is_empty() { "" } else { " /" };
    format!("<{name}{attributes}{self_closing}>")
}

fn filter_attributes(raw: &str) -> String {
    let mut kept = String::new();

    for caps in ATTRIBUTE.captures_iter(raw) {
        let name = caps[1].to_ascii_lowercase();
        if !ALLOWED_ATTRIBUTES.contains(&name.as_str()) {
            continue;
        }

        let value = caps.get(2).map_or("", |m| {
            m.as_str()
                .trim_matches(|c| c == '"' || c == '\'')
        });

        if URL_ATTRIBUTES.contains(&name.as_str()) && has_bad_protocol(value) {
            continue;
        }

        let value = value.replace('"', "&quot;").replace('<', "&lt;");
        let _ = write!(kept, " {name}=\"{value}\"");
    }

    kept
}

fn has_bad_protocol(value: &str) -> bool {
    let normalized: String = decode_entities(value)
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    BAD_PROTOCOLS.iter().any(|p| normalized.starts_with(p))
}

/// Decodes numeric and common named character references once, as a browser
/// does for attribute values. Unknown names are left as written.
fn decode_entities(value: &str) -> String {
    ENTITY
        .replace_all(value, |caps: &Captures<'_>| {
            let reference = &caps[1];
            let decoded = if let Some(hex) = reference
                .strip_prefix("#x")
                .or_else(|| reference.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = reference.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                named_entity(&reference.to_ascii_lowercase())
            };

            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    match name {
        "colon" => Some(':'),
        "tab" => Some('\t'),
        "newline" => Some('\n'),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "sol" => Some('/'),
        "period" => Some('.'),
        "lpar" => Some('('),
        "rpar" => Some(')'),
        _ => None,
    }
}

/// Strips tags and keeps the first `limit` words, appending `…` when cut.
#[must_use]
pub fn trim_words(input: &str, limit: usize) -> String {
    let text = strip_all_tags(input);
    let words: Vec<&str> = text.split_whitespace().collect();

    if words.len() > limit {
        let mut excerpt = words[..limit].join(" ");
        excerpt.push('…');
        excerpt
    } else {
        words.join(" ")
    }
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
