//! Reply parsing: picks the assistant's answer out of a thread and splits it
//! into displayable prose and an optional embedded code fragment.
//!
//! The assistant is only loosely asked to answer as "prose, optionally
//! followed by a fenced code block", so everything here is best-effort and
//! total: no input makes these functions fail or panic.
//!
//! ```text
//! "Intro text 【4:0†source】 ..."        → strip_citations → "Intro text "
//! "Here you go: ```html\n<p>x</p>\n```"  → extract_code    → ("Here you go: ", Some("<p>x</p>"))
//! ```

use crate::assistant::{Message, Role};

/// Marker that opens an inline file-search citation.
pub const CITATION_MARKER: char = '【';

/// Code fence delimiter.
pub const FENCE: &str = "```";

/// A parsed assistant reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Text meant for display and speech.
    pub prose: String,
    /// HTML-like fragment lifted out of the fenced block, if any.
    pub code: Option<String>,
}

/// Truncate `text` at the first citation marker.
pub fn strip_citations(text: &str) -> &str {
    match text.find(CITATION_MARKER) {
        Some(idx) => &text[..idx],
        None => text,
    }
}

/// Split `text` into prose and code.
///
/// The fenced segment runs from the first fence to the last one. The code
/// fragment is the slice from the first `<` to the last `>` inside it, so
/// language tags and surrounding chatter are dropped. Prose is everything
/// before the first fence, whether or not the fence is ever closed.
pub fn extract_code(text: &str) -> (String, Option<String>) {
    let Some(open) = text.find(FENCE) else {
        return (text.to_string(), None);
    };
    let prose = text[..open].to_string();

    let inner_start = open + FENCE.len();
    let code = match text.rfind(FENCE) {
        Some(close) if close >= inner_start => angle_bracketed(&text[inner_start..close]),
        _ => None,
    };

    (prose, code)
}

/// Slice from the first `<` through the last `>`, if both exist in order.
fn angle_bracketed(segment: &str) -> Option<String> {
    let start = segment.find('<')?;
    let end = segment.rfind('>')?;
    if end < start {
        return None;
    }
    Some(segment[start..=end].to_string())
}

/// Citation stripping followed by code extraction.
pub fn parse_reply(raw: &str) -> Reply {
    let (prose, code) = extract_code(strip_citations(raw));
    Reply { prose, code }
}

/// Find the newest assistant text that is not an echo of `query`.
///
/// `messages` is in conversation order (oldest first). Messages are scanned
/// newest first, and within a message its content blocks last first. Returns
/// an empty string when nothing qualifies.
pub fn select_reply<'a>(messages: &'a [Message], query: &str) -> &'a str {
    messages
        .iter()
        .rev()
        .filter(|m| m.role == Role::Assistant)
        .flat_map(|m| m.content.iter().rev())
        .filter_map(|block| block.as_text())
        .find(|text| *text != query)
        .unwrap_or("")
}
