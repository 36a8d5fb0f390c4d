//! Text shown on buttons, group titles and hover previews.

use crate::model::{Snippet, SnippetGroup};

/// Characters of content used as a fallback button title.
pub const TITLE_FALLBACK_CHARS: usize = 12;

/// Characters of content shown in the hover preview.
pub const PREVIEW_CHARS: usize = 150;

pub const ELLIPSIS: &str = "...";
pub const UNTITLED: &str = "(untitled)";
pub const UNNAMED_GROUP: &str = "(unnamed group)";

/// Button caption: the explicit title, else the head of the content, else a placeholder.
pub fn display_title(snippet: &Snippet) -> String {
    if let Some(title) = snippet.explicit_title() {
        return title.to_string();
    }
    if snippet.content.is_empty() {
        return UNTITLED.to_string();
    }
    truncate_with_ellipsis(&snippet.content, TITLE_FALLBACK_CHARS)
}

/// Tooltip text, absent when there is no content to preview.
pub fn hover_preview(snippet: &Snippet) -> Option<String> {
    if snippet.content.is_empty() {
        return None;
    }
    Some(truncate_with_ellipsis(&snippet.content, PREVIEW_CHARS))
}

pub fn group_title(group: &SnippetGroup) -> String {
    let name = group.name.trim();
    if name.is_empty() {
        UNNAMED_GROUP.to_string()
    } else {
        group.name.clone()
    }
}

/// Keeps the first `max_chars` characters, appending [`ELLIPSIS`] if anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}
