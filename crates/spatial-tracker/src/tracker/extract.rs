// crates/spatial-tracker/src/tracker/extract.rs
// Tagged-block scanner: first OPEN ... CLOSE pair in document order

use std::ops::Range;

/// Open/close tag pair delimiting a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters<'d> {
    pub open: &'d str,
    pub close: &'d str,
}

/// Tags wrapping the spatial packet in model replies
pub const SPATIAL_BLOCK: Delimiters<'static> = Delimiters {
    open: "<spatial_system>",
    close: "</spatial_system>",
};

/// A located block within some reply text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedBlock<'a> {
    /// Content between the tags, trimmed
    pub inner: &'a str,
    /// Byte range of the whole block, tags included
    pub span: Range<usize>,
}

/// Find the first block delimited by `delims`.
///
/// Policy: the earliest OPEN tag wins and is paired with the first CLOSE tag
/// after it, so the match is non-greedy and may span lines. Anything after
/// that CLOSE tag, including further blocks, is ignored. Nesting is not
/// validated: a second OPEN before the first CLOSE becomes part of the body.
///
/// Returns `None` when no complete pair exists. That is a normal outcome
/// (the model skipped the block this turn), not an error.
pub fn extract_block<'a>(text: &'a str, delims: &Delimiters<'_>) -> Option<TaggedBlock<'a>> {
    if delims.open.is_empty() || delims.close.is_empty() {
        return None;
    }

    let start = text.find(delims.open)?;
    let body_start = start + delims.open.len();
    let body_end = body_start + text[body_start..].find(delims.close)?;
    let end = body_end + delims.close.len();

    Some(TaggedBlock {
        inner: text[body_start..body_end].trim(),
        span: start..end,
    })
}

/// Remove `block` from `text` and trim what remains
pub fn strip_block(text: &str, block: &TaggedBlock<'_>) -> String {
    let mut out = String::with_capacity(text.len() - block.span.len());
    out.push_str(&text[..block.span.start]);
    out.push_str(&text[block.span.end..]);
    out.trim().to_string()
}
