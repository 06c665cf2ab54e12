//! Word-level splitting of an agent's answer into stream chunks.

use std::iter;

/// Split `text` on single spaces, keeping each space attached to the word
/// before it.
///
/// Every piece of `text.split(' ')` becomes one chunk, and all but the last
/// get their space back, so concatenating the chunks reproduces `text`
/// exactly. Consecutive spaces yield chunks that are a lone space, a trailing
/// space yields a final empty chunk, and empty input yields one empty chunk.
/// Newlines and tabs are not separators.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    // `split_inclusive` already returns "word " slices; it only drops the
    // empty piece after a trailing space (or the sole piece of "").
    let tail = (text.is_empty() || text.ends_with(' ')).then_some("");
    text.split_inclusive(' ').chain(iter::once(tail).flatten())
}
