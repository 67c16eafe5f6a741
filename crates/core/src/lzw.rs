//! LZW adaptive dictionary codec.
//!
//! The dictionary is an insertion-ordered set of strings: an entry's code is
//! its insertion position. Decoding therefore needs the exact dictionary the
//! paired encode produced (or one rebuilt with identical insertion order). A
//! dictionary holding the same strings in a different order decodes to the
//! wrong text without any error.
//!
//! Encoding stops when the input is exhausted. The final prefix is emitted
//! without adding a dictionary entry, so no sentinel characters ever appear
//! in the dictionary.

use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::error::{LzwError, Result};

/// Insertion-ordered LZW dictionary.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: IndexSet<String>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the initial dictionary for `text`: one entry per distinct
    /// character, sorted ascending, coded `0..k`.
    pub fn for_text(text: &str) -> Self {
        let mut alphabet: Vec<char> = text.chars().collect();
        alphabet.sort_unstable();
        alphabet.dedup();

        Self {
            entries: alphabet.into_iter().map(String::from).collect(),
        }
    }

    /// Code of `entry`, if present.
    pub fn code_of(&self, entry: &str) -> Option<usize> {
        self.entries.get_index_of(entry)
    }

    /// Entry stored under `code`, if any.
    pub fn entry(&self, code: usize) -> Option<&str> {
        self.entries.get_index(code).map(String::as_str)
    }

    /// Append `entry` and return its code. An existing entry keeps its code.
    pub fn insert(&mut self, entry: String) -> usize {
        self.entries.insert_full(entry).0
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.contains(entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in code order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

// Equal only when codes map to the same entries, so order counts.
impl PartialEq for Dictionary {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for Dictionary {}

impl<S: Into<String>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Encode `text`, returning the grown dictionary and the emitted codes.
///
/// Empty input yields an empty dictionary and no codes.
pub fn encode(text: &str) -> (Dictionary, Vec<usize>) {
    encode_mapped(Dictionary::for_text(text), text)
}

/// Encode `text` starting from a caller-supplied dictionary.
///
/// Every character of `text` needs a single-character entry. The supplied
/// entries need not be prefix-closed: `["a", "b", "c", "abc"]` encodes
/// `"abc"` as the single code 3.
///
/// # Errors
/// Returns `LzwError::UnmappedInput` with the byte position of the first
/// character that has no entry.
pub fn encode_with_dictionary(
    dictionary: Dictionary,
    text: &str,
) -> Result<(Dictionary, Vec<usize>)> {
    let mut buf = [0u8; 4];
    if let Some((position, _)) = text
        .char_indices()
        .find(|(_, c)| !dictionary.contains(c.encode_utf8(&mut buf)))
    {
        return Err(LzwError::UnmappedInput { position }.into());
    }
    Ok(encode_mapped(dictionary, text))
}

/// Main loop. Every character of `text` has an entry in `dictionary`.
fn encode_mapped(mut dictionary: Dictionary, text: &str) -> (Dictionary, Vec<usize>) {
    let initial_len = dictionary.len();
    let mut longest = dictionary.iter().map(|e| e.chars().count()).max().unwrap_or(0);
    let mut codes = Vec::new();
    let mut cursor = 0;

    while cursor < text.len() {
        let rest = &text[cursor..];

        // Longest dictionary prefix of `rest`, checking every candidate up to
        // the longest entry.
        let mut matched: Option<(usize, usize)> = None;
        for (i, c) in rest.char_indices().take(longest) {
            let end = i + c.len_utf8();
            if let Some(code) = dictionary.code_of(&rest[..end]) {
                matched = Some((code, end));
            }
        }

        // Unreachable while every character is mapped.
        let Some((code, word_end)) = matched else {
            break;
        };

        codes.push(code);
        if let Some(next) = rest[word_end..].chars().next() {
            let entry = &rest[..word_end + next.len_utf8()];
            longest = longest.max(entry.chars().count());
            let added = dictionary.insert(entry.to_string());
            trace!(code, added, "lzw step");
        } else {
            trace!(code, "lzw final step");
        }
        cursor += word_end;
    }

    debug!(
        bytes = text.len(),
        codes = codes.len(),
        initial_entries = initial_len,
        entries = dictionary.len(),
        "lzw encoded"
    );
    (dictionary, codes)
}

/// Decode `codes` against `dictionary`.
///
/// # Errors
/// Returns `LzwError::UnknownCode` if a code has no entry.
pub fn decode(dictionary: &Dictionary, codes: &[usize]) -> Result<String> {
    let mut text = String::new();
    for &code in codes {
        let entry = dictionary.entry(code).ok_or(LzwError::UnknownCode {
            code,
            dictionary_len: dictionary.len(),
        })?;
        text.push_str(entry);
    }

    debug!(codes = codes.len(), bytes = text.len(), "lzw decoded");
    Ok(text)
}
