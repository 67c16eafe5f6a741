//! LZ77 sliding-window codec over characters.
//!
//! Output is a sequence of [`Triple`]s `(offset, length, literal)`. The match
//! finder allows a match to run past the end of the window it started in by
//! cycling through the last `offset` characters, so a run like `"abababab"`
//! is described by offset 2 and a length much larger than 2.
//!
//! # Example
//! ```
//! use textcodec_core::lz77::Lz77Codec;
//!
//! let codec = Lz77Codec::new(5).unwrap();
//! let triples = codec.encode("abababababababbabababba");
//! assert_eq!(codec.decode(&triples).unwrap(), "abababababababbabababba");
//! ```

use std::fmt;

use tracing::{debug, trace};

use crate::error::{Error, Lz77Error, Result};

/// One LZ77 encoding unit.
///
/// `offset == 0` means no backward copy; the triple carries only its literal.
/// `literal` is `None` only on the last triple of a sequence whose final match
/// runs to the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triple {
    /// Backward distance to the start of the copied run
    pub offset: usize,
    /// Number of characters copied (may exceed `offset`)
    pub length: usize,
    /// Character appended after the copy
    pub literal: Option<char>,
}

impl Triple {
    pub fn new(offset: usize, length: usize, literal: Option<char>) -> Self {
        Self {
            offset,
            length,
            literal,
        }
    }

    /// Literal-only triple.
    pub fn literal(c: char) -> Self {
        Self::new(0, 0, Some(c))
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.literal {
            Some(c) => write!(f, "({}, {}, {:?})", self.offset, self.length, c),
            None => write!(f, "({}, {}, '')", self.offset, self.length),
        }
    }
}

/// LZ77 codec with a fixed maximum window length.
#[derive(Debug, Clone, Copy)]
pub struct Lz77Codec {
    buffer_len: usize,
}

impl Lz77Codec {
    /// Create a codec whose window keeps at most `buffer_len` characters.
    ///
    /// # Errors
    /// Returns `Error::Config` if `buffer_len` is zero.
    pub fn new(buffer_len: usize) -> Result<Self> {
        if buffer_len == 0 {
            return Err(Error::Config("LZ77 window length must be at least 1".to_string()));
        }
        Ok(Self { buffer_len })
    }

    /// Maximum window length.
    pub fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    /// Encode `text` into a triple sequence.
    ///
    /// Empty input produces an empty sequence.
    pub fn encode(&self, text: &str) -> Vec<Triple> {
        let chars: Vec<char> = text.chars().collect();
        let mut buffer: Vec<char> = Vec::with_capacity(self.buffer_len + 1);
        let mut triples = Vec::new();
        let mut cursor = 0;

        while cursor < chars.len() {
            let (offset, length) = longest_match(&buffer, &chars[cursor..]);

            let consumed_end = (cursor + length + 1).min(chars.len());
            buffer.extend_from_slice(&chars[cursor..consumed_end]);
            if buffer.len() > self.buffer_len {
                let excess = buffer.len() - self.buffer_len;
                buffer.drain(..excess);
            }

            if cursor + length >= chars.len() {
                trace!(offset, length, "final triple without literal");
                triples.push(Triple::new(offset, length, None));
                break;
            }

            let literal = chars[cursor + length];
            trace!(offset, length, ?literal, "triple");
            triples.push(Triple::new(offset, length, Some(literal)));
            cursor += length + 1;
        }

        debug!(
            chars = chars.len(),
            triples = triples.len(),
            window = self.buffer_len,
            "lz77 encoded"
        );
        triples
    }

    /// Rebuild the text described by `triples`.
    ///
    /// # Errors
    /// Returns `Lz77Error::OffsetOutOfRange` if a triple refers further back
    /// than the output reconstructed at that point, and
    /// `Lz77Error::LengthTooLarge` if a copy length cannot be allocated.
    pub fn decode(&self, triples: &[Triple]) -> Result<String> {
        let mut output: Vec<char> = Vec::new();

        for triple in triples {
            if triple.offset != 0 {
                if triple.offset > output.len() {
                    return Err(Lz77Error::OffsetOutOfRange {
                        offset: triple.offset,
                        available: output.len(),
                    }
                    .into());
                }

                // Copying one character at a time reproduces the wraparound
                // rule: position `i` of the run reads `start + i % offset`.
                let start = output.len() - triple.offset;
                output
                    .try_reserve(triple.length.saturating_add(1))
                    .map_err(|_| Lz77Error::LengthTooLarge {
                        length: triple.length,
                    })?;
                for i in 0..triple.length {
                    let c = output[start + i % triple.offset];
                    output.push(c);
                }
            }

            if let Some(c) = triple.literal {
                output.push(c);
            }
        }

        debug!(triples = triples.len(), chars = output.len(), "lz77 decoded");
        Ok(output.into_iter().collect())
    }
}

/// Find the longest match for the head of `rest` inside `buffer`.
///
/// Returns `(offset, length)`, or `(0, 0)` when the first character of `rest`
/// does not occur in `buffer`. Positions are scanned oldest first and only a
/// strictly longer match replaces the best one, so equal lengths keep the
/// larger offset.
fn longest_match(buffer: &[char], rest: &[char]) -> (usize, usize) {
    let Some(&head) = rest.first() else {
        return (0, 0);
    };

    let mut best_offset = 0;
    let mut best_length = 0;

    for (position, &c) in buffer.iter().enumerate() {
        if c != head {
            continue;
        }

        let offset = buffer.len() - position;
        let length = 1 + rest[1..]
            .iter()
            .enumerate()
            .take_while(|&(i, next)| *next == buffer[position + (i + 1) % offset])
            .count();

        if length > best_length {
            best_length = length;
            best_offset = offset;
        }
    }

    (best_offset, best_length)
}
