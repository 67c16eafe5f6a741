//! Error types for the textcodec codecs.
//!
//! All operations return structured errors rather than panicking. Inputs that
//! the codecs cannot represent (or encoded data that does not match the
//! codebook/dictionary it is decoded with) surface here.

use thiserror::Error;

/// Top-level error type for all operations in the library.
///
/// Each variant corresponds to a specific failure domain:
/// - LZ77: triple sequences that reference output not yet produced
/// - LZW: codes or input characters missing from the dictionary
/// - Huffman: codebook construction or encode/decode failures
/// - Token: triple serialization/parsing between the LZ77 and Huffman stages
/// - I/O: file system operations (command-line driver)
#[derive(Debug, Error)]
pub enum Error {
    /// LZ77 codec error (e.g., offset beyond reconstructed output)
    #[error("lz77 codec error: {0}")]
    Lz77(#[from] Lz77Error),

    /// LZW codec error (e.g., code outside the dictionary)
    #[error("lzw codec error: {0}")]
    Lzw(#[from] LzwError),

    /// Huffman codec error (e.g., invalid code, decode failure)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Triple token error (e.g., truncated record)
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// LZ77 codec errors.
#[derive(Debug, Error)]
pub enum Lz77Error {
    /// A triple points further back than the output reconstructed so far
    #[error("offset {offset} exceeds reconstructed output length {available}")]
    OffsetOutOfRange { offset: usize, available: usize },

    /// A copy length the output buffer cannot grow to hold
    #[error("copy length {length} cannot be allocated")]
    LengthTooLarge { length: usize },
}

/// LZW codec errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// Code does not name any dictionary entry
    #[error("code {code} outside dictionary of {dictionary_len} entries")]
    UnknownCode { code: usize, dictionary_len: usize },

    /// Input character at `position` (byte offset) has no dictionary entry
    #[error("no dictionary entry for input at byte {position}")]
    UnmappedInput { position: usize },
}

/// Huffman codec errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols with non-zero frequency (cannot build codebook)
    #[error("empty frequency table: cannot build codebook")]
    EmptyFrequencyTable,

    /// Bitstring contains something other than '0' or '1'
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit { position: usize, found: char },

    /// Invalid Huffman code encountered during decoding
    #[error("invalid huffman code at bit position {position}")]
    InvalidCode { position: usize },

    /// Bitstring ended in the middle of a code
    #[error("bitstring ends inside a code starting at bit position {position}")]
    TruncatedCode { position: usize },

    /// Symbol being encoded is absent from the codebook
    #[error("symbol at position {position} has no code in the codebook")]
    UnknownSymbol { position: usize },

    /// Externally supplied code is empty, not binary, or a prefix of another
    #[error("code {code:?} is not a valid prefix-free entry")]
    NotPrefixFree { code: String },
}

/// Triple serialization errors.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Offset or length does not fit the fixed-width field
    #[error("{field} value {value} does not fit in 32 bits")]
    FieldOverflow { field: &'static str, value: usize },

    /// Record is shorter than its header declares
    #[error("truncated triple record: need {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    /// Literal bytes are not exactly one UTF-8 encoded character
    #[error("invalid literal in triple record at byte {position}")]
    InvalidLiteral { position: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
