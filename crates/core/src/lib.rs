//! textcodec-core: lossless text-compression codecs
//!
//! This library provides four codecs over Rust `str` text:
//! - LZ77 with a sliding window whose matches may overlap their own output
//! - LZW with an insertion-ordered dictionary
//! - Huffman with textual `'0'`/`'1'` codes
//! - A Deflate-style composite that Huffman-codes serialized LZ77 output
//!
//! # Architecture
//!
//! - `lz77`: window match finder and triple encoder/decoder
//! - `lzw`: dictionary encoder/decoder
//! - `huffman`: prefix-code construction and bitstring codec
//! - `token`: byte serialization of LZ77 triples
//! - `deflate`: the LZ77 + Huffman pipeline
//! - `metrics`: per-run statistics
//!
//! # Design Principles
//!
//! - **No panics**: malformed encoded input is reported as a structured error
//! - **Explicit pairing**: encoded values carry the codebook/dictionary needed
//!   to decode them
//! - **Deterministic**: encoding the same input always yields the same output

pub mod deflate;
pub mod error;
pub mod huffman;
pub mod lz77;
pub mod lzw;
pub mod metrics;
pub mod token;

// Re-export commonly used types
pub use deflate::{DeflateCodec, DeflateEncoded};
pub use error::{Error, Result};
pub use huffman::{Codebook, HuffmanEncoded};
pub use lz77::{Lz77Codec, Triple};
pub use lzw::Dictionary;
