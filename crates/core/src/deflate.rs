//! Deflate-style composite codec: LZ77 followed by Huffman.
//!
//! Encoding runs LZ77 over the text, serializes the triples with
//! [`crate::token`], and Huffman-codes the resulting bytes. The returned
//! [`DeflateEncoded`] carries the byte codebook needed to reverse the
//! entropy stage.

use tracing::debug;

use crate::error::Result;
use crate::huffman::Codebook;
use crate::lz77::Lz77Codec;
use crate::token::{parse_triples, serialize_triples};

/// Output of [`DeflateCodec::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeflateEncoded {
    /// Codebook over the serialized triple bytes
    pub codebook: Codebook<u8>,
    /// Huffman bitstring of the serialized triples
    pub bits: String,
}

/// Two-stage codec owning its LZ77 window configuration.
#[derive(Debug, Clone, Copy)]
pub struct DeflateCodec {
    lz77: Lz77Codec,
}

impl DeflateCodec {
    /// Create a codec whose LZ77 stage uses a window of `buffer_len`.
    ///
    /// # Errors
    /// Returns `Error::Config` if `buffer_len` is zero.
    pub fn new(buffer_len: usize) -> Result<Self> {
        Ok(Self {
            lz77: Lz77Codec::new(buffer_len)?,
        })
    }

    pub fn buffer_len(&self) -> usize {
        self.lz77.buffer_len()
    }

    /// Encode `text`.
    ///
    /// # Errors
    /// Returns `HuffmanError::EmptyFrequencyTable` for empty input.
    pub fn encode(&self, text: &str) -> Result<DeflateEncoded> {
        let triples = self.lz77.encode(text);
        let serialized = serialize_triples(&triples)?;

        let codebook = Codebook::from_symbols(&serialized)?;
        let bits = codebook.encode(&serialized)?;

        debug!(
            triples = triples.len(),
            serialized_bytes = serialized.len(),
            bits = bits.len(),
            "deflate encoded"
        );
        Ok(DeflateEncoded { codebook, bits })
    }

    /// Decode an encoded value back to text.
    pub fn decode(&self, encoded: &DeflateEncoded) -> Result<String> {
        let serialized = encoded.codebook.decode(&encoded.bits)?;
        let triples = parse_triples(&serialized)?;
        let text = self.lz77.decode(&triples)?;

        debug!(triples = triples.len(), chars = text.chars().count(), "deflate decoded");
        Ok(text)
    }
}
