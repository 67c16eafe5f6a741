//! Huffman prefix-code construction and textual bitstring codec.
//!
//! Codes are strings of `'0'`/`'1'` characters; there is no packing into
//! bytes. A [`Codebook`] is generic over its symbol type so the same codec
//! serves plain text (`char`) and the serialized LZ77 stage of the Deflate
//! codec (`u8`).
//!
//! # Construction
//!
//! Symbols start as leaves in a min-heap keyed by probability. The two
//! lightest nodes are merged repeatedly: the second-lightest takes bit `0`,
//! the lightest bit `1`. On equal weights the most recently created node is
//! popped first. A symbol's code is the path from the root to its leaf.
//!
//! # Example
//! ```
//! use textcodec_core::huffman;
//!
//! let encoded = huffman::encode("abracadabra").unwrap();
//! assert!(encoded.codebook.is_prefix_free());
//! assert_eq!(huffman::decode(&encoded).unwrap(), "abracadabra");
//! ```

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{HuffmanError, Result};

/// Probability of each distinct character of `text`, with the alphabet in
/// first-occurrence order. Both vectors are index-aligned.
pub fn find_probabilities(text: &str) -> (Vec<f64>, Vec<char>) {
    let symbols: Vec<char> = text.chars().collect();
    symbol_probabilities(&symbols)
}

/// Generic form of [`find_probabilities`].
pub fn symbol_probabilities<S: Eq + Hash + Clone>(symbols: &[S]) -> (Vec<f64>, Vec<S>) {
    let mut counts: IndexMap<S, u64> = IndexMap::new();
    for symbol in symbols {
        *counts.entry(symbol.clone()).or_insert(0) += 1;
    }

    let total = symbols.len() as f64;
    let (alphabet, probabilities): (Vec<S>, Vec<f64>) = counts
        .into_iter()
        .map(|(symbol, count)| (symbol, count as f64 / total))
        .unzip();

    (probabilities, alphabet)
}

/// Assign a prefix-free code to each probability.
///
/// The result is index-aligned with `probabilities`. A single probability
/// gets the code `"0"`.
///
/// # Errors
/// Returns `HuffmanError::EmptyFrequencyTable` if `probabilities` is empty.
pub fn encode_probabilities(probabilities: &[f64]) -> Result<Vec<(f64, String)>> {
    let codes = build_codes(probabilities)?;
    Ok(probabilities.iter().copied().zip(codes).collect())
}

/// Node in the construction heap. `id` indexes the parent-link table.
#[derive(Debug, Clone, Copy)]
struct HeapNode {
    weight: f64,
    id: usize,
}

impl Ord for HeapNode {
    // BinaryHeap pops the greatest: lightest weight first, newest node on ties.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapNode {}

fn build_codes(weights: &[f64]) -> Result<Vec<String>> {
    match weights.len() {
        0 => return Err(HuffmanError::EmptyFrequencyTable.into()),
        1 => return Ok(vec!["0".to_string()]),
        _ => {}
    }

    let mut heap: BinaryHeap<HeapNode> = weights
        .iter()
        .enumerate()
        .map(|(id, &weight)| HeapNode { weight, id })
        .collect();

    // links[id] = (parent id, bit on the edge into `id`)
    let mut links: Vec<Option<(usize, char)>> = vec![None; weights.len()];

    while heap.len() > 1 {
        let (Some(lighter), Some(heavier)) = (heap.pop(), heap.pop()) else {
            break;
        };

        let parent = links.len();
        links.push(None);
        links[heavier.id] = Some((parent, '0'));
        links[lighter.id] = Some((parent, '1'));

        heap.push(HeapNode {
            weight: lighter.weight + heavier.weight,
            id: parent,
        });
    }

    let codes: Vec<String> = (0..weights.len())
        .map(|leaf| {
            let mut bits = Vec::new();
            let mut node = leaf;
            while let Some((parent, bit)) = links[node] {
                bits.push(bit);
                node = parent;
            }
            bits.iter().rev().collect::<String>()
        })
        .collect();

    Ok(codes)
}

/// Returns the first code that is a prefix of (or equal to) another.
///
/// After sorting, any code that prefixes another also prefixes its immediate
/// successor, so checking neighbours is enough.
fn prefix_violation<'a>(codes: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut sorted: Vec<&str> = codes.collect();
    sorted.sort_unstable();
    sorted
        .windows(2)
        .find(|pair| pair[1].starts_with(pair[0]))
        .map(|pair| pair[0])
}

/// Mapping from symbol to prefix-free bitstring.
///
/// Entries iterate in first-occurrence order of the input the codebook was
/// built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebook<S: Eq + Hash> {
    codes: IndexMap<S, String>,
    symbols: HashMap<String, S>,
    max_code_len: usize,
}

impl<S: Eq + Hash + Clone> Codebook<S> {
    /// Build the codebook for the frequency distribution of `symbols`.
    ///
    /// # Errors
    /// Returns `HuffmanError::EmptyFrequencyTable` if `symbols` is empty.
    pub fn from_symbols(symbols: &[S]) -> Result<Self> {
        let (probabilities, alphabet) = symbol_probabilities(symbols);
        let codes = build_codes(&probabilities)?;
        let codebook = Self::assemble(alphabet.into_iter().zip(codes));

        debug!(
            symbols = symbols.len(),
            alphabet = codebook.len(),
            max_code_len = codebook.max_code_len,
            "huffman codebook built"
        );
        Ok(codebook)
    }

    /// Use an externally supplied codebook.
    ///
    /// # Errors
    /// - `HuffmanError::EmptyFrequencyTable` if `entries` is empty
    /// - `HuffmanError::NotPrefixFree` if a code is empty, contains anything
    ///   other than `0`/`1`, or is a prefix of another code
    pub fn from_codes<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, String)>,
    {
        let codebook = Self::assemble(entries);
        if codebook.is_empty() {
            return Err(HuffmanError::EmptyFrequencyTable.into());
        }

        let malformed = codebook
            .codes
            .values()
            .map(String::as_str)
            .find(|code| code.is_empty() || !code.chars().all(|bit| bit == '0' || bit == '1'))
            .or_else(|| prefix_violation(codebook.codes.values().map(String::as_str)));

        if let Some(code) = malformed {
            return Err(HuffmanError::NotPrefixFree {
                code: code.to_string(),
            }
            .into());
        }

        Ok(codebook)
    }

    fn assemble<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, String)>,
    {
        let codes: IndexMap<S, String> = entries.into_iter().collect();
        let symbols = codes
            .iter()
            .map(|(symbol, code)| (code.clone(), symbol.clone()))
            .collect();
        let max_code_len = codes.values().map(String::len).max().unwrap_or(0);

        Self {
            codes,
            symbols,
            max_code_len,
        }
    }

    /// Code assigned to `symbol`.
    pub fn code(&self, symbol: &S) -> Option<&str> {
        self.codes.get(symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// `(symbol, code)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &str)> {
        self.codes.iter().map(|(symbol, code)| (symbol, code.as_str()))
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        prefix_violation(self.codes.values().map(String::as_str)).is_none()
    }

    /// Concatenate the codes of `symbols`.
    ///
    /// # Errors
    /// Returns `HuffmanError::UnknownSymbol` for a symbol with no code.
    pub fn encode(&self, symbols: &[S]) -> Result<String> {
        let mut bits = String::new();
        for (position, symbol) in symbols.iter().enumerate() {
            let code = self
                .codes
                .get(symbol)
                .ok_or(HuffmanError::UnknownSymbol { position })?;
            bits.push_str(code);
        }
        Ok(bits)
    }

    /// Decode a bitstring by greedy prefix matching.
    ///
    /// # Errors
    /// - `HuffmanError::InvalidBit` for characters other than `0`/`1`
    /// - `HuffmanError::InvalidCode` if no code matches at some position
    /// - `HuffmanError::TruncatedCode` if the bitstring ends inside a code
    pub fn decode(&self, bits: &str) -> Result<Vec<S>> {
        let mut decoded = Vec::new();
        let mut pending = String::with_capacity(self.max_code_len);
        let mut code_start = 0;

        for (position, bit) in bits.chars().enumerate() {
            if bit != '0' && bit != '1' {
                return Err(HuffmanError::InvalidBit {
                    position,
                    found: bit,
                }
                .into());
            }

            pending.push(bit);
            if let Some(symbol) = self.symbols.get(&pending) {
                decoded.push(symbol.clone());
                pending.clear();
                code_start = position + 1;
            } else if pending.len() >= self.max_code_len {
                return Err(HuffmanError::InvalidCode {
                    position: code_start,
                }
                .into());
            }
        }

        if !pending.is_empty() {
            return Err(HuffmanError::TruncatedCode {
                position: code_start,
            }
            .into());
        }

        Ok(decoded)
    }
}

/// Bitstring together with the codebook that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanEncoded {
    pub codebook: Codebook<char>,
    pub bits: String,
}

/// Build a codebook for `text` and encode it.
///
/// # Errors
/// Returns `HuffmanError::EmptyFrequencyTable` for empty input.
pub fn encode(text: &str) -> Result<HuffmanEncoded> {
    let symbols: Vec<char> = text.chars().collect();
    let codebook = Codebook::from_symbols(&symbols)?;
    let bits = codebook.encode(&symbols)?;

    debug!(chars = symbols.len(), bits = bits.len(), "huffman encoded");
    Ok(HuffmanEncoded { codebook, bits })
}

/// Decode `encoded.bits` with `encoded.codebook`.
pub fn decode(encoded: &HuffmanEncoded) -> Result<String> {
    let symbols = encoded.codebook.decode(&encoded.bits)?;
    Ok(symbols.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn codes_of(probabilities: &[f64]) -> Vec<String> {
        encode_probabilities(probabilities)
            .unwrap()
            .into_iter()
            .map(|(_, code)| code)
            .collect()
    }

    #[test]
    fn test_encode_probabilities_reference_vector() {
        let probabilities = [0.4, 0.18, 0.1, 0.1, 0.07, 0.06, 0.05, 0.04];
        let result = encode_probabilities(&probabilities).unwrap();

        let expected = [
            "1", "001", "011", "0000", "0100", "0101", "00010", "00011",
        ];
        for ((probability, code), (input, want)) in
            result.iter().zip(probabilities.iter().zip(expected))
        {
            assert_eq!(probability, input);
            assert_eq!(code, want);
        }
    }

    #[test]
    fn test_two_symbols() {
        assert_eq!(codes_of(&[0.5, 0.5]), ["0", "1"]);
        assert_eq!(codes_of(&[0.25, 0.75]), ["1", "0"]);
    }

    #[test]
    fn test_single_symbol() {
        assert_eq!(codes_of(&[1.0]), ["0"]);
    }

    #[test]
    fn test_empty_probabilities() {
        assert!(matches!(
            encode_probabilities(&[]),
            Err(Error::Huffman(HuffmanError::EmptyFrequencyTable))
        ));
    }

    #[test]
    fn test_find_probabilities() {
        let (probabilities, alphabet) = find_probabilities("abca");
        assert_eq!(alphabet, ['a', 'b', 'c']);
        assert_eq!(probabilities, [0.5, 0.25, 0.25]);
    }

    #[test]
    fn test_round_trip() {
        let text = "text test 7342734y72y347 dbhfs dbfhbsdhf ";
        let encoded = encode(text).unwrap();

        assert!(encoded.bits.chars().all(|b| b == '0' || b == '1'));
        assert_eq!(decode(&encoded).unwrap(), text);
    }

    #[test]
    fn test_prefix_free() {
        let encoded = encode("the quick brown fox jumps over the lazy dog").unwrap();
        assert!(encoded.codebook.is_prefix_free());

        let codes: Vec<&str> = encoded.codebook.iter().map(|(_, code)| code).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a), "{a} is a prefix of {b}");
                }
            }
        }
    }

    #[test]
    fn test_frequent_symbol_gets_short_code() {
        let encoded = encode("aaaaaaaabbc").unwrap();
        let codebook = &encoded.codebook;

        assert_eq!(codebook.code(&'a').map(str::len), Some(1));
        assert_eq!(codebook.code(&'c').map(str::len), Some(2));
        assert_eq!(codebook.max_code_len(), 2);
        assert_eq!(encoded.bits.len(), 8 + 2 * 2 + 2);
    }

    #[test]
    fn test_codebook_first_occurrence_order() {
        let encoded = encode("zzyx").unwrap();
        let alphabet: Vec<char> = encoded.codebook.iter().map(|(s, _)| *s).collect();
        assert_eq!(alphabet, ['z', 'y', 'x']);
    }

    #[test]
    fn test_single_symbol_text() {
        let encoded = encode("aaaa").unwrap();
        assert_eq!(encoded.bits, "0000");
        assert_eq!(decode(&encoded).unwrap(), "aaaa");
    }

    #[test]
    fn test_empty_text() {
        assert!(matches!(
            encode(""),
            Err(Error::Huffman(HuffmanError::EmptyFrequencyTable))
        ));
    }

    #[test]
    fn test_deterministic() {
        let text = "mississippi river";
        assert_eq!(encode(text).unwrap(), encode(text).unwrap());
    }

    #[test]
    fn test_byte_symbols() {
        let data = b"\x00\x00\x01\x00\xff".to_vec();
        let codebook = Codebook::from_symbols(&data).unwrap();
        let bits = codebook.encode(&data).unwrap();
        assert_eq!(codebook.decode(&bits).unwrap(), data);
    }

    #[test]
    fn test_decode_invalid_bit() {
        let encoded = encode("ab").unwrap();
        let result = encoded.codebook.decode("01x");
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::InvalidBit {
                position: 2,
                found: 'x'
            }))
        ));
    }

    #[test]
    fn test_decode_invalid_and_truncated_code() {
        let codebook =
            Codebook::from_codes([('a', "0".to_string()), ('b', "10".to_string())]).unwrap();

        assert_eq!(codebook.decode("0100").unwrap(), ['a', 'b', 'a']);
        assert!(matches!(
            codebook.decode("011"),
            Err(Error::Huffman(HuffmanError::InvalidCode { position: 1 }))
        ));
        assert!(matches!(
            codebook.decode("01"),
            Err(Error::Huffman(HuffmanError::TruncatedCode { position: 1 }))
        ));
    }

    #[test]
    fn test_external_codebook_rejects_prefix() {
        let result = Codebook::from_codes([('a', "0".to_string()), ('b', "01".to_string())]);
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::NotPrefixFree { code })) if code == "0"
        ));

        let result = Codebook::from_codes([('a', "2".to_string())]);
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::NotPrefixFree { .. }))
        ));
    }

    #[test]
    fn test_encode_unknown_symbol() {
        let codebook =
            Codebook::from_codes([('a', "0".to_string()), ('b', "1".to_string())]).unwrap();
        assert!(matches!(
            codebook.encode(&['a', 'c']),
            Err(Error::Huffman(HuffmanError::UnknownSymbol { position: 1 }))
        ));
    }
}
