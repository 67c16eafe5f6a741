//! Sample text generation.
//!
//! When no input file is specified, we generate a text with interesting
//! compression characteristics so every codec has something to find.
//!
//! # Design
//!
//! Generated text mixes:
//! - Runs of a single character (long LZ77 self-overlapping matches)
//! - Short repeating phrases (LZ77 back-references, LZW dictionary growth)
//! - Words drawn from a small vocabulary (skewed Huffman frequencies)
//! - Random letters (little structure)

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const VOCABULARY: &[&str] = &[
    "the", "codec", "window", "match", "literal", "offset", "length", "dictionary", "code",
    "symbol", "prefix", "huffman", "tree", "bit", "stream", "text", "and", "of", "a", "to",
];

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Generate `char_count` characters of sample text from `seed`.
///
/// The output is ASCII and contains at least two distinct characters when
/// `char_count >= 2`, so every codec can handle it.
pub fn generate_sample_text(seed: u64, char_count: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = String::with_capacity(char_count + 64);

    while text.len() < char_count {
        let section_len = rng.gen_range(16..=256);

        match rng.gen_range(0..10) {
            // 20% single-character runs
            0..=1 => {
                let c = *LETTERS.choose(&mut rng).unwrap_or(&b'a') as char;
                text.extend(std::iter::repeat(c).take(section_len));
            }

            // 20% repeating phrase
            2..=3 => {
                let phrase = generate_phrase(&mut rng);
                text.extend(phrase.chars().cycle().take(section_len));
            }

            // 40% vocabulary words
            4..=7 => {
                let start = text.len();
                while text.len() - start < section_len {
                    let word = VOCABULARY.choose(&mut rng).copied().unwrap_or("the");
                    text.push_str(word);
                    text.push(if rng.gen_bool(0.1) { '\n' } else { ' ' });
                }
            }

            // 20% random letters
            _ => {
                for _ in 0..section_len {
                    let idx = rng.gen_range(0..LETTERS.len());
                    text.push(LETTERS[idx] as char);
                }
            }
        }
    }

    // ASCII only, so byte length equals character count
    text.truncate(char_count);
    let first = text.chars().next();
    if char_count >= 2 && text.chars().all(|c| Some(c) == first) {
        text.pop();
        text.push(if text.ends_with('a') { 'b' } else { 'a' });
    }
    text
}

/// Generate a short repeating unit, e.g. "abc " or "xyxy-".
fn generate_phrase(rng: &mut ChaCha8Rng) -> String {
    let len = rng.gen_range(2..=8);
    (0..len)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
        .chain(std::iter::once(' '))
        .collect()
}
