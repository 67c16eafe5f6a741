//! Metrics collection and reporting for codec runs.
//!
//! One `Metrics` value describes a single encode + decode pass:
//! - Input size (characters and UTF-8 bytes)
//! - Encoded size (codec units, and bits for bitstring codecs)
//! - Round-trip verification
//! - Timing
//!
//! The caller fills it in after each stage.

use std::time::{Duration, Instant};

/// Statistics for one codec run.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Codec ===
    /// Codec name, e.g. "lz77"
    pub codec: String,

    /// Name of the encoded unit: "triples", "codes" or "bits"
    pub unit: &'static str,

    // === Input ===
    /// Characters in the input text
    pub input_chars: u64,

    /// UTF-8 bytes in the input text
    pub input_bytes: u64,

    // === Encoding ===
    /// Number of encoded units produced
    pub encoded_units: u64,

    /// Length of the output bitstring, for bitstring codecs
    pub encoded_bits: Option<u64>,

    /// Codebook or dictionary entries
    pub table_entries: u64,

    // === Decoding ===
    /// Characters in the decoded text
    pub decoded_chars: u64,

    /// Whether the decoded text equals the input
    pub round_trip_ok: bool,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new(codec: impl Into<String>, unit: &'static str) -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            codec: codec.into(),
            unit,
            input_chars: 0,
            input_bytes: 0,
            encoded_units: 0,
            encoded_bits: None,
            table_entries: 0,
            decoded_chars: 0,
            round_trip_ok: false,
        }
    }

    /// Record the input text.
    pub fn record_input(&mut self, text: &str) {
        self.input_chars = text.chars().count() as u64;
        self.input_bytes = text.len() as u64;
    }

    /// Record the decoded text and compare it with `original`.
    pub fn record_decoded(&mut self, original: &str, decoded: &str) {
        self.decoded_chars = decoded.chars().count() as u64;
        self.round_trip_ok = original == decoded;
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compute compression ratio (encoded bits / input bits).
    ///
    /// Returns `None` for codecs without a bitstring and 0.0 for empty input.
    pub fn compression_ratio(&self) -> Option<f64> {
        let bits = self.encoded_bits?;
        if self.input_bytes == 0 {
            Some(0.0)
        } else {
            Some(bits as f64 / (self.input_bytes * 8) as f64)
        }
    }

    /// Compute average input characters per encoded unit.
    pub fn chars_per_unit(&self) -> f64 {
        if self.encoded_units == 0 {
            0.0
        } else {
            self.input_chars as f64 / self.encoded_units as f64
        }
    }

    /// Compute throughput in input bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Run Summary ({}) ===", self.codec);
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("=== Input ===");
        println!("Characters: {}", self.input_chars);
        println!("Bytes: {}", self.input_bytes);
        println!();

        println!("=== Encoding ===");
        println!("Encoded {}: {}", self.unit, self.encoded_units);
        println!("Table entries: {}", self.table_entries);
        println!("Characters per unit: {:.2}", self.chars_per_unit());
        if let Some(bits) = self.encoded_bits {
            println!("Bits: {}", bits);
        }
        if let Some(ratio) = self.compression_ratio() {
            println!("Ratio: {:.1}%", ratio * 100.0);
        }
        println!();

        println!("=== Decoding ===");
        println!("Decoded characters: {}", self.decoded_chars);
        if self.round_trip_ok {
            println!("Verification: PASSED ✓");
        } else {
            println!("Verification: FAILED ✗");
        }
        println!();

        println!("=== Performance ===");
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }

    /// Print just the final result (pass/fail).
    pub fn print_result(&self) {
        if self.round_trip_ok {
            println!("✓ Round trip completed successfully");
            println!(
                "  {} characters as {} {} in {} ms",
                self.input_chars,
                self.encoded_units,
                self.unit,
                self.duration().as_millis()
            );
        } else {
            println!(
                "✗ Round trip failed: decoded {} of {} characters",
                self.decoded_chars, self.input_chars
            );
        }
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        let mut text = format!(
            "codec={}\n\
             duration_ms={}\n\
             input_chars={}\n\
             input_bytes={}\n\
             encoded_{}={}\n\
             table_entries={}\n\
             decoded_chars={}\n\
             round_trip_ok={}\n",
            self.codec,
            self.duration().as_millis(),
            self.input_chars,
            self.input_bytes,
            self.unit,
            self.encoded_units,
            self.table_entries,
            self.decoded_chars,
            self.round_trip_ok,
        );
        if let Some(ratio) = self.compression_ratio() {
            text.push_str(&format!("compression_ratio={:.4}\n", ratio));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new("lz77", "triples");
        assert!(metrics.end_time.is_none());
        assert!(!metrics.round_trip_ok);
        assert!(metrics.duration().as_millis() < 100);
    }

    #[test]
    fn test_record_input_counts_chars_and_bytes() {
        let mut metrics = Metrics::new("lzw", "codes");
        metrics.record_input("héllo");

        assert_eq!(metrics.input_chars, 5);
        assert_eq!(metrics.input_bytes, 6);
    }

    #[test]
    fn test_compression_ratio() {
        let mut metrics = Metrics::new("huffman", "bits");
        assert_eq!(metrics.compression_ratio(), None);

        metrics.input_bytes = 100;
        metrics.encoded_bits = Some(400);
        assert_eq!(metrics.compression_ratio(), Some(0.5));
    }

    #[test]
    fn test_round_trip_verdict() {
        let mut metrics = Metrics::new("deflate", "bits");
        metrics.record_decoded("abc", "abc");
        assert!(metrics.round_trip_ok);

        metrics.record_decoded("abc", "ab");
        assert!(!metrics.round_trip_ok);
        assert_eq!(metrics.decoded_chars, 2);
    }

    #[test]
    fn test_chars_per_unit() {
        let mut metrics = Metrics::new("lz77", "triples");
        assert_eq!(metrics.chars_per_unit(), 0.0);

        metrics.input_chars = 30;
        metrics.encoded_units = 6;
        assert_eq!(metrics.chars_per_unit(), 5.0);
    }

    #[test]
    fn test_throughput() {
        let mut metrics = Metrics::new("lz77", "triples");
        metrics.input_bytes = 1_000_000;

        std::thread::sleep(Duration::from_millis(10));
        metrics.complete();

        assert!(metrics.throughput_bps() > 0.0);
    }

    #[test]
    fn test_export_text() {
        let mut metrics = Metrics::new("huffman", "bits");
        metrics.input_bytes = 10;
        metrics.encoded_units = 20;
        metrics.encoded_bits = Some(20);

        let text = metrics.export_text();
        assert!(text.contains("codec=huffman"));
        assert!(text.contains("encoded_bits=20"));
        assert!(text.contains("compression_ratio=0.2500"));
    }
}
