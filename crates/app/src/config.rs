//! Configuration for the textcodec command-line driver.
//!
//! Handles parsing command-line arguments and filling in defaults. The tool
//! works with ZERO arguments: it generates a sample text from a time-based
//! seed and runs the Deflate codec over it. All resolved values can be
//! printed with `--print-config` so runs are reproducible.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Codec selected with `--codec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    Lz77,
    Lzw,
    Huffman,
    Deflate,
}

impl CodecKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lz77 => "lz77",
            Self::Lzw => "lzw",
            Self::Huffman => "huffman",
            Self::Deflate => "deflate",
        }
    }

    /// Whether the codec takes a window length.
    pub fn uses_window(&self) -> bool {
        matches!(self, Self::Lz77 | Self::Deflate)
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodecKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lz77" => Ok(Self::Lz77),
            "lzw" => Ok(Self::Lzw),
            "huffman" => Ok(Self::Huffman),
            "deflate" => Ok(Self::Deflate),
            other => Err(format!(
                "unknown codec '{other}' (expected lz77, lzw, huffman or deflate)"
            )),
        }
    }
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Codec ===
    /// Codec to run
    pub codec: CodecKind,

    /// LZ77 window length (lz77 and deflate)
    pub window: usize,

    // === Files ===
    /// Input text path (None = generate sample)
    pub input_file: Option<PathBuf>,

    /// Where to write the encoded representation (None = don't write)
    pub output_file: Option<PathBuf>,

    // === Sample generation ===
    /// Seed for the sample text generator
    pub seed: u64,

    /// Length of the generated sample in characters
    pub sample_chars: usize,

    // === Behavior ===
    /// Log filter used when RUST_LOG is unset
    pub log_level: String,

    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print detailed metrics summary
    pub print_metrics: bool,
}

/// Outcome of argument parsing.
#[derive(Debug)]
pub enum ParsedArgs {
    Run(Config),
    Help,
}

impl Config {
    /// Parse configuration from command-line arguments (without the program
    /// name).
    ///
    /// If `--seed` is omitted, a time-based seed is used for sample
    /// generation.
    pub fn from_args(args: &[String]) -> Result<ParsedArgs, String> {
        let mut codec = CodecKind::Deflate;
        let mut window: Option<usize> = None;
        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut sample_chars: Option<usize> = None;
        let mut log_level: Option<String> = None;
        let mut print_config = false;
        let mut print_metrics = true;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let mut value = |what: &str| {
                iter.next()
                    .map(String::as_str)
                    .ok_or_else(|| format!("{arg} requires {what}"))
            };

            match arg.as_str() {
                "--codec" => {
                    codec = value("a codec name")?.parse()?;
                }
                "--window" => {
                    window = Some(value("a number")?.parse().map_err(|_| "invalid window")?);
                }
                "--in" => {
                    input_file = Some(PathBuf::from(value("a path")?));
                }
                "--out" => {
                    output_file = Some(PathBuf::from(value("a path")?));
                }
                "--seed" => {
                    seed = Some(value("a number")?.parse().map_err(|_| "invalid seed")?);
                }
                "--sample-chars" => {
                    sample_chars =
                        Some(value("a number")?.parse().map_err(|_| "invalid sample-chars")?);
                }
                "--log-level" => {
                    log_level = Some(value("a level")?.to_string());
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--help" | "-h" => {
                    return Ok(ParsedArgs::Help);
                }
                other => {
                    return Err(format!("unknown argument: {other}"));
                }
            }
        }

        let window = window.unwrap_or(32);
        if window == 0 {
            return Err("--window must be at least 1".to_string());
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(ParsedArgs::Run(Config {
            codec,
            window,
            input_file,
            output_file,
            seed,
            sample_chars: sample_chars.unwrap_or(4096),
            log_level: log_level.unwrap_or_else(|| "warn".to_string()),
            print_config,
            print_metrics,
        }))
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Codec: {}", self.codec);
        if self.codec.uses_window() {
            println!("Window: {} chars", self.window);
        }
        println!();
        match &self.input_file {
            Some(path) => println!("Input file:  {}", path.display()),
            None => {
                println!("Input file:  (generate sample)");
                println!("Seed: {}", self.seed);
                println!("Sample length: {} chars", self.sample_chars);
            }
        }
        match &self.output_file {
            Some(path) => println!("Output file: {}", path.display()),
            None => println!("Output file: (none)"),
        }
        println!("Log level: {}", self.log_level);
        println!();
    }
}

pub fn print_help() {
    println!("textcodec: LZ77 / LZW / Huffman / Deflate-style text codecs");
    println!();
    println!("USAGE:");
    println!("    textcodec [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --codec <NAME>          lz77, lzw, huffman or deflate (default: deflate)");
    println!("    --window <N>            LZ77 window length, >= 1 (default: 32)");
    println!();
    println!("    --in <PATH>             Input text file (default: generate sample)");
    println!("    --out <PATH>            Write the encoded output with its codebook or dictionary");
    println!("    --seed <N>              Sample generator seed (default: time-based)");
    println!("    --sample-chars <N>      Sample length in characters (default: 4096)");
    println!();
    println!("    --log-level <LEVEL>     Log filter when RUST_LOG is unset (default: warn)");
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    textcodec                                   # Deflate over a random sample");
    println!("    textcodec --codec lz77 --window 5 --seed 42 # Deterministic LZ77 run");
    println!("    textcodec --codec huffman --in notes.txt    # Huffman over a file");
    println!("    textcodec --in a.txt --out a.bits           # Save the Deflate bitstring");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ParsedArgs, String> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        Config::from_args(&args)
    }

    fn config(args: &[&str]) -> Config {
        match parse(args) {
            Ok(ParsedArgs::Run(config)) => config,
            other => panic!("expected a run config, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.codec, CodecKind::Deflate);
        assert_eq!(config.window, 32);
        assert!(config.input_file.is_none());
        assert!(config.output_file.is_none());
        assert_eq!(config.sample_chars, 4096);
        assert_eq!(config.log_level, "warn");
        assert!(config.print_metrics);
    }

    #[test]
    fn test_all_flags() {
        let config = config(&[
            "--codec", "LZ77", "--window", "5", "--in", "a.txt", "--out", "a.out", "--seed",
            "42", "--sample-chars", "10", "--log-level", "debug", "--print-config",
            "--no-metrics",
        ]);
        assert_eq!(config.codec, CodecKind::Lz77);
        assert_eq!(config.window, 5);
        assert_eq!(config.input_file, Some(PathBuf::from("a.txt")));
        assert_eq!(config.output_file, Some(PathBuf::from("a.out")));
        assert_eq!(config.seed, 42);
        assert_eq!(config.sample_chars, 10);
        assert_eq!(config.log_level, "debug");
        assert!(config.print_config);
        assert!(!config.print_metrics);
    }

    #[test]
    fn test_help() {
        assert!(matches!(parse(&["--help"]), Ok(ParsedArgs::Help)));
        assert!(matches!(parse(&["-h"]), Ok(ParsedArgs::Help)));
    }

    #[test]
    fn test_errors() {
        assert!(parse(&["--window", "0"]).is_err());
        assert!(parse(&["--window", "x"]).is_err());
        assert!(parse(&["--window"]).is_err());
        assert!(parse(&["--codec", "zip"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }

    #[test]
    fn test_codec_names() {
        for kind in [CodecKind::Lz77, CodecKind::Lzw, CodecKind::Huffman, CodecKind::Deflate] {
            assert_eq!(kind.name().parse::<CodecKind>().unwrap(), kind);
        }
        assert!(CodecKind::Deflate.uses_window());
        assert!(!CodecKind::Lzw.uses_window());
    }
}
