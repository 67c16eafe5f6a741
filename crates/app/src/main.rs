//! textcodec: run one codec over a text, verify the round trip, report.

mod config;
mod input_gen;

use std::fmt::Debug;
use std::hash::Hash;
use std::path::Path;
use std::process::ExitCode;

use textcodec_core::metrics::Metrics;
use textcodec_core::{huffman, lzw, Codebook, DeflateCodec, Lz77Codec, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::{CodecKind, Config, ParsedArgs};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(ParsedArgs::Run(config)) => config,
        Ok(ParsedArgs::Help) => {
            config::print_help();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    init_tracing(&config.log_level);

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(metrics) => {
            if config.print_metrics {
                metrics.print_summary();
            }
            metrics.print_result();
            if metrics.round_trip_ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            error!(%err, "run failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_input(config: &Config) -> Result<String> {
    match &config.input_file {
        Some(path) => {
            info!(path = %path.display(), "reading input");
            Ok(std::fs::read_to_string(path)?)
        }
        None => {
            info!(seed = config.seed, chars = config.sample_chars, "generating sample input");
            Ok(input_gen::generate_sample_text(config.seed, config.sample_chars))
        }
    }
}

/// Encode, optionally save, decode and compare.
fn run(config: &Config) -> Result<Metrics> {
    let text = load_input(config)?;
    let unit = match config.codec {
        CodecKind::Lz77 => "triples",
        CodecKind::Lzw => "codes",
        CodecKind::Huffman | CodecKind::Deflate => "bits",
    };

    let mut metrics = Metrics::new(config.codec.name(), unit);
    metrics.record_input(&text);

    let (encoded_text, decoded) = match config.codec {
        CodecKind::Lz77 => {
            let codec = Lz77Codec::new(config.window)?;
            let triples = codec.encode(&text);
            metrics.encoded_units = triples.len() as u64;

            let rendered: String = triples.iter().map(|t| format!("{t}\n")).collect();
            (rendered, codec.decode(&triples)?)
        }
        CodecKind::Lzw => {
            let (dictionary, codes) = lzw::encode(&text);
            metrics.encoded_units = codes.len() as u64;
            metrics.table_entries = dictionary.len() as u64;

            let entries: String = dictionary
                .iter()
                .enumerate()
                .map(|(code, entry)| format!("{code}\t{entry:?}\n"))
                .collect();
            let rendered: Vec<String> = codes.iter().map(usize::to_string).collect();
            let saved = format!("dictionary:\n{entries}codes:\n{}\n", rendered.join(" "));
            (saved, lzw::decode(&dictionary, &codes)?)
        }
        CodecKind::Huffman => {
            let encoded = huffman::encode(&text)?;
            metrics.encoded_units = encoded.bits.len() as u64;
            metrics.encoded_bits = Some(encoded.bits.len() as u64);
            metrics.table_entries = encoded.codebook.len() as u64;
            info!(max_code_len = encoded.codebook.max_code_len(), "codebook built");

            let decoded = huffman::decode(&encoded)?;
            (render_coded(&encoded.codebook, &encoded.bits), decoded)
        }
        CodecKind::Deflate => {
            let codec = DeflateCodec::new(config.window)?;
            let encoded = codec.encode(&text)?;
            metrics.encoded_units = encoded.bits.len() as u64;
            metrics.encoded_bits = Some(encoded.bits.len() as u64);
            metrics.table_entries = encoded.codebook.len() as u64;
            info!(max_code_len = encoded.codebook.max_code_len(), "codebook built");

            let decoded = codec.decode(&encoded)?;
            (render_coded(&encoded.codebook, &encoded.bits), decoded)
        }
    };

    if let Some(path) = &config.output_file {
        write_output(path, &encoded_text)?;
    }

    metrics.record_decoded(&text, &decoded);
    metrics.complete();

    info!(
        codec = %config.codec,
        units = metrics.encoded_units,
        round_trip_ok = metrics.round_trip_ok,
        "run complete"
    );
    Ok(metrics)
}

/// Codebook lines followed by the bitstring, enough to decode the file.
fn render_coded<S: Debug + Eq + Hash + Clone>(codebook: &Codebook<S>, bits: &str) -> String {
    let table: String = codebook
        .iter()
        .map(|(symbol, code)| format!("{symbol:?}\t{code}\n"))
        .collect();
    format!("codebook:\n{table}bits:\n{bits}\n")
}

fn write_output(path: &Path, encoded: &str) -> Result<()> {
    info!(path = %path.display(), bytes = encoded.len(), "writing encoded output");
    std::fs::write(path, encoded)?;
    Ok(())
}
