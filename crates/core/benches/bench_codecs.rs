use criterion::{black_box, criterion_group, criterion_main, Criterion};
use textcodec_core::{huffman, lz77::Lz77Codec, lzw, DeflateCodec};

fn generate_text(size_kb: usize) -> String {
    let base = "The quick brown fox jumps over the lazy dog. Pack my box with five dozen \
liquor jugs. How vexingly quick daft zebras jump! ";
    let mut text = String::with_capacity(size_kb * 1024);
    while text.len() < size_kb * 1024 {
        text.push_str(base);
    }
    text.truncate(size_kb * 1024);
    text
}

fn bench_lz77(c: &mut Criterion) {
    let text = generate_text(4);
    for window in [16, 256] {
        let codec = Lz77Codec::new(window).unwrap();
        let triples = codec.encode(&text);
        c.bench_function(&format!("lz77_encode_w{window}_4kb"), |b| {
            b.iter(|| black_box(codec.encode(black_box(&text))))
        });
        c.bench_function(&format!("lz77_decode_w{window}_4kb"), |b| {
            b.iter(|| black_box(codec.decode(black_box(&triples)).unwrap()))
        });
    }
}

fn bench_lzw(c: &mut Criterion) {
    let text = generate_text(16);
    c.bench_function("lzw_encode_16kb", |b| b.iter(|| black_box(lzw::encode(black_box(&text)))));
}

fn bench_huffman(c: &mut Criterion) {
    let text = generate_text(16);
    let encoded = huffman::encode(&text).unwrap();
    c.bench_function("huffman_encode_16kb", |b| {
        b.iter(|| black_box(huffman::encode(black_box(&text)).unwrap()))
    });
    c.bench_function("huffman_decode_16kb", |b| {
        b.iter(|| black_box(huffman::decode(black_box(&encoded)).unwrap()))
    });
}

fn bench_deflate(c: &mut Criterion) {
    let text = generate_text(4);
    let codec = DeflateCodec::new(64).unwrap();
    c.bench_function("deflate_roundtrip_4kb", |b| {
        b.iter(|| {
            let encoded = codec.encode(black_box(&text)).unwrap();
            black_box(codec.decode(&encoded).unwrap())
        })
    });
}

criterion_group!(benches, bench_lz77, bench_lzw, bench_huffman, bench_deflate);
criterion_main!(benches);
