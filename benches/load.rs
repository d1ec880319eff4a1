use criterion::{black_box, criterion_group, criterion_main, Criterion};
use word_frequency::{tokenizer, NaiveWordHasher, WordFrequency};

const TEXT: &str = include_str!("../tests/data/lighthouse.txt");

fn load_benchmarks(c: &mut Criterion) {
    let text = TEXT.repeat(200);

    c.bench_function("tokenize", |b| {
        b.iter(|| tokenizer::word_count(black_box(&text)))
    });
    c.bench_function("load fx", |b| {
        b.iter(|| WordFrequency::from_reader(black_box(text.as_bytes())))
    });
    c.bench_function("load naive", |b| {
        b.iter(|| WordFrequency::from_reader_with_hasher(black_box(text.as_bytes()), NaiveWordHasher))
    });

    let frequencies = WordFrequency::from_reader(text.as_bytes());
    c.bench_function("most_frequent_word", |b| {
        b.iter(|| black_box(&frequencies).most_frequent_word().len())
    });
}

criterion_group!(benches, load_benchmarks);
criterion_main!(benches);
