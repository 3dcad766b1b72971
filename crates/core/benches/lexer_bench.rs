//! Benchmarks for tokenization and object parsing.
//!
//! Benchmark groups:
//! - `lexer_tokenize`: raw `next_token` throughput at various scales
//! - `parser_objects`: `PDFParser::next_object` over dict-heavy input
//! - `document_xref`: building a `PDFDocument` with a large xref section

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use pdfp_core::atoms::AtomTable;
use pdfp_core::document::PDFDocument;
use pdfp_core::parser::{PDFParser, TokenKind, next_token};
use pdfp_core::span::Span;

/// Generate N tokens typical of PDF object syntax.
fn generate_mixed_tokens(n: usize) -> Vec<u8> {
    let templates: &[&[u8]] = &[
        b"<< ",
        b"/Type ",
        b"/Page ",
        b"/MediaBox ",
        b"[ ",
        b"0 ",
        b"612.0 ",
        b"] ",
        b"/Parent ",
        b"3 ",
        b"0 ",
        b"R ",
        b"/Title ",
        b"(Hello \\(World\\)) ",
        b"/ID ",
        b"<48454C4C4F> ",
        b">> ",
        b"% comment\n",
    ];

    let mut data = Vec::with_capacity(n * 8);
    for i in 0..n {
        data.extend_from_slice(templates[i % templates.len()]);
    }
    data
}

/// Generate N page-like dictionaries.
fn generate_dicts(n: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(n * 96);
    for i in 0..n {
        data.extend_from_slice(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R /Rotate -90 /UserUnit 1.5 >>\n",
                i + 3
            )
            .as_bytes(),
        );
    }
    data
}

/// Generate a PDF with one xref section of N entries.
fn generate_pdf(n: usize) -> Vec<u8> {
    let mut data = b"%PDF-1.7\n".to_vec();
    let startxref = data.len();
    data.extend_from_slice(format!("xref\n0 {n}\n0000000000 65535 f \n").as_bytes());
    for i in 1..n {
        data.extend_from_slice(format!("{:010} 00000 n \n", i * 20).as_bytes());
    }
    data.extend_from_slice(
        format!("trailer\n<< /Size {n} /Root 1 0 R >>\nstartxref\n{startxref}\n%%EOF\n").as_bytes(),
    );
    data
}

fn count_tokens(data: &[u8]) -> usize {
    let mut input = Span::new(data);
    let mut count = 0;
    loop {
        let (token, rest) = next_token(input);
        if token.is(TokenKind::EndOfStream) {
            return count;
        }
        count += 1;
        input = rest;
    }
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_tokenize");

    for target_tokens in [10_000usize, 100_000, 1_000_000] {
        let data = generate_mixed_tokens(target_tokens);
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("mixed", target_tokens),
            &data,
            |b, data| b.iter(|| count_tokens(black_box(data))),
        );
    }

    group.finish();
}

fn bench_parse_objects(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_objects");

    for dicts in [1_000usize, 10_000] {
        let data = generate_dicts(dicts);
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_with_input(BenchmarkId::new("page_dicts", dicts), &data, |b, data| {
            b.iter(|| {
                let mut atoms = AtomTable::new();
                let mut parser = PDFParser::new(Span::new(black_box(data)), &mut atoms);
                let mut count = 0usize;
                while let Ok(obj) = parser.next_object() {
                    if obj.is_nothing() {
                        break;
                    }
                    black_box(&obj);
                    count += 1;
                }
                count
            })
        });
    }

    group.finish();
}

fn bench_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_xref");

    for entries in [1_000usize, 100_000] {
        let data = generate_pdf(entries);
        group.bench_with_input(BenchmarkId::new("entries", entries), &data, |b, data| {
            b.iter(|| {
                let doc = PDFDocument::new(black_box(data)).unwrap();
                doc.xref().in_use().count()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_parse_objects, bench_document);
criterion_main!(benches);
