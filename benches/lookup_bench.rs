use criterion::{black_box, criterion_group, criterion_main, Criterion};
use roteiro_biblico::bible::{ReferenceFormatter, ReferenceParser, VerseExtractor};
use roteiro_biblico::BookRegistry;

fn chapter_markup(verses: u32) -> String {
    let mut html = String::from("<html><body><article><p>");
    for number in 1..=verses {
        html.push_str(&format!(
            "<span class=\"v\">{}</span><span class=\"t\">Texto do versículo {} com algumas palavras,</span>\
             <span class=\"t\">continuação do versículo {}.</span>",
            number, number, number
        ));
    }
    html.push_str("</p></article></body></html>");
    html
}

fn bench_reference_parsing(c: &mut Criterion) {
    let parser = ReferenceParser::new();
    c.bench_function("parse_references", |b| {
        b.iter(|| {
            black_box(parser.parse("rm 5:3-5").ok());
            black_box(parser.parse("1co13").ok());
            black_box(parser.parse("Jo 3:16").ok());
            black_box(parser.parse("rm$5").ok());
        })
    });

    let formatter = ReferenceFormatter::new(BookRegistry::portuguese());
    c.bench_function("format_reference", |b| {
        b.iter(|| black_box(formatter.format("1co", "13", Some(7), Some(4), "ntlh")))
    });

    c.bench_function("book_registry_creation", |b| {
        b.iter(|| black_box(BookRegistry::portuguese()))
    });
}

fn bench_verse_extraction(c: &mut Criterion) {
    let extractor = VerseExtractor::new();

    let short_chapter = chapter_markup(12);
    c.bench_function("extract_short_chapter", |b| {
        b.iter(|| black_box(extractor.extract(black_box(&short_chapter), None, None)))
    });

    // Psalm 119 sized page
    let long_chapter = chapter_markup(176);
    c.bench_function("extract_long_chapter_range", |b| {
        b.iter(|| black_box(extractor.extract(black_box(&long_chapter), Some(100), Some(120))))
    });
}

criterion_group!(benches, bench_reference_parsing, bench_verse_extraction);
criterion_main!(benches);
