use canon_uri::{
    pct_enc::{encode, table::QUERY, EStr},
    ComparisonLevel, Uri,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

criterion_group!(
    benches,
    bench_parse,
    bench_parse_owned,
    bench_build,
    bench_normalize,
    bench_resolve,
    bench_eq,
    bench_enc,
    bench_dec,
);
criterion_main!(benches);

const PARSE_CASE: &str = "https://alice@files.example.net:8443/docs/r%C3%A9sum%C3%A9.pdf?v=2#page=3";
const NORMALIZE_CASE: &str = "HTTPS://files.example.net//docs/./old/../r%c3%a9sum%c3%a9%2epdf";
const NORMALIZED: &str = "https://files.example.net/docs/r%C3%A9sum%C3%A9.pdf";
const BASE: &str = "https://files.example.net/docs/2024/report.pdf?v=1";
const REFERENCE: &str = "../../img/./logo.svg#dark";
const ENC_CASE: &str = "naïve café / 東京 ?&= 100%";
const DEC_CASE: &str = "na%C3%AFve%20caf%C3%A9%20/%20%E6%9D%B1%E4%BA%AC%20?&=%20100%25";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| Uri::parse(black_box(PARSE_CASE)))
    });
}

fn bench_parse_owned(c: &mut Criterion) {
    c.bench_function("parse_owned", |b| {
        b.iter(|| Uri::parse(black_box(PARSE_CASE).to_owned()))
    });
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build", |b| {
        b.iter(|| {
            Uri::builder()
                .scheme(black_box("https"))
                .userinfo(black_box("alice"))
                .host(black_box("files.example.net"))
                .port(black_box(8443))
                .path(black_box("/docs/résumé.pdf"))
                .query(black_box("v=2"))
                .fragment(black_box("page=3"))
                .build()
        })
    });
}

fn bench_normalize(c: &mut Criterion) {
    let uri = Uri::parse(NORMALIZE_CASE).unwrap();
    c.bench_function("normalize", |b| {
        b.iter(|| black_box(uri).normalize(ComparisonLevel::SyntaxBased))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let base = Uri::parse(BASE).unwrap();
    let reference = Uri::parse(REFERENCE).unwrap();
    c.bench_function("resolve", |b| {
        b.iter(|| {
            black_box(base).resolve(&black_box(reference), ComparisonLevel::StringComparison)
        })
    });
}

fn bench_eq(c: &mut Criterion) {
    let a = Uri::parse(NORMALIZE_CASE).unwrap();
    let b = Uri::parse(NORMALIZED).unwrap();
    c.bench_function("eq", |bench| bench.iter(|| black_box(a) == black_box(b)));
}

fn bench_enc(c: &mut Criterion) {
    c.bench_function("enc", |b| b.iter(|| encode(black_box(ENC_CASE), QUERY)));
}

fn bench_dec(c: &mut Criterion) {
    let s = EStr::new(DEC_CASE).unwrap();
    c.bench_function("dec", |b| b.iter(|| black_box(s).decode()));
}
