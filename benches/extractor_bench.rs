//! Benchmarks for record extraction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use uac_triage::parsers::records::parse_content;
use uac_triage::parsers::RecordKind;

fn generate(kind: RecordKind, lines: usize) -> String {
    (0..lines)
        .map(|i| match kind {
            RecordKind::AccountDatabase => format!("user{0}:x:{0}:{0}:User {0}:/home/user{0}:/bin/bash", i),
            RecordKind::ShadowDatabase => format!("user{}:$6$salt$hash:19000:0:99999:7:::", i),
            RecordKind::GroupDatabase => format!("group{0}:x:{0}:alice,bob,carol", i),
            RecordKind::SudoersRule => format!("user{} ALL=(ALL) NOPASSWD: ALL", i),
            RecordKind::FreeTextLine => format!("Jan  1 00:00:{:02} web01 sshd[{}]: session opened", i % 60, i),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Benchmark parsing of each record kind over a 1000-line file
fn bench_parse_content(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_content");

    let kinds = [
        RecordKind::AccountDatabase,
        RecordKind::ShadowDatabase,
        RecordKind::GroupDatabase,
        RecordKind::SudoersRule,
        RecordKind::FreeTextLine,
    ];

    for kind in kinds {
        let content = generate(kind, 1000);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::new("kind", kind), &content, |b, content| {
            b.iter(|| parse_content(kind, black_box(content), "web01", "web01__auth.log"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_content);
criterion_main!(benches);
