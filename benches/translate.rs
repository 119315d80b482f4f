//! Performance benchmarks for FIQL translation
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fiqlc::fiql::{ParseContext, UserConditionBuilder};
use fiqlc::schema::AttrSchemaType;
use fiqlc::search::{ClauseKind, Comparator, FiqlEncoder, SearchClause};
use std::collections::BTreeMap;

/// Alternating AND/OR clause list mixing every kind a user search offers
fn sample_clauses(n: usize) -> Vec<SearchClause> {
    (0..n)
        .map(|i| {
            let clause = match i % 5 {
                0 => SearchClause::attribute(format!("attr{}", i), Comparator::Equals).with_value("a,b;c"),
                1 => SearchClause::attribute("loginCount", Comparator::GreaterThan).with_value(i.to_string()),
                2 => SearchClause::new(ClauseKind::GroupMembership, format!("group{}", i), Comparator::Equals),
                3 => SearchClause::new(ClauseKind::Resource, "ldap", Comparator::NotEquals),
                _ => SearchClause::attribute("email", Comparator::IsNull),
            };
            if i % 2 == 1 { clause.or() } else { clause }
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut schema = BTreeMap::new();
    schema.insert("loginCount".to_string(), AttrSchemaType::Long);
    let encoder = FiqlEncoder::new(&UserConditionBuilder).with_schema(&schema);

    let mut group = c.benchmark_group("encode");
    for n in [1, 10, 100] {
        let clauses = sample_clauses(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &clauses, |b, clauses| {
            b.iter(|| encoder.encode(black_box(clauses)))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let context = ParseContext::default();
    let encoder = FiqlEncoder::new(&UserConditionBuilder);

    let mut group = c.benchmark_group("decode");
    for n in [1, 10, 100] {
        let fiql = encoder.encode(&sample_clauses(n)).unwrap_or_default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &fiql, |b, fiql| {
            b.iter(|| fiqlc::search::decode(black_box(fiql.as_str()), &context))
        });
    }
    group.finish();
}

fn bench_escape(c: &mut Criterion) {
    let value = "alpha,beta;gamma+delta".repeat(20);

    c.bench_function("escape_roundtrip", |b| {
        b.iter(|| fiqlc::search::escape::decode(&fiqlc::search::escape::encode(black_box(&value))))
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_escape);

criterion_main!(benches);
