/// Benchmarks for decoding Topaz responses.
///
/// Listing endpoints answer with a JSON array of run or race rows, often several thousand
/// for a multi-day range, so table decoding and the column/row views dominate client-side
/// cost.
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Value, json};
use topaz_client_sdk::types::{Record, Table};

fn runs_json(rows: usize) -> String {
    let rows: Vec<Value> = (0..rows)
        .map(|i| {
            json!({
                "runId": 1_000_000 + i,
                "raceId": 972_428_497 + i / 8,
                "dogId": 695_144_538 + i,
                "dogName": format!("DOG NUMBER {i}"),
                "boxNumber": i % 8 + 1,
                "trainerName": "IVAN SMITH",
                "weightInKg": 31.4,
                "startPrice": 4.6,
                "place": i % 8 + 1,
                "resultTime": 29.87,
                "scratched": i % 13 == 0,
                "comment": null
            })
        })
        .collect();

    Value::Array(rows).to_string()
}

fn bench_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode/table");

    for rows in [8, 96, 2_000] {
        let json = runs_json(rows);

        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::new("Table", rows), &json, |b, json| {
            b.iter(|| {
                let _: Table = serde_json::from_str(std::hint::black_box(json))
                    .expect("Deserialization should succeed");
            });
        });
    }

    group.finish();
}

fn bench_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode/views");

    let table: Table =
        serde_json::from_str(&runs_json(2_000)).expect("Deserialization should succeed");

    group.bench_function("columns", |b| {
        b.iter(|| std::hint::black_box(&table).columns());
    });

    group.bench_function("rows", |b| {
        b.iter(|| std::hint::black_box(&table).rows());
    });

    group.finish();
}

fn bench_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode/record");

    let meeting = json!({
        "meetingId": 900_012_680,
        "trackCode": "SAN",
        "meetingDate": "2023-12-05",
        "races": (0..12).map(|race| json!({
            "raceId": 972_428_497 + race,
            "raceNumber": race + 1,
            "runs": (0..8).map(|run| json!({ "dogId": run, "boxNumber": run + 1 })).collect::<Vec<_>>()
        })).collect::<Vec<_>>()
    })
    .to_string();

    group.throughput(Throughput::Bytes(meeting.len() as u64));
    group.bench_function("Record", |b| {
        b.iter(|| {
            let _: Record = serde_json::from_str(std::hint::black_box(&meeting))
                .expect("Deserialization should succeed");
        });
    });

    group.finish();
}

criterion_group!(topaz_benches, bench_table, bench_views, bench_record);
criterion_main!(topaz_benches);
