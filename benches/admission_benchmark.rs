use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use trainlog_sync::models::{Provider, Source, SyncRecord, SyncStatus, Workout};
use trainlog_sync::services::{decide, detect_source, ImportTarget};

fn benchmark_admission(c: &mut Criterion) {
    let workout = Workout {
        id: "w1".to_string(),
        user_id: "u1".to_string(),
        actual_distance: Some(10_000.0),
        ..Default::default()
    };

    // Stale failed Strava row plus an authoritative Garmin row
    let records: Vec<SyncRecord> = [
        (Provider::Strava, SyncStatus::Failed),
        (Provider::Garmin, SyncStatus::Synced),
    ]
    .into_iter()
    .map(|(provider, sync_status)| SyncRecord {
        workout_id: "w1".to_string(),
        user_id: "u1".to_string(),
        provider,
        external_activity_id: "42".to_string(),
        sync_status,
        synced_at: None,
        last_error: None,
    })
    .collect();

    let mut group = c.benchmark_group("admission");

    group.bench_function("detect_source", |b| {
        b.iter(|| detect_source(black_box("w1"), black_box(&records), Some(&workout)))
    });

    group.bench_function("decide_conflict", |b| {
        b.iter(|| {
            decide(
                black_box(Source::Auto),
                black_box(ImportTarget::ExistingWorkout(Some(Source::Garmin))),
                black_box(Provider::Strava),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_admission);
criterion_main!(benches);
