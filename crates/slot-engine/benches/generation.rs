use chrono::{NaiveDate, NaiveTime, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::pattern::AvailabilityPattern;
use slot_engine::{filter_slots, generate_slots, ServiceException};
use std::hint::black_box;
use uuid::Uuid;

fn pattern(slot_type: &str, duration: i32) -> AvailabilityPattern {
    AvailabilityPattern {
        id: Uuid::new_v4(),
        service_id: Uuid::new_v4(),
        slot_type: slot_type.to_string(),
        slot_duration: duration,
        start_time: Some("08:00".parse().unwrap()),
        end_time: Some("20:00".parse().unwrap()),
        days_of_week: Some("1,2,3,4,5".to_string()),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 3, 31),
        created_at: Utc::now(),
    }
}

fn bench_generation(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_time(NaiveTime::MIN);
    let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap().and_time(NaiveTime::MIN);

    let mut group = c.benchmark_group("generate");
    for (name, p) in [
        ("minute_15", pattern("Minute", 15)),
        ("hour_60", pattern("Hour", 60)),
        ("day", pattern("Day", 1440)),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| generate_slots(black_box(&p), black_box(start), black_box(end)))
        });
    }
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_time(NaiveTime::MIN);
    let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap().and_time(NaiveTime::MIN);
    let slots = generate_slots(&pattern("Minute", 15), start, end);

    let exceptions: Vec<ServiceException> = (1..=12)
        .map(|month| {
            let day = NaiveDate::from_ymd_opt(2020, month, 10).unwrap();
            ServiceException {
                id: Uuid::new_v4(),
                service_id: Uuid::nil(),
                title: format!("Closure {}", month),
                description: None,
                start_date_time: day.and_time(NaiveTime::MIN),
                end_date_time: day.succ_opt().unwrap().and_time(NaiveTime::MIN),
                exception_type: "Holiday".to_string(),
                recurring_yearly: month % 2 == 0,
                created_at: Utc::now(),
                is_active: true,
            }
        })
        .collect();

    c.bench_function("filter_quarter_minute_15", |b| {
        b.iter(|| filter_slots(black_box(&slots), black_box(&exceptions)))
    });
}

criterion_group!(benches, bench_generation, bench_filter);
criterion_main!(benches);
