//! Performance benchmarks for the attendance aggregation engine.
//!
//! These benchmarks measure grid construction over month-sized punch sets
//! to keep aggregation comfortably off the terminal's critical section:
//! the session gate is held during retrieval only, never during folding.
//!
//! Run benchmarks with:
//! ```sh
//! cargo bench --bench grid_bench
//! ```

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use punchclock_attendance::build_monthly_grid;
use punchclock_core::{EmployeeId, Privilege, PunchEvent, PunchKind, UserRecord};
use std::hint::black_box;

/// Build a synthetic user directory of `count` employees.
fn make_users(count: u16) -> Vec<UserRecord> {
    (1..=count)
        .map(|index| UserRecord {
            internal_id: index,
            employee_id: EmployeeId::new(&index.to_string()).unwrap(),
            name: format!("User {index}"),
            privilege: Privilege::Standard,
            password: String::new(),
            group_id: String::new(),
        })
        .collect()
}

/// Build a month of punches: two per working day per user, deterministic.
fn make_punches(users: &[UserRecord], year: i32, month: u32, days: u32) -> Vec<PunchEvent> {
    let mut punches = Vec::new();
    for user in users {
        for day in 1..=days {
            let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            for (hour, kind) in [(8, PunchKind::CheckIn), (17, PunchKind::CheckOut)] {
                punches.push(PunchEvent {
                    employee_id: user.employee_id.clone(),
                    timestamp: date.and_hms_opt(hour, 30, 0).unwrap(),
                    kind,
                    status: 1,
                });
            }
        }
    }
    punches
}

/// Benchmark grid construction across directory sizes.
fn bench_build_monthly_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_monthly_grid");

    for user_count in [10u16, 100, 500] {
        let users = make_users(user_count);
        let punches = make_punches(&users, 2024, 3, 31);
        group.throughput(Throughput::Elements(punches.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(user_count),
            &user_count,
            |b, _| {
                b.iter(|| {
                    let grids =
                        build_monthly_grid(black_box(&punches), black_box(&users), 2024, 3)
                            .unwrap();
                    black_box(grids);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the degenerate case: a large punch log entirely outside the
/// requested month.
fn bench_out_of_month_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("out_of_month_filtering");

    let users = make_users(100);
    let punches = make_punches(&users, 2024, 2, 29);
    group.throughput(Throughput::Elements(punches.len() as u64));

    group.bench_function("filter_only", |b| {
        b.iter(|| {
            let grids =
                build_monthly_grid(black_box(&punches), black_box(&users), 2024, 3).unwrap();
            black_box(grids);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_build_monthly_grid, bench_out_of_month_filtering);
criterion_main!(benches);
