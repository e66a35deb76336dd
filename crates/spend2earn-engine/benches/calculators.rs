//! Calculator benchmarks
//!
//! The calculators sit on every account request, so they should stay in the
//! sub-microsecond range.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use spend2earn_common::{Account, BadgeTier};
use spend2earn_engine::cashback::{apply_spend, micro_stake_increments};
use spend2earn_engine::credit::{self, CreditEntitlement, LoanTerms};
use spend2earn_engine::DEFAULT_CASHBACK_RATE;

fn bench_tier(c: &mut Criterion) {
    let mut group = c.benchmark_group("tier");

    for spent in [dec!(50), dec!(499.99), dec!(1000), dec!(250000)] {
        group.bench_with_input(BenchmarkId::new("classify", spent), &spent, |b, &spent| {
            b.iter(|| BadgeTier::classify(black_box(spent)))
        });
    }

    group.finish();
}

fn bench_credit(c: &mut Criterion) {
    let mut group = c.benchmark_group("credit");

    group.bench_function("limit_and_borrow", |b| {
        b.iter(|| {
            let limit = credit::credit_limit(black_box(BadgeTier::Gold), black_box(dec!(1000)));
            credit::borrow(black_box(dec!(600)), limit, Decimal::ZERO)
        })
    });

    group.bench_function("repay", |b| {
        b.iter(|| credit::repay(black_box(dec!(50)), black_box(dec!(600)), black_box(dec!(1000))))
    });

    let account = Account {
        total_spending: dec!(750),
        vault_balance: dec!(2400),
        loan_balance: dec!(900),
        ..Account::default()
    };
    group.bench_function("evaluate_account", |b| {
        b.iter(|| {
            let entitlement = CreditEntitlement::evaluate(black_box(&account));
            let terms = LoanTerms::for_account(black_box(&account));
            (entitlement, terms)
        })
    });

    group.finish();
}

fn bench_cashback(c: &mut Criterion) {
    let mut group = c.benchmark_group("cashback");

    group.bench_function("apply_spend", |b| {
        b.iter(|| apply_spend(black_box(dec!(123.45)), DEFAULT_CASHBACK_RATE))
    });

    group.bench_function("micro_stake_25", |b| {
        b.iter(|| micro_stake_increments(black_box(dec!(25.75))).sum::<Decimal>())
    });

    group.finish();
}

criterion_group!(benches, bench_tier, bench_credit, bench_cashback);
criterion_main!(benches);
