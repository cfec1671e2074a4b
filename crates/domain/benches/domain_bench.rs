use chrono::{Duration, Utc};
use common::ProductId;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Discount, Money, PricingCalculator, Product};

fn bench_money_arithmetic(c: &mut Criterion) {
    let a = Money::new(1999, 100).unwrap();
    let b = Money::new(1, 3).unwrap();

    c.bench_function("domain/money_add_subtract", |bench| {
        bench.iter(|| a.add(&b).subtract(&b).unwrap());
    });

    c.bench_function("domain/money_subtract_percentage", |bench| {
        bench.iter(|| a.subtract_percentage(20));
    });

    c.bench_function("domain/money_display", |bench| {
        bench.iter(|| a.subtract_percentage(20).to_string());
    });
}

fn bench_product_lifecycle(c: &mut Criterion) {
    let now = Utc::now();
    let discount = Discount::new(20, now, now + Duration::days(7)).unwrap();

    c.bench_function("domain/create_activate_discount", |bench| {
        bench.iter(|| {
            let mut tracked = Product::create(
                ProductId::generate(),
                "Benchmark Widget",
                "",
                "Bench",
                Money::new(1999, 100).unwrap(),
                now,
            )
            .unwrap();
            tracked.execute(|p| p.activate(now)).unwrap();
            tracked
                .execute(|p| p.apply_discount(discount.clone(), now))
                .unwrap();
            tracked.product().effective_price(now)
        });
    });
}

fn bench_price_breakdown(c: &mut Criterion) {
    let now = Utc::now();
    let mut tracked = Product::create(
        ProductId::generate(),
        "Benchmark Widget",
        "",
        "Bench",
        Money::new(1999, 100).unwrap(),
        now,
    )
    .unwrap();
    tracked.execute(|p| p.activate(now)).unwrap();
    let discount = Discount::new(15, now, now + Duration::days(1)).unwrap();
    tracked.execute(|p| p.apply_discount(discount, now)).unwrap();

    c.bench_function("domain/price_breakdown", |bench| {
        bench.iter(|| PricingCalculator::price_breakdown(tracked.product(), now));
    });
}

criterion_group!(
    benches,
    bench_money_arithmetic,
    bench_product_lifecycle,
    bench_price_breakdown
);
criterion_main!(benches);
