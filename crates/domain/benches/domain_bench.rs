use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Cart, Item, Money, Order, PaymentMethodKind};

fn seeded_cart(items: u32) -> Cart {
    let mut cart = Cart::new();
    for id in 1..=items {
        let item = Item::new(
            id,
            format!("Game {id}"),
            Money::from_cents(100 * i64::from(id)),
            "RPG",
            "PC",
            format!("https://cdn.example/{id}.jpg"),
        );
        cart.add(&item).unwrap();
    }
    cart
}

fn bench_cart_add(c: &mut Criterion) {
    let item = Item::new(
        1,
        "Benchmark Game",
        Money::from_cents(1000),
        "RPG",
        "PC",
        "",
    );

    c.bench_function("domain/cart_add_100", |b| {
        b.iter(|| {
            let mut cart = Cart::new();
            for _ in 0..100 {
                cart.add(&item).unwrap();
            }
            cart
        });
    });
}

fn bench_summary(c: &mut Criterion) {
    let cart = seeded_cart(50);

    c.bench_function("domain/summary_50_lines", |b| {
        b.iter(|| cart.summary());
    });
}

fn bench_order_freeze(c: &mut Criterion) {
    let cart = seeded_cart(20);

    c.bench_function("domain/order_from_20_lines", |b| {
        b.iter(|| Order::from_lines(cart.lines(), PaymentMethodKind::Card));
    });
}

criterion_group!(benches, bench_cart_add, bench_summary, bench_order_freeze);
criterion_main!(benches);
