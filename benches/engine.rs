use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use change_eng::{Catalog, ChangeRequest, CoinStack, Currency, Engine, Money, RequestId};

/// Generates change requests for benchmarking.
///
/// Tender is always a round 2.00; purchases cycle through every price
/// from 0.01 to 1.99 so every remainder shape gets exercised.
pub struct RequestGenerator {
    next_id: RequestId,
    count: u32,
}

impl RequestGenerator {
    pub fn new(count: u32) -> Self {
        Self { next_id: 1, count }
    }
}

impl Iterator for RequestGenerator {
    type Item = ChangeRequest;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_id > self.count {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;

        let purchase = 1 + u64::from(id) % 199;
        Some(ChangeRequest::new(
            id,
            Money::from_minor(purchase),
            Money::from_minor(200),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count + 1).saturating_sub(self.next_id) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RequestGenerator {}

fn bench_dispense(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispense");

    for count in [1_000u32, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                // large enough stock that no request runs the machine dry
                let mut engine = Engine::new(Currency::BritishPound, 1_000_000);
                for request in RequestGenerator::new(count) {
                    let _ = black_box(engine.dispense(request.purchase, request.tender));
                }
                engine
            });
        });
    }

    group.finish();
}

fn bench_backoff(c: &mut Criterion) {
    let mut group = c.benchmark_group("backoff");

    // every request forces the greedy share of 5s down to an even remainder
    group.bench_function("non_canonical_10k", |b| {
        b.iter(|| {
            let catalog = Catalog::new([5, 2]).unwrap();
            let mut engine = Engine::with_catalog(catalog, 0);
            engine
                .restock(&[CoinStack::new(5, 10_000), CoinStack::new(2, 100_000)])
                .unwrap();
            for _ in 0..10_000 {
                let _ = black_box(engine.dispense(Money::ZERO, Money::from_minor(16)));
            }
            engine
        });
    });

    group.finish();
}

fn bench_depleting(c: &mut Criterion) {
    let mut group = c.benchmark_group("depleting");

    // default stock runs out quickly; measures the failure paths
    group.bench_function("default_stock_10k", |b| {
        b.iter(|| {
            let mut engine = Engine::default();
            for request in RequestGenerator::new(10_000) {
                let _ = black_box(engine.dispense(request.purchase, request.tender));
            }
            engine
        });
    });

    group.finish();
}

criterion_group!(benches, bench_dispense, bench_backoff, bench_depleting);

criterion_main!(benches);
