// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use understory_ripple::animation::{GrowKeyframes, PRESS_GROW};
use understory_ripple::geometry::RippleGeometry;
use understory_ripple::ripple::Ripple;
use understory_ripple::timeline::Timeline;
use understory_ripple::types::{FixedContainer, PressTrigger};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_presses(count: usize) -> Vec<(Size, Point)> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let size = Size::new(24.0 + rng.next_f64() * 600.0, 24.0 + rng.next_f64() * 200.0);
            let at = Point::new(rng.next_f64() * size.width, rng.next_f64() * size.height);
            (size, at)
        })
        .collect()
}

fn bench_geometry(c: &mut Criterion) {
    let presses = gen_presses(1024);
    let mut group = c.benchmark_group("geometry");
    group.bench_function("compute_1k", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &(size, at) in &presses {
                let g = RippleGeometry::compute(size, Some(at), false);
                acc += g.scale;
            }
            black_box(acc)
        });
    });
    group.bench_function("compute_unbounded_1k", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &(size, _) in &presses {
                acc += RippleGeometry::compute(size, None, true).initial_size;
            }
            black_box(acc)
        });
    });
    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let g = RippleGeometry::compute(Size::new(320.0, 48.0), Some(Point::new(12.0, 30.0)), false);
    let keyframes = GrowKeyframes::new(g);
    let frame = Duration::from_micros(16_667);
    c.bench_function("grow_transform_frames", |b| {
        b.iter(|| {
            let mut t = Duration::ZERO;
            let mut n = 0;
            while t <= PRESS_GROW {
                if let Some(a) = keyframes.transform_at(black_box(t)) {
                    n += usize::from(a.translation().x > 0.0);
                }
                t += frame;
            }
            black_box(n)
        });
    });
}

fn bench_press_cycle(c: &mut Criterion) {
    let timeline = Timeline::new();
    let container = FixedContainer::new(Rect::new(0.0, 0.0, 120.0, 40.0));
    let mut ripple = Ripple::new(container, timeline.clone(), timeline.clone());
    c.bench_function("press_release_cycle", |b| {
        b.iter(|| {
            ripple.begin_press(PressTrigger::Positioned(Point::new(30.0, 20.0)));
            timeline.advance(Duration::from_millis(50));
            ripple.end_press();
            for token in timeline.advance(Duration::from_millis(200)) {
                ripple.run_deferred_clear(token);
            }
            black_box(ripple.flags())
        });
    });
}

criterion_group!(benches, bench_geometry, bench_sampling, bench_press_cycle);
criterion_main!(benches);
