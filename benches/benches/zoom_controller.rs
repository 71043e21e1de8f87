// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use understory_zoom::{AnimationStatus, ZoomController};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_unit(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        f64::from((self.0 >> 32) as u32) / f64::from(u32::MAX)
    }
}

fn controller() -> ZoomController {
    let mut zc = ZoomController::new(Size::new(1080.0, 1920.0));
    zc.set_image_size(Some(Size::new(1080.0, 1440.0)));
    zc
}

fn bench_pinch_steps(c: &mut Criterion) {
    let mut rng = Lcg::new(7);
    let steps: Vec<(f64, Point)> = (0..1_024)
        .map(|_| {
            let factor = 0.95 + rng.next_unit() * 0.1;
            let focal = Point::new(rng.next_unit() * 1080.0, rng.next_unit() * 1920.0);
            (factor, focal)
        })
        .collect();

    c.bench_function("zoom/pinch_1024_steps", |b| {
        b.iter_batched(
            controller,
            |mut zc| {
                for &(factor, focal) in &steps {
                    zc.on_scale_gesture(factor, focal);
                }
                black_box(zc.transform());
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_pan_steps(c: &mut Criterion) {
    let mut rng = Lcg::new(11);
    let deltas: Vec<Vec2> = (0..1_024)
        .map(|_| Vec2::new(rng.next_unit() * 40.0 - 20.0, rng.next_unit() * 40.0 - 20.0))
        .collect();

    c.bench_function("zoom/pan_1024_steps", |b| {
        b.iter_batched(
            || {
                let mut zc = controller();
                zc.on_scale_gesture(4.0, Point::new(540.0, 960.0));
                zc
            },
            |mut zc| {
                for &delta in &deltas {
                    zc.on_pan_gesture(delta);
                }
                black_box(zc.focus());
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_double_tap_animation(c: &mut Criterion) {
    c.bench_function("zoom/double_tap_60_frames", |b| {
        b.iter_batched(
            controller,
            |mut zc| {
                let Some(handle) = zc.on_double_tap(Point::new(300.0, 700.0)) else {
                    return;
                };
                let mut frame = 0_u32;
                while zc.tick(handle, f64::from(frame) / 60.0) == AnimationStatus::Running {
                    frame += 1;
                }
                black_box(zc.transform());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_pinch_steps,
    bench_pan_steps,
    bench_double_tap_animation
);
criterion_main!(benches);
