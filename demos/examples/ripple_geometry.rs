// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ripple geometry for a few container shapes.
//!
//! Prints the initial size, target scale, and start/end footprints for bounded and unbounded
//! ripples, then samples the grow animation's transform over time.
//!
//! Run:
//! - `cargo run -p understory_examples --example ripple_geometry`

use std::time::Duration;

use kurbo::{Point, Size};
use understory_ripple::animation::{GrowKeyframes, PRESS_GROW};
use understory_ripple::geometry::RippleGeometry;

fn main() {
    println!("== Sizes ==");
    for (w, h) in [(100.0, 50.0), (41.0, 41.0), (360.0, 56.0), (24.0, 24.0)] {
        for unbounded in [false, true] {
            let g = RippleGeometry::compute(Size::new(w, h), None, unbounded);
            println!(
                "  {w:>5}x{h:<5} unbounded={unbounded:<5} size={:<4} scale={:.4} end={:?}",
                g.initial_size,
                g.scale,
                g.end_circle()
            );
            assert!(g.scale >= 1.0);
            if unbounded {
                assert_eq!(g.initial_size % 2.0, 0.0);
            }
        }
    }

    println!("== Grow from a corner ==");
    let g = RippleGeometry::compute(Size::new(100.0, 50.0), Some(Point::new(5.0, 5.0)), false);
    let keyframes = GrowKeyframes::new(g);
    let step = PRESS_GROW / 6;
    for i in 0..=6 {
        let t = step * i;
        if let Some(transform) = keyframes.transform_at(t) {
            let center = transform * Point::new(g.initial_size / 2.0, g.initial_size / 2.0);
            println!("  {:>4} ms  center=({:.1}, {:.1})", t.as_millis(), center.x, center.y);
        }
    }
    let settled = keyframes
        .transform_at(PRESS_GROW + Duration::from_millis(100))
        .map(|a| a * Point::new(10.0, 10.0));
    assert_eq!(settled, Some(Point::new(50.0, 25.0)));
}
