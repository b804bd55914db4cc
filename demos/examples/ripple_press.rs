// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse press with a minimum visible duration.
//!
//! This example clicks a button quickly (release after 60 ms) and then slowly (release after
//! 400 ms), printing the flag snapshots the visual tree would receive. The quick click keeps
//! the `pressed` class until 225 ms; the slow one drops it on release.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_examples --example ripple_press`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Rect};
use understory_ripple::gesture::PressGesture;
use understory_ripple::ripple::Ripple;
use understory_ripple::timeline::Timeline;
use understory_ripple::types::{
    FixedContainer, FlagsObserver, PointerEvent, PointerKind, PointerPhase, RippleConfig,
    VisualFlags,
};

/// Step the timeline in 1 ms frames, delivering deferred clears as they come due.
fn run_for<O: FlagsObserver>(
    timeline: &Timeline,
    ripple: &mut Ripple<FixedContainer, Timeline, Timeline, O>,
    duration: Duration,
) {
    for _ in 0..duration.as_millis() {
        for token in timeline.advance(Duration::from_millis(1)) {
            ripple.run_deferred_clear(token);
        }
    }
}

fn main() {
    env_logger::init();

    let timeline = Timeline::new();
    let log: Rc<RefCell<Vec<(Duration, VisualFlags)>>> = Rc::default();
    let observer = {
        let log = log.clone();
        let timeline = timeline.clone();
        move |flags: VisualFlags| log.borrow_mut().push((timeline.now(), flags))
    };

    // A 120x40 button at (40, 300) on a page scrolled down by 200 px.
    let container = FixedContainer::new(Rect::new(40.0, 300.0, 160.0, 340.0))
        .with_scroll(kurbo::Vec2::new(0.0, 200.0));
    let mut ripple = Ripple::with_observer(
        container,
        timeline.clone(),
        timeline.clone(),
        RippleConfig::default(),
        observer,
    );
    let mut gesture = PressGesture::new();

    let at = Point::new(70.0, 520.0);
    let mouse = |phase| PointerEvent::new(PointerKind::Mouse, phase).at(at);

    ripple.handle_pointer(&mouse(PointerPhase::Enter));

    let mut click = |hold: Duration| {
        ripple.apply(gesture.on_pointer_down(&mouse(PointerPhase::Down)));
        let geometry = ripple
            .controller()
            .animation()
            .map(|a| a.keyframes().geometry);
        println!("== Press at {:?} ==\n  {:?}", timeline.now(), geometry);
        run_for(&timeline, &mut ripple, hold);
        ripple.apply(gesture.on_pointer_up(&mouse(PointerPhase::Up)));
        ripple.apply(gesture.on_click());
        run_for(&timeline, &mut ripple, Duration::from_millis(500));
    };

    click(Duration::from_millis(60));
    click(Duration::from_millis(400));

    println!("== Flag changes ==");
    for (at, flags) in log.borrow().iter() {
        let classes: Vec<_> = flags.class_names().collect();
        println!("  {:>6} ms  {}", at.as_millis(), classes.join(" "));
    }

    let log = log.borrow();
    let pressed: Vec<_> = log
        .iter()
        .map(|(t, f)| (t.as_millis(), f.pressed()))
        .collect();
    assert_eq!(
        pressed,
        vec![(0, false), (0, true), (225, false), (560, true), (960, false)]
    );
}
