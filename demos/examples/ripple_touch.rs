// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch presses: hold, quick tap, and scroll.
//!
//! A touch is held back for the touch delay before the ripple shows, so a finger that starts
//! scrolling never flashes a press. This example runs the three cases through a
//! `PressGesture` and prints the interaction state after each event.
//!
//! Run:
//! - `cargo run -p understory_examples --example ripple_touch`

use std::time::Duration;

use kurbo::{Point, Rect};
use understory_ripple::gesture::{InteractionState, PressGesture, TOUCH_DELAY};
use understory_ripple::ripple::Ripple;
use understory_ripple::timeline::Timeline;
use understory_ripple::types::{FixedContainer, PointerEvent, PointerKind, PointerPhase};

type DemoRipple = Ripple<FixedContainer, Timeline, Timeline>;

fn touch(phase: PointerPhase) -> PointerEvent {
    PointerEvent::new(PointerKind::Touch, phase).at(Point::new(24.0, 24.0))
}

fn wait(timeline: &Timeline, ripple: &mut DemoRipple, duration: Duration) {
    for token in timeline.advance(duration) {
        ripple.run_deferred_clear(token);
    }
}

fn report(label: &str, gesture: &PressGesture, ripple: &DemoRipple) {
    println!(
        "  {label:<18} state={:?} pressed={}",
        gesture.state(),
        ripple.flags().pressed()
    );
}

fn main() {
    env_logger::init();

    let timeline = Timeline::new();
    let container = FixedContainer::new(Rect::new(0.0, 0.0, 48.0, 48.0));
    let mut ripple = Ripple::new(container, timeline.clone(), timeline.clone());
    ripple.set_unbounded(true);
    let mut gesture = PressGesture::new();

    // Touch never hovers.
    ripple.handle_pointer(&touch(PointerPhase::Enter));
    assert!(!ripple.flags().hovered());

    println!("== Hold ==");
    ripple.apply(gesture.on_pointer_down(&touch(PointerPhase::Down)));
    report("down", &gesture, &ripple);
    wait(&timeline, &mut ripple, TOUCH_DELAY);
    ripple.apply(gesture.on_touch_delay_elapsed());
    report("delay elapsed", &gesture, &ripple);
    assert_eq!(gesture.state(), InteractionState::Holding);
    wait(&timeline, &mut ripple, Duration::from_millis(300));
    ripple.apply(gesture.on_pointer_up(&touch(PointerPhase::Up)));
    ripple.apply(gesture.on_click());
    report("up + click", &gesture, &ripple);
    assert!(!ripple.flags().pressed());

    println!("== Quick tap ==");
    ripple.apply(gesture.on_pointer_down(&touch(PointerPhase::Down)));
    wait(&timeline, &mut ripple, Duration::from_millis(40));
    ripple.apply(gesture.on_pointer_up(&touch(PointerPhase::Up)));
    report("up before delay", &gesture, &ripple);
    ripple.apply(gesture.on_click());
    report("click", &gesture, &ripple);
    assert!(ripple.flags().pressed(), "held for the minimum duration");
    wait(&timeline, &mut ripple, Duration::from_millis(225));
    report("after minimum", &gesture, &ripple);
    assert!(!ripple.flags().pressed());

    println!("== Scroll ==");
    ripple.apply(gesture.on_pointer_down(&touch(PointerPhase::Down)));
    wait(&timeline, &mut ripple, Duration::from_millis(60));
    ripple.apply(gesture.on_pointer_cancel(&touch(PointerPhase::Cancel)));
    report("cancel", &gesture, &ripple);
    // The stale delay timer fires later and is ignored.
    wait(&timeline, &mut ripple, TOUCH_DELAY);
    ripple.apply(gesture.on_touch_delay_elapsed());
    report("late timer", &gesture, &ripple);
    assert!(!ripple.flags().pressed());

    println!("== Unbounded geometry ==");
    let geometry = ripple
        .controller()
        .animation()
        .map(|a| a.keyframes().geometry);
    println!("  {geometry:?}");
    assert!(geometry.is_some_and(|g| g.initial_size % 2.0 == 0.0));
    assert_eq!(timeline.animations_started(), 2);
}
