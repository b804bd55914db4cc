// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_ripple --heading-base-level=0

//! Understory Ripple: a deterministic, `no_std` press ripple state machine for UI.
//!
//! ## Overview
//!
//! A ripple is the short-lived expanding circle a control shows when it is pressed. This crate
//! holds the parts of a ripple that are easy to get wrong: telling touch presses apart from
//! scrolls, sizing the ripple so its soft edge covers the container, and keeping a press
//! visible for a minimum time even when the pointer is released right away.
//!
//! It does not render. The host supplies a container lookup, an animation primitive and a
//! task scheduler through traits, and receives a [`VisualFlags`](crate::types::VisualFlags)
//! snapshot whenever the render state changes.
//!
//! ## Pieces
//!
//! - [`geometry`]: pure sizing math. [`RippleGeometry`](crate::geometry::RippleGeometry) gives
//!   the initial size, target scale, and start/end translation for one press.
//! - [`animation`]: [`AnimationController`](crate::animation::AnimationController) owns the one
//!   grow animation and enforces [`MINIMUM_PRESS`](crate::animation::MINIMUM_PRESS).
//! - [`ripple`]: [`Ripple`](crate::ripple::Ripple) tracks hover and focus, exposes
//!   `begin_press`/`end_press`, and publishes flag changes.
//! - [`gesture`]: [`PressGesture`](crate::gesture::PressGesture), the host-side touch delay
//!   state machine that decides when to begin and end presses.
//! - [`easing`]: the cubic Bézier curve used by the grow animation.
//! - [`timeline`]: a virtual clock implementing the host primitives, for headless use and tests.
//!
//! ## Workflow
//!
//! 1) Implement [`ContainerLookup`](crate::types::ContainerLookup) for your layout (or use
//!    [`FixedContainer`](crate::types::FixedContainer)), and
//!    [`Animator`](crate::animation::Animator) / [`Scheduler`](crate::animation::Scheduler) for
//!    your compositor and event loop.
//! 2) Forward pointer enter/leave and focus changes to the [`Ripple`](crate::ripple::Ripple).
//! 3) Feed pointer down/up/leave/cancel and clicks into a
//!    [`PressGesture`](crate::gesture::PressGesture) and apply the returned actions.
//! 4) When a scheduled clear fires, hand its token to
//!    [`Ripple::run_deferred_clear`](crate::ripple::Ripple::run_deferred_clear).
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use understory_ripple::gesture::PressGesture;
//! use understory_ripple::ripple::Ripple;
//! use understory_ripple::timeline::Timeline;
//! use understory_ripple::types::{FixedContainer, PointerEvent, PointerKind, PointerPhase, VisualFlags};
//!
//! let timeline = Timeline::new();
//! let container = FixedContainer::new(Rect::new(0.0, 0.0, 100.0, 50.0));
//! let mut ripple = Ripple::new(container, timeline.clone(), timeline.clone());
//! let mut gesture = PressGesture::new();
//!
//! let at = Point::new(30.0, 20.0);
//! ripple.handle_pointer(&PointerEvent::new(PointerKind::Mouse, PointerPhase::Enter));
//! ripple.apply(gesture.on_pointer_down(&PointerEvent::new(PointerKind::Mouse, PointerPhase::Down).at(at)));
//! assert_eq!(ripple.flags(), VisualFlags::HOVERED | VisualFlags::PRESSED);
//!
//! // A quick click: the press stays visible for the minimum duration.
//! timeline.advance(Duration::from_millis(40));
//! ripple.apply(gesture.on_pointer_up(&PointerEvent::new(PointerKind::Mouse, PointerPhase::Up).at(at)));
//! ripple.apply(gesture.on_click());
//! assert!(ripple.flags().pressed());
//!
//! for token in timeline.advance(Duration::from_millis(185)) {
//!     ripple.run_deferred_clear(token);
//! }
//! assert_eq!(ripple.flags(), VisualFlags::HOVERED);
//! ```
//!
//! ## Features
//!
//! - `std` (default): build Kurbo with `std`.
//! - `libm`: build Kurbo with `libm` for `no_std` targets.
//!
//! Diagnostics go through the [`log`] facade; the crate never installs a logger.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod animation;
pub mod easing;
pub mod geometry;
pub mod gesture;
pub mod ripple;
pub mod timeline;
pub mod types;
