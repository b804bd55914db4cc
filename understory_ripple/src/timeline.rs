// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deterministic virtual clock that implements [`Animator`] and [`Scheduler`].
//!
//! ## Overview
//!
//! [`Timeline`] is a cheap, cloneable handle to shared virtual time. Give one clone to the
//! ripple as its animator and another as its scheduler, then drive time with
//! [`Timeline::advance`] and feed the returned tokens back into
//! [`Ripple::run_deferred_clear`](crate::ripple::Ripple::run_deferred_clear).
//!
//! Useful for headless hosts, replaying input traces, and tests. It is single-threaded
//! (`!Send`), like the event loop it stands in for.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Rect;
//! use understory_ripple::ripple::Ripple;
//! use understory_ripple::timeline::Timeline;
//! use understory_ripple::types::{FixedContainer, PressTrigger};
//!
//! let timeline = Timeline::new();
//! let container = FixedContainer::new(Rect::new(0.0, 0.0, 100.0, 50.0));
//! let mut ripple = Ripple::new(container, timeline.clone(), timeline.clone());
//!
//! ripple.begin_press(PressTrigger::Unpositioned);
//! timeline.advance(Duration::from_millis(100));
//! ripple.end_press();
//! assert!(ripple.flags().pressed());
//!
//! for token in timeline.advance(Duration::from_millis(125)) {
//!     ripple.run_deferred_clear(token);
//! }
//! assert!(!ripple.flags().pressed());
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::time::Duration;

use kurbo::Affine;

use crate::animation::{
    Animator, CancelHandle, ClearToken, GrowAnimation, GrowKeyframes, Scheduler,
};

#[derive(Debug, Default)]
struct State {
    now: Duration,
    next_task: u64,
    tasks: Vec<Task>,
    animations_started: usize,
}

#[derive(Copy, Clone, Debug)]
struct Task {
    id: u64,
    due: Duration,
    token: ClearToken,
}

/// Shared virtual time. Clones observe and drive the same clock.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    state: Rc<RefCell<State>>,
}

impl Timeline {
    /// A timeline at time zero with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of scheduled tasks that have not run or been canceled.
    pub fn pending_tasks(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    /// Number of animations started so far.
    pub fn animations_started(&self) -> usize {
        self.state.borrow().animations_started
    }

    /// Move time forward by `dt`, returning the tokens of tasks that came due, earliest first.
    ///
    /// Tasks due at the same instant keep their scheduling order.
    pub fn advance(&self, dt: Duration) -> Vec<ClearToken> {
        let mut state = self.state.borrow_mut();
        state.now += dt;
        let now = state.now;
        let mut due: Vec<Task> = Vec::new();
        state.tasks.retain(|t| {
            if t.due <= now {
                due.push(*t);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|t| (t.due, t.id));
        due.into_iter().map(|t| t.token).collect()
    }
}

/// A grow animation running on a [`Timeline`].
#[derive(Debug)]
pub struct TimelineAnimation {
    timeline: Timeline,
    start: Duration,
    keyframes: GrowKeyframes,
    canceled: bool,
}

impl TimelineAnimation {
    /// Keyframes this animation was started with.
    pub fn keyframes(&self) -> &GrowKeyframes {
        &self.keyframes
    }

    /// Returns `true` once canceled.
    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    /// Transform of the ripple square at the timeline's current time.
    ///
    /// `None` once canceled.
    pub fn current_transform(&self) -> Option<Affine> {
        self.keyframes.transform_at(self.elapsed()?)
    }
}

impl GrowAnimation for TimelineAnimation {
    fn elapsed(&self) -> Option<Duration> {
        if self.canceled {
            return None;
        }
        Some(self.timeline.now().saturating_sub(self.start))
    }

    fn cancel(&mut self) {
        self.canceled = true;
    }
}

impl Animator for Timeline {
    type Animation = TimelineAnimation;

    fn animate(&mut self, keyframes: &GrowKeyframes) -> TimelineAnimation {
        let start = {
            let mut state = self.state.borrow_mut();
            state.animations_started += 1;
            state.now
        };
        TimelineAnimation {
            timeline: self.clone(),
            start,
            keyframes: *keyframes,
            canceled: false,
        }
    }
}

/// A deferred clear scheduled on a [`Timeline`].
#[derive(Debug)]
pub struct TimelineTask {
    timeline: Timeline,
    id: u64,
}

impl CancelHandle for TimelineTask {
    fn cancel(&mut self) {
        self.timeline
            .state
            .borrow_mut()
            .tasks
            .retain(|t| t.id != self.id);
    }
}

impl Scheduler for Timeline {
    type Task = TimelineTask;

    fn schedule(&mut self, delay: Duration, token: ClearToken) -> TimelineTask {
        let mut state = self.state.borrow_mut();
        let id = state.next_task;
        state.next_task += 1;
        let due = state.now + delay;
        state.tasks.push(Task { id, due, token });
        TimelineTask {
            timeline: self.clone(),
            id,
        }
    }
}
