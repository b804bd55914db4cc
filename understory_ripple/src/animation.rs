// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grow animation lifecycle: one animation per press, with a minimum visible press duration.
//!
//! ## Overview
//!
//! [`AnimationController`] owns at most one in-flight grow animation and at most one pending
//! deferred clear. The host supplies the two platform primitives it needs:
//!
//! - an [`Animator`] that starts a grow animation from [`GrowKeyframes`] and returns a
//!   [`GrowAnimation`] handle (cancel, elapsed time);
//! - a [`Scheduler`] that runs a deferred clear after a delay and returns a [`CancelHandle`].
//!
//! ## Minimum press duration
//!
//! When a press ends before the animation has been visible for [`MINIMUM_PRESS`], the clear is
//! deferred for the remainder. A scheduled clear is identified by a [`ClearToken`]; when the
//! host's timer fires it hands the token back, and only the live token clears the press. A new
//! press cancels both the animation and the pending clear before starting over.

use core::time::Duration;

use kurbo::{Affine, Size};

use crate::easing::CubicBezier;
use crate::geometry::{RippleGeometry, transform_for};

/// Duration of the grow animation.
pub const PRESS_GROW: Duration = Duration::from_millis(450);
/// Shortest time a press stays visible after its animation starts.
pub const MINIMUM_PRESS: Duration = Duration::from_millis(225);

/// What an animation shows after it completes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Fill {
    /// Effect disappears when the animation completes.
    None,
    /// End state persists after completion.
    #[default]
    Forwards,
}

/// Timing parameters for an animation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationTiming {
    /// Total duration.
    pub duration: Duration,
    /// Timing curve.
    pub easing: CubicBezier,
    /// Post-completion behavior.
    pub fill: Fill,
}

impl AnimationTiming {
    /// Timing of the press grow animation.
    pub const PRESS_GROW: Self = Self {
        duration: PRESS_GROW,
        easing: CubicBezier::STANDARD,
        fill: Fill::Forwards,
    };
}

/// Everything a host needs to run one grow animation.
///
/// The ripple square has a fixed size for the whole animation (no size tween); only the
/// transform animates, from [`RippleGeometry::start_transform`] to
/// [`RippleGeometry::end_transform`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GrowKeyframes {
    /// Press geometry.
    pub geometry: RippleGeometry,
    /// Timing parameters.
    pub timing: AnimationTiming,
}

impl GrowKeyframes {
    /// Keyframes for `geometry` with the press grow timing.
    pub const fn new(geometry: RippleGeometry) -> Self {
        Self {
            geometry,
            timing: AnimationTiming::PRESS_GROW,
        }
    }

    /// Size of the ripple square.
    pub fn size(&self) -> Size {
        Size::new(self.geometry.initial_size, self.geometry.initial_size)
    }

    /// Eased progress at `elapsed`, or `None` when the animation has no effect.
    pub fn progress_at(&self, elapsed: Duration) -> Option<f64> {
        let AnimationTiming {
            duration,
            easing,
            fill,
        } = self.timing;
        if elapsed >= duration {
            return match fill {
                Fill::Forwards => Some(1.0),
                Fill::None => None,
            };
        }
        Some(easing.ease(elapsed.as_secs_f64() / duration.as_secs_f64()))
    }

    /// Transform of the ripple square at `elapsed`, for hosts that animate themselves.
    pub fn transform_at(&self, elapsed: Duration) -> Option<Affine> {
        let t = self.progress_at(elapsed)?;
        let g = &self.geometry;
        let origin = g.start_point.lerp(g.end_point, t);
        let scale = 1.0 + (g.scale - 1.0) * t;
        Some(transform_for(origin, scale, g.initial_size))
    }
}

/// Handle to a running grow animation.
pub trait GrowAnimation {
    /// Time since the animation started, or `None` once it is no longer active.
    fn elapsed(&self) -> Option<Duration>;
    /// Stop the animation and remove its effect.
    fn cancel(&mut self);
}

/// Starts grow animations on the host's ripple surface.
pub trait Animator {
    /// Handle type for a started animation.
    type Animation: GrowAnimation;
    /// Start animating `keyframes` now.
    fn animate(&mut self, keyframes: &GrowKeyframes) -> Self::Animation;
}

/// Handle to a scheduled task that may be canceled before it runs.
pub trait CancelHandle {
    /// Prevent the task from running. Canceling a task that already ran is a no-op.
    fn cancel(&mut self);
}

/// Runs deferred clears on the host's event loop.
///
/// When the delay has elapsed the host must pass `token` to
/// [`Ripple::run_deferred_clear`](crate::ripple::Ripple::run_deferred_clear)
/// (or [`AnimationController::fire`]).
pub trait Scheduler {
    /// Handle type for a scheduled task.
    type Task: CancelHandle;
    /// Schedule a clear identified by `token` after `delay`.
    fn schedule(&mut self, delay: Duration, token: ClearToken) -> Self::Task;
}

/// Identity of one scheduled deferred clear.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ClearToken(u64);

impl ClearToken {
    /// Raw token value.
    pub const fn get(self) -> u64 {
        self.0
    }

    #[cfg(test)]
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Result of [`AnimationController::end_press`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EndPress {
    /// The minimum duration has passed; clear the press now.
    Immediate,
    /// A clear was scheduled.
    Deferred {
        /// Token the scheduled task will deliver.
        token: ClearToken,
        /// Remaining time until the minimum duration is reached.
        delay: Duration,
    },
}

#[derive(Debug)]
struct PendingClear<T> {
    token: ClearToken,
    task: T,
}

/// Owns the grow animation and the deferred clear of one ripple.
pub struct AnimationController<A: Animator, S: Scheduler> {
    animator: A,
    scheduler: S,
    animation: Option<A::Animation>,
    pending: Option<PendingClear<S::Task>>,
    next_token: u64,
}

impl<A: Animator, S: Scheduler> core::fmt::Debug for AnimationController<A, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnimationController")
            .field("animating", &self.animation.is_some())
            .field("pending_clear", &self.pending_clear())
            .finish_non_exhaustive()
    }
}

impl<A: Animator, S: Scheduler> AnimationController<A, S> {
    /// Create a controller with no animation and nothing pending.
    pub fn new(animator: A, scheduler: S) -> Self {
        Self {
            animator,
            scheduler,
            animation: None,
            pending: None,
            next_token: 0,
        }
    }

    /// Start a grow animation for `geometry`.
    ///
    /// Cancels the previous animation and any pending clear first; presses never overlap.
    pub fn begin_press(&mut self, geometry: RippleGeometry) {
        self.cancel_pending_clear();
        if let Some(mut previous) = self.animation.take() {
            previous.cancel();
        }
        let keyframes = GrowKeyframes::new(geometry);
        self.animation = Some(self.animator.animate(&keyframes));
    }

    /// Decide how the current press ends.
    ///
    /// With no active animation the elapsed time counts as infinite and the press clears
    /// immediately. Otherwise a clear is scheduled for the rest of [`MINIMUM_PRESS`].
    pub fn end_press(&mut self) -> EndPress {
        let elapsed = self.elapsed();
        self.cancel_pending_clear();
        match elapsed {
            Some(elapsed) if elapsed < MINIMUM_PRESS => {
                let delay = MINIMUM_PRESS - elapsed;
                let token = ClearToken(self.next_token);
                self.next_token += 1;
                let task = self.scheduler.schedule(delay, token);
                self.pending = Some(PendingClear { token, task });
                EndPress::Deferred { token, delay }
            }
            _ => EndPress::Immediate,
        }
    }

    /// Consume the pending clear if `token` identifies it.
    ///
    /// Returns `false` for stale or canceled tokens.
    pub fn fire(&mut self, token: ClearToken) -> bool {
        match &self.pending {
            Some(p) if p.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Cancel the pending clear, returning `true` if one existed.
    pub fn cancel_pending_clear(&mut self) -> bool {
        match self.pending.take() {
            Some(mut p) => {
                p.task.cancel();
                true
            }
            None => false,
        }
    }

    /// Token of the pending clear, if any.
    pub fn pending_clear(&self) -> Option<ClearToken> {
        self.pending.as_ref().map(|p| p.token)
    }

    /// Elapsed time of the current animation; `None` means no minimum applies.
    pub fn elapsed(&self) -> Option<Duration> {
        self.animation.as_ref().and_then(GrowAnimation::elapsed)
    }

    /// The current animation handle.
    pub fn animation(&self) -> Option<&A::Animation> {
        self.animation.as_ref()
    }

    /// The host animator.
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// The host scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
