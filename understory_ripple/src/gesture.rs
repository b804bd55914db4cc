// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side press gesture: telling touch presses apart from scrolls.
//!
//! ## Overview
//!
//! A touch that lands on a scrollable surface may turn into a scroll, so its press is held
//! back for [`TOUCH_DELAY`] before the ripple shows. Mouse and pen presses show at once.
//! [`PressGesture`] tracks that decision as an [`InteractionState`] and returns a
//! [`PressAction`] for the owning control to apply (usually via
//! [`Ripple::apply`](crate::ripple::Ripple::apply)).
//!
//! The gesture never reads a clock. When it enters [`InteractionState::TouchDelay`] the host
//! arms its own timer and calls [`PressGesture::on_touch_delay_elapsed`] when it expires.
//!
//! ## States
//!
//! - Touch: `Inactive → TouchDelay → Holding → WaitingForClick → Inactive`, or
//!   `Inactive → TouchDelay → WaitingForClick → Inactive` for a quick tap.
//! - Mouse or pen: `Inactive → WaitingForClick → Inactive`.
//! - Cancel or leave returns to `Inactive` from anywhere, ending the press if one showed.
//!
//! Events that do not apply in the current state are ignored.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_ripple::gesture::{InteractionState, PressAction, PressGesture};
//! use understory_ripple::types::{PointerEvent, PointerKind, PointerPhase, PressTrigger};
//!
//! let mut g = PressGesture::new();
//! let down = PointerEvent::new(PointerKind::Touch, PointerPhase::Down).at(Point::new(4.0, 4.0));
//! assert_eq!(g.on_pointer_down(&down), PressAction::None);
//! assert_eq!(g.state(), InteractionState::TouchDelay);
//!
//! // The host's touch-delay timer expired without a scroll.
//! assert_eq!(
//!     g.on_touch_delay_elapsed(),
//!     PressAction::BeginPress(PressTrigger::Positioned(Point::new(4.0, 4.0)))
//! );
//! assert_eq!(g.state(), InteractionState::Holding);
//! ```

use core::time::Duration;

use crate::types::{PointerEvent, PressTrigger};

/// How long a touch must rest before it counts as a press.
pub const TOUCH_DELAY: Duration = Duration::from_millis(150);

/// Interaction states of a press gesture.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum InteractionState {
    /// No press in progress.
    #[default]
    Inactive,
    /// Touch down received; waiting to see whether it becomes a scroll.
    TouchDelay,
    /// Touch has been deemed a press and is still down.
    Holding,
    /// Pointer released (or mouse pressed); waiting for the click that ends the press.
    WaitingForClick,
}

/// What the host should do to the ripple after a gesture event.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum PressAction {
    /// Nothing.
    #[default]
    None,
    /// Call [`Ripple::begin_press`](crate::ripple::Ripple::begin_press) with the trigger.
    BeginPress(PressTrigger),
    /// Call [`Ripple::end_press`](crate::ripple::Ripple::end_press).
    EndPress,
    /// Begin an unpositioned press and end it right away (keyboard or programmatic click).
    Flash,
}

/// Touch-aware press state machine owned by the host control.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PressGesture {
    state: InteractionState,
    trigger: PressTrigger,
}

impl PressGesture {
    /// Create an inactive gesture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Returns `true` while the ripple should be showing a press.
    pub fn is_pressing(&self) -> bool {
        matches!(
            self.state,
            InteractionState::Holding | InteractionState::WaitingForClick
        )
    }

    /// Primary pointer went down on the host.
    ///
    /// Touch waits in [`InteractionState::TouchDelay`]; the host should now arm a
    /// [`TOUCH_DELAY`] timer. Mouse and pen begin the press immediately.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> PressAction {
        if !event.is_primary || self.state != InteractionState::Inactive {
            return PressAction::None;
        }
        let trigger = PressTrigger::from(event);
        if event.is_touch() {
            self.state = InteractionState::TouchDelay;
            self.trigger = trigger;
            PressAction::None
        } else {
            self.state = InteractionState::WaitingForClick;
            PressAction::BeginPress(trigger)
        }
    }

    /// The host's touch-delay timer expired.
    pub fn on_touch_delay_elapsed(&mut self) -> PressAction {
        if self.state != InteractionState::TouchDelay {
            return PressAction::None;
        }
        self.state = InteractionState::Holding;
        PressAction::BeginPress(self.trigger)
    }

    /// Primary pointer went up.
    ///
    /// A tap released before the touch delay still shows its press.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> PressAction {
        if !event.is_primary {
            return PressAction::None;
        }
        match self.state {
            InteractionState::Holding => {
                self.state = InteractionState::WaitingForClick;
                PressAction::None
            }
            InteractionState::TouchDelay => {
                self.state = InteractionState::WaitingForClick;
                PressAction::BeginPress(self.trigger)
            }
            InteractionState::Inactive | InteractionState::WaitingForClick => PressAction::None,
        }
    }

    /// The host control received a click.
    ///
    /// Ends a pointer press, or flashes the ripple for a click without a pointer press.
    pub fn on_click(&mut self) -> PressAction {
        match self.state {
            InteractionState::WaitingForClick => {
                self.reset();
                PressAction::EndPress
            }
            InteractionState::Inactive => PressAction::Flash,
            InteractionState::TouchDelay | InteractionState::Holding => PressAction::None,
        }
    }

    /// The pointer was taken away (scroll started, capture lost).
    pub fn on_pointer_cancel(&mut self, event: &PointerEvent) -> PressAction {
        if !event.is_primary {
            return PressAction::None;
        }
        let was_pressing = self.is_pressing();
        self.reset();
        if was_pressing {
            PressAction::EndPress
        } else {
            PressAction::None
        }
    }

    /// Primary pointer left the host.
    ///
    /// A press released outside the host never gets its click, so leaving ends it here.
    pub fn on_pointer_leave(&mut self, event: &PointerEvent) -> PressAction {
        if !event.is_primary || self.state == InteractionState::Inactive {
            return PressAction::None;
        }
        let was_pressing = self.is_pressing();
        self.reset();
        if was_pressing {
            PressAction::EndPress
        } else {
            PressAction::None
        }
    }

    fn reset(&mut self) {
        self.state = InteractionState::Inactive;
        self.trigger = PressTrigger::Unpositioned;
    }
}
