// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ripple: hover and focus tracking, press entry points, and flag publication.
//!
//! ## Usage
//!
//! 1) Build a [`Ripple`] from a [`ContainerLookup`], an [`Animator`] and a [`Scheduler`].
//!    Optionally attach a [`FlagsObserver`] with [`Ripple::with_observer`].
//! 2) Forward pointer enter/leave and focus in/out to the matching handlers.
//! 3) Call [`Ripple::begin_press`] and [`Ripple::end_press`] when the owning control decides a
//!    press starts and ends (see [`gesture`](crate::gesture) for a touch-aware helper).
//! 4) When a scheduled clear fires, pass its token to [`Ripple::run_deferred_clear`].
//!
//! Every change to the render state is published synchronously as a [`VisualFlags`] snapshot.

use log::{debug, trace};

use crate::animation::{AnimationController, Animator, ClearToken, EndPress, Scheduler};
use crate::gesture::PressAction;
use crate::geometry::RippleGeometry;
use crate::types::{
    ContainerLookup, FlagsObserver, NoObserver, PointerEvent, PointerPhase, PressTrigger,
    RippleConfig, VisualFlags,
};

/// Press ripple state for one host element.
///
/// Owns exactly one [`AnimationController`], so at most one press is live at a time.
pub struct Ripple<C, A, S, O = NoObserver>
where
    C: ContainerLookup,
    A: Animator,
    S: Scheduler,
    O: FlagsObserver,
{
    container: C,
    controller: AnimationController<A, S>,
    observer: O,
    flags: VisualFlags,
    disabled: bool,
}

impl<C, A, S, O> core::fmt::Debug for Ripple<C, A, S, O>
where
    C: ContainerLookup,
    A: Animator,
    S: Scheduler,
    O: FlagsObserver,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ripple")
            .field("flags", &self.flags)
            .field("disabled", &self.disabled)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl<C, A, S> Ripple<C, A, S>
where
    C: ContainerLookup,
    A: Animator,
    S: Scheduler,
{
    /// Create an enabled, bounded ripple without an observer.
    pub fn new(container: C, animator: A, scheduler: S) -> Self {
        Self::with_config(container, animator, scheduler, RippleConfig::default())
    }

    /// Create a ripple with explicit configuration and no observer.
    pub fn with_config(container: C, animator: A, scheduler: S, config: RippleConfig) -> Self {
        Self::with_observer(container, animator, scheduler, config, NoObserver)
    }
}

impl<C, A, S, O> Ripple<C, A, S, O>
where
    C: ContainerLookup,
    A: Animator,
    S: Scheduler,
    O: FlagsObserver,
{
    /// Create a ripple that reports flag changes to `observer`.
    ///
    /// The observer is not called for the initial state.
    pub fn with_observer(
        container: C,
        animator: A,
        scheduler: S,
        config: RippleConfig,
        observer: O,
    ) -> Self {
        let mut flags = VisualFlags::empty();
        flags.set(VisualFlags::UNBOUNDED, config.unbounded);
        Self {
            container,
            controller: AnimationController::new(animator, scheduler),
            observer,
            flags,
            disabled: config.disabled,
        }
    }

    /// Current render snapshot.
    pub fn flags(&self) -> VisualFlags {
        self.flags
    }

    /// Current configuration.
    pub fn config(&self) -> RippleConfig {
        RippleConfig {
            unbounded: self.flags.unbounded(),
            disabled: self.disabled,
        }
    }

    /// Returns `true` if the ripple is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The container lookup.
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Mutable access to the container lookup, for hosts that push layout into it.
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// The animation controller.
    pub fn controller(&self) -> &AnimationController<A, S> {
        &self.controller
    }

    /// The flag observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Pointer entered the host.
    ///
    /// Touch pointers, non-primary pointers and a disabled ripple do not hover.
    pub fn on_pointer_enter(&mut self, event: &PointerEvent) {
        if event.is_touch() || !event.is_primary || self.disabled {
            trace!("ripple: ignoring pointer enter {:?}", event.kind);
            return;
        }
        self.set_flag(VisualFlags::HOVERED, true);
    }

    /// Pointer left the host. Non-primary pointers are ignored.
    pub fn on_pointer_leave(&mut self, event: &PointerEvent) {
        if !event.is_primary {
            return;
        }
        self.set_flag(VisualFlags::HOVERED, false);
    }

    /// Route a pointer event by phase.
    ///
    /// Only enter and leave affect the ripple directly; down, up and cancel are resolved into
    /// presses by the owning control.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match event.phase {
            PointerPhase::Enter => self.on_pointer_enter(event),
            PointerPhase::Leave => self.on_pointer_leave(event),
            PointerPhase::Down | PointerPhase::Up | PointerPhase::Cancel => {}
        }
    }

    /// The host gained keyboard focus.
    pub fn on_focus_in(&mut self) {
        self.set_flag(VisualFlags::FOCUSED, true);
    }

    /// The host lost keyboard focus.
    pub fn on_focus_out(&mut self) {
        self.set_flag(VisualFlags::FOCUSED, false);
    }

    /// Start a press and its grow animation.
    ///
    /// Any earlier animation and any pending clear are canceled first. Positioned triggers
    /// grow from the pointer; unpositioned ones from the container center. Returns the
    /// geometry used for the animation.
    pub fn begin_press(&mut self, trigger: impl Into<PressTrigger>) -> RippleGeometry {
        let trigger = trigger.into();
        self.set_flag(VisualFlags::PRESSED, true);
        let geometry = RippleGeometry::for_container(
            self.container.container_rect(),
            self.container.scroll_offset(),
            trigger,
            self.flags.unbounded(),
        );
        if geometry.is_degenerate() {
            debug!("ripple: degenerate geometry {geometry:?}; animation will not render");
        }
        debug!("ripple: press began ({trigger:?})");
        self.controller.begin_press(geometry);
        geometry
    }

    /// End the current press, honoring the minimum press duration.
    pub fn end_press(&mut self) -> EndPress {
        let outcome = self.controller.end_press();
        match outcome {
            EndPress::Immediate => {
                debug!("ripple: press ended");
                self.set_flag(VisualFlags::PRESSED, false);
            }
            EndPress::Deferred { token, delay } => {
                debug!("ripple: press end deferred by {delay:?} ({token:?})");
            }
        }
        outcome
    }

    /// A scheduled clear fired.
    ///
    /// Clears the press and returns `true` only if `token` is the live pending clear.
    pub fn run_deferred_clear(&mut self, token: ClearToken) -> bool {
        if !self.controller.fire(token) {
            trace!("ripple: ignoring stale clear {token:?}");
            return false;
        }
        debug!("ripple: deferred press end");
        self.set_flag(VisualFlags::PRESSED, false);
        true
    }

    /// Update the disabled configuration.
    ///
    /// Becoming disabled drops hover and focus at once and ends the press through the usual
    /// minimum-duration rule, so `pressed` may outlive the switch by up to
    /// [`MINIMUM_PRESS`](crate::animation::MINIMUM_PRESS).
    pub fn set_disabled(&mut self, disabled: bool) {
        let changed = self.disabled != disabled;
        self.disabled = disabled;
        if changed && disabled {
            debug!("ripple: disabled");
            self.set_flag(VisualFlags::HOVERED, false);
            self.set_flag(VisualFlags::FOCUSED, false);
            self.end_press();
        }
    }

    /// Update the unbounded configuration. Applies from the next press.
    pub fn set_unbounded(&mut self, unbounded: bool) {
        self.set_flag(VisualFlags::UNBOUNDED, unbounded);
    }

    /// Execute an action produced by a [`PressGesture`](crate::gesture::PressGesture).
    pub fn apply(&mut self, action: PressAction) {
        match action {
            PressAction::None => {}
            PressAction::BeginPress(trigger) => {
                self.begin_press(trigger);
            }
            PressAction::EndPress => {
                self.end_press();
            }
            PressAction::Flash => {
                self.begin_press(PressTrigger::Unpositioned);
                self.end_press();
            }
        }
    }

    fn set_flag(&mut self, flag: VisualFlags, value: bool) {
        if self.flags.contains(flag) == value {
            return;
        }
        self.flags.set(flag, value);
        trace!("ripple: flags -> {:?}", self.flags);
        self.observer.flags_changed(self.flags);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::MINIMUM_PRESS;
    use crate::animation::tests::Probe;
    use crate::types::{FixedContainer, PointerKind};
    use alloc::vec::Vec;
    use core::time::Duration;
    use kurbo::{Point, Rect, Vec2};

    type Recorded = Vec<VisualFlags>;

    fn container() -> FixedContainer {
        FixedContainer::new(Rect::new(0.0, 0.0, 100.0, 50.0))
    }

    fn ripple(probe: &Probe) -> Ripple<FixedContainer, Probe, Probe> {
        Ripple::new(container(), probe.clone(), probe.clone())
    }

    fn enter(kind: PointerKind) -> PointerEvent {
        PointerEvent::new(kind, PointerPhase::Enter)
    }

    fn leave(kind: PointerKind) -> PointerEvent {
        PointerEvent::new(kind, PointerPhase::Leave)
    }

    #[test]
    fn mouse_and_pen_hover() {
        let probe = Probe::default();
        let mut r = ripple(&probe);
        r.on_pointer_enter(&enter(PointerKind::Mouse));
        assert!(r.flags().hovered());
        r.on_pointer_leave(&leave(PointerKind::Mouse));
        assert!(!r.flags().hovered());
        r.handle_pointer(&enter(PointerKind::Pen));
        assert!(r.flags().hovered());
    }

    #[test]
    fn touch_never_hovers() {
        let probe = Probe::default();
        let mut r = ripple(&probe);
        r.on_pointer_enter(&enter(PointerKind::Touch));
        r.handle_pointer(&enter(PointerKind::Touch));
        assert!(!r.flags().hovered());
    }

    #[test]
    fn secondary_pointers_are_ignored() {
        let probe = Probe::default();
        let mut r = ripple(&probe);
        r.on_pointer_enter(&enter(PointerKind::Mouse).secondary());
        assert!(!r.flags().hovered());
        r.on_pointer_enter(&enter(PointerKind::Mouse));
        r.on_pointer_leave(&leave(PointerKind::Mouse).secondary());
        assert!(r.flags().hovered());
    }

    #[test]
    fn disabled_ripple_does_not_hover() {
        let probe = Probe::default();
        let mut r = Ripple::with_config(
            container(),
            probe.clone(),
            probe.clone(),
            RippleConfig {
                disabled: true,
                ..Default::default()
            },
        );
        r.on_pointer_enter(&enter(PointerKind::Mouse));
        assert!(!r.flags().hovered());
        // Focus is not gated.
        r.on_focus_in();
        assert!(r.flags().focused());
    }

    #[test]
    fn focus_follows_focus_events() {
        let probe = Probe::default();
        let mut r = ripple(&probe);
        r.on_focus_in();
        assert!(r.flags().focused());
        r.on_focus_out();
        assert!(!r.flags().focused());
    }

    #[test]
    fn early_release_holds_pressed_until_minimum() {
        let probe = Probe::default();
        let mut r = ripple(&probe);
        r.begin_press(PressTrigger::Unpositioned);
        assert!(r.flags().pressed());

        probe.set_ms(100);
        let EndPress::Deferred { token, delay } = r.end_press() else {
            panic!("expected a deferred clear");
        };
        assert_eq!(delay, Duration::from_millis(125));
        assert!(r.flags().pressed());

        probe.set_ms(225);
        assert!(r.run_deferred_clear(token));
        assert!(!r.flags().pressed());
    }

    #[test]
    fn late_release_clears_immediately() {
        let probe = Probe::default();
        let mut r = ripple(&probe);
        r.begin_press(PressTrigger::Unpositioned);
        probe.set_ms(300);
        assert_eq!(r.end_press(), EndPress::Immediate);
        assert!(!r.flags().pressed());
    }

    #[test]
    fn new_press_supersedes_pending_clear() {
        let probe = Probe::default();
        let mut r = ripple(&probe);
        r.begin_press(PressTrigger::Unpositioned);
        probe.set_ms(50);
        let EndPress::Deferred { token, .. } = r.end_press() else {
            panic!("expected a deferred clear");
        };

        probe.set_ms(60);
        r.begin_press(Some(Point::new(10.0, 10.0)));
        probe.set_ms(225);
        assert!(!r.run_deferred_clear(token));
        assert!(r.flags().pressed());
        assert_eq!(probe.canceled.get(), 1);
        assert_eq!(probe.tasks_canceled.get(), 1);
    }

    #[test]
    fn positioned_press_uses_container_space() {
        let probe = Probe::default();
        let mut r = Ripple::new(
            FixedContainer::new(Rect::new(20.0, 30.0, 120.0, 80.0))
                .with_scroll(Vec2::new(0.0, 100.0)),
            probe.clone(),
            probe.clone(),
        );
        let event =
            PointerEvent::new(PointerKind::Mouse, PointerPhase::Down).at(Point::new(30.0, 140.0));
        let g = r.begin_press(&event);
        // Local origin (10, 10), minus half of the 20 px square.
        assert_eq!(g.start_point, Point::new(0.0, 0.0));
        assert_eq!(probe.started.borrow()[0].geometry, g);
    }

    #[test]
    fn geometry_is_recomputed_per_press() {
        let probe = Probe::default();
        let mut r = ripple(&probe);
        let first = r.begin_press(PressTrigger::Unpositioned);
        r.container_mut().rect = Rect::new(0.0, 0.0, 200.0, 200.0);
        let second = r.begin_press(PressTrigger::Unpositioned);
        assert_eq!(first.initial_size, 20.0);
        assert_eq!(second.initial_size, 40.0);
    }

    #[test]
    fn unbounded_applies_to_next_press() {
        let probe = Probe::default();
        let mut r = Ripple::new(
            FixedContainer::new(Rect::new(0.0, 0.0, 45.0, 10.0)),
            probe.clone(),
            probe.clone(),
        );
        assert_eq!(r.begin_press(PressTrigger::Unpositioned).initial_size, 9.0);
        r.set_unbounded(true);
        assert!(r.flags().unbounded());
        assert_eq!(r.begin_press(PressTrigger::Unpositioned).initial_size, 8.0);
    }

    #[test]
    fn disabling_mid_press_resets_hover_and_focus() {
        let probe = Probe::default();
        let mut r = ripple(&probe);
        r.on_pointer_enter(&enter(PointerKind::Mouse));
        r.on_focus_in();
        r.begin_press(PressTrigger::Unpositioned);
        probe.set_ms(40);

        r.set_disabled(true);
        assert!(!r.flags().hovered());
        assert!(!r.flags().focused());
        // Same minimum-duration rule as an ordinary release.
        assert!(r.flags().pressed());
        let pending = r.controller().pending_clear().unwrap();
        assert_eq!(
            probe.scheduled.borrow().last().copied(),
            Some((Duration::from_millis(185), pending))
        );
        assert!(r.run_deferred_clear(pending));
        assert!(!r.flags().pressed());
    }

    #[test]
    fn redundant_disable_is_a_no_op() {
        let probe = Probe::default();
        let mut r = ripple(&probe);
        r.set_disabled(true);
        r.on_focus_in();
        r.set_disabled(true);
        assert!(r.flags().focused());
        r.set_disabled(false);
        assert!(!r.is_disabled());
        assert!(r.flags().focused());
    }

    #[test]
    fn observer_sees_each_change_once() {
        let probe = Probe::default();
        let mut seen: Recorded = Vec::new();
        {
            let mut r = Ripple::with_observer(
                container(),
                probe.clone(),
                probe.clone(),
                RippleConfig::default(),
                |f: VisualFlags| seen.push(f),
            );
            r.on_focus_in();
            r.on_focus_in();
            r.on_pointer_enter(&enter(PointerKind::Mouse));
            r.begin_press(PressTrigger::Unpositioned);
            probe.set_ms(250);
            r.end_press();
        }
        assert_eq!(
            seen,
            [
                VisualFlags::FOCUSED,
                VisualFlags::FOCUSED | VisualFlags::HOVERED,
                VisualFlags::FOCUSED | VisualFlags::HOVERED | VisualFlags::PRESSED,
                VisualFlags::FOCUSED | VisualFlags::HOVERED,
            ]
        );
    }

    #[test]
    fn flash_ends_with_deferred_clear() {
        let probe = Probe::default();
        let mut r = ripple(&probe);
        r.apply(PressAction::Flash);
        assert!(r.flags().pressed());
        assert_eq!(
            probe.scheduled.borrow().as_slice(),
            &[(MINIMUM_PRESS, r.controller().pending_clear().unwrap())]
        );
    }
}
