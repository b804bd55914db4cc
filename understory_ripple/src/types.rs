// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the ripple: pointer input, press triggers, container lookup, and visual flags.
//!
//! ## Overview
//!
//! These types describe what the host feeds into a [`Ripple`](crate::ripple::Ripple) and what it
//! gets back. Pointer input is resolved into a [`PressTrigger`] once at the boundary, container
//! geometry is queried through [`ContainerLookup`], and every change to the render state is
//! published as a [`VisualFlags`] snapshot through a [`FlagsObserver`].

use kurbo::{Point, Rect, Vec2};

/// Input device class of a pointer event.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerKind {
    /// Mouse or trackpad.
    Mouse,
    /// Stylus.
    Pen,
    /// Finger on a touch surface.
    Touch,
}

/// Phase of a pointer event.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerPhase {
    /// Pointer entered the host element.
    Enter,
    /// Pointer left the host element.
    Leave,
    /// Button pressed or contact made.
    Down,
    /// Button released or contact lifted.
    Up,
    /// The platform took the pointer away (scroll, gesture, lost capture).
    Cancel,
}

/// A pointer event descriptor as delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Input device class.
    pub kind: PointerKind,
    /// Whether this pointer is the authoritative one for its kind.
    pub is_primary: bool,
    /// Event phase.
    pub phase: PointerPhase,
    /// Document-relative position, when the event carries one.
    pub page_position: Option<Point>,
}

impl PointerEvent {
    /// Create a primary pointer event without a position.
    pub const fn new(kind: PointerKind, phase: PointerPhase) -> Self {
        Self {
            kind,
            is_primary: true,
            phase,
            page_position: None,
        }
    }

    /// Attach a document-relative position.
    #[must_use]
    pub const fn at(mut self, page_position: Point) -> Self {
        self.page_position = Some(page_position);
        self
    }

    /// Mark the event as coming from a non-primary pointer.
    #[must_use]
    pub const fn secondary(mut self) -> Self {
        self.is_primary = false;
        self
    }

    /// Returns `true` for touch-origin events.
    pub const fn is_touch(&self) -> bool {
        matches!(self.kind, PointerKind::Touch)
    }
}

/// What started a press, resolved once at the input boundary.
///
/// Pointer-driven presses carry the document position the ripple should grow from.
/// Keyboard and programmatic presses carry nothing and grow from the container center.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum PressTrigger {
    /// Press anchored at a document-relative position.
    Positioned(Point),
    /// Press without a usable position.
    #[default]
    Unpositioned,
}

impl PressTrigger {
    /// Document-relative anchor, if any.
    pub const fn page_position(&self) -> Option<Point> {
        match *self {
            Self::Positioned(p) => Some(p),
            Self::Unpositioned => None,
        }
    }
}

impl From<&PointerEvent> for PressTrigger {
    fn from(event: &PointerEvent) -> Self {
        match event.page_position {
            Some(p) => Self::Positioned(p),
            None => Self::Unpositioned,
        }
    }
}

impl From<Option<Point>> for PressTrigger {
    fn from(position: Option<Point>) -> Self {
        match position {
            Some(p) => Self::Positioned(p),
            None => Self::Unpositioned,
        }
    }
}

/// Query the box the ripple is sized against.
///
/// Implement this on whatever owns layout for the host element (or its parent when the
/// ripple itself has no box). It is consulted on every press, never cached, since the
/// container may resize between presses.
pub trait ContainerLookup {
    /// Bounding box of the container in viewport coordinates.
    fn container_rect(&self) -> Rect;

    /// Page scroll offset used to normalize document positions into container space.
    fn scroll_offset(&self) -> Vec2 {
        Vec2::ZERO
    }
}

/// A container with fixed bounds and scroll offset.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FixedContainer {
    /// Viewport-relative bounds.
    pub rect: Rect,
    /// Page scroll offset.
    pub scroll: Vec2,
}

impl FixedContainer {
    /// A container at `rect` on an unscrolled page.
    pub const fn new(rect: Rect) -> Self {
        Self {
            rect,
            scroll: Vec2::ZERO,
        }
    }

    /// Set the page scroll offset.
    #[must_use]
    pub const fn with_scroll(mut self, scroll: Vec2) -> Self {
        self.scroll = scroll;
        self
    }
}

impl ContainerLookup for FixedContainer {
    fn container_rect(&self) -> Rect {
        self.rect
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }
}

bitflags::bitflags! {
    /// Render state consumed by the visual tree.
    ///
    /// `HOVERED`, `FOCUSED` and `PRESSED` are each driven by their own event family;
    /// `UNBOUNDED` mirrors [`RippleConfig::unbounded`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct VisualFlags: u8 {
        /// A primary non-touch pointer is over the host.
        const HOVERED   = 0b0000_0001;
        /// The host has keyboard focus.
        const FOCUSED   = 0b0000_0010;
        /// A press is active or waiting out its minimum duration.
        const PRESSED   = 0b0000_0100;
        /// The ripple renders as an unclipped circle.
        const UNBOUNDED = 0b0000_1000;
    }
}

impl Default for VisualFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl VisualFlags {
    const CLASS_NAMES: [(Self, &'static str); 4] = [
        (Self::HOVERED, "hovered"),
        (Self::FOCUSED, "focused"),
        (Self::PRESSED, "pressed"),
        (Self::UNBOUNDED, "unbounded"),
    ];

    /// Returns `true` if hovered.
    pub const fn hovered(self) -> bool {
        self.contains(Self::HOVERED)
    }

    /// Returns `true` if focused.
    pub const fn focused(self) -> bool {
        self.contains(Self::FOCUSED)
    }

    /// Returns `true` if pressed.
    pub const fn pressed(self) -> bool {
        self.contains(Self::PRESSED)
    }

    /// Returns `true` if unbounded.
    pub const fn unbounded(self) -> bool {
        self.contains(Self::UNBOUNDED)
    }

    /// Class tokens for the set flags, in a stable order.
    ///
    /// For visual trees that style the ripple surface by class name.
    pub fn class_names(self) -> impl Iterator<Item = &'static str> {
        Self::CLASS_NAMES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

/// Externally supplied ripple configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RippleConfig {
    /// Render as an unclipped circle; forces an even initial size.
    pub unbounded: bool,
    /// Ignore hover and reset interaction state.
    pub disabled: bool,
}

/// Receives a [`VisualFlags`] snapshot after every change.
///
/// Called synchronously from whichever [`Ripple`](crate::ripple::Ripple) operation changed a
/// flag. Writes that leave the flags unchanged do not notify.
pub trait FlagsObserver {
    /// The flags changed to `flags`.
    fn flags_changed(&mut self, flags: VisualFlags);
}

impl<F: FnMut(VisualFlags)> FlagsObserver for F {
    fn flags_changed(&mut self, flags: VisualFlags) {
        self(flags);
    }
}

/// An observer that ignores all changes.
///
/// Used by [`Ripple::new`](crate::ripple::Ripple::new) when the host polls
/// [`Ripple::flags`](crate::ripple::Ripple::flags) instead.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoObserver;

impl FlagsObserver for NoObserver {
    #[inline]
    fn flags_changed(&mut self, _flags: VisualFlags) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn trigger_from_event_uses_position() {
        let e = PointerEvent::new(PointerKind::Mouse, PointerPhase::Down).at(Point::new(3.0, 4.0));
        assert_eq!(
            PressTrigger::from(&e),
            PressTrigger::Positioned(Point::new(3.0, 4.0))
        );
        let bare = PointerEvent::new(PointerKind::Pen, PointerPhase::Down);
        assert_eq!(PressTrigger::from(&bare), PressTrigger::Unpositioned);
    }

    #[test]
    fn secondary_clears_primary() {
        let e = PointerEvent::new(PointerKind::Touch, PointerPhase::Enter).secondary();
        assert!(!e.is_primary);
        assert!(e.is_touch());
    }

    #[test]
    fn class_names_follow_set_flags() {
        let flags = VisualFlags::PRESSED | VisualFlags::HOVERED;
        let names: Vec<_> = flags.class_names().collect();
        assert_eq!(names, ["hovered", "pressed"]);
        assert_eq!(VisualFlags::empty().class_names().count(), 0);
    }

    #[test]
    fn fixed_container_reports_scroll() {
        let c = FixedContainer::new(Rect::new(10.0, 20.0, 110.0, 70.0))
            .with_scroll(Vec2::new(0.0, 300.0));
        assert_eq!(c.container_rect().width(), 100.0);
        assert_eq!(c.scroll_offset(), Vec2::new(0.0, 300.0));
    }

    #[test]
    fn closure_observer_receives_flags() {
        let mut seen = Vec::new();
        {
            let mut obs = |f: VisualFlags| seen.push(f);
            obs.flags_changed(VisualFlags::FOCUSED);
        }
        assert_eq!(seen, [VisualFlags::FOCUSED]);
    }
}
