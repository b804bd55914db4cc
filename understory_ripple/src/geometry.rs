// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ripple geometry: initial size, scale-to-cover, and start/end translation.
//!
//! ## Sizing
//!
//! A ripple starts as a small square of side `initial_size` (a fifth of the container's larger
//! side) centered on the press origin, then scales up while translating to the container
//! center. The target scale covers the container's diagonal plus a fixed padding and a
//! soft edge, so the gradient falloff never shows inside the container.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Size};
//! use understory_ripple::geometry::RippleGeometry;
//!
//! let g = RippleGeometry::compute(Size::new(100.0, 50.0), None, false);
//! assert_eq!(g.initial_size, 20.0);
//! assert!((g.scale - 9.8402).abs() < 1e-4);
//! // Centered press: start and end coincide.
//! assert_eq!(g.start_point, Point::new(40.0, 15.0));
//! assert_eq!(g.end_point, g.start_point);
//! ```

use kurbo::{Affine, Circle, Point, Rect, Size, Vec2};

use crate::types::PressTrigger;

/// Fraction of the container's larger side used for the initial ripple size.
pub const INITIAL_ORIGIN_SCALE: f64 = 0.2;
/// Extra radius past the container diagonal.
pub const PADDING: f64 = 10.0;
/// Lower bound on the soft edge width, in pixels.
pub const SOFT_EDGE_MINIMUM_SIZE: f64 = 75.0;
/// Soft edge width as a fraction of the container's larger side.
pub const SOFT_EDGE_CONTAINER_RATIO: f64 = 0.35;

/// Geometry of one press, in the container's local pixel space.
///
/// Derived fresh on every press by [`RippleGeometry::compute`]; never cached.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RippleGeometry {
    /// Side of the ripple square before scaling. A whole number of pixels; even when unbounded.
    pub initial_size: f64,
    /// Scale applied over the grow animation.
    pub scale: f64,
    /// Top-left of the ripple square when the press begins.
    pub start_point: Point,
    /// Top-left of the ripple square when fully grown (container centered).
    pub end_point: Point,
}

impl RippleGeometry {
    /// Compute the geometry for a container of `size`.
    ///
    /// `origin` is the press position in container-local coordinates; `None` grows from the
    /// container center. Non-positive sizes are not rejected and yield degenerate geometry
    /// (see [`RippleGeometry::is_degenerate`]).
    pub fn compute(size: Size, origin: Option<Point>, unbounded: bool) -> Self {
        let Size { width, height } = size;
        let max_dim = width.max(height);
        let soft_edge = (SOFT_EDGE_CONTAINER_RATIO * max_dim).max(SOFT_EDGE_MINIMUM_SIZE);

        let mut initial_size = floor(max_dim * INITIAL_ORIGIN_SCALE);
        if unbounded {
            initial_size -= initial_size % 2.0;
        }

        let max_radius = Vec2::new(width, height).hypot() + PADDING;
        let scale = (max_radius + soft_edge) / initial_size;

        let half = initial_size / 2.0;
        let end_point = Point::new((width - initial_size) / 2.0, (height - initial_size) / 2.0);
        let origin = origin.unwrap_or(Point::new(width / 2.0, height / 2.0));
        let start_point = Point::new(origin.x - half, origin.y - half);

        Self {
            initial_size,
            scale,
            start_point,
            end_point,
        }
    }

    /// Compute the geometry for a press on a container at viewport-relative `rect`.
    ///
    /// Positioned triggers are normalized into container space with [`local_origin`].
    pub fn for_container(rect: Rect, scroll: Vec2, trigger: PressTrigger, unbounded: bool) -> Self {
        let origin = trigger
            .page_position()
            .map(|page| local_origin(page, rect, scroll));
        Self::compute(rect.size(), origin, unbounded)
    }

    /// Returns `true` when the geometry cannot render: a non-positive size or a non-finite scale.
    pub fn is_degenerate(&self) -> bool {
        !(self.initial_size > 0.0 && self.scale.is_finite())
    }

    /// Transform at the start of the grow animation: translated to the origin, unscaled.
    pub fn start_transform(&self) -> Affine {
        Affine::translate(self.start_point.to_vec2())
    }

    /// Transform at the end of the grow animation.
    ///
    /// Scales about the ripple square's own center, matching a centered transform origin.
    pub fn end_transform(&self) -> Affine {
        transform_for(self.end_point, self.scale, self.initial_size)
    }

    /// Ripple footprint when the press begins.
    pub fn start_circle(&self) -> Circle {
        Circle::new(self.center_of(self.start_point), self.initial_size / 2.0)
    }

    /// Ripple footprint when fully grown.
    pub fn end_circle(&self) -> Circle {
        Circle::new(
            self.center_of(self.end_point),
            self.initial_size * self.scale / 2.0,
        )
    }

    fn center_of(&self, top_left: Point) -> Point {
        let half = self.initial_size / 2.0;
        top_left + Vec2::new(half, half)
    }
}

/// Translate a document-relative position into container-local coordinates.
///
/// `container` is the viewport-relative bounding box and `scroll` the page scroll offset, so
/// the container's document origin is `container.origin() + scroll`.
pub fn local_origin(page: Point, container: Rect, scroll: Vec2) -> Point {
    page - (container.origin().to_vec2() + scroll)
}

/// Translate-then-scale about the center of a square of side `size` at `top_left`.
pub(crate) fn transform_for(top_left: Point, scale: f64, size: f64) -> Affine {
    let half = size / 2.0;
    let center = Vec2::new(half, half);
    Affine::translate(top_left.to_vec2() + center)
        * Affine::scale(scale)
        * Affine::translate(-center)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "ripple sizes are far below 2^52, where the i64 round trip is exact"
)]
fn floor(v: f64) -> f64 {
    let t = v as i64 as f64;
    if t > v { t - 1.0 } else { t }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn wide_container_centered_press() {
        let g = RippleGeometry::compute(Size::new(100.0, 50.0), None, false);
        assert_eq!(g.initial_size, 20.0);
        let max_radius = 100.0_f64.hypot(50.0) + 10.0;
        assert!(close(g.scale, (max_radius + 75.0) / 20.0));
        assert!((g.scale - 9.8402).abs() < 1e-4);
        assert_eq!(g.end_point, Point::new(40.0, 15.0));
        assert_eq!(g.start_point, Point::new(40.0, 15.0));
    }

    #[test]
    fn square_unbounded_container() {
        let g = RippleGeometry::compute(Size::new(41.0, 41.0), None, true);
        assert_eq!(g.initial_size, 8.0);
        assert!((g.scale - 17.8725).abs() < 1e-3);
    }

    #[test]
    fn unbounded_forces_even_size() {
        // floor(0.2 * 45) = 9, bounded keeps it, unbounded drops to 8.
        let bounded = RippleGeometry::compute(Size::new(45.0, 10.0), None, false);
        let unbounded = RippleGeometry::compute(Size::new(45.0, 10.0), None, true);
        assert_eq!(bounded.initial_size, 9.0);
        assert_eq!(unbounded.initial_size, 8.0);

        for side in 10..400 {
            let g = RippleGeometry::compute(Size::new(side as f64, 24.0), None, true);
            assert_eq!(g.initial_size % 2.0, 0.0, "side {side}");
        }
    }

    #[test]
    fn scale_covers_initial_footprint() {
        for (w, h) in [(5.0, 5.0), (48.0, 48.0), (320.0, 40.0), (1920.0, 1080.0)] {
            for unbounded in [false, true] {
                let g = RippleGeometry::compute(Size::new(w, h), None, unbounded);
                if g.is_degenerate() {
                    continue;
                }
                assert!(g.scale >= 1.0, "{w}x{h} unbounded={unbounded}");
            }
        }
    }

    #[test]
    fn soft_edge_grows_with_large_containers() {
        // 0.35 * 1000 = 350 > 75.
        let g = RippleGeometry::compute(Size::new(1000.0, 10.0), None, false);
        let expected = (1000.0_f64.hypot(10.0) + PADDING + 350.0) / 200.0;
        assert!(close(g.scale, expected));
    }

    #[test]
    fn positioned_press_centers_on_origin() {
        let origin = Some(Point::new(10.0, 5.0));
        let g = RippleGeometry::compute(Size::new(100.0, 50.0), origin, false);
        assert_eq!(g.start_point, Point::new(0.0, -5.0));
        assert_eq!(g.end_point, Point::new(40.0, 15.0));
    }

    #[test]
    fn for_container_accounts_for_offset_and_scroll() {
        let rect = Rect::new(200.0, 100.0, 300.0, 150.0);
        let scroll = Vec2::new(0.0, 400.0);
        // Document position of the container's top-left is (200, 500).
        let page = Point::new(230.0, 520.0);
        assert_eq!(local_origin(page, rect, scroll), Point::new(30.0, 20.0));

        let g = RippleGeometry::for_container(rect, scroll, PressTrigger::Positioned(page), false);
        assert_eq!(g.start_point, Point::new(20.0, 10.0));

        let centered =
            RippleGeometry::for_container(rect, scroll, PressTrigger::Unpositioned, false);
        assert_eq!(centered.start_point, centered.end_point);
    }

    #[test]
    fn degenerate_container_does_not_panic() {
        let g = RippleGeometry::compute(Size::new(0.0, 0.0), None, true);
        assert!(g.is_degenerate());
        let tiny = RippleGeometry::compute(Size::new(4.0, 3.0), None, false);
        assert_eq!(tiny.initial_size, 0.0);
        assert!(tiny.is_degenerate());
        let negative = RippleGeometry::compute(Size::new(-20.0, -10.0), None, false);
        assert!(negative.is_degenerate());
    }

    #[test]
    fn transforms_match_keyframe_endpoints() {
        let origin = Some(Point::new(0.0, 0.0));
        let g = RippleGeometry::compute(Size::new(100.0, 50.0), origin, false);
        assert_eq!(g.start_transform() * Point::ZERO, g.start_point);
        // The square's center lands on the container center, scaled about itself.
        let center = g.end_transform() * Point::new(10.0, 10.0);
        assert!(close(center.x, 50.0) && close(center.y, 25.0));
        let end = g.end_circle();
        assert!(close(end.center.x, 50.0) && close(end.center.y, 25.0));
        assert!(close(end.radius, 10.0 * g.scale));
        assert_eq!(g.start_circle().center, Point::ZERO);
    }
}
