pub const DEFAULT_MULTIPLIER: f64 = 40.0;

/// Bounding box of the tracked element in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParallaxOffset {
    pub dx: f64,
    pub dy: f64,
}

impl ParallaxOffset {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub fn to_css_transform(self) -> String {
        format!("translate({:.2}px, {:.2}px)", self.dx, self.dy)
    }
}

/// Displaces an element toward the pointer, proportionally to how far the
/// pointer is from the element's center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerParallax {
    multiplier: f64,
    offset: ParallaxOffset,
}

impl Default for PointerParallax {
    fn default() -> Self {
        Self::new(DEFAULT_MULTIPLIER)
    }
}

impl PointerParallax {
    pub fn new(multiplier: f64) -> Self {
        let multiplier = if multiplier.is_finite() {
            multiplier.abs()
        } else {
            DEFAULT_MULTIPLIER
        };

        Self {
            multiplier,
            offset: ParallaxOffset::ZERO,
        }
    }

    pub fn offset(&self) -> ParallaxOffset {
        self.offset
    }

    /// Largest displacement on either axis.
    pub fn max_magnitude(&self) -> f64 {
        self.multiplier / 2.0
    }

    pub fn pointer_moved(&mut self, client_x: f64, client_y: f64, bounds: Bounds) -> ParallaxOffset {
        let (center_x, center_y) = bounds.center();
        self.offset = ParallaxOffset {
            dx: self.axis_offset(client_x - center_x, bounds.width),
            dy: self.axis_offset(client_y - center_y, bounds.height),
        };
        self.offset
    }

    pub fn pointer_left(&mut self) -> ParallaxOffset {
        self.offset = ParallaxOffset::ZERO;
        self.offset
    }

    fn axis_offset(&self, from_center: f64, dimension: f64) -> f64 {
        if !dimension.is_finite() || dimension <= 0.0 || !from_center.is_finite() {
            return 0.0;
        }

        let limit = self.max_magnitude();
        (from_center / dimension * self.multiplier).clamp(-limit, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: Bounds = Bounds {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 100.0,
    };

    #[test]
    fn pointer_at_center_has_no_offset() {
        let mut parallax = PointerParallax::default();

        assert_eq!(parallax.pointer_moved(200.0, 100.0, IMAGE), ParallaxOffset::ZERO);
    }

    #[test]
    fn corners_reach_half_the_multiplier() {
        let mut parallax = PointerParallax::default();

        assert_eq!(
            parallax.pointer_moved(100.0, 50.0, IMAGE),
            ParallaxOffset { dx: -20.0, dy: -20.0 }
        );
        assert_eq!(
            parallax.pointer_moved(300.0, 150.0, IMAGE),
            ParallaxOffset { dx: 20.0, dy: 20.0 }
        );
    }

    #[test]
    fn offset_scales_linearly_with_distance_and_multiplier() {
        let mut default = PointerParallax::default();
        let mut doubled = PointerParallax::new(80.0);

        let quarter = default.pointer_moved(250.0, 125.0, IMAGE);
        assert_eq!(quarter, ParallaxOffset { dx: 10.0, dy: 10.0 });

        let quarter_doubled = doubled.pointer_moved(250.0, 125.0, IMAGE);
        assert_eq!(quarter_doubled, ParallaxOffset { dx: 20.0, dy: 20.0 });
    }

    #[test]
    fn leaving_resets_regardless_of_last_position() {
        let mut parallax = PointerParallax::default();
        parallax.pointer_moved(300.0, 50.0, IMAGE);

        assert_eq!(parallax.pointer_left(), ParallaxOffset::ZERO);
        assert_eq!(parallax.offset(), ParallaxOffset::ZERO);
    }

    #[test]
    fn offset_stays_bounded_outside_the_element_and_for_empty_bounds() {
        let mut parallax = PointerParallax::default();

        let far = parallax.pointer_moved(10_000.0, -10_000.0, IMAGE);
        assert_eq!(far, ParallaxOffset { dx: 20.0, dy: -20.0 });

        let collapsed = Bounds::new(0.0, 0.0, 0.0, 100.0);
        let offset = parallax.pointer_moved(30.0, 100.0, collapsed);
        assert_eq!(offset, ParallaxOffset { dx: 0.0, dy: 20.0 });
    }

    #[test]
    fn css_transform_uses_pixel_translation() {
        let offset = ParallaxOffset { dx: 1.5, dy: -20.0 };

        assert_eq!(offset.to_css_transform(), "translate(1.50px, -20.00px)");
    }
}
