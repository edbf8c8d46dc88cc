//! Measured drawing-surface dimensions.

/// Viewports narrower than this are classified as constrained devices and the
/// backdrop stays off entirely.
pub const CONSTRAINED_MAX_WIDTH: f64 = 768.0;

/// Current drawable dimensions, recomputed on every (debounced) layout change.
///
/// `content_height` is the measured height of the content wrapper, not the
/// visual viewport: the canvas spans the full scrollable page. `hero_height`
/// is the visual viewport height; the nebula layers only cover that top band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub width: f64,
    pub content_height: f64,
    pub hero_height: f64,
    pub pixel_density: f64,
}

impl ViewportState {
    /// Drawable area in logical pixels; star counts scale with this.
    pub fn area(&self) -> f64 {
        self.width * self.content_height
    }

    pub fn is_constrained(&self) -> bool {
        self.width < CONSTRAINED_MAX_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: f64) -> ViewportState {
        ViewportState {
            width,
            content_height: 2000.0,
            hero_height: 900.0,
            pixel_density: 1.0,
        }
    }

    #[test]
    fn constrained_classification_uses_width_threshold() {
        assert!(viewport(600.0).is_constrained());
        assert!(viewport(767.9).is_constrained());
        assert!(!viewport(768.0).is_constrained());
        assert!(!viewport(1024.0).is_constrained());
    }

    #[test]
    fn area_is_width_times_content_height() {
        assert_eq!(viewport(1024.0).area(), 1024.0 * 2000.0);
    }
}
