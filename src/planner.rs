//! Dimension planning — pure scaling math.
//!
//! Given the source dimensions and a resolved [`RotationPlan`], computes the
//! pre-search target dimensions: rotation-aware swap, then a floor/ceiling
//! clamp on the longest edge. The clamp ranges are disjoint, so at most one
//! adjustment applies.

use crate::rotation::RotationPlan;

/// Target dimensions after rotation swap and min/max clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePlan {
    pub width: u32,
    pub height: u32,
}

/// Plan the target dimensions for one image.
///
/// The upscale is unconditional — downstream analysis needs legible fine
/// detail (signatures, handwriting) even at the cost of visible softness.
pub fn plan_dimensions(
    source_width: u32,
    source_height: u32,
    rotation: &RotationPlan,
    min_dimension: u32,
    max_dimension: u32,
) -> SizePlan {
    let (w, h) = if rotation.swap_dimensions {
        (source_height, source_width)
    } else {
        (source_width, source_height)
    };

    let longest = w.max(h);
    let factor = if longest < min_dimension {
        min_dimension as f64 / longest as f64
    } else if longest > max_dimension {
        max_dimension as f64 / longest as f64
    } else {
        return SizePlan { width: w, height: h };
    };

    SizePlan {
        width: ((w as f64 * factor).round() as u32).max(1),
        height: ((h as f64 * factor).round() as u32).max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::Orientation;
    use crate::rotation::{ManualRotation, resolve_rotation};

    const MIN: u32 = 1200;
    const MAX: u32 = 2400;

    fn no_swap() -> RotationPlan {
        resolve_rotation(Orientation::default(), ManualRotation::None, 100, 200, false)
    }

    fn swapped() -> RotationPlan {
        resolve_rotation(Orientation::from_code(6), ManualRotation::None, 100, 200, false)
    }

    #[test]
    fn upscales_to_minimum() {
        let plan = plan_dimensions(600, 800, &no_swap(), MIN, MAX);
        assert_eq!(plan, SizePlan { width: 900, height: 1200 });
    }

    #[test]
    fn downscales_to_maximum() {
        let plan = plan_dimensions(3000, 4000, &no_swap(), MIN, MAX);
        assert_eq!(plan, SizePlan { width: 1800, height: 2400 });
    }

    #[test]
    fn in_range_is_unchanged() {
        let plan = plan_dimensions(1350, 1800, &no_swap(), MIN, MAX);
        assert_eq!(plan, SizePlan { width: 1350, height: 1800 });
    }

    #[test]
    fn boundary_values_are_unchanged() {
        assert_eq!(
            plan_dimensions(900, 1200, &no_swap(), MIN, MAX),
            SizePlan { width: 900, height: 1200 }
        );
        assert_eq!(
            plan_dimensions(1800, 2400, &no_swap(), MIN, MAX),
            SizePlan { width: 1800, height: 2400 }
        );
    }

    #[test]
    fn swap_applies_before_clamping() {
        // 4000x3000 swapped → 3000x4000 → downscaled to 1800x2400
        let plan = plan_dimensions(4000, 3000, &swapped(), MIN, MAX);
        assert_eq!(plan, SizePlan { width: 1800, height: 2400 });
    }

    #[test]
    fn upscale_preserves_aspect_within_a_pixel() {
        let plan = plan_dimensions(533, 800, &no_swap(), MIN, MAX);
        assert_eq!(plan.height, 1200);
        let expected_w = 533.0 * 1200.0 / 800.0;
        assert!((plan.width as f64 - expected_w).abs() <= 1.0);
    }

    #[test]
    fn tiny_source_never_collapses_to_zero() {
        // Extreme aspect: factor 0.25 would round the short edge to zero
        let plan = plan_dimensions(1, 9600, &no_swap(), MIN, MAX);
        assert!(plan.width >= 1);
        assert!(plan.height >= 1);
    }
}
