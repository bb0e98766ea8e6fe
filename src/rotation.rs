//! Rotation resolution — pure orientation math.
//!
//! Combines three rotation sources into one canonical decision:
//! camera EXIF orientation, an optional caller override, and the
//! auto-portrait heuristic (collectibles are taller than wide, so a
//! landscape frame with no override gets stood upright).
//!
//! Everything here is pure and testable without decoding a single pixel.

use crate::exif::Orientation;

/// Caller-supplied rotation override, constrained to quarter turns.
///
/// Invalid degree values are unrepresentable; parse user input with
/// [`ManualRotation::from_degrees`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManualRotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl ManualRotation {
    /// Parse from degrees. Only 0, 90, 180, and 270 are valid.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Self::None),
            90 => Some(Self::Cw90),
            180 => Some(Self::Cw180),
            270 => Some(Self::Cw270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Self::None => 0,
            Self::Cw90 => 90,
            Self::Cw180 => 180,
            Self::Cw270 => 270,
        }
    }
}

/// Canonical rotation decision for one image. Derived once, immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPlan {
    /// Rotation implied by the camera orientation tag.
    pub exif_degrees: u16,
    /// Caller override.
    pub manual_degrees: u16,
    /// Contribution of the auto-portrait heuristic (0 or 90).
    pub auto_degrees: u16,
    /// Sum of the three terms, mod 360.
    pub total_degrees: u16,
    /// Whether the total rotation exchanges width and height.
    pub swap_dimensions: bool,
}

/// Resolve the rotation for one image.
///
/// The heuristic only fires on a non-manual pass: a manual override means
/// the caller has taken control of orientation, and with `auto_portrait`
/// disabled it never fires at all. Its trigger is evaluated against the
/// *effective* dimensions after the EXIF rotation alone — what the viewer
/// would see before any correction.
pub fn resolve_rotation(
    orientation: Orientation,
    manual: ManualRotation,
    source_width: u32,
    source_height: u32,
    auto_portrait: bool,
) -> RotationPlan {
    let exif_degrees = orientation.degrees();
    let manual_degrees = manual.degrees();

    let (effective_w, effective_h) = if matches!(exif_degrees, 90 | 270) {
        (source_height, source_width)
    } else {
        (source_width, source_height)
    };

    let auto_degrees = if auto_portrait && manual == ManualRotation::None && effective_w > effective_h
    {
        90
    } else {
        0
    };

    let total_degrees = (exif_degrees + manual_degrees + auto_degrees) % 360;

    RotationPlan {
        exif_degrees,
        manual_degrees,
        auto_degrees,
        total_degrees,
        swap_dimensions: matches!(total_degrees, 90 | 270),
    }
}
