pub mod contrast;
pub mod saturation;
pub mod sepia;
pub mod tint;
pub mod traits;

use image::RgbImage;
use std::fmt;

use contrast::HighContrast;
use saturation::Vibrant;
use sepia::Sepia;
use tint::BlueTint;
use traits::FrameFilter;

/// Identity transform.
pub struct Passthrough;

impl FrameFilter for Passthrough {
    fn apply(&self, _frame: &mut RgbImage) {}

    fn name(&self) -> &str {
        "passthrough"
    }
}

/// The filter selected by clients.
///
/// Only the exact names the web client sends are recognised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterKind {
    #[default]
    None,
    /// Cool blue tint.
    Sunglasses,
    /// Warm sepia tone.
    DogEars,
    /// High contrast.
    CatEars,
    /// Vibrant saturation.
    PartyHat,
}

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::None,
        FilterKind::Sunglasses,
        FilterKind::DogEars,
        FilterKind::CatEars,
        FilterKind::PartyHat,
    ];

    /// Exact, case-sensitive match against the wire names.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Self::None),
            "sunglasses" => Some(Self::Sunglasses),
            "dog_ears" => Some(Self::DogEars),
            "cat_ears" => Some(Self::CatEars),
            "party_hat" => Some(Self::PartyHat),
            _ => None,
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sunglasses => "sunglasses",
            Self::DogEars => "dog_ears",
            Self::CatEars => "cat_ears",
            Self::PartyHat => "party_hat",
        }
    }

    pub fn filter(self) -> &'static dyn FrameFilter {
        match self {
            Self::None => &Passthrough,
            Self::Sunglasses => &BlueTint,
            Self::DogEars => &Sepia,
            Self::CatEars => &HighContrast,
            Self::PartyHat => &Vibrant,
        }
    }

    pub fn apply(self, frame: &mut RgbImage) {
        self.filter().apply(frame);
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn wire_names_round_trip() {
        for kind in FilterKind::ALL {
            assert_eq!(FilterKind::parse(kind.wire_name()), Some(kind));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(FilterKind::parse("grayscale"), None);
        assert_eq!(FilterKind::parse("sepia"), None);
        assert_eq!(FilterKind::parse("tint"), None);
        assert_eq!(FilterKind::parse("Dog_Ears"), None);
        assert_eq!(FilterKind::parse(""), None);
        assert_eq!(FilterKind::default(), FilterKind::None);
    }

    #[test]
    fn none_leaves_frame_untouched() {
        let original = RgbImage::from_fn(4, 4, |x, y| Rgb([x as u8 * 40, y as u8 * 40, 99]));
        let mut frame = original.clone();
        FilterKind::None.apply(&mut frame);
        assert_eq!(frame, original);
    }

    #[test]
    fn every_other_filter_changes_a_coloured_frame() {
        let original = RgbImage::from_pixel(2, 2, Rgb([120, 80, 60]));
        for kind in &FilterKind::ALL[1..] {
            let mut frame = original.clone();
            kind.apply(&mut frame);
            assert_ne!(frame, original, "{kind} did nothing");
        }
    }
}
