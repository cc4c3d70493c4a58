//! Hue effects for NV12 frames
//!
//! All effects work in place on a raw NV12 buffer. The solid modes shift
//! every chroma pair by a fixed delta and never touch luma; Warhol retiles
//! the luma plane into four quadrant copies and then tints each quadrant's
//! chroma over neutral grey.

mod tint;
mod warhol;

pub use tint::tint_chroma;
pub use warhol::{split_quadrants, tint_quadrants, Quadrant};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Hue effect selected for a filter session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HueMode {
    /// Pass frames through untouched
    #[default]
    None,
    /// Warm red tint
    Red,
    /// Green tint
    Green,
    /// Cool blue tint
    Blue,
    /// Four-quadrant pop-art split, one hue per quadrant
    Warhol,
}

impl HueMode {
    /// Whole-plane chroma delta for the solid modes, `None` for the rest
    pub const fn solid_delta(self) -> Option<ChromaDelta> {
        match self {
            HueMode::Red => Some(ChromaDelta::new(-16, 50)),
            HueMode::Green => Some(ChromaDelta::new(-33, -41)),
            HueMode::Blue => Some(ChromaDelta::new(50, -8)),
            HueMode::None | HueMode::Warhol => None,
        }
    }

    /// Lowercase name, as accepted by the CLI and config files
    pub fn display_name(&self) -> &'static str {
        match self {
            HueMode::None => "none",
            HueMode::Red => "red",
            HueMode::Green => "green",
            HueMode::Blue => "blue",
            HueMode::Warhol => "warhol",
        }
    }
}

impl std::fmt::Display for HueMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for HueMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "off" => Ok(HueMode::None),
            "red" => Ok(HueMode::Red),
            "green" => Ok(HueMode::Green),
            "blue" => Ok(HueMode::Blue),
            "warhol" => Ok(HueMode::Warhol),
            _ => Err(Error::UnknownHueMode(s.to_string())),
        }
    }
}

/// Signed adjustment applied to one chroma (U, V) byte pair
///
/// Each component clamps to the valid byte range instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromaDelta {
    /// Delta for the U byte
    pub u: i8,
    /// Delta for the V byte
    pub v: i8,
}

impl ChromaDelta {
    pub const fn new(u: i8, v: i8) -> Self {
        Self { u, v }
    }

    /// Shift one interleaved (U, V) pair, saturating at 0 and 255
    ///
    /// `pair` must hold at least the U and V bytes.
    pub fn apply(self, pair: &mut [u8]) {
        pair[0] = pair[0].saturating_add_signed(self.u);
        pair[1] = pair[1].saturating_add_signed(self.v);
    }
}

/// Apply the selected hue effect to one NV12 frame in place
///
/// `buffer` must hold at least `width * height * 3 / 2` bytes.
/// `HueMode::None` leaves the buffer untouched.
pub fn apply_hue(buffer: &mut [u8], width: u32, height: u32, mode: HueMode) {
    if let Some(delta) = mode.solid_delta() {
        tint::tint_chroma(buffer, width, height, delta);
    } else if mode == HueMode::Warhol {
        warhol::split_quadrants(buffer, width, height);
        warhol::tint_quadrants(buffer, width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_deltas() {
        assert_eq!(HueMode::Red.solid_delta(), Some(ChromaDelta::new(-16, 50)));
        assert_eq!(
            HueMode::Green.solid_delta(),
            Some(ChromaDelta::new(-33, -41))
        );
        assert_eq!(HueMode::Blue.solid_delta(), Some(ChromaDelta::new(50, -8)));
        assert_eq!(HueMode::None.solid_delta(), None);
        assert_eq!(HueMode::Warhol.solid_delta(), None);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("red".parse::<HueMode>().unwrap(), HueMode::Red);
        assert_eq!("WARHOL".parse::<HueMode>().unwrap(), HueMode::Warhol);
        assert_eq!("off".parse::<HueMode>().unwrap(), HueMode::None);
        assert!("magenta".parse::<HueMode>().is_err());
    }

    #[test]
    fn test_mode_display_round_trip() {
        for mode in [
            HueMode::None,
            HueMode::Red,
            HueMode::Green,
            HueMode::Blue,
            HueMode::Warhol,
        ] {
            assert_eq!(mode.to_string().parse::<HueMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_delta_saturates_like_clamp() {
        // Saturating add must agree with clamp(current + delta, 0, 255)
        // across the whole input space
        for current in 0..=255u8 {
            for delta in i8::MIN..=i8::MAX {
                let mut pair = [current, current];
                ChromaDelta::new(delta, delta).apply(&mut pair);
                let expected = (current as i32 + delta as i32).clamp(0, 255) as u8;
                assert_eq!(pair, [expected, expected], "current {current} delta {delta}");
            }
        }
    }

    #[test]
    fn test_apply_hue_none_is_identity() {
        let mut buffer: Vec<u8> = (0..24).collect();
        let original = buffer.clone();
        apply_hue(&mut buffer, 4, 4, HueMode::None);
        assert_eq!(buffer, original);
    }

    #[test]
    fn test_apply_hue_solid_matches_tint() {
        let mut via_mode: Vec<u8> = (0..24).collect();
        let mut via_kernel = via_mode.clone();
        apply_hue(&mut via_mode, 4, 4, HueMode::Red);
        tint_chroma(&mut via_kernel, 4, 4, ChromaDelta::new(-16, 50));
        assert_eq!(via_mode, via_kernel);
    }
}
