//! Approximate visible-spectrum colours for a wavelength.
//!
//! The mapping is a visual aid, not colour science. Outside the visible
//! band it returns fixed dim sentinels so UV and IR never render as black.

use std::fmt;

pub const VISIBLE_MIN_NM: f64 = 380.0;
pub const VISIBLE_MAX_NM: f64 = 780.0;

/// Range covered by the spectrum strip, in nm.
pub const STRIP_MIN_NM: f64 = 300.0;
pub const STRIP_MAX_NM: f64 = 800.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self::new(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Dim violet shown for ultraviolet light.
pub const ULTRAVIOLET: Rgb = Rgb::new(0x1a, 0x00, 0x33);
/// Dim red shown for infrared light.
pub const INFRARED: Rgb = Rgb::new(0x33, 0x00, 0x00);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Ultraviolet,
    Visible,
    Infrared,
}

impl Band {
    /// NaN has no colour and is reported as infrared.
    pub fn of(wavelength_nm: f64) -> Self {
        if wavelength_nm.is_nan() {
            Band::Infrared
        } else if wavelength_nm < VISIBLE_MIN_NM {
            Band::Ultraviolet
        } else if wavelength_nm <= VISIBLE_MAX_NM {
            Band::Visible
        } else {
            Band::Infrared
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Band::Ultraviolet => "ULTRAVIOLET",
            Band::Visible => "VISIBLE",
            Band::Infrared => "INFRARED",
        }
    }
}

pub fn is_invisible(wavelength_nm: f64) -> bool {
    Band::of(wavelength_nm) != Band::Visible
}

// [0, 1] -> [0, 255], rounding half up.
fn channel(unit: f64) -> u8 {
    (unit.clamp(0.0, 1.0) * 255.0 + 0.5).floor() as u8
}

pub fn wavelength_to_rgb(wavelength_nm: f64) -> Rgb {
    let w = wavelength_nm;
    match Band::of(w) {
        Band::Ultraviolet => ULTRAVIOLET,
        Band::Infrared => INFRARED,
        Band::Visible => {
            if w < 440.0 {
                Rgb::from_unit((440.0 - w) / (440.0 - 380.0), 0.0, 1.0)
            } else if w < 490.0 {
                Rgb::from_unit(0.0, (w - 440.0) / (490.0 - 440.0), 1.0)
            } else if w < 510.0 {
                Rgb::from_unit(0.0, 1.0, (510.0 - w) / (510.0 - 490.0))
            } else if w < 580.0 {
                Rgb::from_unit((w - 510.0) / (580.0 - 510.0), 1.0, 0.0)
            } else if w < 645.0 {
                Rgb::from_unit(1.0, (645.0 - w) / (645.0 - 580.0), 0.0)
            } else {
                Rgb::from_unit(1.0, 0.0, 0.0)
            }
        }
    }
}

/// Position of `wavelength_nm` along the 300–800 nm strip, clamped to [0, 1].
pub fn spectrum_marker_position(wavelength_nm: f64) -> f64 {
    ((wavelength_nm - STRIP_MIN_NM) / (STRIP_MAX_NM - STRIP_MIN_NM)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_green_reference() {
        let rgb = wavelength_to_rgb(550.0);
        assert_eq!(rgb, Rgb::new(146, 255, 0));
        assert_eq!(rgb.to_hex(), "#92ff00");
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(wavelength_to_rgb(380.0), Rgb::new(255, 0, 255));
        assert_eq!(wavelength_to_rgb(440.0), Rgb::new(0, 0, 255));
        assert_eq!(wavelength_to_rgb(490.0), Rgb::new(0, 255, 255));
        assert_eq!(wavelength_to_rgb(510.0), Rgb::new(0, 255, 0));
        assert_eq!(wavelength_to_rgb(580.0), Rgb::new(255, 255, 0));
        assert_eq!(wavelength_to_rgb(645.0), Rgb::new(255, 0, 0));
        assert_eq!(wavelength_to_rgb(780.0), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_rounds_half_up() {
        // 465 nm sits halfway up the blue->cyan ramp: 0.5 * 255 = 127.5
        assert_eq!(wavelength_to_rgb(465.0).g, 128);
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(wavelength_to_rgb(300.0), ULTRAVIOLET);
        assert_eq!(wavelength_to_rgb(379.999), ULTRAVIOLET);
        assert_eq!(wavelength_to_rgb(800.0), INFRARED);
        assert_eq!(ULTRAVIOLET.to_hex(), "#1a0033");
        assert_eq!(INFRARED.to_hex(), "#330000");
    }

    #[test]
    fn test_invisible_boundaries() {
        assert!(is_invisible(379.0));
        assert!(!is_invisible(380.0));
        assert!(!is_invisible(780.0));
        assert!(is_invisible(781.0));
    }

    #[test]
    fn test_nan_agrees_with_colour() {
        assert_eq!(Band::of(f64::NAN), Band::Infrared);
        assert_eq!(wavelength_to_rgb(f64::NAN), INFRARED);
        assert!(is_invisible(f64::NAN));
    }

    #[test]
    fn test_marker_position() {
        assert_eq!(spectrum_marker_position(550.0), 0.5);
        assert_eq!(spectrum_marker_position(100.0), 0.0);
        assert_eq!(spectrum_marker_position(5000.0), 1.0);
    }
}
