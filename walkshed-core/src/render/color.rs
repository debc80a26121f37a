//! Category colors for amenity markers

use std::fmt;

/// HSL color: h in degrees, s and l in [0.0, 1.0].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl fmt::Display for Hsl {
    /// Format as CSS HSL:
    ///   hsl({h:.1},{s:.0}%,{l:.0}%)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // normalize hue into [0,360)
        let h = (self.h % 360.0 + 360.0) % 360.0;
        let s = (self.s * 100.0).clamp(0.0, 100.0);
        let l = (self.l * 100.0).clamp(0.0, 100.0);
        write!(f, "hsl({h:.1},{s:.0}%,{l:.0}%)")
    }
}

/// Golden-angle hue step keeps neighbouring categories visually apart.
const HUE_STEP: f64 = 137.508;

/// Color of the `index`-th category.
///
/// Lightness alternates between two bands so that categories whose hues
/// wrap around close to each other stay distinguishable.
pub fn category_color(index: usize) -> Hsl {
    let lightness = if index % 2 == 0 { 0.45 } else { 0.58 };
    Hsl {
        h: (index as f64 * HUE_STEP) % 360.0,
        s: 0.70,
        l: lightness,
    }
}
