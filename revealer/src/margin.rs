use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::{Band, Viewport};

/// A single CSS-style margin length.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Length {
    Px(f64),
    /// Percentage of the viewport extent along the scroll axis.
    Percent(f64),
}

impl Length {
    pub fn resolve(self, reference: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => reference * p / 100.0,
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

impl FromStr for Length {
    type Err = ParseMarginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ParseMarginError::InvalidLength(s.to_string());
        if let Some(num) = s.strip_suffix('%') {
            return num.parse().map(Self::Percent).map_err(|_| invalid());
        }
        if let Some(num) = s.strip_suffix("px") {
            return num.parse().map(Self::Px).map_err(|_| invalid());
        }
        // Unitless lengths are only valid as zero.
        match s.parse::<f64>() {
            Ok(v) if v == 0.0 => Ok(Self::Px(0.0)),
            _ => Err(invalid()),
        }
    }
}

/// Grows (positive) or shrinks (negative) the intersection root on each side.
///
/// Mirrors the CSS margin shorthand accepted by the platform's intersection observer, e.g.
/// `"-35% 0px -45% 0px"`. Only `top`/`bottom` affect the scroll axis; `left`/`right` are kept
/// so the value round-trips to the platform unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl RootMargin {
    pub const ZERO: Self = Self {
        top: Length::Px(0.0),
        right: Length::Px(0.0),
        bottom: Length::Px(0.0),
        left: Length::Px(0.0),
    };

    /// A margin that only adjusts the scroll axis.
    pub fn vertical(top: Length, bottom: Length) -> Self {
        Self {
            top,
            bottom,
            ..Self::ZERO
        }
    }

    /// The document region a viewport covers once this margin is applied.
    pub fn band(&self, viewport: &Viewport) -> Band {
        Band {
            start: viewport.scroll_offset - self.top.resolve(viewport.height),
            end: viewport.end() + self.bottom.resolve(viewport.height),
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl FromStr for RootMargin {
    type Err = ParseMarginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = [Length::default(); 4];
        let mut n = 0usize;
        for part in s.split_whitespace() {
            if n == values.len() {
                return Err(ParseMarginError::TooManyValues);
            }
            values[n] = part.parse()?;
            n += 1;
        }
        let [a, b, c, d] = values;
        match n {
            0 => Err(ParseMarginError::Empty),
            1 => Ok(Self {
                top: a,
                right: a,
                bottom: a,
                left: a,
            }),
            2 => Ok(Self {
                top: a,
                right: b,
                bottom: a,
                left: b,
            }),
            3 => Ok(Self {
                top: a,
                right: b,
                bottom: c,
                left: b,
            }),
            _ => Ok(Self {
                top: a,
                right: b,
                bottom: c,
                left: d,
            }),
        }
    }
}

/// Error returned when a root margin string is not valid CSS margin shorthand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseMarginError {
    Empty,
    TooManyValues,
    InvalidLength(String),
}

impl fmt::Display for ParseMarginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("root margin is empty"),
            Self::TooManyValues => f.write_str("root margin takes at most four values"),
            Self::InvalidLength(s) => write!(f, "invalid root margin length `{s}`"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseMarginError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tracking_band_margin() {
        let m: RootMargin = "-35% 0px -45% 0px".parse().unwrap();
        assert_eq!(m.top, Length::Percent(-35.0));
        assert_eq!(m.right, Length::Px(0.0));
        assert_eq!(m.bottom, Length::Percent(-45.0));
        assert_eq!(m.left, Length::Px(0.0));
        assert_eq!(m.to_string(), "-35% 0px -45% 0px");
    }

    #[test]
    fn shorthand_expands_like_css() {
        let m: RootMargin = "10px".parse().unwrap();
        assert_eq!(m.bottom, Length::Px(10.0));
        assert_eq!(m.left, Length::Px(10.0));

        let m: RootMargin = "5% 0".parse().unwrap();
        assert_eq!(m.top, Length::Percent(5.0));
        assert_eq!(m.bottom, Length::Percent(5.0));
        assert_eq!(m.right, Length::Px(0.0));

        let m: RootMargin = "1px 2px 3px".parse().unwrap();
        assert_eq!(m.left, Length::Px(2.0));
        assert_eq!(m.bottom, Length::Px(3.0));
    }

    #[test]
    fn rejects_malformed_margins() {
        assert_eq!("".parse::<RootMargin>(), Err(ParseMarginError::Empty));
        assert_eq!(
            "1px 1px 1px 1px 1px".parse::<RootMargin>(),
            Err(ParseMarginError::TooManyValues)
        );
        assert_eq!(
            "12em".parse::<RootMargin>(),
            Err(ParseMarginError::InvalidLength("12em".to_string()))
        );
        assert!("7".parse::<RootMargin>().is_err());
    }

    #[test]
    fn band_shrinks_with_negative_margins() {
        let m = RootMargin::vertical(Length::Percent(-35.0), Length::Percent(-45.0));
        let band = m.band(&Viewport::new(1000.0, 800.0, 5000.0));
        assert_eq!(band.start, 1280.0);
        assert_eq!(band.end, 1440.0);
    }
}
