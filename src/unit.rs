use std::fmt;

/// A pixel value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Px(pub f64);

/// A percent value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pct(pub f64);

/// A viewport-width relative value (`vw`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vw(pub f64);

/// A root-font relative value (`rem`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rem(pub f64);

impl From<f64> for Px {
    fn from(value: f64) -> Self {
        Px(value)
    }
}

impl From<f32> for Px {
    fn from(value: f32) -> Self {
        Px(value as f64)
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Px(value as f64)
    }
}

impl From<f64> for Pct {
    fn from(value: f64) -> Self {
        Pct(value)
    }
}

impl From<i32> for Pct {
    fn from(value: i32) -> Self {
        Pct(value as f64)
    }
}

pub trait UnitExt {
    fn px(self) -> Px;
    fn pct(self) -> Pct;
    fn vw(self) -> Vw;
    fn rem(self) -> Rem;
}

impl UnitExt for f64 {
    fn px(self) -> Px {
        Px(self)
    }

    fn pct(self) -> Pct {
        Pct(self)
    }

    fn vw(self) -> Vw {
        Vw(self)
    }

    fn rem(self) -> Rem {
        Rem(self)
    }
}

impl UnitExt for i32 {
    fn px(self) -> Px {
        Px(self as f64)
    }

    fn pct(self) -> Pct {
        Pct(self as f64)
    }

    fn vw(self) -> Vw {
        Vw(self as f64)
    }

    fn rem(self) -> Rem {
        Rem(self as f64)
    }
}

/// Multipliers this close to `1.0` count as "no adjustment". Comparing with
/// bare `==` would make the identity behavior depend on floating-point noise
/// in the configuration tables.
pub(crate) const IDENTITY_EPS: f64 = 1e-6;

pub(crate) fn is_identity(multiplier: f64) -> bool {
    (multiplier - 1.0).abs() < IDENTITY_EPS
}

/// Formats a coefficient the way inline-style consumers expect: shortest
/// decimal form, with float noise from multiplier chains rounded away
/// (`3.0 * 1.1` renders as `3.3`, not `3.3000000000000003`).
pub(crate) fn fmt_coefficient(value: f64) -> String {
    let rounded = (value * 1e4).round() / 1e4;
    format!("{rounded}")
}

/// A CSS length, parsed into a tagged value before any arithmetic happens.
///
/// Unit-rescaling works on this representation instead of re-deriving string
/// matches at every call site. Anything the parser does not understand is
/// kept as [`CssLength::Raw`] and passes through adjustments untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum CssLength {
    /// Viewport-width relative, e.g. `25vw`
    Vw(f64),
    /// Viewport-height relative, e.g. `40vh`
    Vh(f64),
    /// Absolute pixels, e.g. `200px`
    Px(f64),
    /// Root-font relative, e.g. `1.5rem`
    Rem(f64),
    /// Element-font relative, e.g. `2em`
    Em(f64),
    /// Percentage of the containing block, e.g. `32%`
    Pct(f64),
    /// `clamp(min, preferred, max)`
    Clamp(Box<CssLength>, Box<CssLength>, Box<CssLength>),
    /// Unparsed passthrough (keywords, malformed values)
    Raw(String),
}

impl CssLength {
    /// Parses a CSS length string. Total: values that fail unit extraction
    /// come back as [`CssLength::Raw`] so they can round-trip unchanged.
    pub fn parse(s: &str) -> CssLength {
        let s = s.trim();
        if let Some(inner) = s
            .strip_prefix("clamp(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts: Vec<&str> = inner.split(',').collect();
            if parts.len() == 3 {
                return CssLength::Clamp(
                    Box::new(CssLength::parse(parts[0])),
                    Box::new(CssLength::parse(parts[1])),
                    Box::new(CssLength::parse(parts[2])),
                );
            }
            return CssLength::Raw(s.to_string());
        }

        for (suffix, make) in [
            ("vw", CssLength::Vw as fn(f64) -> CssLength),
            ("vh", CssLength::Vh),
            ("px", CssLength::Px),
            ("rem", CssLength::Rem),
            ("em", CssLength::Em),
            ("%", CssLength::Pct),
        ] {
            if let Some(number) = s.strip_suffix(suffix) {
                if let Ok(value) = number.trim().parse::<f64>() {
                    return make(value);
                }
            }
        }

        CssLength::Raw(s.to_string())
    }

    /// Whether this value depends on the viewport width and therefore takes
    /// part in `vw`-coefficient rescaling.
    pub fn is_viewport_relative(&self) -> bool {
        matches!(self, CssLength::Vw(_))
    }

    /// Multiplies the numeric coefficient, preserving the unit. `Clamp` and
    /// `Raw` values are returned unchanged; the resolver handles clamp
    /// rescaling itself because only the preferred term participates.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> CssLength {
        match self {
            CssLength::Vw(v) => CssLength::Vw(v * factor),
            CssLength::Vh(v) => CssLength::Vh(v * factor),
            CssLength::Px(v) => CssLength::Px(v * factor),
            CssLength::Rem(v) => CssLength::Rem(v * factor),
            CssLength::Em(v) => CssLength::Em(v * factor),
            CssLength::Pct(v) => CssLength::Pct(v * factor),
            CssLength::Clamp(..) | CssLength::Raw(_) => self.clone(),
        }
    }
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssLength::Vw(v) => write!(f, "{}vw", fmt_coefficient(*v)),
            CssLength::Vh(v) => write!(f, "{}vh", fmt_coefficient(*v)),
            CssLength::Px(v) => write!(f, "{}px", fmt_coefficient(*v)),
            CssLength::Rem(v) => write!(f, "{}rem", fmt_coefficient(*v)),
            CssLength::Em(v) => write!(f, "{}em", fmt_coefficient(*v)),
            CssLength::Pct(v) => write!(f, "{}%", fmt_coefficient(*v)),
            CssLength::Clamp(min, preferred, max) => {
                write!(f, "clamp({min}, {preferred}, {max})")
            }
            CssLength::Raw(s) => f.write_str(s),
        }
    }
}

impl From<Vw> for CssLength {
    fn from(value: Vw) -> Self {
        CssLength::Vw(value.0)
    }
}

impl From<Px> for CssLength {
    fn from(value: Px) -> Self {
        CssLength::Px(value.0)
    }
}

impl From<Rem> for CssLength {
    fn from(value: Rem) -> Self {
        CssLength::Rem(value.0)
    }
}

impl From<Pct> for CssLength {
    fn from(value: Pct) -> Self {
        CssLength::Pct(value.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{CssLength, UnitExt, fmt_coefficient, is_identity};

    #[test]
    fn parse_simple_units() {
        assert_eq!(CssLength::parse("25vw"), CssLength::Vw(25.0));
        assert_eq!(CssLength::parse("200px"), CssLength::Px(200.0));
        assert_eq!(CssLength::parse("1.5rem"), CssLength::Rem(1.5));
        assert_eq!(CssLength::parse("32%"), CssLength::Pct(32.0));
        assert_eq!(CssLength::parse(" 40vh "), CssLength::Vh(40.0));
    }

    #[test]
    fn parse_clamp() {
        let parsed = CssLength::parse("clamp(1.5rem, 3vw, 4rem)");
        assert_eq!(
            parsed,
            CssLength::Clamp(
                Box::new(CssLength::Rem(1.5)),
                Box::new(CssLength::Vw(3.0)),
                Box::new(CssLength::Rem(4.0)),
            )
        );
        assert_eq!(parsed.to_string(), "clamp(1.5rem, 3vw, 4rem)");
    }

    #[test]
    fn malformed_values_round_trip() {
        for raw in ["auto", "calc(100% - 2rem)", "vw", "12q", "clamp(1px, 2px)"] {
            assert_eq!(CssLength::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn scaled_preserves_unit() {
        assert_eq!(CssLength::Vw(25.0).scaled(0.9).to_string(), "22.5vw");
        assert_eq!(CssLength::Px(200.0).scaled(1.5).to_string(), "300px");
        let raw = CssLength::Raw("auto".into());
        assert_eq!(raw.scaled(2.0), raw);
    }

    #[test]
    fn coefficient_formatting_rounds_float_noise() {
        assert_eq!(fmt_coefficient(3.0 * 1.1), "3.3");
        assert_eq!(fmt_coefficient(25.0), "25");
        assert_eq!(fmt_coefficient(-2.0), "-2");
    }

    #[test]
    fn identity_tolerates_float_noise() {
        assert!(is_identity(1.0));
        assert!(is_identity(0.9999999));
        assert!(!is_identity(0.95));
    }

    #[test]
    fn unit_ext() {
        assert_eq!(CssLength::from(25.0.vw()).to_string(), "25vw");
        assert_eq!(1.5.rem().0, 1.5);
    }
}
