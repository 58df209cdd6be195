//! Static page configuration: palette, per-element placement tables, the
//! countdown text block, and the per-bucket adjustment profiles.
//!
//! Loaded once at startup via [`Theme::default`] and never mutated; the
//! resolver only ever borrows it.

use std::fmt;

use peniko::Color;
use rustc_hash::FxHashMap;
use smallvec::{SmallVec, smallvec};
use strum_macros::Display;

use crate::responsive::{AspectRatio, DeviceClass};
use crate::style::{StyleProp, TransformList, TransformOp};
use crate::unit::{CssLength, UnitExt, fmt_coefficient};

/// Renders a color the way an inline-style consumer expects: `#RRGGBB` when
/// opaque, `rgba(r,g,b,a)` otherwise.
pub fn css_color(color: Color) -> String {
    let rgba = color.to_rgba8();
    if rgba.a == 255 {
        format!("#{:02X}{:02X}{:02X}", rgba.r, rgba.g, rgba.b)
    } else {
        let alpha = ((rgba.a as f64 / 255.0) * 100.0).round() / 100.0;
        format!(
            "rgba({},{},{},{})",
            rgba.r,
            rgba.g,
            rgba.b,
            fmt_coefficient(alpha)
        )
    }
}

/// The page color system.
#[derive(Debug, Clone)]
pub struct Palette {
    pub background: Color,
    pub background_secondary: Color,
    pub background_accent: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_highlight: Color,
    pub text_muted: Color,
    pub border: Color,
    pub focus: Color,
    pub shadow: Color,
    pub overlay_light: Color,
    pub overlay_medium: Color,
    pub overlay_background: Color,
    pub dialog_background: Color,
    pub dialog_border: Color,
    pub dialog_shadow: Color,
    pub dialog_text: Color,
}

/// A `text-shadow` value: offset, blur, color.
#[derive(Debug, Clone, Copy)]
pub struct TextShadow {
    pub dx: f64,
    pub dy: f64,
    pub blur: f64,
    pub color: Color,
}

impl fmt::Display for TextShadow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}",
            fmt_coefficient(self.dx),
            fmt_coefficient(self.dy),
            fmt_coefficient(self.blur),
            css_color(self.color)
        )
    }
}

/// The pixel font stack used across the page.
#[derive(Debug, Clone, Copy)]
pub struct FontConfig {
    pub family: &'static str,
    pub fallback: &'static str,
}

impl FontConfig {
    pub fn font_family(&self) -> String {
        format!("\"{}\", {}", self.family, self.fallback)
    }
}

/// An edge a position value attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Edge {
    #[strum(serialize = "top")]
    Top,
    #[strum(serialize = "left")]
    Left,
    #[strum(serialize = "right")]
    Right,
}

impl Edge {
    pub(crate) fn prop(self) -> StyleProp {
        match self {
            Edge::Top => StyleProp::Top,
            Edge::Left => StyleProp::Left,
            Edge::Right => StyleProp::Right,
        }
    }
}

/// A per-edge position adjustment.
///
/// A percentage delta is added onto an edge that is already expressed as a
/// percentage. A literal value overwrites the edge instead when the base is
/// not a percentage (and still acts as a numeric delta when it is).
#[derive(Debug, Clone, PartialEq)]
pub enum PositionDelta {
    Pct(f64),
    Literal(String),
}

impl PositionDelta {
    /// The numeric part of the delta, for adding onto percentage edges.
    pub(crate) fn numeric(&self) -> Option<f64> {
        match self {
            PositionDelta::Pct(v) => Some(*v),
            PositionDelta::Literal(s) => {
                let end = s
                    .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-' && c != '+')
                    .unwrap_or(s.len());
                s[..end].parse().ok()
            }
        }
    }
}

/// Multipliers and offsets applied on top of a base style for one
/// (device, bucket) pair. Multipliers are strictly positive; `1.0` means
/// no adjustment.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentProfile {
    pub font_size: f64,
    pub width: f64,
    pub height: f64,
    pub position: SmallVec<[(Edge, PositionDelta); 3]>,
}

impl AdjustmentProfile {
    pub fn identity() -> Self {
        Self {
            font_size: 1.0,
            width: 1.0,
            height: 1.0,
            position: SmallVec::new(),
        }
    }
}

/// Unadjusted, device-specific placement for one named image.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementConfig {
    pub width: CssLength,
    pub scale: Option<f64>,
    pub min_width: Option<CssLength>,
    pub max_width: Option<CssLength>,
    /// Rotation in degrees, applied before any extra scale.
    pub rotation: f64,
    pub z_index: i32,
    pub position: SmallVec<[(Edge, CssLength); 3]>,
}

/// The countdown text block configuration.
#[derive(Debug, Clone)]
pub struct CountdownConfig {
    /// Preferred size, typically viewport-relative.
    pub font_size: CssLength,
    pub min_font_size: CssLength,
    pub max_font_size: CssLength,
    pub font_weight: &'static str,
    pub color: Color,
    pub text_shadow: TextShadow,
    pub position: SmallVec<[(Edge, CssLength); 2]>,
    pub transform: TransformList,
    pub z_index: i32,
}

/// Page-level layout values.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub max_width: CssLength,
    pub padding: CssLength,
}

/// Everything that varies per device class.
#[derive(Debug, Clone)]
pub struct DeviceTheme {
    pub layout: LayoutConfig,
    pub images: FxHashMap<String, ElementConfig>,
    pub countdown: CountdownConfig,
    pub profiles: FxHashMap<AspectRatio, AdjustmentProfile>,
}

/// The full static configuration table.
#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    pub font: FontConfig,
    pub desktop: DeviceTheme,
    pub mobile: DeviceTheme,
}

impl Theme {
    pub fn device(&self, class: DeviceClass) -> &DeviceTheme {
        match class {
            DeviceClass::Desktop => &self.desktop,
            DeviceClass::Mobile => &self.mobile,
        }
    }

    /// Base config for a named image, or `None` when the element has
    /// nothing to render on this device.
    pub fn element(&self, name: &str, class: DeviceClass) -> Option<&ElementConfig> {
        self.device(class).images.get(name)
    }

    /// The adjustment profile for the given bucket, falling back to the
    /// device's default bucket when the current one has no entry.
    pub fn profile(&self, class: DeviceClass, ratio: AspectRatio) -> Option<&AdjustmentProfile> {
        let device = self.device(class);
        device
            .profiles
            .get(&ratio)
            .or_else(|| device.profiles.get(&class.default_ratio()))
    }
}

impl Default for Theme {
    fn default() -> Self {
        default_theme()
    }
}

fn profile(
    font_size: f64,
    width: f64,
    height: f64,
    position: SmallVec<[(Edge, PositionDelta); 3]>,
) -> AdjustmentProfile {
    AdjustmentProfile {
        font_size,
        width,
        height,
        position,
    }
}

fn literal(s: &str) -> PositionDelta {
    PositionDelta::Literal(s.to_string())
}

/// Builds the default page theme.
pub fn default_theme() -> Theme {
    let palette = Palette {
        background: Color::from_rgb8(0x31, 0x2F, 0x40),
        background_secondary: Color::from_rgb8(0x20, 0x1E, 0x28),
        background_accent: Color::from_rgb8(0x3D, 0x3A, 0x4F),
        text_primary: Color::from_rgb8(0xFF, 0xFF, 0xFF),
        text_secondary: Color::from_rgb8(0x1F, 0x29, 0x37),
        text_highlight: Color::from_rgb8(0x92, 0xD4, 0xB8),
        text_muted: Color::from_rgb8(0x9C, 0xA3, 0xAF),
        border: Color::from_rgb8(0xD1, 0xD5, 0xDB),
        focus: Color::from_rgb8(0x3B, 0x82, 0xF6),
        shadow: Color::BLACK.with_alpha(0.1),
        overlay_light: Color::WHITE.with_alpha(0.8),
        overlay_medium: Color::WHITE.with_alpha(0.9),
        overlay_background: Color::WHITE.with_alpha(0.7),
        dialog_background: Color::from_rgb8(0x31, 0x2F, 0x40).with_alpha(0.95),
        dialog_border: Color::from_rgb8(0xD1, 0xD5, 0xDB),
        dialog_shadow: Color::BLACK.with_alpha(0.4),
        dialog_text: Color::WHITE,
    };

    let font = FontConfig {
        family: "BoutiqueBitmap9x9",
        fallback: "\"Courier New\", \"Consolas\", \"Monaco\", monospace",
    };

    let mut desktop_images = FxHashMap::default();
    desktop_images.insert(
        "logo".to_string(),
        ElementConfig {
            width: 15.0.vw().into(),
            scale: Some(1.4),
            min_width: Some(200.0.px().into()),
            max_width: Some(400.0.px().into()),
            rotation: 0.0,
            z_index: 10,
            position: smallvec![
                (Edge::Top, 32.0.pct().into()),
                (Edge::Left, 17.0.pct().into()),
            ],
        },
    );
    for name in ["muyang", "xingyu"] {
        desktop_images.insert(
            name.to_string(),
            ElementConfig {
                width: 25.0.vw().into(),
                scale: Some(4.5),
                min_width: Some(300.0.px().into()),
                max_width: Some(600.0.px().into()),
                rotation: 20.0,
                z_index: 1,
                position: smallvec![
                    (Edge::Top, 70.0.pct().into()),
                    (Edge::Left, 45.0.pct().into()),
                ],
            },
        );
    }

    let mut desktop_profiles = FxHashMap::default();
    desktop_profiles.insert(
        AspectRatio::R16x9,
        profile(
            1.0,
            1.0,
            1.0,
            smallvec![
                (Edge::Top, PositionDelta::Pct(0.0)),
                (Edge::Left, PositionDelta::Pct(0.0)),
            ],
        ),
    );
    desktop_profiles.insert(
        AspectRatio::R16x10,
        profile(
            0.95,
            0.9,
            1.1,
            smallvec![
                (Edge::Top, literal("2%")),
                (Edge::Left, PositionDelta::Pct(0.0)),
            ],
        ),
    );
    desktop_profiles.insert(
        AspectRatio::R21x9,
        profile(
            1.1,
            1.2,
            0.8,
            smallvec![(Edge::Top, literal("1%")), (Edge::Left, literal("5%"))],
        ),
    );

    let desktop = DeviceTheme {
        layout: LayoutConfig {
            max_width: 64.0.rem().into(),
            padding: 2.5.rem().into(),
        },
        images: desktop_images,
        countdown: CountdownConfig {
            font_size: 3.0.vw().into(),
            min_font_size: 1.5.rem().into(),
            max_font_size: 4.0.rem().into(),
            font_weight: "bold",
            color: Color::WHITE,
            text_shadow: TextShadow {
                dx: 2.0,
                dy: 2.0,
                blur: 4.0,
                color: Color::BLACK.with_alpha(0.5),
            },
            position: smallvec![
                (Edge::Top, 10.0.pct().into()),
                (Edge::Left, 24.0.pct().into()),
            ],
            transform: [TransformOp::TranslateX(CssLength::Pct(-50.0))]
                .into_iter()
                .collect(),
            z_index: 20,
        },
        profiles: desktop_profiles,
    };

    let mut mobile_images = FxHashMap::default();
    mobile_images.insert(
        "muyang".to_string(),
        ElementConfig {
            width: 40.0.vw().into(),
            scale: None,
            min_width: Some(150.0.px().into()),
            max_width: Some(300.0.px().into()),
            rotation: 10.0,
            z_index: 1,
            position: smallvec![
                (Edge::Top, 5.0.pct().into()),
                (Edge::Left, 5.0.pct().into()),
            ],
        },
    );
    mobile_images.insert(
        "xingyu".to_string(),
        ElementConfig {
            width: 35.0.vw().into(),
            scale: None,
            min_width: Some(120.0.px().into()),
            max_width: Some(250.0.px().into()),
            rotation: -8.0,
            z_index: 1,
            position: smallvec![
                (Edge::Top, 15.0.pct().into()),
                (Edge::Right, 5.0.pct().into()),
            ],
        },
    );

    let mut mobile_profiles = FxHashMap::default();
    mobile_profiles.insert(
        AspectRatio::R9x16,
        profile(
            1.0,
            1.0,
            1.0,
            smallvec![
                (Edge::Top, PositionDelta::Pct(0.0)),
                (Edge::Left, PositionDelta::Pct(0.0)),
                (Edge::Right, PositionDelta::Pct(0.0)),
            ],
        ),
    );
    mobile_profiles.insert(
        AspectRatio::R9x18,
        profile(
            0.95,
            0.9,
            1.1,
            smallvec![
                (Edge::Top, literal("2%")),
                (Edge::Left, literal("2%")),
                (Edge::Right, literal("2%")),
            ],
        ),
    );
    mobile_profiles.insert(
        AspectRatio::R9x19_5,
        profile(
            0.9,
            0.85,
            1.15,
            smallvec![
                (Edge::Top, literal("3%")),
                (Edge::Left, literal("3%")),
                (Edge::Right, literal("3%")),
            ],
        ),
    );
    mobile_profiles.insert(
        AspectRatio::R3x4,
        profile(
            1.1,
            1.2,
            0.8,
            smallvec![
                (Edge::Top, literal("1%")),
                (Edge::Left, literal("-2%")),
                (Edge::Right, literal("-2%")),
            ],
        ),
    );

    let mobile = DeviceTheme {
        layout: LayoutConfig {
            max_width: 100.0.pct().into(),
            padding: 1.25.rem().into(),
        },
        images: mobile_images,
        countdown: CountdownConfig {
            font_size: 6.0.vw().into(),
            min_font_size: 1.0.rem().into(),
            max_font_size: 2.5.rem().into(),
            font_weight: "bold",
            color: Color::WHITE,
            text_shadow: TextShadow {
                dx: 1.0,
                dy: 1.0,
                blur: 2.0,
                color: Color::BLACK.with_alpha(0.7),
            },
            position: smallvec![
                (Edge::Top, 20.0.pct().into()),
                (Edge::Left, 50.0.pct().into()),
            ],
            transform: [TransformOp::TranslateX(CssLength::Pct(-50.0))]
                .into_iter()
                .collect(),
            z_index: 20,
        },
        profiles: mobile_profiles,
    };

    Theme {
        palette,
        font,
        desktop,
        mobile,
    }
}
