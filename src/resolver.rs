//! Style resolution: turns the static [`Theme`] tables plus a live
//! [`Viewport`] into concrete per-element styles.
//!
//! Resolution is pure and synchronous. Every failure path degrades to the
//! unadjusted base value: missing configuration yields an empty style,
//! values that fail unit extraction pass through untouched, and an unknown
//! bucket uses the device default profile. Nothing in here panics or
//! returns an error.

use crate::responsive::{DeviceClass, RatioSet, classify};
use crate::screen::Viewport;
use crate::style::{ResolvedStyle, StyleProp, StyleValue, TransformOp};
use crate::theme::{PositionDelta, Theme};
use crate::unit::{CssLength, is_identity};

/// Which parts of a base style the aspect-ratio adjustment may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustOptions {
    pub font_size: bool,
    pub width: bool,
    pub height: bool,
}

impl AdjustOptions {
    /// Image elements: size is adjusted, text is not.
    pub const IMAGE: AdjustOptions = AdjustOptions {
        font_size: false,
        width: true,
        height: true,
    };

    /// Text blocks such as the countdown: only the font scales.
    pub const TEXT: AdjustOptions = AdjustOptions {
        font_size: true,
        width: false,
        height: false,
    };
}

// 16:10 desktop compresses vertically hard enough that stretched images
// overflow their boxes; those buckets get letterboxed instead.
const CONTAIN_FIT: RatioSet = RatioSet::R16X10;

/// Resolves the style for a named image element.
///
/// Returns an empty style when the element has no configuration for this
/// device; absent configuration means "nothing to render", not an error.
pub fn image_style(
    theme: &Theme,
    name: &str,
    class: DeviceClass,
    viewport: Viewport,
) -> ResolvedStyle {
    let Some(config) = theme.element(name, class) else {
        return ResolvedStyle::new();
    };

    let mut style = ResolvedStyle::new();
    style.set(StyleProp::ZIndex, config.z_index);

    // Rotation composes before the extra scale factor.
    if config.rotation != 0.0 {
        style.push_transform(TransformOp::Rotate(config.rotation));
    }
    if let Some(scale) = config.scale {
        style.push_transform(TransformOp::Scale(scale));
    }

    style.set(StyleProp::Width, config.width.clone());
    // Height stays automatic so the image keeps its intrinsic ratio.
    style.set(StyleProp::Height, "auto");
    if let Some(min_width) = &config.min_width {
        style.set(StyleProp::MinWidth, min_width.clone());
    }
    if let Some(max_width) = &config.max_width {
        style.set(StyleProp::MaxWidth, max_width.clone());
    }

    for (edge, value) in &config.position {
        style.set(edge.prop(), value.clone());
    }

    apply_aspect_adjustment(&style, theme, class, viewport, AdjustOptions::IMAGE)
}

/// Resolves the countdown text block style.
pub fn countdown_style(theme: &Theme, class: DeviceClass, viewport: Viewport) -> ResolvedStyle {
    let config = &theme.device(class).countdown;

    let mut style = ResolvedStyle::new();
    style.set(StyleProp::Position, "absolute");
    for (edge, value) in &config.position {
        style.set(edge.prop(), value.clone());
    }
    style.set(StyleProp::Transform, config.transform.clone());
    style.set(StyleProp::ZIndex, config.z_index);
    style.set(
        StyleProp::FontSize,
        CssLength::Clamp(
            Box::new(config.min_font_size.clone()),
            Box::new(config.font_size.clone()),
            Box::new(config.max_font_size.clone()),
        ),
    );
    style.set(StyleProp::FontWeight, config.font_weight);
    style.set(StyleProp::Color, crate::theme::css_color(config.color));
    style.set(StyleProp::TextShadow, config.text_shadow.to_string());
    style.set(StyleProp::FontFamily, theme.font.font_family());
    style.set(StyleProp::UserSelect, "none");
    style.set(StyleProp::PointerEvents, "none");

    apply_aspect_adjustment(&style, theme, class, viewport, AdjustOptions::TEXT)
}

/// Applies the active bucket's adjustment profile to a base style.
///
/// The input is never mutated; a fresh style comes back. Identity
/// multipliers are no-ops (with a tolerance, so float noise in the tables
/// cannot re-enable them).
pub fn apply_aspect_adjustment(
    base: &ResolvedStyle,
    theme: &Theme,
    class: DeviceClass,
    viewport: Viewport,
    options: AdjustOptions,
) -> ResolvedStyle {
    let ratio = classify(viewport.width, viewport.height);
    let Some(profile) = theme.profile(class, ratio) else {
        return base.clone();
    };

    let mut style = base.clone();

    if options.font_size && !is_identity(profile.font_size) {
        if let Some(StyleValue::Length(font_size)) = style.get(StyleProp::FontSize) {
            if let Some(adjusted) = adjust_font_size(font_size, profile.font_size) {
                style.set(StyleProp::FontSize, adjusted);
            }
        }
    }

    if options.width && !is_identity(profile.width) {
        if let Some(StyleValue::Length(width)) = style.get(StyleProp::Width) {
            if width.is_viewport_relative() {
                let adjusted = width.scaled(profile.width);
                style.set(StyleProp::Width, adjusted);
            }
        }
    }

    if options.height && !is_identity(profile.height) {
        style.push_transform(TransformOp::ScaleY(profile.height));
        if CONTAIN_FIT.contains(ratio) && class == DeviceClass::Desktop {
            style.set(StyleProp::ObjectFit, "contain");
            style.set(StyleProp::ObjectPosition, "center");
        }
    }

    for (edge, delta) in &profile.position {
        if matches!(delta, PositionDelta::Pct(v) if *v == 0.0) {
            continue;
        }
        let prop = edge.prop();
        let base_pct = match style.get(prop) {
            Some(StyleValue::Length(CssLength::Pct(v))) => Some(*v),
            _ => None,
        };
        match (base_pct, delta) {
            (Some(current), delta) => {
                if let Some(amount) = delta.numeric() {
                    style.set(prop, CssLength::Pct(current + amount));
                }
            }
            (None, PositionDelta::Literal(value)) => {
                style.set(prop, value.as_str());
            }
            (None, PositionDelta::Pct(_)) => {}
        }
    }

    style
}

/// The `preferred` term of a `clamp()` is rescaled only when it is
/// viewport-relative; a bare length is rescaled whatever its unit. Raw
/// values fail unit extraction and are left alone.
fn adjust_font_size(font_size: &CssLength, factor: f64) -> Option<CssLength> {
    match font_size {
        CssLength::Clamp(min, preferred, max) => {
            let adjusted = if preferred.is_viewport_relative() {
                Box::new(preferred.scaled(factor))
            } else {
                preferred.clone()
            };
            Some(CssLength::Clamp(min.clone(), adjusted, max.clone()))
        }
        CssLength::Raw(_) => None,
        other => Some(other.scaled(factor)),
    }
}

/// Computes the density/resolution scale factor for an element.
///
/// High-density screens shrink slightly, low-density screens grow; very
/// wide screens shrink again on top. Pure and deterministic.
pub fn compute_scale(
    base_scale: f64,
    pixel_ratio: f64,
    screen_width: f64,
    user_scale: Option<f64>,
) -> f64 {
    let mut factor = 1.0;

    if pixel_ratio >= 2.0 {
        factor *= 0.8;
    } else if pixel_ratio <= 1.25 {
        factor *= 1.1;
    }

    if screen_width >= 2560.0 {
        factor *= 0.9;
    } else if screen_width >= 1920.0 {
        factor *= 0.95;
    }

    if let Some(user_scale) = user_scale {
        factor *= user_scale;
    }

    factor * base_scale
}

#[cfg(test)]
mod tests {
    use super::{AdjustOptions, apply_aspect_adjustment, compute_scale, countdown_style, image_style};
    use crate::responsive::DeviceClass;
    use crate::screen::Viewport;
    use crate::style::{ResolvedStyle, StyleProp};
    use crate::theme::Theme;
    use crate::unit::CssLength;

    // 1920x1080 classifies as 16:9, whose profile is the identity.
    const WIDE: Viewport = Viewport {
        width: 1920.0,
        height: 1080.0,
        pixel_ratio: 1.0,
    };
    // 1920x1200 classifies as 16:10.
    const WIDE_TALL: Viewport = Viewport {
        width: 1920.0,
        height: 1200.0,
        pixel_ratio: 1.0,
    };
    // 3440x1440 classifies as 21:9.
    const ULTRAWIDE: Viewport = Viewport {
        width: 3440.0,
        height: 1440.0,
        pixel_ratio: 1.0,
    };

    #[test]
    fn missing_element_resolves_empty() {
        let theme = Theme::default();
        let style = image_style(&theme, "nonexistent", DeviceClass::Desktop, WIDE);
        assert!(style.is_empty());
        let style = image_style(&theme, "logo", DeviceClass::Mobile, WIDE);
        assert!(style.is_empty());
    }

    #[test]
    fn image_base_style_on_identity_bucket() {
        let theme = Theme::default();
        let style = image_style(&theme, "muyang", DeviceClass::Desktop, WIDE);
        assert_eq!(
            style.render(StyleProp::Transform).unwrap(),
            "rotate(20deg) scale(4.5)"
        );
        assert_eq!(style.render(StyleProp::Width).unwrap(), "25vw");
        assert_eq!(style.render(StyleProp::Height).unwrap(), "auto");
        assert_eq!(style.render(StyleProp::MinWidth).unwrap(), "300px");
        assert_eq!(style.render(StyleProp::MaxWidth).unwrap(), "600px");
        assert_eq!(style.render(StyleProp::ZIndex).unwrap(), "1");
        assert_eq!(style.render(StyleProp::Top).unwrap(), "70%");
        assert_eq!(style.render(StyleProp::Left).unwrap(), "45%");
    }

    #[test]
    fn rotation_zero_is_omitted_from_transform() {
        let theme = Theme::default();
        let style = image_style(&theme, "logo", DeviceClass::Desktop, WIDE);
        assert_eq!(style.render(StyleProp::Transform).unwrap(), "scale(1.4)");
    }

    #[test]
    fn width_adjustment_is_multiplicative_and_unit_preserving() {
        let theme = Theme::default();
        // 16:10 desktop: width x0.9 -> 25vw becomes 22.5vw.
        let style = image_style(&theme, "muyang", DeviceClass::Desktop, WIDE_TALL);
        assert_eq!(style.render(StyleProp::Width).unwrap(), "22.5vw");
        // min/max clamps are absolute and untouched.
        assert_eq!(style.render(StyleProp::MinWidth).unwrap(), "300px");
    }

    #[test]
    fn height_adjustment_appends_scale_y() {
        let theme = Theme::default();
        let style = image_style(&theme, "muyang", DeviceClass::Desktop, WIDE_TALL);
        assert_eq!(
            style.render(StyleProp::Transform).unwrap(),
            "rotate(20deg) scale(4.5) scaleY(1.1)"
        );
    }

    #[test]
    fn wide_tall_desktop_gets_contain_fit() {
        let theme = Theme::default();
        let style = image_style(&theme, "muyang", DeviceClass::Desktop, WIDE_TALL);
        assert_eq!(style.render(StyleProp::ObjectFit).unwrap(), "contain");
        assert_eq!(style.render(StyleProp::ObjectPosition).unwrap(), "center");
        // Other buckets don't letterbox.
        let style = image_style(&theme, "muyang", DeviceClass::Desktop, ULTRAWIDE);
        assert!(style.get(StyleProp::ObjectFit).is_none());
    }

    #[test]
    fn position_adjustment_adds_onto_percentages() {
        let theme = Theme::default();
        // 21:9: top +1%, left +5% on top of 70%/45%.
        let style = image_style(&theme, "muyang", DeviceClass::Desktop, ULTRAWIDE);
        assert_eq!(style.render(StyleProp::Top).unwrap(), "71%");
        assert_eq!(style.render(StyleProp::Left).unwrap(), "50%");
    }

    #[test]
    fn literal_adjustment_overwrites_non_percentage_edges() {
        let theme = Theme::default();
        let base = ResolvedStyle::new()
            .with(StyleProp::Width, CssLength::Vw(10.0))
            .with(StyleProp::Top, "auto");
        let style = apply_aspect_adjustment(
            &base,
            &theme,
            DeviceClass::Desktop,
            ULTRAWIDE,
            AdjustOptions::IMAGE,
        );
        assert_eq!(style.render(StyleProp::Top).unwrap(), "1%");
        // The 21:9 left delta is a literal too, and left was absent.
        assert_eq!(style.render(StyleProp::Left).unwrap(), "5%");
    }

    #[test]
    fn identity_profile_is_a_no_op() {
        let theme = Theme::default();
        let base = ResolvedStyle::new()
            .with(StyleProp::Width, CssLength::Vw(25.0))
            .with(StyleProp::Top, CssLength::Pct(70.0))
            .with(StyleProp::FontSize, CssLength::parse("clamp(1rem, 2vw, 3rem)"));
        let adjusted = apply_aspect_adjustment(
            &base,
            &theme,
            DeviceClass::Desktop,
            WIDE,
            AdjustOptions {
                font_size: true,
                width: true,
                height: true,
            },
        );
        assert_eq!(adjusted, base);
    }

    #[test]
    fn countdown_clamp_rescales_only_the_preferred_term() {
        let theme = Theme::default();
        let base = countdown_style(&theme, DeviceClass::Desktop, WIDE);
        assert_eq!(
            base.render(StyleProp::FontSize).unwrap(),
            "clamp(1.5rem, 3vw, 4rem)"
        );
        // 21:9 scales the font by 1.1.
        let adjusted = countdown_style(&theme, DeviceClass::Desktop, ULTRAWIDE);
        assert_eq!(
            adjusted.render(StyleProp::FontSize).unwrap(),
            "clamp(1.5rem, 3.3vw, 4rem)"
        );
        // Width/height options are off for text: the transform is untouched.
        assert_eq!(
            adjusted.render(StyleProp::Transform).unwrap(),
            "translateX(-50%)"
        );
    }

    #[test]
    fn countdown_carries_fixed_text_attributes() {
        let theme = Theme::default();
        let style = countdown_style(&theme, DeviceClass::Desktop, WIDE);
        assert_eq!(style.render(StyleProp::Position).unwrap(), "absolute");
        assert_eq!(style.render(StyleProp::Color).unwrap(), "#FFFFFF");
        assert_eq!(
            style.render(StyleProp::TextShadow).unwrap(),
            "2px 2px 4px rgba(0,0,0,0.5)"
        );
        assert_eq!(style.render(StyleProp::FontWeight).unwrap(), "bold");
        assert_eq!(style.render(StyleProp::UserSelect).unwrap(), "none");
    }

    #[test]
    fn malformed_sizes_pass_through_unchanged() {
        let theme = Theme::default();
        let base = ResolvedStyle::new()
            .with(StyleProp::Width, CssLength::Raw("calc(100% - 2rem)".into()))
            .with(StyleProp::FontSize, CssLength::Raw("smallish".into()));
        let adjusted = apply_aspect_adjustment(
            &base,
            &theme,
            DeviceClass::Desktop,
            ULTRAWIDE,
            AdjustOptions {
                font_size: true,
                width: true,
                height: false,
            },
        );
        assert_eq!(
            adjusted.render(StyleProp::Width).unwrap(),
            "calc(100% - 2rem)"
        );
        assert_eq!(adjusted.render(StyleProp::FontSize).unwrap(), "smallish");
    }

    #[test]
    fn non_viewport_width_is_not_rescaled() {
        let theme = Theme::default();
        let base = ResolvedStyle::new().with(StyleProp::Width, CssLength::Px(200.0));
        let adjusted = apply_aspect_adjustment(
            &base,
            &theme,
            DeviceClass::Desktop,
            ULTRAWIDE,
            AdjustOptions::IMAGE,
        );
        assert_eq!(adjusted.render(StyleProp::Width).unwrap(), "200px");
    }

    #[test]
    fn mobile_buckets_adjust_all_three_edges() {
        let theme = Theme::default();
        // 390x844 is ratio ~0.462 -> 9:19.5 (width x0.85, edges 3%).
        let notched = Viewport::new(390.0, 844.0);
        let style = image_style(&theme, "xingyu", DeviceClass::Mobile, notched);
        assert_eq!(style.render(StyleProp::Width).unwrap(), "29.75vw");
        assert_eq!(style.render(StyleProp::Top).unwrap(), "18%");
        assert_eq!(style.render(StyleProp::Right).unwrap(), "8%");
        assert_eq!(
            style.render(StyleProp::Transform).unwrap(),
            "rotate(-8deg) scaleY(1.15)"
        );
        // Mobile never letterboxes.
        assert!(style.get(StyleProp::ObjectFit).is_none());
    }

    #[test]
    fn scale_for_high_density_screen() {
        assert_eq!(compute_scale(1.0, 2.0, 1024.0, None), 0.8);
    }

    #[test]
    fn scale_combines_density_width_and_user_factor() {
        // Low density grows, wide screen shrinks.
        let scale = compute_scale(2.0, 1.0, 2560.0, None);
        assert!((scale - 2.0 * 1.1 * 0.9).abs() < 1e-9);
        let scale = compute_scale(1.0, 1.5, 1920.0, Some(0.5));
        assert!((scale - 0.95 * 0.5).abs() < 1e-9);
        // Mid-density, narrow screen: nothing applies.
        assert_eq!(compute_scale(1.4, 1.5, 1024.0, None), 1.4);
    }
}
