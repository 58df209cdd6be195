//! The computed style value model.
//!
//! A [`ResolvedStyle`] is an ordered map from CSS property name to value,
//! shaped the way a CSS-in-JS or inline-style consumer expects it: numeric
//! `z-index`, string lengths with units, string transforms. It is produced
//! fresh on every resolution call and never cached internally.

use std::fmt;

use indexmap::IndexMap;
use smallvec::SmallVec;
use strum_macros::Display;

use crate::unit::{CssLength, fmt_coefficient};

/// CSS properties the resolver produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StyleProp {
    #[strum(serialize = "position")]
    Position,
    #[strum(serialize = "top")]
    Top,
    #[strum(serialize = "left")]
    Left,
    #[strum(serialize = "right")]
    Right,
    #[strum(serialize = "width")]
    Width,
    #[strum(serialize = "height")]
    Height,
    #[strum(serialize = "min-width")]
    MinWidth,
    #[strum(serialize = "max-width")]
    MaxWidth,
    #[strum(serialize = "transform")]
    Transform,
    #[strum(serialize = "z-index")]
    ZIndex,
    #[strum(serialize = "font-size")]
    FontSize,
    #[strum(serialize = "font-weight")]
    FontWeight,
    #[strum(serialize = "font-family")]
    FontFamily,
    #[strum(serialize = "color")]
    Color,
    #[strum(serialize = "text-shadow")]
    TextShadow,
    #[strum(serialize = "object-fit")]
    ObjectFit,
    #[strum(serialize = "object-position")]
    ObjectPosition,
    #[strum(serialize = "user-select")]
    UserSelect,
    #[strum(serialize = "pointer-events")]
    PointerEvents,
}

/// One entry in a transform list.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOp {
    /// `rotate(<deg>deg)`
    Rotate(f64),
    /// `scale(<factor>)`
    Scale(f64),
    /// `scaleY(<factor>)`
    ScaleY(f64),
    /// `translateX(<length>)`
    TranslateX(CssLength),
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformOp::Rotate(deg) => write!(f, "rotate({}deg)", fmt_coefficient(*deg)),
            TransformOp::Scale(s) => write!(f, "scale({})", fmt_coefficient(*s)),
            TransformOp::ScaleY(s) => write!(f, "scaleY({})", fmt_coefficient(*s)),
            TransformOp::TranslateX(len) => write!(f, "translateX({len})"),
        }
    }
}

/// A composed transform. Ops render space-joined in insertion order, so
/// appending never disturbs what is already there.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformList {
    ops: SmallVec<[TransformOp; 3]>,
}

impl TransformList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: TransformOp) {
        self.ops.push(op);
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }
}

impl fmt::Display for TransformList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

impl FromIterator<TransformOp> for TransformList {
    fn from_iter<T: IntoIterator<Item = TransformOp>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

/// A property value: a bare number, a parsed length, a transform list, or a
/// literal string (keywords, colors, shadows).
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Number(f64),
    Length(CssLength),
    Transform(TransformList),
    Str(String),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => f.write_str(&fmt_coefficient(*n)),
            StyleValue::Length(len) => write!(f, "{len}"),
            StyleValue::Transform(list) => write!(f, "{list}"),
            StyleValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(value as f64)
    }
}

impl From<CssLength> for StyleValue {
    fn from(value: CssLength) -> Self {
        StyleValue::Length(value)
    }
}

impl From<TransformList> for StyleValue {
    fn from(value: TransformList) -> Self {
        StyleValue::Transform(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Str(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Str(value)
    }
}

/// The computed output of a resolution call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedStyle {
    props: IndexMap<StyleProp, StyleValue>,
}

impl ResolvedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn get(&self, prop: StyleProp) -> Option<&StyleValue> {
        self.props.get(&prop)
    }

    pub fn set(&mut self, prop: StyleProp, value: impl Into<StyleValue>) {
        self.props.insert(prop, value.into());
    }

    /// Appends an op to the transform, keeping any existing ops first.
    pub fn push_transform(&mut self, op: TransformOp) {
        match self.props.get_mut(&StyleProp::Transform) {
            Some(StyleValue::Transform(list)) => list.push(op),
            _ => {
                let mut list = TransformList::new();
                list.push(op);
                self.props.insert(StyleProp::Transform, list.into());
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProp, &StyleValue)> {
        self.props.iter().map(|(k, v)| (*k, v))
    }

    /// Renders a property to its CSS string form, if present.
    pub fn render(&self, prop: StyleProp) -> Option<String> {
        self.get(prop).map(|v| v.to_string())
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, prop: StyleProp, value: impl Into<StyleValue>) -> Self {
        self.set(prop, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ResolvedStyle, StyleProp, StyleValue, TransformList, TransformOp};
    use crate::unit::CssLength;

    #[test]
    fn transform_renders_in_insertion_order() {
        let list: TransformList = [TransformOp::Rotate(20.0), TransformOp::Scale(4.5)]
            .into_iter()
            .collect();
        assert_eq!(list.to_string(), "rotate(20deg) scale(4.5)");
    }

    #[test]
    fn push_transform_appends_never_replaces() {
        let mut style = ResolvedStyle::new();
        style.push_transform(TransformOp::Rotate(20.0));
        style.push_transform(TransformOp::Scale(4.5));
        style.push_transform(TransformOp::ScaleY(0.8));
        assert_eq!(
            style.render(StyleProp::Transform).unwrap(),
            "rotate(20deg) scale(4.5) scaleY(0.8)"
        );
    }

    #[test]
    fn push_transform_creates_when_absent() {
        let mut style = ResolvedStyle::new();
        style.push_transform(TransformOp::ScaleY(1.1));
        assert_eq!(style.render(StyleProp::Transform).unwrap(), "scaleY(1.1)");
    }

    #[test]
    fn property_order_is_stable() {
        let style = ResolvedStyle::new()
            .with(StyleProp::ZIndex, 10)
            .with(StyleProp::Width, CssLength::Vw(15.0))
            .with(StyleProp::Height, "auto");
        let props: Vec<StyleProp> = style.iter().map(|(p, _)| p).collect();
        assert_eq!(
            props,
            vec![StyleProp::ZIndex, StyleProp::Width, StyleProp::Height]
        );
    }

    #[test]
    fn values_render_as_css() {
        assert_eq!(StyleValue::from(20).to_string(), "20");
        assert_eq!(StyleValue::from(CssLength::Vw(22.5)).to_string(), "22.5vw");
        assert_eq!(StyleValue::from("auto").to_string(), "auto");
        assert_eq!(StyleProp::ZIndex.to_string(), "z-index");
        assert_eq!(StyleProp::ObjectFit.to_string(), "object-fit");
    }

    #[test]
    fn translate_x_renders_percent() {
        let op = TransformOp::TranslateX(CssLength::Pct(-50.0));
        assert_eq!(op.to_string(), "translateX(-50%)");
    }
}
