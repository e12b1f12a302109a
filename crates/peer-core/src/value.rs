//! Attribute values as seen by the reconciliation layer.
//!
//! Every value handed to a fluent setter is resolved once into the closed
//! [`AttrValue`] union. Diffing and apply logic downstream only ever match on
//! the variant; nothing re-inspects the shape of a value after staging.

use std::fmt;

/// Reference into an application resource table (colors, dimensions,
/// strings, media).
///
/// Two references are the same resource when every field matches. A
/// reference never compares equal to a literal, even when the literal happens
/// to be what the resource resolves to.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceRef {
    pub id: i64,
    pub kind: i32,
    pub bundle_name: String,
    pub module_name: String,
    pub params: Vec<Field>,
}

impl ResourceRef {
    pub fn new(id: i64, kind: i32) -> Self {
        Self {
            id,
            kind,
            bundle_name: String::new(),
            module_name: String::new(),
            params: Vec::new(),
        }
    }

    pub fn in_module(mut self, bundle_name: impl Into<String>, module_name: impl Into<String>) -> Self {
        self.bundle_name = bundle_name.into();
        self.module_name = module_name.into();
        self
    }

    pub fn with_param(mut self, param: impl Into<Field>) -> Self {
        self.params.push(param.into());
        self
    }
}

/// ARGB color literal, passed to the native side as a single number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0x0000_0000);
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const RED: Color = Color(0xFFFF_0000);
    pub const GREEN: Color = Color(0xFF00_FF00);
    pub const BLUE: Color = Color(0xFF00_00FF);
    pub const GRAY: Color = Color(0xFF80_8080);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }
}

/// One positional field of a value as it crosses the native boundary.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Field {
    #[default]
    Absent,
    Number(f64),
    Str(String),
    Bool(bool),
    Resource(ResourceRef),
}

impl Field {
    /// Field-level diff used by every composite value.
    pub fn differs(&self, other: &Field) -> bool {
        match (self, other) {
            (Field::Resource(lhs), Field::Resource(rhs)) => lhs != rhs,
            (Field::Resource(_), _) | (_, Field::Resource(_)) => true,
            (lhs, rhs) => lhs != rhs,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Field::Resource(_))
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Field::Number(value)
    }
}

impl From<f32> for Field {
    fn from(value: f32) -> Self {
        Field::Number(value as f64)
    }
}

impl From<i32> for Field {
    fn from(value: i32) -> Self {
        Field::Number(value as f64)
    }
}

impl From<u32> for Field {
    fn from(value: u32) -> Self {
        Field::Number(value as f64)
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Field::Bool(value)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Str(value.to_owned())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::Str(value)
    }
}

impl From<ResourceRef> for Field {
    fn from(value: ResourceRef) -> Self {
        Field::Resource(value)
    }
}

impl From<Color> for Field {
    fn from(value: Color) -> Self {
        Field::Number(value.0 as f64)
    }
}

impl<T: Into<Field>> From<Option<T>> for Field {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Field::Absent)
    }
}

/// Four independent sides, in native order: top, right, bottom, left.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Edges {
    pub top: Field,
    pub right: Field,
    pub bottom: Field,
    pub left: Field,
}

impl Edges {
    pub fn new(
        top: impl Into<Field>,
        right: impl Into<Field>,
        bottom: impl Into<Field>,
        left: impl Into<Field>,
    ) -> Self {
        Self {
            top: top.into(),
            right: right.into(),
            bottom: bottom.into(),
            left: left.into(),
        }
    }

    pub fn all(value: impl Into<Field>) -> Self {
        let value = value.into();
        Self {
            top: value.clone(),
            right: value.clone(),
            bottom: value.clone(),
            left: value,
        }
    }

    pub fn symmetric(vertical: impl Into<Field>, horizontal: impl Into<Field>) -> Self {
        let vertical = vertical.into();
        let horizontal = horizontal.into();
        Self {
            top: vertical.clone(),
            right: horizontal.clone(),
            bottom: vertical,
            left: horizontal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct SizeValue {
    pub width: Field,
    pub height: Field,
}

impl SizeValue {
    pub fn new(width: impl Into<Field>, height: impl Into<Field>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Border {
    pub width: Field,
    pub color: Field,
    pub radius: Field,
    pub style: Field,
}

impl Border {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: impl Into<Field>) -> Self {
        self.width = width.into();
        self
    }

    pub fn color(mut self, color: impl Into<Field>) -> Self {
        self.color = color.into();
        self
    }

    pub fn radius(mut self, radius: impl Into<Field>) -> Self {
        self.radius = radius.into();
        self
    }

    pub fn style(mut self, style: impl Into<Field>) -> Self {
        self.style = style.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Shadow {
    pub radius: Field,
    pub kind: Field,
    pub color: Field,
    pub offset_x: Field,
    pub offset_y: Field,
    pub fill: Field,
}

impl Shadow {
    pub fn new(radius: impl Into<Field>) -> Self {
        Self {
            radius: radius.into(),
            ..Self::default()
        }
    }

    pub fn color(mut self, color: impl Into<Field>) -> Self {
        self.color = color.into();
        self
    }

    pub fn offset(mut self, x: impl Into<Field>, y: impl Into<Field>) -> Self {
        self.offset_x = x.into();
        self.offset_y = y.into();
        self
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = Field::Bool(fill);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Font {
    pub size: Field,
    pub weight: Field,
    pub family: Field,
    pub style: Field,
}

impl Font {
    pub fn new(size: impl Into<Field>) -> Self {
        Self {
            size: size.into(),
            ..Self::default()
        }
    }

    pub fn weight(mut self, weight: impl Into<Field>) -> Self {
        self.weight = weight.into();
        self
    }

    pub fn family(mut self, family: impl Into<Field>) -> Self {
        self.family = family.into();
        self
    }

    pub fn style(mut self, style: impl Into<Field>) -> Self {
        self.style = style.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Decoration {
    pub kind: Field,
    pub color: Field,
    pub style: Field,
}

impl Decoration {
    pub fn new(kind: impl Into<Field>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn color(mut self, color: impl Into<Field>) -> Self {
        self.color = color.into();
        self
    }

    pub fn style(mut self, style: impl Into<Field>) -> Self {
        self.style = style.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Divider {
    pub stroke_width: Field,
    pub color: Field,
    pub start_margin: Field,
    pub end_margin: Field,
}

impl Divider {
    pub fn new(stroke_width: impl Into<Field>) -> Self {
        Self {
            stroke_width: stroke_width.into(),
            ..Self::default()
        }
    }

    pub fn color(mut self, color: impl Into<Field>) -> Self {
        self.color = color.into();
        self
    }

    pub fn margins(mut self, start: impl Into<Field>, end: impl Into<Field>) -> Self {
        self.start_margin = start.into();
        self.end_margin = end.into();
        self
    }
}

/// Structured attribute values. Each variant fixes the number and order of
/// the fields passed to the native setter.
#[derive(Clone, Debug, PartialEq)]
pub enum Composite {
    Edges(Edges),
    Size(SizeValue),
    Border(Border),
    Shadow(Shadow),
    Font(Font),
    Decoration(Decoration),
    Divider(Divider),
    Fields(Vec<Field>),
}

impl Composite {
    /// Fields in native positional order.
    pub fn fields(&self) -> Vec<&Field> {
        match self {
            Composite::Edges(e) => vec![&e.top, &e.right, &e.bottom, &e.left],
            Composite::Size(s) => vec![&s.width, &s.height],
            Composite::Border(b) => vec![&b.width, &b.color, &b.radius, &b.style],
            Composite::Shadow(s) => vec![
                &s.radius, &s.kind, &s.color, &s.offset_x, &s.offset_y, &s.fill,
            ],
            Composite::Font(f) => vec![&f.size, &f.weight, &f.family, &f.style],
            Composite::Decoration(d) => vec![&d.kind, &d.color, &d.style],
            Composite::Divider(d) => vec![
                &d.stroke_width,
                &d.color,
                &d.start_margin,
                &d.end_margin,
            ],
            Composite::Fields(fields) => fields.iter().collect(),
        }
    }

    /// Field-by-field comparison. Composites of different shapes always
    /// differ.
    pub fn differs(&self, other: &Composite) -> bool {
        if std::mem::discriminant(self) != std::mem::discriminant(other) {
            return true;
        }
        let lhs = self.fields();
        let rhs = other.fields();
        lhs.len() != rhs.len() || lhs.iter().zip(rhs.iter()).any(|(a, b)| a.differs(b))
    }
}

/// Top-level kind of a value. Kinds that differ always diff as changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Number,
    String,
    Boolean,
    Resource,
    Composite,
}

impl ValueKind {
    pub fn is_primitive(self) -> bool {
        matches!(self, ValueKind::Number | ValueKind::String | ValueKind::Boolean)
    }

    const fn bit(self) -> u8 {
        match self {
            ValueKind::Number => 1,
            ValueKind::String => 1 << 1,
            ValueKind::Boolean => 1 << 2,
            ValueKind::Resource => 1 << 3,
            ValueKind::Composite => 1 << 4,
        }
    }
}

/// Set of value kinds an attribute's native setter accepts.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shapes(u8);

impl Shapes {
    pub const NUMBER: Shapes = Shapes(ValueKind::Number.bit());
    pub const STRING: Shapes = Shapes(ValueKind::String.bit());
    pub const BOOL: Shapes = Shapes(ValueKind::Boolean.bit());
    pub const RESOURCE: Shapes = Shapes(ValueKind::Resource.bit());
    pub const COMPOSITE: Shapes = Shapes(ValueKind::Composite.bit());
    /// Number, string or resource: the usual dimension shape.
    pub const LENGTH: Shapes = Self::NUMBER.or(Self::STRING).or(Self::RESOURCE);
    pub const COLOR: Shapes = Self::LENGTH;
    pub const ANY: Shapes = Self::LENGTH.or(Self::BOOL).or(Self::COMPOSITE);

    pub const fn or(self, other: Shapes) -> Shapes {
        Shapes(self.0 | other.0)
    }

    pub fn accepts(self, kind: ValueKind) -> bool {
        self.0 & kind.bit() != 0
    }
}

impl fmt::Debug for Shapes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds = [
            ValueKind::Number,
            ValueKind::String,
            ValueKind::Boolean,
            ValueKind::Resource,
            ValueKind::Composite,
        ];
        f.debug_set()
            .entries(kinds.iter().filter(|kind| self.accepts(**kind)))
            .finish()
    }
}

/// A staged or committed attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Number(f64),
    Str(String),
    Bool(bool),
    Resource(ResourceRef),
    Composite(Composite),
}

impl AttrValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            AttrValue::Number(_) => ValueKind::Number,
            AttrValue::Str(_) => ValueKind::String,
            AttrValue::Bool(_) => ValueKind::Boolean,
            AttrValue::Resource(_) => ValueKind::Resource,
            AttrValue::Composite(_) => ValueKind::Composite,
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.kind().is_primitive()
    }

    /// Flattens the value into the positional fields the native setter
    /// receives. A composite always yields its full field list, absent
    /// fields included.
    pub fn decompose(&self) -> Vec<Field> {
        match self {
            AttrValue::Number(n) => vec![Field::Number(*n)],
            AttrValue::Str(s) => vec![Field::Str(s.clone())],
            AttrValue::Bool(b) => vec![Field::Bool(*b)],
            AttrValue::Resource(r) => vec![Field::Resource(r.clone())],
            AttrValue::Composite(c) => c.fields().into_iter().cloned().collect(),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        AttrValue::Number(value as f64)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Number(value as f64)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Number(value as f64)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<ResourceRef> for AttrValue {
    fn from(value: ResourceRef) -> Self {
        AttrValue::Resource(value)
    }
}

impl From<Color> for AttrValue {
    fn from(value: Color) -> Self {
        AttrValue::Number(value.0 as f64)
    }
}

impl From<Composite> for AttrValue {
    fn from(value: Composite) -> Self {
        AttrValue::Composite(value)
    }
}

macro_rules! composite_from {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    AttrValue::Composite(Composite::$ty(value))
                }
            }
        )*
    };
}

composite_from!(Edges, Border, Shadow, Font, Decoration, Divider);

impl From<SizeValue> for AttrValue {
    fn from(value: SizeValue) -> Self {
        AttrValue::Composite(Composite::Size(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_field_never_matches_literal() {
        let resource = Field::Resource(ResourceRef::new(1, 10001));
        assert!(resource.differs(&Field::Number(1.0)));
        assert!(Field::Number(1.0).differs(&resource));
        assert!(!resource.differs(&Field::Resource(ResourceRef::new(1, 10001))));
    }

    #[test]
    fn resources_compare_every_field() {
        let base = ResourceRef::new(7, 10001).in_module("app", "entry");
        assert!(Field::from(base.clone()).differs(&Field::from(base.clone().with_param(2))));
        assert!(Field::from(base.clone()).differs(&Field::from(ResourceRef::new(7, 10001))));
        assert!(!Field::from(base.clone()).differs(&Field::from(base)));
    }

    #[test]
    fn composites_diff_field_by_field() {
        let a = Composite::Edges(Edges::all(4.0));
        let b = Composite::Edges(Edges::new(4.0, 4.0, 4.0, 4.0));
        assert!(!a.differs(&b));

        let c = Composite::Edges(Edges::new(4.0, 4.0, 8.0, 4.0));
        assert!(a.differs(&c));

        let size = Composite::Size(SizeValue::new(4.0, 4.0));
        assert!(a.differs(&size));
    }

    #[test]
    fn composite_with_resource_color_differs_from_literal_color() {
        let literal = Composite::Border(Border::new().width(1.0).color(Color::RED));
        let resource = Composite::Border(
            Border::new()
                .width(1.0)
                .color(ResourceRef::new(Color::RED.argb() as i64, 10001)),
        );
        assert!(literal.differs(&resource));
        assert!(resource.differs(&literal));
    }

    #[test]
    fn decompose_keeps_positional_shape() {
        let padding: AttrValue = Edges::symmetric(2.0, 6.0).into();
        assert_eq!(
            padding.decompose(),
            vec![
                Field::Number(2.0),
                Field::Number(6.0),
                Field::Number(2.0),
                Field::Number(6.0),
            ]
        );

        let shadow: AttrValue = Shadow::new(3.0).color(Color::BLACK).into();
        assert_eq!(shadow.decompose().len(), 6);
        assert!(shadow.decompose()[3].is_absent());
    }

    #[test]
    fn shapes_accept_listed_kinds_only() {
        assert!(Shapes::LENGTH.accepts(ValueKind::Number));
        assert!(Shapes::LENGTH.accepts(ValueKind::Resource));
        assert!(!Shapes::LENGTH.accepts(ValueKind::Boolean));
        assert!(!Shapes::NUMBER.accepts(ValueKind::Composite));
        assert!(Shapes::ANY.accepts(ValueKind::Composite));
    }

    #[test]
    fn color_from_argb_packs_channels() {
        assert_eq!(Color::from_argb(0xFF, 0x12, 0x34, 0x56), Color(0xFF12_3456));
        assert_eq!(AttrValue::from(Color::WHITE), AttrValue::Number(4294967295.0));
    }
}
