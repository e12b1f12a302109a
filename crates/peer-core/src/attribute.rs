//! The attribute descriptor table.
//!
//! Every attribute kind is one [`AttributeId`] plus one row of static
//! descriptor data: its native name, the component group that carries it,
//! the value shapes its native setter accepts, and the compare/apply/reset
//! functions reconciliation uses. There is a single generic
//! [`crate::AttributeModifier`]; per-attribute behavior comes entirely from
//! the row.

use std::fmt;

use once_cell::sync::Lazy;

use crate::collections::map::HashMap;
use crate::diff::{always, structural, CompareFn};
use crate::native::{NativeModule, NodeHandle};
use crate::value::{AttrValue, Field, Shapes};

pub type ApplyFn = fn(&mut dyn NativeModule, NodeHandle, AttributeId, &AttrValue);
pub type ResetFn = fn(&mut dyn NativeModule, NodeHandle, AttributeId);

/// Family of components an attribute belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeGroup {
    Common,
    Font,
    TextLayout,
    Image,
    Stack,
    Flex,
    List,
    Button,
}

/// One row of the descriptor table.
pub struct AttributeDescriptor {
    pub id: AttributeId,
    pub name: &'static str,
    pub group: AttributeGroup,
    pub accepts: Shapes,
    pub compare: CompareFn,
    pub apply: ApplyFn,
    pub reset: ResetFn,
}

impl fmt::Debug for AttributeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeDescriptor")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("accepts", &self.accepts)
            .finish_non_exhaustive()
    }
}

fn apply_decomposed(
    native: &mut dyn NativeModule,
    node: NodeHandle,
    attribute: AttributeId,
    value: &AttrValue,
) {
    native.set_attribute(node, attribute, &value.decompose());
}

fn reset_default(native: &mut dyn NativeModule, node: NodeHandle, attribute: AttributeId) {
    native.reset_attribute(node, attribute);
}

/// Font weights cross the boundary as strings ("400", "bold").
fn apply_font_weight(
    native: &mut dyn NativeModule,
    node: NodeHandle,
    attribute: AttributeId,
    value: &AttrValue,
) {
    match value {
        AttrValue::Number(weight) => {
            native.set_attribute(node, attribute, &[Field::Str(weight.to_string())])
        }
        other => apply_decomposed(native, node, attribute, other),
    }
}

macro_rules! attribute_table {
    (@apply) => {
        apply_decomposed
    };
    (@apply $apply:path) => {
        $apply
    };
    ($(
        $(#[$meta:meta])*
        $variant:ident => $name:literal, $group:ident, $accepts:expr, $compare:path $(, apply = $apply:path)?;
    )+) => {
        /// Process-wide identity of one attribute kind.
        ///
        /// The same kind uses the same identity on every component that
        /// exposes it.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum AttributeId {
            $( $(#[$meta])* $variant, )+
        }

        impl AttributeId {
            /// Every attribute, in table order.
            pub const ALL: &'static [AttributeId] = &[ $( AttributeId::$variant, )+ ];
        }

        static DESCRIPTORS: &[AttributeDescriptor] = &[
            $(
                AttributeDescriptor {
                    id: AttributeId::$variant,
                    name: $name,
                    group: AttributeGroup::$group,
                    accepts: $accepts,
                    compare: $compare,
                    apply: attribute_table!(@apply $($apply)?),
                    reset: reset_default,
                },
            )+
        ];
    };
}

attribute_table! {
    Width => "width", Common, Shapes::LENGTH, structural;
    Height => "height", Common, Shapes::LENGTH, structural;
    Size => "size", Common, Shapes::COMPOSITE, structural;
    BackgroundColor => "backgroundColor", Common, Shapes::COLOR, structural;
    Opacity => "opacity", Common, Shapes::NUMBER.or(Shapes::RESOURCE), structural;
    /// A single length or four [`crate::Edges`].
    Padding => "padding", Common, Shapes::LENGTH.or(Shapes::COMPOSITE), structural;
    Margin => "margin", Common, Shapes::LENGTH.or(Shapes::COMPOSITE), structural;
    Border => "border", Common, Shapes::COMPOSITE, structural;
    BorderRadius => "borderRadius", Common, Shapes::LENGTH.or(Shapes::COMPOSITE), structural;
    /// A shadow style constant or full [`crate::Shadow`] options.
    Shadow => "shadow", Common, Shapes::NUMBER.or(Shapes::COMPOSITE), structural;
    Visibility => "visibility", Common, Shapes::NUMBER, structural;
    Enabled => "enabled", Common, Shapes::BOOL, structural;
    ZIndex => "zIndex", Common, Shapes::NUMBER, structural;
    /// Clip flag or clip shape. Shapes are re-applied on every patch.
    Clip => "clip", Common, Shapes::BOOL.or(Shapes::COMPOSITE), always;

    FontColor => "fontColor", Font, Shapes::COLOR, structural;
    FontSize => "fontSize", Font, Shapes::LENGTH, structural;
    FontWeight => "fontWeight", Font, Shapes::NUMBER.or(Shapes::STRING), structural, apply = apply_font_weight;
    FontStyle => "fontStyle", Font, Shapes::NUMBER, structural;
    FontFamily => "fontFamily", Font, Shapes::STRING.or(Shapes::RESOURCE), structural;
    Font => "font", Font, Shapes::COMPOSITE, structural;
    Decoration => "decoration", Font, Shapes::COMPOSITE, structural;
    LetterSpacing => "letterSpacing", Font, Shapes::NUMBER.or(Shapes::STRING), structural;
    LineHeight => "lineHeight", Font, Shapes::LENGTH, structural;
    TextCase => "textCase", Font, Shapes::NUMBER, structural;

    MaxLines => "maxLines", TextLayout, Shapes::NUMBER, structural;
    TextAlign => "textAlign", TextLayout, Shapes::NUMBER, structural;
    TextOverflow => "textOverflow", TextLayout, Shapes::NUMBER, structural;
    MinFontSize => "minFontSize", TextLayout, Shapes::LENGTH, structural;
    MaxFontSize => "maxFontSize", TextLayout, Shapes::LENGTH, structural;
    CopyOption => "copyOption", TextLayout, Shapes::NUMBER, structural;
    TextIndent => "textIndent", TextLayout, Shapes::LENGTH, structural;
    /// Same contract as `Clip`.
    TextClip => "textClip", TextLayout, Shapes::BOOL.or(Shapes::COMPOSITE), always;

    ImageSource => "imageSource", Image, Shapes::STRING.or(Shapes::RESOURCE), structural;
    ObjectFit => "objectFit", Image, Shapes::NUMBER, structural;
    FillColor => "fillColor", Image, Shapes::COLOR, structural;
    Interpolation => "interpolation", Image, Shapes::NUMBER, structural;

    AlignContent => "alignContent", Stack, Shapes::NUMBER, structural;

    AlignItems => "alignItems", Flex, Shapes::NUMBER, structural;
    JustifyContent => "justifyContent", Flex, Shapes::NUMBER, structural;
    Space => "space", Flex, Shapes::LENGTH, structural;

    ListDirection => "listDirection", List, Shapes::NUMBER, structural;
    Divider => "divider", List, Shapes::COMPOSITE, structural;
    EdgeEffect => "edgeEffect", List, Shapes::NUMBER, structural;
    ScrollBar => "scrollBar", List, Shapes::NUMBER, structural;

    ButtonType => "buttonType", Button, Shapes::NUMBER, structural;
    StateEffect => "stateEffect", Button, Shapes::BOOL, structural;
    Label => "label", Button, Shapes::STRING.or(Shapes::RESOURCE), structural;
}

static NAME_INDEX: Lazy<HashMap<&'static str, AttributeId>> = Lazy::new(|| {
    AttributeId::ALL
        .iter()
        .map(|id| (id.name(), *id))
        .collect()
});

impl AttributeId {
    pub fn descriptor(self) -> &'static AttributeDescriptor {
        &DESCRIPTORS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn group(self) -> AttributeGroup {
        self.descriptor().group
    }

    /// Looks an attribute up by its native name.
    pub fn from_name(name: &str) -> Option<AttributeId> {
        NAME_INDEX.get(name).copied()
    }
}

impl fmt::Debug for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttributeId({})", self.name())
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::map::HashSet;

    #[test]
    fn descriptor_rows_line_up_with_ids() {
        for (index, id) in AttributeId::ALL.iter().enumerate() {
            assert_eq!(*id as usize, index);
            assert_eq!(id.descriptor().id, *id);
        }
    }

    #[test]
    fn names_are_unique_and_resolvable() {
        let mut seen = HashSet::default();
        for id in AttributeId::ALL {
            assert!(seen.insert(id.name()), "duplicate name {}", id.name());
            assert_eq!(AttributeId::from_name(id.name()), Some(*id));
        }
        assert_eq!(AttributeId::from_name("noSuchAttribute"), None);
    }

    #[test]
    fn groups_follow_table() {
        assert_eq!(AttributeId::Width.group(), AttributeGroup::Common);
        assert_eq!(AttributeId::FontColor.group(), AttributeGroup::Font);
        assert_eq!(AttributeId::MaxLines.group(), AttributeGroup::TextLayout);
        assert_eq!(AttributeId::AlignContent.group(), AttributeGroup::Stack);
    }

    #[test]
    fn display_uses_native_name() {
        assert_eq!(AttributeId::BackgroundColor.to_string(), "backgroundColor");
        assert_eq!(format!("{:?}", AttributeId::Width), "AttributeId(width)");
    }
}
