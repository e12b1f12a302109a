//! One fluent setter per attribute.
//!
//! Every setter resolves its argument into an [`AttrValue`] once and stages it.
//! Setters for attributes the component kind does not carry fail with
//! [`PeerError::UnsupportedAttribute`].

use peer_core::{AttrValue, AttributeId, PeerError};

use crate::component::Component;

macro_rules! fluent_setters {
    ($($method:ident => $id:ident),+ $(,)?) => {
        impl Component {
            $(
                pub fn $method(
                    &mut self,
                    value: impl Into<AttrValue>,
                ) -> Result<&mut Self, PeerError> {
                    self.stage(AttributeId::$id, value)
                }
            )+
        }
    };
}

fluent_setters! {
    width => Width,
    height => Height,
    size => Size,
    background_color => BackgroundColor,
    opacity => Opacity,
    padding => Padding,
    margin => Margin,
    border => Border,
    border_radius => BorderRadius,
    shadow => Shadow,
    visibility => Visibility,
    enabled => Enabled,
    z_index => ZIndex,
    clip => Clip,

    font_color => FontColor,
    font_size => FontSize,
    font_weight => FontWeight,
    font_style => FontStyle,
    font_family => FontFamily,
    font => Font,
    decoration => Decoration,
    letter_spacing => LetterSpacing,
    line_height => LineHeight,
    text_case => TextCase,

    max_lines => MaxLines,
    text_align => TextAlign,
    text_overflow => TextOverflow,
    min_font_size => MinFontSize,
    max_font_size => MaxFontSize,
    copy_option => CopyOption,
    text_indent => TextIndent,
    text_clip => TextClip,

    image_source => ImageSource,
    object_fit => ObjectFit,
    fill_color => FillColor,
    interpolation => Interpolation,

    align_content => AlignContent,

    align_items => AlignItems,
    justify_content => JustifyContent,
    space => Space,

    list_direction => ListDirection,
    divider => Divider,
    edge_effect => EdgeEffect,
    scroll_bar => ScrollBar,

    button_type => ButtonType,
    state_effect => StateEffect,
    label => Label,
}
