//! Cosmetic leaf parts.
//!
//! The original property catalogue is a large open inheritance chain;
//! here it is a small closed set of structs composed into charts and
//! axes. Every field is optional and only set fields are emitted, so
//! an empty style encodes to an empty object body.

use crate::part::{Encoder, Part};

/// Text styling for titles, labels and legends.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_font(mut self, family: impl Into<String>, size: f64) -> Self {
        self.font_family = Some(family.into());
        self.font_size = Some(size);
        self
    }
}

impl Part for TextStyle {
    fn part_name(&self) -> &'static str {
        "text style"
    }

    fn encode(&self, enc: &mut Encoder<'_>) {
        if let Some(family) = &self.font_family {
            enc.field_str("fontFamily", family);
        }
        if let Some(size) = self.font_size {
            enc.field_num("fontSize", size);
        }
        if let Some(color) = &self.color {
            enc.field_str("color", color);
        }
    }
}

/// Dash pattern for line strokes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LineKind {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LineKind::Solid => "solid",
            LineKind::Dashed => "dashed",
            LineKind::Dotted => "dotted",
        }
    }
}

/// Stroke styling for series lines and axis lines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineStyle {
    pub color: Option<String>,
    pub width: Option<f64>,
    pub kind: LineKind,
}

impl LineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_kind(mut self, kind: LineKind) -> Self {
        self.kind = kind;
        self
    }
}

impl Part for LineStyle {
    fn part_name(&self) -> &'static str {
        "line style"
    }

    fn encode(&self, enc: &mut Encoder<'_>) {
        if let Some(color) = &self.color {
            enc.field_str("color", color);
        }
        if let Some(width) = self.width {
            enc.field_num("width", width);
        }
        if self.kind != LineKind::Solid {
            enc.field_str("type", self.kind.as_str());
        }
    }
}

/// Item styling for bars, points and pie slices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemStyle {
    pub color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
}

impl ItemStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_border(mut self, color: impl Into<String>, width: f64) -> Self {
        self.border_color = Some(color.into());
        self.border_width = Some(width);
        self
    }
}

impl Part for ItemStyle {
    fn part_name(&self) -> &'static str {
        "item style"
    }

    fn encode(&self, enc: &mut Encoder<'_>) {
        if let Some(color) = &self.color {
            enc.field_str("color", color);
        }
        if let Some(color) = &self.border_color {
            enc.field_str("borderColor", color);
        }
        if let Some(width) = self.border_width {
            enc.field_num("borderWidth", width);
        }
    }
}

/// Fill styling for area series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AreaStyle {
    pub color: Option<String>,
    pub opacity: Option<f64>,
}

impl AreaStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

impl Part for AreaStyle {
    fn part_name(&self) -> &'static str {
        "area style"
    }

    fn encode(&self, enc: &mut Encoder<'_>) {
        if let Some(color) = &self.color {
            enc.field_str("color", color);
        }
        if let Some(opacity) = self.opacity {
            enc.field_num("opacity", opacity);
        }
    }
}

/// Data label attached to series items.
///
/// Gauge series consume labels without a formatter, so the encode
/// mode is an explicit choice between [`Label::encode_default`] and
/// [`Label::encode_for_gauge`]; `encode` (the [`Part`] impl) is the
/// default mode. Both modes are pure reads, nothing is swapped out
/// and restored mid-encode.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub show: bool,
    pub position: Option<String>,
    pub formatter: Option<String>,
    pub text_style: Option<TextStyle>,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            show: true,
            position: None,
            formatter: None,
            text_style: None,
        }
    }
}

impl Label {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hidden() -> Self {
        Self {
            show: false,
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_formatter(mut self, formatter: impl Into<String>) -> Self {
        self.formatter = Some(formatter.into());
        self
    }

    pub fn with_text_style(mut self, style: TextStyle) -> Self {
        self.text_style = Some(style);
        self
    }

    /// Full emission, formatter included.
    pub fn encode_default(&self, enc: &mut Encoder<'_>) {
        self.encode_inner(enc, true);
    }

    /// Gauge-mode emission: the formatter is owned by the gauge
    /// pointer display and is never written here.
    pub fn encode_for_gauge(&self, enc: &mut Encoder<'_>) {
        self.encode_inner(enc, false);
    }

    fn encode_inner(&self, enc: &mut Encoder<'_>, with_formatter: bool) {
        enc.field_bool("show", self.show);
        if let Some(position) = &self.position {
            enc.field_str("position", position);
        }
        if with_formatter {
            if let Some(formatter) = &self.formatter {
                enc.field_str("formatter", formatter);
            }
        }
        if let Some(style) = &self.text_style {
            enc.object_field("textStyle");
            style.encode(enc);
            enc.end_object();
        }
    }
}

impl Part for Label {
    fn part_name(&self) -> &'static str {
        "label"
    }

    fn encode(&self, enc: &mut Encoder<'_>) {
        self.encode_default(enc);
    }
}
