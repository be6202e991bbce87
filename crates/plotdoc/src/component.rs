//! Top-level document components: title, legend, tooltip, data zoom
//! and visual map.

use crate::part::{Encoder, Part};
use crate::style::TextStyle;

/// Document title with optional subtitle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Title {
    pub text: String,
    pub subtext: Option<String>,
    pub text_style: Option<TextStyle>,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_subtext(mut self, subtext: impl Into<String>) -> Self {
        self.subtext = Some(subtext.into());
        self
    }

    pub fn with_text_style(mut self, style: TextStyle) -> Self {
        self.text_style = Some(style);
        self
    }
}

impl Part for Title {
    fn part_name(&self) -> &'static str {
        "title"
    }

    fn instance_name(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn encode(&self, enc: &mut Encoder<'_>) {
        enc.field_str("text", &self.text);
        if let Some(subtext) = &self.subtext {
            enc.field_str("subtext", subtext);
        }
        if let Some(style) = &self.text_style {
            enc.object_field("textStyle");
            style.encode(enc);
            enc.end_object();
        }
    }
}

/// Legend listing series by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Legend {
    pub entries: Vec<String>,
    pub show: bool,
}

impl Legend {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            show: true,
        }
    }

    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entries.push(entry.into());
        self
    }
}

impl Part for Legend {
    fn part_name(&self) -> &'static str {
        "legend"
    }

    fn encode(&self, enc: &mut Encoder<'_>) {
        enc.field_bool("show", self.show);
        enc.array_field("data");
        for entry in &self.entries {
            enc.element_str(entry);
        }
        enc.end_array();
    }
}

/// Hover tooltip configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub show: bool,
    pub trigger: TooltipTrigger,
    pub formatter: Option<String>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TooltipTrigger {
    #[default]
    Item,
    Axis,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            show: true,
            trigger: TooltipTrigger::Item,
            formatter: None,
        }
    }
}

impl Tooltip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis_triggered() -> Self {
        Self {
            trigger: TooltipTrigger::Axis,
            ..Self::default()
        }
    }

    pub fn with_formatter(mut self, formatter: impl Into<String>) -> Self {
        self.formatter = Some(formatter.into());
        self
    }
}

impl Part for Tooltip {
    fn part_name(&self) -> &'static str {
        "tooltip"
    }

    fn encode(&self, enc: &mut Encoder<'_>) {
        enc.field_bool("show", self.show);
        enc.field_str(
            "trigger",
            match self.trigger {
                TooltipTrigger::Item => "item",
                TooltipTrigger::Axis => "axis",
            },
        );
        if let Some(formatter) = &self.formatter {
            enc.field_str("formatter", formatter);
        }
    }
}

/// Viewport zoom over a percentage window of the data.
#[derive(Clone, Debug, PartialEq)]
pub struct DataZoom {
    pub start_percent: f64,
    pub end_percent: f64,
}

impl Default for DataZoom {
    fn default() -> Self {
        Self {
            start_percent: 0.0,
            end_percent: 100.0,
        }
    }
}

impl DataZoom {
    pub fn new(start_percent: f64, end_percent: f64) -> Self {
        Self {
            start_percent,
            end_percent,
        }
    }
}

impl Part for DataZoom {
    fn part_name(&self) -> &'static str {
        "data zoom"
    }

    fn encode(&self, enc: &mut Encoder<'_>) {
        enc.field_num("start", self.start_percent);
        enc.field_num("end", self.end_percent);
    }
}

/// Continuous visual mapping from a value range to a color ramp.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualMap {
    pub min: f64,
    pub max: f64,
    pub colors: Vec<String>,
}

impl VisualMap {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            colors: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.colors.push(color.into());
        self
    }
}

impl Part for VisualMap {
    fn part_name(&self) -> &'static str {
        "visual map"
    }

    fn encode(&self, enc: &mut Encoder<'_>) {
        enc.field_num("min", self.min);
        enc.field_num("max", self.max);
        if !self.colors.is_empty() {
            enc.array_field("color");
            for color in &self.colors {
                enc.element_str(color);
            }
            enc.end_array();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotdoc_core::SourceArena;

    fn encode_body(part: &dyn Part) -> String {
        let mut arena = SourceArena::new();
        let mut enc = Encoder::new(&mut arena);
        enc.begin_object();
        part.encode(&mut enc);
        enc.end_object();
        enc.finish()
    }

    #[test]
    fn title_with_subtext() {
        let title = Title::new("Sales").with_subtext("2026 H1");
        assert_eq!(
            encode_body(&title),
            "{\"text\":\"Sales\",\"subtext\":\"2026 H1\"}"
        );
    }

    #[test]
    fn legend_entries() {
        let legend = Legend::new().with_entry("north").with_entry("south");
        assert_eq!(
            encode_body(&legend),
            "{\"show\":true,\"data\":[\"north\",\"south\"]}"
        );
    }

    #[test]
    fn tooltip_trigger() {
        let tooltip = Tooltip::axis_triggered();
        assert_eq!(encode_body(&tooltip), "{\"show\":true,\"trigger\":\"axis\"}");
    }

    #[test]
    fn data_zoom_window() {
        let zoom = DataZoom::new(20.0, 80.0);
        assert_eq!(encode_body(&zoom), "{\"start\":20,\"end\":80}");
    }
}
