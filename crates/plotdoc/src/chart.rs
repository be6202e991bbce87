//! Chart series and their data slots.
//!
//! A chart declares its kind up front; the kind fixes how many data
//! slots the chart owns (2 for XY kinds, 0 for kinds that embed their
//! own graph data). Slots hold [`SourceId`]s into the document's
//! source arena. Validation fails when a required slot is unset;
//! addressing a slot the kind does not have is caller misuse and a
//! hard failure.

use smallvec::SmallVec;

use plotdoc_core::{SourceId, ValidateError};

use crate::graph::{GraphData, TreeNode};
use crate::part::{part_label, Encoder, Part};
use crate::style::{AreaStyle, ItemStyle, Label, LineStyle};

/// Handle to a chart owned by a [`Document`](crate::Document).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChartId(pub(crate) u32);

impl ChartId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Declared chart kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
    Boxplot,
    Pie,
    Gauge,
    Sankey,
    Tree,
}

impl ChartKind {
    /// Type tag written into the series entry.
    pub fn series_type(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::Boxplot => "boxplot",
            ChartKind::Pie => "pie",
            ChartKind::Gauge => "gauge",
            ChartKind::Sankey => "sankey",
            ChartKind::Tree => "tree",
        }
    }

    /// Human-readable class name for error messages.
    pub fn part_name(self) -> &'static str {
        match self {
            ChartKind::Line => "line chart",
            ChartKind::Bar => "bar chart",
            ChartKind::Scatter => "scatter chart",
            ChartKind::Boxplot => "boxplot chart",
            ChartKind::Pie => "pie chart",
            ChartKind::Gauge => "gauge chart",
            ChartKind::Sankey => "sankey chart",
            ChartKind::Tree => "tree chart",
        }
    }

    /// Number of data slots this kind owns.
    pub fn data_slot_count(self) -> usize {
        match self {
            ChartKind::Line | ChartKind::Bar | ChartKind::Scatter | ChartKind::Boxplot => 2,
            ChartKind::Pie => 2,
            ChartKind::Gauge => 1,
            ChartKind::Sankey | ChartKind::Tree => 0,
        }
    }

    /// Name of a slot, used in missing-data errors.
    pub fn slot_name(self, slot: usize) -> &'static str {
        match self {
            ChartKind::Line | ChartKind::Bar | ChartKind::Scatter | ChartKind::Boxplot => {
                ["x axis", "y axis"][slot]
            }
            ChartKind::Pie => ["names", "values"][slot],
            ChartKind::Gauge => ["value"][slot],
            ChartKind::Sankey | ChartKind::Tree => unreachable!("kind has no data slots"),
        }
    }

    /// XY kinds must be plotted on a coordinate system.
    pub fn requires_coordinate_system(self) -> bool {
        matches!(
            self,
            ChartKind::Line | ChartKind::Bar | ChartKind::Scatter | ChartKind::Boxplot
        )
    }
}

/// One series in the document.
#[derive(Debug)]
pub struct Chart {
    kind: ChartKind,
    name: Option<String>,
    slots: SmallVec<[Option<SourceId>; 2]>,
    graph: Option<GraphData>,
    tree: Option<TreeNode>,
    line_style: Option<LineStyle>,
    item_style: Option<ItemStyle>,
    area_style: Option<AreaStyle>,
    label: Option<Label>,
}

impl Chart {
    pub fn new(kind: ChartKind) -> Self {
        let mut slots = SmallVec::new();
        slots.resize(kind.data_slot_count(), None);
        Self {
            kind,
            name: None,
            slots,
            graph: None,
            tree: None,
            line_style: None,
            item_style: None,
            area_style: None,
            label: None,
        }
    }

    pub fn named(kind: ChartKind, name: impl Into<String>) -> Self {
        let mut chart = Self::new(kind);
        chart.name = Some(name.into());
        chart
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Bind a data source to `slot`.
    ///
    /// # Panics
    ///
    /// Panics when `slot` is out of range for this chart's kind; that
    /// is a contract violation, not a recoverable condition.
    pub fn set_data(&mut self, slot: usize, source: SourceId) {
        let count = self.kind.data_slot_count();
        if slot >= count {
            panic!(
                "{} has {} data slot(s), slot {} does not exist",
                self.kind.part_name(),
                count,
                slot
            );
        }
        self.slots[slot] = Some(source);
    }

    pub fn data(&self, slot: usize) -> Option<SourceId> {
        self.slots.get(slot).copied().flatten()
    }

    /// Data slots in order, for channel binding.
    pub fn data_slots(&self) -> impl Iterator<Item = Option<SourceId>> + '_ {
        self.slots.iter().copied()
    }

    /// Attach node/edge data to a sankey chart.
    ///
    /// # Panics
    ///
    /// Panics for any other kind.
    pub fn set_graph_data(&mut self, data: GraphData) {
        if self.kind != ChartKind::Sankey {
            panic!("{} does not take graph data", self.kind.part_name());
        }
        self.graph = Some(data);
    }

    /// Attach a root node to a tree chart.
    ///
    /// # Panics
    ///
    /// Panics for any other kind.
    pub fn set_tree_data(&mut self, root: TreeNode) {
        if self.kind != ChartKind::Tree {
            panic!("{} does not take tree data", self.kind.part_name());
        }
        self.tree = Some(root);
    }

    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.line_style = Some(style);
        self
    }

    pub fn with_item_style(mut self, style: ItemStyle) -> Self {
        self.item_style = Some(style);
        self
    }

    pub fn with_area_style(mut self, style: AreaStyle) -> Self {
        self.area_style = Some(style);
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }
}

impl Part for Chart {
    fn part_name(&self) -> &'static str {
        self.kind.part_name()
    }

    fn instance_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn validate(&self) -> Result<(), ValidateError> {
        let label = part_label(self);
        for (slot, bound) in self.slots.iter().enumerate() {
            if bound.is_none() {
                return Err(ValidateError::MissingData {
                    slot: self.kind.slot_name(slot).to_string(),
                    part: label.clone(),
                });
            }
        }
        match self.kind {
            ChartKind::Sankey => {
                let graph = self.graph.as_ref().ok_or_else(|| ValidateError::MissingData {
                    slot: "nodes and links".to_string(),
                    part: label.clone(),
                })?;
                graph.validate(&label)
            }
            ChartKind::Tree => {
                let tree = self.tree.as_ref().ok_or_else(|| ValidateError::MissingData {
                    slot: "root node".to_string(),
                    part: label.clone(),
                })?;
                tree.validate(&label)
            }
            _ => Ok(()),
        }
    }

    fn encode(&self, enc: &mut Encoder<'_>) {
        enc.field_str("type", self.kind.series_type());
        if let Some(name) = &self.name {
            enc.field_str("name", name);
        }

        match self.kind {
            ChartKind::Line | ChartKind::Bar | ChartKind::Scatter | ChartKind::Boxplot => {
                if let Some(x) = self.data(0) {
                    enc.data_ref("xData", x);
                }
                if let Some(y) = self.data(1) {
                    enc.data_ref("data", y);
                }
            }
            ChartKind::Pie => {
                if let Some(names) = self.data(0) {
                    enc.data_ref("names", names);
                }
                if let Some(values) = self.data(1) {
                    enc.data_ref("data", values);
                }
            }
            ChartKind::Gauge => {
                // Gauge data is a handful of values; inlined rather
                // than indirected through the dictionary.
                if let Some(values) = self.data(0) {
                    enc.data_inline("data", values);
                }
            }
            ChartKind::Sankey => {
                if let Some(graph) = &self.graph {
                    graph.encode_nodes(enc);
                    graph.encode_links(enc);
                }
            }
            ChartKind::Tree => {
                if let Some(tree) = &self.tree {
                    enc.array_field("data");
                    enc.begin_object();
                    tree.encode(enc);
                    enc.end_object();
                    enc.end_array();
                }
            }
        }

        if let Some(style) = &self.line_style {
            enc.object_field("lineStyle");
            style.encode(enc);
            enc.end_object();
        }
        if let Some(style) = &self.item_style {
            enc.object_field("itemStyle");
            style.encode(enc);
            enc.end_object();
        }
        if let Some(style) = &self.area_style {
            enc.object_field("areaStyle");
            style.encode(enc);
            enc.end_object();
        }
        if let Some(label) = &self.label {
            enc.object_field("label");
            match self.kind {
                ChartKind::Gauge => label.encode_for_gauge(enc),
                _ => label.encode_default(enc),
            }
            enc.end_object();
        }
    }
}
