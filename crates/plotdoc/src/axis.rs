//! Axes and the arena that owns them.
//!
//! Axes are owned by the document's [`AxisArena`]; coordinate systems
//! and charts hold [`AxisId`] handles, never the axes themselves, so
//! an axis shared by several views has exactly one owner.

use plotdoc_core::SourceId;

use crate::part::{Encoder, Part};
use crate::style::{Label, LineStyle};

/// Handle to an axis owned by an [`AxisArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AxisId(u32);

impl AxisId {
    pub fn as_u32(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Scale kind of an axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AxisKind {
    Value,
    Category,
    Time,
    Log,
}

impl AxisKind {
    /// Type tag written into the document.
    pub fn as_str(self) -> &'static str {
        match self {
            AxisKind::Value => "value",
            AxisKind::Category => "category",
            AxisKind::Time => "time",
            AxisKind::Log => "log",
        }
    }
}

/// A single axis: scale kind, optional name, optional bound category
/// source, and cosmetic parts.
#[derive(Debug)]
pub struct Axis {
    kind: AxisKind,
    name: Option<String>,
    categories: Option<SourceId>,
    label: Option<Label>,
    line_style: Option<LineStyle>,
}

impl Axis {
    pub fn new(kind: AxisKind) -> Self {
        Self {
            kind,
            name: None,
            categories: None,
            label: None,
            line_style: None,
        }
    }

    pub fn value() -> Self {
        Self::new(AxisKind::Value)
    }

    /// A category axis bound to a CATEGORY data source.
    pub fn category(categories: SourceId) -> Self {
        let mut axis = Self::new(AxisKind::Category);
        axis.categories = Some(categories);
        axis
    }

    pub fn time() -> Self {
        Self::new(AxisKind::Time)
    }

    pub fn log() -> Self {
        Self::new(AxisKind::Log)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.line_style = Some(style);
        self
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    pub fn categories(&self) -> Option<SourceId> {
        self.categories
    }
}

impl Part for Axis {
    fn part_name(&self) -> &'static str {
        match self.kind {
            AxisKind::Value => "value axis",
            AxisKind::Category => "category axis",
            AxisKind::Time => "time axis",
            AxisKind::Log => "log axis",
        }
    }

    fn instance_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn encode(&self, enc: &mut Encoder<'_>) {
        enc.field_str("type", self.kind.as_str());
        if let Some(name) = &self.name {
            enc.field_str("name", name);
        }
        if let Some(categories) = self.categories {
            enc.data_ref("data", categories);
        }
        if let Some(label) = &self.label {
            enc.object_field("axisLabel");
            label.encode_default(enc);
            enc.end_object();
        }
        if let Some(style) = &self.line_style {
            enc.object_field("axisLine");
            style.encode(enc);
            enc.end_object();
        }
    }
}

/// Owns every axis of one document.
#[derive(Debug, Default)]
pub struct AxisArena {
    axes: Vec<Axis>,
}

impl AxisArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, axis: Axis) -> AxisId {
        let id = AxisId(self.axes.len() as u32);
        self.axes.push(axis);
        id
    }

    /// Look up an axis. Panics on a handle from another arena.
    pub fn get(&self, id: AxisId) -> &Axis {
        &self.axes[id.index()]
    }

    pub fn get_mut(&mut self, id: AxisId) -> &mut Axis {
        &mut self.axes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }
}
