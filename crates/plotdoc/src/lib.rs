//! # plotdoc - Chart component graph and data-binding protocol
//!
//! Builds an in-memory graph of chart components and serializes it
//! into a single JSON document for an external rendering engine.
//! Large data arrays stay addressable by indirection: each data
//! source is assigned a serial during the full encode and referenced
//! as `"d<serial>"` from the structural tree, with the actual arrays
//! carried in a separate data dictionary. An update channel then
//! mutates only the data layer of an already-rendered document.
//!
//! ## Architecture
//!
//! ```text
//! Document ──validate──► ok? ──encode──► { structural tree, "data": {...} }
//!    │                                        ▲
//!    └── UpdateChannel ──append/push/reset──► renderer-side dictionary
//! ```
//!
//! Ownership is arena-shaped: the [`Document`] owns the canonical
//! sources, axes, charts and coordinate systems; every cross-reference
//! is a handle (`SourceId`, `AxisId`, `ChartId`, `CoordId`).

mod axis;
mod chart;
mod component;
mod coord;
mod document;
mod encode;
mod graph;
mod part;
mod style;
mod update;

pub use axis::{Axis, AxisArena, AxisId, AxisKind};
pub use chart::{Chart, ChartId, ChartKind};
pub use component::{DataZoom, Legend, Title, Tooltip, TooltipTrigger, VisualMap};
pub use coord::{CoordId, CoordinateSystem};
pub use document::Document;
pub use graph::{GraphData, GraphEdge, GraphNode, TreeNode};
pub use part::{part_label, Encoder, Part};
pub use style::{AreaStyle, ItemStyle, Label, LineKind, LineStyle, TextStyle};
pub use update::UpdateChannel;

pub use plotdoc_core::{
    DataSource, DataType, GeneratorFn, JsonWriter, SourceArena, SourceData, SourceId, UpdateError,
    ValidateError, Value,
};
