//! The document root: arenas, composition and validation.

use plotdoc_core::{DataSource, JsonWriter, SourceArena, SourceId, ValidateError};

use crate::axis::{Axis, AxisArena, AxisId, AxisKind};
use crate::chart::{Chart, ChartId, ChartKind};
use crate::component::{DataZoom, Legend, Title, Tooltip, VisualMap};
use crate::coord::{CoordId, CoordinateSystem};
use crate::encode::encode_document;
use crate::part::{part_label, Part};

/// A complete chart document: the component graph plus the data it
/// references.
///
/// The document owns the canonical objects (sources, axes, charts,
/// coordinate systems) in arenas; everything else holds handles.
/// `encode` validates the whole graph, then serializes it in one pass.
#[derive(Debug, Default)]
pub struct Document {
    title: Option<Title>,
    legend: Option<Legend>,
    tooltip: Option<Tooltip>,
    data_zoom: Option<DataZoom>,
    visual_map: Option<VisualMap>,
    sources: SourceArena,
    axes: AxisArena,
    coords: Vec<CoordinateSystem>,
    charts: Vec<Chart>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Composition
    // ========================================================================

    pub fn set_title(&mut self, title: Title) -> &mut Self {
        self.title = Some(title);
        self
    }

    pub fn set_legend(&mut self, legend: Legend) -> &mut Self {
        self.legend = Some(legend);
        self
    }

    pub fn set_tooltip(&mut self, tooltip: Tooltip) -> &mut Self {
        self.tooltip = Some(tooltip);
        self
    }

    pub fn set_data_zoom(&mut self, zoom: DataZoom) -> &mut Self {
        self.data_zoom = Some(zoom);
        self
    }

    pub fn set_visual_map(&mut self, map: VisualMap) -> &mut Self {
        self.visual_map = Some(map);
        self
    }

    pub fn add_source(&mut self, source: DataSource) -> SourceId {
        self.sources.insert(source)
    }

    pub fn source(&self, id: SourceId) -> &DataSource {
        self.sources.get(id)
    }

    pub fn source_mut(&mut self, id: SourceId) -> &mut DataSource {
        self.sources.get_mut(id)
    }

    pub fn add_axis(&mut self, axis: Axis) -> AxisId {
        self.axes.insert(axis)
    }

    pub fn axis(&self, id: AxisId) -> &Axis {
        self.axes.get(id)
    }

    pub fn add_chart(&mut self, chart: Chart) -> ChartId {
        let id = ChartId(self.charts.len() as u32);
        self.charts.push(chart);
        id
    }

    pub fn chart(&self, id: ChartId) -> &Chart {
        &self.charts[id.0 as usize]
    }

    pub fn chart_mut(&mut self, id: ChartId) -> &mut Chart {
        &mut self.charts[id.0 as usize]
    }

    pub fn add_coord(&mut self, coord: CoordinateSystem) -> CoordId {
        let id = CoordId(self.coords.len() as u32);
        self.coords.push(coord);
        id
    }

    pub fn coord(&self, id: CoordId) -> &CoordinateSystem {
        &self.coords[id.0 as usize]
    }

    pub fn coord_mut(&mut self, id: CoordId) -> &mut CoordinateSystem {
        &mut self.coords[id.0 as usize]
    }

    /// Plot `chart` on `coord`, detaching it from any system it was
    /// previously plotted on (a chart has at most one owner system).
    pub fn attach(&mut self, chart: ChartId, coord: CoordId) {
        for system in &mut self.coords {
            system.remove_chart(chart);
        }
        self.coords[coord.0 as usize].add_chart(chart);
    }

    /// Undo the binding made by `coord`, if it still holds `chart`.
    /// A chart that has since been rebound elsewhere is left alone.
    pub fn detach(&mut self, chart: ChartId, coord: CoordId) {
        self.coords[coord.0 as usize].remove_chart(chart);
    }

    /// The coordinate system `chart` is currently plotted on.
    pub fn coord_of(&self, chart: ChartId) -> Option<CoordId> {
        self.coords
            .iter()
            .position(|c| c.contains(chart))
            .map(|i| CoordId(i as u32))
    }

    /// Split borrows for the serialization driver: the graph is read
    /// immutably while the encoder takes the mutable view of the
    /// source arena it needs for serial registration.
    pub(crate) fn split_for_encode(&mut self) -> EncodeView<'_> {
        EncodeView {
            title: self.title.as_ref(),
            legend: self.legend.as_ref(),
            tooltip: self.tooltip.as_ref(),
            data_zoom: self.data_zoom.as_ref(),
            visual_map: self.visual_map.as_ref(),
            axes: &self.axes,
            coords: &self.coords,
            charts: &self.charts,
            sources: &mut self.sources,
        }
    }

    /// Charts not plotted on any coordinate system, in insertion
    /// order.
    pub(crate) fn standalone_charts(&self) -> impl Iterator<Item = (ChartId, &Chart)> {
        self.charts.iter().enumerate().filter_map(|(i, chart)| {
            let id = ChartId(i as u32);
            if self.coords.iter().any(|c| c.contains(id)) {
                None
            } else {
                Some((id, chart))
            }
        })
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate the whole graph: per coordinate system its axes first,
    /// then each plotted chart's data slots, then the chart-specific
    /// structural rules that depend on axis linkage; finally the
    /// standalone charts and top-level parts. The first failure aborts.
    pub fn validate(&self) -> Result<(), ValidateError> {
        for system in &self.coords {
            for &axis in system.x_axes().iter().chain(system.y_axes()) {
                self.axes.get(axis).validate()?;
            }
            for &chart_id in system.charts() {
                self.charts[chart_id.0 as usize].validate()?;
            }
            for &chart_id in system.charts() {
                self.check_axis_rules(&self.charts[chart_id.0 as usize], system)?;
            }
        }

        for (_, chart) in self.standalone_charts() {
            if chart.kind().requires_coordinate_system() {
                return Err(ValidateError::NoCoordinateSystem {
                    part: part_label(chart),
                });
            }
            chart.validate()?;
        }

        if let Some(title) = &self.title {
            title.validate()?;
        }
        if let Some(legend) = &self.legend {
            legend.validate()?;
        }
        if let Some(tooltip) = &self.tooltip {
            tooltip.validate()?;
        }
        Ok(())
    }

    fn check_axis_rules(
        &self,
        chart: &Chart,
        system: &CoordinateSystem,
    ) -> Result<(), ValidateError> {
        // A boxplot is grouped per category; its first x axis must
        // actually be a category axis.
        if chart.kind() == ChartKind::Boxplot {
            let category = system
                .x_axes()
                .first()
                .map(|&id| self.axes.get(id).kind() == AxisKind::Category)
                .unwrap_or(false);
            if !category {
                return Err(ValidateError::AxisTypeMismatch {
                    axis: "x axis".to_string(),
                    part: part_label(chart),
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    /// Validate, then serialize the full document: the structural tree
    /// followed by the data dictionary. No bytes are produced when
    /// validation fails.
    pub fn encode(&mut self) -> Result<String, ValidateError> {
        self.validate()?;
        Ok(encode_document(self))
    }

    /// Re-emit just the data dictionary for sources registered by an
    /// earlier full encode. Sources never registered are skipped.
    pub fn encode_data_only(&self) -> String {
        let mut w = JsonWriter::new();
        w.begin_object();
        for (_, source) in self.sources.iter() {
            if !source.is_registered() {
                continue;
            }
            w.array_field(&format!("d{}", source.serial()));
            for value in source.iter() {
                w.element(&value);
            }
            w.end_array();
        }
        w.end_object();
        w.finish()
    }
}

/// Borrow view handed to the serialization driver.
pub(crate) struct EncodeView<'a> {
    pub title: Option<&'a Title>,
    pub legend: Option<&'a Legend>,
    pub tooltip: Option<&'a Tooltip>,
    pub data_zoom: Option<&'a DataZoom>,
    pub visual_map: Option<&'a VisualMap>,
    pub axes: &'a AxisArena,
    pub coords: &'a [CoordinateSystem],
    pub charts: &'a [Chart],
    pub sources: &'a mut SourceArena,
}
