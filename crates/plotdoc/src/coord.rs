//! Coordinate systems: axis binding and chart placement.
//!
//! A coordinate system owns ordered lists of axis handles and the set
//! of charts plotted on it. Axis binding is by reference: an axis
//! added to the system after a chart was attached is visible to that
//! chart too. A chart belongs to at most one system at a time; the
//! attach/detach bookkeeping lives on [`Document`](crate::Document),
//! which owns both arenas.

use crate::axis::AxisId;
use crate::chart::ChartId;

/// Handle to a coordinate system owned by a document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CoordId(pub(crate) u32);

impl CoordId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// A cartesian grid with x/y axis lists and plotted charts.
#[derive(Debug, Default)]
pub struct CoordinateSystem {
    name: Option<String>,
    x_axes: Vec<AxisId>,
    y_axes: Vec<AxisId>,
    charts: Vec<ChartId>,
}

impl CoordinateSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn add_x_axis(&mut self, axis: AxisId) -> &mut Self {
        self.x_axes.push(axis);
        self
    }

    pub fn add_y_axis(&mut self, axis: AxisId) -> &mut Self {
        self.y_axes.push(axis);
        self
    }

    pub fn x_axes(&self) -> &[AxisId] {
        &self.x_axes
    }

    pub fn y_axes(&self) -> &[AxisId] {
        &self.y_axes
    }

    /// Charts plotted on this system, in attach order.
    pub fn charts(&self) -> &[ChartId] {
        &self.charts
    }

    pub fn contains(&self, chart: ChartId) -> bool {
        self.charts.contains(&chart)
    }

    pub(crate) fn add_chart(&mut self, chart: ChartId) {
        if !self.charts.contains(&chart) {
            self.charts.push(chart);
        }
    }

    pub(crate) fn remove_chart(&mut self, chart: ChartId) {
        self.charts.retain(|&c| c != chart);
    }
}
