//! Full-document serialization driver.
//!
//! One depth-first pass over the validated component graph emits the
//! structural tree (title, legend, tooltip, axes, series, data zoom,
//! visual map); every data source encountered on the way is assigned
//! its serial in first-seen order. A final reserved `data` object
//! holds the dictionary `{"d<serial>": [...]}`, pulled lazily from
//! each source.

use crate::chart::ChartId;
use crate::document::Document;
use crate::part::{Encoder, Part};

/// Serialize a document that has already passed validation.
pub(crate) fn encode_document(doc: &mut Document) -> String {
    let view = doc.split_for_encode();
    log::debug!(
        "encoding document: {} chart(s), {} coordinate system(s)",
        view.charts.len(),
        view.coords.len()
    );

    // Series order: charts in coordinate-system order first, then
    // standalone charts in insertion order.
    let mut series: Vec<ChartId> = view
        .coords
        .iter()
        .flat_map(|c| c.charts().iter().copied())
        .collect();
    for i in 0..view.charts.len() {
        let id = ChartId(i as u32);
        if !series.contains(&id) {
            series.push(id);
        }
    }

    let mut enc = Encoder::new(view.sources);
    enc.begin_object();

    if let Some(title) = view.title {
        enc.object_field("title");
        title.encode(&mut enc);
        enc.end_object();
    }
    if let Some(legend) = view.legend {
        enc.object_field("legend");
        legend.encode(&mut enc);
        enc.end_object();
    }
    if let Some(tooltip) = view.tooltip {
        enc.object_field("tooltip");
        tooltip.encode(&mut enc);
        enc.end_object();
    }

    let x_axes: Vec<_> = view
        .coords
        .iter()
        .flat_map(|c| c.x_axes().iter().copied())
        .collect();
    if !x_axes.is_empty() {
        enc.array_field("xAxis");
        for id in x_axes {
            enc.begin_object();
            view.axes.get(id).encode(&mut enc);
            enc.end_object();
        }
        enc.end_array();
    }

    let y_axes: Vec<_> = view
        .coords
        .iter()
        .flat_map(|c| c.y_axes().iter().copied())
        .collect();
    if !y_axes.is_empty() {
        enc.array_field("yAxis");
        for id in y_axes {
            enc.begin_object();
            view.axes.get(id).encode(&mut enc);
            enc.end_object();
        }
        enc.end_array();
    }

    enc.array_field("series");
    for id in series {
        let chart = &view.charts[id.as_u32() as usize];
        log::trace!("encoding series {:?}", chart.name().unwrap_or("<unnamed>"));
        enc.begin_object();
        chart.encode(&mut enc);
        enc.end_object();
    }
    enc.end_array();

    if let Some(zoom) = view.data_zoom {
        enc.object_field("dataZoom");
        zoom.encode(&mut enc);
        enc.end_object();
    }
    if let Some(map) = view.visual_map {
        enc.object_field("visualMap");
        map.encode(&mut enc);
        enc.end_object();
    }

    // The data dictionary: one entry per registered source, in
    // discovery order.
    enc.object_field("data");
    let registered: Vec<_> = enc.registry().to_vec();
    for id in registered {
        enc.emit_dictionary_entry(id);
    }
    enc.end_object();

    enc.end_object();
    let out = enc.finish();
    log::debug!("encoded document: {} bytes", out.len());
    out
}
