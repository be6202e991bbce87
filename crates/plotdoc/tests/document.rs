//! Full-document encoding tests.
//!
//! These exercise the whole pipeline: graph construction, validation,
//! serial assignment and the emitted document shape.

use plotdoc::{
    Axis, Chart, ChartKind, CoordinateSystem, DataSource, Document, GraphData, Label, Legend,
    Title, Tooltip, Value,
};

// ============================================================================
// Helpers
// ============================================================================

/// A bar + line document sharing one category source between the x
/// axis and both series.
fn sales_document() -> Document {
    let mut doc = Document::new();
    doc.set_title(Title::new("Sales").with_subtext("by region"));
    doc.set_legend(Legend::new().with_entry("actual").with_entry("target"));
    doc.set_tooltip(Tooltip::axis_triggered());

    let regions = doc.add_source(DataSource::categories(["north", "south", "west"]));
    let actual = doc.add_source(DataSource::numbers([12.0, 30.5, 7.0]).with_name("actual"));
    let target = doc.add_source(DataSource::numbers([15.0, 28.0, 10.0]).with_name("target"));

    let x_axis = doc.add_axis(Axis::category(regions).with_name("region"));
    let y_axis = doc.add_axis(Axis::value());
    let mut coord = CoordinateSystem::new();
    coord.add_x_axis(x_axis).add_y_axis(y_axis);
    let coord = doc.add_coord(coord);

    let mut bar = Chart::named(ChartKind::Bar, "actual");
    bar.set_data(0, regions);
    bar.set_data(1, actual);
    let bar = doc.add_chart(bar);
    doc.attach(bar, coord);

    let mut line = Chart::named(ChartKind::Line, "target");
    line.set_data(0, regions);
    line.set_data(1, target);
    let line = doc.add_chart(line);
    doc.attach(line, coord);

    doc
}

/// Collect every `d<serial>` placeholder string in the structural
/// tree, excluding the reserved top-level data dictionary.
fn placeholders(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::String(s) => {
            if s.len() > 1 && s.starts_with('d') && s[1..].bytes().all(|b| b.is_ascii_digit()) {
                out.push(s.clone());
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                placeholders(item, out);
            }
        }
        serde_json::Value::Object(map) => {
            for item in map.values() {
                placeholders(item, out);
            }
        }
        _ => {}
    }
}

// ============================================================================
// Document shape
// ============================================================================

#[test]
fn document_parses_as_json() {
    let mut doc = sales_document();
    let text = doc.encode().expect("encode should succeed");
    let parsed: serde_json::Value = serde_json::from_str(&text).expect("well-formed JSON");
    assert!(parsed.get("title").is_some());
    assert!(parsed.get("series").is_some());
    assert!(parsed.get("data").is_some());
}

#[test]
fn data_keys_match_placeholders_exactly() {
    let mut doc = sales_document();
    let text = doc.encode().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

    let mut structural = parsed.as_object().unwrap().clone();
    let dict = structural.remove("data").unwrap();
    let dict_keys: std::collections::BTreeSet<String> =
        dict.as_object().unwrap().keys().cloned().collect();

    let mut referenced = Vec::new();
    placeholders(&serde_json::Value::Object(structural), &mut referenced);
    let referenced: std::collections::BTreeSet<String> = referenced.into_iter().collect();

    assert_eq!(dict_keys, referenced, "no orphans, no dangling references");
}

#[test]
fn serials_are_a_gapless_permutation() {
    let mut doc = sales_document();
    let text = doc.encode().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

    let mut serials: Vec<i64> = parsed["data"]
        .as_object()
        .unwrap()
        .keys()
        .map(|k| k[1..].parse().unwrap())
        .collect();
    serials.sort();
    let expected: Vec<i64> = (1..=serials.len() as i64).collect();
    assert_eq!(serials, expected);
}

#[test]
fn shared_source_registered_once() {
    let mut doc = sales_document();
    let text = doc.encode().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

    // regions is referenced by the x axis and both series; one
    // dictionary entry for three references.
    assert_eq!(parsed["data"].as_object().unwrap().len(), 3);

    let mut referenced = Vec::new();
    let mut structural = parsed.as_object().unwrap().clone();
    structural.remove("data");
    placeholders(&serde_json::Value::Object(structural), &mut referenced);
    assert_eq!(referenced.len(), 5, "three sources, five references");
}

#[test]
fn re_encoding_unchanged_document_is_deterministic() {
    let mut doc = sales_document();
    let first = doc.encode().unwrap();
    let second = doc.encode().unwrap();
    assert_eq!(first, second);
}

#[test]
fn sources_added_between_encodes_get_fresh_serials() {
    let mut doc = Document::new();
    let days = doc.add_source(DataSource::categories(["mon", "tue"]));
    let load = doc.add_source(DataSource::numbers([3.0, 4.0]));

    let x_axis = doc.add_axis(Axis::category(days));
    let y_axis = doc.add_axis(Axis::value());
    let mut coord = CoordinateSystem::new();
    coord.add_x_axis(x_axis).add_y_axis(y_axis);
    let coord = doc.add_coord(coord);

    let mut bar = Chart::new(ChartKind::Bar);
    bar.set_data(0, days);
    bar.set_data(1, load);
    let bar = doc.add_chart(bar);
    doc.attach(bar, coord);
    doc.encode().unwrap();

    // A second category axis added after the first pass; its source
    // is discovered before the series sources on the next pass and
    // must not collide with their held serials.
    let shifts = doc.add_source(DataSource::categories(["early", "late"]));
    let second_x = doc.add_axis(Axis::category(shifts));
    doc.coord_mut(coord).add_x_axis(second_x);

    let text = doc.encode().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

    let serials = [
        doc.source(days).serial(),
        doc.source(load).serial(),
        doc.source(shifts).serial(),
    ];
    let distinct: std::collections::BTreeSet<i32> = serials.iter().copied().collect();
    assert_eq!(distinct.len(), 3, "serials stay duplicate-free: {serials:?}");
    assert_eq!(doc.source(days).serial(), 1, "held serials survive");
    assert_eq!(doc.source(load).serial(), 2);
    assert_eq!(doc.source(shifts).serial(), 3);

    let mut structural = parsed.as_object().unwrap().clone();
    let dict = structural.remove("data").unwrap();
    assert_eq!(dict.as_object().unwrap().len(), 3);
    let dict_keys: std::collections::BTreeSet<String> =
        dict.as_object().unwrap().keys().cloned().collect();
    let mut referenced = Vec::new();
    placeholders(&serde_json::Value::Object(structural), &mut referenced);
    let referenced: std::collections::BTreeSet<String> = referenced.into_iter().collect();
    assert_eq!(dict_keys, referenced);
}

#[test]
fn data_values_survive_the_trip() {
    let mut doc = Document::new();
    let values = doc.add_source(
        DataSource::list(
            plotdoc::DataType::Object,
            vec![Value::from("he said \"hi\"\nthen left"), Value::from(2.5)],
        )
        .with_name("notes"),
    );
    let mut pie = Chart::new(ChartKind::Pie);
    let names = doc.add_source(DataSource::categories(["a", "b"]));
    pie.set_data(0, names);
    pie.set_data(1, values);
    doc.add_chart(pie);

    let text = doc.encode().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    // Slot order fixes discovery order: names is d1, notes d2.
    let dict = parsed["data"].as_object().unwrap();
    assert_eq!(dict["d2"][0].as_str().unwrap(), "he said \"hi\"\nthen left");
    assert_eq!(dict["d2"][1].as_f64().unwrap(), 2.5);
}

#[test]
fn lazy_sources_are_materialized_at_encode_time() {
    let mut doc = Document::new();
    let start = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let days = doc.add_source(DataSource::date_range(start, 7, 3));
    let values = doc.add_source(DataSource::range(0.0, 10.0, 3));

    let mut pie = Chart::new(ChartKind::Pie);
    pie.set_data(0, days);
    pie.set_data(1, values);
    doc.add_chart(pie);

    let text = doc.encode().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let dict = parsed["data"].as_object().unwrap();
    assert_eq!(dict["d1"][0].as_str().unwrap(), "2026-01-01");
    assert_eq!(dict["d1"][2].as_str().unwrap(), "2026-01-15");
    assert_eq!(dict["d2"][2].as_f64().unwrap(), 20.0);
}

// ============================================================================
// Validation before encoding
// ============================================================================

#[test]
fn missing_slot_aborts_with_named_part() {
    let mut doc = Document::new();
    let regions = doc.add_source(DataSource::categories(["a"]));
    let x_axis = doc.add_axis(Axis::category(regions));
    let y_axis = doc.add_axis(Axis::value());
    let mut coord = CoordinateSystem::new();
    coord.add_x_axis(x_axis).add_y_axis(y_axis);
    let coord = doc.add_coord(coord);

    let mut bar = Chart::named(ChartKind::Bar, "revenue");
    bar.set_data(0, regions);
    let bar = doc.add_chart(bar);
    doc.attach(bar, coord);

    let err = doc.encode().unwrap_err();
    assert_eq!(
        err.to_string(),
        "data for y axis not set for bar chart 'revenue'"
    );
}

#[test]
fn invalid_subtree_fails_before_serial_assignment() {
    let mut doc = Document::new();
    let regions = doc.add_source(DataSource::categories(["a", "b"]));
    let values = doc.add_source(DataSource::numbers([1.0, 2.0]));
    let mut pie = Chart::new(ChartKind::Pie);
    pie.set_data(0, regions);
    pie.set_data(1, values);
    doc.add_chart(pie);
    // A broken chart anywhere in the graph aborts the whole pass
    // before any serial is handed out.
    doc.add_chart(Chart::new(ChartKind::Sankey));

    assert!(doc.encode().is_err());
    assert_eq!(doc.source(regions).serial(), -1);
    assert_eq!(doc.source(values).serial(), -1);
}

// ============================================================================
// Sankey documents
// ============================================================================

#[test]
fn sankey_document_inlines_nodes_and_links() {
    let mut doc = Document::new();
    let mut flows = GraphData::new();
    flows.add_edge("coal", "power", Some(20.0));
    flows.add_edge("power", "homes", Some(12.0));
    let mut chart = Chart::named(ChartKind::Sankey, "energy");
    chart.set_graph_data(flows);
    chart = chart.with_label(Label::new().with_position("right"));
    doc.add_chart(chart);

    let text = doc.encode().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let series = &parsed["series"][0];
    assert_eq!(series["type"].as_str().unwrap(), "sankey");
    assert_eq!(series["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(series["links"][0]["source"].as_str().unwrap(), "coal");
    assert!(parsed["data"].as_object().unwrap().is_empty());
}

#[test]
fn cyclic_sankey_rejected_at_document_level() {
    let mut doc = Document::new();
    let mut flows = GraphData::new();
    flows.add_edge("a", "b", None);
    flows.add_edge("b", "c", None);
    flows.add_edge("c", "a", None);
    let mut chart = Chart::new(ChartKind::Sankey);
    chart.set_graph_data(flows);
    doc.add_chart(chart);

    let err = doc.encode().unwrap_err();
    assert!(err.to_string().contains("circular edge"));
}
