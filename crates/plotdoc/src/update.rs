//! Incremental updates to the data layer.
//!
//! An [`UpdateChannel`] binds an ordered list of data sources from an
//! already-encoded document and emits small messages that mutate only
//! the renderer's data dictionary; the structural tree is never
//! re-sent. Sources that have not been through a full encode (serial
//! still unassigned) are silently skipped in the payload.
//!
//! `push` assumes the renderer maintains a fixed-length sliding
//! window and displaces the oldest element itself; the channel only
//! ever emits the new value. That truncation is an external contract,
//! not something enforced here.

use plotdoc_core::{JsonWriter, SourceId, UpdateError, Value};

use crate::chart::Chart;
use crate::document::Document;

/// Update channel over a fixed set of bound sources.
#[derive(Clone, Debug, Default)]
pub struct UpdateChannel {
    sources: Vec<SourceId>,
}

impl UpdateChannel {
    pub fn new(sources: Vec<SourceId>) -> Self {
        Self { sources }
    }

    /// Bind every data slot of `chart`, in slot order. Unset slots
    /// are not bound.
    pub fn for_chart(chart: &Chart) -> Self {
        Self {
            sources: chart.data_slots().flatten().collect(),
        }
    }

    pub fn bind(mut self, source: SourceId) -> Self {
        self.sources.push(source);
        self
    }

    pub fn sources(&self) -> &[SourceId] {
        &self.sources
    }

    /// Grow each bound source's visible sequence by one element and
    /// emit the new values keyed by serial.
    ///
    /// `values` must carry exactly one value per bound source; null
    /// values and values incompatible with a source's declared data
    /// type are rejected before anything is applied.
    pub fn append(&self, doc: &mut Document, values: &[Value]) -> Result<String, UpdateError> {
        self.check(doc, values)?;
        for (&id, value) in self.sources.iter().zip(values) {
            doc.source_mut(id).push_value(value.clone());
        }
        Ok(self.payload(doc, values))
    }

    /// Emit the new values without growing the local sequences; the
    /// renderer displaces the oldest element per source.
    pub fn push(&self, doc: &Document, values: &[Value]) -> Result<String, UpdateError> {
        self.check(doc, values)?;
        Ok(self.payload(doc, values))
    }

    /// Clear all data for the bound sources, renderer-side and in the
    /// local list-backed buffers.
    pub fn reset(&self, doc: &mut Document) -> String {
        let mut w = JsonWriter::new();
        w.begin_object();
        w.array_field("d");
        for &id in &self.sources {
            let serial = doc.source(id).serial();
            if serial > 0 {
                w.element_num(serial as f64);
            }
        }
        w.end_array();
        w.end_object();

        for &id in &self.sources {
            if doc.source(id).is_registered() {
                doc.source_mut(id).clear();
            }
        }
        w.finish()
    }

    // Error order: empty input, arity, then per-element null and type
    // checks. Nothing is applied when any check fails.
    fn check(&self, doc: &Document, values: &[Value]) -> Result<(), UpdateError> {
        if values.is_empty() {
            return Err(UpdateError::EmptyData);
        }
        if values.len() != self.sources.len() {
            return Err(UpdateError::ArityMismatch {
                expected: self.sources.len(),
                got: values.len(),
            });
        }
        for (index, (&id, value)) in self.sources.iter().zip(values).enumerate() {
            if value.is_null() {
                return Err(UpdateError::NullValue { index });
            }
            let source = doc.source(id);
            if !source.data_type().accepts(value) {
                return Err(UpdateError::TypeMismatch {
                    index,
                    data_type: source.data_type().as_str(),
                    source_name: source.name().unwrap_or("<unnamed>").to_string(),
                });
            }
        }
        Ok(())
    }

    fn payload(&self, doc: &Document, values: &[Value]) -> String {
        let mut w = JsonWriter::new();
        w.begin_object();
        w.array_field("d");
        for (&id, value) in self.sources.iter().zip(values) {
            let serial = doc.source(id).serial();
            if serial <= 0 {
                // Not part of a rendered document yet; skip silently.
                continue;
            }
            w.begin_object();
            w.field_num("i", serial as f64);
            w.field("v", value);
            w.end_object();
        }
        w.end_array();
        w.end_object();
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotdoc_core::{DataSource, DataType};

    fn registered_doc() -> (Document, SourceId, SourceId) {
        let mut doc = Document::new();
        let cats = doc.add_source(DataSource::categories(["a"]).with_name("cats"));
        let nums = doc.add_source(DataSource::numbers([1.0]).with_name("nums"));
        doc.source_mut(cats).assign_serial(1);
        doc.source_mut(nums).assign_serial(2);
        (doc, cats, nums)
    }

    #[test]
    fn append_emits_keyed_values() {
        let (mut doc, cats, nums) = registered_doc();
        let channel = UpdateChannel::new(vec![cats, nums]);
        let msg = channel
            .append(&mut doc, &[Value::from("b"), Value::from(5)])
            .unwrap();
        assert_eq!(msg, "{\"d\":[{\"i\":1,\"v\":\"b\"},{\"i\":2,\"v\":5}]}");
        assert_eq!(doc.source(nums).visible_len(), Some(2));
    }

    #[test]
    fn push_does_not_grow_locally() {
        let (mut doc, cats, nums) = registered_doc();
        let channel = UpdateChannel::new(vec![cats, nums]);
        let msg = channel
            .push(&mut doc, &[Value::from("b"), Value::from(5)])
            .unwrap();
        assert!(msg.contains("\"i\":2"));
        assert_eq!(doc.source(nums).visible_len(), Some(1));
    }

    #[test]
    fn empty_input_rejected() {
        let (mut doc, cats, _) = registered_doc();
        let channel = UpdateChannel::new(vec![cats]);
        assert_eq!(channel.append(&mut doc, &[]), Err(UpdateError::EmptyData));
    }

    #[test]
    fn arity_mismatch_rejected() {
        let (mut doc, cats, nums) = registered_doc();
        let channel = UpdateChannel::new(vec![cats, nums]);
        let err = channel.append(&mut doc, &[Value::from(1)]).unwrap_err();
        assert_eq!(err, UpdateError::ArityMismatch { expected: 2, got: 1 });
    }

    #[test]
    fn null_value_rejected() {
        let (mut doc, cats, nums) = registered_doc();
        let channel = UpdateChannel::new(vec![cats, nums]);
        let err = channel
            .append(&mut doc, &[Value::from("b"), Value::Null])
            .unwrap_err();
        assert_eq!(err, UpdateError::NullValue { index: 1 });
    }

    #[test]
    fn type_mismatch_rejected_and_not_applied() {
        let (mut doc, cats, nums) = registered_doc();
        let channel = UpdateChannel::new(vec![cats, nums]);
        let err = channel
            .append(&mut doc, &[Value::from("b"), Value::from("not-a-number")])
            .unwrap_err();
        assert!(matches!(err, UpdateError::TypeMismatch { index: 1, .. }));
        assert_eq!(doc.source(cats).visible_len(), Some(1), "nothing applied");
    }

    #[test]
    fn unregistered_source_skipped_silently() {
        let mut doc = Document::new();
        let fresh = doc.add_source(DataSource::numbers([1.0]));
        let channel = UpdateChannel::new(vec![fresh]);
        let msg = channel.append(&mut doc, &[Value::from(2)]).unwrap();
        assert_eq!(msg, "{\"d\":[]}");
    }

    #[test]
    fn reset_emits_serials_and_clears() {
        let (mut doc, cats, nums) = registered_doc();
        let channel = UpdateChannel::new(vec![cats, nums]);
        let msg = channel.reset(&mut doc);
        assert_eq!(msg, "{\"d\":[1,2]}");
        assert_eq!(doc.source(cats).visible_len(), Some(0));
    }

    #[test]
    fn for_chart_binds_slots_in_order() {
        use crate::chart::ChartKind;

        let mut doc = Document::new();
        let x = doc.add_source(DataSource::categories(["a"]));
        let y = doc.add_source(DataSource::numbers([1.0]));
        let mut chart = Chart::new(ChartKind::Bar);
        chart.set_data(0, x);
        chart.set_data(1, y);

        let channel = UpdateChannel::for_chart(&chart);
        assert_eq!(channel.sources(), &[x, y]);
    }

    #[test]
    fn logarithmic_type_check() {
        let mut doc = Document::new();
        let log = doc.add_source(DataSource::list(DataType::Logarithmic, vec![]).with_name("log"));
        doc.source_mut(log).assign_serial(1);
        let channel = UpdateChannel::new(vec![log]);
        assert!(channel.push(&doc, &[Value::from(10)]).is_ok());
        assert!(matches!(
            channel.push(&doc, &[Value::from(-1)]),
            Err(UpdateError::TypeMismatch { .. })
        ));
    }
}
