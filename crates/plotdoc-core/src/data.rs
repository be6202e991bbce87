//! Typed data sources and the arena that owns them.
//!
//! A [`DataSource`] is an ordered sequence of [`Value`]s with a
//! declared [`DataType`]. Sources are owned by a [`SourceArena`] and
//! referenced everywhere else by [`SourceId`]; identity for serial
//! assignment is the arena handle, never value equality.
//!
//! A source starts with `serial == -1`. The serialization driver
//! assigns a positive serial the first time the source is encountered
//! during a full encode pass; once assigned, the serial never changes
//! for the life of the document.

use std::fmt;

use chrono::{Duration, NaiveDate};

use crate::value::Value;

/// Declared type of a data sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    Number,
    Category,
    Date,
    Time,
    Logarithmic,
    Object,
}

impl DataType {
    /// Name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Number => "number",
            DataType::Category => "category",
            DataType::Date => "date",
            DataType::Time => "time",
            DataType::Logarithmic => "logarithmic",
            DataType::Object => "object",
        }
    }

    /// Runtime compatibility check for a single value.
    ///
    /// `Null` is never acceptable; the update channel rejects it
    /// separately before this check runs.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            DataType::Number => matches!(value, Value::Number(_)),
            DataType::Category => matches!(value, Value::Text(_) | Value::Number(_)),
            DataType::Date | DataType::Time => {
                matches!(value, Value::Text(_) | Value::Number(_))
            }
            DataType::Logarithmic => matches!(value, Value::Number(n) if *n > 0.0),
            DataType::Object => !value.is_null(),
        }
    }
}

/// Handle to a data source owned by a [`SourceArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceId(u32);

impl SourceId {
    pub fn as_u32(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Iterator factory for caller-supplied lazy sources.
pub type GeneratorFn = Box<dyn Fn() -> Box<dyn Iterator<Item = Value>>>;

/// Backing storage for a source's value sequence.
///
/// Only `List` is materialized; the other backings produce their
/// values lazily each time the source is iterated.
pub enum SourceData {
    List(Vec<Value>),
    Range { start: f64, step: f64, count: usize },
    DateRange { start: NaiveDate, step_days: i64, count: usize },
    Generator(GeneratorFn),
}

impl fmt::Debug for SourceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceData::List(values) => f.debug_tuple("List").field(&values.len()).finish(),
            SourceData::Range { start, step, count } => f
                .debug_struct("Range")
                .field("start", start)
                .field("step", step)
                .field("count", count)
                .finish(),
            SourceData::DateRange { start, step_days, count } => f
                .debug_struct("DateRange")
                .field("start", start)
                .field("step_days", step_days)
                .field("count", count)
                .finish(),
            SourceData::Generator(_) => f.write_str("Generator"),
        }
    }
}

/// An identified, typed, ordered sequence of values.
#[derive(Debug)]
pub struct DataSource {
    data_type: DataType,
    name: Option<String>,
    serial: i32,
    data: SourceData,
}

impl DataSource {
    pub fn new(data_type: DataType, data: SourceData) -> Self {
        Self {
            data_type,
            name: None,
            serial: -1,
            data,
        }
    }

    /// A list-backed source of the given type.
    pub fn list(data_type: DataType, values: Vec<Value>) -> Self {
        Self::new(data_type, SourceData::List(values))
    }

    /// A list-backed NUMBER source.
    pub fn numbers(values: impl IntoIterator<Item = f64>) -> Self {
        Self::list(
            DataType::Number,
            values.into_iter().map(Value::Number).collect(),
        )
    }

    /// A list-backed CATEGORY source.
    pub fn categories<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::list(
            DataType::Category,
            names.into_iter().map(|s| Value::Text(s.into())).collect(),
        )
    }

    /// A lazy arithmetic range of NUMBER values.
    pub fn range(start: f64, step: f64, count: usize) -> Self {
        Self::new(DataType::Number, SourceData::Range { start, step, count })
    }

    /// A lazy calendar range, emitted as ISO `YYYY-MM-DD` strings.
    pub fn date_range(start: NaiveDate, step_days: i64, count: usize) -> Self {
        Self::new(
            DataType::Date,
            SourceData::DateRange { start, step_days, count },
        )
    }

    /// A caller-supplied lazy source. The closure is invoked once per
    /// full encode; unbounded generators must be bounded by the caller
    /// before registration.
    pub fn generator(data_type: DataType, f: GeneratorFn) -> Self {
        Self::new(data_type, SourceData::Generator(f))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The assigned serial, or -1 if this source has not been through
    /// a full encode yet.
    pub fn serial(&self) -> i32 {
        self.serial
    }

    pub fn is_registered(&self) -> bool {
        self.serial > 0
    }

    /// Record the serial assigned by the serialization driver.
    /// Write-once: a source that already carries a serial keeps it.
    pub fn assign_serial(&mut self, serial: i32) {
        debug_assert!(serial > 0, "serials are positive");
        if self.serial <= 0 {
            self.serial = serial;
        }
    }

    /// Iterate the visible sequence lazily. List-backed sources are
    /// borrowed, not copied; generator backings produce a fresh
    /// iterator per call.
    pub fn iter(&self) -> Box<dyn Iterator<Item = Value> + '_> {
        match &self.data {
            SourceData::List(values) => Box::new(values.iter().cloned()),
            SourceData::Range { start, step, count } => {
                let (start, step) = (*start, *step);
                Box::new((0..*count).map(move |i| Value::Number(start + step * i as f64)))
            }
            SourceData::DateRange { start, step_days, count } => {
                let (start, step_days) = (*start, *step_days);
                Box::new((0..*count).map(move |i| {
                    let day = start + Duration::days(step_days * i as i64);
                    Value::Text(day.format("%Y-%m-%d").to_string())
                }))
            }
            SourceData::Generator(f) => f(),
        }
    }

    /// Length of the materialized sequence, if this source has one.
    pub fn visible_len(&self) -> Option<usize> {
        match &self.data {
            SourceData::List(values) => Some(values.len()),
            SourceData::Range { count, .. } | SourceData::DateRange { count, .. } => Some(*count),
            SourceData::Generator(_) => None,
        }
    }

    /// Grow a list-backed sequence by one element. Returns false for
    /// lazy backings, whose visible sequence lives renderer-side.
    pub fn push_value(&mut self, value: Value) -> bool {
        match &mut self.data {
            SourceData::List(values) => {
                values.push(value);
                true
            }
            _ => false,
        }
    }

    /// Clear a list-backed sequence. No-op for lazy backings.
    pub fn clear(&mut self) {
        if let SourceData::List(values) = &mut self.data {
            values.clear();
        }
    }
}

/// Owns every data source of one document and hands out ids.
#[derive(Debug, Default)]
pub struct SourceArena {
    sources: Vec<DataSource>,
}

impl SourceArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: DataSource) -> SourceId {
        let id = SourceId(self.sources.len() as u32);
        self.sources.push(source);
        id
    }

    /// Look up a source. Panics on a handle from another arena.
    pub fn get(&self, id: SourceId) -> &DataSource {
        &self.sources[id.index()]
    }

    pub fn get_mut(&mut self, id: SourceId) -> &mut DataSource {
        &mut self.sources[id.index()]
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SourceId, &DataSource)> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, s)| (SourceId(i as u32), s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_source_is_unregistered() {
        let s = DataSource::numbers([1.0, 2.0]);
        assert_eq!(s.serial(), -1);
        assert!(!s.is_registered());
    }

    #[test]
    fn serial_is_write_once() {
        let mut s = DataSource::numbers([1.0]);
        s.assign_serial(3);
        s.assign_serial(7);
        assert_eq!(s.serial(), 3);
    }

    #[test]
    fn range_is_lazy_and_repeatable() {
        let s = DataSource::range(10.0, 2.0, 3);
        let first: Vec<Value> = s.iter().collect();
        let second: Vec<Value> = s.iter().collect();
        assert_eq!(first, vec![Value::Number(10.0), Value::Number(12.0), Value::Number(14.0)]);
        assert_eq!(first, second);
    }

    #[test]
    fn date_range_formats_iso() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let s = DataSource::date_range(start, 1, 3);
        let days: Vec<Value> = s.iter().collect();
        assert_eq!(days[0], Value::from("2024-12-30"));
        assert_eq!(days[2], Value::from("2025-01-01"));
    }

    #[test]
    fn generator_source() {
        let s = DataSource::generator(
            DataType::Number,
            Box::new(|| Box::new((0..4).map(|i| Value::Number(i as f64 * i as f64)))),
        );
        let values: Vec<Value> = s.iter().collect();
        assert_eq!(values.len(), 4);
        assert_eq!(values[3], Value::Number(9.0));
        assert_eq!(s.visible_len(), None);
    }

    #[test]
    fn push_value_grows_lists_only() {
        let mut list = DataSource::numbers([1.0]);
        assert!(list.push_value(Value::Number(2.0)));
        assert_eq!(list.visible_len(), Some(2));

        let mut range = DataSource::range(0.0, 1.0, 5);
        assert!(!range.push_value(Value::Number(9.0)));
        assert_eq!(range.visible_len(), Some(5));
    }

    #[test]
    fn accepts_by_type() {
        assert!(DataType::Number.accepts(&Value::Number(1.0)));
        assert!(!DataType::Number.accepts(&Value::from("x")));
        assert!(DataType::Category.accepts(&Value::from("east")));
        assert!(DataType::Logarithmic.accepts(&Value::Number(0.5)));
        assert!(!DataType::Logarithmic.accepts(&Value::Number(0.0)));
        assert!(DataType::Object.accepts(&Value::List(vec![])));
        assert!(!DataType::Object.accepts(&Value::Null));
    }

    #[test]
    fn arena_handles() {
        let mut arena = SourceArena::new();
        let a = arena.insert(DataSource::numbers([1.0]));
        let b = arena.insert(DataSource::categories(["x"]));
        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(b).data_type(), DataType::Category);
    }
}
