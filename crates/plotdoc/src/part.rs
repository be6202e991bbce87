//! The encodable part contract and the per-pass encoder.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::ops::{Deref, DerefMut};

use plotdoc_core::{JsonWriter, SourceArena, SourceId, ValidateError};

/// Any node in the component graph that can validate and encode
/// itself.
///
/// `encode` appends this part's structural fragment: the *body* of an
/// object, fields only, no surrounding braces. The parent opens and
/// closes the scope, so composition controls separators. Encoding is
/// idempotent; the only state it touches is the write-once serial
/// registration performed through [`Encoder::data_ref`].
pub trait Part {
    /// Human-readable class name used in validation errors.
    fn part_name(&self) -> &'static str;

    /// Optional instance name, included in error messages when set.
    fn instance_name(&self) -> Option<&str> {
        None
    }

    /// Check required state. Runs before any bytes are produced.
    fn validate(&self) -> Result<(), ValidateError> {
        Ok(())
    }

    /// Append this part's structural fragment.
    fn encode(&self, enc: &mut Encoder<'_>);
}

/// Build the error label for a part: `bar chart 'revenue'`.
pub fn part_label(part: &dyn Part) -> String {
    match part.instance_name() {
        Some(name) => format!("{} '{}'", part.part_name(), name),
        None => part.part_name().to_string(),
    }
}

/// Encoder state for one full encode pass: the output writer, the
/// discovery-ordered serial registry, and the document's sources.
///
/// The registry is rebuilt fresh per pass; serials themselves are
/// write-once on the sources, so an unchanged document re-encodes to
/// the same serials. The next-serial counter starts above every
/// serial already assigned in the arena, so sources added after an
/// earlier pass never collide with a held number.
pub struct Encoder<'a> {
    writer: JsonWriter,
    arena: &'a mut SourceArena,
    registry: Vec<SourceId>,
    serials: HashMap<SourceId, i32>,
    next_serial: i32,
}

impl<'a> Encoder<'a> {
    pub fn new(arena: &'a mut SourceArena) -> Self {
        let next_serial = arena
            .iter()
            .map(|(_, source)| source.serial())
            .filter(|&serial| serial > 0)
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            writer: JsonWriter::new(),
            arena,
            registry: Vec::new(),
            serials: HashMap::new(),
            next_serial,
        }
    }

    /// Register `id` on first sight and return its serial.
    ///
    /// Re-encountering the same source within one pass is a no-op;
    /// identity is the arena handle, not value equality.
    pub fn register(&mut self, id: SourceId) -> i32 {
        if let Some(&serial) = self.serials.get(&id) {
            return serial;
        }
        let source = self.arena.get_mut(id);
        if !source.is_registered() {
            source.assign_serial(self.next_serial);
            self.next_serial += 1;
        }
        let serial = source.serial();
        log::debug!(
            "registered data source {:?} as d{}",
            source.name().unwrap_or("<unnamed>"),
            serial
        );
        self.registry.push(id);
        self.serials.insert(id, serial);
        serial
    }

    /// Register `id` and write its `"d<serial>"` placeholder under
    /// `key`.
    pub fn data_ref(&mut self, key: &str, id: SourceId) {
        let serial = self.register(id);
        let mut placeholder = String::with_capacity(8);
        let _ = write!(placeholder, "d{serial}");
        self.writer.field_str(key, &placeholder);
    }

    /// Inline a source's values as an array under `key`, without
    /// registering it (small-data emission, e.g. gauge series).
    pub fn data_inline(&mut self, key: &str, id: SourceId) {
        let Self { writer, arena, .. } = self;
        writer.array_field(key);
        for value in arena.get(id).iter() {
            writer.element(&value);
        }
        writer.end_array();
    }

    /// Sources registered so far, in discovery order.
    pub fn registry(&self) -> &[SourceId] {
        &self.registry
    }

    /// Emit the data dictionary entry `"d<serial>": [...]` for a
    /// registered source, pulling its values lazily.
    pub fn emit_dictionary_entry(&mut self, id: SourceId) {
        let serial = self.serials[&id];
        let Self { writer, arena, .. } = self;
        let mut key = String::with_capacity(8);
        let _ = write!(key, "d{serial}");
        writer.array_field(&key);
        for value in arena.get(id).iter() {
            writer.element(&value);
        }
        writer.end_array();
    }

    pub fn finish(self) -> String {
        self.writer.finish()
    }
}

impl Deref for Encoder<'_> {
    type Target = JsonWriter;

    fn deref(&self) -> &JsonWriter {
        &self.writer
    }
}

impl DerefMut for Encoder<'_> {
    fn deref_mut(&mut self) -> &mut JsonWriter {
        &mut self.writer
    }
}
