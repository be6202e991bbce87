//! JSON fragment writer with automatic comma management.
//!
//! Parts append their structural fragments through this writer rather
//! than concatenating strings by hand; the writer tracks open
//! object/array scopes and inserts separators so that composition
//! never produces a misplaced comma.

use crate::value::{emit_number, emit_string, Value};

/// Append-only JSON writer.
#[derive(Debug, Default)]
pub struct JsonWriter {
    out: String,
    // One flag per open scope: has a key/element been written yet?
    scopes: Vec<bool>,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(256),
            scopes: Vec::new(),
        }
    }

    /// Consume the writer and return the produced text.
    pub fn finish(self) -> String {
        debug_assert!(self.scopes.is_empty(), "unclosed scope at finish");
        self.out
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    // ========================================================================
    // Scopes
    // ========================================================================

    /// Open an object as an array element or at the top level.
    pub fn begin_object(&mut self) {
        self.sep();
        self.open('{');
    }

    pub fn end_object(&mut self) {
        self.out.push('}');
        self.scopes.pop();
    }

    /// Open an array as an array element or at the top level.
    pub fn begin_array(&mut self) {
        self.sep();
        self.open('[');
    }

    pub fn end_array(&mut self) {
        self.out.push(']');
        self.scopes.pop();
    }

    /// Open an object under `key` in the current object.
    pub fn object_field(&mut self, key: &str) {
        self.key(key);
        self.open('{');
    }

    /// Open an array under `key` in the current object.
    pub fn array_field(&mut self, key: &str) {
        self.key(key);
        self.open('[');
    }

    // ========================================================================
    // Keyed properties
    // ========================================================================

    pub fn field(&mut self, key: &str, value: &Value) {
        self.key(key);
        value.emit(&mut self.out);
    }

    pub fn field_str(&mut self, key: &str, value: &str) {
        self.key(key);
        emit_string(&mut self.out, value);
    }

    pub fn field_num(&mut self, key: &str, value: f64) {
        self.key(key);
        emit_number(&mut self.out, value);
    }

    pub fn field_bool(&mut self, key: &str, value: bool) {
        self.key(key);
        self.out.push_str(if value { "true" } else { "false" });
    }

    // ========================================================================
    // Array elements
    // ========================================================================

    pub fn element(&mut self, value: &Value) {
        self.sep();
        value.emit(&mut self.out);
    }

    pub fn element_num(&mut self, value: f64) {
        self.sep();
        emit_number(&mut self.out, value);
    }

    pub fn element_str(&mut self, value: &str) {
        self.sep();
        emit_string(&mut self.out, value);
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn open(&mut self, c: char) {
        self.out.push(c);
        self.scopes.push(false);
    }

    fn key(&mut self, key: &str) {
        self.sep();
        emit_string(&mut self.out, key);
        self.out.push(':');
    }

    fn sep(&mut self) {
        if let Some(written) = self.scopes.last_mut() {
            if *written {
                self.out.push(',');
            } else {
                *written = true;
            }
        }
    }
}
