//! JSON rendering of failure records.
//!
//! Failures render as an object with a `global` array and a `fields` object
//! keyed by the display form of each path (`users[0].email`), preserving the
//! order in which failures were recorded.

use serde_json::{json, Map, Value};

use crate::failure::Failures;
use crate::proof::Proof;

impl<F> Failures<F> {
    /// Renders the record as JSON, converting each failure with `render`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Failures, FieldPath};
    /// use serde_json::json;
    ///
    /// let mut failures = Failures::new();
    /// failures.push_field(FieldPath::field("age"), 17);
    ///
    /// let rendered = failures.to_json_with(|age| json!({ "code": "too_young", "got": age }));
    /// assert_eq!(rendered["fields"]["age"][0]["got"], json!(17));
    /// ```
    pub fn to_json_with(&self, mut render: impl FnMut(&F) -> Value) -> Value {
        let global: Vec<Value> = self.global().iter().map(&mut render).collect();

        let mut fields = Map::new();
        for (path, failures) in self.fields().iter() {
            fields.insert(
                path.to_string(),
                Value::Array(failures.iter().map(&mut render).collect()),
            );
        }

        json!({
            "global": global,
            "fields": fields,
        })
    }
}

impl<F: ToString> Failures<F> {
    /// Renders the record as JSON, using each failure's display form.
    pub fn to_json(&self) -> Value {
        self.to_json_with(|failure| Value::String(failure.to_string()))
    }
}

impl<F: ToString, T> Proof<F, T> {
    /// Renders an invalid proof's failures as JSON. Returns `None` for a valid
    /// proof.
    pub fn failures_json(&self) -> Option<Value> {
        self.failures().map(Failures::to_json)
    }
}
