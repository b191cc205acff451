//! Partial view over a models listing body.
//!
//! The portal's response is loosely typed: every key may be missing or
//! carry an unexpected type. Rather than deserializing into a struct (and
//! losing the whole body on one mismatch), read fields lazily and treat
//! anything absent or mistyped as its falsy value.

use serde_json::Value;

#[derive(Debug, Clone, Copy)]
pub struct ModelsView<'a> {
    data: Option<&'a Value>,
}

impl<'a> ModelsView<'a> {
    pub fn new(data: Option<&'a Value>) -> Self {
        Self { data }
    }

    fn field(&self, name: &str) -> Option<&'a Value> {
        self.data?.get(name)
    }

    fn tier(&self, tier: &str) -> &'a [Value] {
        self.field("models")
            .and_then(|m| m.get(tier))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn status(&self) -> Option<&'a str> {
        self.field("status").and_then(Value::as_str)
    }

    /// `models.dev`, string entries only.
    pub fn dev_models(&self) -> Vec<&'a str> {
        self.tier("dev").iter().filter_map(Value::as_str).collect()
    }

    /// `models.prod`, string entries only.
    pub fn prod_models(&self) -> Vec<&'a str> {
        self.tier("prod").iter().filter_map(Value::as_str).collect()
    }

    /// True iff `models.prod` is a non-empty array.
    pub fn has_production_models(&self) -> bool {
        !self.tier("prod").is_empty()
    }

    /// True iff `admin` is exactly boolean `true`.
    pub fn is_admin(&self) -> bool {
        matches!(self.field("admin"), Some(Value::Bool(true)))
    }

    pub fn note(&self) -> Option<&'a str> {
        self.field("note").and_then(Value::as_str)
    }
}
