//! Result types produced by a freshness run.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A stale table and every reason it was flagged, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FreshnessResult {
    /// Fully qualified table identity.
    pub table: String,
    pub reasons: Vec<String>,
}

impl FreshnessResult {
    /// One report line: the identity, plus `(reason, reason)` when `detail`.
    #[must_use]
    pub fn render(&self, detail: bool) -> String {
        if detail && !self.reasons.is_empty() {
            format!("{} ({})", self.table, self.reasons.join(", "))
        } else {
            self.table.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FreshnessResult {
        FreshnessResult {
            table: "proj:ds.events_20200101".into(),
            reasons: vec!["first".into(), "second".into()],
        }
    }

    #[test]
    fn render_without_detail_is_identity() {
        assert_eq!(sample().render(false), "proj:ds.events_20200101");
    }

    #[test]
    fn render_with_detail_joins_reasons() {
        assert_eq!(
            sample().render(true),
            "proj:ds.events_20200101 (first, second)"
        );
    }

    #[test]
    fn serializes_with_stable_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["table"], "proj:ds.events_20200101");
        assert_eq!(value["reasons"][1], "second");
    }
}
