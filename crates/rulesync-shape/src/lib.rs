//! Structural validation for JSON documents
//!
//! Checks that two JSON trees have the same *shape* while ignoring leaf values:
//! - same JSON kind at every corresponding path,
//! - same key sets for objects,
//! - same lengths for arrays (elements compared pairwise by index).
//!
//! Typical use: a localized copy of a document must not drift structurally
//! from its source. Every difference is collected; truncating the list for
//! display is left to the caller.

pub mod path;

pub use path::{PathSegment, TreePath};

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// JSON value kind (the only thing compared at a leaf)
///
/// Integers and floats are distinct kinds: `3` → `3.5` in a translation is a
/// type mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonKind {
    Object,
    Array,
    String,
    Integer,
    Float,
    Boolean,
    Null,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => JsonKind::Object,
            Value::Array(_) => JsonKind::Array,
            Value::String(_) => JsonKind::String,
            Value::Number(n) if n.is_f64() => JsonKind::Float,
            Value::Number(_) => JsonKind::Integer,
            Value::Bool(_) => JsonKind::Boolean,
            Value::Null => JsonKind::Null,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JsonKind::Object => "object",
            JsonKind::Array => "array",
            JsonKind::String => "string",
            JsonKind::Integer => "integer",
            JsonKind::Float => "float",
            JsonKind::Boolean => "boolean",
            JsonKind::Null => "null",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names for the two documents, used in rendered reasons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideLabels {
    pub source: String,
    pub target: String,
}

impl Default for SideLabels {
    fn default() -> Self {
        Self {
            source: "source".to_string(),
            target: "target".to_string(),
        }
    }
}

impl SideLabels {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// One structural difference. Never fatal; the comparison keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeDiagnostic {
    TypeMismatch {
        path: TreePath,
        source: JsonKind,
        target: JsonKind,
    },
    /// Key present in the source, absent in the target. `path` includes the key.
    MissingKey { path: TreePath },
    /// Key present in the target, absent in the source. `path` includes the key.
    ExtraKey { path: TreePath },
    ArrayLengthMismatch {
        path: TreePath,
        source: usize,
        target: usize,
    },
}

impl ShapeDiagnostic {
    pub fn path(&self) -> &TreePath {
        match self {
            ShapeDiagnostic::TypeMismatch { path, .. }
            | ShapeDiagnostic::MissingKey { path }
            | ShapeDiagnostic::ExtraKey { path }
            | ShapeDiagnostic::ArrayLengthMismatch { path, .. } => path,
        }
    }

    pub fn reason(&self, labels: &SideLabels) -> String {
        let (src, tgt) = (&labels.source, &labels.target);
        match self {
            ShapeDiagnostic::TypeMismatch { source, target, .. } => {
                format!("Type mismatch - {src}: {source}, {tgt}: {target}")
            }
            ShapeDiagnostic::MissingKey { .. } => format!("Missing in {tgt}"),
            ShapeDiagnostic::ExtraKey { .. } => format!("Extra key in {tgt} (not in {src})"),
            ShapeDiagnostic::ArrayLengthMismatch { source, target, .. } => {
                format!("Array length mismatch - {src}: {source}, {tgt}: {target}")
            }
        }
    }

    /// `<path>: <reason>`
    pub fn render(&self, labels: &SideLabels) -> String {
        format!("{}: {}", self.path(), self.reason(labels))
    }
}

impl fmt::Display for ShapeDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&SideLabels::default()))
    }
}

/// Result of comparing two documents.
#[derive(Debug, Clone, Serialize)]
pub struct ShapeReport {
    pub labels: SideLabels,
    pub diagnostics: Vec<ShapeDiagnostic>,
}

impl ShapeReport {
    pub fn is_equivalent(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Rendered `<path>: <reason>` lines, in discovery order.
    pub fn lines(&self) -> Vec<String> {
        self.diagnostics
            .iter()
            .map(|d| d.render(&self.labels))
            .collect()
    }
}

/// Compare the shapes of `source` and `target`, collecting every difference.
pub fn compare_structures(source: &Value, target: &Value) -> Vec<ShapeDiagnostic> {
    let mut errors = Vec::new();
    let mut path = TreePath::root();
    compare_at(source, target, &mut path, &mut errors);
    errors
}

pub fn validate_structure(source: &Value, target: &Value, labels: SideLabels) -> ShapeReport {
    ShapeReport {
        labels,
        diagnostics: compare_structures(source, target),
    }
}

fn compare_at(
    source: &Value,
    target: &Value,
    path: &mut TreePath,
    errors: &mut Vec<ShapeDiagnostic>,
) {
    match (source, target) {
        (Value::Object(src), Value::Object(tgt)) => {
            for (key, src_child) in src {
                path.push_key(key);
                match tgt.get(key) {
                    Some(tgt_child) => compare_at(src_child, tgt_child, path, errors),
                    None => errors.push(ShapeDiagnostic::MissingKey { path: path.clone() }),
                }
                path.pop();
            }
            for key in tgt.keys().filter(|k| !src.contains_key(*k)) {
                errors.push(ShapeDiagnostic::ExtraKey {
                    path: path.with_key(key),
                });
            }
        }
        (Value::Array(src), Value::Array(tgt)) => {
            if src.len() != tgt.len() {
                errors.push(ShapeDiagnostic::ArrayLengthMismatch {
                    path: path.clone(),
                    source: src.len(),
                    target: tgt.len(),
                });
                return;
            }
            for (i, (s, t)) in src.iter().zip(tgt).enumerate() {
                path.push_index(i);
                compare_at(s, t, path, errors);
                path.pop();
            }
        }
        _ => {
            let (sk, tk) = (JsonKind::of(source), JsonKind::of(target));
            if sk != tk {
                errors.push(ShapeDiagnostic::TypeMismatch {
                    path: path.clone(),
                    source: sk,
                    target: tk,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leaf_values_are_ignored() {
        let a = json!({"name": "Hello", "n": 1, "ok": true});
        let b = json!({"name": "Bonjour", "n": 99, "ok": false});
        assert!(compare_structures(&a, &b).is_empty());
    }

    #[test]
    fn type_mismatch_stops_descent() {
        let a = json!({"x": {"deep": {"deeper": 1}}});
        let b = json!({"x": [1, 2]});
        let errs = compare_structures(&a, &b);
        assert_eq!(
            errs,
            vec![ShapeDiagnostic::TypeMismatch {
                path: TreePath::root().with_key("x"),
                source: JsonKind::Object,
                target: JsonKind::Array,
            }]
        );
        assert_eq!(
            errs[0].to_string(),
            "x: Type mismatch - source: object, target: array"
        );
    }

    #[test]
    fn null_versus_string_is_a_type_mismatch() {
        let errs = compare_structures(&json!({"team": null}), &json!({"team": "A"}));
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], ShapeDiagnostic::TypeMismatch { .. }));
    }

    #[test]
    fn integer_versus_float_is_a_type_mismatch() {
        let errs = compare_structures(&json!({"wounds": 12}), &json!({"wounds": 12.0}));
        assert_eq!(
            errs,
            vec![ShapeDiagnostic::TypeMismatch {
                path: TreePath::root().with_key("wounds"),
                source: JsonKind::Integer,
                target: JsonKind::Float,
            }]
        );
        assert_eq!(
            errs[0].to_string(),
            "wounds: Type mismatch - source: integer, target: float"
        );
        assert!(compare_structures(&json!([1.5]), &json!([-0.25])).is_empty());
    }

    #[test]
    fn root_mismatch_uses_root_path() {
        let errs = compare_structures(&json!([]), &json!({}));
        assert_eq!(errs[0].path().to_string(), "<root>");
    }

    #[test]
    fn nested_array_paths_use_brackets() {
        let a = json!({"teams": [{"abilities": [{"id": "a"}]}]});
        let b = json!({"teams": [{"abilities": [{"identifier": "a"}]}]});
        let report = validate_structure(&a, &b, SideLabels::new("English", "Translation"));
        assert_eq!(
            report.lines(),
            vec![
                "teams[0].abilities[0].id: Missing in Translation".to_string(),
                "teams[0].abilities[0].identifier: Extra key in Translation (not in English)"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn all_errors_are_collected() {
        let a = json!({"a": [1], "b": {"c": 1}, "d": 1});
        let b = json!({"a": [1, 2], "b": {"c": "x", "e": 1}});
        let errs = compare_structures(&a, &b);
        assert_eq!(errs.len(), 4);
    }
}
