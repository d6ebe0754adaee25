//! Internal helpers for input validation.
//!
//! These utilities are **not** part of the public API.

use std::collections::HashSet;

use crate::{EngineError, ResultEngine};

/// Trim an id supplied by a caller and reject blank values.
pub(crate) fn normalize_required_id(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!("{label} id must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Normalize a request composition: every id trimmed, none blank or
/// repeated. Order is preserved.
pub(crate) fn normalize_call_off_order_ids(ids: &[String]) -> ResultEngine<Vec<String>> {
    let mut seen = HashSet::with_capacity(ids.len());
    let mut normalized = Vec::with_capacity(ids.len());
    for id in ids {
        let id = normalize_required_id(id, "call-off order")?;
        if !seen.insert(id.clone()) {
            return Err(EngineError::Validation(format!(
                "call-off order {id} is listed more than once"
            )));
        }
        normalized.push(id);
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn composition_is_trimmed_in_order() {
        let normalized = normalize_call_off_order_ids(&ids(&[" b", "a "])).unwrap();
        assert_eq!(normalized, ids(&["b", "a"]));
    }

    #[test]
    fn composition_rejects_duplicates_and_blanks() {
        let err = normalize_call_off_order_ids(&ids(&["a", " a"])).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        let err = normalize_call_off_order_ids(&ids(&["a", "  "])).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }
}
