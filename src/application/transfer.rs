//! JSON import and export of the quote collection.
//!
//! Export is a pure function producing the pretty-printed file content.
//! Import parses a byte sequence and appends everything it finds; unlike
//! the manual add path it performs no field validation and no dedup, an
//! asymmetry kept on purpose.

use crate::domain::{AppError, Quote, Result};

/// Serialize the sequence as a pretty-printed JSON array. No side effect
/// on the store.
///
/// # Errors
/// Returns error if serialization fails.
pub fn export_json(quotes: &[Quote]) -> Result<String> {
    serde_json::to_string_pretty(quotes).map_err(|e| AppError::InvalidData {
        message: format!("Failed to serialize quotes: {e}"),
    })
}

/// Parse `bytes` as a JSON array of quote objects and append every element
/// onto `quotes`. Returns the number of appended quotes; the caller
/// persists the result.
///
/// # Errors
/// [`AppError::ImportMalformed`] when the bytes are not JSON at all,
/// [`AppError::ImportShape`] when the value is not an array or an element
/// is not an object. Either way `quotes` is untouched. Elements with
/// missing or empty fields import as-is.
pub fn import_json(bytes: &[u8], quotes: &mut Vec<Quote>) -> Result<usize> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(AppError::import_malformed)?;

    let Some(items) = value.as_array() else {
        return Err(AppError::ImportShape {
            message: "expected a JSON array of quotes".into(),
        });
    };

    // Parse everything before touching the store so a bad element cannot
    // leave a partial import behind.
    let mut imported = Vec::with_capacity(items.len());
    for item in items {
        let Some(obj) = item.as_object() else {
            return Err(AppError::ImportShape {
                message: format!("expected quote objects in array, found: {item}"),
            });
        };

        imported.push(Quote {
            text: obj
                .get("text")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            category: obj
                .get("category")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
        });
    }

    let count = imported.len();
    quotes.extend(imported);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Quote> {
        vec![
            Quote {
                text: "one".into(),
                category: "A".into(),
            },
            Quote {
                text: "two".into(),
                category: "B".into(),
            },
        ]
    }

    #[test]
    fn test_export_reparses_deep_equal() {
        let quotes = sample();
        let out = export_json(&quotes).unwrap();

        let reparsed: Vec<Quote> = serde_json::from_str(&out).unwrap();
        assert_eq!(reparsed, quotes);
    }

    #[test]
    fn test_export_is_pretty_printed() {
        let out = export_json(&sample()).unwrap();
        assert!(out.contains('\n'));
    }

    #[test]
    fn test_import_appends() {
        let mut quotes = sample();
        let count =
            import_json(br#"[{"text": "three", "category": "C"}]"#, &mut quotes).unwrap();

        assert_eq!(count, 1);
        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[2].text, "three");
    }

    #[test]
    fn test_import_malformed_json() {
        let mut quotes = sample();
        let err = import_json(b"{not json", &mut quotes).unwrap_err();

        assert!(matches!(err, AppError::ImportMalformed { .. }));
        assert_eq!(quotes.len(), 2);
    }

    #[test]
    fn test_import_non_array() {
        let mut quotes = sample();
        let err = import_json(br#"{"text": "x"}"#, &mut quotes).unwrap_err();

        assert!(matches!(err, AppError::ImportShape { .. }));
        assert_eq!(quotes.len(), 2);
    }

    #[test]
    fn test_import_non_object_element() {
        let mut quotes = sample();
        let err = import_json(br#"[{"text": "x"}, 42]"#, &mut quotes).unwrap_err();

        assert!(matches!(err, AppError::ImportShape { .. }));
        // No partial import
        assert_eq!(quotes.len(), 2);
    }

    #[test]
    fn test_import_skips_validation() {
        // Missing and empty fields pass, unlike the manual add path.
        let mut quotes = Vec::new();
        let count = import_json(
            br#"[{"text": "", "category": ""}, {"category": "only"}]"#,
            &mut quotes,
        )
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(quotes[0].text, "");
        assert_eq!(quotes[1].text, "");
        assert_eq!(quotes[1].category, "only");
    }

    #[test]
    fn test_import_empty_array_is_ok() {
        let mut quotes = sample();
        assert_eq!(import_json(b"[]", &mut quotes).unwrap(), 0);
        assert_eq!(quotes.len(), 2);
    }
}
