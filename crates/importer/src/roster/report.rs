use serde::Serialize;

use crate::error::Result;

/// Renders a pipeline result for terminal output.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use storage::models::NewCharacter;

    use super::*;
    use crate::error::ImporterError;

    #[test]
    fn test_entries_render_as_array() {
        let entries = vec![NewCharacter::from_name("Aoi Todo", None)];
        let json = to_pretty_json(&entries).unwrap();

        assert!(json.starts_with('['));
        assert!(json.contains("\"first_name\": \"Aoi\""));
        assert!(json.contains("\"image_path\": null"));
    }

    #[test]
    fn test_unserializable_value_is_parse_error() {
        // JSON object keys must be strings
        let mut scores = BTreeMap::new();
        scores.insert(vec![1u8], 1000);

        let err = to_pretty_json(&scores).unwrap_err();
        assert!(matches!(err, ImporterError::ParseError(_)));
    }
}
