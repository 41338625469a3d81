// crates/storefront-core/src/api/decode.rs
use crate::error::{Result, StoreError};
use crate::model::{Product, SearchResult};
use serde_json::Value;

/// Decodes a `tw-nazwa` response body.
///
/// The body must be a JSON array of objects carrying `nazwa`. Order is kept
/// as received; nothing is sorted or deduplicated.
pub fn decode_search(body: &[u8]) -> Result<Vec<SearchResult>> {
    let value: Value = serde_json::from_slice(body)?;
    if !value.is_array() {
        return Err(StoreError::InvalidData(format!(
            "search response must be a JSON array, got {}",
            kind_of(&value)
        )));
    }
    Ok(serde_json::from_value(value)?)
}

/// Decodes a `tw-id` response body.
///
/// `null` and `[]` mean the product does not exist. Only the first element
/// of the array is used. If it carries no `id`, `requested_id` is filled in.
pub fn decode_product(body: &[u8], requested_id: &str) -> Result<Option<Product>> {
    let value: Value = serde_json::from_slice(body)?;
    let mut items = match value {
        Value::Null => return Ok(None),
        Value::Array(items) => items,
        other => {
            return Err(StoreError::InvalidData(format!(
                "product response must be a JSON array, got {}",
                kind_of(&other)
            )))
        }
    };
    if items.is_empty() {
        return Ok(None);
    }

    let mut product: Product = serde_json::from_value(items.swap_remove(0))?;
    if product.id.is_empty() {
        product.id = requested_id.to_string();
    }
    Ok(Some(product))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn decodes_widget() {
        let results = decode_search(br#"[{"nazwa":"Widget"}]"#).unwrap();
        assert_eq!(results, vec![SearchResult::new("Widget")]);
    }

    #[test]
    fn keeps_server_order() {
        let results =
            decode_search(br#"[{"nazwa":"b"},{"nazwa":"a"},{"nazwa":"b"}]"#).unwrap();
        let names: Vec<_> = results.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["b", "a", "b"]);
    }

    #[test]
    fn empty_array_is_a_valid_empty_result() {
        assert!(decode_search(b"[]").unwrap().is_empty());
    }

    #[test]
    fn object_payload_is_decode_error() {
        let err = decode_search(br#"{"nazwa":"Widget"}"#).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Decode);
    }

    #[test]
    fn html_payload_is_decode_error() {
        let err = decode_search(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert_eq!(err.kind(), FailureKind::Decode);
    }

    #[test]
    fn entry_without_name_is_decode_error() {
        let err = decode_search(br#"[{"nazwa":"ok"},{"kod":"x"}]"#).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Decode);
    }

    #[test]
    fn product_takes_first_element() {
        let product = decode_product(
            br#"[{"id":"17","nazwa":"Kabel HDMI"},{"id":"18","nazwa":"Other"}]"#,
            "17",
        )
        .unwrap()
        .unwrap();
        assert_eq!(product.id(), "17");
        assert_eq!(product.name(), "Kabel HDMI");
    }

    #[test]
    fn product_falls_back_to_requested_id() {
        let product = decode_product(br#"[{"nazwa":"Kabel"}]"#, "99").unwrap().unwrap();
        assert_eq!(product.id(), "99");
    }

    #[test]
    fn empty_or_null_product_is_none() {
        assert!(decode_product(b"[]", "1").unwrap().is_none());
        assert!(decode_product(b"null", "1").unwrap().is_none());
    }

    #[test]
    fn product_object_payload_is_decode_error() {
        let err = decode_product(br#"{"nazwa":"Kabel"}"#, "1").unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(_)));
    }
}
