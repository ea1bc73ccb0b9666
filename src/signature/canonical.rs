//! Canonical string construction for the payment signature scheme.
//!
//! The gateway hashes a deterministic colon-joined string built from the
//! request parameters: a fixed-order core field list, the signing secret,
//! then the merchant-custom `Shp_*` fields sorted lexicographically by
//! their full `key=value` rendering. The sort is a correctness invariant:
//! the gateway recomputes the same string on its side, so insertion order
//! must never leak into the result.

use serde_json::Value;

use crate::error::{Result, RobokassaError};

/// Parameter mapping supplied per signing call.
///
/// Values are scalars or nested structures; the signer reads the mapping,
/// never mutates or owns it.
pub type Params = serde_json::Map<String, Value>;

/// Core fields joined after the merchant login slot, in declared order.
const TAIL_FIELDS: [&str; 4] = ["Receipt", "ResultUrl2", "SuccessUrl2", "SuccessUrl2Method"];

/// Case-insensitive prefix marking merchant-custom fields.
const CUSTOM_PREFIX: &str = "shp_";

/// Returns whether `key` belongs to the merchant-custom field group.
#[must_use]
pub fn is_custom_field(key: &str) -> bool {
    key.get(..CUSTOM_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(CUSTOM_PREFIX))
}

/// Renders a parameter value for the canonical string.
///
/// Scalars pass through as their string form; nested structures are
/// JSON-serialized exactly once. `null` renders empty.
///
/// # Errors
///
/// Returns [`RobokassaError::EncodingFailure`] if a nested structure
/// cannot be serialized.
pub fn render_value(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        nested => serde_json::to_string(nested).map_err(RobokassaError::from),
    }
}

/// Builds the canonical payment hash string.
///
/// Layout: `[MerchantLogin:]OutSum:<invoice>[:Receipt][:ResultUrl2]`
/// `[:SuccessUrl2][:SuccessUrl2Method]:secret[:Shp_a=1:Shp_b=2...]`.
///
/// The invoice slot is always present: `InvoiceID` if set, else its alias
/// `InvId`, else the empty string. When both aliases are set `InvoiceID`
/// wins and `InvId` is ignored. Every other core field participates only
/// when present. An empty custom group contributes nothing.
///
/// # Errors
///
/// - [`RobokassaError::MissingField`] if `OutSum` is absent.
/// - [`RobokassaError::EncodingFailure`] if a nested value fails to
///   serialize.
pub fn payment_hash_string(params: &Params, secret: &str) -> Result<String> {
    let out_sum = params
        .get("OutSum")
        .ok_or_else(|| RobokassaError::MissingField("OutSum".to_owned()))?;

    let mut elements = Vec::with_capacity(8);

    if let Some(login) = params.get("MerchantLogin") {
        elements.push(render_value(login)?);
    }
    elements.push(render_value(out_sum)?);

    let invoice = params.get("InvoiceID").or_else(|| params.get("InvId"));
    elements.push(match invoice {
        Some(value) => render_value(value)?,
        None => String::new(),
    });

    for field in TAIL_FIELDS {
        if let Some(value) = params.get(field) {
            elements.push(render_value(value)?);
        }
    }

    elements.push(secret.to_owned());
    elements.extend(custom_field_pairs(params)?);

    Ok(elements.join(":"))
}

/// Collects `Shp_*` fields as `key=value` strings, sorted ascending.
///
/// Plain byte-wise string order, not locale-aware: the gateway sorts the
/// same way.
pub(crate) fn custom_field_pairs(params: &Params) -> Result<Vec<String>> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        if is_custom_field(key) {
            pairs.push(format!("{key}={}", render_value(value)?));
        }
    }
    pairs.sort_unstable();
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(pairs: &[(&str, Value)]) -> Params {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect()
    }

    #[test]
    fn test_minimal_hash_string() {
        let p = params(&[("OutSum", json!("100"))]);
        assert_eq!(payment_hash_string(&p, "pw1").unwrap(), "100::pw1");
    }

    #[test]
    fn test_full_core_order() {
        let p = params(&[
            ("MerchantLogin", json!("demo")),
            ("OutSum", json!(100)),
            ("InvoiceID", json!(1)),
            ("SuccessUrl2Method", json!("GET")),
            ("SuccessUrl2", json!("https://ok.example/ret")),
            ("ResultUrl2", json!("https://ok.example/res")),
        ]);
        assert_eq!(
            payment_hash_string(&p, "pw1").unwrap(),
            "demo:100:1:https://ok.example/res:https://ok.example/ret:GET:pw1"
        );
    }

    #[test]
    fn test_missing_out_sum_fails() {
        let p = params(&[("InvoiceID", json!(1))]);
        let err = payment_hash_string(&p, "pw1").unwrap_err();
        assert!(matches!(err, RobokassaError::MissingField(field) if field == "OutSum"));
    }

    #[test]
    fn test_invoice_alias_fallback() {
        let p = params(&[("OutSum", json!("5")), ("InvId", json!(42))]);
        assert_eq!(payment_hash_string(&p, "s").unwrap(), "5:42:s");
    }

    #[test]
    fn test_invoice_id_wins_over_alias() {
        let p = params(&[("OutSum", json!("5")), ("InvoiceID", json!(7)), ("InvId", json!(42))]);
        assert_eq!(payment_hash_string(&p, "s").unwrap(), "5:7:s");
    }

    #[test]
    fn test_receipt_serialized_once() {
        let receipt = json!({"items": [{"name": "Товар", "sum": 100.0}]});
        let p = params(&[("OutSum", json!("100")), ("InvoiceID", json!(1)), ("Receipt", receipt)]);
        assert_eq!(
            payment_hash_string(&p, "pw1").unwrap(),
            r#"100:1:{"items":[{"name":"Товар","sum":100.0}]}:pw1"#
        );
    }

    #[test]
    fn test_custom_fields_sorted_after_secret() {
        let p = params(&[
            ("Shp_zone", json!("east")),
            ("OutSum", json!("1")),
            ("Shp_item", json!(2)),
            ("shp_alpha", json!("x")),
        ]);
        // byte order: "Shp_item=2" < "Shp_zone=east" < "shp_alpha=x"
        assert_eq!(
            payment_hash_string(&p, "s").unwrap(),
            "1::s:Shp_item=2:Shp_zone=east:shp_alpha=x"
        );
    }

    #[test]
    fn test_empty_custom_group_no_trailing_separator() {
        let p = params(&[("OutSum", json!("1")), ("InvoiceID", json!(2))]);
        let hash_string = payment_hash_string(&p, "s").unwrap();
        assert!(!hash_string.ends_with(':'));
        assert_eq!(hash_string, "1:2:s");
    }

    #[test]
    fn test_custom_prefix_case_insensitive() {
        assert!(is_custom_field("Shp_user"));
        assert!(is_custom_field("SHP_USER"));
        assert!(is_custom_field("shp_user"));
        assert!(!is_custom_field("Shipment"));
        assert!(!is_custom_field("Shp"));
    }

    #[test]
    fn test_render_scalars() {
        assert_eq!(render_value(&json!("text")).unwrap(), "text");
        assert_eq!(render_value(&json!(10.5)).unwrap(), "10.5");
        assert_eq!(render_value(&json!(true)).unwrap(), "true");
        assert_eq!(render_value(&Value::Null).unwrap(), "");
    }
}
