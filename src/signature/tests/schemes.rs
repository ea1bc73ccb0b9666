//! Golden-value tests for the three signing schemes and the JWT flow.
//!
//! Expected values were fixed against the gateway's reference behavior
//! (PHP `hash`/`hash_hmac` output) at test-authoring time.

use serde_json::json;

use crate::{
    error::RobokassaError,
    signature::{JwtHeader, Params, SignatureService},
};

fn params(pairs: &[(&str, serde_json::Value)]) -> Params {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect()
}

#[test]
fn test_op_state_md5_golden() {
    let signer = SignatureService::default();
    let signature = signer.sign_op_state("login123", "1973546115", "secret2", None);
    assert_eq!(signature, "5a00debc80b608b85f22b1ae6dd0c16f");
}

#[test]
fn test_op_state_sha256_and_sha512() {
    let signer = SignatureService::default();
    assert_eq!(
        signer.sign_op_state("login123", "1973546115", "secret2", Some("sha256")),
        "338c40989425b7f16e05e7b7a63c4ddb7ab6128aa03f80f8c84e6c786202d8b3"
    );
    assert_eq!(
        signer.sign_op_state("login123", "1973546115", "secret2", Some("sha512")),
        "4ee189e2667a25cc993434aa9e35735994b3593dd5764ec125c95f2c62e2af09\
         690d5084a35390c96e928e05b8e448c635b402db2673be9acb4595004960aabd"
    );
}

#[test]
fn test_op_state_unknown_algorithm_degrades_to_md5() {
    let signer = SignatureService::new("sha256");
    let degraded = signer.sign_op_state("a", "b", "c", Some("whirlpool"));
    let explicit = signer.sign_op_state("a", "b", "c", Some("md5"));
    assert_eq!(degraded, explicit);
}

#[test]
fn test_payment_signature_golden() {
    let signer = SignatureService::default();
    let p = params(&[
        ("MerchantLogin", json!("demo")),
        ("OutSum", json!("100")),
        ("InvoiceID", json!(1)),
    ]);
    // md5("demo:100:1:password1")
    assert_eq!(
        signer.sign_payment(&p, "password1", None).unwrap(),
        "7520cd556f2174c5ab8d7e6166f9fbd1"
    );
}

#[test]
fn test_payment_signature_with_custom_fields_golden() {
    let signer = SignatureService::default();
    let p = params(&[
        ("MerchantLogin", json!("demo")),
        ("OutSum", json!("100.50")),
        ("InvoiceID", json!(42)),
        ("Shp_zone", json!("east")),
        ("Shp_item", json!(1)),
    ]);
    // md5("demo:100.50:42:password1:Shp_item=1:Shp_zone=east")
    assert_eq!(
        signer.sign_payment(&p, "password1", None).unwrap(),
        "4be9fbd8edb2286f2214100bb5fb51f2"
    );
}

#[test]
fn test_payment_signature_with_receipt_golden() {
    let signer = SignatureService::default();
    let receipt = json!({"items": [{"name": "Товар", "quantity": 1.0, "sum": 100.0}]});
    let p = params(&[
        ("MerchantLogin", json!("demo")),
        ("OutSum", json!("100")),
        ("InvoiceID", json!(1)),
        ("Receipt", receipt),
    ]);
    // md5(r#"demo:100:1:{"items":[{"name":"Товар","quantity":1.0,"sum":100.0}]}:password1"#)
    assert_eq!(
        signer.sign_payment(&p, "password1", None).unwrap(),
        "92e0586a5512ea0904a420d5c6015468"
    );
}

#[test]
fn test_payment_signature_missing_out_sum() {
    let signer = SignatureService::default();
    let p = params(&[("MerchantLogin", json!("demo"))]);
    let err = signer.sign_payment(&p, "password1", None).unwrap_err();
    assert!(matches!(err, RobokassaError::MissingField(field) if field == "OutSum"));
}

#[test]
fn test_payment_signature_sensitive_to_out_sum_and_secret() {
    let signer = SignatureService::default();
    let base = params(&[("OutSum", json!("100")), ("InvoiceID", json!(1))]);
    let reference = signer.sign_payment(&base, "pw", None).unwrap();

    let changed_sum = params(&[("OutSum", json!("101")), ("InvoiceID", json!(1))]);
    assert_ne!(signer.sign_payment(&changed_sum, "pw", None).unwrap(), reference);
    assert_ne!(signer.sign_payment(&base, "pw2", None).unwrap(), reference);
}

#[test]
fn test_fiscal_signature_golden() {
    let signer = SignatureService::default();
    // base64url of {"id":1,"merchantId":"demo"}
    let payload = "eyJpZCI6MSwibWVyY2hhbnRJZCI6ImRlbW8ifQ";
    // base64url(md5_hex(payload + "password1"))
    assert_eq!(
        signer.sign_fiscal(payload, "password1", None),
        "NjE5ZGRkYjA2MDJjOTUyY2M3M2VmYmZlMTVjZTQ0YjY"
    );
}

#[test]
fn test_fiscal_signature_sha256_golden() {
    let signer = SignatureService::default();
    let payload = "eyJpZCI6MSwibWVyY2hhbnRJZCI6ImRlbW8ifQ";
    assert_eq!(
        signer.sign_fiscal(payload, "password1", Some("sha256")),
        "YWU4NzBiNDU5NTBkOTlhMTJkNTJlYjg5MTdhODYwNTQ5ZTVhMTQ0NjVjNzkwYzMwMTQ1ZTIxMWJjZmQ3OTAwNQ"
    );
}

#[test]
fn test_fiscal_signature_encodes_hex_text() {
    // 32 hex chars encode to ceil(32*4/3) = 43 base64url chars
    let signer = SignatureService::default();
    let signature = signer.sign_fiscal("abc", "secret", None);
    assert_eq!(signature.len(), 43);
    assert!(!signature.contains('='));
}

#[test]
fn test_jwt_token_golden() {
    let signer = SignatureService::default();
    let payload = json!({"MerchantLogin": "demo", "InvId": 1, "OutSum": 10.0});
    let token = signer.jwt_token(&JwtHeader::md5(), &payload, "demo", "pw1").unwrap();
    assert_eq!(
        token,
        "eyJhbGciOiJNRDUiLCJ0eXAiOiJKV1QifQ.\
         eyJJbnZJZCI6MSwiTWVyY2hhbnRMb2dpbiI6ImRlbW8iLCJPdXRTdW0iOjEwLjB9.\
         DgspKGA2tpNuL3kPo8CqYg"
    );
}

#[test]
fn test_jwt_token_signature_depends_on_key() {
    let signer = SignatureService::default();
    let payload = json!({"InvId": 1});
    let header = JwtHeader::md5();
    let a = signer.jwt_token(&header, &payload, "demo", "pw1").unwrap();
    let b = signer.jwt_token(&header, &payload, "demo", "pw2").unwrap();
    let (input_a, sig_a) = a.rsplit_once('.').unwrap();
    let (input_b, sig_b) = b.rsplit_once('.').unwrap();
    assert_eq!(input_a, input_b);
    assert_ne!(sig_a, sig_b);
}
