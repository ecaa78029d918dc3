use std::fs;

use super::*;

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap_or_else(|e| panic!("write {name} failed: {e}"));
}

#[test]
fn missing_directory_yields_none() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("SAMPLE_MERCHANTS");
    assert!(read_merchant_documents(&missing).unwrap().is_none());
    assert!(read_store_documents(&missing).unwrap().is_none());
    assert!(read_client_orders(&missing).unwrap().is_none());
}

#[test]
fn merchants_only_json_files_in_name_order() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "2.json", r#"{"id": 2, "name": "B"}"#);
    write(tmp.path(), "1.json", r#"{"id": 1, "name": "A"}"#);
    write(tmp.path(), "notes.txt", "not json");

    let docs = read_merchant_documents(tmp.path()).unwrap().unwrap();
    let ids: Vec<_> = docs.iter().map(|d| d.id.clone()).collect();
    assert_eq!(ids, vec![Some(Value::from(1)), Some(Value::from(2))]);
}

#[test]
fn malformed_merchant_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "1.json", r#"{"id": 1}"#);
    write(tmp.path(), "2.json", "{ not json");

    let err = read_merchant_documents(tmp.path()).unwrap_err();
    assert!(
        matches!(err, IndexError::Parse { ref path, .. } if path.ends_with("2.json")),
        "expected Parse error for 2.json, got: {err:?}"
    );
}

#[test]
fn stores_match_file_name_pattern() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "store_42.json", r#"[{"type": "MOBILE"}]"#);
    write(tmp.path(), "other.json", "[]");

    let docs = read_store_documents(tmp.path()).unwrap().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id_text, "42");
    assert_eq!(docs[0].methods.as_ref().map(Vec::len), Some(1));
}

#[test]
fn store_object_document_has_no_methods() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "store_7.json", r#"{"error": "not found"}"#);

    let docs = read_store_documents(tmp.path()).unwrap().unwrap();
    assert!(docs[0].methods.is_none());
}

#[test]
fn malformed_store_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "store_1.json", "[{]");

    let err = read_store_documents(tmp.path()).unwrap_err();
    assert!(matches!(err, IndexError::Parse { .. }), "got: {err:?}");
}

#[test]
fn client_failures_are_isolated() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "100.json", "{ broken");
    write(
        tmp.path(),
        "200.json",
        r#"{"id": "a", "identifierNumber": 1, "amount": 25, "status": "OPEN"}"#,
    );

    let outcomes = read_client_orders(tmp.path()).unwrap().unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].is_skipped());
    match &outcomes[0] {
        FileOutcome::Skipped { path, reason } => {
            assert!(path.ends_with("100.json"));
            assert!(reason.contains("JSON parse error"), "reason: {reason}");
        }
        FileOutcome::Parsed(_) => panic!("expected 100.json to be skipped"),
    }

    let parsed: Vec<ClientOrder> = outcomes.into_iter().filter_map(FileOutcome::parsed).collect();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].id, Some(Value::from("a")));
}

#[test]
fn subdirectories_are_ignored() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("nested.json")).unwrap();
    write(tmp.path(), "1.json", r#"{"id": 1}"#);

    let docs = read_merchant_documents(tmp.path()).unwrap().unwrap();
    assert_eq!(docs.len(), 1);
}

#[test]
fn merchant_with_string_coordinates_is_read() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "1.json",
        r#"{"id": 1, "stores": [{"address": {"lat": "10.48", "long": "-66.9", "name": "Centro"}}]}"#,
    );

    let docs = read_merchant_documents(tmp.path()).unwrap().unwrap();
    let stores = docs[0].stores.as_ref().unwrap();
    let address = stores[0].address.as_ref().unwrap();
    assert_eq!(address.coordinates(), Some((10.48, -66.9)));
}

#[test]
fn merchant_with_non_object_top_level_reads_as_empty() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "1.json", "[1, 2, 3]");

    let docs = read_merchant_documents(tmp.path()).unwrap().unwrap();
    assert_eq!(docs.len(), 1);
    assert!(docs[0].id.is_none());
    assert!(docs[0].stores.is_none());
}

#[test]
fn client_with_numeric_id_is_parsed() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "100.json", r#"{"id": 123, "identifierNumber": 100, "amount": 10}"#);
    write(tmp.path(), "200.json", r#"{"id": "a", "identifierNumber": 200, "amount": 25}"#);

    let outcomes = read_client_orders(tmp.path()).unwrap().unwrap();
    assert!(outcomes.iter().all(|o| !o.is_skipped()));
    let parsed: Vec<ClientOrder> = outcomes.into_iter().filter_map(FileOutcome::parsed).collect();
    assert_eq!(parsed[0].id, Some(Value::from(123)));
    assert_eq!(parsed[1].id, Some(Value::from("a")));
}

#[test]
fn store_methods_with_mistyped_fields_are_counted() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "store_5.json",
        r#"[{"id": "1", "type": 3, "bankName": null}, null, {"currency": "USD"}]"#,
    );

    let docs = read_store_documents(tmp.path()).unwrap().unwrap();
    let methods = docs[0].methods.as_ref().unwrap();
    assert_eq!(methods.len(), 3);
    assert_eq!(methods[0].id, Some(1));
    assert_eq!(methods[0].method_type.as_deref(), Some("3"));
    assert!(methods[1].method_type.is_none());
    assert!(methods[2].currency.is_none());
}
