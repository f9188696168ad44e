// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde_json::json;

use super::*;

#[test]
fn canonical_encoding_sorts_keys_recursively() {
    let value = json!({
        "b": [3, {"z": null, "a": "x"}],
        "a": {"d": true, "c": 1.5},
    });
    assert_eq!(
        r#"{"a":{"c":1.5,"d":true},"b":[3,{"a":"x","z":null}]}"#,
        to_canonical_string(&value)
    );
}

#[test]
fn checksum_is_independent_of_key_order() {
    let lhs: Value = serde_json::from_str(r#"{"title": "Alien", "year": 1979}"#).unwrap();
    let rhs: Value = serde_json::from_str(r#"{ "year": 1979, "title": "Alien" }"#).unwrap();
    assert_eq!(Checksum::of_value(&lhs), Checksum::of_value(&rhs));
}

#[test]
fn checksum_detects_changes() {
    let original = json!([{"id": "1", "size_bytes": 1024}]);
    let modified = json!([{"id": "1", "size_bytes": 1025}]);
    assert_ne!(Checksum::of_value(&original), Checksum::of_value(&modified));
}

#[test]
fn checksum_is_lowercase_hex() {
    let checksum = Checksum::of_value(&Value::Null);
    assert_eq!(64, checksum.as_str().len());
    assert!(
        checksum
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    );
    assert_eq!(16, checksum.short().len());
}
