// SPDX-FileCopyrightText: Copyright (C) 2024-2026 The plexiq authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, io::Write};

use data_encoding::HEXLOWER;
use serde_json::Value;

/// Hex-encoded BLAKE3 digest of a canonical JSON encoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Checksum(String);

impl Checksum {
    /// Compute the checksum of a JSON value.
    ///
    /// The value is encoded canonically, i.e. object keys are sorted
    /// recursively and no insignificant whitespace is emitted. The
    /// checksum is therefore independent of the key order.
    #[must_use]
    pub fn of_value(value: &Value) -> Self {
        let digest = blake3::hash(&to_canonical_bytes(value));
        Self(HEXLOWER.encode(digest.as_bytes()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for log messages.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..16).unwrap_or(&self.0)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Write the canonical JSON encoding of `value`.
pub fn write_canonical<W: Write>(writer: &mut W, value: &Value) -> serde_json::Result<()> {
    match value {
        Value::Array(elements) => {
            writer.write_all(b"[").map_err(serde_json::Error::io)?;
            for (index, element) in elements.iter().enumerate() {
                if index > 0 {
                    writer.write_all(b",").map_err(serde_json::Error::io)?;
                }
                write_canonical(writer, element)?;
            }
            writer.write_all(b"]").map_err(serde_json::Error::io)
        }
        Value::Object(members) => {
            let mut members: Vec<_> = members.iter().collect();
            members.sort_unstable_by(|(lhs, _), (rhs, _)| lhs.cmp(rhs));
            writer.write_all(b"{").map_err(serde_json::Error::io)?;
            for (index, (key, member)) in members.into_iter().enumerate() {
                if index > 0 {
                    writer.write_all(b",").map_err(serde_json::Error::io)?;
                }
                serde_json::to_writer(&mut *writer, key)?;
                writer.write_all(b":").map_err(serde_json::Error::io)?;
                write_canonical(writer, member)?;
            }
            writer.write_all(b"}").map_err(serde_json::Error::io)
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            serde_json::to_writer(writer, value)
        }
    }
}

#[must_use]
pub fn to_canonical_bytes(value: &Value) -> Vec<u8> {
    let mut bytes = Vec::new();
    let result = write_canonical(&mut bytes, value);
    // Writing into memory never fails.
    debug_assert!(result.is_ok());
    bytes
}

#[must_use]
pub fn to_canonical_string(value: &Value) -> String {
    String::from_utf8_lossy(&to_canonical_bytes(value)).into_owned()
}

#[cfg(test)]
mod tests;
