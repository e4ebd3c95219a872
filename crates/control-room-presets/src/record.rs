// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Wire format of presets.
//!
//! A record is a flat JSON object holding the preset name, its active flag, and
//! one object per part:
//!
//! ```json
//! {"name": "Wide", "active": true, "image_size": {"width": 1920, "height": 804}}
//! ```
//!
//! The persisted store holds a JSON array of records.

use crate::error::{PresetError, PresetResult};
use crate::preset::PartFields;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One preset as it is written to the store or a default preset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetRecord {
    /// The preset name.
    pub name: String,
    /// Whether the preset was the active one. Absent means `false`.
    #[serde(default)]
    pub active: bool,
    /// Every other key is a part name mapping to its fields.
    #[serde(flatten)]
    pub parts: BTreeMap<String, PartFields>,
}

/// Undoes the quote escaping older scenes applied to the whole payload.
pub fn normalize_legacy_quotes(payload: &str) -> String {
    payload.replace("\\\"", "\"")
}

/// Decodes a store payload into records.
///
/// The payload must be a JSON array, otherwise the whole payload is rejected.
/// Array entries that are not valid records are skipped with a warning, so one
/// damaged preset does not take the others down with it.
pub fn decode_records(payload: &str) -> PresetResult<Vec<PresetRecord>> {
    let normalized = normalize_legacy_quotes(payload);
    let values: Vec<serde_json::Value> = serde_json::from_str(&normalized)?;

    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<PresetRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("Skipping malformed preset record #{index}: {e}"),
        }
    }
    Ok(records)
}

/// Decodes a single record, as found in a default preset file.
///
/// Text that is not JSON fails with [`PresetError::Json`]; JSON that is not a
/// preset record fails with [`PresetError::MalformedRecord`].
pub fn decode_record(text: &str) -> PresetResult<PresetRecord> {
    let value: serde_json::Value = serde_json::from_str(&normalize_legacy_quotes(text))?;
    serde_json::from_value(value).map_err(|e| PresetError::MalformedRecord(e.to_string()))
}

/// Encodes records into a store payload.
pub fn encode_records(records: &[PresetRecord]) -> PresetResult<String> {
    Ok(serde_json::to_string(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use control_room_core::Scalar;

    #[test]
    fn decodes_flat_record() {
        let records =
            decode_records(r#"[{"name":"Wide","active":true,"camera":{"width":1920}}]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Wide");
        assert!(records[0].active);
        assert_eq!(records[0].parts["camera"]["width"], Scalar::Int(1920));
    }

    #[test]
    fn single_record_must_be_an_object_with_a_name() {
        assert!(matches!(
            decode_record(r#"[{"name":"Close"}]"#),
            Err(PresetError::MalformedRecord(_))
        ));
        assert!(matches!(
            decode_record(r#"{"dof":{"fStop":2.8}}"#),
            Err(PresetError::MalformedRecord(_))
        ));
        assert!(matches!(decode_record("{ nope"), Err(PresetError::Json(_))));
    }

    #[test]
    fn active_defaults_to_false() {
        let record = decode_record(r#"{"name":"Close","dof":{"fStop":2.8}}"#).unwrap();
        assert!(!record.active);
        assert_eq!(record.parts["dof"]["fStop"], Scalar::Float(2.8));
    }

    #[test]
    fn legacy_escaped_quotes_are_normalized() {
        let payload = r#"[{\"name\": \"Old\", \"active\": false, \"sampling\": {\"camera_aa\": 4}}]"#;
        let records = decode_records(payload).unwrap();
        assert_eq!(records[0].name, "Old");
        assert_eq!(records[0].parts["sampling"]["camera_aa"], Scalar::Int(4));
    }

    #[test]
    fn bad_entries_are_skipped() {
        let payload = r#"[{"name":"Good"}, {"active":true}, 42, {"name":"Also","dof":"oops"}]"#;
        let records = decode_records(payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Good");
    }

    #[test]
    fn non_array_payload_is_rejected() {
        assert!(decode_records("not json").is_err());
        assert!(decode_records(r#"{"name":"Wide"}"#).is_err());
    }

    #[test]
    fn encode_puts_name_and_active_first() {
        let mut parts = BTreeMap::new();
        parts.insert(
            "dof".to_string(),
            PartFields::from([("fStop".to_string(), Scalar::Float(5.6))]),
        );
        let record = PresetRecord {
            name: "Wide".to_string(),
            active: false,
            parts,
        };
        assert_eq!(
            encode_records(&[record]).unwrap(),
            r#"[{"name":"Wide","active":false,"dof":{"fStop":5.6}}]"#
        );
    }
}
