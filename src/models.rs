//! Core Data Model
//! Mission: Define project documents and their open-schema record store

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// One declared field on a model: `{name, type}`.
///
/// Declared but never enforced against actual record writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

/// A named logical record type declared by a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

/// One open-schema data item in a model's list.
pub type Record = serde_json::Map<String, Value>;

/// The mutable payload of a project: model name -> ordered record list.
///
/// Keys are unique and insertion-order independent; an absent key reads as an
/// empty list. Lists are created lazily on first append.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectData(BTreeMap<String, Vec<Record>>);

impl ProjectData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records for a model; empty slice when the model was never written.
    pub fn records(&self, model: &str) -> &[Record] {
        self.0.get(model).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append a record, creating the model's list if absent.
    /// Returns the full updated list.
    pub fn append(&mut self, model: &str, record: Record) -> &[Record] {
        let records = self.0.entry(model.to_string()).or_default();
        records.push(record);
        records
    }

    /// Shallow-merge `patch` onto the record at `index`: patch fields
    /// overwrite, unmentioned fields survive. `None` if `index` is out of
    /// bounds. Returns the full updated list.
    pub fn merge_at(&mut self, model: &str, index: usize, patch: Record) -> Option<&[Record]> {
        let records = self.0.get_mut(model)?;
        let record = records.get_mut(index)?;
        for (key, value) in patch {
            record.insert(key, value);
        }
        Some(records)
    }

    /// Remove exactly one record at `index`, shifting later records down.
    /// `None` if `index` is out of bounds. Returns the full updated list.
    pub fn remove_at(&mut self, model: &str, index: usize) -> Option<&[Record]> {
        let records = self.0.get_mut(model)?;
        if index >= records.len() {
            return None;
        }
        records.remove(index);
        Some(records)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A generated application scaffold plus its accumulated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub models: Vec<ModelSpec>,
    pub data: ProjectData,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_absent_model_reads_empty() {
        let data = ProjectData::new();
        assert!(data.records("Patients").is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut data = ProjectData::new();
        data.append("Patients", record(&[("name", json!("A"))]));
        let records = data.append("Patients", record(&[("name", json!("B"))]));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], json!("A"));
        assert_eq!(records[1]["name"], json!("B"));
    }

    #[test]
    fn test_merge_keeps_unmentioned_fields() {
        let mut data = ProjectData::new();
        data.append("Patients", record(&[("name", json!("A"))]));

        let records = data
            .merge_at("Patients", 0, record(&[("phone", json!("123"))]))
            .unwrap();

        assert_eq!(records[0]["name"], json!("A"));
        assert_eq!(records[0]["phone"], json!("123"));
    }

    #[test]
    fn test_merge_overwrites_patched_fields() {
        let mut data = ProjectData::new();
        data.append("Items", record(&[("name", json!("old"))]));

        let records = data
            .merge_at("Items", 0, record(&[("name", json!("new"))]))
            .unwrap();

        assert_eq!(records[0]["name"], json!("new"));
    }

    #[test]
    fn test_remove_shifts_later_records() {
        let mut data = ProjectData::new();
        data.append("Patients", record(&[("name", json!("A"))]));
        data.append("Patients", record(&[("name", json!("B"))]));

        let records = data.remove_at("Patients", 0).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], json!("B"));
    }

    #[test]
    fn test_out_of_bounds_index_rejected() {
        let mut data = ProjectData::new();
        data.append("Patients", record(&[("name", json!("A"))]));

        assert!(data.merge_at("Patients", 1, Record::new()).is_none());
        assert!(data.remove_at("Patients", 1).is_none());
        assert!(data.merge_at("Unknown", 0, Record::new()).is_none());
    }

    #[test]
    fn test_data_serializes_as_plain_map() {
        let mut data = ProjectData::new();
        data.append("Items", record(&[("name", json!("x"))]));

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value, json!({"Items": [{"name": "x"}]}));
    }
}
