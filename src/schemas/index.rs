//! Index schema - Optional entry index cache

use serde::{Deserialize, Serialize};

use super::{Entry, EntryStatus};

/// An entry in the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// School the value belongs to
    pub school_id: String,

    /// Category (form) the value belongs to
    pub category_id: String,

    /// Column within the form
    pub column_id: String,

    /// Current lifecycle status
    pub status: EntryStatus,
}

impl IndexEntry {
    /// Build an index row from a stored entry
    pub fn from_entry(entry: &Entry) -> Self {
        IndexEntry {
            school_id: entry.school_id.clone(),
            category_id: entry.category_id.clone(),
            column_id: entry.column_id.clone(),
            status: entry.status,
        }
    }
}

/// Index of all entries (optional cache)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Index {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// List of index entries
    pub entries: Vec<IndexEntry>,

    /// ISO 8601 timestamp when index was generated
    pub generated_at: String,
}

impl Index {
    /// Create a new empty index
    pub fn new() -> Self {
        Index {
            schema_version: 1,
            entries: Vec::new(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Build an index from stored entries
    pub fn from_entries(entries: &[Entry]) -> Self {
        Index {
            schema_version: 1,
            entries: entries.iter().map(IndexEntry::from_entry).collect(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Count entries in the given status
    pub fn count_in(&self, status: EntryStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }
}

impl Default for Index {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::EntryKey;

    #[test]
    fn test_index_entry_serialization() {
        let row = IndexEntry {
            school_id: "school-001".to_string(),
            category_id: "general-info".to_string(),
            column_id: "student-count".to_string(),
            status: EntryStatus::Draft,
        };

        let json = serde_json::to_string(&row).unwrap();
        let parsed: IndexEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.school_id, "school-001");
        assert_eq!(parsed.column_id, "student-count");
        assert_eq!(parsed.status, EntryStatus::Draft);
    }

    #[test]
    fn test_index_round_trip() {
        let mut index = Index::new();
        index.entries.push(IndexEntry {
            school_id: "school-001".to_string(),
            category_id: "general-info".to_string(),
            column_id: "student-count".to_string(),
            status: EntryStatus::Pending,
        });
        index.entries.push(IndexEntry {
            school_id: "school-001".to_string(),
            category_id: "general-info".to_string(),
            column_id: "teacher-count".to_string(),
            status: EntryStatus::Approved,
        });

        let json = serde_json::to_string_pretty(&index).unwrap();
        let parsed: Index = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.entries[0].status, EntryStatus::Pending);
        assert_eq!(parsed.entries[1].column_id, "teacher-count");
    }

    #[test]
    fn test_from_entries_and_count() {
        let key = EntryKey::new("school-001", "general-info", "student-count");
        let entries = vec![
            Entry::new(key.clone(), "420".to_string(), "aysel".to_string()),
            Entry::new(
                EntryKey::new("school-001", "general-info", "teacher-count"),
                "35".to_string(),
                "aysel".to_string(),
            )
            .with_status(EntryStatus::Pending),
        ];

        let index = Index::from_entries(&entries);
        assert_eq!(index.entries.len(), 2);
        assert_eq!(index.count_in(EntryStatus::Draft), 1);
        assert_eq!(index.count_in(EntryStatus::Pending), 1);
        assert_eq!(index.count_in(EntryStatus::Approved), 0);
    }
}
