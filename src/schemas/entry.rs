//! Entry schema - One value submitted by a school for a category column

use serde::{Deserialize, Serialize};

/// Lifecycle status of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Being filled in by the school
    Draft,
    /// Submitted, waiting for review
    Pending,
    /// Accepted by a reviewer (terminal)
    Approved,
    /// Sent back by a reviewer for correction
    Rejected,
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Draft => write!(f, "draft"),
            EntryStatus::Pending => write!(f, "pending"),
            EntryStatus::Approved => write!(f, "approved"),
            EntryStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(EntryStatus::Draft),
            "pending" => Ok(EntryStatus::Pending),
            "approved" => Ok(EntryStatus::Approved),
            "rejected" => Ok(EntryStatus::Rejected),
            _ => Err(format!("Unknown entry status: {}", s)),
        }
    }
}

/// Coordinates identifying a single entry: school, category, column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryKey {
    pub school_id: String,
    pub category_id: String,
    pub column_id: String,
}

impl EntryKey {
    pub fn new(
        school_id: impl Into<String>,
        category_id: impl Into<String>,
        column_id: impl Into<String>,
    ) -> Self {
        EntryKey {
            school_id: school_id.into(),
            category_id: category_id.into(),
            column_id: column_id.into(),
        }
    }
}

impl std::fmt::Display for EntryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.school_id, self.category_id, self.column_id)
    }
}

/// One submitted value with its lifecycle status and audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// School the value belongs to
    pub school_id: String,

    /// Category the column is defined in
    pub category_id: String,

    /// Column the value answers
    pub column_id: String,

    /// The submitted value (always stored as text; typed by the column)
    pub value: String,

    /// Current lifecycle status
    pub status: EntryStatus,

    /// Actor who created the entry
    pub created_by: String,

    /// ISO 8601 creation timestamp
    pub created_at: String,

    /// ISO 8601 last update timestamp
    pub updated_at: String,

    /// Reviewer who approved the entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,

    /// ISO 8601 approval timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<String>,

    /// Reviewer who rejected the entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_by: Option<String>,

    /// ISO 8601 rejection timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<String>,

    /// Reason given with the rejection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl Entry {
    /// Create a new draft entry
    pub fn new(key: EntryKey, value: String, created_by: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Entry {
            schema_version: 1,
            school_id: key.school_id,
            category_id: key.category_id,
            column_id: key.column_id,
            value,
            status: EntryStatus::Draft,
            created_by,
            created_at: now.clone(),
            updated_at: now,
            approved_by: None,
            approved_at: None,
            rejected_by: None,
            rejected_at: None,
            rejection_reason: None,
        }
    }

    /// Coordinates of this entry
    pub fn key(&self) -> EntryKey {
        EntryKey {
            school_id: self.school_id.clone(),
            category_id: self.category_id.clone(),
            column_id: self.column_id.clone(),
        }
    }

    /// Whether the value holds anything beyond whitespace
    pub fn is_filled(&self) -> bool {
        !self.value.trim().is_empty()
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    /// Return a new Entry with the given status, updating the timestamp
    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self.touch_returning()
    }

    /// Return a new Entry with the given value, updating the timestamp
    pub fn with_value(mut self, value: String) -> Self {
        self.value = value;
        self.touch_returning()
    }

    /// Return a new approved Entry carrying the reviewer's audit stamp
    pub fn with_approval(mut self, reviewer: &str) -> Self {
        self.status = EntryStatus::Approved;
        self.approved_by = Some(reviewer.to_string());
        self.approved_at = Some(chrono::Utc::now().to_rfc3339());
        self.touch_returning()
    }

    /// Return a new rejected Entry carrying the reviewer's stamp and reason
    pub fn with_rejection(mut self, reviewer: &str, reason: &str) -> Self {
        self.status = EntryStatus::Rejected;
        self.rejected_by = Some(reviewer.to_string());
        self.rejected_at = Some(chrono::Utc::now().to_rfc3339());
        self.rejection_reason = Some(reason.to_string());
        self.touch_returning()
    }

    /// Return a new Entry with the rejection audit fields cleared
    pub fn with_rejection_cleared(mut self) -> Self {
        self.rejected_by = None;
        self.rejected_at = None;
        self.rejection_reason = None;
        self.touch_returning()
    }

    /// Update the updated_at timestamp to now and return self
    fn touch_returning(mut self) -> Self {
        self.updated_at = chrono::Utc::now().to_rfc3339();
        self
    }
}
