//! Category schema - Form definitions: categories and their columns

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Data type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text
    Text,
    /// Decimal number
    Number,
    /// Calendar date (YYYY-MM-DD)
    Date,
    /// One of a fixed set of options
    Select,
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Text
    }
}

/// A single column (field) within a category form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Unique identifier within the category (e.g., "student-count")
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Data type of the value
    #[serde(default)]
    pub column_type: ColumnType,

    /// Whether a value is required before the form can be submitted
    #[serde(default)]
    pub required: bool,

    /// Allowed values for select columns
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Optional regex the value must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Column {
    /// Create a new column definition
    pub fn new(id: impl Into<String>, name: impl Into<String>, column_type: ColumnType, required: bool) -> Self {
        Column {
            id: id.into(),
            name: name.into(),
            column_type,
            required,
            options: Vec::new(),
            pattern: None,
        }
    }

    /// Return a new Column with the given select options
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    /// Return a new Column with the given regex pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

/// A category: one form a school fills in, made of columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier (e.g., "general-info")
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Description shown to data entry staff
    #[serde(default)]
    pub description: String,

    /// Columns making up the form
    pub columns: Vec<Column>,
}

impl Category {
    /// Create a new category with no columns
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            columns: Vec::new(),
        }
    }

    /// Look up a column by id
    pub fn find_column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Columns that must be filled before submission
    pub fn required_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.required).collect()
    }

    /// Survey how complete a form is, given the stored value per column id.
    ///
    /// A value counts as filled when it holds anything beyond whitespace.
    /// A category with no required columns is complete by definition.
    pub fn completion(&self, values: &HashMap<String, String>) -> FormCompletion {
        let required: Vec<&Column> = self.required_columns();
        let mut filled = 0;
        let mut missing = Vec::new();

        for column in &required {
            match values.get(&column.id) {
                Some(value) if !value.trim().is_empty() => filled += 1,
                _ => missing.push(column.id.clone()),
            }
        }

        FormCompletion {
            required_total: required.len(),
            filled,
            missing,
        }
    }
}

/// Survey of required-column completion for one (school, category) form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormCompletion {
    /// Number of required columns in the category
    pub required_total: usize,

    /// Number of required columns holding a non-blank value
    pub filled: usize,

    /// Ids of required columns still missing a value
    pub missing: Vec<String>,
}

impl FormCompletion {
    /// Whether every required column is filled
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Short progress summary (e.g., "3/5 required columns filled")
    pub fn summary(&self) -> String {
        format!("{}/{} required columns filled", self.filled, self.required_total)
    }
}

/// All categories known to the workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// Category definitions
    pub categories: Vec<Category>,
}

impl CategoryCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        CategoryCatalog {
            schema_version: 1,
            categories: Vec::new(),
        }
    }

    /// Look up a category by id
    pub fn find(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    /// A small demo catalog used by `init --sample`
    pub fn sample() -> Self {
        let mut category = Category::new("general-info", "General information");
        category.description = "Core yearly figures for the school".to_string();
        category.columns = vec![
            Column::new("student-count", "Number of students", ColumnType::Number, true),
            Column::new("teacher-count", "Number of teachers", ColumnType::Number, true),
            Column::new("founded", "Founding date", ColumnType::Date, false),
            Column::new("language", "Teaching language", ColumnType::Select, true)
                .with_options(vec!["az".to_string(), "ru".to_string(), "en".to_string()]),
            Column::new("phone", "Contact phone", ColumnType::Text, false)
                .with_pattern(r"^\+?[0-9]{7,15}$"),
        ];

        CategoryCatalog {
            schema_version: 1,
            categories: vec![category],
        }
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}
