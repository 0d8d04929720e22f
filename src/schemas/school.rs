//! School schema - Schools and their place in the region/sector hierarchy

use serde::{Deserialize, Serialize};

/// A school registered in the workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    /// Unique identifier (e.g., "school-042")
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Sector the school belongs to
    pub sector_id: String,

    /// Region the sector belongs to
    pub region_id: String,
}

impl School {
    /// Create a new school record
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        sector_id: impl Into<String>,
        region_id: impl Into<String>,
    ) -> Self {
        School {
            id: id.into(),
            name: name.into(),
            sector_id: sector_id.into(),
            region_id: region_id.into(),
        }
    }
}

/// All schools known to the workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRoster {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// School records
    pub schools: Vec<School>,
}

impl SchoolRoster {
    /// Create a new empty roster
    pub fn new() -> Self {
        SchoolRoster {
            schema_version: 1,
            schools: Vec::new(),
        }
    }

    /// Look up a school by id
    pub fn find(&self, school_id: &str) -> Option<&School> {
        self.schools.iter().find(|s| s.id == school_id)
    }

    /// Schools within the given sector
    pub fn in_sector(&self, sector_id: &str) -> Vec<&School> {
        self.schools.iter().filter(|s| s.sector_id == sector_id).collect()
    }

    /// Schools within the given region
    pub fn in_region(&self, region_id: &str) -> Vec<&School> {
        self.schools.iter().filter(|s| s.region_id == region_id).collect()
    }

    /// A small demo roster used by `init --sample`
    pub fn sample() -> Self {
        SchoolRoster {
            schema_version: 1,
            schools: vec![
                School::new("school-001", "City School No. 1", "sector-yasamal", "region-baku"),
                School::new("school-002", "City School No. 2", "sector-yasamal", "region-baku"),
                School::new("school-101", "Lyceum No. 6", "sector-kapaz", "region-ganja"),
            ],
        }
    }
}

impl Default for SchoolRoster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_find() {
        let roster = SchoolRoster::sample();
        assert!(roster.find("school-001").is_some());
        assert!(roster.find("school-999").is_none());
    }

    #[test]
    fn test_in_sector() {
        let roster = SchoolRoster::sample();
        let yasamal = roster.in_sector("sector-yasamal");
        assert_eq!(yasamal.len(), 2);
        assert!(yasamal.iter().all(|s| s.sector_id == "sector-yasamal"));
    }

    #[test]
    fn test_in_region() {
        let roster = SchoolRoster::sample();
        assert_eq!(roster.in_region("region-baku").len(), 2);
        assert_eq!(roster.in_region("region-ganja").len(), 1);
        assert!(roster.in_region("region-nowhere").is_empty());
    }

    #[test]
    fn test_roster_json_round_trip() {
        let roster = SchoolRoster::sample();
        let json = serde_json::to_string_pretty(&roster).unwrap();
        let parsed: SchoolRoster = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, roster);
    }

    #[test]
    fn test_empty_roster() {
        let roster = SchoolRoster::new();
        assert!(roster.schools.is_empty());
        assert!(roster.find("anything").is_none());
    }
}
