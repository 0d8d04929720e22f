//! Role schema - Administrative roles and their scope in the hierarchy

use serde::{Deserialize, Serialize};

/// Administrative role of the acting user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Enters and submits data for a single school
    SchoolAdmin,
    /// Reviews submissions for the schools of one sector
    SectorAdmin,
    /// Reviews submissions for the schools of one region
    RegionAdmin,
    /// Reviews submissions everywhere
    SuperAdmin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::SchoolAdmin => write!(f, "school-admin"),
            Role::SectorAdmin => write!(f, "sector-admin"),
            Role::RegionAdmin => write!(f, "region-admin"),
            Role::SuperAdmin => write!(f, "super-admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "school-admin" => Ok(Role::SchoolAdmin),
            "sector-admin" => Ok(Role::SectorAdmin),
            "region-admin" => Ok(Role::RegionAdmin),
            "super-admin" => Ok(Role::SuperAdmin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Part of the region / sector / school hierarchy a role is bound to.
///
/// Which field matters depends on the role: a school-admin is bound to
/// `school_id`, a sector-admin to `sector_id`, a region-admin to
/// `region_id`. A super-admin needs none of them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scope {
    /// Region the actor administers (region-admin)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,

    /// Sector the actor administers (sector-admin)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector_id: Option<String>,

    /// School the actor enters data for (school-admin)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<String>,
}

impl Scope {
    /// Scope bound to a single school
    pub fn school(id: impl Into<String>) -> Self {
        Scope {
            school_id: Some(id.into()),
            ..Scope::default()
        }
    }

    /// Scope bound to a sector
    pub fn sector(id: impl Into<String>) -> Self {
        Scope {
            sector_id: Some(id.into()),
            ..Scope::default()
        }
    }

    /// Scope bound to a region
    pub fn region(id: impl Into<String>) -> Self {
        Scope {
            region_id: Some(id.into()),
            ..Scope::default()
        }
    }
}
