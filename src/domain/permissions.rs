//! Scope checks over the region / sector / school hierarchy
//!
//! The transition table gates WHO may attempt a transition by role.
//! These checks answer the narrower question of WHICH schools a given
//! actor's scope actually covers.

use crate::schemas::{Actor, Role, School};

/// Whether the role may create and edit draft entries at all.
///
/// Data entry belongs to school-admins. Reviewer roles never type
/// values in, they only approve or reject.
pub fn can_edit_entries(role: Role) -> bool {
    role == Role::SchoolAdmin
}

/// Whether the actor may enter and submit data for the given school
pub fn can_act_for_school(actor: &Actor, school: &School) -> bool {
    match actor.role {
        Role::SchoolAdmin => actor.scope.school_id.as_deref() == Some(school.id.as_str()),
        _ => false,
    }
}

/// Whether the actor's scope covers the school for review purposes.
///
/// This backs the "has approval permission" check: a sector-admin
/// covers schools in their sector, a region-admin schools in their
/// region, a super-admin every school. A school-admin never reviews.
pub fn can_approve_school(actor: &Actor, school: &School) -> bool {
    match actor.role {
        Role::SchoolAdmin => false,
        Role::SectorAdmin => actor.scope.sector_id.as_deref() == Some(school.sector_id.as_str()),
        Role::RegionAdmin => actor.scope.region_id.as_deref() == Some(school.region_id.as_str()),
        Role::SuperAdmin => true,
    }
}

/// Whether the actor may list and show entries for the given school
pub fn can_view_school(actor: &Actor, school: &School) -> bool {
    match actor.role {
        Role::SchoolAdmin => actor.scope.school_id.as_deref() == Some(school.id.as_str()),
        Role::SectorAdmin => actor.scope.sector_id.as_deref() == Some(school.sector_id.as_str()),
        Role::RegionAdmin => actor.scope.region_id.as_deref() == Some(school.region_id.as_str()),
        Role::SuperAdmin => true,
    }
}
