//! Technician auto-assignment policy

use crate::models::team::TechnicianLoad;

/// Pick the technician for a new, unassigned request.
///
/// The equipment's default technician always wins. Otherwise the team member
/// with the fewest open requests is chosen, ties going to the lowest user id.
/// A team without members yields `None`.
pub fn select_technician(default_technician_id: Option<i32>, loads: &[TechnicianLoad]) -> Option<i32> {
    if default_technician_id.is_some() {
        return default_technician_id;
    }

    loads
        .iter()
        .min_by_key(|load| (load.open_requests, load.user_id))
        .map(|load| load.user_id)
}
