//! Data models for GearGuard

pub mod enums;
pub mod equipment;
pub mod request;
pub mod team;
pub mod user;

// Re-export commonly used types
pub use enums::{RequestState, RequestType, Role};
pub use equipment::{Equipment, EquipmentListItem};
pub use request::{MaintenanceRequest, RequestListItem, RequestSubmission};
pub use team::{MaintenanceTeam, TeamSummary};
pub use user::{User, UserClaims, UserShort};
