//! Shared domain enums, stored as TEXT columns

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Implements the SQLx TEXT mapping for an enum with `as_str` and `FromStr`
macro_rules! text_enum_sqlx {
    ($ty:ty) => {
        impl sqlx::Type<Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $ty {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as Decode<Postgres>>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Files maintenance requests
    Employee,
    /// Can be assigned requests and move them through their lifecycle
    Technician,
    /// Manages teams and equipment
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Technician => "technician",
            Role::Manager => "manager",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Role::Employee),
            "technician" => Ok(Role::Technician),
            "manager" => Ok(Role::Manager),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

text_enum_sqlx!(Role);

// ---------------------------------------------------------------------------
// RequestType
// ---------------------------------------------------------------------------

/// Kind of maintenance work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    Corrective,
    Preventive,
}

impl RequestType {
    pub const ALL: [RequestType; 2] = [RequestType::Corrective, RequestType::Preventive];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Corrective => "corrective",
            RequestType::Preventive => "preventive",
        }
    }
}

impl std::str::FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "corrective" => Ok(RequestType::Corrective),
            "preventive" => Ok(RequestType::Preventive),
            _ => Err(format!("Invalid request type: {}", s)),
        }
    }
}

text_enum_sqlx!(RequestType);

// ---------------------------------------------------------------------------
// RequestState
// ---------------------------------------------------------------------------

/// Maintenance request lifecycle state.
///
/// Any state may be written at any time; `Scrap` is terminal only by
/// convention and retires the equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    New,
    InProgress,
    Repaired,
    Scrap,
}

impl RequestState {
    pub const ALL: [RequestState; 4] = [
        RequestState::New,
        RequestState::InProgress,
        RequestState::Repaired,
        RequestState::Scrap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::New => "new",
            RequestState::InProgress => "in_progress",
            RequestState::Repaired => "repaired",
            RequestState::Scrap => "scrap",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestState::New => "New",
            RequestState::InProgress => "In Progress",
            RequestState::Repaired => "Repaired",
            RequestState::Scrap => "Scrap",
        }
    }

    /// Open requests count towards technician load and equipment badges
    pub fn is_open(&self) -> bool {
        matches!(self, RequestState::New | RequestState::InProgress)
    }

    /// Tag colour shown next to the state in request lists
    pub fn color(&self) -> &'static str {
        match self {
            RequestState::New => "#0d6efd",
            RequestState::InProgress => "#ffc107",
            RequestState::Repaired => "#198754",
            RequestState::Scrap => "#dc3545",
        }
    }
}

impl std::str::FromStr for RequestState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(RequestState::New),
            "in_progress" => Ok(RequestState::InProgress),
            "repaired" => Ok(RequestState::Repaired),
            "scrap" => Ok(RequestState::Scrap),
            _ => Err(format!("Invalid state: {}", s)),
        }
    }
}

text_enum_sqlx!(RequestState);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trips_through_str() {
        for state in RequestState::ALL {
            assert_eq!(state.as_str().parse::<RequestState>(), Ok(state));
        }
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        assert!("bogus".parse::<RequestState>().is_err());
        assert!("New".parse::<RequestState>().is_err());
        assert!("".parse::<RequestState>().is_err());
    }

    #[test]
    fn test_open_states() {
        let open: Vec<_> = RequestState::ALL.into_iter().filter(|s| s.is_open()).collect();
        assert_eq!(open, vec![RequestState::New, RequestState::InProgress]);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&RequestState::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::from_str::<RequestType>("\"preventive\"").unwrap(),
            RequestType::Preventive
        );
        assert_eq!(serde_json::from_str::<Role>("\"technician\"").unwrap(), Role::Technician);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("manager".parse::<Role>(), Ok(Role::Manager));
        assert!("admin".parse::<Role>().is_err());
    }
}
