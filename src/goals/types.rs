//! Goal types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    /// Owner's user ID
    pub user: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Goal about to be inserted
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub user: String,
    pub text: String,
}

/// Create/update body
#[derive(Debug, Default, Deserialize)]
pub struct GoalRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Delete response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedGoal {
    pub id: String,
}
