use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity record, created once on first run and kept until a full reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub join_date: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Profile {
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            name: String::new(),
            email: String::new(),
            avatar: None,
            join_date: now,
            last_active: now,
        }
    }
}

/// Whitelisted profile fields a caller may change. Unknown keys are rejected
/// at deserialization time rather than merged in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    pub fn apply(self, profile: &mut Profile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(avatar) = self.avatar {
            profile.avatar = Some(avatar);
        }
    }
}
