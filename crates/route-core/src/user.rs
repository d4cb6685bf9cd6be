//! User account model with derived accessors

use crate::ModelResult;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamType {
    Admin,
    Client,
    Reseller,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    New,
    Active,
    Blocked,
    Deleted,
    #[serde(rename = "archive")]
    Archived,
}

// ============================================================================
// NESTED RECORDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub team_type: TeamType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPermission {
    pub id: u64,
    #[serde(rename = "type")]
    pub team_type: TeamType,
    pub client_id: u64,
    pub client_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedTeam {
    pub id: u64,
    #[serde(rename = "type")]
    pub team_type: TeamType,
    pub client_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPlan {
    pub id: u64,
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timezone {
    pub name: String,
    pub utc_offset_minutes: i32,
}

impl Timezone {
    /// Offset for rendering timestamps; out-of-range offsets yield `None`
    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
    }
}

/// Last editor of an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatedBy {
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub team_type: Option<TeamType>,
}

/// Key contact ids arrive as either numbers or strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyContactId {
    Number(u64),
    Text(String),
}

// ============================================================================
// PICTURE URL
// ============================================================================

/// Prefix `picture` with `file_url` unless it already contains it.
///
/// Containment rather than prefix matching keeps values stored with a
/// different scheme or proxy prefix untouched.
pub fn normalize_picture_url(picture: Option<String>, file_url: &str) -> Option<String> {
    match picture {
        Some(p) if p.is_empty() => Some(p),
        Some(p) if p.contains(file_url) => Some(p),
        Some(p) => Some(format!("{}{}", file_url, p)),
        None => None,
    }
}

// ============================================================================
// USER
// ============================================================================

/// Partial attribute bag as received from the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAttributes {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub user_name: String,
    pub picture: Option<String>,
    pub role: Option<UserRole>,
    pub status: UserStatus,
    pub team: Option<Team>,
    pub team_type: Option<TeamType>,
    pub client_id: Option<String>,
    /// Client record, kept as received
    pub client: Option<serde_json::Value>,
    pub billing_plan_id: Option<u64>,
    pub reseller_id: Option<u64>,
    pub key_contact_id: Option<KeyContactId>,
    pub user_groups: Vec<serde_json::Value>,
    pub is_dual_account: bool,
    pub driver_route_scope: Option<String>,
    pub driver_sensor_id: Option<String>,
    pub created_by_name: Option<String>,
    pub updated_by: Option<UpdatedBy>,
    pub driver_id: Option<String>,
    pub is_blocked: bool,
    pub blocking_message: Option<String>,
    #[serde(rename = "is2FaEnabled")]
    pub is_2fa_enabled: bool,
    pub all_teams_permissions: bool,
    pub team_permission: Vec<TeamPermission>,
    pub managed_teams: Option<Vec<ManagedTeam>>,
    pub plan: Option<UserPlan>,
    pub permissions: Vec<String>,
    pub date_format: Option<String>,
    pub language: Option<String>,
    pub timezone: Option<Timezone>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_logged_at: Option<DateTime<Utc>>,
}

/// Account record. Fields are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    attrs: UserAttributes,
}

impl User {
    /// Build from an attribute bag, normalizing the picture URL
    pub fn new(mut attrs: UserAttributes, file_url: &str) -> Self {
        attrs.picture = normalize_picture_url(attrs.picture.take(), file_url);
        Self { attrs }
    }

    pub fn from_json(json: &str, file_url: &str) -> ModelResult<Self> {
        let attrs: UserAttributes = serde_json::from_str(json)?;
        Ok(Self::new(attrs, file_url))
    }

    pub fn attributes(&self) -> &UserAttributes {
        &self.attrs
    }

    pub fn id(&self) -> &str {
        &self.attrs.id
    }

    pub fn name(&self) -> &str {
        &self.attrs.name
    }

    pub fn surname(&self) -> &str {
        &self.attrs.surname
    }

    pub fn email(&self) -> &str {
        &self.attrs.email
    }

    pub fn picture(&self) -> Option<&str> {
        self.attrs.picture.as_deref()
    }

    pub fn role(&self) -> Option<&UserRole> {
        self.attrs.role.as_ref()
    }

    pub fn team(&self) -> Option<&Team> {
        self.attrs.team.as_ref()
    }

    pub fn status(&self) -> UserStatus {
        self.attrs.status
    }

    pub fn date_format(&self) -> Option<&str> {
        self.attrs.date_format.as_deref().filter(|f| !f.is_empty())
    }

    pub fn timezone(&self) -> Option<&Timezone> {
        self.attrs.timezone.as_ref()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.attrs.name, self.attrs.surname)
    }

    pub fn is_client(&self) -> bool {
        self.attrs.team_type == Some(TeamType::Client)
    }

    pub fn is_admin(&self) -> bool {
        self.attrs.team_type == Some(TeamType::Admin)
    }

    pub fn is_reseller(&self) -> bool {
        self.attrs.team_type == Some(TeamType::Reseller)
    }

    pub fn is_deleted(&self) -> bool {
        self.attrs.status == UserStatus::Deleted
    }

    pub fn is_archived(&self) -> bool {
        self.attrs.status == UserStatus::Archived
    }
}

/// Payload for creating or editing a team user from the admin panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminTeamUserInput {
    pub email: String,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub is_blocked: bool,
    pub blocking_message: Option<String>,
    pub all_teams_permissions: bool,
    pub role_id: u64,
    pub team_permissions: Vec<u64>,
}

// ============================================================================
// LIST PROJECTION
// ============================================================================

/// List-view payload; a precomputed `fullName` may be present and is ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInListAttributes {
    pub full_name: Option<String>,
    pub id: String,
    pub name: String,
    pub surname: String,
    pub team: Option<Team>,
    pub picture: Option<String>,
}

/// Reduced user projection for list views
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInList {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub team: Option<Team>,
    picture: Option<String>,
}

impl UserInList {
    pub fn new(attrs: UserInListAttributes, file_url: &str) -> Self {
        let UserInListAttributes {
            full_name: _,
            id,
            name,
            surname,
            team,
            picture,
        } = attrs;
        Self {
            id,
            name,
            surname,
            team,
            picture: normalize_picture_url(picture, file_url),
        }
    }

    pub fn from_json(json: &str, file_url: &str) -> ModelResult<Self> {
        let attrs: UserInListAttributes = serde_json::from_str(json)?;
        Ok(Self::new(attrs, file_url))
    }

    pub fn picture(&self) -> Option<&str> {
        self.picture.as_deref()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

impl From<&User> for UserInList {
    fn from(user: &User) -> Self {
        Self {
            id: user.attrs.id.clone(),
            name: user.attrs.name.clone(),
            surname: user.attrs.surname.clone(),
            team: user.attrs.team.clone(),
            picture: user.attrs.picture.clone(),
        }
    }
}
