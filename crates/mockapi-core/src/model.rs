// ABOUTME: Defines the domain records served by the mock: libraries, their context elements,
// ABOUTME: organizations, membership rows, fabricated users, and the two catalog organizations.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the two organizations allowed to browse the library catalog.
/// Selected per request through the `org-id` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogOrg {
    #[serde(rename = "org-001")]
    Org001,
    #[serde(rename = "org-002")]
    Org002,
}

impl CatalogOrg {
    /// Parse the raw header value. Anything other than the two exact ids is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "org-001" => Some(Self::Org001),
            "org-002" => Some(Self::Org002),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Org001 => "org-001",
            Self::Org002 => "org-002",
        }
    }
}

impl fmt::Display for CatalogOrg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single context inside a library, either stored (created through the API)
/// or synthesized on read to pad the library up to its `contextCount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryElement {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
}

impl LibraryElement {
    /// Case-insensitive substring match against title or description.
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

/// A library in the catalog. `context_count` is the denormalized total,
/// including elements that have never been materialized.
#[derive(Debug, Clone, Serialize)]
pub struct Library {
    pub id: String,
    pub title: String,
    #[serde(rename = "contextCount")]
    pub context_count: usize,
    #[serde(skip)]
    pub org: CatalogOrg,
    /// Elements created through the API, in creation order.
    #[serde(skip)]
    pub stored: Vec<LibraryElement>,
}

impl Library {
    pub fn new(id: &str, title: &str, context_count: usize, org: CatalogOrg) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            context_count,
            org,
            stored: Vec::new(),
        }
    }
}

/// An organization record from the membership side of the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner_id: String,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    /// Only the exact string "admin" grants admin; everything else is a member.
    pub fn from_requested(raw: Option<&str>) -> Self {
        match raw {
            Some("admin") => Role::Admin,
            _ => Role::Member,
        }
    }
}

/// Membership of a user in an organization. At most one row per (user, organization).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationUser {
    pub user_id: String,
    pub organization_id: String,
    pub role: Role,
    #[serde(with = "iso_millis")]
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

/// Serializes timestamps the way JavaScript's `toISOString` does:
/// millisecond precision with a trailing `Z`.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
