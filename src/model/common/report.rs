use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Our report IDs are integers.
pub type ReportId = u32;

/// Categories offered to submitters. Reports may carry any other tag.
pub const CATEGORY_SUGGESTIONS: [&str; 7] = [
    "Road Maintenance",
    "Public Safety",
    "Utilities",
    "Sanitation",
    "Parks & Recreation",
    "Vandalism",
    "Other",
];

/// Category used when a draft does not name one.
pub const DEFAULT_CATEGORY: &str = CATEGORY_SUGGESTIONS[0];

/// States in the report lifecycle. The order is the usual progression, but
/// admins may move a report between any two states.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, FromFormField,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Freshly submitted, not yet looked at.
    Submitted,
    /// Seen by an admin and queued for work.
    Acknowledged,
    /// Fixed.
    Resolved,
}

impl Display for ReportStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Submitted => "submitted",
                Self::Acknowledged => "acknowledged",
                Self::Resolved => "resolved",
            }
        )
    }
}

/// Triage priority, derived from how many citizens voted for a report.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromFormField)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Votes needed for medium priority.
    pub const MEDIUM_THRESHOLD: u32 = 8;
    /// Votes needed for high priority.
    pub const HIGH_THRESHOLD: u32 = 15;

    pub fn from_votes(votes: u32) -> Self {
        if votes >= Self::HIGH_THRESHOLD {
            Self::High
        } else if votes >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Where an issue was spotted: free text, or coordinates rendered as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    Coordinates { latitude: f64, longitude: f64 },
    Text(String),
}

impl Location {
    /// Is there nothing usable in this location?
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Coordinates {
                latitude,
                longitude,
            } => !latitude.is_finite() || !longitude.is_finite(),
        }
    }
}

impl Display for Location {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(formatter, "{text}"),
            Self::Coordinates {
                latitude,
                longitude,
            } => write!(formatter, "Lat: {latitude:.6}, Lng: {longitude:.6}"),
        }
    }
}

/// Who submitted a report. Denormalized into the report itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitter {
    pub user_id: UserId,
    pub username: String,
}

/// Everything needed to create a report; the store fills in the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: Option<String>,
    pub photo: Option<String>,
    pub submitter: Submitter,
}

/// A civic issue report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub status: ReportStatus,
    pub user_id: UserId,
    pub username: String,
    /// Mirrors the vote count of the paired poll.
    pub votes: u32,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Report {
    /// Build a fresh report from a draft.
    pub fn new(id: ReportId, draft: ReportDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            location: draft.location,
            photo: draft.photo,
            status: ReportStatus::Submitted,
            user_id: draft.submitter.user_id,
            username: draft.submitter.username,
            votes: 0,
            created_at,
            category: draft.category,
        }
    }

    pub fn priority(&self) -> Priority {
        Priority::from_votes(self.votes)
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl ReportDraft {
        pub fn example() -> Self {
            Self {
                title: "Broken Sign".to_string(),
                description: "Stop sign knocked over at the junction".to_string(),
                location: "Elm Street & 3rd Ave".to_string(),
                category: Some("Public Safety".to_string()),
                photo: None,
                submitter: Submitter::example(),
            }
        }

        pub fn example_by(user_id: &str, username: &str) -> Self {
            Self {
                submitter: Submitter {
                    user_id: user_id.to_string(),
                    username: username.to_string(),
                },
                ..Self::example()
            }
        }
    }

    impl Submitter {
        pub fn example() -> Self {
            Self {
                user_id: "citizen1".to_string(),
                username: "alice".to_string(),
            }
        }
    }
}
