use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::common::{
    Location, Poll, Priority, Report, ReportDraft, ReportStatus, Submitter, User,
    DEFAULT_CATEGORY,
};

/// A report as submitted by a citizen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSubmission {
    pub title: String,
    pub description: String,
    /// Free text, or `{"latitude": .., "longitude": ..}` from the device.
    pub location: Location,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

impl ReportSubmission {
    /// Check the required fields and attach the submitter.
    pub fn into_draft(self, submitter: &User) -> Result<ReportDraft> {
        if self.title.trim().is_empty() {
            return Err(Error::BadRequest("Title must not be empty".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(Error::BadRequest(
                "Description must not be empty".to_string(),
            ));
        }
        if self.location.is_blank() {
            return Err(Error::BadRequest("Location must not be empty".to_string()));
        }

        let category = self
            .category
            .map(|category| category.trim().to_string())
            .filter(|category| !category.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Ok(ReportDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            location: self.location.to_string(),
            category: Some(category),
            photo: self.photo.filter(|photo| !photo.is_empty()),
            submitter: Submitter {
                user_id: submitter.id.clone(),
                username: submitter.username.clone(),
            },
        })
    }
}

/// Admin triage decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ReportStatus,
}

/// A report, its poll, and how it looks to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetail {
    pub report: Report,
    pub poll: Poll,
    pub priority: Priority,
    /// Whether the caller has already voted on this report.
    pub has_voted: bool,
}

impl ReportDetail {
    pub fn new(report: Report, poll: Poll, viewer: &User) -> Self {
        Self {
            priority: report.priority(),
            has_voted: poll.has_voted(&viewer.id),
            report,
            poll,
        }
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl ReportSubmission {
        pub fn example() -> Self {
            Self {
                title: "Broken Sign".to_string(),
                description: "Stop sign knocked over".to_string(),
                location: Location::Text("Elm Street".to_string()),
                category: Some("Public Safety".to_string()),
                photo: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rocket::serde::json::serde_json::{self, json};

    use super::*;

    fn citizen() -> User {
        User::citizen("alice".to_string(), "555-0100".to_string())
    }

    #[test]
    fn draft_carries_submitter() {
        let user = citizen();
        let draft = ReportSubmission::example().into_draft(&user).unwrap();
        assert_eq!(draft.submitter.user_id, user.id);
        assert_eq!(draft.submitter.username, "alice");
        assert_eq!(draft.category.as_deref(), Some("Public Safety"));
        assert_eq!(draft.location, "Elm Street");
    }

    #[test]
    fn missing_category_uses_default() {
        let mut submission = ReportSubmission::example();
        submission.category = Some("  ".to_string());
        let draft = submission.into_draft(&citizen()).unwrap();
        assert_eq!(draft.category.as_deref(), Some(DEFAULT_CATEGORY));
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut submission = ReportSubmission::example();
        submission.title = " ".to_string();
        assert!(matches!(
            submission.into_draft(&citizen()),
            Err(Error::BadRequest(_))
        ));

        let mut submission = ReportSubmission::example();
        submission.description = String::new();
        assert!(submission.into_draft(&citizen()).is_err());

        let mut submission = ReportSubmission::example();
        submission.location = Location::Text(String::new());
        assert!(submission.into_draft(&citizen()).is_err());
    }

    #[test]
    fn coordinates_become_text() {
        let submission: ReportSubmission = serde_json::from_value(json!({
            "title": "Fallen tree",
            "description": "Blocking the footpath",
            "location": { "latitude": 40.7128, "longitude": -74.006 },
        }))
        .unwrap();
        let draft = submission.into_draft(&citizen()).unwrap();
        assert_eq!(draft.location, "Lat: 40.712800, Lng: -74.006000");
        assert_eq!(draft.category.as_deref(), Some(DEFAULT_CATEGORY));
    }

    #[test]
    fn status_update_from_json() {
        let update: StatusUpdate = serde_json::from_value(json!({ "status": "resolved" })).unwrap();
        assert_eq!(update.status, ReportStatus::Resolved);
        assert!(serde_json::from_value::<StatusUpdate>(json!({ "status": "closed" })).is_err());
    }
}
