use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{report::ReportId, user::UserId};

/// The voting ledger of a single report. Polls share their report's ID.
///
/// Deserialized polls recount their votes from the voter set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PollRecord")]
pub struct Poll {
    pub id: ReportId,
    pub report_id: ReportId,
    votes: u32,
    voters: BTreeSet<UserId>,
}

/// A poll as received, before its vote count is trusted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PollRecord {
    report_id: ReportId,
    #[serde(default)]
    voters: BTreeSet<UserId>,
}

impl From<PollRecord> for Poll {
    fn from(record: PollRecord) -> Self {
        Self::with_voters(record.report_id, record.voters)
    }
}

impl Poll {
    /// An empty poll for the given report.
    pub fn new(report_id: ReportId) -> Self {
        Self {
            id: report_id,
            report_id,
            votes: 0,
            voters: BTreeSet::new(),
        }
    }

    /// A poll pre-populated with voters, e.g. from seed data.
    pub fn with_voters<I>(report_id: ReportId, voters: I) -> Self
    where
        I: IntoIterator<Item = UserId>,
    {
        let voters: BTreeSet<UserId> = voters.into_iter().collect();
        Self {
            id: report_id,
            report_id,
            votes: voters.len() as u32,
            voters,
        }
    }

    pub fn votes(&self) -> u32 {
        self.votes
    }

    pub fn voters(&self) -> &BTreeSet<UserId> {
        &self.voters
    }

    pub fn has_voted(&self, user_id: &str) -> bool {
        self.voters.contains(user_id)
    }

    /// Record a vote. Returns `false`, leaving the poll untouched, if this
    /// user has already voted.
    pub fn record(&mut self, user_id: UserId) -> bool {
        if !self.voters.insert(user_id) {
            return false;
        }
        self.votes += 1;
        true
    }
}
