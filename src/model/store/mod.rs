//! The in-memory report and poll store.
//!
//! Both collections live behind a single lock, so every operation observes
//! and leaves behind a consistent pairing of reports and polls.

use std::collections::HashMap;

use chrono::Utc;
use log::{debug, info};
use rocket::tokio::sync::RwLock;

use crate::model::common::{
    leaderboard, ContributorProfile, LeaderboardEntry, Poll, Report, ReportDraft, ReportFilter,
    ReportId, ReportStatus, Statistics, User,
};

mod seed;

/// What happened when a vote was cast. Polls are snapshots taken under the
/// same lock as the vote itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The vote counted; the poll as it stood right after.
    Recorded(Poll),
    /// The user had already voted; nothing changed.
    AlreadyVoted(Poll),
    /// No such report; nothing changed.
    UnknownReport,
}

struct Collections {
    /// Most recent first.
    reports: Vec<Report>,
    polls: HashMap<ReportId, Poll>,
    /// Next report ID to hand out.
    next_id: ReportId,
}

impl Collections {
    fn report_mut(&mut self, id: ReportId) -> Option<&mut Report> {
        self.reports.iter_mut().find(|report| report.id == id)
    }

    fn polls_in_report_order(&self) -> Vec<Poll> {
        self.reports
            .iter()
            .filter_map(|report| self.polls.get(&report.id))
            .cloned()
            .collect()
    }
}

/// Owner of every report and poll for the lifetime of the process.
pub struct Store {
    collections: RwLock<Collections>,
}

impl Store {
    /// A store with no reports.
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }

    /// A store preloaded with the demo reports and polls.
    pub fn seeded() -> Self {
        let (reports, polls) = seed::seed_data();
        Self::from_parts(reports, polls)
    }

    /// Build a store from existing reports (most recent first) and their polls.
    /// Report vote counts are taken from the polls.
    pub fn from_parts(mut reports: Vec<Report>, polls: Vec<Poll>) -> Self {
        let mut polls: HashMap<ReportId, Poll> =
            polls.into_iter().map(|poll| (poll.report_id, poll)).collect();
        for report in reports.iter_mut() {
            let poll = polls
                .entry(report.id)
                .or_insert_with(|| Poll::new(report.id));
            report.votes = poll.votes();
        }
        let next_id = reports.iter().map(|report| report.id).max().unwrap_or(0) + 1;

        Self {
            collections: RwLock::new(Collections {
                reports,
                polls,
                next_id,
            }),
        }
    }

    /// Create a report and its poll, placing the report at the head of the list.
    pub async fn submit_report(&self, draft: ReportDraft) -> Report {
        let mut collections = self.collections.write().await;

        let id = collections.next_id;
        collections.next_id += 1;

        let report = Report::new(id, draft, Utc::now());
        collections.polls.insert(id, Poll::new(id));
        collections.reports.insert(0, report.clone());

        info!(
            "Report {id} \"{}\" submitted by {}",
            report.title, report.username
        );
        report
    }

    /// Set a report's status. Any status may follow any other.
    /// Returns whether the report exists; unknown IDs are ignored.
    pub async fn update_status(&self, id: ReportId, status: ReportStatus) -> bool {
        let mut collections = self.collections.write().await;
        match collections.report_mut(id) {
            Some(report) => {
                info!("Report {id} status {} -> {status}", report.status);
                report.status = status;
                true
            }
            None => {
                debug!("Ignoring status update for unknown report {id}");
                false
            }
        }
    }

    /// Cast `user_id`'s vote on a report. Each user counts at most once per
    /// report; repeat votes change nothing.
    pub async fn vote(&self, report_id: ReportId, user_id: &str) -> VoteOutcome {
        let mut collections = self.collections.write().await;

        let poll = match collections.polls.get_mut(&report_id) {
            Some(poll) => {
                if !poll.record(user_id.to_string()) {
                    debug!("User {user_id} already voted on report {report_id}");
                    return VoteOutcome::AlreadyVoted(poll.clone());
                }
                poll.clone()
            }
            None => {
                debug!("Ignoring vote for unknown report {report_id}");
                return VoteOutcome::UnknownReport;
            }
        };

        // Polls are only ever created alongside their report.
        if let Some(report) = collections.report_mut(report_id) {
            report.votes = poll.votes();
        }
        debug!(
            "User {user_id} voted on report {report_id}, now {} votes",
            poll.votes()
        );
        VoteOutcome::Recorded(poll)
    }

    /// All reports, most recent first.
    pub async fn reports(&self) -> Vec<Report> {
        self.collections.read().await.reports.clone()
    }

    pub async fn report(&self, id: ReportId) -> Option<Report> {
        let collections = self.collections.read().await;
        collections
            .reports
            .iter()
            .find(|report| report.id == id)
            .cloned()
    }

    /// All polls, in the same order as their reports.
    pub async fn polls(&self) -> Vec<Poll> {
        self.collections.read().await.polls_in_report_order()
    }

    pub async fn poll(&self, report_id: ReportId) -> Option<Poll> {
        self.collections.read().await.polls.get(&report_id).cloned()
    }

    /// A report together with its poll.
    pub async fn report_with_poll(&self, id: ReportId) -> Option<(Report, Poll)> {
        let collections = self.collections.read().await;
        let report = collections.reports.iter().find(|report| report.id == id)?;
        let poll = collections.polls.get(&id)?;
        Some((report.clone(), poll.clone()))
    }

    /// Reports matching the filter, most recent first.
    pub async fn query(&self, filter: &ReportFilter) -> Vec<Report> {
        let collections = self.collections.read().await;
        collections
            .reports
            .iter()
            .filter(|report| filter.matches(report))
            .cloned()
            .collect()
    }

    /// The `count` most recent reports.
    pub async fn recent(&self, count: usize) -> Vec<Report> {
        let collections = self.collections.read().await;
        collections.reports.iter().take(count).cloned().collect()
    }

    /// Distinct categories in use, in order of first appearance.
    pub async fn categories(&self) -> Vec<String> {
        let collections = self.collections.read().await;
        let mut categories: Vec<String> = Vec::new();
        for category in collections
            .reports
            .iter()
            .filter_map(|report| report.category.as_ref())
        {
            if !category.is_empty() && !categories.contains(category) {
                categories.push(category.clone());
            }
        }
        categories
    }

    pub async fn statistics(&self) -> Statistics {
        Statistics::compute(&self.collections.read().await.reports)
    }

    /// Rank contributors. Always computed from the current reports.
    pub async fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        leaderboard(&self.collections.read().await.reports)
    }

    /// Standing and badges of one user.
    pub async fn profile(&self, user: &User) -> ContributorProfile {
        let collections = self.collections.read().await;
        ContributorProfile::compute(
            &user.username,
            &user.id,
            &collections.reports,
            &collections.polls_in_report_order(),
        )
    }
}

#[cfg(test)]
impl Store {
    /// Check that every poll agrees with its report and its own voter set.
    pub async fn is_consistent(&self) -> bool {
        let collections = self.collections.read().await;
        collections.reports.len() == collections.polls.len()
            && collections.reports.iter().all(|report| {
                collections.polls.get(&report.id).map_or(false, |poll| {
                    poll.report_id == report.id
                        && poll.votes() as usize == poll.voters().len()
                        && poll.votes() == report.votes
                })
            })
    }

    /// Users who have voted on a report.
    pub async fn voters(&self, report_id: ReportId) -> Vec<crate::model::common::UserId> {
        self.collections
            .read()
            .await
            .polls
            .get(&report_id)
            .map(|poll| poll.voters().iter().cloned().collect())
            .unwrap_or_default()
    }
}
