use serde::{Deserialize, Serialize};

use super::{
    poll::Poll,
    report::{Report, ReportStatus},
};

/// Points for each report a contributor has submitted.
pub const POINTS_PER_REPORT: u32 = 10;
/// Points for each vote a contributor's reports have received.
pub const POINTS_PER_VOTE: u32 = 2;

/// One row of the contributor ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub points: u32,
    /// Number of reports submitted.
    pub reports: u32,
}

/// Rank contributors by points, highest first. Contributors with equal
/// points stay in the order they first appear in `reports`.
pub fn leaderboard<'a, I>(reports: I) -> Vec<LeaderboardEntry>
where
    I: IntoIterator<Item = &'a Report>,
{
    // (username, report count, votes received), in first-encounter order.
    let mut tallies: Vec<(&str, u32, u32)> = Vec::new();
    for report in reports {
        match tallies
            .iter_mut()
            .find(|(username, _, _)| *username == report.username)
        {
            Some((_, count, votes)) => {
                *count += 1;
                *votes += report.votes;
            }
            None => tallies.push((&report.username, 1, report.votes)),
        }
    }

    let mut entries = tallies
        .into_iter()
        .map(|(username, count, votes)| LeaderboardEntry {
            username: username.to_string(),
            points: count * POINTS_PER_REPORT + votes * POINTS_PER_VOTE,
            reports: count,
        })
        .collect::<Vec<_>>();
    // `sort_by` is stable, so ties keep encounter order.
    entries.sort_by(|a, b| b.points.cmp(&a.points));
    entries
}

/// Achievements shown on a contributor's profile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Badge {
    FirstReporter,
    CommunityHelper,
    TopContributor,
    ProblemSolver,
    CivicChampion,
}

impl Badge {
    pub const ALL: [Badge; 5] = [
        Self::FirstReporter,
        Self::CommunityHelper,
        Self::TopContributor,
        Self::ProblemSolver,
        Self::CivicChampion,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstReporter => "First Reporter",
            Self::CommunityHelper => "Community Helper",
            Self::TopContributor => "Top Contributor",
            Self::ProblemSolver => "Problem Solver",
            Self::CivicChampion => "Civic Champion",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FirstReporter => "Submit your first issue report",
            Self::CommunityHelper => "Vote on 10 different issues",
            Self::TopContributor => "Rank in top 10 contributors",
            Self::ProblemSolver => "Report 5 issues that get resolved",
            Self::CivicChampion => "Earn 500+ points",
        }
    }

    fn earned(&self, progress: &Progress) -> bool {
        match self {
            Self::FirstReporter => progress.reports >= 1,
            Self::CommunityHelper => progress.polls_voted >= 10,
            Self::TopContributor => progress.rank.map_or(false, |rank| rank <= 10),
            Self::ProblemSolver => progress.resolved >= 5,
            Self::CivicChampion => progress.points >= 500,
        }
    }
}

struct Progress {
    reports: u32,
    resolved: u32,
    polls_voted: u32,
    points: u32,
    rank: Option<usize>,
}

/// A badge and whether the contributor has it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeStatus {
    pub badge: Badge,
    pub name: String,
    pub description: String,
    pub earned: bool,
}

/// A single contributor's standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorProfile {
    pub username: String,
    pub points: u32,
    pub reports: u32,
    /// 1-based position on the leaderboard, absent for users with no reports.
    pub rank: Option<usize>,
    pub badges: Vec<BadgeStatus>,
}

impl ContributorProfile {
    /// Work out the standing of `username` (who votes as `user_id`).
    pub fn compute(username: &str, user_id: &str, reports: &[Report], polls: &[Poll]) -> Self {
        let board = leaderboard(reports);
        let position = board.iter().position(|entry| entry.username == username);
        let (points, report_count) = position
            .map(|index| (board[index].points, board[index].reports))
            .unwrap_or((0, 0));

        let progress = Progress {
            reports: report_count,
            resolved: reports
                .iter()
                .filter(|r| r.username == username && r.status == ReportStatus::Resolved)
                .count() as u32,
            polls_voted: polls.iter().filter(|p| p.has_voted(user_id)).count() as u32,
            points,
            rank: position.map(|index| index + 1),
        };

        Self {
            username: username.to_string(),
            points,
            reports: report_count,
            rank: progress.rank,
            badges: Badge::ALL
                .iter()
                .map(|badge| BadgeStatus {
                    badge: *badge,
                    name: badge.name().to_string(),
                    description: badge.description().to_string(),
                    earned: badge.earned(&progress),
                })
                .collect(),
        }
    }

    pub fn has(&self, badge: Badge) -> bool {
        self.badges.iter().any(|b| b.badge == badge && b.earned)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::common::report::ReportDraft;

    fn report(id: u32, username: &str, votes: u32) -> Report {
        let mut report = Report::new(id, ReportDraft::example_by(username, username), Utc::now());
        report.votes = votes;
        report
    }

    #[test]
    fn scoring_formula() {
        let reports = vec![report(1, "dana", 12), report(2, "dana", 8)];
        let board = leaderboard(&reports);
        assert_eq!(
            board,
            vec![LeaderboardEntry {
                username: "dana".to_string(),
                points: 60,
                reports: 2,
            }]
        );
    }

    #[test]
    fn sorted_descending_with_stable_ties() {
        let reports = vec![
            report(1, "low", 0),
            report(2, "tie_a", 5),
            report(3, "high", 40),
            report(4, "tie_b", 5),
        ];
        let names = leaderboard(&reports)
            .into_iter()
            .map(|entry| entry.username)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["high", "tie_a", "tie_b", "low"]);
    }

    #[test]
    fn empty_collection_gives_empty_board() {
        assert!(leaderboard(&Vec::<Report>::new()).is_empty());
    }

    #[test]
    fn profile_badges() {
        let mut reports = (1..=5)
            .map(|id| report(id, "erin", 50))
            .collect::<Vec<_>>();
        for report in reports.iter_mut() {
            report.status = ReportStatus::Resolved;
        }
        let polls = (1..=10)
            .map(|id| Poll::with_voters(id, ["erin-id".to_string()]))
            .collect::<Vec<_>>();

        let profile = ContributorProfile::compute("erin", "erin-id", &reports, &polls);
        assert_eq!(profile.rank, Some(1));
        assert_eq!(profile.points, 5 * 10 + 250 * 2);
        for badge in Badge::ALL {
            assert!(profile.has(badge), "missing {badge:?}");
        }
    }

    #[test]
    fn profile_of_newcomer() {
        let reports = vec![report(1, "frank", 3)];
        let profile = ContributorProfile::compute("gina", "gina-id", &reports, &[]);
        assert_eq!(profile.rank, None);
        assert_eq!(profile.points, 0);
        assert!(profile.badges.iter().all(|badge| !badge.earned));
    }
}
