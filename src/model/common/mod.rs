//! Core data model shared by the store, the session layer and the API.

pub mod filter;
pub mod leaderboard;
pub mod navigation;
pub mod poll;
pub mod report;
pub mod statistics;
pub mod user;

pub use filter::ReportFilter;
pub use leaderboard::{leaderboard, Badge, BadgeStatus, ContributorProfile, LeaderboardEntry};
pub use navigation::{Navigation, Page};
pub use poll::Poll;
pub use report::{
    Location, Priority, Report, ReportDraft, ReportId, ReportStatus, Submitter,
    CATEGORY_SUGGESTIONS, DEFAULT_CATEGORY,
};
pub use statistics::{CategoryStatistics, Statistics};
pub use user::{Role, User, UserId};
