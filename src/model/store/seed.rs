use chrono::{DateTime, TimeZone, Utc};

use crate::model::common::{Poll, Report, ReportStatus, UserId};

struct SeedReport {
    id: u32,
    title: &'static str,
    description: &'static str,
    location: &'static str,
    status: ReportStatus,
    user_id: &'static str,
    username: &'static str,
    votes: u32,
    created: (i32, u32, u32),
    category: &'static str,
    /// Known voters; padded with synthetic voters up to `votes`.
    voters: &'static [&'static str],
}

const SEED_REPORTS: [SeedReport; 3] = [
    SeedReport {
        id: 1,
        title: "Pothole on Main Street",
        description: "Large pothole causing traffic issues",
        location: "Main Street & 5th Ave",
        status: ReportStatus::Submitted,
        user_id: "user1",
        username: "john_doe",
        votes: 15,
        created: (2024, 1, 15),
        category: "Road Maintenance",
        voters: &["user1", "user2", "user3"],
    },
    SeedReport {
        id: 2,
        title: "Broken Streetlight",
        description: "Streetlight not working for past week",
        location: "Oak Avenue",
        status: ReportStatus::Acknowledged,
        user_id: "user2",
        username: "jane_smith",
        votes: 8,
        created: (2024, 1, 14),
        category: "Public Safety",
        voters: &["user1", "user4"],
    },
    SeedReport {
        id: 3,
        title: "Park Bench Vandalism",
        description: "Graffiti on park benches",
        location: "Central Park",
        status: ReportStatus::Resolved,
        user_id: "user3",
        username: "mike_wilson",
        votes: 12,
        created: (2024, 1, 13),
        category: "Vandalism",
        voters: &["user2", "user3", "user4"],
    },
];

fn midnight(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// The demo reports (most recent first) and their polls. Every poll has
/// exactly as many voters as its report has votes.
pub fn seed_data() -> (Vec<Report>, Vec<Poll>) {
    SEED_REPORTS
        .iter()
        .map(|seed| {
            let (year, month, day) = seed.created;
            let report = Report {
                id: seed.id,
                title: seed.title.to_string(),
                description: seed.description.to_string(),
                location: seed.location.to_string(),
                photo: None,
                status: seed.status,
                user_id: seed.user_id.to_string(),
                username: seed.username.to_string(),
                votes: seed.votes,
                created_at: midnight(year, month, day),
                category: Some(seed.category.to_string()),
            };

            let padding = (seed.voters.len() as u32 + 1..=seed.votes)
                .map(|n| format!("seed-{}-{n}", seed.id));
            let voters = seed
                .voters
                .iter()
                .map(|voter| voter.to_string())
                .chain(padding)
                .collect::<Vec<UserId>>();
            (report, Poll::with_voters(seed.id, voters))
        })
        .unzip()
}
