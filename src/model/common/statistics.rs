use serde::{Deserialize, Serialize};

use super::report::{Priority, Report, ReportStatus};

/// How many reports share a category, and how many of those are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStatistics {
    pub category: String,
    pub count: u32,
    pub resolved: u32,
}

/// Aggregate figures over the whole report collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: u32,
    pub submitted: u32,
    pub acknowledged: u32,
    pub resolved: u32,
    pub high_priority: u32,
    pub medium_priority: u32,
    pub low_priority: u32,
    pub total_votes: u32,
    /// In order of first appearance.
    pub categories: Vec<CategoryStatistics>,
}

impl Statistics {
    pub fn compute(reports: &[Report]) -> Self {
        let mut stats = Self::default();
        for report in reports {
            stats.total += 1;
            stats.total_votes += report.votes;
            match report.status {
                ReportStatus::Submitted => stats.submitted += 1,
                ReportStatus::Acknowledged => stats.acknowledged += 1,
                ReportStatus::Resolved => stats.resolved += 1,
            }
            match report.priority() {
                Priority::High => stats.high_priority += 1,
                Priority::Medium => stats.medium_priority += 1,
                Priority::Low => stats.low_priority += 1,
            }

            let category = match report.category.as_deref() {
                Some(category) if !category.is_empty() => category,
                _ => continue,
            };
            let resolved = u32::from(report.status == ReportStatus::Resolved);
            match stats
                .categories
                .iter_mut()
                .find(|entry| entry.category == category)
            {
                Some(entry) => {
                    entry.count += 1;
                    entry.resolved += resolved;
                }
                None => stats.categories.push(CategoryStatistics {
                    category: category.to_string(),
                    count: 1,
                    resolved,
                }),
            }
        }
        stats
    }
}

#[cfg(test)]
impl Statistics {
    pub fn count(&self, status: ReportStatus) -> u32 {
        match status {
            ReportStatus::Submitted => self.submitted,
            ReportStatus::Acknowledged => self.acknowledged,
            ReportStatus::Resolved => self.resolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::common::report::ReportDraft;

    fn report(category: Option<&str>, status: ReportStatus, votes: u32) -> Report {
        let mut draft = ReportDraft::example();
        draft.category = category.map(str::to_string);
        let mut report = Report::new(1, draft, Utc::now());
        report.status = status;
        report.votes = votes;
        report
    }

    #[test]
    fn counts_everything() {
        let reports = vec![
            report(Some("Utilities"), ReportStatus::Resolved, 20),
            report(Some("Sanitation"), ReportStatus::Submitted, 8),
            report(Some("Utilities"), ReportStatus::Submitted, 1),
            report(None, ReportStatus::Acknowledged, 0),
        ];
        let stats = Statistics::compute(&reports);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.count(ReportStatus::Submitted), 2);
        assert_eq!(stats.count(ReportStatus::Acknowledged), 1);
        assert_eq!(stats.count(ReportStatus::Resolved), 1);
        assert_eq!(
            (stats.high_priority, stats.medium_priority, stats.low_priority),
            (1, 1, 2)
        );
        assert_eq!(stats.total_votes, 29);
        assert_eq!(
            stats.categories,
            vec![
                CategoryStatistics {
                    category: "Utilities".to_string(),
                    count: 2,
                    resolved: 1,
                },
                CategoryStatistics {
                    category: "Sanitation".to_string(),
                    count: 1,
                    resolved: 0,
                },
            ]
        );
    }
}
