use super::report::{Priority, Report, ReportStatus};

/// Criteria for narrowing down the report list. Every criterion left empty
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromForm)]
pub struct ReportFilter {
    /// Case-insensitive text to look for in the title or description.
    pub search: Option<String>,
    /// Also look for `search` in the submitter's username.
    #[field(default = false)]
    pub search_usernames: bool,
    pub status: Option<ReportStatus>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
}

impl ReportFilter {
    pub fn matches(&self, report: &Report) -> bool {
        self.matches_search(report)
            && self.status.map_or(true, |status| report.status == status)
            && self.priority.map_or(true, |p| report.priority() == p)
            && self
                .category
                .as_deref()
                .map_or(true, |category| report.category.as_deref() == Some(category))
    }

    fn matches_search(&self, report: &Report) -> bool {
        let needle = match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => needle.to_lowercase(),
            _ => return true,
        };
        report.title.to_lowercase().contains(&needle)
            || report.description.to_lowercase().contains(&needle)
            || (self.search_usernames && report.username.to_lowercase().contains(&needle))
    }
}
