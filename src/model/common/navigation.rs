use serde::Serialize;

use super::user::Role;

/// Pages of the client application.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Auth,
    Home,
    Admin,
    Features,
    Report,
    Dashboard,
    Gamification,
    Contact,
}

/// The pages a session may visit, and where it lands by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub pages: &'static [Page],
    pub landing: Page,
}

const ADMIN_PAGES: &[Page] = &[
    Page::Admin,
    Page::Features,
    Page::Dashboard,
    Page::Gamification,
    Page::Contact,
];

const USER_PAGES: &[Page] = &[
    Page::Home,
    Page::Features,
    Page::Report,
    Page::Dashboard,
    Page::Gamification,
    Page::Contact,
];

const ANONYMOUS_PAGES: &[Page] = &[Page::Auth];

impl Navigation {
    /// Navigation for a session with the given role, or none if anonymous.
    pub fn for_role(role: Option<Role>) -> Self {
        match role {
            Some(Role::Admin) => Self {
                pages: ADMIN_PAGES,
                landing: Page::Admin,
            },
            Some(Role::User) => Self {
                pages: USER_PAGES,
                landing: Page::Home,
            },
            None => Self {
                pages: ANONYMOUS_PAGES,
                landing: Page::Auth,
            },
        }
    }

    pub fn allows(&self, page: Page) -> bool {
        self.pages.contains(&page)
    }
}
