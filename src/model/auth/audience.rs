use crate::model::common::Role;

/// A class of users that a route can be restricted to.
pub trait Audience {
    /// Does this audience include users with the given role?
    fn admits(role: Role) -> bool;
}

/// Citizens reporting issues.
pub struct Citizen;

/// Administrators triaging reports.
pub struct Admin;

/// Anyone with a session, whatever their role.
pub struct Anyone;

impl Audience for Citizen {
    fn admits(role: Role) -> bool {
        role == Role::User
    }
}

impl Audience for Admin {
    fn admits(role: Role) -> bool {
        role == Role::Admin
    }
}

impl Audience for Anyone {
    fn admits(_role: Role) -> bool {
        true
    }
}
