//! Access policy: who may do what to which resource.
//!
//! Evaluated in use cases before any mutation. Anonymous callers are
//! represented by `None` in place of a role.

use crate::user::UserRole;

/// Group of endpoints sharing one access rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Categories, genres and titles.
    Catalog,
    /// Reviews and comments.
    Ledger,
    /// Administrative user management (`/users`, `/users/{username}`).
    UserDirectory,
    /// The caller's own profile (`/users/me`).
    OwnProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    /// Update or delete. `is_author` is true when the caller wrote the object.
    Modify { is_author: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// The action needs an authenticated caller.
    Unauthenticated,
    /// The caller is known but lacks the privilege.
    Forbidden,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

pub fn authorize(role: Option<UserRole>, resource: Resource, action: Action) -> Decision {
    use Action::*;
    use Resource::*;

    let allowed = match (resource, action, role) {
        (Catalog | Ledger, Read, _) => true,
        (_, _, None) => return Decision::Unauthenticated,
        (Catalog | UserDirectory, _, Some(role)) => role.is_admin(),
        (Ledger, Create, Some(_)) => true,
        (Ledger, Modify { is_author }, Some(role)) => is_author || role >= UserRole::Moderator,
        (OwnProfile, _, Some(_)) => true,
    };
    if allowed {
        Decision::Allow
    } else {
        Decision::Forbidden
    }
}

/// Only admins may change the role of an account, including their own.
pub fn may_assign_role(role: UserRole) -> bool {
    role.is_admin()
}
