//! View gating.
//!
//! Every console view declares a [`ViewRequirement`]; the router asks
//! [`evaluate`] what to do with it given the current [`SessionSnapshot`].
//! The admin flag consulted here is the one frozen at login.

use strum::{EnumIter, IntoEnumIterator};

use crate::auth::{AuthPhase, SessionSnapshot};

/// Who may see a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewRequirement {
    /// Sign-in surface. Anyone may see it, but a logged-in user is sent home.
    Public,
    /// Any logged-in user.
    Authenticated,
    /// Logged-in administrators only.
    Admin,
}

/// Outcome of gating a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Show the view.
    Render,
    /// Session not hydrated yet; show a placeholder.
    Loading,
    /// Nobody is logged in.
    RedirectToLogin,
    /// Logged in, but this view is not for this user.
    RedirectToHome,
}

/// Decide how to handle a view with `requirement` for `snapshot`.
#[must_use]
pub fn evaluate(requirement: ViewRequirement, snapshot: &SessionSnapshot) -> GateDecision {
    match (snapshot.phase, requirement) {
        (AuthPhase::Hydrating, _) => GateDecision::Loading,
        (AuthPhase::Anonymous, ViewRequirement::Public)
        | (AuthPhase::Authenticated, ViewRequirement::Authenticated) => GateDecision::Render,
        (AuthPhase::Anonymous, _) => GateDecision::RedirectToLogin,
        (AuthPhase::Authenticated, ViewRequirement::Public) => GateDecision::RedirectToHome,
        (AuthPhase::Authenticated, ViewRequirement::Admin) => {
            if snapshot.is_admin() {
                GateDecision::Render
            } else {
                GateDecision::RedirectToHome
            }
        }
    }
}

/// Navigation entries of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Section {
    /// Landing page.
    Dashboard,
    /// Activity catalogue.
    Activities,
    /// The user's own enrollments.
    MyActivities,
    /// Activity creation, administrators only.
    NewActivity,
    /// User management, administrators only.
    Users,
}

impl Section {
    /// Requirement of the view behind this entry.
    #[must_use]
    pub fn requirement(self) -> ViewRequirement {
        match self {
            Self::Dashboard | Self::Activities | Self::MyActivities => {
                ViewRequirement::Authenticated
            }
            Self::NewActivity | Self::Users => ViewRequirement::Admin,
        }
    }

    /// Navigation label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Activities => "Activities",
            Self::MyActivities => "My activities",
            Self::NewActivity => "New activity",
            Self::Users => "Users",
        }
    }

    /// Path of the view behind this entry.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Activities => "/activities",
            Self::MyActivities => "/my-activities",
            Self::NewActivity => "/activities/new",
            Self::Users => "/users",
        }
    }

    /// Entries the navigation shows for `snapshot`, in display order.
    #[must_use]
    pub fn visible_for(snapshot: &SessionSnapshot) -> Vec<Self> {
        Self::iter()
            .filter(|section| evaluate(section.requirement(), snapshot) == GateDecision::Render)
            .collect()
    }
}
