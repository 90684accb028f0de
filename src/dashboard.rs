//! Client-side mirror of the `/foods` collection.
//!
//! `DashboardState` holds everything the dashboard shows and exposes one transition per event.
//! `Dashboard` drives those transitions from the results of `FoodApi` calls.

pub mod controller;
pub mod state;

pub use controller::Dashboard;
pub use state::DashboardState;

use crate::errors::{Error, Result};
use std::str::FromStr;

/// When an update is allowed to reach the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateGuard {
    /// Proceed whenever an edit target has been selected
    #[default]
    Intended,
    /// Skip the update whenever the edit target has an id, which is always the case once an
    /// item was selected. Kept for compatibility with the first dashboard release.
    Legacy,
}

/// When a delete is reflected in the local list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteReconcile {
    /// Only once the server confirmed the deletion
    #[default]
    Confirmed,
    /// Regardless of the outcome of the request
    Optimistic,
}

/// Policies applied by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncPolicy {
    pub update_guard: UpdateGuard,
    pub delete_reconcile: DeleteReconcile,
}

/// Result of a mutation that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted the change and the local list reflects it
    Applied,
    /// Nothing was sent to the server
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No item was selected for edition
    NoEditTarget,
    /// `UpdateGuard::Legacy` rejected the update
    LegacyGuard,
    /// The collection was already loaded once
    AlreadyLoaded,
}

impl FromStr for UpdateGuard {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intended" => Ok(UpdateGuard::Intended),
            "legacy" => Ok(UpdateGuard::Legacy),
            other => Err(Error::Config(format!(
                "unknown update guard '{}', expected 'intended' or 'legacy'",
                other
            ))),
        }
    }
}

impl FromStr for DeleteReconcile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Ok(DeleteReconcile::Confirmed),
            "optimistic" => Ok(DeleteReconcile::Optimistic),
            other => Err(Error::Config(format!(
                "unknown delete policy '{}', expected 'confirmed' or 'optimistic'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_policies() {
        assert_eq!("legacy".parse::<UpdateGuard>().unwrap(), UpdateGuard::Legacy);
        assert_eq!(" Intended ".parse::<UpdateGuard>().unwrap(), UpdateGuard::Intended);
        assert!("sometimes".parse::<UpdateGuard>().is_err());

        assert_eq!(
            "OPTIMISTIC".parse::<DeleteReconcile>().unwrap(),
            DeleteReconcile::Optimistic
        );
        assert!(matches!(
            "never".parse::<DeleteReconcile>(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_default_policy() {
        let policy = SyncPolicy::default();
        assert_eq!(policy.update_guard, UpdateGuard::Intended);
        assert_eq!(policy.delete_reconcile, DeleteReconcile::Confirmed);
    }
}
