use crate::api::{Food, FoodUpdate, NewFood};
use crate::dashboard::{
    DashboardState, DeleteReconcile, Outcome, SkipReason, SyncPolicy, UpdateGuard,
};
use crate::errors::Result;
use crate::remote::FoodApi;

/// Keeps a `DashboardState` in sync with the remote collection
///
/// Every handler issues at most one request. Failures are logged and handed back to the
/// caller. The local list only changes as dictated by the `SyncPolicy`.
pub struct Dashboard<A: FoodApi> {
    api: A,
    state: DashboardState,
    policy: SyncPolicy,
    loaded: bool,
}

impl<A: FoodApi> Dashboard<A> {
    pub fn new(api: A, policy: SyncPolicy) -> Self {
        Dashboard {
            api,
            state: DashboardState::new(),
            policy,
            loaded: false,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn items(&self) -> &[Food] {
        &self.state.items
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the whole collection, once per dashboard
    ///
    /// Later calls are skipped even when the first one failed.
    pub fn mount(&mut self) -> Result<Outcome> {
        if self.loaded {
            return Ok(Outcome::Skipped(SkipReason::AlreadyLoaded));
        }
        self.loaded = true;

        match self.api.list_foods() {
            Ok(foods) => {
                tracing::info!(count = foods.len(), "foods loaded");
                self.state.load_succeeded(foods);
                Ok(Outcome::Applied)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load foods");
                Err(err)
            }
        }
    }

    /// Create a food. It is always created as available.
    pub fn add_food(&mut self, food: NewFood) -> Result<Outcome> {
        match self.api.create_food(&food.into_available()) {
            Ok(created) => {
                tracing::info!(id = created.id, name = %created.name, "food added");
                self.state.create_succeeded(created);
                Ok(Outcome::Applied)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to add food");
                Err(err)
            }
        }
    }

    /// Select the item the next update applies to
    pub fn edit_food(&mut self, food: Food) {
        tracing::debug!(id = food.id, "editing food");
        self.state.select_edit_target(food);
    }

    /// Submit the edit form: the payload is merged over the selected item and sent as a full
    /// replacement
    pub fn update_food(&mut self, update: FoodUpdate) -> Result<Outcome> {
        let target = match (&self.state.pending_edit, self.policy.update_guard) {
            (None, _) => return Ok(Outcome::Skipped(SkipReason::NoEditTarget)),
            (Some(pending), UpdateGuard::Legacy) => {
                tracing::debug!(id = pending.id, "update skipped by the legacy guard");
                return Ok(Outcome::Skipped(SkipReason::LegacyGuard));
            }
            (Some(pending), UpdateGuard::Intended) => pending.merged(&update),
        };

        match self.api.update_food(target.id, &target) {
            Ok(updated) => {
                tracing::info!(id = updated.id, "food updated");
                self.state.update_succeeded(updated);
                Ok(Outcome::Applied)
            }
            Err(err) => {
                tracing::warn!(id = target.id, error = %err, "failed to update food");
                Err(err)
            }
        }
    }

    /// Delete a food. Whether a failed request still drops it locally depends on the policy.
    pub fn delete_food(&mut self, id: u32) -> Result<Outcome> {
        let result = self.api.delete_food(id);

        match (result, self.policy.delete_reconcile) {
            (Ok(()), _) => {
                tracing::info!(id, "food deleted");
                self.state.delete_succeeded(id);
                Ok(Outcome::Applied)
            }
            (Err(err), DeleteReconcile::Optimistic) => {
                tracing::warn!(id, error = %err, "failed to delete food, dropping it anyway");
                self.state.delete_succeeded(id);
                Err(err)
            }
            (Err(err), DeleteReconcile::Confirmed) => {
                tracing::warn!(id, error = %err, "failed to delete food");
                Err(err)
            }
        }
    }

    pub fn toggle_create_form(&mut self) {
        self.state.toggle_create_form();
    }

    pub fn toggle_edit_form(&mut self) {
        self.state.toggle_edit_form();
    }
}
