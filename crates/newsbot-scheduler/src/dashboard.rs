//! Dashboard — the single state holder behind every view.
//! Owns the view selection, compose draft, broadcast store and confirmation flag.

use std::sync::Arc;
use std::time::Duration;

use newsbot_core::config::DashboardConfig;
use newsbot_core::{NewsBotConfig, NewsBotError, Result, ScheduledBroadcast, View};

use crate::compose::ComposeForm;
use crate::delivery::{DeliveryChannel, TelegramStub};
use crate::notify::Confirmation;
use crate::registry::GroupRegistry;
use crate::stats::{Stat, StatsPanel};
use crate::store::BroadcastStore;

/// What a submit did.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A new pending broadcast now sits at the front of the store.
    Scheduled(ScheduledBroadcast),
    /// Blank text or no date-time: nothing changed.
    Declined,
}

/// Dashboard state.
pub struct Dashboard {
    view: View,
    registry: GroupRegistry,
    form: ComposeForm,
    store: BroadcastStore,
    confirmation: Confirmation,
    upcoming_limit: usize,
    delivery: Arc<dyn DeliveryChannel>,
}

impl Dashboard {
    /// Fresh dashboard on the overview, with the seeded store.
    pub fn new(config: &DashboardConfig, delivery: Arc<dyn DeliveryChannel>) -> Self {
        Self {
            view: View::default(),
            registry: GroupRegistry::new(),
            form: ComposeForm::new(),
            store: BroadcastStore::seeded(),
            confirmation: Confirmation::new(Duration::from_secs(config.confirmation_secs)),
            upcoming_limit: config.upcoming_limit,
            delivery,
        }
    }

    /// Dashboard wired to the Telegram placeholder from config.
    pub fn from_config(config: &NewsBotConfig) -> Self {
        Self::new(&config.dashboard, Arc::new(TelegramStub::from_config(config)))
    }

    /// Replace the startup store.
    pub fn with_store(mut self, store: BroadcastStore) -> Self {
        self.store = store;
        self
    }

    // ─── View ─────────────────────────────────────────────────

    pub fn view(&self) -> View {
        self.view
    }

    pub fn select(&mut self, view: View) {
        if self.view != view {
            tracing::debug!("View: {} → {}", self.view, view);
        }
        self.view = view;
    }

    // ─── Compose ──────────────────────────────────────────────

    pub fn form(&self) -> &ComposeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ComposeForm {
        &mut self.form
    }

    /// Schedule the current draft.
    ///
    /// A draft that is not ready is declined silently. An unknown group id is
    /// an error and leaves every piece of state as it was. On success the
    /// draft's text and date-time are cleared, the group stays selected and
    /// the confirmation flag (re)starts.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        let Some(item) = self.form.build(&self.registry)? else {
            tracing::debug!("Submit declined: text or date-time missing");
            return Ok(SubmitOutcome::Declined);
        };

        tracing::info!("📅 Broadcast scheduled: {} → '{}' at {}", item.id, item.group, item.datetime);
        self.store.insert(item.clone());
        self.form.clear();
        self.confirmation.show();
        self.delivery.accept(&item);
        Ok(SubmitOutcome::Scheduled(item))
    }

    /// Reset text and date-time, keep the group.
    pub fn clear_form(&mut self) {
        self.form.clear();
    }

    pub fn confirmation_visible(&self) -> bool {
        self.confirmation.is_visible()
    }

    pub fn confirmation(&self) -> &Confirmation {
        &self.confirmation
    }

    // ─── Schedule ─────────────────────────────────────────────

    pub fn store(&self) -> &BroadcastStore {
        &self.store
    }

    /// Delete a broadcast on the user's behalf. Sent broadcasts are refused;
    /// an unknown id is a no-op returning `None`.
    pub fn delete(&mut self, id: &str) -> Result<Option<ScheduledBroadcast>> {
        match self.store.get(id) {
            None => Ok(None),
            Some(item) if !item.is_pending() => Err(NewsBotError::AlreadySent(id.to_string())),
            Some(_) => {
                let removed = self.store.delete(id);
                tracing::info!("🗑️ Broadcast deleted: {id}");
                Ok(removed)
            }
        }
    }

    /// Pending broadcasts for the overview, capped at the configured limit.
    pub fn upcoming(&self) -> Vec<&ScheduledBroadcast> {
        self.store.list_pending(Some(self.upcoming_limit))
    }

    // ─── Groups & stats ───────────────────────────────────────

    pub fn registry(&self) -> &GroupRegistry {
        &self.registry
    }

    pub fn stats(&self) -> Vec<Stat> {
        StatsPanel::compute(&self.registry, &self.store)
    }

    pub fn delivery(&self) -> &dyn DeliveryChannel {
        self.delivery.as_ref()
    }
}
