//! Submission controller: the boundary where prompts become state.
//!
//! Each submission is one sequenced operation: parse via the AI adapter,
//! validate the transition, commit every record to the store, then swap the
//! new state in. Any failure aborts the remaining steps of that submission
//! and leaves local state untouched; the commit batch is all-or-nothing.
//!
//! A second submission of the same kind while one is pending is rejected
//! (one-at-a-time per prompt kind, not globally). There is no cancellation
//! and no retry.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, warn};

use stockpilot_ai::{CompletionClient, parse_inventory_prompt, parse_sale_prompt};
use stockpilot_core::{DomainError, DomainResult};
use stockpilot_sheets::SheetStore;

use crate::report::{self, InventoryRow, Report, SalesLogEntry};
use crate::state::{Action, AppState};

/// Transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

impl From<&DomainError> for Notification {
    fn from(err: &DomainError) -> Self {
        Self::error(err.to_string())
    }
}

/// Owns the application state and sequences submissions against it.
pub struct Controller<C, S> {
    state: RwLock<AppState>,
    inventory_pending: AtomicBool,
    sale_pending: AtomicBool,
    client: C,
    store: S,
}

impl<C, S> Controller<C, S>
where
    C: CompletionClient,
    S: SheetStore,
{
    pub fn new(client: C, store: S) -> Self {
        Self::with_state(client, store, AppState::new())
    }

    pub fn with_state(client: C, store: S, state: AppState) -> Self {
        Self {
            state: RwLock::new(state),
            inventory_pending: AtomicBool::new(false),
            sale_pending: AtomicBool::new(false),
            client,
            store,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.state.read().unwrap().clone()
    }

    /// Current financial report, recomputed in full.
    pub fn report(&self) -> Report {
        let state = self.state.read().unwrap();
        report::financial_report(&state.products, &state.sales)
    }

    /// Current inventory table view.
    pub fn inventory_rows(&self) -> Vec<InventoryRow> {
        let state = self.state.read().unwrap();
        report::inventory_rows(&state.products)
    }

    /// Recent-sales view, most recent first.
    pub fn sales_log(&self) -> Vec<SalesLogEntry> {
        let state = self.state.read().unwrap();
        report::sales_log(&state.products, &state.sales)
    }

    /// Turn a free-form inventory update into applied state.
    ///
    /// Errors are returned, not thrown away: callers render either arm as a
    /// transient notification.
    pub async fn submit_inventory_prompt(&self, prompt: &str) -> DomainResult<Notification> {
        let _pending = PendingGuard::acquire(&self.inventory_pending, "inventory")?;
        let result = self.run_inventory(prompt).await;
        if let Err(err) = &result {
            error!(%err, "inventory submission failed");
        }
        result
    }

    /// Turn a free-form sales update into applied state.
    pub async fn submit_sale_prompt(&self, prompt: &str) -> DomainResult<Notification> {
        let _pending = PendingGuard::acquire(&self.sale_pending, "sale")?;
        let result = self.run_sale(prompt).await;
        if let Err(err) = &result {
            error!(%err, "sale submission failed");
        }
        result
    }

    async fn run_inventory(&self, prompt: &str) -> DomainResult<Notification> {
        let deltas = parse_inventory_prompt(&self.client, prompt)
            .await
            .map_err(|e| {
                warn!(%e, "inventory prompt did not parse");
                DomainError::parse_failure(e.to_string())
            })?;

        let action = Action::MergeInventory(deltas.clone());
        // Validate the transition before the first commit goes out.
        self.state.read().unwrap().apply(&action)?;

        // All-or-nothing batch: every delta is committed before local state
        // moves; a failure here leaves local state exactly as it was.
        for delta in &deltas {
            self.store
                .add_inventory_item(delta)
                .await
                .map_err(|e| DomainError::commit_failure(e.to_string()))?;
        }

        let mut state = self.state.write().unwrap();
        *state = state.apply(&action)?;
        info!(deltas = deltas.len(), products = state.products.len(), "inventory reconciled");
        Ok(Notification::success("Inventory updated successfully!"))
    }

    async fn run_sale(&self, prompt: &str) -> DomainResult<Notification> {
        let names = self.state.read().unwrap().product_names();
        let intents = parse_sale_prompt(&self.client, prompt, &names)
            .await
            .map_err(|e| {
                warn!(%e, "sale prompt did not parse");
                DomainError::parse_failure(e.to_string())
            })?;

        let action = Action::RecordSales {
            intents: intents.clone(),
            at: Utc::now(),
        };
        // Resolve names and check stock before committing anything.
        self.state.read().unwrap().apply(&action)?;

        for intent in &intents {
            self.store
                .record_sale(intent)
                .await
                .map_err(|e| DomainError::commit_failure(e.to_string()))?;
        }

        let mut state = self.state.write().unwrap();
        *state = state.apply(&action)?;
        info!(items = intents.len(), "sale recorded");
        Ok(Notification::success("Sale recorded successfully!"))
    }
}

/// One-at-a-time gate per prompt kind, released on drop.
struct PendingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> PendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool, kind: &str) -> DomainResult<Self> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(DomainError::validation(format!(
                "a {kind} submission is already in progress"
            )));
        }
        Ok(Self { flag })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
