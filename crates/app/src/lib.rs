//! `stockpilot-app`
//!
//! **Responsibility:** application state and orchestration.
//!
//! Owns the in-memory product/sale lists behind reducer-style transitions
//! (old state + action -> new state), runs the reconciliation rules, derives
//! financial reports, and sequences each prompt submission through the AI
//! parsing adapter and the persistence capability.

pub mod controller;
pub mod report;
pub mod state;

pub use controller::{Controller, Notification, NotificationKind};
pub use report::{InventoryRow, Report, SalesLogEntry, financial_report, inventory_rows, sales_log};
pub use state::{Action, AppState};
