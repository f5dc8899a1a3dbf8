//! Client core of the PennyWise personal finance tracker.
//!
//! This crate is the state/data layer behind the UI: it owns the session
//! identity, the expense and budget collections, synchronizes them with the
//! REST backend, and derives the filtered/aggregated views the dashboard
//! renders. Presentation (rendering, routing, the desktop shell) lives
//! elsewhere and only calls into the stores exposed here.

pub mod app;
pub mod budgets;
pub mod client;
pub mod config;
pub mod error;
pub mod expenses;
pub mod income;
pub mod session;
pub mod stats;

pub use app::App;
pub use budgets::BudgetStore;
pub use client::Client;
pub use config::AppConfig;
pub use error::{ClientError, Result};
pub use expenses::{ExpenseFilters, ExpenseStore};
pub use session::SessionStore;
