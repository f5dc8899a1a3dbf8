use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Spending category of an expense or budget.
///
/// This is a closed set: the backend stores the lowercase string form and
/// rejects anything else, so new categories require a coordinated change on
/// both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transportation,
    Housing,
    Utilities,
    Entertainment,
    Healthcare,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::Food,
        Self::Transportation,
        Self::Housing,
        Self::Utilities,
        Self::Entertainment,
        Self::Healthcare,
        Self::Shopping,
        Self::Other,
    ];

    /// Returns the canonical wire/database string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transportation => "transportation",
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Entertainment => "entertainment",
            Self::Healthcare => "healthcare",
            Self::Shopping => "shopping",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub mod user {
    use super::*;

    /// Request body for `POST /users/signup`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SignupRequest {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    /// Request body for `POST /users/login`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    /// The authenticated identity as returned by login/signup and persisted
    /// locally between runs.
    ///
    /// `role` is `"USER"` by default on the backend; admins carry `"ADMIN"`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i64,
        pub email: String,
        pub name: String,
        pub role: Option<String>,
    }
}

pub mod expense {
    use super::*;

    /// A stored expense. `id` and `date` are assigned by the server.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: i64,
        pub description: String,
        pub amount: f64,
        pub category: Category,
        /// RFC 3339 timestamp assigned at creation.
        pub date: DateTime<Utc>,
    }

    /// Request body for `POST /expenses`.
    ///
    /// `username` is the owning user's email; the backend keys expenses by it.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub username: String,
        pub description: String,
        pub amount: f64,
        pub category: Category,
    }

    /// Request body for `PUT /expenses/{id}` (full replace, date excluded).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub username: String,
        pub description: String,
        pub amount: f64,
        pub category: Category,
    }
}

pub mod budget {
    use super::*;

    /// A stored per-category monthly budget.
    ///
    /// The backend enforces at most one row per (category, month, user).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: i64,
        pub category: Category,
        pub amount: f64,
        /// `YYYY-MM`.
        pub month: String,
    }

    /// Request body for `POST /budgets`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub username: String,
        pub category: Category,
        pub amount: f64,
        pub month: String,
    }

    /// Request body for `PUT /budgets/{id}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetUpdate {
        pub username: String,
        pub category: Category,
        pub amount: f64,
        pub month: String,
    }
}

pub mod income {
    use super::*;

    /// Source of an income entry.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum IncomeKind {
        Salary,
        Business,
        Investment,
        Gift,
        Other,
    }

    /// A stored income entry.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeView {
        pub id: i64,
        pub amount: f64,
        pub date: DateTime<Utc>,
        pub is_recurring: bool,
        #[serde(rename = "type")]
        pub kind: IncomeKind,
        /// `"MONTHLY"` when `is_recurring`, absent otherwise.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub recurrence_pattern: Option<String>,
    }

    /// Request body for `POST /incomes`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeNew {
        pub email: String,
        pub amount: f64,
        pub date: DateTime<Utc>,
        pub is_recurring: bool,
        #[serde(rename = "type")]
        pub kind: IncomeKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub recurrence_pattern: Option<String>,
    }
}

pub mod admin {
    use super::*;

    /// Row of the admin user listing (`GET /users/admin/users`).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AdminUserView {
        pub id: i64,
        pub email: String,
        pub username: String,
        pub role: String,
        pub expense_count: u64,
        pub income_count: u64,
    }

    /// Response of `GET /users/admin/stats`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SystemStats {
        pub total_users: u64,
        pub total_expenses: u64,
        pub total_incomes: u64,
        pub active_users: u64,
    }
}
