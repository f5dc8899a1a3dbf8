use api_types::Category;
use api_types::expense::{ExpenseNew, ExpenseUpdate, ExpenseView};
use api_types::user::UserView;
use chrono::{DateTime, Utc};

use crate::client::Client;
use crate::error::{ClientError, Result};

/// Partial predicate over the expense collection.
///
/// Unset fields match everything; the default value is the identity filter.
/// Date bounds are inclusive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseFilters {
    pub category: Option<Category>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    /// Case-insensitive substring match on the description.
    pub search: Option<String>,
}

impl ExpenseFilters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn matches(&self, expense: &ExpenseView) -> bool {
        if let Some(category) = self.category
            && expense.category != category
        {
            return false;
        }
        if let Some(from) = self.from
            && expense.date < from
        {
            return false;
        }
        if let Some(to) = self.to
            && expense.date > to
        {
            return false;
        }
        if let Some(search) = &self.search
            && !expense
                .description
                .to_lowercase()
                .contains(&search.to_lowercase())
        {
            return false;
        }
        true
    }
}

/// Authoritative in-memory collection of the current user's expenses.
///
/// All mutation goes through the backend first; local state changes only
/// after a successful response, so a failed call leaves the collection
/// exactly as it was. Mutators take `&mut self`, which means one owner can
/// only run them sequentially; callers that clone data out and fire
/// concurrent updates at the same expense get whatever order the network
/// delivers (an accepted race, same as the original application).
#[derive(Debug)]
pub struct ExpenseStore {
    client: Client,
    username: Option<String>,
    expenses: Vec<ExpenseView>,
    filters: ExpenseFilters,
}

impl ExpenseStore {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            username: None,
            expenses: Vec::new(),
            filters: ExpenseFilters::default(),
        }
    }

    /// Reacts to an identity change: a present user triggers a reload under
    /// that identity, an absent one clears the collection so nothing leaks
    /// into the next session.
    pub async fn bind(&mut self, user: Option<&UserView>) -> Result<()> {
        match user {
            Some(user) => {
                self.username = Some(user.email.clone());
                self.load().await
            }
            None => {
                self.username = None;
                self.expenses.clear();
                Ok(())
            }
        }
    }

    /// Replaces the collection wholesale from the backend.
    ///
    /// No-op without an identity. On failure the previous collection is kept
    /// (stale but consistent) — intentional, do not "fix" by clearing.
    pub async fn load(&mut self) -> Result<()> {
        let Some(username) = self.username.clone() else {
            return Ok(());
        };
        match self.client.expenses(&username).await {
            Ok(expenses) => {
                self.expenses = expenses;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("failed to load expenses: {err}");
                Err(err)
            }
        }
    }

    /// Creates an expense and prepends the server's canonical record, so the
    /// collection stays most-recent-first.
    pub async fn add(
        &mut self,
        description: &str,
        amount: f64,
        category: Category,
    ) -> Result<&ExpenseView> {
        let username = self.require_user()?;
        let payload = ExpenseNew {
            username,
            description: description.to_string(),
            amount,
            category,
        };
        let created = self.client.expense_create(&payload).await?;
        self.expenses.insert(0, created);
        Ok(&self.expenses[0])
    }

    /// Full replace of description/amount/category; the stored date is not
    /// client-editable.
    pub async fn update(&mut self, expense: ExpenseView) -> Result<()> {
        let username = self.require_user()?;
        let payload = ExpenseUpdate {
            username,
            description: expense.description.clone(),
            amount: expense.amount,
            category: expense.category,
        };
        self.client.expense_update(expense.id, &payload).await?;
        if let Some(slot) = self.expenses.iter_mut().find(|e| e.id == expense.id) {
            *slot = expense;
        }
        Ok(())
    }

    /// Deletes on the backend first; the record stays in memory if that
    /// call fails.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        let username = self.require_user()?;
        self.client.expense_delete(id, &username).await?;
        self.expenses.retain(|e| e.id != id);
        Ok(())
    }

    pub fn set_filters(&mut self, filters: ExpenseFilters) {
        self.filters = filters;
    }

    pub fn clear_filters(&mut self) {
        self.filters = ExpenseFilters::default();
    }

    pub fn filters(&self) -> &ExpenseFilters {
        &self.filters
    }

    /// The base collection, most recent first.
    pub fn expenses(&self) -> &[ExpenseView] {
        &self.expenses
    }

    /// Derived view: the base collection narrowed by the current filters.
    /// Recomputed on every call; order of the base collection is preserved.
    pub fn filtered(&self) -> Vec<ExpenseView> {
        self.expenses
            .iter()
            .filter(|e| self.filters.matches(e))
            .cloned()
            .collect()
    }

    fn require_user(&self) -> Result<String> {
        self.username
            .clone()
            .ok_or_else(|| ClientError::validation("no authenticated user"))
    }
}
