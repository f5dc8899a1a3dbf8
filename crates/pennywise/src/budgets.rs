use api_types::Category;
use api_types::budget::{BudgetNew, BudgetUpdate, BudgetView};
use api_types::user::UserView;

use crate::client::Client;
use crate::error::{ClientError, Result};

/// In-memory collection of the current user's per-category monthly budgets.
///
/// Invariant: at most one budget per (category, month). [`BudgetStore::add`]
/// enforces it by collapsing into an update when a match already exists;
/// this mirrors the backend's unique constraint and is intentional product
/// behavior, not a workaround.
#[derive(Debug)]
pub struct BudgetStore {
    client: Client,
    username: Option<String>,
    budgets: Vec<BudgetView>,
}

impl BudgetStore {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            username: None,
            budgets: Vec::new(),
        }
    }

    /// Same identity-binding discipline as the expense store: present user
    /// reloads, absent user clears.
    pub async fn bind(&mut self, user: Option<&UserView>) -> Result<()> {
        match user {
            Some(user) => {
                self.username = Some(user.email.clone());
                self.load().await
            }
            None => {
                self.username = None;
                self.budgets.clear();
                Ok(())
            }
        }
    }

    /// Wholesale reload; keeps the previous collection on failure.
    pub async fn load(&mut self) -> Result<()> {
        let Some(username) = self.username.clone() else {
            return Ok(());
        };
        match self.client.budgets(&username, None).await {
            Ok(budgets) => {
                self.budgets = budgets;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("failed to load budgets: {err}");
                Err(err)
            }
        }
    }

    /// Sets a budget. If one already exists for (category, month) this
    /// becomes an update with the new amount — the second amount wins and
    /// the collection never grows a duplicate key.
    pub async fn add(&mut self, category: Category, amount: f64, month: &str) -> Result<()> {
        let username = self.require_user()?;

        if let Some(existing) = self.budget_for(category, month) {
            let mut updated = existing.clone();
            updated.amount = amount;
            return self.update(updated).await;
        }

        let payload = BudgetNew {
            username,
            category,
            amount,
            month: month.to_string(),
        };
        let created = self.client.budget_create(&payload).await?;
        self.budgets.push(created);
        Ok(())
    }

    pub async fn update(&mut self, budget: BudgetView) -> Result<()> {
        let username = self.require_user()?;
        let payload = BudgetUpdate {
            username,
            category: budget.category,
            amount: budget.amount,
            month: budget.month.clone(),
        };
        self.client.budget_update(budget.id, &payload).await?;
        if let Some(slot) = self.budgets.iter_mut().find(|b| b.id == budget.id) {
            *slot = budget;
        }
        Ok(())
    }

    /// Backend first; the budget stays in memory if the call fails.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        let username = self.require_user()?;
        self.client.budget_delete(id, &username).await?;
        self.budgets.retain(|b| b.id != id);
        Ok(())
    }

    /// Pure lookup, no I/O.
    pub fn budget_for(&self, category: Category, month: &str) -> Option<&BudgetView> {
        self.budgets
            .iter()
            .find(|b| b.category == category && b.month == month)
    }

    pub fn budgets(&self) -> &[BudgetView] {
        &self.budgets
    }

    fn require_user(&self) -> Result<String> {
        self.username
            .clone()
            .ok_or_else(|| ClientError::validation("no authenticated user"))
    }
}
