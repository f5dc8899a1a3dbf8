use api_types::user::UserView;

use crate::budgets::BudgetStore;
use crate::client::Client;
use crate::config::AppConfig;
use crate::error::Result;
use crate::expenses::ExpenseStore;
use crate::session::SessionStore;

/// Composition root: one gateway, one session store, one store per entity
/// collection, constructed once and passed to consumers by reference.
///
/// This replaces the original application's ambient context singletons; the
/// session lifecycle is wired explicitly here instead of through implicit
/// re-render effects (login/restore loads the dependent stores, logout
/// clears them).
#[derive(Debug)]
pub struct App {
    config: AppConfig,
    client: Client,
    session: SessionStore,
    expenses: ExpenseStore,
    budgets: BudgetStore,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let session = SessionStore::new(client.clone(), &config.session_path);
        let expenses = ExpenseStore::new(client.clone());
        let budgets = BudgetStore::new(client.clone());
        Ok(Self {
            config,
            client,
            session,
            expenses,
            budgets,
        })
    }

    /// Restores a persisted session and, if one exists, loads the dependent
    /// stores under it.
    ///
    /// Startup load failures are logged but not fatal: the app comes up with
    /// the cached identity and empty collections, and a later `load()` can
    /// recover once the backend is reachable again.
    pub async fn start(&mut self) -> Result<()> {
        let user = self.session.restore().cloned();
        if let Some(user) = user
            && let Err(err) = self.bind_stores(Some(&user)).await
        {
            tracing::warn!("initial load failed: {err}");
        }
        Ok(())
    }

    /// Logs in and brings the dependent stores into their loaded state.
    ///
    /// A load failure after a successful login is propagated; the identity
    /// stays installed, so the caller can retry the loads without asking for
    /// credentials again.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let user = self.session.login(email, password).await?.clone();
        self.bind_stores(Some(&user)).await
    }

    pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<()> {
        let user = self.session.signup(name, email, password).await?.clone();
        self.bind_stores(Some(&user)).await
    }

    /// Clears the identity, the durable session record, and every dependent
    /// collection — nothing may leak into the next login.
    pub async fn logout(&mut self) -> Result<()> {
        self.session.logout();
        self.bind_stores(None).await
    }

    async fn bind_stores(&mut self, user: Option<&UserView>) -> Result<()> {
        self.expenses.bind(user).await?;
        self.budgets.bind(user).await?;
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Gateway handle for ad-hoc calls (incomes, admin operations) that have
    /// no long-lived store behind them.
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn expenses(&self) -> &ExpenseStore {
        &self.expenses
    }

    pub fn expenses_mut(&mut self) -> &mut ExpenseStore {
        &mut self.expenses
    }

    pub fn budgets(&self) -> &BudgetStore {
        &self.budgets
    }

    pub fn budgets_mut(&mut self) -> &mut BudgetStore {
        &mut self.budgets
    }
}
