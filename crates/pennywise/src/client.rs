use api_types::admin::{AdminUserView, SystemStats};
use api_types::budget::{BudgetNew, BudgetUpdate, BudgetView};
use api_types::expense::{ExpenseNew, ExpenseUpdate, ExpenseView};
use api_types::income::{IncomeNew, IncomeView};
use api_types::user::{LoginRequest, SignupRequest, UserView};
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP gateway to the backend REST surface under `/api`.
///
/// Stateless wrapper: one method per endpoint, no retries, no caching, no
/// request deduplication. Every call is independently retryable by the
/// caller. Failures are logged here and always propagated.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ClientError::validation(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::validation(format!("invalid endpoint {path}: {err}")))
    }

    // --- auth ---

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<UserView> {
        let endpoint = self.endpoint("api/users/signup")?;
        let payload = SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let res = send(self.http.post(endpoint).json(&payload)).await?;
        decode(res, "Failed to create account").await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserView> {
        let endpoint = self.endpoint("api/users/login")?;
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let res = send(self.http.post(endpoint).json(&payload)).await?;
        decode(res, "Invalid credentials").await
    }

    /// Fetches user detail; also serves as session verification.
    pub async fn user_details(&self, email: &str) -> Result<UserView> {
        let endpoint = self.endpoint(&format!("api/users/{email}"))?;
        let res = send(self.http.get(endpoint)).await?;
        decode(res, "Failed to fetch user details").await
    }

    // --- expenses ---

    pub async fn expenses(&self, username: &str) -> Result<Vec<ExpenseView>> {
        let endpoint = self.endpoint("api/expenses")?;
        let res = send(self.http.get(endpoint).query(&[("username", username)])).await?;
        decode(res, "Failed to fetch expenses").await
    }

    pub async fn expense_create(&self, payload: &ExpenseNew) -> Result<ExpenseView> {
        let endpoint = self.endpoint("api/expenses")?;
        let res = send(self.http.post(endpoint).json(payload)).await?;
        decode(res, "Failed to create expense").await
    }

    pub async fn expense_update(&self, id: i64, payload: &ExpenseUpdate) -> Result<ExpenseView> {
        let endpoint = self.endpoint(&format!("api/expenses/{id}"))?;
        let res = send(self.http.put(endpoint).json(payload)).await?;
        decode(res, "Failed to update expense").await
    }

    pub async fn expense_delete(&self, id: i64, username: &str) -> Result<()> {
        let endpoint = self.endpoint(&format!("api/expenses/{id}"))?;
        let res = send(self.http.delete(endpoint).query(&[("username", username)])).await?;
        expect_success(res, "Failed to delete expense").await
    }

    // --- budgets ---

    pub async fn budgets(&self, username: &str, month: Option<&str>) -> Result<Vec<BudgetView>> {
        let endpoint = self.endpoint("api/budgets")?;
        let mut query = vec![("username", username)];
        if let Some(month) = month {
            query.push(("month", month));
        }
        let res = send(self.http.get(endpoint).query(&query)).await?;
        decode(res, "Failed to fetch budgets").await
    }

    pub async fn budget_create(&self, payload: &BudgetNew) -> Result<BudgetView> {
        let endpoint = self.endpoint("api/budgets")?;
        let res = send(self.http.post(endpoint).json(payload)).await?;
        decode(res, "Failed to create budget").await
    }

    pub async fn budget_update(&self, id: i64, payload: &BudgetUpdate) -> Result<BudgetView> {
        let endpoint = self.endpoint(&format!("api/budgets/{id}"))?;
        let res = send(self.http.put(endpoint).json(payload)).await?;
        decode(res, "Failed to update budget").await
    }

    pub async fn budget_delete(&self, id: i64, username: &str) -> Result<()> {
        let endpoint = self.endpoint(&format!("api/budgets/{id}"))?;
        let res = send(self.http.delete(endpoint).query(&[("username", username)])).await?;
        expect_success(res, "Failed to delete budget").await
    }

    // --- incomes ---

    pub async fn incomes(&self, email: &str) -> Result<Vec<IncomeView>> {
        let endpoint = self.endpoint("api/incomes")?;
        let res = send(self.http.get(endpoint).query(&[("email", email)])).await?;
        decode(res, "Failed to fetch incomes").await
    }

    pub async fn income_create(&self, payload: &IncomeNew) -> Result<IncomeView> {
        let endpoint = self.endpoint("api/incomes")?;
        let res = send(self.http.post(endpoint).json(payload)).await?;
        decode(res, "Failed to add income").await
    }

    pub async fn income_delete(&self, id: i64) -> Result<()> {
        let endpoint = self.endpoint(&format!("api/incomes/{id}"))?;
        let res = send(self.http.delete(endpoint)).await?;
        expect_success(res, "Failed to delete income").await
    }

    // --- admin ---
    //
    // The backend authorizes these by the `User-Email` header; it must belong
    // to a user with the ADMIN role.

    pub async fn admin_users(&self, admin_email: &str) -> Result<Vec<AdminUserView>> {
        let endpoint = self.endpoint("api/users/admin/users")?;
        let res = send(self.http.get(endpoint).header("User-Email", admin_email)).await?;
        decode(res, "Failed to fetch users").await
    }

    pub async fn admin_stats(&self, admin_email: &str) -> Result<SystemStats> {
        let endpoint = self.endpoint("api/users/admin/stats")?;
        let res = send(self.http.get(endpoint).header("User-Email", admin_email)).await?;
        decode(res, "Failed to fetch system statistics").await
    }

    pub async fn admin_delete_user(&self, id: i64, admin_email: &str) -> Result<()> {
        let endpoint = self.endpoint(&format!("api/users/admin/delete/{id}"))?;
        let res = send(self.http.delete(endpoint).header("User-Email", admin_email)).await?;
        expect_success(res, "Failed to delete user").await
    }
}

async fn send(req: reqwest::RequestBuilder) -> Result<reqwest::Response> {
    req.send().await.map_err(|err| {
        tracing::warn!("transport failure: {err}");
        ClientError::Network(err)
    })
}

/// Parses a success body as `T`; on a non-2xx status, reads the `error`
/// field of the body (falling back to `fallback`) and fails with it.
async fn decode<T: DeserializeOwned>(res: reqwest::Response, fallback: &str) -> Result<T> {
    if res.status().is_success() {
        return res.json::<T>().await.map_err(ClientError::Network);
    }
    Err(error_from(res, fallback).await)
}

/// Like [`decode`] but discards the success body (delete endpoints return
/// an acknowledgement message the client has no use for).
async fn expect_success(res: reqwest::Response, fallback: &str) -> Result<()> {
    if res.status().is_success() {
        return Ok(());
    }
    Err(error_from(res, fallback).await)
}

async fn error_from(res: reqwest::Response, fallback: &str) -> ClientError {
    let status = res.status();
    let message = res
        .json::<ErrorResponse>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| fallback.to_string());
    tracing::warn!(%status, "request failed: {message}");
    ClientError::request(status, message)
}
