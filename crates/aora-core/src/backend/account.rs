use reqwest::Method;

use super::types::{Account, CreateAccountRequest, CreateSessionRequest, Session};
use super::{AppwriteClient, BackendResult};

impl AppwriteClient {
    pub async fn create_account(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> BackendResult<Account> {
        let request = CreateAccountRequest {
            user_id,
            email,
            password,
            name,
        };
        self.send(
            "account",
            self.request(Method::POST, "/account").json(&request),
        )
        .await
    }

    /// Starts an email/password session. The credential in the response
    /// headers is retained by the client for subsequent calls.
    pub async fn create_email_password_session(
        &self,
        email: &str,
        password: &str,
    ) -> BackendResult<Session> {
        let request = CreateSessionRequest { email, password };
        self.send(
            "session",
            self.request(Method::POST, "/account/sessions/email")
                .json(&request),
        )
        .await
    }

    /// Account behind the current session; 401 without one.
    pub async fn get_account(&self) -> BackendResult<Account> {
        self.send("account", self.request(Method::GET, "/account"))
            .await
    }

    /// Deletes a session (`"current"` for the active one).
    pub async fn delete_session(&self, session_id: &str) -> BackendResult<()> {
        let path = format!("/account/sessions/{session_id}");
        self.send_empty(self.request(Method::DELETE, &path)).await?;
        if session_id == "current" {
            self.set_fallback_cookies(None);
        }
        Ok(())
    }
}
