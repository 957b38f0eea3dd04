//! Cookie & crumb acquisition for Yahoo endpoints.

use crate::core::error::EcError;
use reqwest::header::SET_COOKIE;

impl super::EcClient {
    pub(crate) async fn ensure_credentials(&self) -> Result<(), EcError> {
        // Fast path: check if credentials exist with a read lock.
        if self.state.read().await.crumb.is_some() {
            return Ok(());
        }

        // Only one task bootstraps the session; the rest wait here.
        let _guard = self.credential_fetch_lock.lock().await;

        // Another task might have fetched credentials while this one was waiting.
        if self.state.read().await.crumb.is_some() {
            return Ok(());
        }

        self.get_cookie().await?;
        self.get_crumb_internal().await?;

        Ok(())
    }

    pub(crate) async fn clear_crumb(&self) {
        let mut state = self.state.write().await;
        state.crumb = None;
    }

    pub(crate) async fn crumb(&self) -> Option<String> {
        let state = self.state.read().await;
        state.crumb.clone()
    }

    async fn get_cookie(&self) -> Result<(), EcError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(url = %self.cookie_url, "bootstrapping yahoo cookie");

        let resp = self.http.get(self.cookie_url.clone()).send().await?;

        let cookie = resp
            .headers()
            .get(SET_COOKIE)
            .ok_or(EcError::Auth("No cookie received from cookie endpoint".into()))?
            .to_str()
            .map_err(|_| EcError::Auth("Invalid cookie header format".into()))?
            .to_string();

        self.state.write().await.cookie = Some(cookie);
        Ok(())
    }

    async fn get_crumb_internal(&self) -> Result<(), EcError> {
        if self.state.read().await.cookie.is_none() {
            return Err(EcError::Auth("Cookie is missing, cannot get crumb".into()));
        }

        let resp = self.http.get(self.crumb_url.clone()).send().await?;
        if resp.status().as_u16() == 429 {
            return Err(EcError::Status {
                status: 429,
                url: self.crumb_url.to_string(),
            });
        }
        let crumb = resp.text().await?;

        if crumb.is_empty() || crumb.contains('{') || crumb.contains('<') {
            return Err(EcError::Auth(format!("Received invalid crumb: {crumb}")));
        }

        self.state.write().await.crumb = Some(crumb);
        Ok(())
    }
}
