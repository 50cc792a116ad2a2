use async_trait::async_trait;

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Join URL for the live room identified by `session_code`.
    async fn issue_join_url(&self, session_code: &str) -> anyhow::Result<String>;
}

/// Rooms hosted by an external provider under a fixed base URL.
#[derive(Debug, Clone)]
pub struct HostedSessionProvider {
    base_url: String,
}

impl HostedSessionProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }
}

#[async_trait]
impl SessionProvider for HostedSessionProvider {
    async fn issue_join_url(&self, session_code: &str) -> anyhow::Result<String> {
        Ok(format!("{}/{}", self.base_url, session_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn join_url_appends_the_session_code() {
        let provider = HostedSessionProvider::new("https://session.inr99.academy/");
        let url = provider.issue_join_url("SSABC123").await.unwrap();
        assert_eq!(url, "https://session.inr99.academy/SSABC123");
    }
}
