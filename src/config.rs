//! Session configuration.
//!
//! A [`SessionConfig`] is the immutable bundle of identifiers that address one
//! authenticated pi.ai conversation. It is validated once at construction and
//! owned by the client for its whole lifetime; nothing mutates it afterwards.

use std::time::Duration;

use crate::{Error, Result};

/// Default per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Immutable session parameters for one pi.ai conversation.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    host_session: String,
    conversation_id: String,
    cf_bm: Option<String>,
    timeout: Duration,
}

impl SessionConfig {
    /// Create a config from the two required identifiers.
    ///
    /// Both must be non-empty after trimming; the optional Cloudflare cookie
    /// and timeout pick up their defaults (no cookie, 10 seconds).
    pub fn new(
        host_session: impl Into<String>,
        conversation_id: impl Into<String>,
    ) -> Result<Self> {
        let host_session = host_session.into();
        let conversation_id = conversation_id.into();
        if host_session.trim().is_empty() {
            return Err(Error::client("host_session must be a non-empty string"));
        }
        if conversation_id.trim().is_empty() {
            return Err(Error::client("conversation_id must be a non-empty string"));
        }
        Ok(Self {
            host_session,
            conversation_id,
            cf_bm: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Attach the Cloudflare bot-management cookie (`__cf_bm`).
    pub fn with_cf_bm(mut self, cf_bm: impl Into<String>) -> Self {
        let cf_bm = cf_bm.into();
        if !cf_bm.is_empty() {
            self.cf_bm = Some(cf_bm);
        }
        self
    }

    /// Override the per-request timeout. Zero is rejected at build time.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn host_session(&self) -> &str {
        &self.host_session
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn cf_bm(&self) -> Option<&str> {
        self.cf_bm.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The `Cookie` header value carrying the browser session artifacts.
    pub(crate) fn cookie_header(&self) -> String {
        match &self.cf_bm {
            Some(cf_bm) => format!("__Host-session={}; __cf_bm={}", self.host_session, cf_bm),
            None => format!("__Host-session={}", self.host_session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_identifiers() {
        assert!(SessionConfig::new("", "conv").is_err());
        assert!(SessionConfig::new("sess", "  ").is_err());
        assert!(SessionConfig::new("sess", "conv").is_ok());
    }

    #[test]
    fn defaults_apply() {
        let cfg = SessionConfig::new("sess", "conv").unwrap();
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert!(cfg.cf_bm().is_none());
        assert_eq!(cfg.cookie_header(), "__Host-session=sess");
    }

    #[test]
    fn cookie_header_includes_cf_bm_when_set() {
        let cfg = SessionConfig::new("sess", "conv")
            .unwrap()
            .with_cf_bm("bm-token");
        assert_eq!(cfg.cookie_header(), "__Host-session=sess; __cf_bm=bm-token");
    }
}
