//! Mock Device Client
//!
//! For tests and demos. Records issued users in memory, serves canned
//! session lists, and can be told to fail authentication or session
//! queries to exercise error paths.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{DeviceError, Result};
use crate::model::{ActiveSession, HotspotUser};
use crate::DeviceClient;

/// In-memory stand-in for a router
#[derive(Default)]
pub struct MockDeviceClient {
    issued: Mutex<Vec<HotspotUser>>,
    sessions: Mutex<Vec<ActiveSession>>,
    fail_auth: AtomicBool,
    fail_sessions: AtomicBool,
    session_queries: AtomicUsize,
}

impl MockDeviceClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a canned active-session list
    pub fn with_sessions(sessions: Vec<ActiveSession>) -> Self {
        let mock = Self::new();
        *mock.sessions.lock().unwrap() = sessions;
        mock
    }

    /// Replace the canned session list
    pub fn set_sessions(&self, sessions: Vec<ActiveSession>) {
        *self.sessions.lock().unwrap() = sessions;
    }

    /// Make every call fail as if credentials were wrong
    pub fn set_fail_auth(&self, fail: bool) {
        self.fail_auth.store(fail, Ordering::SeqCst);
    }

    /// Make session queries fail while user creation still works
    pub fn set_fail_sessions(&self, fail: bool) {
        self.fail_sessions.store(fail, Ordering::SeqCst);
    }

    /// Users issued so far, in order
    pub fn issued(&self) -> Vec<HotspotUser> {
        self.issued.lock().unwrap().clone()
    }

    /// How many times `active_sessions` was called
    pub fn session_query_count(&self) -> usize {
        self.session_queries.load(Ordering::SeqCst)
    }

    fn check_auth(&self) -> Result<()> {
        if self.fail_auth.load(Ordering::SeqCst) {
            return Err(DeviceError::Auth("invalid user name or password".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DeviceClient for MockDeviceClient {
    async fn add_hotspot_user(&self, user: &HotspotUser) -> Result<()> {
        self.check_auth()?;

        let mut issued = self.issued.lock().unwrap();
        if issued.iter().any(|u| u.name == user.name) {
            // Same reply a real router gives for a name collision
            return Err(DeviceError::Command {
                status: 400,
                detail: "failure: already have user with this name".into(),
            });
        }

        issued.push(user.clone());
        Ok(())
    }

    async fn active_sessions(&self) -> Result<Vec<ActiveSession>> {
        self.session_queries.fetch_add(1, Ordering::SeqCst);
        self.check_auth()?;

        if self.fail_sessions.load(Ordering::SeqCst) {
            return Err(DeviceError::Command {
                status: 500,
                detail: "query interrupted".into(),
            });
        }

        Ok(self.sessions.lock().unwrap().clone())
    }

    fn name(&self) -> &str {
        "MockDevice"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> HotspotUser {
        HotspotUser {
            name: name.into(),
            password: name.into(),
            profile: "1hour".into(),
            comment: "test".into(),
        }
    }

    #[tokio::test]
    async fn records_issued_users() {
        let mock = MockDeviceClient::new();
        mock.add_hotspot_user(&user("VCH1")).await.unwrap();

        let issued = mock.issued();
        assert_eq!(issued.len(), 1);
        assert_eq!(issued[0].name, "VCH1");
    }

    #[tokio::test]
    async fn rejects_duplicate_names_like_a_router() {
        let mock = MockDeviceClient::new();
        mock.add_hotspot_user(&user("VCH1")).await.unwrap();

        let err = mock.add_hotspot_user(&user("VCH1")).await.unwrap_err();
        assert!(matches!(err, DeviceError::Command { .. }));
        assert_eq!(mock.issued().len(), 1);
    }

    #[tokio::test]
    async fn auth_failure_blocks_everything() {
        let mock = MockDeviceClient::new();
        mock.set_fail_auth(true);

        assert!(matches!(
            mock.add_hotspot_user(&user("VCH1")).await,
            Err(DeviceError::Auth(_))
        ));
        assert!(matches!(
            mock.active_sessions().await,
            Err(DeviceError::Auth(_))
        ));
        assert!(mock.issued().is_empty());
    }
}
