//! Recording notifier

use async_trait::async_trait;
use feishu_client_core::error::ProtocolError;
use feishu_client_core::{Member, Notifier, Result};
use std::sync::{Arc, Mutex};

/// Notifier that records every member it was asked to notify
///
/// # Examples
///
/// ```rust,no_run
/// use feishu_test_utils::MockNotifier;
///
/// let notifier = MockNotifier::new();
/// notifier.fail_with_code(9499);
/// assert!(notifier.notified().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct MockNotifier {
    notified: Arc<Mutex<Vec<Member>>>,
    failure: Arc<Mutex<Option<i64>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following notification fail with the given API code
    pub fn fail_with_code(&self, code: i64) {
        *self.failure.lock().unwrap() = Some(code);
    }

    /// Members notified so far, in order
    pub fn notified(&self) -> Vec<Member> {
        self.notified.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, member: &Member) -> Result<()> {
        self.notified.lock().unwrap().push(member.clone());
        match *self.failure.lock().unwrap() {
            Some(code) => Err(ProtocolError::api(code, "mock failure").into()),
            None => Ok(()),
        }
    }
}
