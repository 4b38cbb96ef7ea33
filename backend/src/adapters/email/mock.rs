//! Mock email dispatcher for testing.
//!
//! Records every email it is asked to send, along with the attachment bytes
//! as they were on disk at send time. Can be configured to fail.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{DispatchError, EmailDispatcher, ResultEmail};

/// An email recorded by the mock.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub email: ResultEmail,
    pub attachment: Vec<u8>,
}

#[derive(Debug, Default)]
struct MockState {
    sent: Vec<SentEmail>,
    error: Option<DispatchError>,
}

/// In-memory email dispatcher.
#[derive(Debug, Clone, Default)]
pub struct MockEmailDispatcher {
    state: Arc<Mutex<MockState>>,
}

impl MockEmailDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher whose every send fails with `error`.
    pub fn failing(error: DispatchError) -> Self {
        let mock = Self::new();
        mock.set_error(error);
        mock
    }

    /// Make subsequent sends fail with `error`.
    pub fn set_error(&self, error: DispatchError) {
        self.state.lock().unwrap().error = Some(error);
    }

    pub fn clear_error(&self) {
        self.state.lock().unwrap().error = None;
    }

    /// Emails accepted so far.
    pub fn sent(&self) -> Vec<SentEmail> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn sent_count(&self) -> usize {
        self.state.lock().unwrap().sent.len()
    }
}

#[async_trait]
impl EmailDispatcher for MockEmailDispatcher {
    async fn send(&self, email: ResultEmail) -> Result<(), DispatchError> {
        let error = self.state.lock().unwrap().error.clone();
        if let Some(error) = error {
            return Err(error);
        }

        let attachment = email.attachment.read().await?;
        self.state
            .lock()
            .unwrap()
            .sent
            .push(SentEmail { email, attachment });
        Ok(())
    }

    fn transport(&self) -> &'static str {
        "mock"
    }
}
