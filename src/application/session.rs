// Session signal - sign-in transitions reported by the auth provider
use crate::application::pipeline::PipelineDriver;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    SignedOut,
    /// `epoch` grows with every sign-in, so a sign-out/sign-in pair that the
    /// watch channel coalesces still reads as a new session.
    SignedIn { email: String, epoch: u64 },
}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionState::SignedIn { .. })
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            SessionState::SignedIn { email, .. } => Some(email),
            SessionState::SignedOut => None,
        }
    }
}

#[derive(Clone)]
pub struct SessionSignal {
    tx: watch::Sender<SessionState>,
    sign_ins: Arc<AtomicU64>,
}

impl Default for SessionSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::SignedOut);
        Self {
            tx,
            sign_ins: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Repeating the sign-in of the active user is not a new session.
    pub fn sign_in(&self, email: String) {
        self.tx.send_if_modified(|state| {
            if state.email() == Some(email.as_str()) {
                return false;
            }
            let epoch = self.sign_ins.fetch_add(1, Ordering::Relaxed) + 1;
            *state = SessionState::SignedIn { email, epoch };
            true
        });
    }

    pub fn sign_out(&self) {
        self.tx.send_if_modified(|state| {
            let was_signed_in = state.is_signed_in();
            *state = SessionState::SignedOut;
            was_signed_in
        });
    }

    pub fn current(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }
}

/// Run a chart pass each time the session becomes signed in.
pub fn spawn_chart_refresh(driver: PipelineDriver, signal: &SessionSignal) -> JoinHandle<()> {
    let mut states = WatchStream::new(signal.subscribe());

    tokio::spawn(async move {
        let mut previous = SessionState::SignedOut;

        while let Some(state) = states.next().await {
            if state.is_signed_in() && state != previous {
                tracing::info!("Session signed in as {:?}, refreshing charts", state.email());
                driver.run().await;
            } else if !state.is_signed_in() && previous.is_signed_in() {
                tracing::info!("Session signed out");
            }
            previous = state;
        }
    })
}
