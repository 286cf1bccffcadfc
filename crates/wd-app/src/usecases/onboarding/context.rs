use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use wd_core::flow::FlowState;

/// Shared onboarding context containing flow state and the dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: held for a whole dispatch (transition + actions + follow-ups).
/// - `state`: short reads and writes only. `get_state` never waits on a dispatch.
#[derive(Clone)]
pub struct OnboardingContext {
    state: Arc<Mutex<FlowState>>,
    dispatch_lock: Arc<Mutex<()>>,
    /// Set while a backend commit is being driven. A second commit is
    /// rejected instead of queued.
    in_progress: Arc<AtomicBool>,
}

impl OnboardingContext {
    pub fn new(initial_state: FlowState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            dispatch_lock: Arc::new(Mutex::new(())),
            in_progress: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn get_state(&self) -> FlowState {
        self.state.lock().await.clone()
    }

    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Only call while holding `dispatch_lock`.
    pub async fn set_state(&self, state: FlowState) {
        let mut guard = self.state.lock().await;
        *guard = state;
    }

    /// Claim the single commit slot. `None` if another commit holds it.
    pub fn try_begin_commit(&self) -> Option<CommitGuard> {
        self.in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CommitGuard {
                flag: Arc::clone(&self.in_progress),
            })
    }
}

impl Default for OnboardingContext {
    fn default() -> Self {
        Self::new(FlowState::default())
    }
}

/// Releases the commit slot on drop.
pub struct CommitGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for CommitGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
