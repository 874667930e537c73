//! Async ownership of a session.
//!
//! [`SessionRuntime`] owns the [`SessionStore`] for the life of a session and
//! turns the store's pending centering timer into a real Tokio task. After
//! every action the armed task is compared with the store's pending timer:
//! a different token aborts the old task and arms a new one, and no pending
//! timer aborts whatever is armed. The store ignores stale tokens as well, so
//! an abort that loses the race cannot force a transition.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::task::JoinHandle;

use lr_cards::{AssetSource, CardRepository};

use crate::centering::{ScheduledAdvance, TimerToken};
use crate::error::{SessionError, SessionResult};
use crate::store::{SessionSnapshot, SessionStore};

struct ArmedTimer {
    token: TimerToken,
    handle: JoinHandle<()>,
}

struct Shared {
    store: SessionStore,
    armed: Option<ArmedTimer>,
}

/// Owns a session store and drives its timed auto-advances.
///
/// Timers are spawned on the current Tokio runtime, so actions that arm a
/// timer should run inside one.
pub struct SessionRuntime {
    shared: Arc<Mutex<Shared>>,
}

impl SessionRuntime {
    /// Take ownership of `store`.
    pub fn new(store: SessionStore) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared { store, armed: None })),
        }
    }

    /// Load and install the catalog. Does nothing if one is installed.
    ///
    /// The store is not locked while the source is read.
    pub async fn load_catalog<S: AssetSource>(&self, source: &S) -> SessionResult<bool> {
        if self.read(SessionStore::is_loaded) {
            return Ok(false);
        }
        let catalog = CardRepository::load(source).await.map_err(|e| {
            tracing::error!(error = %e, "failed to load card catalog");
            SessionError::from(e)
        })?;
        Ok(self.act(|store| store.install_catalog(catalog)))
    }

    /// Run an action against the store, then re-arm the centering timer.
    pub fn act<T>(&self, action: impl FnOnce(&mut SessionStore) -> T) -> T {
        let mut guard = lock(&self.shared);
        let out = action(&mut guard.store);
        rearm(&self.shared, &mut guard);
        out
    }

    /// Read from the store.
    pub fn read<T>(&self, query: impl FnOnce(&SessionStore) -> T) -> T {
        query(&lock(&self.shared).store)
    }

    /// A serializable view of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.read(SessionStore::snapshot)
    }

    /// Token of the timer task currently armed, if any.
    pub fn armed_timer(&self) -> Option<TimerToken> {
        lock(&self.shared).armed.as_ref().map(|a| a.token)
    }

    /// Abort any armed timer. The store itself is left as it is.
    pub fn shutdown(&self) {
        if let Some(armed) = lock(&self.shared).armed.take() {
            armed.handle.abort();
            tracing::debug!("session runtime shut down with a timer armed");
        }
    }
}

impl Drop for SessionRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn rearm(shared: &Arc<Mutex<Shared>>, inner: &mut Shared) {
    let pending = inner.store.pending_timer();
    if pending.map(|t| t.token) == inner.armed.as_ref().map(|a| a.token) {
        return;
    }
    if let Some(old) = inner.armed.take() {
        old.handle.abort();
    }
    let Some(timer) = pending else {
        return;
    };
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        tracing::warn!("no tokio runtime, centering timer not armed");
        return;
    };
    let task = handle.spawn(run_timer(Arc::downgrade(shared), timer));
    inner.armed = Some(ArmedTimer {
        token: timer.token,
        handle: task,
    });
}

async fn run_timer(shared: Weak<Mutex<Shared>>, timer: ScheduledAdvance) {
    tokio::time::sleep(timer.delay).await;
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let mut guard = lock(&shared);
    if guard.armed.as_ref().is_some_and(|a| a.token == timer.token) {
        guard.armed = None;
    }
    guard.store.fire_timer(timer.token);
    rearm(&shared, &mut guard);
}
