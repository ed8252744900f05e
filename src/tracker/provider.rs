use crate::tracker::fix::{LocationError, LocationEvent};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::timeout;

pub type EventCallback = Box<dyn FnMut(LocationEvent) + Send + 'static>;

/// Options requested from the location source when watching starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchOptions {
    pub enable_high_accuracy: bool,
    /// Longest wait for the next fix before a timeout is reported.
    pub timeout: Duration,
    /// Oldest cached fix the source may hand out. Zero disables caching.
    pub maximum_age: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(5),
            maximum_age: Duration::ZERO,
        }
    }
}

/// Active subscription. Cancelled explicitly or when dropped.
pub struct WatchHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl WatchHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn from_task(task: JoinHandle<()>) -> Self {
        Self::new(move || task.abort())
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// A source of position fixes. Events for one subscription must be delivered
/// one at a time, in order.
pub trait LocationProvider: Send + Sync {
    fn is_supported(&self) -> bool {
        true
    }

    fn start_watching(&self, options: WatchOptions, on_event: EventCallback) -> WatchHandle;

    /// Delivers every event the provider has already accepted before
    /// returning. Must not be called while the subscriber's state is locked.
    fn flush(&self) {}

    fn stop_watching(&self, handle: WatchHandle) {
        handle.cancel();
    }
}

/// Fixes reported by the user's device and pushed in by the host.
#[derive(Default)]
pub struct LiveProvider {
    feed: Mutex<Option<Arc<Subscription>>>,
}

struct Subscription {
    pending: Mutex<Pending>,
    wake: Notify,
    closed: AtomicBool,
}

struct Pending {
    queue: VecDeque<LocationEvent>,
    on_event: EventCallback,
}

impl Subscription {
    fn pending(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn drain(&self) {
        let mut pending = self.pending();
        let Pending { queue, on_event } = &mut *pending;
        while let Some(event) = queue.pop_front() {
            on_event(event);
        }
    }

    fn deliver(&self, event: LocationEvent) {
        (self.pending().on_event)(event);
    }
}

impl LiveProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an event for the active subscription. Returns false when
    /// nobody is watching.
    pub fn push(&self, event: LocationEvent) -> bool {
        let Some(subscription) = self.subscription() else {
            return false;
        };
        subscription.pending().queue.push_back(event);
        subscription.wake.notify_one();
        true
    }

    pub fn is_watching(&self) -> bool {
        self.subscription().is_some()
    }

    fn subscription(&self) -> Option<Arc<Subscription>> {
        let feed = self.feed.lock().unwrap_or_else(PoisonError::into_inner);
        feed.as_ref()
            .filter(|subscription| !subscription.closed.load(Ordering::SeqCst))
            .cloned()
    }
}

impl std::fmt::Debug for LiveProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveProvider")
            .field("watching", &self.is_watching())
            .finish()
    }
}

impl LocationProvider for LiveProvider {
    fn start_watching(&self, options: WatchOptions, on_event: EventCallback) -> WatchHandle {
        let subscription = Arc::new(Subscription {
            pending: Mutex::new(Pending {
                queue: VecDeque::new(),
                on_event,
            }),
            wake: Notify::new(),
            closed: AtomicBool::new(false),
        });
        *self.feed.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&subscription));

        let pump = Arc::clone(&subscription);
        let task = tokio::spawn(async move {
            loop {
                match timeout(options.timeout, pump.wake.notified()).await {
                    Ok(()) => pump.drain(),
                    Err(_) => pump.deliver(LocationEvent::Error(LocationError::Timeout)),
                }
            }
        });
        WatchHandle::new(move || {
            subscription.closed.store(true, Ordering::SeqCst);
            task.abort();
        })
    }

    fn flush(&self) {
        if let Some(subscription) = self.subscription() {
            subscription.drain();
        }
    }

    fn stop_watching(&self, handle: WatchHandle) {
        self.feed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        handle.cancel();
    }
}
