//! Observable value slots for live workout metrics.
//!
//! An [`Observable`] holds the latest value of a metric (or nothing, before the
//! first publish) on top of a `tokio::sync::watch` channel. Readers take the
//! current value with [`Observable::get`]; consumers that react to changes
//! hold a [`watch::Receiver`] from [`Observable::subscribe`].
//!
//! Every publish happens under the channel's lock, so concurrent publishers
//! are last-writer-wins and a receiver always observes the value the slot
//! holds. Publishing never blocks on receivers and works from any thread.

use std::sync::Arc;
use tokio::sync::watch;

/// A shared, thread-safe value holder that notifies receivers on publish.
///
/// Cloning an `Observable` yields another handle to the same slot.
pub struct Observable<T> {
    tx: Arc<watch::Sender<Option<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T> std::fmt::Debug for Observable<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.tx.borrow())
            .finish()
    }
}

impl<T> Default for Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::from_option(None)
    }

    /// Create a slot holding an initial value.
    pub fn with_value(value: T) -> Self {
        Self::from_option(Some(value))
    }

    fn from_option(value: Option<T>) -> Self {
        let (tx, _) = watch::channel(value);
        Self { tx: Arc::new(tx) }
    }

    /// Current value, or `None` if nothing has been published yet.
    pub fn get(&self) -> Option<T> {
        self.tx.borrow().clone()
    }

    /// Current value, falling back to `T::default()` when unset.
    pub fn get_or_default(&self) -> T
    where
        T: Default,
    {
        self.get().unwrap_or_default()
    }

    /// Publish a new value.
    pub fn set(&self, value: T) {
        self.tx.send_replace(Some(value));
    }

    /// Read-modify-write the value under the channel lock, then notify.
    ///
    /// `f` receives the previous value (or `None`) and returns the new one.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(Option<&T>) -> T,
    {
        self.tx.send_modify(|slot| {
            let next = f(slot.as_ref());
            *slot = Some(next);
        });
    }

    /// Receiver for this slot; `changed()` resolves on every publish.
    ///
    /// The receiver starts with the current value marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.tx.subscribe()
    }

    /// Number of live receivers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
