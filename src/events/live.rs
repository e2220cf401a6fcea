// events/live.rs
//
// Live collections: full-snapshot subscriptions over a stored collection.
//
// A LiveCollection re-reads its collection whenever the event bus reports a
// committed mutation and publishes the new snapshot on a watch channel.
// Subscribers see the current snapshot first, then every later one.
// Intermediate snapshots may be skipped by a slow subscriber; the latest is
// never lost.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::AppResult;
use crate::events::bus::EventBus;
use crate::events::types::DomainEvent;

type Loader<T> = Box<dyn Fn() -> AppResult<Vec<T>> + Send + Sync>;

pub struct LiveCollection<T> {
    name: &'static str,
    loader: Loader<T>,
    sender: watch::Sender<Arc<Vec<T>>>,
}

impl<T> LiveCollection<T>
where
    T: Send + Sync + 'static,
{
    /// Load the collection once and start publishing it
    pub fn new<F>(name: &'static str, loader: F) -> AppResult<Arc<Self>>
    where
        F: Fn() -> AppResult<Vec<T>> + Send + Sync + 'static,
    {
        let initial = loader()?;
        let (sender, _) = watch::channel(Arc::new(initial));

        Ok(Arc::new(Self {
            name,
            loader: Box::new(loader),
            sender,
        }))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Re-read the collection and publish it.
    /// On failure the previous snapshot stays current.
    pub fn refresh(&self) -> AppResult<()> {
        let items = (self.loader)()?;
        let len = items.len();
        self.sender.send_replace(Arc::new(items));
        log::debug!(
            "Live collection {} refreshed: {} items, {} subscribers",
            self.name,
            len,
            self.sender.receiver_count()
        );
        Ok(())
    }

    /// Refresh every time `E` is emitted on the bus
    ///
    /// The bus only holds a weak reference, so dropping the last `Arc`
    /// stops the refreshes and ends all subscriptions.
    pub fn refresh_on<E>(self: &Arc<Self>, bus: &EventBus)
    where
        E: DomainEvent + 'static,
    {
        let feed = Arc::downgrade(self);
        bus.subscribe::<E, _>(move |event| {
            if let Some(feed) = feed.upgrade() {
                if let Err(e) = feed.refresh() {
                    log::warn!(
                        "Failed to refresh {} after {}: {}",
                        feed.name,
                        event.event_type(),
                        e
                    );
                }
            }
        });
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> Subscription<T> {
        log::debug!("New subscription to {}", self.name);
        Subscription {
            name: self.name,
            receiver: self.sender.subscribe(),
            delivered_current: false,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// A lazy, restartable sequence of full snapshots
///
/// Dropping it unsubscribes.
pub struct Subscription<T> {
    name: &'static str,
    receiver: watch::Receiver<Arc<Vec<T>>>,
    delivered_current: bool,
}

impl<T> Subscription<T> {
    /// The next snapshot
    ///
    /// The first call returns immediately with the current snapshot; later
    /// calls wait for a change. `None` once the collection is gone.
    pub async fn next(&mut self) -> Option<Arc<Vec<T>>> {
        if self.delivered_current {
            self.receiver.changed().await.ok()?;
        }
        self.delivered_current = true;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Start over: the next call to `next` yields the current snapshot again
    pub fn restart(&mut self) {
        self.delivered_current = false;
    }

    /// Peek at the latest snapshot without consuming a change
    pub fn current(&self) -> Arc<Vec<T>> {
        self.receiver.borrow().clone()
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        log::debug!("Subscription to {} released", self.name);
    }
}
