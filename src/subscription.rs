//! Live views over the document store
//!
//! A subscription delivers the current snapshot immediately and a fresh,
//! complete snapshot after every relevant change. Callers own the returned
//! [`SubscriptionHandle`]; dropping it stops delivery.

use futures::future::BoxFuture;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::types::StoreChange;

/// Cancellation handle for a live subscription
#[derive(Debug)]
pub struct SubscriptionHandle {
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    /// Start watching `topic`.
    ///
    /// `changes` must already be subscribed so that no change between the
    /// first snapshot and the listen loop is missed. `load` produces a full
    /// snapshot; `callback` receives it and replaces whatever it held before.
    pub(crate) fn watch<T, L, C>(
        mut changes: broadcast::Receiver<StoreChange>,
        topic: StoreChange,
        load: L,
        callback: C,
    ) -> Self
    where
        T: Send + 'static,
        L: Fn() -> BoxFuture<'static, Result<T>> + Send + Sync + 'static,
        C: Fn(T) + Send + Sync + 'static,
    {
        let task = tokio::spawn(async move {
            deliver(&load, &callback, topic).await;
            loop {
                match changes.recv().await {
                    Ok(change) if change == topic => deliver(&load, &callback, topic).await,
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(?topic, skipped, "subscription lagged, reloading snapshot");
                        deliver(&load, &callback, topic).await;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Self { task }
    }

    /// Stop delivery
    pub fn unsubscribe(self) {}

    /// Whether the subscription is still delivering
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn deliver<T, L, C>(load: &L, callback: &C, topic: StoreChange)
where
    L: Fn() -> BoxFuture<'static, Result<T>>,
    C: Fn(T),
{
    match load().await {
        Ok(snapshot) => callback(snapshot),
        Err(e) => tracing::warn!(?topic, error = %e, "failed to load snapshot for subscription"),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn counting_loader(counter: Arc<AtomicUsize>) -> impl Fn() -> BoxFuture<'static, Result<usize>> {
        move || {
            let counter = counter.clone();
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst) + 1) }.boxed()
        }
    }

    #[tokio::test]
    async fn delivers_initial_snapshot_and_reloads_on_topic_changes() {
        let (change_tx, _) = broadcast::channel(16);
        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
        let loads = Arc::new(AtomicUsize::new(0));

        let handle = SubscriptionHandle::watch(
            change_tx.subscribe(),
            StoreChange::Posts,
            counting_loader(loads.clone()),
            move |snapshot| {
                let _ = seen_tx.send(snapshot);
            },
        );

        assert_eq!(seen_rx.recv().await, Some(1));

        change_tx.send(StoreChange::Ads).unwrap();
        change_tx.send(StoreChange::Posts).unwrap();
        assert_eq!(seen_rx.recv().await, Some(2));
        assert_eq!(loads.load(Ordering::SeqCst), 2, "unrelated change is ignored");

        assert!(handle.is_active());
    }

    #[tokio::test]
    async fn unrelated_changes_deliver_nothing() {
        let (change_tx, _) = broadcast::channel(16);
        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();

        let _handle = SubscriptionHandle::watch(
            change_tx.subscribe(),
            StoreChange::Posts,
            counting_loader(Arc::new(AtomicUsize::new(0))),
            move |snapshot| {
                let _ = seen_tx.send(snapshot);
            },
        );
        assert_eq!(seen_rx.recv().await, Some(1));

        change_tx.send(StoreChange::Ads).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let mut next = tokio_test::task::spawn(seen_rx.recv());
        tokio_test::assert_pending!(next.poll());

        change_tx.send(StoreChange::Posts).unwrap();
        assert_eq!(next.await, Some(2));
    }

    #[tokio::test]
    async fn dropping_the_handle_stops_delivery() {
        let (change_tx, _) = broadcast::channel(16);
        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
        let loads = Arc::new(AtomicUsize::new(0));

        let handle = SubscriptionHandle::watch(
            change_tx.subscribe(),
            StoreChange::Ads,
            counting_loader(loads),
            move |snapshot| {
                let _ = seen_tx.send(snapshot);
            },
        );
        assert_eq!(seen_rx.recv().await, Some(1));

        handle.unsubscribe();
        tokio::time::sleep(Duration::from_millis(20)).await;
        let _ = change_tx.send(StoreChange::Ads);

        // The callback (and its sender) was dropped with the aborted task
        assert_eq!(seen_rx.recv().await, None);
    }

    #[tokio::test]
    async fn closed_channel_ends_subscription() {
        let (change_tx, _) = broadcast::channel::<StoreChange>(4);
        let receiver = change_tx.subscribe();
        let handle = SubscriptionHandle::watch(
            receiver,
            StoreChange::Posts,
            counting_loader(Arc::new(AtomicUsize::new(0))),
            |_| {},
        );

        drop(change_tx);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!handle.is_active());
    }
}
