// Metrics stream - Latest-value publish/subscribe holder for metric readings
use crate::domain::metric::MetricReading;
use futures::Stream;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use tokio::sync::mpsc;

/// An immutable, ordered set of readings as published in one call.
///
/// Cloning is cheap; a snapshot is never modified after it is created.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricsSnapshot(Arc<[MetricReading]>);

impl MetricsSnapshot {
    /// True when both handles point at the same published snapshot.
    pub fn ptr_eq(&self, other: &MetricsSnapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for MetricsSnapshot {
    type Target = [MetricReading];

    fn deref(&self) -> &[MetricReading] {
        &self.0
    }
}

impl From<Vec<MetricReading>> for MetricsSnapshot {
    fn from(readings: Vec<MetricReading>) -> Self {
        Self(readings.into())
    }
}

type Observer = Rc<dyn Fn(&MetricsSnapshot)>;

#[derive(Default)]
struct StreamState {
    current: MetricsSnapshot,
    observers: Vec<(u64, Observer)>,
    next_id: u64,
}

/// Holds the current readings of one screen and fans each new snapshot out
/// to its subscribers.
///
/// Everything runs on the caller's thread: `publish` invokes every observer
/// synchronously, in subscription order, before returning.
#[derive(Default)]
pub struct MetricsStream {
    state: Rc<RefCell<StreamState>>,
}

impl MetricsStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> MetricsSnapshot {
        self.state.borrow().current.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    /// Replace the current snapshot and notify every subscriber.
    ///
    /// Observers may publish again from inside a notification. Once a newer
    /// snapshot has been published, delivery of the older one stops.
    pub fn publish(&self, readings: impl Into<MetricsSnapshot>) {
        let snapshot = readings.into();
        let observers: Vec<Observer> = {
            let mut state = self.state.borrow_mut();
            state.current = snapshot.clone();
            state.observers.iter().map(|(_, o)| o.clone()).collect()
        };

        tracing::debug!(
            readings = snapshot.len(),
            subscribers = observers.len(),
            "Publishing metrics snapshot"
        );

        for observer in observers {
            if !self.state.borrow().current.ptr_eq(&snapshot) {
                tracing::debug!("Snapshot superseded during fan-out");
                break;
            }
            observer(&snapshot);
        }
    }

    /// Register an observer. It is called right away with the current
    /// snapshot, then once per `publish` until unsubscribed.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&MetricsSnapshot) + 'static,
    {
        let observer: Observer = Rc::new(observer);
        let (id, current) = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.observers.push((id, observer.clone()));
            (id, state.current.clone())
        };

        tracing::debug!(subscription = id, "Subscribed to metrics stream");
        observer(&current);

        Subscription {
            id,
            state: Rc::downgrade(&self.state),
        }
    }

    /// Idempotent. Handles issued by another stream are ignored.
    pub fn unsubscribe(&self, subscription: &Subscription) {
        if Weak::as_ptr(&subscription.state) == Rc::as_ptr(&self.state) {
            subscription.unsubscribe();
        }
    }

    /// Async view of the stream: the current snapshot first, then one item
    /// per publish. Dropping the returned stream removes its subscription.
    pub fn updates(&self) -> impl Stream<Item = MetricsSnapshot> + use<> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let guard = UnsubscribeOnDrop(self.subscribe(move |snapshot| {
            let _ = tx.send(snapshot.clone());
        }));

        async_stream::stream! {
            let _guard = guard;
            while let Some(snapshot) = rx.recv().await {
                yield snapshot;
            }
        }
    }
}

impl fmt::Debug for MetricsStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MetricsStream")
            .field("current", &state.current)
            .field("subscribers", &state.observers.len())
            .finish()
    }
}

/// Handle returned by [`MetricsStream::subscribe`].
///
/// Holds only a weak reference to the stream. Dropping the handle does not
/// unsubscribe.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    state: Weak<RefCell<StreamState>>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if let Some(state) = self.state.upgrade() {
            let mut state = state.borrow_mut();
            let before = state.observers.len();
            state.observers.retain(|(id, _)| *id != self.id);
            if state.observers.len() != before {
                tracing::debug!(subscription = self.id, "Unsubscribed from metrics stream");
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.state
            .upgrade()
            .map(|state| state.borrow().observers.iter().any(|(id, _)| *id == self.id))
            .unwrap_or(false)
    }
}

struct UnsubscribeOnDrop(Subscription);

impl Drop for UnsubscribeOnDrop {
    fn drop(&mut self) {
        self.0.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn recorder() -> (Rc<RefCell<Vec<MetricsSnapshot>>>, impl Fn(&MetricsSnapshot) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |s: &MetricsSnapshot| sink.borrow_mut().push(s.clone()))
    }

    fn sample() -> Vec<MetricReading> {
        vec![
            MetricReading::new("Moisture", 45.0, "%"),
            MetricReading::new("Temperature", 23.0, "°C"),
            MetricReading::new("PH Level", 6.5, ""),
        ]
    }

    #[test]
    fn test_subscribe_replays_empty_snapshot() {
        let stream = MetricsStream::new();
        let (seen, observer) = recorder();

        let _subscription = stream.subscribe(observer);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].is_empty());
    }

    #[test]
    fn test_publish_replaces_current_and_notifies() {
        let stream = MetricsStream::new();
        let (seen, observer) = recorder();
        let _subscription = stream.subscribe(observer);

        stream.publish(sample());

        assert_eq!(&*stream.current(), sample().as_slice());
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(&*seen[1], sample().as_slice());
        assert!(seen[1].ptr_eq(&stream.current()));
    }

    #[test]
    fn test_late_subscriber_gets_latest() {
        let stream = MetricsStream::new();
        stream.publish(sample());

        let (seen, observer) = recorder();
        let _subscription = stream.subscribe(observer);

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(&*seen.borrow()[0], sample().as_slice());
    }

    #[test]
    fn test_sequential_publishes_are_whole_snapshots() {
        let stream = MetricsStream::new();
        let (seen, observer) = recorder();
        let _subscription = stream.subscribe(observer);

        let first = vec![MetricReading::new("Water Usage", 300.0, "L")];
        let second = vec![
            MetricReading::new("Soil Health", 7.0, ""),
            MetricReading::new("Fertilizer Use", 12.0, "kg"),
        ];
        stream.publish(first.clone());
        stream.publish(second.clone());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(&*seen[1], first.as_slice());
        assert_eq!(&*seen[2], second.as_slice());
    }

    #[test]
    fn test_identical_publish_still_notifies() {
        let stream = MetricsStream::new();
        let (seen, observer) = recorder();
        let _subscription = stream.subscribe(observer);

        stream.publish(sample());
        stream.publish(sample());

        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_fan_out_in_subscription_order() {
        let stream = MetricsStream::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let subscriptions: Vec<Subscription> = (0..3)
            .map(|i| {
                let order = order.clone();
                stream.subscribe(move |_| order.borrow_mut().push(i))
            })
            .collect();
        order.borrow_mut().clear();

        stream.publish(sample());

        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        assert_eq!(subscriptions.len(), stream.subscriber_count());
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let stream = MetricsStream::new();
        let (seen, observer) = recorder();
        let subscription = stream.subscribe(observer);
        assert!(subscription.is_active());

        stream.unsubscribe(&subscription);
        stream.unsubscribe(&subscription);
        subscription.unsubscribe();
        assert!(!subscription.is_active());
        assert_eq!(stream.subscriber_count(), 0);

        stream.publish(sample());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_unsubscribe_ignores_foreign_handle() {
        let stream = MetricsStream::new();
        let other = MetricsStream::new();
        let _mine = stream.subscribe(|_| {});
        let theirs = other.subscribe(|_| {});

        stream.unsubscribe(&theirs);

        assert_eq!(stream.subscriber_count(), 1);
        assert!(theirs.is_active());
    }

    #[test]
    fn test_unsubscribe_after_stream_dropped() {
        let stream = MetricsStream::new();
        let subscription = stream.subscribe(|_| {});
        drop(stream);

        subscription.unsubscribe();
        assert!(!subscription.is_active());
    }

    #[test]
    fn test_reentrant_publish_delivers_latest_last() {
        let stream = Rc::new(MetricsStream::new());
        let replacement = vec![MetricReading::new("Soil Health", 5.0, "")];

        let inner = Rc::downgrade(&stream);
        let trigger = replacement.clone();
        let _republisher = stream.subscribe(move |snapshot| {
            if snapshot.len() == 3 {
                if let Some(stream) = inner.upgrade() {
                    stream.publish(trigger.clone());
                }
            }
        });
        let (seen, observer) = recorder();
        let _recorder = stream.subscribe(observer);

        stream.publish(sample());

        let seen = seen.borrow();
        assert_eq!(seen.last().map(|s| s.to_vec()), Some(replacement.clone()));
        assert!(seen.iter().all(|s| s.len() != 3));
        assert_eq!(&*stream.current(), replacement.as_slice());
    }

    #[test]
    fn test_unsubscribe_from_inside_observer() {
        let stream = Rc::new(MetricsStream::new());
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(RefCell::new(0));

        let handle = slot.clone();
        let counter = calls.clone();
        let subscription = stream.subscribe(move |_| {
            *counter.borrow_mut() += 1;
            if let Some(subscription) = handle.borrow().as_ref() {
                subscription.unsubscribe();
            }
        });
        *slot.borrow_mut() = Some(subscription);

        stream.publish(sample());
        stream.publish(sample());

        assert_eq!(*calls.borrow(), 2);
        assert_eq!(stream.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_updates_replays_then_follows_publishes() {
        let stream = MetricsStream::new();
        let updates = stream.updates();
        futures::pin_mut!(updates);

        stream.publish(sample());

        let first = updates.next().await.unwrap();
        assert!(first.is_empty());
        let second = updates.next().await.unwrap();
        assert_eq!(&*second, sample().as_slice());
    }

    #[tokio::test]
    async fn test_dropping_updates_unsubscribes() {
        let stream = MetricsStream::new();
        let updates = stream.updates();
        assert_eq!(stream.subscriber_count(), 1);

        drop(updates);
        assert_eq!(stream.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_updates_end_when_stream_dropped() {
        let stream = MetricsStream::new();
        let updates = stream.updates();
        futures::pin_mut!(updates);
        drop(stream);

        assert!(updates.next().await.unwrap().is_empty());
        assert!(updates.next().await.is_none());
    }
}
