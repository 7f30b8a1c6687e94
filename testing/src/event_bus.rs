//! In-memory event bus for tests.
//!
//! [`InMemoryEventBus`] implements the [`EventBus`] trait entirely in memory:
//! published events are recorded for later assertions and forwarded to any
//! live subscribers. Use it to verify that a reducer's publish effects carry
//! the expected topics and payloads without standing up real infrastructure.

use async_stream::stream;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use stellar_burgers_core::event_bus::{BusEvent, EventBus, EventBusError, EventStream};
use tokio::sync::{Mutex, broadcast, mpsc};

/// In-memory [`EventBus`] implementation with published-event capture.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// let store = Store::new(AppState::default(), AppReducer::new(), env_with_bus(bus.clone()));
///
/// store.send(AppAction::AddIngredient(bun)).await?;
///
/// let events = bus.events_for_topic("constructor-events").await;
/// assert_eq!(events[0].event_type, "constructor-changed");
/// ```
pub struct InMemoryEventBus {
    published: Arc<Mutex<Vec<(String, BusEvent)>>>,
    channels: Arc<Mutex<HashMap<String, broadcast::Sender<BusEvent>>>>,
    fail_publishes: AtomicBool,
}

impl InMemoryEventBus {
    /// Create a new empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            channels: Arc::new(Mutex::new(HashMap::new())),
            fail_publishes: AtomicBool::new(false),
        }
    }

    /// All events published so far, as `(topic, event)` pairs in publish order.
    pub async fn published_events(&self) -> Vec<(String, BusEvent)> {
        self.published.lock().await.clone()
    }

    /// Events published to a single topic, in publish order.
    pub async fn events_for_topic(&self, topic: &str) -> Vec<BusEvent> {
        self.published
            .lock()
            .await
            .iter()
            .filter(|(t, _)| t == topic)
            .map(|(_, e)| e.clone())
            .collect()
    }

    /// Make all subsequent publishes fail with [`EventBusError::PublishFailed`].
    ///
    /// Used to test reducer error paths for publish effects.
    pub fn set_fail_publishes(&self, fail: bool) {
        self.fail_publishes.store(fail, Ordering::SeqCst);
    }

    async fn sender_for(&self, topic: &str) -> broadcast::Sender<BusEvent> {
        let mut channels = self.channels.lock().await;
        channels
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(64).0)
            .clone()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus for InMemoryEventBus {
    fn publish(
        &self,
        topic: &str,
        event: &BusEvent,
    ) -> Pin<Box<dyn Future<Output = Result<(), EventBusError>> + Send + '_>> {
        let topic = topic.to_string();
        let event = event.clone();

        Box::pin(async move {
            if self.fail_publishes.load(Ordering::SeqCst) {
                return Err(EventBusError::PublishFailed {
                    topic,
                    reason: "publish failure injected by test".to_string(),
                });
            }

            self.published
                .lock()
                .await
                .push((topic.clone(), event.clone()));

            // Forward to live subscribers; a topic with no subscribers is fine.
            let sender = self.sender_for(&topic).await;
            let _ = sender.send(event);

            Ok(())
        })
    }

    fn subscribe(
        &self,
        topics: &[&str],
    ) -> Pin<Box<dyn Future<Output = Result<EventStream, EventBusError>> + Send + '_>> {
        let topics: Vec<String> = topics.iter().map(ToString::to_string).collect();

        Box::pin(async move {
            let (tx, mut rx) = mpsc::unbounded_channel::<Result<BusEvent, EventBusError>>();

            for topic in topics {
                let mut subscription = self.sender_for(&topic).await.subscribe();
                let tx = tx.clone();

                tokio::spawn(async move {
                    loop {
                        match subscription.recv().await {
                            Ok(event) => {
                                if tx.send(Ok(event)).is_err() {
                                    break; // Stream dropped
                                }
                            },
                            Err(broadcast::error::RecvError::Lagged(_)) => {},
                            Err(broadcast::error::RecvError::Closed) => break,
                        }
                    }
                });
            }
            drop(tx);

            let stream = stream! {
                while let Some(item) = rx.recv().await {
                    yield item;
                }
            };

            Ok(Box::pin(stream) as EventStream)
        })
    }
}
