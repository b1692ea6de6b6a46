//! Step-counter sensor abstraction.
//!
//! A sensor delivers cumulative step counts once subscribed. Subscriptions
//! are held through [`SensorSubscription`], which unsubscribes when dropped
//! so the sensor is released on every exit path.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::debug;

/// Errors from step sensors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    /// The device has no step counter
    #[error("no step counter sensor available")]
    Unavailable,

    /// Only one listener may be registered at a time
    #[error("step counter already has a listener")]
    AlreadySubscribed,

    /// A reading was fed while no listener was registered
    #[error("step counter has no listener")]
    NotListening,
}

/// A step-counter sensor.
pub trait StepSensor: Send + Sync {
    /// Register a listener and return the stream of cumulative counts.
    fn subscribe(&self) -> Result<mpsc::Receiver<u32>, SensorError>;

    /// Unregister the listener.
    fn unsubscribe(&self);
}

/// An active sensor registration.
pub struct SensorSubscription {
    sensor: Arc<dyn StepSensor>,
    readings: mpsc::Receiver<u32>,
}

impl SensorSubscription {
    /// Subscribe to `sensor`.
    pub fn acquire(sensor: Arc<dyn StepSensor>) -> Result<Self, SensorError> {
        let readings = sensor.subscribe()?;
        debug!("Step sensor listener registered");
        Ok(Self { sensor, readings })
    }

    /// Next cumulative count, or `None` once the sensor stops delivering.
    pub async fn next_reading(&mut self) -> Option<u32> {
        self.readings.recv().await
    }
}

impl Drop for SensorSubscription {
    fn drop(&mut self) {
        self.sensor.unsubscribe();
        debug!("Step sensor listener released");
    }
}

/// A device without a step counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSensor;

impl StepSensor for NoSensor {
    fn subscribe(&self) -> Result<mpsc::Receiver<u32>, SensorError> {
        Err(SensorError::Unavailable)
    }

    fn unsubscribe(&self) {}
}

/// A sensor fed through a [`SensorFeed`], for simulation and tests.
///
/// Every subscription gets a fresh channel, so the sensor can be registered
/// again after it was released. Counts fed while nobody listens are lost,
/// as with a hardware sensor. Dropping the feed ends the current stream and
/// makes later subscriptions fail with [`SensorError::Unavailable`].
pub struct ChannelSensor {
    inner: Arc<ChannelInner>,
}

struct ChannelInner {
    capacity: usize,
    listener: Mutex<Option<mpsc::Sender<u32>>>,
    subscribed: AtomicBool,
    closed: AtomicBool,
    releases: AtomicUsize,
}

impl ChannelInner {
    fn listener(&self) -> std::sync::MutexGuard<'_, Option<mpsc::Sender<u32>>> {
        self.listener.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Producer side of a [`ChannelSensor`].
pub struct SensorFeed {
    inner: Arc<ChannelInner>,
}

impl SensorFeed {
    /// Deliver a cumulative count to the registered listener.
    pub async fn send(&self, steps: u32) -> Result<(), SensorError> {
        let listener = self.inner.listener().clone();
        match listener {
            Some(tx) => tx.send(steps).await.map_err(|_| SensorError::NotListening),
            None => Err(SensorError::NotListening),
        }
    }
}

impl Drop for SensorFeed {
    fn drop(&mut self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        self.inner.listener().take();
    }
}

impl ChannelSensor {
    /// Create a sensor and the feed that drives it. `capacity` bounds the
    /// readings buffered per subscription.
    pub fn new(capacity: usize) -> (Self, SensorFeed) {
        let inner = Arc::new(ChannelInner {
            capacity: capacity.max(1),
            listener: Mutex::new(None),
            subscribed: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            releases: AtomicUsize::new(0),
        });
        let feed = SensorFeed {
            inner: inner.clone(),
        };
        (Self { inner }, feed)
    }

    /// Whether a listener is currently registered.
    pub fn is_subscribed(&self) -> bool {
        self.inner.subscribed.load(Ordering::SeqCst)
    }

    /// How many times the listener was unregistered.
    pub fn releases(&self) -> usize {
        self.inner.releases.load(Ordering::SeqCst)
    }
}

impl StepSensor for ChannelSensor {
    fn subscribe(&self) -> Result<mpsc::Receiver<u32>, SensorError> {
        if self.inner.closed.load(Ordering::SeqCst) {
            return Err(SensorError::Unavailable);
        }
        if self.inner.subscribed.swap(true, Ordering::SeqCst) {
            return Err(SensorError::AlreadySubscribed);
        }
        let (tx, rx) = mpsc::channel(self.inner.capacity);
        *self.inner.listener() = Some(tx);
        Ok(rx)
    }

    fn unsubscribe(&self) {
        self.inner.listener().take();
        if self.inner.subscribed.swap(false, Ordering::SeqCst) {
            self.inner.releases.fetch_add(1, Ordering::SeqCst);
        }
    }
}
