//! Builders to construct batching stores from configuration.

use std::sync::Arc;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::core::{AutoBatchStore, BatchError, Flush, NotificationBackend, NotifyingStore, Spawn};
use crate::infra::backend::{AnimationFrameBackend, CallbackBackend, TickBackend, TimerBackend};
use crate::runtime::TokioSpawner;

/// Builder for [`AutoBatchStore`].
///
/// Configuration is validated in [`build`](Self::build), so a bad delay or
/// frame interval fails before the first dispatch. Spawning backends use the
/// configured spawner, or the ambient tokio runtime if none was given.
pub struct AutoBatchBuilder<S: NotifyingStore, Sp = TokioSpawner> {
    store: Arc<S>,
    config: BackendConfig,
    callback: Option<CallbackBackend>,
    spawner: Option<Sp>,
}

impl<S: NotifyingStore> AutoBatchBuilder<S, TokioSpawner> {
    /// Start a builder with the default animation-frame backend.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            config: BackendConfig::default(),
            callback: None,
            spawner: None,
        }
    }
}

impl<S: NotifyingStore, Sp> AutoBatchBuilder<S, Sp> {
    /// Select a configured backend, replacing any callback.
    #[must_use]
    pub fn backend(mut self, config: BackendConfig) -> Self {
        self.config = config;
        self.callback = None;
        self
    }

    /// Use a caller-supplied scheduling function instead of a built-in backend.
    #[must_use]
    pub fn queue_notification<F>(mut self, queue_notification: F) -> Self
    where
        F: Fn(Flush) + Send + Sync + 'static,
    {
        self.callback = Some(CallbackBackend::new(queue_notification));
        self
    }

    /// Spawn flushes on `spawner` instead of the ambient runtime.
    #[must_use]
    pub fn spawner<Sp2>(self, spawner: Sp2) -> AutoBatchBuilder<S, Sp2> {
        AutoBatchBuilder {
            store: self.store,
            config: self.config,
            callback: self.callback,
            spawner: Some(spawner),
        }
    }

    /// Configured backend; ignored when a callback is set.
    pub const fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Whether a caller-supplied callback will be used.
    pub const fn uses_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl<S, Sp> AutoBatchBuilder<S, Sp>
where
    S: NotifyingStore,
    Sp: Spawn + Send + Sync + 'static,
{
    /// Validate configuration and build the batching store.
    ///
    /// # Errors
    ///
    /// [`BatchError::InvalidConfig`] for invalid values, or
    /// [`BatchError::RuntimeUnavailable`] when a spawning backend has neither a
    /// spawner nor an ambient runtime.
    pub fn build(self) -> Result<AutoBatchStore<S>, BatchError> {
        let backend: Arc<dyn NotificationBackend> = match self.callback {
            Some(callback) => Arc::new(callback),
            None => {
                self.config.validate().map_err(BatchError::InvalidConfig)?;
                let spawner = self.spawner.or_else(Sp::current).ok_or_else(|| {
                    BatchError::RuntimeUnavailable(format!(
                        "{} backend needs a spawner or a running tokio runtime",
                        self.config.kind()
                    ))
                })?;
                spawn_backend(&self.config, spawner)?
            }
        };
        tracing::debug!(backend = backend.kind(), "auto-batch store built");
        Ok(AutoBatchStore::new(self.store, backend))
    }
}

/// Construct the backend described by `config` on `spawner`.
///
/// # Errors
///
/// Returns [`BatchError::InvalidConfig`] for invalid values.
pub fn build_backend<Sp>(
    config: &BackendConfig,
    spawner: Sp,
) -> Result<Arc<dyn NotificationBackend>, BatchError>
where
    Sp: Spawn + Send + Sync + 'static,
{
    config.validate().map_err(BatchError::InvalidConfig)?;
    spawn_backend(config, spawner)
}

// Callers validate `config` first.
fn spawn_backend<Sp>(
    config: &BackendConfig,
    spawner: Sp,
) -> Result<Arc<dyn NotificationBackend>, BatchError>
where
    Sp: Spawn + Send + Sync + 'static,
{
    let backend: Arc<dyn NotificationBackend> = match config {
        BackendConfig::Tick => Arc::new(TickBackend::new(spawner)),
        BackendConfig::Timer { delay_ms } => Arc::new(TimerBackend::from_millis(spawner, *delay_ms)?),
        BackendConfig::AnimationFrame { frame_interval_ms } => Arc::new(
            AnimationFrameBackend::with_interval(spawner, Duration::from_millis(*frame_interval_ms))?,
        ),
    };
    Ok(backend)
}

/// Wrap `store` using `config` on the ambient tokio runtime.
///
/// # Errors
///
/// See [`AutoBatchBuilder::build`].
pub fn build_auto_batch<S: NotifyingStore>(
    store: Arc<S>,
    config: BackendConfig,
) -> Result<AutoBatchStore<S>, BatchError> {
    AutoBatchBuilder::new(store).backend(config).build()
}
