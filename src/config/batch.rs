//! Backend selection for the batching scheduler.

use serde::{Deserialize, Serialize};

/// Environment variable selecting the backend kind.
pub const ENV_KIND: &str = "AUTO_BATCH_KIND";
/// Environment variable holding the timer delay in milliseconds.
pub const ENV_DELAY_MS: &str = "AUTO_BATCH_DELAY_MS";
/// Environment variable holding the frame interval in milliseconds.
pub const ENV_FRAME_INTERVAL_MS: &str = "AUTO_BATCH_FRAME_INTERVAL_MS";

const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

const fn default_frame_interval_ms() -> u64 {
    DEFAULT_FRAME_INTERVAL_MS
}

/// Serializable backend configuration.
///
/// Caller-supplied callbacks cannot be serialized; they are configured on
/// [`crate::builders::AutoBatchBuilder::queue_notification`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BackendConfig {
    /// Flush on the next runtime turn.
    Tick,
    /// Flush after a fixed delay.
    Timer {
        /// Delay in milliseconds; must be non-negative.
        #[serde(rename = "delayMs")]
        delay_ms: i64,
    },
    /// Flush on the next frame boundary.
    AnimationFrame {
        /// Frame length in milliseconds; must be greater than 0.
        #[serde(rename = "frameIntervalMs", default = "default_frame_interval_ms")]
        frame_interval_ms: u64,
    },
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::AnimationFrame {
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl BackendConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Describes the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Tick => Ok(()),
            Self::Timer { delay_ms } if *delay_ms < 0 => {
                Err(format!("delay_ms must be non-negative, got {delay_ms}"))
            }
            Self::Timer { .. } => Ok(()),
            Self::AnimationFrame { frame_interval_ms } if *frame_interval_ms == 0 => {
                Err("frame_interval_ms must be greater than 0".into())
            }
            Self::AnimationFrame { .. } => Ok(()),
        }
    }

    /// Short name matching the backend's `kind()`.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Tick => "tick",
            Self::Timer { .. } => "timer",
            Self::AnimationFrame { .. } => "animationFrame",
        }
    }

    /// Parse backend configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation message.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the process environment, reading `.env` first
    /// if present. An unset kind yields the default.
    ///
    /// # Errors
    ///
    /// Returns a message for unknown kinds or malformed numbers.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a message for unknown kinds, missing timer delays, or
    /// malformed numbers.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(kind) = lookup(ENV_KIND) else {
            return Ok(Self::default());
        };
        let cfg = match kind.trim() {
            "tick" => Self::Tick,
            "timer" => {
                let raw = lookup(ENV_DELAY_MS)
                    .ok_or_else(|| format!("{ENV_DELAY_MS} is required for the timer backend"))?;
                let delay_ms = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| format!("{ENV_DELAY_MS}: {e}"))?;
                Self::Timer { delay_ms }
            }
            "animationFrame" | "animation_frame" => {
                let frame_interval_ms = match lookup(ENV_FRAME_INTERVAL_MS) {
                    Some(raw) => raw
                        .trim()
                        .parse::<u64>()
                        .map_err(|e| format!("{ENV_FRAME_INTERVAL_MS}: {e}"))?,
                    None => DEFAULT_FRAME_INTERVAL_MS,
                };
                Self::AnimationFrame { frame_interval_ms }
            }
            other => return Err(format!("unknown backend kind `{other}`")),
        };
        cfg.validate()?;
        Ok(cfg)
    }
}
