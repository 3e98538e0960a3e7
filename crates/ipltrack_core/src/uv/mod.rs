//! UV-exposure safety signal.
//!
//! # Responsibility
//! - Classify a raw UV index into a level with session guidance.
//! - Cache readings from a provider and degrade gracefully when the
//!   provider fails.
//!
//! # Invariants
//! - Actual retrieval (network, geolocation) stays behind [`UvProvider`];
//!   this module never performs I/O itself.
//! - Provider failures surface as an "unavailable" reading on the current
//!   path, never as an error; failed lookups are not cached.

use chrono::NaiveDate;
use log::warn;
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// Highest UV index at which a session is considered safe.
pub const SAFE_UV_LIMIT: f64 = 5.0;

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Classified UV exposure level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvLevel {
    /// Classifies a raw UV index value.
    pub fn from_index(value: f64) -> Self {
        if value <= 2.0 {
            Self::Low
        } else if value <= 5.0 {
            Self::Moderate
        } else if value <= 7.0 {
            Self::High
        } else if value <= 10.0 {
            Self::VeryHigh
        } else {
            Self::Extreme
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low (safe)",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very high",
            Self::Extreme => "Extreme",
        }
    }

    /// Session guidance shown next to the level.
    pub fn message(self) -> &'static str {
        match self {
            Self::Low => "Minimal radiation. Sessions are clear to go.",
            Self::Moderate => {
                "Moderate level. Avoid sun exposure 24h before and after a session."
            }
            Self::High => "High level. Do not go out in the sun unprotected.",
            Self::VeryHigh => "Very high level. If a session is due tomorrow, postpone it.",
            Self::Extreme => "Extreme level. No IPL sessions for the next 7 days.",
        }
    }
}

/// Whether a session may go ahead at the given UV index.
pub fn is_safe_for_session(value: f64) -> bool {
    value <= SAFE_UV_LIMIT
}

/// One classified UV observation.
#[derive(Debug, Clone, PartialEq)]
pub struct UvReading {
    pub value: f64,
    pub level: UvLevel,
    /// Raised at index 6 and above.
    pub warning: bool,
    pub message: &'static str,
    /// `false` when the provider failed and this is the fallback reading.
    pub available: bool,
}

impl UvReading {
    /// Builds a reading from a raw index value.
    pub fn from_index(value: f64) -> Self {
        let level = UvLevel::from_index(value);
        Self {
            value,
            level,
            warning: value >= 6.0,
            message: level.message(),
            available: true,
        }
    }

    /// Fallback reading when the provider cannot be reached.
    pub fn unavailable() -> Self {
        Self {
            value: 0.0,
            level: UvLevel::Low,
            warning: false,
            message: "UV index unavailable. Check your location settings.",
            available: false,
        }
    }

    pub fn is_safe_for_session(&self) -> bool {
        self.available && is_safe_for_session(self.value)
    }
}

/// One day of the UV outlook.
#[derive(Debug, Clone, PartialEq)]
pub struct UvForecastDay {
    pub date: NaiveDate,
    pub uv_max: f64,
    pub safe: bool,
}

/// Provider-side failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UvError {
    /// Retrieval failed (network, location, upstream).
    Provider(String),
}

impl Display for UvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider(message) => write!(f, "uv provider failure: {message}"),
        }
    }
}

impl Error for UvError {}

/// Narrow retrieval interface implemented by the platform client.
pub trait UvProvider {
    /// Current UV index at the user's location.
    fn current_uv(&self) -> Result<f64, UvError>;
    /// Daily maximum UV index for the next `days` days.
    fn daily_max_uv(&self, days: u8) -> Result<Vec<(NaiveDate, f64)>, UvError>;
}

struct CacheSlot {
    fetched_at: Instant,
    reading: UvReading,
}

/// TTL cache over a [`UvProvider`] (single-threaded, single owner).
pub struct CachedUvIndex<P: UvProvider> {
    provider: P,
    ttl: Duration,
    cache: RefCell<Option<CacheSlot>>,
}

impl<P: UvProvider> CachedUvIndex<P> {
    /// Wraps a provider with the default 1-hour cache.
    pub fn new(provider: P) -> Self {
        Self::with_ttl(provider, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(provider: P, ttl: Duration) -> Self {
        Self {
            provider,
            ttl,
            cache: RefCell::new(None),
        }
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Current classified reading, served from cache within the TTL.
    ///
    /// On provider failure returns [`UvReading::unavailable`] without
    /// caching it, so the next call retries.
    pub fn current_reading(&self) -> UvReading {
        if let Some(slot) = self.cache.borrow().as_ref() {
            if slot.fetched_at.elapsed() < self.ttl {
                return slot.reading.clone();
            }
        }

        match self.provider.current_uv() {
            Ok(value) => {
                let reading = UvReading::from_index(value);
                *self.cache.borrow_mut() = Some(CacheSlot {
                    fetched_at: Instant::now(),
                    reading: reading.clone(),
                });
                reading
            }
            Err(err) => {
                warn!("event=uv_fetch module=uv status=error error={err}");
                UvReading::unavailable()
            }
        }
    }

    /// UV outlook for the next `days` days; `None` when retrieval fails.
    pub fn forecast(&self, days: u8) -> Option<Vec<UvForecastDay>> {
        match self.provider.daily_max_uv(days) {
            Ok(daily) => Some(
                daily
                    .into_iter()
                    .map(|(date, uv_max)| UvForecastDay {
                        date,
                        uv_max,
                        safe: is_safe_for_session(uv_max),
                    })
                    .collect(),
            ),
            Err(err) => {
                warn!("event=uv_forecast module=uv status=error error={err}");
                None
            }
        }
    }
}
