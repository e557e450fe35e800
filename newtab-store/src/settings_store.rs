//! User preferences store.
//!
//! Manages user settings with persistence and change notification.

use newtab_core::{IconSize, ProviderKind};
use newtab_fetch::FetchSettings;
use newtab_providers::ProviderRegistry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, watch};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::favicon_cache::DEFAULT_CACHE_CAPACITY;
use crate::persistence::{default_settings_path, load_json, save_json};
use crate::resolver::ResolverOptions;

// ============================================================================
// Settings Types
// ============================================================================

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Icon edge length in pixels when none is given.
    pub icon_size: u32,

    /// Seconds a resolved icon stays cached.
    pub cache_ttl_secs: u64,

    /// Maximum number of cached domains.
    pub cache_capacity: usize,

    /// URLs resolved concurrently per batch group.
    pub batch_size: usize,

    /// Pause between batch groups in milliseconds.
    pub batch_delay_ms: u64,

    /// Per-probe HTTP timeout in seconds.
    pub probe_timeout_secs: u64,

    /// Extra probe attempts on transport errors.
    pub probe_retries: u32,

    /// Providers to try, in order.
    pub providers: Vec<ProviderKind>,

    /// Log level.
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            icon_size: IconSize::DEFAULT.pixels(),
            cache_ttl_secs: newtab_core::DEFAULT_CACHE_TTL.as_secs(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            batch_size: 5,
            batch_delay_ms: 100,
            probe_timeout_secs: 5,
            probe_retries: 0,
            providers: ProviderRegistry::kinds(),
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    /// Keys accepted by [`Settings::set_value`].
    pub const KEYS: &'static [&'static str] = &[
        "icon_size",
        "cache_ttl_secs",
        "cache_capacity",
        "batch_size",
        "batch_delay_ms",
        "probe_timeout_secs",
        "probe_retries",
        "providers",
        "log_level",
    ];

    /// Returns resolver options derived from these settings.
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions::default()
            .with_ttl(Duration::from_secs(self.cache_ttl_secs))
            .with_capacity(self.cache_capacity)
            .with_batch_size(self.batch_size)
            .with_batch_delay(Duration::from_millis(self.batch_delay_ms))
    }

    /// Returns probe settings derived from these settings.
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings::default()
            .with_timeout(Duration::from_secs(self.probe_timeout_secs.max(1)))
            .with_max_retries(self.probe_retries)
    }

    /// Returns the default icon size.
    ///
    /// # Errors
    ///
    /// Returns an error if `icon_size` is 0.
    pub fn icon_size(&self) -> Result<IconSize, StoreError> {
        Ok(IconSize::new(self.icon_size)?)
    }

    /// Checks values that would otherwise be silently adjusted.
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first bad value.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.icon_size == 0 {
            return Err(StoreError::Config("icon_size must be positive".to_string()));
        }
        if self.cache_ttl_secs == 0 {
            return Err(StoreError::Config("cache_ttl_secs must be positive".to_string()));
        }
        if self.providers.is_empty() {
            return Err(StoreError::Config("providers must not be empty".to_string()));
        }
        Ok(())
    }

    /// Sets a value from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys or values that do not parse.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let value = value.trim();
        match key {
            "icon_size" => self.icon_size = parse_number(key, value)?,
            "cache_ttl_secs" => self.cache_ttl_secs = parse_number(key, value)?,
            "cache_capacity" => self.cache_capacity = parse_number(key, value)?,
            "batch_size" => self.batch_size = parse_number(key, value)?,
            "batch_delay_ms" => self.batch_delay_ms = parse_number(key, value)?,
            "probe_timeout_secs" => self.probe_timeout_secs = parse_number(key, value)?,
            "probe_retries" => self.probe_retries = parse_number(key, value)?,
            "providers" => self.providers = ProviderRegistry::parse_selection(value)?,
            "log_level" => self.log_level = value.parse()?,
            _ => return Err(StoreError::UnknownKey(key.to_string())),
        }
        self.validate()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, StoreError> {
    value
        .parse()
        .map_err(|_| StoreError::Config(format!("{key}: expected a number, got '{value}'")))
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(StoreError::Config(format!("unknown log level '{other}'"))),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persistent settings store with change notifications.
///
/// Subscribers receive a version number bumped on every change.
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
    notify: watch::Sender<u64>,
}

impl SettingsStore {
    /// Creates a store holding defaults, backed by `path`.
    pub fn new(path: PathBuf) -> Self {
        Self::with_settings(path, Settings::default())
    }

    fn with_settings(path: PathBuf, settings: Settings) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
            notify,
        }
    }

    /// Loads settings from the default path.
    ///
    /// # Errors
    ///
    /// See [`SettingsStore::load`].
    pub async fn load_default() -> Result<Self, StoreError> {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path.
    ///
    /// A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it holds
    /// values that [`Settings::validate`] rejects.
    pub async fn load(path: PathBuf) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            return Ok(Self::new(path));
        }

        info!(path = %path.display(), "Loading settings");
        let settings: Settings = load_json(&path).await?;
        settings.validate()?;

        Ok(Self::with_settings(path, settings))
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings and notifies subscribers.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        {
            let mut settings = self.settings.write().await;
            f(&mut settings);
        }
        self.notify_change();
    }

    /// Sets one value from its string form.
    ///
    /// Nothing changes if the value is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys or bad values.
    pub async fn set_value(&self, key: &str, value: &str) -> Result<(), StoreError> {
        {
            let mut settings = self.settings.write().await;
            let mut updated = settings.clone();
            updated.set_value(key, value)?;
            *settings = updated;
        }
        info!(key, value, "Setting changed");
        self.notify_change();
        Ok(())
    }

    /// Restores defaults.
    pub async fn reset(&self) {
        self.update(|s| *s = Settings::default()).await;
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Subscribes to settings changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    fn notify_change(&self) {
        self.notify.send_modify(|version| *version += 1);
    }
}
