//! Process-wide light/dark theme

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

/// Colour scheme of the generated site
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// The other scheme
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown theme: {0} (expected light or dark)")]
pub struct ThemeParseError(String);

impl FromStr for ThemeMode {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(ThemeParseError(s.to_string())),
        }
    }
}

type Subscriber = Box<dyn Fn(ThemeMode) + Send + Sync>;

/// Current theme with change notification.
///
/// Subscribers run on the thread that changed the theme and must not
/// subscribe from inside a callback.
pub struct ThemeStore {
    current: RwLock<ThemeMode>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl ThemeStore {
    pub fn new(initial: ThemeMode) -> Self {
        Self {
            current: RwLock::new(initial),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn get(&self) -> ThemeMode {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Change the theme; subscribers are notified only on an actual change.
    /// Returns whether the theme changed.
    pub fn set(&self, mode: ThemeMode) -> bool {
        {
            let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
            if *current == mode {
                return false;
            }
            *current = mode;
        }
        self.notify(mode);
        true
    }

    /// Flip the theme and return the new value
    pub fn toggle(&self) -> ThemeMode {
        let next = {
            let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
            *current = current.toggle();
            *current
        };
        self.notify(next);
        next
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(ThemeMode) + Send + Sync + 'static,
    {
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(callback));
    }

    fn notify(&self, mode: ThemeMode) {
        tracing::debug!("Theme changed to {}", mode);
        let subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        for subscriber in subscribers.iter() {
            subscriber(mode);
        }
    }
}

lazy_static! {
    static ref GLOBAL: ThemeStore = ThemeStore::new(ThemeMode::default());
}

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// The process-wide theme store
pub fn global() -> &'static ThemeStore {
    &GLOBAL
}

/// Set the start-up theme. Only the first call has an effect.
pub fn init(mode: ThemeMode) {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("Theme already initialized, ignoring {}", mode);
        return;
    }
    GLOBAL.set(mode);
}

/// Theme currently in effect
pub fn current() -> ThemeMode {
    GLOBAL.get()
}
