//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

use camstore_core::Locale;

pub const ENV_BIND: &str = "CAMSTORE_BIND";
pub const ENV_CONTENT_DIR: &str = "CAMSTORE_CONTENT_DIR";
pub const ENV_DEFAULT_LOCALE: &str = "CAMSTORE_DEFAULT_LOCALE";

const DEFAULT_CONTENT_DIR: &str = "content";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub content_dir: PathBuf,
    pub default_locale: Locale,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or invalid values fall back
    /// to defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_addr: try_load(&lookup, ENV_BIND, SocketAddr::from(([0, 0, 0, 0], 8080))),
            content_dir: try_load(&lookup, ENV_CONTENT_DIR, PathBuf::from(DEFAULT_CONTENT_DIR)),
            default_locale: try_load(&lookup, ENV_DEFAULT_LOCALE, Locale::default()),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default:?}");
        return default;
    };

    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}; using default: {default:?}");
        default
    })
}
