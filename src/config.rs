//! Run configuration.
//!
//! Settings come from three layers, lowest priority first: built-in
//! defaults, `ADPROBE_*` environment variables, command-line flags. Empty
//! values never override a lower layer.

use std::collections::HashMap;
use std::time::Duration;

use rand::Rng;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://qa-internship.avito.com";

const KEY_BASE_URL: &str = "base_url";
const KEY_SELLER_BASE: &str = "seller_base";
const KEY_TIMEOUT_MS: &str = "timeout_ms";

/// Environment variable backing each setting.
const ENV_VARS: [(&str, &str); 3] = [
    (KEY_BASE_URL, "ADPROBE_BASE_URL"),
    (KEY_SELLER_BASE, "ADPROBE_SELLER_BASE"),
    (KEY_TIMEOUT_MS, "ADPROBE_TIMEOUT_MS"),
];

/// Values supplied on the command line, unparsed.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub seller_base: Option<String>,
    pub timeout_ms: Option<String>,
}

impl ConfigOverrides {
    fn entries(&self) -> [(&'static str, Option<&String>); 3] {
        [
            (KEY_BASE_URL, self.base_url.as_ref()),
            (KEY_SELLER_BASE, self.seller_base.as_ref()),
            (KEY_TIMEOUT_MS, self.timeout_ms.as_ref()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    pub base_url: String,
    /// Seller id every scenario offsets from, so parallel runs by different
    /// people rarely collide on the shared service.
    pub seller_base: i64,
    pub timeout: Option<Duration>,
}

impl SuiteConfig {
    /// Resolve against the process environment.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::resolve(&env, overrides)
    }

    pub fn resolve(
        env: &HashMap<String, String>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let values = layered_values(env, overrides);

        let base_url = values
            .get(KEY_BASE_URL)
            .map(|raw| raw.trim().to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: KEY_BASE_URL,
                value: base_url,
                expected: "an http(s) URL",
            });
        }

        let seller_base = match values.get(KEY_SELLER_BASE) {
            Some(raw) => parse_value(KEY_SELLER_BASE, raw, "an integer seller id")?,
            None => default_seller_base(),
        };

        let timeout = match values.get(KEY_TIMEOUT_MS) {
            Some(raw) => {
                let ms: u64 = parse_value(KEY_TIMEOUT_MS, raw, "milliseconds")?;
                (ms > 0).then(|| Duration::from_millis(ms))
            }
            None => None,
        };

        Ok(Self {
            base_url,
            seller_base,
            timeout,
        })
    }
}

/// `500000 + rand(1000..=99999)`.
pub fn default_seller_base() -> i64 {
    500_000 + rand::thread_rng().gen_range(1_000..=99_999)
}

fn layered_values(
    env: &HashMap<String, String>,
    overrides: &ConfigOverrides,
) -> HashMap<&'static str, String> {
    let mut values = HashMap::new();

    for (key, var) in ENV_VARS {
        if let Some(value) = env.get(var) {
            if !value.trim().is_empty() {
                values.insert(key, value.clone());
            }
        }
    }

    for (key, value) in overrides.entries() {
        if let Some(value) = value {
            if !value.trim().is_empty() {
                values.insert(key, value.clone());
            }
        }
    }

    values
}

fn parse_value<T: std::str::FromStr>(
    key: &'static str,
    raw: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
        expected,
    })
}
