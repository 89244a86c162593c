use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api/v1";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default, alias = "API_BASE_URL")]
    pub api_base_url: Option<String>,
    #[serde(default, alias = "TIME_ZONE")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub time_zone: Tz,
}

static RESOLVED: OnceLock<ResolvedConfig> = OnceLock::new();

/// Earlier layers win field by field; anything missing falls back to defaults.
fn resolve(layers: &[RuntimeConfig]) -> ResolvedConfig {
    let api_base_url = layers
        .iter()
        .filter_map(|layer| layer.api_base_url.as_deref())
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .trim_end_matches('/')
        .to_string();

    let time_zone = layers
        .iter()
        .filter_map(|layer| layer.time_zone.as_deref())
        .find_map(|name| match name.trim().parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(_) => {
                log::warn!("ignoring unknown time zone '{}'", name);
                None
            }
        })
        .unwrap_or(Tz::UTC);

    ResolvedConfig {
        api_base_url,
        time_zone,
    }
}

#[cfg(target_arch = "wasm32")]
fn read_global(name: &str) -> Option<RuntimeConfig> {
    let window = web_sys::window()?;
    let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let read = |keys: &[&str]| {
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(&any, &(*key).into())
                .ok()
                .and_then(|v| v.as_string())
        })
    };
    Some(RuntimeConfig {
        api_base_url: read(&["API_BASE_URL", "api_base_url"]),
        time_zone: read(&["TIME_ZONE", "time_zone"]),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn read_global(_name: &str) -> Option<RuntimeConfig> {
    None
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let origin = crate::utils::browser::origin()?;
    let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

async fn load() -> ResolvedConfig {
    let mut layers = Vec::new();
    layers.extend(read_global("__PEOPLE_PLANNER_ENV"));
    layers.extend(read_global("__PEOPLE_PLANNER_CONFIG"));
    let has_everything = layers.iter().any(|l| l.api_base_url.is_some())
        && layers.iter().any(|l| l.time_zone.is_some());
    if !has_everything {
        if let Some(file) = fetch_runtime_config().await {
            layers.push(file);
        }
    }
    resolve(&layers)
}

pub async fn await_config() -> ResolvedConfig {
    if let Some(cached) = RESOLVED.get() {
        return cached.clone();
    }
    let loaded = load().await;
    RESOLVED.get_or_init(|| loaded).clone()
}

pub async fn await_api_base_url() -> String {
    await_config().await.api_base_url
}

/// Time zone of the running app; UTC until the config has resolved.
pub fn current_time_zone() -> Tz {
    RESOLVED.get().map(|c| c.time_zone).unwrap_or(Tz::UTC)
}

pub async fn init() {
    let resolved = await_config().await;
    log::info!(
        "runtime config resolved: api={} tz={}",
        resolved.api_base_url,
        resolved.time_zone
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_earlier_layers() {
        let env = RuntimeConfig {
            api_base_url: Some("https://api.example.com/v1/".into()),
            time_zone: None,
        };
        let file = RuntimeConfig {
            api_base_url: Some("https://ignored.example.com".into()),
            time_zone: Some("Europe/London".into()),
        };
        let resolved = resolve(&[env, file]);
        assert_eq!(resolved.api_base_url, "https://api.example.com/v1");
        assert_eq!(resolved.time_zone, Tz::Europe__London);
    }

    #[test]
    fn resolve_falls_back_to_defaults() {
        let resolved = resolve(&[RuntimeConfig {
            api_base_url: Some("   ".into()),
            time_zone: Some("Mars/Olympus".into()),
        }]);
        assert_eq!(resolved.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(resolved.time_zone, Tz::UTC);
    }

    #[test]
    fn runtime_config_accepts_upper_case_keys() {
        let cfg: RuntimeConfig = serde_json::from_str(
            r#"{"API_BASE_URL":"https://hr.example.com/api","TIME_ZONE":"UTC"}"#,
        )
        .unwrap();
        assert_eq!(cfg.api_base_url.as_deref(), Some("https://hr.example.com/api"));
        assert_eq!(cfg.time_zone.as_deref(), Some("UTC"));
    }
}
