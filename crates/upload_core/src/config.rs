use std::{collections::HashMap, fs};

use shared::domain::PlatformClass;
use tracing::warn;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub platform: PlatformClass,
}

/// Resolve the upload service base URL for this run: defaults, then an
/// optional `uploader.toml` next to the working directory, then the
/// platform-specific environment value, then the `APP__BASE_URL` override.
pub fn load_settings(platform: PlatformClass) -> Settings {
    let mut base_url = DEFAULT_BASE_URL.to_string();

    if let Ok(raw) = fs::read_to_string("uploader.toml") {
        if let Some(v) = base_url_from_toml(&raw) {
            base_url = v;
        }
    }

    let platform_var = match platform {
        PlatformClass::Web => "UPLOADER_URL_WEB",
        PlatformClass::Native => "UPLOADER_URL_NATIVE",
    };
    if let Ok(v) = std::env::var(platform_var) {
        base_url = v;
    }
    if let Ok(v) = std::env::var("APP__BASE_URL") {
        base_url = v;
    }

    let base_url = normalize_base_url(&base_url);
    if url::Url::parse(&base_url).is_err() {
        warn!(
            base_url = %base_url,
            "configured base URL does not parse; uploads will fail until it is corrected"
        );
    }

    Settings { base_url, platform }
}

fn base_url_from_toml(raw: &str) -> Option<String> {
    toml::from_str::<HashMap<String, String>>(raw)
        .ok()?
        .get("base_url")
        .cloned()
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return DEFAULT_BASE_URL.to_string();
    }

    trimmed.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_trailing_slashes_and_blank_values() {
        assert_eq!(
            normalize_base_url("http://uploads.example/"),
            "http://uploads.example"
        );
        assert_eq!(
            normalize_base_url("  http://uploads.example  "),
            "http://uploads.example"
        );
        assert_eq!(normalize_base_url("   "), DEFAULT_BASE_URL);
    }

    #[test]
    fn reads_base_url_from_flat_toml_map() {
        assert_eq!(
            base_url_from_toml("base_url = \"http://10.0.2.2:3000\"\n"),
            Some("http://10.0.2.2:3000".to_string())
        );
        assert_eq!(base_url_from_toml("other_key = \"x\"\n"), None);
        assert_eq!(base_url_from_toml("not toml at all"), None);
    }

    #[test]
    fn environment_precedence_selects_platform_value_then_app_override() {
        std::env::set_var("UPLOADER_URL_NATIVE", "http://native.example/");
        std::env::set_var("UPLOADER_URL_WEB", "http://web.example");

        let native = load_settings(PlatformClass::Native);
        assert_eq!(native.base_url, "http://native.example");

        let web = load_settings(PlatformClass::Web);
        assert_eq!(web.base_url, "http://web.example");

        std::env::set_var("APP__BASE_URL", "http://override.example");
        let overridden = load_settings(PlatformClass::Native);
        assert_eq!(overridden.base_url, "http://override.example");

        std::env::remove_var("UPLOADER_URL_NATIVE");
        std::env::remove_var("UPLOADER_URL_WEB");
        std::env::remove_var("APP__BASE_URL");
    }
}
