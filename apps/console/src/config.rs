use std::{collections::HashMap, fs, path::PathBuf};

#[derive(Debug)]
pub struct Settings {
    pub api_url: String,
    pub credentials_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".into(),
            credentials_path: None,
        }
    }
}

/// Defaults, then `cineops.toml` in the working directory, then
/// environment variables. Unreadable files are ignored.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("cineops.toml") {
        apply_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("CINEOPS_API_URL") {
        settings.api_url = v;
    }
    if let Ok(v) = std::env::var("APP__API_URL") {
        settings.api_url = v;
    }
    if let Ok(v) = std::env::var("CINEOPS_CREDENTIALS") {
        settings.credentials_path = Some(PathBuf::from(v));
    }

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("api_url") {
            settings.api_url = v.clone();
        }
        if let Some(v) = file_cfg.get("credentials_path") {
            settings.credentials_path = Some(PathBuf::from(v));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_overrides_the_api_url() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "api_url = \"https://admin.example.com\"\n");
        assert_eq!(settings.api_url, "https://admin.example.com");
        assert!(settings.credentials_path.is_none());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut settings = Settings::default();
        apply_file_config(
            &mut settings,
            "api_url = \"https://a.example\"\nextra = \"ignored\"\n",
        );
        assert_eq!(settings.api_url, "https://a.example");
    }

    #[test]
    fn non_string_values_leave_the_defaults() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "api_url = 7\n");
        assert_eq!(settings.api_url, Settings::default().api_url);
    }

    #[test]
    fn credentials_path_is_read_from_the_file() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "credentials_path = \"/tmp/creds.toml\"\n");
        assert_eq!(
            settings.credentials_path,
            Some(PathBuf::from("/tmp/creds.toml"))
        );
    }
}
