use std::path::PathBuf;

/// Route the load-generation backend serves sessions on.
pub(crate) const DEFAULT_BACKEND_URL: &str = "ws://localhost:8080/stress-test";
pub(crate) const DEFAULT_REQUESTS: u64 = 100;
pub(crate) const DEFAULT_CONCURRENCY: u64 = 10;
pub(crate) const DEFAULT_CONNECT_TIMEOUT: &str = "10s";
/// Config files picked up from the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["loadscope.toml", "loadscope.json"];

pub(crate) fn default_charts_path() -> String {
    default_base_dir()
        .join("charts")
        .to_string_lossy()
        .into_owned()
}

fn default_base_dir() -> PathBuf {
    if let Some(home) = user_home_dir() {
        return home.join(".loadscope");
    }

    PathBuf::from(".loadscope")
}

fn user_home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        if let Some(value) = std::env::var_os("USERPROFILE") {
            return Some(PathBuf::from(value));
        }
    }

    std::env::var_os("HOME").map(PathBuf::from)
}
