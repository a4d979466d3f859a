use std::path::PathBuf;

pub const CONFIG_PATH_ENV: &str = "RECFILE_CONFIG";

pub fn get_config_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join("recfile")
}

pub fn get_config_path() -> PathBuf {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => get_config_dir().join("config.toml"),
    }
}
