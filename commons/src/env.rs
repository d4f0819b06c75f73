use std::path::Path;

const CONFIG_DIR: &str = ".celo-plugin";
const CONFIG_FILE: &str = "config.env";

pub fn load_env() {
    let home_config = std::env::var("HOME")
        .map(|home| Path::new(&home).join(CONFIG_DIR).join(CONFIG_FILE))
        .unwrap_or_else(|_| Path::new(CONFIG_DIR).join(CONFIG_FILE));
    load_env_from_paths(Path::new(".env"), &home_config);
}

// Local .env wins; dotenv never overwrites variables that are already set.
pub fn load_env_from_paths(local_env: &Path, default_config: &Path) {
    let _ = dotenv::from_filename(local_env);
    let _ = dotenv::from_filename(default_config);
}

/// Splits a comma separated value into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
