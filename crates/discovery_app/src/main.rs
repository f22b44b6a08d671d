mod host;

use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(host::DEFAULT_CONFIG_PATH));
    host::run_app(&config_path)
}
