//! Where softwrap keeps its files
//!
//! - `$XDG_CONFIG_HOME/softwrap/` when the variable is set (any platform)
//! - otherwise `~/.config/softwrap/` on Unix/macOS, `%APPDATA%\softwrap\` on Windows

use std::io;
use std::path::PathBuf;

const APP_DIR: &str = "softwrap";

/// Base directory for config and logs
pub fn config_dir() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) if !xdg.is_empty() => Some(PathBuf::from(xdg)),
        _ if cfg!(target_os = "windows") => dirs::config_dir(),
        _ => dirs::home_dir().map(|home| home.join(".config")),
    };
    base.map(|base| base.join(APP_DIR))
}

/// Layout config file (`config.yaml`)
pub fn config_file() -> Option<PathBuf> {
    Some(config_dir()?.join("config.yaml"))
}

/// Directory for the rolling log files
pub fn logs_dir() -> Option<PathBuf> {
    Some(config_dir()?.join("logs"))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let logs = logs_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory available"))?;
    std::fs::create_dir_all(&logs)?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_nest_under_app_dir() {
        let Some(dir) = config_dir() else {
            return;
        };
        assert!(dir.ends_with(APP_DIR));
        assert_eq!(config_file(), Some(dir.join("config.yaml")));
        assert_eq!(logs_dir(), Some(dir.join("logs")));
    }
}
