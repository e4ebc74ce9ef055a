use crate::error::{DotutilsError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CONFIG_DIR: &str = ".config/dotutils";
pub const CONFIG_FILE: &str = "config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// `~/.config/dotutils/config.yaml`.
pub fn default_config_path() -> Result<PathBuf> {
    let home = home::home_dir().ok_or(DotutilsError::HomeNotFound)?;
    Ok(config_path(&home))
}

/// `<dir>/<stamp>.svg`, with spaces in the stamp replaced by underscores.
pub fn stamped_badge_path(dir: &Path, stamp: &str) -> PathBuf {
    dir.join(format!("{}.svg", stamp.replace(' ', "_")))
}
