use crate::error::{PkgbarError, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub fn config_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from("com", "pkgbar", "pkgbar")
        .ok_or_else(|| PkgbarError::Other("Could not determine config directory".to_string()))?;
    Ok(proj.config_dir().to_path_buf())
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("pkgbar.kdl"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_in_config_dir() {
        if let (Ok(dir), Ok(file)) = (config_dir(), config_file()) {
            assert_eq!(file.parent(), Some(dir.as_path()));
            assert_eq!(file.file_name().and_then(|n| n.to_str()), Some("pkgbar.kdl"));
        }
    }
}
