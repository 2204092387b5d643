use std::{ffi::OsString, fs::File, io::Read, path::{Path, PathBuf}};

use tracing::debug;

use super::error::ConfigResult;

pub const CONFIG_FILE: &str = "config.toml";

fn home_var() -> Option<OsString> {
    #[cfg(unix)]
    let path = std::env::var_os("HOME");
    #[cfg(windows)]
    let path = std::env::var_os("APPDATA");
    #[cfg(not(any(unix, windows)))]
    let path = None;

    path
}

/// Per-user application directory under the given home, e.g. `~/.config/uniportal`.
pub fn app_dir_in(home: &Path) -> PathBuf {
    let mut path = PathBuf::from(home);

    if cfg!(unix) {
        path = path.join(".config");
    }

    path.join(crate::APPLICATION_NAME)
}

/// Directory holding both `config.toml` and the persisted session.
pub fn app_dir(use_local: bool) -> PathBuf {
    if use_local {
        return PathBuf::from(".");
    }

    match home_var() {
        Some(home) => app_dir_in(Path::new(&home)),
        None => PathBuf::from("."),
    }
}

pub fn find_config_file(use_local: bool) -> PathBuf {
    if use_local {
        return PathBuf::from("./").join(CONFIG_FILE);
    }

    if let Some(home) = home_var() {
        let path = app_dir_in(Path::new(&home)).join(CONFIG_FILE);

        if path.exists() {
            return path;
        }
    }

    PathBuf::from("./").join(CONFIG_FILE)
}

pub fn read_config(filename: &Path) -> ConfigResult<Vec<u8>> {
    tracing::trace!("looking for config at: {}", filename.display());
    if !filename.exists() {
        return Err(crate::config::error::ConfigError::ConfigNotFound);
    }

    let filename = filename.canonicalize()?;
    debug!("using {} as configuration file", filename.display());

    let mut fd = File::open(filename)?;
    let mut buf = Vec::new();
    fd.read_to_end(&mut buf)?;

    Ok(buf)
}

#[cfg(test)]
mod test {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_find_config_file_local() {
        let path = find_config_file(true);
        assert_eq!(path, PathBuf::from("./config.toml"));
    }

    #[test]
    fn test_app_dir_in_home() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = app_dir_in(temp_dir.path());

        #[cfg(unix)]
        assert_eq!(dir, temp_dir.path().join(".config").join("uniportal"));
        #[cfg(windows)]
        assert_eq!(dir, temp_dir.path().join("uniportal"));
    }

    #[test]
    fn test_read_config_success() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("config.toml");
        fs::write(&file_path, b"foo = 'bar'").unwrap();

        let result = read_config(&file_path);

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), b"foo = 'bar'");
    }

    #[test]
    fn test_read_config_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = read_config(&temp_dir.path().join("nope.toml"));

        assert!(matches!(result, Err(crate::ConfigError::ConfigNotFound)));
    }
}
