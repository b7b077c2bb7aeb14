use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ConfigFile {
    pub result: Option<String>,
    #[serde(alias = "init_prefix")]
    pub init: Option<String>,
    #[serde(alias = "out_prefix")]
    pub out: Option<String>,
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    pub size: Option<String>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub title: Option<String>,
    pub page_length: Option<usize>,
    pub no_color: Option<bool>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".mopoviz").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn parse_config(contents: &str) -> Result<ConfigFile> {
    Ok(serde_yaml::from_str::<ConfigFile>(contents)?)
}

pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents).map_err(|e| {
            Error::Config(format!("failed to parse config '{}': {e}", path.display()))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::Config(format!(
            "config file not found '{}'",
            path.display()
        ))),
        Err(e) => Err(Error::io(path, e)),
    }
}

pub(crate) fn default_config_yaml() -> String {
    r#"# mopoviz config
#
# Location (default):
#   ~/.mopoviz/config.yml

# Input (choose one)
# result: ./result.json
# init: ./run/init
# out: ./run/out

# Chart axes and bubble size: efficiency, coverage or matching-bias
# x_axis: efficiency
# y_axis: coverage
# size: matching-bias

# Output (optional, defaults to stdout as html)
# output: ./report.html
# output_format: html
# title: Primer pairs

# Tables
page_length: 50

# Console styling
no_color: false
"#
    .to_string()
}

pub fn ensure_default_config_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    let parent = path
        .parent()
        .ok_or_else(|| Error::Config(format!("invalid config path '{}'", path.display())))?;
    std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    std::fs::write(path, default_config_yaml()).map_err(|e| Error::io(path, e))?;
    Ok(())
}
