use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;

use crate::draw::{
    MissingParentDirSnafu, OpeningConfigSnafu, ParsingConfigSnafu, RaffleResult,
};

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawConfig {
    #[serde(rename = "winnerCount")]
    pub winner_count: Option<JSValue>,
    #[serde(rename = "participantCount")]
    pub participant_count: Option<JSValue>,
    #[serde(rename = "participantFile")]
    pub participant_file: Option<String>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
}

impl DrawConfig {
    pub fn winner_count_text(&self) -> Option<String> {
        read_js_text(&self.winner_count)
    }

    pub fn participant_count_text(&self) -> Option<String> {
        read_js_text(&self.participant_count)
    }
}

/// A configuration, along with the directory that relative paths refer to.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LoadedConfig {
    pub config: DrawConfig,
    pub root: PathBuf,
}

impl LoadedConfig {
    pub fn participant_file_path(&self) -> Option<String> {
        self.config
            .participant_file
            .as_ref()
            .map(|p| self.root.join(p).display().to_string())
    }

    pub fn output_file_path(&self) -> Option<String> {
        match self.config.output_file.as_deref() {
            None => None,
            Some("stdout") => Some("stdout".to_string()),
            Some(p) => Some(self.root.join(p).display().to_string()),
        }
    }
}

pub fn read_config(path: &str) -> RaffleResult<LoadedConfig> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    let config: DrawConfig =
        serde_json::from_str(contents.as_str()).context(ParsingConfigSnafu { path })?;
    debug!("read_config: {:?}", config);
    let root = Path::new(path)
        .parent()
        .context(MissingParentDirSnafu { path })?
        .to_path_buf();
    Ok(LoadedConfig { config, root })
}

// Numbers and strings are both accepted. Anything else is passed on as text and left to the
// validation of the draw.
fn read_js_text(x: &Option<JSValue>) -> Option<String> {
    match x {
        None | Some(JSValue::Null) => None,
        Some(JSValue::String(s)) => Some(s.clone()),
        Some(v) => Some(v.to_string()),
    }
}
