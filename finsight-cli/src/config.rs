use anyhow::{Context, Result};
use chrono_tz::Tz;
use finsight_assistant::SpeechSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::{ensure_finsight_home, finsight_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub locale: LocaleSection,
    #[serde(default)]
    pub speech: SpeechSettings,
    #[serde(default)]
    pub ocr: OcrSection,
    #[serde(default)]
    pub data: DataSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleSection {
    /// IANA timezone used to decide what "today" is
    pub timezone: String,
}

impl Default for LocaleSection {
    fn default() -> Self {
        Self {
            timezone: "Asia/Kolkata".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrSection {
    /// Tesseract language pack
    pub lang: String,
}

impl Default for OcrSection {
    fn default() -> Self {
        Self {
            lang: "eng".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSection {
    /// JSON snapshot to load instead of the demo data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,
}

impl Config {
    pub fn timezone(&self) -> Result<Tz> {
        finsight_core::time::parse_tz(&self.locale.timezone)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(finsight_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    cfg.timezone()
        .with_context(|| format!("locale.timezone in {}", p.display()))?;
    Ok(cfg)
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_finsight_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(&Config::default())?;
    println!("Wrote {}", written.display());
    Ok(())
}
