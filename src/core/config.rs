use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{Result, YueziError};
use crate::{
    DEFAULT_CACHE_SIZE, DEFAULT_ENCODER_MODEL, DEFAULT_ENCODER_TIMEOUT_MS, DEFAULT_EXPANSION_TOPN,
    DEFAULT_PORT, DEFAULT_SENTENCE_VECTOR_DIMS,
};

const ENV_PREFIX: &str = "YUEZI";


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {

    pub host: String,
    pub port: u16,


    pub data_dir: PathBuf,
    pub brands_file: String,
    pub service_types_file: String,
    pub attributes_file: String,
    pub areas_file: String,
    pub custom_words_path: PathBuf,


    pub word_vectors_path: PathBuf,
    pub expansion_topn: usize,


    pub encoder_url: Option<String>,
    pub encoder_model: String,
    pub encoder_timeout_ms: u64,
    pub encoder_startup_timeout_secs: u64,
    pub sentence_vector_dims: usize,
    pub vector_cache_size: usize,
}

impl ParserConfig {

    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,

            data_dir: PathBuf::from("./data"),
            brands_file: "brands.txt".to_string(),
            service_types_file: "service_types.txt".to_string(),
            attributes_file: "attributes.txt".to_string(),
            areas_file: "areas.txt".to_string(),
            custom_words_path: PathBuf::from("custom_words.txt"),

            word_vectors_path: PathBuf::from("models/chinese-w2v.txt"),
            expansion_topn: DEFAULT_EXPANSION_TOPN,

            encoder_url: None,
            encoder_model: DEFAULT_ENCODER_MODEL.to_string(),
            encoder_timeout_ms: DEFAULT_ENCODER_TIMEOUT_MS,
            encoder_startup_timeout_secs: 60,
            sentence_vector_dims: DEFAULT_SENTENCE_VECTOR_DIMS,
            vector_cache_size: DEFAULT_CACHE_SIZE,
        }
    }


    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn brands_path(&self) -> PathBuf {
        self.data_dir.join(&self.brands_file)
    }

    pub fn service_types_path(&self) -> PathBuf {
        self.data_dir.join(&self.service_types_file)
    }

    pub fn attributes_path(&self) -> PathBuf {
        self.data_dir.join(&self.attributes_file)
    }

    pub fn areas_path(&self) -> PathBuf {
        self.data_dir.join(&self.areas_file)
    }


    /// Defaults, then `config/yuezi.*` if present, then `YUEZI_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Layers an optional config file and then `YUEZI_*` environment variables over the defaults.
    ///
    /// Variable names are the field names upper-cased, e.g. `YUEZI_WORD_VECTORS_PATH`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Same as [`ParserConfig::load`], reading variables from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(path: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .map_err(|e| YueziError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);
        builder = match path {
            Some(p) => builder.add_source(config::File::from(p)),
            None => builder.add_source(config::File::with_name("config/yuezi").required(false)),
        };
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        );

        let mut loaded: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| YueziError::Config(e.to_string()))?;

        if loaded.encoder_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            loaded.encoder_url = None;
        }

        loaded.validate()?;
        Ok(loaded)
    }


    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(YueziError::Config("port must be non-zero".to_string()));
        }
        if self.encoder_timeout_ms == 0 {
            return Err(YueziError::Config("encoder_timeout_ms must be non-zero".to_string()));
        }
        if self.sentence_vector_dims == 0 {
            return Err(YueziError::Config(
                "sentence_vector_dims must be at least 1".to_string(),
            ));
        }
        if let Some(raw) = &self.encoder_url {
            let parsed = url::Url::parse(raw)
                .map_err(|e| YueziError::Config(format!("invalid encoder_url '{raw}': {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(YueziError::Config(format!(
                    "encoder_url must be http(s), got '{}'",
                    parsed.scheme()
                )));
            }
        }
        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", DEFAULT_PORT)
    }
}
