//! Error types shared by the scoring, diagnosis and recommendation modules.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Kpi;

#[derive(Debug, Error)]
pub enum Error {
    /// Reading an input or config file failed.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metrics input is not valid JSON.
    #[error("invalid metrics JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file is not valid TOML or has unknown keys.
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A metric key holds something other than a number.
    #[error("invalid metric {key:?}: {reason}")]
    InvalidMetric { key: String, reason: String },

    /// Weight table or thresholds violate an invariant.
    #[error("configuration error: {0}")]
    Config(String),

    /// A scorer produced NaN or an infinite value.
    #[error("{kpi} produced a non-finite value for {component}")]
    NonFinite { kpi: Kpi, component: &'static str },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
