use std::path::PathBuf;

use thiserror::Error;

use crate::model::{Collection, ScoreField};

/// A type alias for `Result<T, mopoviz::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{collection} collection is empty, cannot derive score bounds")]
    EmptyCollection { collection: Collection },

    #[error("{field} has no spread in the {collection} collection (every record scores {value})")]
    DegenerateRange {
        collection: Collection,
        field: ScoreField,
        value: f64,
    },

    #[error("{field} spans {min} to {max} in the {collection} collection, too wide to rescale")]
    UnboundedRange {
        collection: Collection,
        field: ScoreField,
        min: f64,
        max: f64,
    },

    #[error("{field} of {collection} record {index} is not a finite number ({value})")]
    NonFiniteScore {
        collection: Collection,
        field: ScoreField,
        index: usize,
        value: f64,
    },

    #[error("{collection} collection already carries bubble sizes")]
    AlreadyNormalized { collection: Collection },

    #[error("record has no bubble sizes, normalize the result set first")]
    NotNormalized,

    #[error("score index {0} is not one of 2 (efficiency), 3 (coverage), 4 (matching-bias)")]
    UnknownScoreField(usize),

    #[error("unknown score name '{0}', expected efficiency, coverage or matching-bias")]
    UnknownScoreName(String),

    #[error("{0} is used more than once in the score selection")]
    DuplicateScoreField(ScoreField),

    #[error("{origin}:{line}: {message}")]
    Parse {
        origin: String,
        line: usize,
        message: String,
    },

    #[error("{0}")]
    Config(String),

    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(origin: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            origin: origin.into(),
            line,
            message: message.into(),
        }
    }
}
