use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected document shape in {path}: expected {expected}")]
    UnexpectedShape { path: String, expected: &'static str },

    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl IndexError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn parse(path: &std::path::Path, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            source,
        }
    }
}
