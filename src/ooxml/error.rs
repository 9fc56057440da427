/// Error types for OOXML generation.
use thiserror::Error;

/// Result type for OOXML generation.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML generation.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// OPC package error
    #[error("OPC error: {0}")]
    Opc(#[from] crate::ooxml::opc::error::OpcError),

    /// A chart descriptor names no known chart type and carries no raw tree
    #[error("Unsupported chart type: {0}")]
    UnsupportedChartType(String),

    /// Chart series data is inconsistent
    #[error("Invalid chart data: {0}")]
    InvalidChartData(String),

    /// Image dimensions could not be determined
    #[error("Image error: {0}")]
    Image(String),

    /// Invalid argument passed to an authoring call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A registered extension failed during a generate hook
    #[error("Extension '{name}' failed: {source}")]
    Extension {
        name: String,
        #[source]
        source: Box<OoxmlError>,
    },

    /// A part producer failed
    #[error("Failed to produce part {part}: {source}")]
    Producer {
        part: String,
        #[source]
        source: Box<OoxmlError>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Formatting error while building XML text
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

impl OoxmlError {
    /// The innermost error, looking through producer and extension wrappers.
    pub fn root_cause(&self) -> &OoxmlError {
        match self {
            OoxmlError::Producer { source, .. } | OoxmlError::Extension { source, .. } => {
                source.root_cause()
            },
            other => other,
        }
    }
}

impl From<zip::result::ZipError> for OoxmlError {
    fn from(err: zip::result::ZipError) -> Self {
        OoxmlError::Opc(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_producer() {
        let err = OoxmlError::Producer {
            part: "/ppt/charts/chart1.xml".to_string(),
            source: Box::new(OoxmlError::UnsupportedChartType("radar".to_string())),
        };
        assert!(matches!(err.root_cause(), OoxmlError::UnsupportedChartType(t) if t == "radar"));
        assert!(err.to_string().contains("/ppt/charts/chart1.xml"));
    }
}
