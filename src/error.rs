use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ExonMapError {
    String(String),
    Io(std::io::Error),
    Serde(serde_json::Error),
    Http(reqwest::Error),
    /// Remote call completed but returned a non-success HTTP status.
    Fetch { url: String, status: u16 },
    /// The remote lookup resolved to a reference assembly we do not support.
    UnsupportedAssembly(String),
    /// No record in the fetched track data matches the versioned transcript id.
    TranscriptNotFound(String),
    /// An annotation record's chrom and thick bounds disagree where they must match.
    AnnotationIntegrity(String),
    /// Block-start/block-size encodings are unparsable or misaligned.
    MalformedEncoding(String),
}

impl Error for ExonMapError {}

impl fmt::Display for ExonMapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExonMapError::String(msg) => write!(f, "{msg}"),
            ExonMapError::Io(e) => write!(f, "I/O error: {e}"),
            ExonMapError::Serde(e) => write!(f, "JSON error: {e}"),
            ExonMapError::Http(e) => write!(f, "HTTP error: {e}"),
            ExonMapError::Fetch { url, status } => {
                write!(f, "Fetching '{url}' returned HTTP {status}")
            }
            ExonMapError::UnsupportedAssembly(assembly) => {
                write!(f, "Unsupported reference assembly '{assembly}'")
            }
            ExonMapError::TranscriptNotFound(id) => {
                write!(f, "Transcript '{id}' not found in fetched track data")
            }
            ExonMapError::AnnotationIntegrity(msg) => {
                write!(f, "Annotation integrity fault: {msg}")
            }
            ExonMapError::MalformedEncoding(msg) => {
                write!(f, "Malformed block encoding: {msg}")
            }
        }
    }
}

impl From<String> for ExonMapError {
    fn from(err: String) -> Self {
        ExonMapError::String(err)
    }
}

impl From<std::io::Error> for ExonMapError {
    fn from(err: std::io::Error) -> Self {
        ExonMapError::Io(err)
    }
}

impl From<serde_json::Error> for ExonMapError {
    fn from(err: serde_json::Error) -> Self {
        ExonMapError::Serde(err)
    }
}

impl From<reqwest::Error> for ExonMapError {
    fn from(err: reqwest::Error) -> Self {
        ExonMapError::Http(err)
    }
}
