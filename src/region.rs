use crate::error::ExonMapError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Genomic orientation of a transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl Strand {
    pub fn from_symbol(symbol: &str) -> Result<Self, ExonMapError> {
        match symbol {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            other => Err(ExonMapError::MalformedEncoding(format!(
                "strand must be '+' or '-', got '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for Strand {
    type Error = ExonMapError;

    fn try_from(symbol: String) -> Result<Self, Self::Error> {
        Strand::from_symbol(&symbol)
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// A named half-open genomic interval, 0-based.
///
/// `size` is derived once at construction; fields are never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Region {
    name: String,
    chrom: String,
    start: u64,
    end: u64,
    size: u64,
}

impl Region {
    /// Fails with `MalformedEncoding` when `end < start`.
    pub fn new(
        name: impl Into<String>,
        chrom: impl Into<String>,
        start: u64,
        end: u64,
    ) -> Result<Self, ExonMapError> {
        let name = name.into();
        let chrom = chrom.into();
        if end < start {
            return Err(ExonMapError::MalformedEncoding(format!(
                "region '{name}' on {chrom} ends at {end}, before its start {start}"
            )));
        }
        Ok(Self {
            name,
            chrom,
            start,
            end,
            size: end - start,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}-{} ({}bp)",
            self.chrom, self.start, self.end, self.size
        )
    }
}
