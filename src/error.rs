use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordFrequencyError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error reading text: {0}")]
    Read(#[from] io::Error),
    #[error("max load factor must be finite and at least 0.01, got {0}")]
    InvalidLoadFactor(f32),
    #[error("room for {0} entries needs more buckets than a table may allocate")]
    TooManyBuckets(usize),
}
