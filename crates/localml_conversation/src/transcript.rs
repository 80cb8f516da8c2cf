use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use localml_core::Message;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Failed to access the transcript file: {0}.")]
    Io(#[from] io::Error),

    #[error("Invalid transcript: {0}.")]
    Json(#[from] serde_json::Error),
}

/// Writes `messages` as a pretty-printed JSON array.
pub fn save(path: &Path, messages: &[Message]) -> Result<(), TranscriptError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, messages)?;
    writer.flush()?;
    Ok(())
}

pub fn load(path: &Path) -> Result<Vec<Message>, TranscriptError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
