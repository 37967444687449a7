//!
//! Boundary to the external `zstd --train` collaborator
//!
use log::info;
use std::fmt;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

///
/// Error of a training run: a local I/O failure, or a non-success exit
/// of the external trainer surfaced verbatim.
///
#[derive(Debug)]
pub enum TrainError {
    Io(io::Error),
    Trainer(ExitStatus),
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrainError::Io(e) => write!(f, "io error: {}", e),
            TrainError::Trainer(status) => write!(f, "zstd training failed: {}", status),
        }
    }
}

impl std::error::Error for TrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrainError::Io(e) => Some(e),
            TrainError::Trainer(_) => None,
        }
    }
}

impl From<io::Error> for TrainError {
    fn from(e: io::Error) -> Self {
        TrainError::Io(e)
    }
}

/// the `zstd --train` invocation over every staged file under
/// `staging_dir`
pub fn train_command(staging_dir: &Path, max_dict: usize, dict_path: &Path) -> Command {
    let mut command = Command::new("zstd");
    command
        .arg("--train")
        .arg("--maxdict")
        .arg(max_dict.to_string())
        .arg("-o")
        .arg(dict_path)
        .arg("-r")
        .arg(staging_dir);
    command
}

///
/// Train a Zstd dictionary from the staged sequences, blocking until
/// the trainer terminates. Its exit status is the sole success
/// indicator.
///
pub fn train(staging_dir: &Path, max_dict: usize, dict_path: &Path) -> Result<(), TrainError> {
    let mut command = train_command(staging_dir, max_dict, dict_path);
    info!("running Zstd training with command: {:?}", command);
    let status = command.status()?;
    if !status.success() {
        return Err(TrainError::Trainer(status));
    }
    Ok(())
}

//
// tests
//
