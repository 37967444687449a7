//!
//! Bounded sampling of FASTA sequences into a staging directory
//!
use crate::fasta::{FastaReader, FastaRecord};
use crate::trainer::{self, TrainError};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

///
/// Pipeline parameters, passed in plainly by the caller.
///
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// number of sequences to sample for training
    pub n_seqs: usize,
    /// dictionary size ceiling in bytes
    pub max_dict: usize,
    /// destination of the trained dictionary
    pub dict_path: PathBuf,
}

///
/// Outcome of one pipeline run.
///
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    /// how many sequences were staged
    pub n_staged: usize,
    /// whether the external trainer was invoked
    pub trained: bool,
}

///
/// Write up to `n_seqs` sequence bodies into `dir`, one file per record
/// named by its zero-based arrival index. Titles are discarded here.
///
/// Stops pulling records from the decoder as soon as the limit is
/// reached; a decode or write failure aborts the whole pass.
///
pub fn stage_sequences<I>(records: I, n_seqs: usize, dir: &Path) -> io::Result<usize>
where
    I: IntoIterator<Item = io::Result<FastaRecord>>,
{
    let mut n_staged = 0;
    for (i, record) in records.into_iter().take(n_seqs).enumerate() {
        let record = record?;
        let mut file = File::create(dir.join(i.to_string()))?;
        file.write_all(&record.seq)?;
        debug!("staged sequence {} ({} bases)", i, record.seq.len());
        n_staged += 1;
    }
    Ok(n_staged)
}

///
/// Run the whole pipeline: stage up to `config.n_seqs` sequences from
/// `input` into a temporary staging directory, then train a Zstd
/// dictionary from them. The staging directory lives for exactly one
/// run and is removed when the run ends, on success and failure alike.
///
/// If the input holds no records at all the trainer is not invoked and
/// the run succeeds with a zero count.
///
pub fn run<R: BufRead>(input: R, config: &TrainConfig) -> Result<TrainReport, TrainError> {
    let staging = tempfile::Builder::new().prefix("fastadict").tempdir()?;
    info!(
        "reading {} FASTA sequences and saving to {:?} for Zstd dictionary training",
        config.n_seqs,
        staging.path()
    );
    let n_staged = stage_sequences(FastaReader::new(input), config.n_seqs, staging.path())?;
    if n_staged == 0 {
        warn!("no sequences staged, skipping dictionary training");
        return Ok(TrainReport {
            n_staged: 0,
            trained: false,
        });
    }
    trainer::train(staging.path(), config.max_dict, &config.dict_path)?;
    Ok(TrainReport {
        n_staged,
        trained: true,
    })
}

//
// tests
//
