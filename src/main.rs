use clap::Parser;
use fastadict::sampler::{self, TrainConfig};
use log::{debug, error, info};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

/// Train a Zstd dictionary from FASTA sequences.
///
/// Only the sequences themselves are used for training; titles are
/// discarded. Example usage:
///
///     $ zcat sequences.fasta.gz | fastadict -o zstd_dictionary
#[derive(Parser, Debug)]
#[clap(about, version)]
struct Opts {
    /// Zstd dictionary output path
    #[clap(short = 'o', long, default_value = "zstd_dictionary")]
    zstddict: PathBuf,
    /// Number of sequences to train Zstd dictionary with
    #[clap(short = 'n', long, default_value_t = 1000)]
    n_seqs: usize,
    /// Limit Zstd dictionary to specified size in bytes
    #[clap(long, default_value_t = 112640)]
    maxdict: usize,
    /// Enable debug logging
    #[clap(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn main() {
    let opts: Opts = Opts::parse();
    init_logging(opts.verbose);
    debug!("opts={:?}", opts);

    let stdin = io::stdin();
    if stdin.is_terminal() {
        error!(
            "FASTA sequences need to be piped into this program via stdin. \
             Example usage: $ xzcat sequences.fasta.xz | fastadict"
        );
        std::process::exit(1);
    }

    let config = TrainConfig {
        n_seqs: opts.n_seqs,
        max_dict: opts.maxdict,
        dict_path: opts.zstddict.clone(),
    };
    match sampler::run(stdin.lock(), &config) {
        Ok(report) if report.trained => {
            info!("done! Zstd dictionary at {:?}", opts.zstddict);
        }
        Ok(report) => {
            info!("no dictionary trained ({} sequences staged)", report.n_staged);
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
