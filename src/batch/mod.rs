// src/batch/mod.rs

use anyhow::{bail, Context, Result};
use glob::{glob, Pattern};
use std::{
    fmt,
    fs::{self, File, OpenOptions},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::error::ExtractError;
use crate::extract::{ExtractorConfig, TableExtractor};
use crate::table::write_csv;

/// Where to read pages from, where to put CSVs, and how to extract.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub extractor: ExtractorConfig,
    /// Replace an existing `bo6_data_<hash>.csv`. When false a name clash
    /// counts the file as failed.
    pub overwrite: bool,
}

impl BatchConfig {
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            extractor: ExtractorConfig::default(),
            overwrite: true,
        }
    }
}

/// Why one input file produced no CSV.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("reading {}: {}", .path.display(), .source)]
    Read { path: PathBuf, source: io::Error },

    #[error("writing {}: {}", .path.display(), .source)]
    Write { path: PathBuf, source: io::Error },

    #[error("writing CSV {}: {}", .path.display(), .source)]
    Csv { path: PathBuf, source: csv::Error },

    #[error("{} already exists", .path.display())]
    OutputExists { path: PathBuf },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl Tally {
    fn success(&mut self) {
        self.processed += 1;
        self.succeeded += 1;
    }

    fn failure(&mut self) {
        self.processed += 1;
        self.failed += 1;
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files processed, {} successfully, {} failed.",
            self.processed, self.succeeded, self.failed
        )
    }
}

/// Fail if the source directory is missing; create the output directory if needed.
pub fn prepare_dirs(config: &BatchConfig) -> Result<()> {
    if !config.source_dir.is_dir() {
        bail!(
            "Source directory '{}' does not exist.",
            config.source_dir.display()
        );
    }

    if !config.output_dir.exists() {
        info!(
            "Output directory '{}' does not exist. Creating it...",
            config.output_dir.display()
        );
        fs::create_dir_all(&config.output_dir)
            .with_context(|| format!("creating output directory {:?}", config.output_dir))?;
    }
    Ok(())
}

/// Regular files directly inside `dir` whose name ends in `.html`, sorted.
pub fn list_html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let dir_str = dir
        .to_str()
        .with_context(|| format!("source directory {:?} is not valid UTF-8", dir))?;
    let pattern = Path::new(&Pattern::escape(dir_str)).join("*.html");

    let mut files = Vec::new();
    for entry in glob(&pattern.to_string_lossy())? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Extract one page and write its table into `output_dir`. Returns the CSV path.
#[instrument(level = "debug", skip(extractor, path, output_dir), fields(file = %path.display()))]
pub fn process_file(
    extractor: &TableExtractor,
    path: &Path,
    output_dir: &Path,
    overwrite: bool,
) -> Result<PathBuf, FileError> {
    let bytes = fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let html = String::from_utf8_lossy(&bytes);

    let extracted = extractor.extract(&html)?;
    let out_path = output_dir.join(extracted.file_name());

    let file = open_output(&out_path, overwrite)?;
    write_csv(&extracted.table, BufWriter::new(file)).map_err(|source| FileError::Csv {
        path: out_path.clone(),
        source,
    })?;

    Ok(out_path)
}

fn open_output(path: &Path, overwrite: bool) -> Result<File, FileError> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        if path.exists() {
            warn!(output = %path.display(), "overwriting existing output");
        }
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    options.open(path).map_err(|source| {
        if source.kind() == io::ErrorKind::AlreadyExists {
            FileError::OutputExists {
                path: path.to_path_buf(),
            }
        } else {
            FileError::Write {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Process every `.html` file in the source directory, one at a time. A bad
/// file is logged and counted; it never stops the run.
pub fn run(config: &BatchConfig) -> Result<Tally> {
    let extractor = TableExtractor::new(config.extractor.clone());
    let files = list_html_files(&config.source_dir)?;
    info!(count = files.len(), "found html files");

    let mut tally = Tally::default();
    for path in files {
        info!("Processing {}...", path.display());
        match process_file(&extractor, &path, &config.output_dir, config.overwrite) {
            Ok(out_path) => {
                info!("File saved as: {}", out_path.display());
                tally.success();
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Skipping this file");
                tally.failure();
            }
        }
    }

    Ok(tally)
}
