// src/batch.rs

//! Batch driver: resolve, load, emit, append, one argument at a time.
//!
//! A bad input never stops the batch. Path, read and parse failures are logged, recorded in
//! the [`BatchReport`] and the next argument is processed. Only a failing output stream ends
//! the batch early.

use crate::config::{BatchOptions, MalformedPolicy};
use crate::emit::{derive_identifier, Emitter};
use crate::error::ConvertError;
use crate::loader::load_map_with;
use crate::model::TileMap;
use crate::source::{ByteSource, CurrentDirResolver, FileSource, PathResolver};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// An argument that produced no block, and why.
#[derive(Debug)]
pub struct SkippedInput {
    /// Argument as given
    pub path: PathBuf,
    /// Why it was skipped
    pub error: ConvertError,
}

/// Outcome of every argument a batch has seen so far.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Identifiers of the blocks written, in output order.
    pub appended: Vec<String>,
    /// Arguments that produced no block, in input order.
    pub skipped: Vec<SkippedInput>,
}

/// Everything one conversion run shares across its inputs.
pub struct Batch<W, R = CurrentDirResolver, S = FileSource> {
    out: W,
    resolver: R,
    source: S,
    emitter: Emitter,
    malformed: MalformedPolicy,
    report: BatchReport,
}

impl<W: Write> Batch<W> {
    /// Batch reading from the local filesystem.
    pub fn new(out: W, options: BatchOptions) -> Self {
        Self::with_collaborators(out, CurrentDirResolver, FileSource, options)
    }
}

impl<W: Write, R: PathResolver, S: ByteSource> Batch<W, R, S> {
    /// Batch with custom path resolution and document access.
    pub fn with_collaborators(out: W, resolver: R, source: S, options: BatchOptions) -> Self {
        Self {
            out,
            resolver,
            source,
            emitter: Emitter::new(&options.attributes),
            malformed: options.malformed,
            report: BatchReport::default(),
        }
    }

    /// Process every argument in order.
    pub fn run<I, P>(&mut self, args: I) -> Result<(), ConvertError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for arg in args {
            self.process(arg.as_ref())?;
        }
        Ok(())
    }

    /// Convert one argument and append its block.
    ///
    /// Returns `Ok(false)` when the argument was skipped. `Err` only for output failures.
    pub fn process(&mut self, arg: &Path) -> Result<bool, ConvertError> {
        let (identifier, block) = match self.convert(arg) {
            Ok(converted) => converted,
            Err(error) => {
                warn!(path = %arg.display(), %error, "skipping input");
                self.report.skipped.push(SkippedInput {
                    path: arg.to_path_buf(),
                    error,
                });
                return Ok(false);
            }
        };

        self.out.write_all(&block).map_err(ConvertError::Write)?;
        self.out.flush().map_err(ConvertError::Write)?;

        info!(path = %arg.display(), %identifier, "appended definitions");
        self.report.appended.push(identifier);
        Ok(true)
    }

    fn convert(&self, arg: &Path) -> Result<(String, Vec<u8>), ConvertError> {
        let path = self
            .resolver
            .resolve(arg)
            .map_err(|source| ConvertError::PathResolution {
                path: arg.to_path_buf(),
                source,
            })?;
        debug!(arg = %arg.display(), path = %path.display(), "resolved input");

        let map = match load_map_with(&self.source, &path) {
            Ok(map) => map,
            Err(error) if error.is_malformed() && self.malformed == MalformedPolicy::Absorb => {
                warn!(%error, "converting malformed document as an empty map");
                TileMap::default()
            }
            Err(error) => return Err(error),
        };

        let identifier = derive_identifier(&path);
        let block = self.emitter.emit(&map, &identifier);
        Ok((identifier, block))
    }

    /// Progress so far.
    pub fn report(&self) -> &BatchReport {
        &self.report
    }

    /// Flush the output and hand it back with the report.
    pub fn finish(mut self) -> Result<(W, BatchReport), ConvertError> {
        self.out.flush().map_err(ConvertError::Write)?;
        info!(
            appended = self.report.appended.len(),
            skipped = self.report.skipped.len(),
            "batch finished"
        );
        Ok((self.out, self.report))
    }
}
