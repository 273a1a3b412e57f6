//! Recorded stream files on disk.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::{debug, info, warn};

use super::dto::StreamLine;
use crate::domain::id::MarketId;
use crate::domain::stream::{DeltaChangeRecord, MarketDefinition};
use crate::error::{HistoryError, Result};
use crate::port::outbound::history::{HistoricalLogSource, HistoricalMarket};

const REPLAYABLE_MARKET_TYPE: &str = "WIN";

/// A line-delimited JSON stream file, plain or gzip-compressed (`.gz`).
///
/// Unparsable lines are skipped. A truncated compressed file yields the
/// records before the damage.
#[derive(Debug)]
pub struct HistoricalLogFile {
    path: PathBuf,
    market: HistoricalMarket,
    records: std::vec::IntoIter<DeltaChangeRecord>,
}

impl HistoricalLogFile {
    /// Read and index a stream file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened, or a
    /// [`HistoryError`] if it holds no records, no market definition, or a
    /// market other than `WIN`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let reader: Box<dyn Read> = if is_gzip(&path) {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        let records = read_records(&path, BufReader::new(reader));
        let market = header(&path, &records)?;

        info!(
            path = %path.display(),
            market_id = %market.market_id,
            records = records.len(),
            runners = market.runners.len(),
            "Loaded historical log"
        );
        Ok(Self {
            path,
            market,
            records: records.into_iter(),
        })
    }

    /// File the log was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl HistoricalLogSource for HistoricalLogFile {
    fn market(&self) -> &HistoricalMarket {
        &self.market
    }

    fn next_record(&mut self) -> Option<DeltaChangeRecord> {
        self.records.next()
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

fn read_records(path: &Path, reader: impl BufRead) -> Vec<DeltaChangeRecord> {
    let mut records = Vec::new();
    let mut skipped = 0_usize;
    for (number, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(path = %path.display(), line = number + 1, error = %err, "Log read stopped");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<StreamLine>(&line) {
            Ok(parsed) => records.extend(parsed.to_record()),
            Err(err) => {
                skipped += 1;
                debug!(line = number + 1, error = %err, "Skipping unparsable line");
            }
        }
    }
    if skipped > 0 {
        warn!(path = %path.display(), skipped, "Skipped unparsable log lines");
    }
    records
}

fn header(path: &Path, records: &[DeltaChangeRecord]) -> Result<HistoricalMarket> {
    let display = || path.display().to_string();
    let first = records
        .first()
        .ok_or_else(|| HistoryError::EmptyLog { path: display() })?;
    let definition = first
        .definition
        .as_ref()
        .ok_or_else(|| HistoryError::MissingDefinition { path: display() })?;

    let market_type = definition.market_type.clone().unwrap_or_default();
    if market_type != REPLAYABLE_MARKET_TYPE {
        return Err(HistoryError::UnsupportedMarketType { market_type }.into());
    }
    let start_time = definition
        .market_time
        .ok_or_else(|| HistoryError::MissingDefinition { path: display() })?;

    let market_id = first.market_id.clone().unwrap_or_else(|| {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unknown");
        MarketId::new(name.trim_end_matches(".gz").trim_end_matches(".json"))
    });

    let winner = records
        .iter()
        .rev()
        .find_map(|record| record.definition.as_ref())
        .and_then(MarketDefinition::winner);

    Ok(HistoricalMarket {
        market_id,
        market_type,
        start_time,
        country_code: definition.country_code.clone(),
        runners: definition.runners.clone(),
        winner,
    })
}
