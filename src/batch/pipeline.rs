// src/batch/pipeline.rs

//! CSV batch pipeline: read rows, price each one, write results in input order.
//!
//! A row that cannot be parsed or fails validation never aborts the run. It is
//! logged at `warn` level and written with empty result cells, so the output
//! always has exactly one row per input row.

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use super::types::{
    BatchOutput, BatchRecord, BatchSummary, RawRow, RowError, GREEK_COLUMNS, INPUT_COLUMNS,
    PRICE_COLUMN,
};
use crate::config::BatchConfig;
use crate::models::traits::PricingModel;
use crate::types::PricingResult;

/// Read the data rows of a batch input.
///
/// The header must name every column in [`INPUT_COLUMNS`] (any order, case
/// insensitive). Fields are trimmed and whitespace-only lines are skipped.
/// Invalid UTF-8 in a cell is replaced with U+FFFD; only I/O failures abort.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.byte_headers().context("cannot read CSV header")?.clone();
    let mut index = [0usize; 6];
    for (slot, column) in index.iter_mut().zip(INPUT_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column.as_bytes()))
            .with_context(|| {
                format!(
                    "input header is missing column '{}' (expected {})",
                    column,
                    INPUT_COLUMNS.join(",")
                )
            })?;
    }

    let mut rows = Vec::new();
    // Cells are decoded lossily: a row with bad bytes still gets its own
    // output line and fails later, at parse time, like any other bad row.
    for record in rdr.byte_records() {
        let record = record.context("cannot read CSV record")?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let cell = |i: usize| {
            record
                .get(index[i])
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .unwrap_or_default()
        };
        rows.push(RawRow {
            row_number: rows.len() + 1,
            option_type: cell(0),
            spot: cell(1),
            strike: cell(2),
            rate: cell(3),
            vol: cell(4),
            maturity: cell(5),
        });
    }

    if rows.is_empty() {
        bail!("input file is empty or contains no data rows");
    }
    debug!("read {} batch rows", rows.len());
    Ok(rows)
}

/// Price one raw row end to end.
pub fn price_raw_row<M: PricingModel + ?Sized>(
    model: &M,
    row: &RawRow,
    with_greeks: bool,
) -> std::result::Result<PricingResult, RowError> {
    let (option, market) = row.parse()?.to_inputs()?;
    Ok(model.evaluate(&option, &market, with_greeks))
}

/// Price every row sequentially, keeping input order.
pub fn process_rows<M: PricingModel + ?Sized>(
    model: &M,
    rows: &[RawRow],
    config: &BatchConfig,
) -> BatchOutput {
    let records = rows
        .iter()
        .map(|row| {
            let result = match price_raw_row(model, row, config.with_greeks) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!(row = row.row_number, "skipping batch row: {}", e);
                    None
                }
            };
            BatchRecord {
                row: row.clone(),
                result,
            }
        })
        .collect();

    BatchOutput { records }
}

/// Write the output table: input columns, `price`, then the Greeks when
/// `config.with_greeks` is set. Skipped rows get empty result cells.
pub fn write_results<W: Write>(writer: W, output: &BatchOutput, config: &BatchConfig) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = INPUT_COLUMNS.to_vec();
    header.push(PRICE_COLUMN);
    if config.with_greeks {
        header.extend(GREEK_COLUMNS);
    }
    wtr.write_record(&header)?;

    let fmt = |v: f64| format_value(v, config.precision);
    for record in &output.records {
        let mut fields: Vec<String> = record.row.cells().iter().map(|c| c.to_string()).collect();

        match &record.result {
            Some(result) => {
                fields.push(fmt(result.price()));
                if config.with_greeks {
                    match result.greeks() {
                        Some(g) => fields.extend(
                            [g.delta, g.gamma, g.vega, g.theta, g.rho].into_iter().map(fmt),
                        ),
                        None => fields.extend(GREEK_COLUMNS.iter().map(|_| String::new())),
                    }
                }
            }
            None => {
                let width = if config.with_greeks { 1 + GREEK_COLUMNS.len() } else { 1 };
                fields.extend(std::iter::repeat(String::new()).take(width));
            }
        }
        wtr.write_record(&fields)?;
    }

    wtr.flush().context("cannot flush CSV output")?;
    Ok(())
}

/// Read `input`, price every row with `model`, and write the table to `output`.
pub fn run_batch<M: PricingModel + ?Sized>(
    model: &M,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &BatchConfig,
) -> Result<BatchSummary> {
    let input = input.as_ref();
    let output = output.as_ref();

    let file = File::open(input)
        .with_context(|| format!("cannot open input file: {}", input.display()))?;
    let rows = read_rows(file).with_context(|| format!("in {}", input.display()))?;

    info!(
        model = model.name(),
        rows = rows.len(),
        with_greeks = config.with_greeks,
        "pricing batch"
    );
    let priced = process_rows(model, &rows, config);

    let out = File::create(output)
        .with_context(|| format!("cannot open output file: {}", output.display()))?;
    write_results(out, &priced, config)?;

    let summary = priced.summary();
    info!(
        total = summary.total,
        priced = summary.priced,
        skipped = summary.skipped,
        "batch written to {}",
        output.display()
    );
    Ok(summary)
}

/// Fixed-point rendering; negative zero prints as zero.
fn format_value(v: f64, precision: usize) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{:.*}", precision, v)
}
