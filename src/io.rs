// Copyright (c) 2026, Chad Hogan
// All rights reserved.
//
// This source code is licensed under the BSD-3-Clause license found in the
// LICENSE file in the root directory of this source tree.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use ndarray::Array2;
use serde::Serialize;
use tracing::debug;

use crate::core::{
    FaultSource, GeoOrigin, ObservationGrid, Observations, Scenario, Slip, SourceKind,
};
use crate::error::{DislocError, Result};
use crate::scheduler::PointResult;

/// Number of columns in the `.npy` output.
pub const NPY_COLUMNS: usize = 10;

/// Whitespace-separated tokens tagged with their 1-based line numbers.
struct Tokens<'a> {
    tokens: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let tokens = text
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t)))
            .collect();
        Self { tokens, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }

    fn last_line(&self) -> usize {
        self.tokens.last().map_or(1, |&(line, _)| line)
    }

    fn next<T: FromStr>(&mut self, field: &str) -> Result<T> {
        let Some(&(line, token)) = self.tokens.get(self.pos) else {
            return Err(DislocError::Parse {
                line: self.last_line(),
                reason: format!("unexpected end of input, expected {}", field),
            });
        };
        self.pos += 1;
        token.parse().map_err(|_| DislocError::Parse {
            line,
            reason: format!("invalid {} '{}'", field, token),
        })
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or_else(|| self.last_line(), |&(line, _)| line)
    }
}

/// Parse a scenario in the `disloc` text format.
///
/// Layout: `lat lon genparm`, then either `count` and `count` pairs of `x y`
/// (`genparm = 0`) or `x0 xinc xnum y0 yinc ynum` (`genparm = 1`), then zero or
/// more source records `x y strike` / `type depth dip lambda mu u1 u2 u3 length width`.
///
/// # Errors
/// Returns [`DislocError::Parse`] with the offending line for malformed or
/// truncated input, and [`DislocError::UnknownSourceKind`] for a type code
/// other than 0 or 1.
pub fn parse_disloc(text: &str) -> Result<Scenario> {
    let mut tokens = Tokens::new(text);

    let origin = GeoOrigin {
        latitude: tokens.next("origin latitude")?,
        longitude: tokens.next("origin longitude")?,
    };

    let layout_line = tokens.line();
    let observations = match tokens.next::<i64>("genparm")? {
        0 => {
            let count: usize = tokens.next("point count")?;
            // The count is untrusted; never reserve more pairs than the input holds.
            let mut points = Vec::with_capacity(count.min(tokens.remaining() / 2));
            for _ in 0..count {
                points.push([tokens.next("point x")?, tokens.next("point y")?]);
            }
            Observations::Points { points }
        }
        1 => {
            let x0 = tokens.next("grid x0")?;
            let dx = tokens.next("grid xinc")?;
            let nx = tokens.next("grid xnum")?;
            let y0 = tokens.next("grid y0")?;
            let dy = tokens.next("grid yinc")?;
            let ny = tokens.next("grid ynum")?;
            Observations::Grid(ObservationGrid::new([x0, y0], [dx, dy], [nx, ny])?)
        }
        other => {
            return Err(DislocError::Parse {
                line: layout_line,
                reason: format!("genparm must be 0 or 1, got {}", other),
            })
        }
    };

    let mut sources = Vec::new();
    while !tokens.is_empty() {
        let origin = [tokens.next("source x")?, tokens.next("source y")?];
        let strike = tokens.next("strike")?;
        let kind = SourceKind::try_from(tokens.next::<i64>("source type")?)?;
        let depth = tokens.next("depth")?;
        let dip = tokens.next("dip")?;
        let lambda = tokens.next("lambda")?;
        let mu = tokens.next("mu")?;
        let slip = Slip::new(tokens.next("u1")?, tokens.next("u2")?, tokens.next("u3")?);
        let length = tokens.next("length")?;
        let width = tokens.next("width")?;
        sources.push(FaultSource {
            kind,
            origin,
            strike,
            depth,
            dip,
            lambda,
            mu,
            slip,
            length,
            width,
            name: None,
        });
    }

    debug!(
        points = observations.len(),
        sources = sources.len(),
        "parsed disloc input"
    );

    Ok(Scenario {
        origin,
        observations,
        sources,
    })
}

/// Supported scenario input formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputFormat {
    /// Whitespace-separated `disloc` text.
    Disloc,
    /// Serialized [`Scenario`].
    Json,
}

/// Supported result output formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    /// Fixed-width text table.
    Table,
    /// NumPy `.npy`, `N x 10` float64.
    Npy,
    /// Pretty-printed JSON report.
    Json,
}

/// Infer the input format from the extension. Anything that is not `.json` is read as text.
pub fn infer_input_format(path: &Path) -> Result<InputFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(InputFormat::Json),
        Some(ext @ ("npy" | "mat")) => Err(DislocError::UnsupportedFileFormat(ext.to_string())),
        _ => Ok(InputFormat::Disloc),
    }
}

/// Infer the output format from the extension. Anything unrecognised is a table.
pub fn infer_output_format(path: &Path) -> OutputFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("npy") => OutputFormat::Npy,
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Table,
    }
}

/// Load and validate a scenario, inferring the format from the extension.
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let format = infer_input_format(path)?;
    let text = std::fs::read_to_string(path)?;
    let scenario = match format {
        InputFormat::Disloc => parse_disloc(&text)?,
        InputFormat::Json => serde_json::from_str(&text).map_err(|e| DislocError::Parse {
            line: e.line(),
            reason: e.to_string(),
        })?,
    };
    scenario.validate()?;
    Ok(scenario)
}

/// `printf("% .{precision}f")`
fn c_fixed(value: f64, precision: usize) -> String {
    let body = format!("{:.*}", precision, value);
    if body.starts_with('-') {
        body
    } else {
        format!(" {}", body)
    }
}

/// `printf("% {width}.{precision}e")`: two-digit signed exponent, space for positive values.
fn c_sci(value: f64, width: usize, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, value);
    let body = match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => raw,
    };
    let body = if body.starts_with('-') {
        body
    } else {
        format!(" {}", body)
    };
    format!("{:>width$}", body, width = width)
}

/// `printf("%.{precision}g")`: shortest of fixed and scientific, trailing zeros removed.
fn c_general(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string().to_lowercase();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    let precision = precision.max(1);
    let raw = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exp)) = raw.split_once('e') else {
        return raw;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let trim = |digits: &str| -> String {
        if digits.contains('.') {
            digits.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            digits.to_string()
        }
    };
    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim(mantissa), sign, exp.unsigned_abs())
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim(&format!("{:.*}", decimals, value))
    }
}

/// Write results as the fixed-width text table.
///
/// The header echoes the grid shape, the geographic origin and every source;
/// each following row is `x y ux uy uz exx exy eyy`.
pub fn write_table<W: Write>(mut w: W, scenario: &Scenario, results: &[PointResult]) -> Result<()> {
    let [nx, ny] = scenario.observations.shape();
    writeln!(
        w,
        "{}  {}  {:.6}  {:.6}",
        nx, ny, scenario.origin.latitude, scenario.origin.longitude
    )?;
    for s in &scenario.sources {
        let echo = |values: &[f64]| {
            values
                .iter()
                .map(|&v| c_general(v, 16))
                .collect::<Vec<_>>()
                .join(" ")
        };
        writeln!(w, "{}", echo(&[s.origin[0], s.origin[1], s.strike]))?;
        writeln!(
            w,
            "{}",
            echo(&[
                s.depth,
                s.dip,
                s.lambda,
                s.mu,
                s.slip.strike,
                s.slip.dip,
                s.slip.tensile,
                s.length,
                s.width,
            ])
        )?;
    }
    writeln!(
        w,
        "  x      y       ux        uy        uz        exx       exy       eyy"
    )?;
    for r in results {
        let t = &r.total;
        writeln!(
            w,
            "  {}  {}  {}  {}  {}  {}  {}  {}",
            c_fixed(r.position[0], 5),
            c_fixed(r.position[1], 5),
            c_sci(t.displacement[0], 10, 3),
            c_sci(t.displacement[1], 10, 3),
            c_sci(t.displacement[2], 10, 3),
            c_sci(t.strain.exx, 10, 3),
            c_sci(t.strain.exy, 10, 3),
            c_sci(t.strain.eyy, 10, 3),
        )?;
    }
    w.flush()?;
    Ok(())
}

/// Results as an `N x 10` array: `x y ux uy uz exx exy eyy tilt_x tilt_y`.
pub fn results_array(results: &[PointResult]) -> Result<Array2<f64>> {
    let data: Vec<f64> = results
        .iter()
        .flat_map(|r| {
            let t = &r.total;
            [
                r.position[0],
                r.position[1],
                t.displacement[0],
                t.displacement[1],
                t.displacement[2],
                t.strain.exx,
                t.strain.exy,
                t.strain.eyy,
                t.tilt[0],
                t.tilt[1],
            ]
        })
        .collect();
    Array2::from_shape_vec((results.len(), NPY_COLUMNS), data)
        .map_err(|e| DislocError::Other(format!("shape error: {}", e)))
}

/// Save results to a `.npy` file.
pub fn save_npy(results: &[PointResult], path: &Path) -> Result<()> {
    let arr = results_array(results)?;
    ndarray_npy::write_npy(path, &arr)
        .map_err(|e| DislocError::Other(format!("npy write error: {}", e)))?;
    Ok(())
}

#[derive(Serialize)]
struct Report<'a> {
    origin: GeoOrigin,
    shape: [usize; 2],
    sources: &'a [FaultSource],
    results: &'a [PointResult],
}

/// Save a pretty-printed JSON report of the scenario and its results.
pub fn save_json(scenario: &Scenario, results: &[PointResult], path: &Path) -> Result<()> {
    let report = Report {
        origin: scenario.origin,
        shape: scenario.observations.shape(),
        sources: &scenario.sources,
        results,
    };
    let mut w = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut w, &report)
        .map_err(|e| DislocError::Other(format!("json write error: {}", e)))?;
    w.flush()?;
    Ok(())
}

/// Save results, inferring the format from the extension.
pub fn save_results(scenario: &Scenario, results: &[PointResult], path: &Path) -> Result<()> {
    match infer_output_format(path) {
        OutputFormat::Table => write_table(BufWriter::new(File::create(path)?), scenario, results),
        OutputFormat::Npy => save_npy(results, path),
        OutputFormat::Json => save_json(scenario, results, path),
    }
}
