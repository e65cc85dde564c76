//! Sample files: four whitespace-separated columns per line,
//! `Re t  Im t  Re F  Im F`.
//!
//! The first column may also be written as an exact fraction `p/q`. The
//! first non-blank line must have exactly four fields; later lines need at
//! least four and any extra trailing fields are ignored. Blank lines are
//! skipped.
//!
//! ```
//! use prony::io::parse_samples;
//!
//! let text = "0 0 1.0 0.0\n1/4 0 0.5 -0.5\n";
//! let s = parse_samples(text.as_bytes()).unwrap();
//! assert_eq!(s.len(), 2);
//! assert_eq!(s.t[1].re, 0.25);
//! assert_eq!(s.f[1].im, -0.5);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use num_complex::Complex;
use thiserror::Error;

/// Errors from reading or writing sample files.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected 4 fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: cannot parse field {field} ({text:?}) as a number")]
    Number {
        line: usize,
        field: usize,
        text: String,
    },
    #[error("no samples found")]
    Empty,
}

/// Time and value columns of a sample file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples {
    /// Complex sample times.
    pub t: Vec<Complex<f64>>,
    /// Complex signal values.
    pub f: Vec<Complex<f64>>,
}

impl Samples {
    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// True if there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

const FIELDS: usize = 4;

/// Read a sample file.
pub fn read_samples(path: impl AsRef<Path>) -> Result<Samples, DataError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "reading samples");
    let samples = parse_samples(BufReader::new(file))?;
    tracing::debug!(samples = samples.len(), "samples loaded");
    Ok(samples)
}

/// Parse samples from any buffered reader.
pub fn parse_samples<R: BufRead>(reader: R) -> Result<Samples, DataError> {
    let mut samples = Samples::default();
    let mut first = true;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if first {
            tracing::debug!(line = lineno, ?fields, "first line");
            if fields.len() != FIELDS {
                return Err(DataError::FieldCount {
                    line: lineno,
                    found: fields.len(),
                });
            }
            first = false;
        } else if fields.len() < FIELDS {
            return Err(DataError::FieldCount {
                line: lineno,
                found: fields.len(),
            });
        }

        let t_re = parse_time(fields[0], lineno)?;
        let t_im = parse_number(fields[1], lineno, 2)?;
        let f_re = parse_number(fields[2], lineno, 3)?;
        let f_im = parse_number(fields[3], lineno, 4)?;
        samples.t.push(Complex::new(t_re, t_im));
        samples.f.push(Complex::new(f_re, f_im));
    }

    if samples.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(samples)
}

/// First column: a decimal or an exact fraction `p/q` of non-negative integers.
fn parse_time(text: &str, line: usize) -> Result<f64, DataError> {
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if let Some((num, den)) = text.split_once('/') {
        if is_digits(num) && is_digits(den) {
            let num = parse_number(num, line, 1)?;
            let den = parse_number(den, line, 1)?;
            return Ok(num / den);
        }
    }
    parse_number(text, line, 1)
}

fn parse_number(text: &str, line: usize, field: usize) -> Result<f64, DataError> {
    text.parse::<f64>().map_err(|_| DataError::Number {
        line,
        field,
        text: text.to_string(),
    })
}

/// Write samples in the fixed-width layout `%7.5f %7.5f %25.20f %25.20f`.
pub fn write_samples(path: impl AsRef<Path>, samples: &Samples) -> Result<(), DataError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    write_samples_to(&mut out, samples)?;
    out.flush()?;
    tracing::info!(path = %path.display(), samples = samples.len(), "samples written");
    Ok(())
}

/// Write samples to any writer, one line per sample.
pub fn write_samples_to<W: Write>(out: &mut W, samples: &Samples) -> Result<(), DataError> {
    for (t, f) in samples.t.iter().zip(&samples.f) {
        writeln!(out, "{:7.5} {:7.5} {:25.20} {:25.20}", t.re, t.im, f.re, f.im)?;
    }
    Ok(())
}

/// Synthetic two-mode ringdown: 50 real times evenly spaced on `[0, 10]`,
/// `F = 1.0·exp((−2+2i)t) + 0.2·exp((−6+5i)t)`.
pub fn reference_samples() -> Samples {
    const N: usize = 50;
    let step = 10.0 / (N - 1) as f64;
    let b1 = Complex::new(-2.0, 2.0);
    let b2 = Complex::new(-6.0, 5.0);
    let t: Vec<Complex<f64>> = (0..N).map(|k| Complex::new(step * k as f64, 0.0)).collect();
    let f = t
        .iter()
        .map(|&t| (b1 * t).exp() + (b2 * t).exp() * 0.2)
        .collect();
    Samples { t, f }
}

/// Write [`reference_samples`] to `path`, replacing any existing file.
pub fn write_reference(path: impl AsRef<Path>) -> Result<(), DataError> {
    write_samples(path, &reference_samples())
}
