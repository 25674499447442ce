// src/core/loader.rs

use crate::constants;
use crate::models::{Channel, Source};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Version of the embedded table-decoding layer, reported by
/// `--codec-version`.
pub const CODEC_VERSION: &str = "1.4.2";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{path}' line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        path: String,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("'{path}' line {line}: '{value}' is not a number")]
    BadValue {
        path: String,
        line: usize,
        value: String,
    },
    #[error("'{path}': a trace file needs an abscissa column and at least one channel")]
    TooFewColumns { path: String },
    #[error("'{path}': no data rows")]
    Empty { path: String },
}

/// The file-decoding seam consumed by the second pass. Loads either succeed
/// with a complete source or fail the process; there is no partial load.
pub trait SourceLoader {
    fn load_file(&mut self, path: &str) -> Result<Source, LoadError>;
    fn load_stdin(&mut self) -> Result<Source, LoadError>;
}

/// Decoder for whitespace-separated ASCII trace tables.
///
/// Format: `#` starts a comment, blank lines are ignored, an optional first
/// row of non-numeric tokens names the columns, every data row is one
/// abscissa value followed by one sample per channel.
#[derive(Debug, Default)]
pub struct TableLoader;

impl TableLoader {
    pub fn new() -> Self {
        Self
    }
}

impl SourceLoader for TableLoader {
    fn load_file(&mut self, path: &str) -> Result<Source, LoadError> {
        log::debug!("loading trace file '{}'", path);
        let text = std::fs::read_to_string(Path::new(path)).map_err(|source| LoadError::Read {
            path: path.to_string(),
            source,
        })?;
        parse_table(path, &text)
    }

    fn load_stdin(&mut self) -> Result<Source, LoadError> {
        log::debug!("loading trace data from standard input");
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| LoadError::Read {
                path: constants::STDIN_SOURCE_NAME.to_string(),
                source,
            })?;
        parse_table(constants::STDIN_SOURCE_NAME, &text)
    }
}

/// Decodes one table into a source named `name`.
pub fn parse_table(name: &str, text: &str) -> Result<Source, LoadError> {
    let mut header: Option<Vec<String>> = None;
    let mut columns: Option<Vec<Vec<f64>>> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();

        // A leading row with any non-numeric token names the columns.
        if header.is_none()
            && columns.is_none()
            && fields.iter().any(|f| f.parse::<f64>().is_err())
        {
            header = Some(fields.iter().map(|f| f.to_string()).collect());
            continue;
        }

        let expected = columns
            .as_ref()
            .map(Vec::len)
            .or_else(|| header.as_ref().map(Vec::len));
        if let Some(expected) = expected
            && fields.len() != expected
        {
            return Err(LoadError::RaggedRow {
                path: name.to_string(),
                line: line_no,
                expected,
                found: fields.len(),
            });
        }

        let mut values = Vec::with_capacity(fields.len());
        for field in &fields {
            let value: f64 = field.parse().map_err(|_| LoadError::BadValue {
                path: name.to_string(),
                line: line_no,
                value: field.to_string(),
            })?;
            values.push(value);
        }

        let cols = columns.get_or_insert_with(|| vec![Vec::new(); values.len()]);
        for (col, value) in cols.iter_mut().zip(values) {
            col.push(value);
        }
    }

    let Some(mut cols) = columns else {
        return Err(LoadError::Empty {
            path: name.to_string(),
        });
    };
    if cols.len() < 2 {
        return Err(LoadError::TooFewColumns {
            path: name.to_string(),
        });
    }

    let abscissa = cols.remove(0);
    let mut names = header
        .map(|mut h| {
            // The first header token labels the abscissa.
            h.remove(0);
            h
        })
        .unwrap_or_default()
        .into_iter();

    let channels = cols
        .into_iter()
        .enumerate()
        .map(|(i, samples)| Channel {
            name: names.next().unwrap_or_else(|| format!("ch{}", i)),
            samples,
        })
        .collect();

    Ok(Source {
        name: name.to_string(),
        abscissa,
        channels,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::models::{Channel, Source};
    use std::collections::HashMap;

    pub(crate) fn make_source(name: &str, channel_count: usize) -> Source {
        Source {
            name: name.to_string(),
            abscissa: vec![0.0, 1.0],
            channels: (0..channel_count)
                .map(|i| Channel {
                    name: format!("ch{}", i),
                    samples: vec![0.0, 1.0],
                })
                .collect(),
        }
    }

    /// Serves canned sources by name; records load order. For engine tests.
    #[derive(Debug, Default)]
    pub(crate) struct StubLoader {
        pub counts: HashMap<String, usize>,
        pub stdin_channels: usize,
        pub loads: Vec<String>,
    }

    impl StubLoader {
        pub(crate) fn with_files(files: &[(&str, usize)]) -> Self {
            Self {
                counts: files
                    .iter()
                    .map(|(name, count)| (name.to_string(), *count))
                    .collect(),
                stdin_channels: 1,
                loads: Vec::new(),
            }
        }
    }

    impl SourceLoader for StubLoader {
        fn load_file(&mut self, path: &str) -> Result<Source, LoadError> {
            self.loads.push(path.to_string());
            match self.counts.get(path) {
                Some(&count) => Ok(make_source(path, count)),
                None => Err(LoadError::Read {
                    path: path.to_string(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                }),
            }
        }

        fn load_stdin(&mut self) -> Result<Source, LoadError> {
            self.loads.push(crate::constants::STDIN_SOURCE_NAME.to_string());
            Ok(make_source(
                crate::constants::STDIN_SOURCE_NAME,
                self.stdin_channels,
            ))
        }
    }
}
