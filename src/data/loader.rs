use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use calamine::{Data, Range, Reader, Xlsx, XlsxError};
use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::debug;

use crate::models::QuestionRecord;

/// Number, category, content, answer.
const REQUIRED_COLUMNS: usize = 4;

/// Error raised while reading the question source at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Xlsx {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    #[error("{} has no worksheet", .path.display())]
    NoWorksheet { path: PathBuf },

    #[error(
        "{}, line {line}: expected at least {required} columns, found {found}",
        .path.display(),
        required = REQUIRED_COLUMNS
    )]
    MissingColumns { path: PathBuf, line: u64, found: usize },

    #[error("{}, line {line}: invalid question number {value:?}", .path.display())]
    InvalidNumber {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error("unsupported question source {} (expected .xlsx, .csv, .tsv or .json)", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Load questions from a file, picking the parser from its extension.
pub fn load_questions<P: AsRef<Path>>(path: P) -> Result<Vec<QuestionRecord>, LoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let questions = match extension.as_deref() {
        Some("csv") => load_questions_from_delimited(path, b',')?,
        Some("tsv") => load_questions_from_delimited(path, b'\t')?,
        Some("json") => load_questions_from_json(path)?,
        Some("xlsx") => load_questions_from_xlsx(path)?,
        _ => {
            return Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    debug!(path = %path.display(), count = questions.len(), "parsed question source");
    Ok(questions)
}

/// Load questions from a JSON array of `{number, category, content, answer}`.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<QuestionRecord>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&json_content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn load_questions_from_delimited(
    path: &Path,
    delimiter: u8,
) -> Result<Vec<QuestionRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_delimited(file, delimiter, path)
}

/// Read the first worksheet of a workbook.
fn load_questions_from_xlsx(path: &Path) -> Result<Vec<QuestionRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let xlsx_error = |source: XlsxError| LoadError::Xlsx {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook: Xlsx<_> = Xlsx::new(BufReader::new(file)).map_err(xlsx_error)?;
    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(xlsx_error)?;

    parse_sheet(&sheet, path)
}

/// Parse worksheet cells, skipping the sheet's first row.
///
/// Line numbers in errors are spreadsheet row numbers.
pub(crate) fn parse_sheet(
    sheet: &Range<Data>,
    origin: &Path,
) -> Result<Vec<QuestionRecord>, LoadError> {
    let Some((first_row, first_column)) = sheet.start() else {
        return Ok(Vec::new());
    };
    let first_column = first_column as usize;

    let mut questions = Vec::new();
    for (offset, cells) in sheet.rows().enumerate() {
        let row = first_row as usize + offset;
        if row == 0 || cells.iter().all(is_blank) {
            continue;
        }
        let line = row as u64 + 1;

        let found = first_column
            + cells
                .iter()
                .rposition(|cell| !is_blank(cell))
                .map_or(0, |last| last + 1);
        if found < REQUIRED_COLUMNS {
            return Err(LoadError::MissingColumns {
                path: origin.to_path_buf(),
                line,
                found,
            });
        }

        let text = |column: usize| {
            column
                .checked_sub(first_column)
                .and_then(|index| cells.get(index))
                .map(ToString::to_string)
                .unwrap_or_default()
        };

        let number = cells
            .first()
            .filter(|_| first_column == 0)
            .and_then(cell_number)
            .ok_or_else(|| LoadError::InvalidNumber {
                path: origin.to_path_buf(),
                line,
                value: text(0),
            })?;

        questions.push(QuestionRecord::new(number, text(1), text(2), text(3)));
    }

    Ok(questions)
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn cell_number(cell: &Data) -> Option<u32> {
    match cell {
        Data::Int(value) => u32::try_from(*value).ok(),
        Data::Float(value)
            if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(value) =>
        {
            Some(*value as u32)
        }
        Data::String(raw) => parse_number(raw),
        _ => None,
    }
}

/// Parse a delimited table, skipping the header row.
///
/// `origin` is only used in error messages.
pub(crate) fn parse_delimited<R: io::Read>(
    input: R,
    delimiter: u8,
    origin: &Path,
) -> Result<Vec<QuestionRecord>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut questions = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|source| LoadError::Csv {
            path: origin.to_path_buf(),
            source,
        })?;

        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        questions.push(parse_row(&row, origin)?);
    }

    Ok(questions)
}

fn parse_row(row: &StringRecord, origin: &Path) -> Result<QuestionRecord, LoadError> {
    let line = row.position().map_or(0, |position| position.line());

    if row.len() < REQUIRED_COLUMNS {
        return Err(LoadError::MissingColumns {
            path: origin.to_path_buf(),
            line,
            found: row.len(),
        });
    }

    let number = parse_number(&row[0]).ok_or_else(|| LoadError::InvalidNumber {
        path: origin.to_path_buf(),
        line,
        value: row[0].to_string(),
    })?;

    Ok(QuestionRecord::new(number, &row[1], &row[2], &row[3]))
}

/// Spreadsheet exports sometimes write integers as `12.0`.
fn parse_number(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    trimmed
        .strip_suffix(".0")
        .unwrap_or(trimmed)
        .parse()
        .ok()
}
