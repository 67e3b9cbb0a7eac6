//! Delimited file reader with encoding detection.
//!
//! Turns a header-bearing CSV/TSV file into [`RawRow`]s. Headers and values
//! are trimmed, input order is kept, and no column is validated here.

use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::RawRow;

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed data rows, in file order
    pub rows: Vec<RawRow>,
    /// Detected encoding
    pub encoding: String,
    /// Delimiter used
    pub delimiter: char,
    /// Trimmed column headers
    pub headers: Vec<String>,
}

/// Delimiter for a file extension: `csv` is comma, `tsv` is tab.
///
/// Any other extension (including a different case) is not an input sheet.
pub fn delimiter_for_extension(ext: &str) -> Option<char> {
    match ext {
        "csv" => Some(','),
        "tsv" => Some('\t'),
        _ => None,
    }
}

/// Delimiter for a path, from its extension.
pub fn delimiter_for_path(path: &Path) -> Option<char> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(delimiter_for_extension)
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let text = match encoding {
        "utf-8" => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => return Err(CsvError::EncodingError(encoding.to_string())),
        },
        "iso-8859-1" => encoding_rs::ISO_8859_15.decode(bytes).0.into_owned(),
        "windows-1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };

    Ok(text.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(text))
}

/// Parse delimited text into rows.
///
/// # Example
/// ```ignore
/// use seadex::parser::parse_str;
///
/// let rows = parse_str("AphiaID,Genus\n123,Amphiprion", ',').unwrap();
/// assert_eq!(rows[0].get("Genus").unwrap(), "Amphiprion");
/// ```
pub fn parse_str(content: &str, delimiter: char) -> CsvResult<Vec<RawRow>> {
    parse_reader(content.as_bytes(), delimiter).map(|(_, rows)| rows)
}

/// Parse delimited text from a reader into headers and rows.
pub fn parse_reader<R: Read>(reader: R, delimiter: char) -> CsvResult<(Vec<String>, Vec<RawRow>)> {
    let delimiter = u8::try_from(delimiter).map_err(|_| CsvError::ParseError {
        line: 1,
        message: format!("delimiter '{}' is not a single byte", delimiter.escape_default()),
    })?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| csv_error(e, 1))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() {
        return Err(CsvError::EmptyFile);
    }
    if headers.iter().all(String::is_empty) {
        return Err(CsvError::NoHeaders);
    }

    let mut rows = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| csv_error(e, idx + 2))?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        if record.iter().all(|v| v.trim().is_empty()) {
            continue;
        }

        let mut row = RawRow::new(line);
        for (header, value) in headers.iter().zip(record.iter()) {
            row.insert(header.clone(), value.trim());
        }
        rows.push(row);
    }

    Ok((headers, rows))
}

/// Parse a file with the given delimiter, detecting its encoding.
///
/// # Example
/// ```ignore
/// let result = parse_file("input/reef.tsv", '\t')?;
/// println!("Encoding: {}, Rows: {}", result.encoding, result.rows.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P, delimiter: char) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, delimiter)
}

/// Parse raw bytes with the given delimiter.
///
/// Valid UTF-8 is read as is; only other bytes go through encoding detection.
pub fn parse_bytes(bytes: &[u8], delimiter: char) -> CsvResult<ParseResult> {
    if bytes.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let (encoding, content) = match std::str::from_utf8(bytes) {
        Ok(text) => ("utf-8".to_string(), decode_content(text.as_bytes(), "utf-8")?),
        Err(_) => {
            let encoding = match detect_encoding(bytes).as_str() {
                "utf-8" => "windows-1252".to_string(),
                other => other.to_string(),
            };
            let content = decode_content(bytes, &encoding)?;
            (encoding, content)
        }
    };
    let (headers, rows) = parse_reader(content.as_bytes(), delimiter)?;

    Ok(ParseResult {
        rows,
        encoding,
        delimiter,
        headers,
    })
}

fn csv_error(err: csv::Error, fallback_line: usize) -> CsvError {
    let line = err
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(fallback_line);
    match err.into_kind() {
        csv::ErrorKind::Io(io) => CsvError::IoError(io),
        kind => CsvError::ParseError {
            line,
            message: format!("{:?}", kind),
        },
    }
}
