//! Catalogue CSV loader with encoding and delimiter auto-detection.
//!
//! Converts each record into a [`Row`] keyed by header name. No catalogue
//! semantics here beyond checking that the required columns exist.

use std::path::Path;

use crate::error::{InputError, InputResult};
use crate::models::Row;

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed rows in source order
    pub rows: Vec<Row>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
    /// Column headers
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Unknown encodings fall back to lossy UTF-8. A leading byte order mark is dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.into_owned(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };

    match decoded.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Falls back to `,` when the header has a single column.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Read a catalogue file with auto-detection of encoding and delimiter.
///
/// # Example
/// ```ignore
/// let result = load_catalogue("analysis/netflix_titles_sample.csv")?;
/// println!("Encoding: {}, Delimiter: '{}'", result.encoding, result.delimiter);
/// println!("Rows: {}", result.rows.len());
/// ```
pub fn load_catalogue<P: AsRef<Path>>(path: P) -> InputResult<ParseResult> {
    load_catalogue_with(path, None)
}

/// Read a catalogue file, forcing the delimiter when one is given.
pub fn load_catalogue_with<P: AsRef<Path>>(
    path: P,
    delimiter: Option<char>,
) -> InputResult<ParseResult> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_bytes(&bytes, delimiter)
}

/// Parse catalogue bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> InputResult<ParseResult> {
    parse_bytes(bytes, None)
}

fn parse_bytes(bytes: &[u8], delimiter: Option<char>) -> InputResult<ParseResult> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(InputError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));

    let (headers, rows) = parse_records(&content, delimiter)?;

    Ok(ParseResult {
        rows,
        encoding,
        delimiter,
        headers,
    })
}

/// Parse an in-memory catalogue with an explicit delimiter.
///
/// # Example
/// ```ignore
/// use insights::parser::parse_str;
///
/// let csv = "type,country\nMovie,\"India, Brazil\"";
/// let rows = parse_str(csv, ',').unwrap();
///
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].field("country"), "India, Brazil");
/// ```
pub fn parse_str(content: &str, delimiter: char) -> InputResult<Vec<Row>> {
    if content.trim().is_empty() {
        return Err(InputError::EmptyFile);
    }
    parse_records(content, delimiter).map(|(_, rows)| rows)
}

fn parse_records(content: &str, delimiter: char) -> InputResult<(Vec<String>, Vec<Row>)> {
    // Non-ASCII chars below 256 would convert but never match UTF-8 content
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| InputError::Malformed {
            line: 1,
            message: format!("delimiter '{}' is not an ASCII character", delimiter),
        })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(InputError::NoHeaders);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(malformed)?;

        // Extra cells are ignored, missing cells become empty strings.
        let row = Row::from_pairs(
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| (header.clone(), record.get(i).unwrap_or(""))),
        );
        rows.push(row);
    }

    Ok((headers, rows))
}

fn malformed(err: csv::Error) -> InputError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    InputError::Malformed {
        line,
        message: err.to_string(),
    }
}

/// Check that every column in `required` appears in `headers`.
pub fn require_columns(headers: &[String], required: &[&str]) -> InputResult<()> {
    match required
        .iter()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        Some(missing) => Err(InputError::MissingColumn((*missing).to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::REQUIRED_COLUMNS;
    use std::io::Write;

    #[test]
    fn test_simple_csv() {
        let csv = "type,release_year\nMovie,2020\nTV Show,2019";
        let rows = parse_str(csv, ',').unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field("type"), "Movie");
        assert_eq!(rows[0].field("release_year"), "2020");
        assert_eq!(rows[1].field("type"), "TV Show");
    }

    #[test]
    fn test_quoted_multivalue_cell() {
        let csv = "type,country,listed_in\nMovie,\"India, United States\",\"Dramas, Comedies\"";
        let rows = parse_str(csv, ',').unwrap();

        assert_eq!(rows[0].field("country"), "India, United States");
        assert_eq!(rows[0].field("listed_in"), "Dramas, Comedies");
    }

    #[test]
    fn test_empty_lines_skipped() {
        let csv = "a,b\n1,2\n\n3,4\n";
        let rows = parse_str(csv, ',').unwrap();

        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_missing_values_padded() {
        let csv = "a;b;c\n1;;3\n4";
        let rows = parse_str(csv, ';').unwrap();

        assert_eq!(rows[0].field("b"), "");
        assert_eq!(rows[0].field("c"), "3");
        assert_eq!(rows[1].get("c"), Some(""));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = "a;b\n1;2;3;4";
        let rows = parse_str(csv, ';').unwrap();

        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0].field("b"), "2");
    }

    #[test]
    fn test_empty_csv_error() {
        let result = parse_str("", ',');
        assert!(matches!(result, Err(InputError::EmptyFile)));
    }

    #[test]
    fn test_blank_header_row_error() {
        let result = parse_str(",,,\n1,2,3", ',');
        assert!(matches!(result, Err(InputError::NoHeaders)));
    }

    #[test]
    fn test_non_ascii_delimiter_error() {
        let result = parse_str("type,country\nMovie,India", 'é');
        assert!(matches!(result, Err(InputError::Malformed { line: 1, .. })));

        let result = parse_str("type,country\nMovie,India", '€');
        assert!(matches!(result, Err(InputError::Malformed { .. })));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), '|');
        assert_eq!(detect_delimiter("single"), ',');
    }

    #[test]
    fn test_auto_parse() {
        let csv = "type;country\nMovie;India\nMovie;Brazil";
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(result.delimiter, ';');
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.headers, vec!["type", "country"]);
    }

    #[test]
    fn test_bom_stripped_from_first_header() {
        let csv = "\u{feff}type,country\nMovie,India";
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();
        assert_eq!(result.headers[0], "type");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_require_columns() {
        let headers: Vec<String> = ["show_id", "type", "country", "listed_in", "release_year"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(require_columns(&headers, &REQUIRED_COLUMNS).is_ok());

        let partial = vec!["type".to_string(), "country".to_string()];
        let err = require_columns(&partial, &REQUIRED_COLUMNS).unwrap_err();
        assert!(matches!(err, InputError::MissingColumn(ref c) if c == "listed_in"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_catalogue(dir.path().join("absent.csv"));
        assert!(matches!(result, Err(InputError::Io { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "type,country,listed_in,release_year").unwrap();
        writeln!(file, "Movie,India,Dramas,2020").unwrap();

        let result = load_catalogue(file.path()).unwrap();
        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].field("release_year"), "2020");
    }
}
