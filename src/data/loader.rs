use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{
    normalize_column_name, title_case, CellValue, Column, StudentTable, NUMERIC_COLUMNS, TERM,
    YEAR,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal load failures. Per-cell coercion problems never surface here;
/// they become missing values.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl LoadError {
    fn parse(path: &Path, message: impl Into<String>) -> Self {
        LoadError::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    fn from_csv(path: &Path, err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => LoadError::FileAccess {
                path: path.to_path_buf(),
                source,
            },
            _ => LoadError::parse(path, message),
        }
    }
}

/// Tokens read as a missing value, whatever the column.
const NA_TOKENS: [&str; 19] = [
    "", "NA", "N/A", "n/a", "#N/A", "#N/A N/A", "#NA", "NaN", "nan", "-NaN", "-nan", "null",
    "NULL", "None", "<NA>", "1.#IND", "1.#QNAN", "-1.#IND", "-1.#QNAN",
];

fn is_na(s: &str) -> bool {
    NA_TOKENS.contains(&s)
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and normalise an admissions CSV.
///
/// Header names are canonicalised with [`normalize_column_name`]; `term` is
/// trimmed and title-cased, `year` and the known metric columns are coerced
/// to numbers (unparseable cells become `None`). Other columns keep their
/// parsed values.
pub fn load_table(path: &Path) -> Result<StudentTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(io::BufReader::new(file));

    let raw_headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::from_csv(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if raw_headers.is_empty() || raw_headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::parse(path, "no columns to parse from file"));
    }

    let width = raw_headers.len();
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); width];
    let mut rows = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| LoadError::from_csv(path, e))?;
        if record.len() > width {
            return Err(LoadError::parse(
                path,
                format!(
                    "expected {width} fields in line {}, saw {}",
                    record.position().map(|p| p.line()).unwrap_or(0),
                    record.len()
                ),
            ));
        }
        for (col_idx, column) in cells.iter_mut().enumerate() {
            // short rows are padded with missing values
            column.push(record.get(col_idx).unwrap_or("").to_string());
        }
        rows += 1;
    }

    let columns: Vec<(String, Column)> = raw_headers
        .iter()
        .zip(cells)
        .map(|(raw, values)| {
            let name = normalize_column_name(raw);
            if name != *raw {
                log::debug!("column {raw:?} renamed to {name:?}");
            }
            let column = coerce_column(&name, values);
            (name, column)
        })
        .collect();

    let table = StudentTable::new(columns, rows);
    log::info!(
        "Loaded {} rows from {}: {:?}",
        table.len(),
        path.display(),
        table.column_names().collect::<Vec<_>>()
    );

    Ok(table)
}

// ---------------------------------------------------------------------------
// Coercion helpers
// ---------------------------------------------------------------------------

fn coerce_column(name: &str, values: Vec<String>) -> Column {
    if name == TERM {
        Column::Term(values.iter().map(|v| normalize_term(v)).collect())
    } else if name == YEAR {
        Column::Year(values.iter().map(|v| parse_year(v)).collect())
    } else if NUMERIC_COLUMNS.contains(&name) {
        Column::Numeric(values.iter().map(|v| parse_number(v)).collect())
    } else {
        Column::Raw(values.iter().map(|v| guess_cell_type(v)).collect())
    }
}

/// Missing terms take the text form of a missing value before title-casing.
fn normalize_term(s: &str) -> String {
    if is_na(s) {
        return title_case("nan");
    }
    title_case(s.trim())
}

/// Numeric coercion: anything that is not a finite-or-infinite number is `None`.
pub fn parse_number(s: &str) -> Option<f64> {
    if is_na(s) {
        return None;
    }
    s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Years must be integral; `"2020.0"` is accepted, `"2020.5"` is not.
pub fn parse_year(s: &str) -> Option<i64> {
    let v = parse_number(s)?;
    if v.is_finite() && v.fract() == 0.0 && v.abs() <= i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

fn guess_cell_type(s: &str) -> CellValue {
    if is_na(s) {
        return CellValue::Null;
    }
    if let Ok(i) = s.trim().parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.trim().parse::<f64>() {
        return CellValue::Float(f);
    }
    match s {
        "True" | "true" | "TRUE" => CellValue::Bool(true),
        "False" | "false" | "FALSE" => CellValue::Bool(false),
        _ => CellValue::Text(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ENROLLED, RETENTION_RATE};
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_headers_are_canonicalised() {
        let file = write_csv(
            "Year ,Term,Applications,Retention Rate (%),Student Satisfaction (%),Campus Notes\n\
             2020,fall,100,80,70,ok\n",
        );
        let table = load_table(file.path()).unwrap();
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec![
                "year",
                "term",
                "applications",
                "retention_rate",
                "student_satisfaction",
                "campus_notes"
            ]
        );
    }

    #[test]
    fn test_values_are_coerced() {
        let file = write_csv(
            "Year,Term,Enrolled,Retention Rate (%),Comment\n\
             2019,  fall ,120,85.5,a\n\
             N/A,SPRING,abc,,7\n\
             2021.0,summer session,90,n/a,\n",
        );
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.years(), Some(&[Some(2019), None, Some(2021)][..]));
        assert_eq!(
            table.terms().unwrap(),
            &["Fall".to_string(), "Spring".to_string(), "Summer Session".to_string()]
        );
        assert_eq!(
            table.numeric(ENROLLED),
            Some(&[Some(120.0), None, Some(90.0)][..])
        );
        assert_eq!(
            table.numeric(RETENTION_RATE),
            Some(&[Some(85.5), None, None][..])
        );
        match table.column("comment") {
            Some(Column::Raw(cells)) => assert_eq!(
                cells,
                &vec![
                    CellValue::Text("a".into()),
                    CellValue::Integer(7),
                    CellValue::Null
                ]
            ),
            other => panic!("unexpected comment column: {other:?}"),
        }
    }

    #[test]
    fn test_missing_term_becomes_nan_text() {
        let file = write_csv("term,enrolled\n,5\nFall,6\n");
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.terms().unwrap(), &["Nan".to_string(), "Fall".to_string()]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let file = write_csv("year,enrolled\n2020\n2021,4\n");
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.numeric(ENROLLED), Some(&[None, Some(4.0)][..]));
    }

    #[test]
    fn test_long_rows_are_a_parse_error() {
        let file = write_csv("year,enrolled\n2020,1,2\n");
        let err = load_table(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }), "{err}");
    }

    #[test]
    fn test_empty_file_is_a_parse_error() {
        let file = write_csv("");
        let err = load_table(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }), "{err}");
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"year,term\n2020,f\xFFall\n").unwrap();
        file.flush().unwrap();
        let err = load_table(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }), "{err}");
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::FileAccess { .. }), "{err}");
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let file = write_csv("Year,Term,Enrolled\n");
        let table = load_table(file.path()).unwrap();
        assert!(table.is_empty());
        assert!(table.has_column("enrolled"));
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2020"), Some(2020));
        assert_eq!(parse_year(" 2020 "), Some(2020));
        assert_eq!(parse_year("2020.5"), None);
        assert_eq!(parse_year("N/A"), None);
        assert_eq!(parse_year("inf"), None);
    }
}
