use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Canonical column names
// ---------------------------------------------------------------------------

pub const YEAR: &str = "year";
pub const TERM: &str = "term";
pub const ENROLLED: &str = "enrolled";
pub const RETENTION_RATE: &str = "retention_rate";
pub const STUDENT_SATISFACTION: &str = "student_satisfaction";

/// Columns coerced to numbers on load (in addition to `year`).
pub const NUMERIC_COLUMNS: [&str; 9] = [
    "applications",
    "admitted",
    "enrolled",
    "retention_rate",
    "student_satisfaction",
    "engineering_enrolled",
    "business_enrolled",
    "arts_enrolled",
    "science_enrolled",
];

/// Per-area enrollment sub-counts, in display order.
pub const AREA_COLUMNS: [&str; 4] = [
    "engineering_enrolled",
    "business_enrolled",
    "arts_enrolled",
    "science_enrolled",
];

/// Canonicalise a raw header:
/// trim → lowercase → drop `(`, `)` → drop `%` → spaces to `_` → strip trailing `_`.
pub fn normalize_column_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '%'))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    stripped.trim_end_matches('_').to_string()
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// CellValue – a pass-through cell
// ---------------------------------------------------------------------------

/// A cell of a column the loader does not coerce, typed as it was read.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – one typed column of the table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// `year`: integral years, `None` when the cell did not parse.
    Year(Vec<Option<i64>>),
    /// `term`: trimmed, title-cased text.
    Term(Vec<String>),
    /// Coerced metric columns, `None` marks "no value".
    Numeric(Vec<Option<f64>>),
    /// Anything else, as parsed.
    Raw(Vec<CellValue>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Year(v) => v.len(),
            Column::Term(v) => v.len(),
            Column::Numeric(v) => v.len(),
            Column::Raw(v) => v.len(),
        }
    }

    /// Copy of the column restricted to `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Column {
        match self {
            Column::Year(v) => Column::Year(indices.iter().map(|&i| v[i]).collect()),
            Column::Term(v) => Column::Term(indices.iter().map(|&i| v[i].clone()).collect()),
            Column::Numeric(v) => Column::Numeric(indices.iter().map(|&i| v[i]).collect()),
            Column::Raw(v) => Column::Raw(indices.iter().map(|&i| v[i].clone()).collect()),
        }
    }

    /// Display text for one cell; missing numbers render empty.
    pub fn display(&self, row: usize) -> String {
        match self {
            Column::Year(v) => v[row].map(|y| y.to_string()).unwrap_or_default(),
            Column::Term(v) => v[row].clone(),
            Column::Numeric(v) => v[row].map(format_number).unwrap_or_default(),
            Column::Raw(v) => v[row].to_string(),
        }
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

// ---------------------------------------------------------------------------
// StudentTable – the normalised dataset
// ---------------------------------------------------------------------------

/// Admissions/enrollment table with canonical column names.
/// Immutable once loaded; filtering yields a new table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentTable {
    columns: Vec<(String, Column)>,
    rows: usize,
}

impl StudentTable {
    /// Build a table from named columns. All columns must have `rows` entries.
    pub fn new(columns: Vec<(String, Column)>, rows: usize) -> Self {
        debug_assert!(columns.iter().all(|(_, c)| c.len() == rows));
        Self { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn columns(&self) -> &[(String, Column)] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// The `year` column, if present.
    pub fn years(&self) -> Option<&[Option<i64>]> {
        match self.column(YEAR)? {
            Column::Year(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// The `term` column, if present.
    pub fn terms(&self) -> Option<&[String]> {
        match self.column(TERM)? {
            Column::Term(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// A coerced numeric column, if present.
    pub fn numeric(&self, name: &str) -> Option<&[Option<f64>]> {
        match self.column(name)? {
            Column::Numeric(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Distinct non-missing years, ascending.
    pub fn distinct_years(&self) -> BTreeSet<i64> {
        self.years()
            .map(|ys| ys.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Distinct terms, ascending.
    pub fn distinct_terms(&self) -> BTreeSet<String> {
        self.terms()
            .map(|ts| ts.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Derived table holding only the given rows.
    pub fn select_rows(&self, indices: &[usize]) -> StudentTable {
        let columns = self
            .columns
            .iter()
            .map(|(name, col)| (name.clone(), col.select(indices)))
            .collect();
        StudentTable::new(columns, indices.len())
    }
}
