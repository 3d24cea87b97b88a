use std::collections::BTreeSet;

use super::model::StudentTable;

// ---------------------------------------------------------------------------
// Filter selection: accepted years and terms
// ---------------------------------------------------------------------------

/// Accepted values per filter dimension.
/// An empty set means "no filter" on that dimension, not "nothing matches".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub years: BTreeSet<i64>,
    pub terms: BTreeSet<String>,
}

impl FilterSelection {
    /// Everything selected: every distinct year and term in the table.
    pub fn all(table: &StudentTable) -> Self {
        Self {
            years: table.distinct_years(),
            terms: table.distinct_terms(),
        }
    }

    pub fn toggle_year(&mut self, year: i64) {
        if !self.years.remove(&year) {
            self.years.insert(year);
        }
    }

    pub fn toggle_term(&mut self, term: &str) {
        if !self.terms.remove(term) {
            self.terms.insert(term.to_string());
        }
    }

    pub fn select_all_years(&mut self, table: &StudentTable) {
        self.years = table.distinct_years();
    }

    pub fn select_all_terms(&mut self, table: &StudentTable) {
        self.terms = table.distinct_terms();
    }

    pub fn clear_years(&mut self) {
        self.years.clear();
    }

    pub fn clear_terms(&mut self) {
        self.terms.clear();
    }
}

/// Per-row inclusion flags.
///
/// A row passes when, for each of `year` and `term`:
/// * the table lacks the column → passes
/// * the selection for it is empty → passes (filter disabled)
/// * otherwise the row's value must be in the selection; a missing year never is
pub fn row_mask(table: &StudentTable, selection: &FilterSelection) -> Vec<bool> {
    let years = table.years().filter(|_| !selection.years.is_empty());
    let terms = table.terms().filter(|_| !selection.terms.is_empty());

    (0..table.len())
        .map(|i| {
            let year_ok = years.map_or(true, |ys| {
                ys[i].is_some_and(|y| selection.years.contains(&y))
            });
            let term_ok = terms.map_or(true, |ts| selection.terms.contains(&ts[i]));
            year_ok && term_ok
        })
        .collect()
}

/// Indices of rows passing [`row_mask`].
pub fn filtered_indices(table: &StudentTable, selection: &FilterSelection) -> Vec<usize> {
    row_mask(table, selection)
        .into_iter()
        .enumerate()
        .filter(|(_, keep)| *keep)
        .map(|(i, _)| i)
        .collect()
}

/// The filtered view as a derived table.
pub fn apply(table: &StudentTable, selection: &FilterSelection) -> StudentTable {
    table.select_rows(&filtered_indices(table, selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, ENROLLED, TERM, YEAR};

    fn table() -> StudentTable {
        StudentTable::new(
            vec![
                (
                    YEAR.into(),
                    Column::Year(vec![Some(2019), Some(2020), Some(2021), None]),
                ),
                (
                    TERM.into(),
                    Column::Term(vec![
                        "Fall".into(),
                        "Spring".into(),
                        "Fall".into(),
                        "Spring".into(),
                    ]),
                ),
                (
                    ENROLLED.into(),
                    Column::Numeric(vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
                ),
            ],
            4,
        )
    }

    #[test]
    fn test_all_selects_distinct_values() {
        let sel = FilterSelection::all(&table());
        assert_eq!(sel.years.iter().copied().collect::<Vec<_>>(), vec![2019, 2020, 2021]);
        assert_eq!(sel.terms.len(), 2);
    }

    #[test]
    fn test_empty_year_selection_disables_filter() {
        let t = table();
        let sel = FilterSelection {
            years: BTreeSet::new(),
            terms: BTreeSet::new(),
        };
        assert_eq!(filtered_indices(&t, &sel), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_missing_year_excluded_by_active_year_filter() {
        let t = table();
        let sel = FilterSelection::all(&t);
        assert_eq!(row_mask(&t, &sel), vec![true, true, true, false]);
    }

    #[test]
    fn test_year_and_term_combine() {
        let t = table();
        let mut sel = FilterSelection::all(&t);
        sel.toggle_year(2020);
        sel.toggle_term("Spring");
        assert_eq!(filtered_indices(&t, &sel), vec![0, 2]);

        sel.clear_terms();
        sel.years = [2020].into_iter().collect();
        assert_eq!(filtered_indices(&t, &sel), vec![1]);
    }

    #[test]
    fn test_no_match_yields_empty_view() {
        let t = table();
        let sel = FilterSelection {
            years: [1999].into_iter().collect(),
            terms: BTreeSet::new(),
        };
        let view = apply(&t, &sel);
        assert!(view.is_empty());
        assert!(view.has_column(ENROLLED));
    }

    #[test]
    fn test_absent_columns_do_not_filter() {
        let t = StudentTable::new(
            vec![(ENROLLED.into(), Column::Numeric(vec![Some(1.0), None]))],
            2,
        );
        let sel = FilterSelection {
            years: [2020].into_iter().collect(),
            terms: ["Fall".to_string()].into_iter().collect(),
        };
        assert_eq!(filtered_indices(&t, &sel), vec![0, 1]);
    }

    #[test]
    fn test_toggle_and_select_all() {
        let t = table();
        let mut sel = FilterSelection::default();
        sel.toggle_term("Fall");
        assert!(sel.terms.contains("Fall"));
        sel.toggle_term("Fall");
        assert!(sel.terms.is_empty());
        sel.select_all_terms(&t);
        sel.select_all_years(&t);
        assert_eq!(sel, FilterSelection::all(&t));
        sel.clear_years();
        assert!(sel.years.is_empty());
    }
}
