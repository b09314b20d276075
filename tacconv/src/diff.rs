//! Positional line comparison of original and optimized code.
//!
//! Lines are paired by index, not by a longest-common-subsequence match.
//! A single inserted or removed line shifts every later pair, so each of
//! those rows is reported as changed. This is a known limitation kept for
//! compatibility with the service's existing comparison view.

/// One index-aligned pair of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRow {
    pub left_line: String,
    pub right_line: String,
    /// True when the lines differ after trimming surrounding whitespace.
    pub changed: bool,
}

/// Row totals for a diff table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub rows: usize,
    pub changed: usize,
}

impl DiffSummary {
    pub fn of(rows: &[DiffRow]) -> Self {
        Self {
            rows: rows.len(),
            changed: rows.iter().filter(|row| row.changed).count(),
        }
    }

    pub fn unchanged(&self) -> usize {
        self.rows - self.changed
    }
}

/// Pair the lines of `original` and `optimized` by position.
///
/// Both inputs are split on `'\n'`; the shorter side is padded with empty
/// lines. The result always holds `max(left, right)` rows.
pub fn build_diff(original: &str, optimized: &str) -> Vec<DiffRow> {
    let left: Vec<&str> = original.split('\n').collect();
    let right: Vec<&str> = optimized.split('\n').collect();
    let rows = left.len().max(right.len());

    (0..rows)
        .map(|i| {
            let left_line = left.get(i).copied().unwrap_or("");
            let right_line = right.get(i).copied().unwrap_or("");
            DiffRow {
                left_line: left_line.to_string(),
                right_line: right_line.to_string(),
                changed: left_line.trim() != right_line.trim(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_count_is_longest_side() {
        assert_eq!(build_diff("a\nb\nc", "a").len(), 3);
        assert_eq!(build_diff("a", "a\nb\nc\nd").len(), 4);
        assert_eq!(build_diff("a\nb", "x\ny").len(), 2);
    }

    #[test]
    fn test_empty_inputs_give_one_blank_row() {
        let rows = build_diff("", "");
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].changed);
    }

    #[test]
    fn test_whitespace_only_differences_are_unchanged() {
        let rows = build_diff("  MOV R0, a\nADD R0, b\t", "MOV R0, a  \n\tADD R0, b");
        assert!(rows.iter().all(|row| !row.changed));
        assert_eq!(rows[0].left_line, "  MOV R0, a");
        assert_eq!(rows[0].right_line, "MOV R0, a  ");
    }

    #[test]
    fn test_shorter_side_is_padded() {
        let rows = build_diff("MOV R0, a\nMOV R1, b\nADD R0, R1", "MOV R0, a");

        assert_eq!(rows[1].right_line, "");
        assert!(rows[1].changed);
        assert!(rows[2].changed);
    }

    #[test]
    fn test_blank_line_against_missing_line_is_unchanged() {
        let rows = build_diff("MOV R0, a\n", "MOV R0, a");
        assert_eq!(rows.len(), 2);
        assert!(!rows[1].changed);
    }

    #[test]
    fn test_removed_line_shifts_later_rows() {
        let rows = build_diff("MOV R0, a\nNOP\nADD R0, b\nMOV c, R0", "MOV R0, a\nADD R0, b\nMOV c, R0");
        let changed: Vec<bool> = rows.iter().map(|row| row.changed).collect();
        assert_eq!(changed, vec![false, true, true, true]);
    }

    #[test]
    fn test_summary_counts() {
        let rows = build_diff("a\nb\nc", "a\nx\nc\nd");
        let summary = DiffSummary::of(&rows);
        assert_eq!(summary, DiffSummary { rows: 4, changed: 2 });
        assert_eq!(summary.unchanged(), 2);
    }
}
