//! Drag-to-fill pattern inference.
//!
//! The source block of a fill is split into independent series (one per
//! column when filling vertically, one per row when filling horizontally).
//! Each series is classified by [`detect_pattern`] and continued by
//! [`extrapolate`] from the source edge nearest to the fill target.

use chrono::Duration;

use super::cell_ref::{CellRange, CellRef};
use super::dates::{format_dmy, parse_dmy};
use super::format::format_number;
use super::numeric::NumericLocaleParser;

const STEP_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FillDirection {
    Down,
    Up,
    Right,
    Left,
}

impl FillDirection {
    pub fn is_vertical(self) -> bool {
        matches!(self, FillDirection::Down | FillDirection::Up)
    }

    /// Down and Right continue past the end of a series; Up and Left continue
    /// before its start.
    pub fn is_forward(self) -> bool {
        matches!(self, FillDirection::Down | FillDirection::Right)
    }
}

/// Direction of a fill from `source` towards `target`, or None when the
/// target lies inside the source. Vertical wins when both axes differ.
pub fn fill_direction(source: &CellRange, target: &CellRef) -> Option<FillDirection> {
    if target.row > source.bottom() {
        Some(FillDirection::Down)
    } else if target.row < source.top() {
        Some(FillDirection::Up)
    } else if target.col > source.right() {
        Some(FillDirection::Right)
    } else if target.col < source.left() {
        Some(FillDirection::Left)
    } else {
        None
    }
}

/// The range a fill writes into: the strip between the source and the target,
/// spanning the source's width (vertical) or height (horizontal).
pub fn fill_target_range(source: &CellRange, direction: FillDirection, target: &CellRef) -> CellRange {
    match direction {
        FillDirection::Down => CellRange::new(
            CellRef::new(source.bottom() + 1, source.left()),
            CellRef::new(target.row, source.right()),
        ),
        FillDirection::Up => CellRange::new(
            CellRef::new(target.row, source.left()),
            CellRef::new(source.top() - 1, source.right()),
        ),
        FillDirection::Right => CellRange::new(
            CellRef::new(source.top(), source.right() + 1),
            CellRef::new(source.bottom(), target.col),
        ),
        FillDirection::Left => CellRange::new(
            CellRef::new(source.top(), target.col),
            CellRef::new(source.bottom(), source.left() - 1),
        ),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FillPattern {
    /// Constant numeric difference between successive values.
    Arithmetic { step: f64 },
    /// `DD/MM/YYYY` dates with a constant difference in days.
    Date { days: i64 },
    /// Repeat the source values cyclically.
    Copy,
}

/// Classify a series of source values.
pub fn detect_pattern(values: &[String], parser: &NumericLocaleParser) -> FillPattern {
    if values.len() < 2 {
        return FillPattern::Copy;
    }

    let numbers: Option<Vec<f64>> = values.iter().map(|v| parser.parse(v)).collect();
    if let Some(numbers) = numbers {
        let step = numbers[1] - numbers[0];
        if numbers
            .windows(2)
            .all(|w| ((w[1] - w[0]) - step).abs() < STEP_EPSILON)
        {
            return FillPattern::Arithmetic { step };
        }
    }

    let dates: Option<Vec<_>> = values.iter().map(|v| parse_dmy(v)).collect();
    if let Some(dates) = dates {
        let days = (dates[1] - dates[0]).num_days();
        if dates.windows(2).all(|w| (w[1] - w[0]).num_days() == days) {
            return FillPattern::Date { days };
        }
    }

    FillPattern::Copy
}

/// Produce `count` values continuing `values` under `pattern`.
///
/// The result is ordered by distance from the source: element 0 is adjacent
/// to the source edge (after the last value when `forward`, before the first
/// value otherwise).
pub fn extrapolate(
    pattern: FillPattern,
    values: &[String],
    count: usize,
    forward: bool,
    parser: &NumericLocaleParser,
) -> Vec<String> {
    if values.is_empty() || count == 0 {
        return Vec::new();
    }
    let edge = if forward { values.len() - 1 } else { 0 };
    let sign = if forward { 1.0 } else { -1.0 };

    match pattern {
        FillPattern::Arithmetic { step } => {
            let Some(base) = parser.parse(&values[edge]) else {
                return cycle(values, count, forward);
            };
            (1..=count)
                .map(|k| format_number(base + sign * step * k as f64))
                .collect()
        }
        FillPattern::Date { days } => {
            let Some(base) = parse_dmy(&values[edge]) else {
                return cycle(values, count, forward);
            };
            let mut out = Vec::with_capacity(count);
            for k in 1..=count as i64 {
                let offset = if forward { days * k } else { -days * k };
                match base.checked_add_signed(Duration::days(offset)) {
                    Some(date) => out.push(format_dmy(date)),
                    None => break,
                }
            }
            out
        }
        FillPattern::Copy => cycle(values, count, forward),
    }
}

fn cycle(values: &[String], count: usize, forward: bool) -> Vec<String> {
    let n = values.len();
    (0..count)
        .map(|k| {
            let idx = if forward { k % n } else { n - 1 - (k % n) };
            values[idx].clone()
        })
        .collect()
}

/// Detect and extrapolate in one step.
pub fn fill_series(
    values: &[String],
    count: usize,
    direction: FillDirection,
    parser: &NumericLocaleParser,
) -> Vec<String> {
    let pattern = detect_pattern(values, parser);
    tracing::trace!(?pattern, ?direction, count, "fill series");
    extrapolate(pattern, values, count, direction.is_forward(), parser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NumericLocale;
    use pretty_assertions::assert_eq;

    fn parser() -> NumericLocaleParser {
        NumericLocaleParser::new(NumericLocale::Vi)
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_direction_priority() {
        let source = CellRange::new(CellRef::new(1, 1), CellRef::new(2, 2));
        assert_eq!(fill_direction(&source, &CellRef::new(5, 1)), Some(FillDirection::Down));
        assert_eq!(fill_direction(&source, &CellRef::new(0, 1)), Some(FillDirection::Up));
        assert_eq!(fill_direction(&source, &CellRef::new(1, 4)), Some(FillDirection::Right));
        assert_eq!(fill_direction(&source, &CellRef::new(2, 0)), Some(FillDirection::Left));
        // Both axes differ: vertical wins.
        assert_eq!(fill_direction(&source, &CellRef::new(4, 6)), Some(FillDirection::Down));
        assert_eq!(fill_direction(&source, &CellRef::new(2, 2)), None);
    }

    #[test]
    fn test_target_range_spans_source_width() {
        let source = CellRange::new(CellRef::new(0, 0), CellRef::new(1, 1));
        let down = fill_target_range(&source, FillDirection::Down, &CellRef::new(5, 0));
        assert_eq!(down.to_string(), "A3:B6");
        let right = fill_target_range(&source, FillDirection::Right, &CellRef::new(0, 3));
        assert_eq!(right.to_string(), "C1:D2");
        let source = CellRange::new(CellRef::new(4, 2), CellRef::new(4, 2));
        let up = fill_target_range(&source, FillDirection::Up, &CellRef::new(1, 2));
        assert_eq!(up.to_string(), "C2:C4");
    }

    #[test]
    fn test_detect_arithmetic() {
        assert_eq!(
            detect_pattern(&strings(&["10", "20"]), &parser()),
            FillPattern::Arithmetic { step: 10.0 }
        );
        assert_eq!(
            detect_pattern(&strings(&["1,5", "2", "2,5"]), &parser()),
            FillPattern::Arithmetic { step: 0.5 }
        );
        assert_eq!(detect_pattern(&strings(&["1", "2", "4"]), &parser()), FillPattern::Copy);
    }

    #[test]
    fn test_detect_date_and_copy() {
        assert_eq!(
            detect_pattern(&strings(&["01/01/2024", "03/01/2024"]), &parser()),
            FillPattern::Date { days: 2 }
        );
        assert_eq!(
            detect_pattern(&strings(&["01/01/2024", "03/01/2024", "04/01/2024"]), &parser()),
            FillPattern::Copy
        );
        assert_eq!(detect_pattern(&strings(&["42"]), &parser()), FillPattern::Copy);
        assert_eq!(detect_pattern(&strings(&["a", "b"]), &parser()), FillPattern::Copy);
    }

    #[test]
    fn test_fill_down_numeric_series() {
        let out = fill_series(&strings(&["10", "20"]), 4, FillDirection::Down, &parser());
        assert_eq!(out, strings(&["30", "40", "50", "60"]));
    }

    #[test]
    fn test_fill_up_numeric_series_continues_from_first() {
        let out = fill_series(&strings(&["10", "20"]), 2, FillDirection::Up, &parser());
        assert_eq!(out, strings(&["0", "-10"]));
    }

    #[test]
    fn test_fill_down_dates() {
        let out = fill_series(
            &strings(&["01/01/2024", "03/01/2024"]),
            2,
            FillDirection::Down,
            &parser(),
        );
        assert_eq!(out, strings(&["05/01/2024", "07/01/2024"]));
    }

    #[test]
    fn test_fill_dates_cross_month_and_backwards() {
        let out = fill_series(
            &strings(&["30/01/2024", "31/01/2024"]),
            2,
            FillDirection::Down,
            &parser(),
        );
        assert_eq!(out, strings(&["01/02/2024", "02/02/2024"]));
        let out = fill_series(
            &strings(&["02/03/2024", "03/03/2024"]),
            2,
            FillDirection::Left,
            &parser(),
        );
        assert_eq!(out, strings(&["01/03/2024", "29/02/2024"]));
    }

    #[test]
    fn test_copy_single_value() {
        let out = fill_series(&strings(&["Tiền mặt"]), 3, FillDirection::Right, &parser());
        assert_eq!(out, strings(&["Tiền mặt", "Tiền mặt", "Tiền mặt"]));
    }

    #[test]
    fn test_copy_cycles_in_fill_direction() {
        let values = strings(&["a", "b", "c"]);
        assert_eq!(
            fill_series(&values, 4, FillDirection::Down, &parser()),
            strings(&["a", "b", "c", "a"])
        );
        assert_eq!(
            fill_series(&values, 4, FillDirection::Up, &parser()),
            strings(&["c", "b", "a", "c"])
        );
    }
}
