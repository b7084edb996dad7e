//! Sort direction and value ordering

use std::cmp::Ordering;

use poweralert_model::Value;

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Applies this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// The active sort of a grid: which column, which way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: Direction,
}

impl SortState {
    pub fn new(column: usize, direction: Direction) -> Self {
        Self { column, direction }
    }
}

/// Ascending comparison between two optional cell values.
///
/// Absent values (missing fields, explicit nulls, getters that produced
/// nothing) order before every present value, so an ascending sort groups
/// them first and the reversed descending sort groups them last. Strings
/// compare case-insensitively with a case-sensitive tiebreak so equal-ignoring
/// -case inputs still order deterministically. Ints and floats cross-compare
/// numerically. Values of different kinds fall back to a fixed rank per kind,
/// which keeps the ordering total even when a column holds mixed data.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_present(a, b),
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::String(a), Value::String(b)) => {
            let folded = a.to_lowercase().cmp(&b.to_lowercase());
            if folded == Ordering::Equal { a.cmp(b) } else { folded }
        }
        (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => type_rank(a).cmp(&type_rank(b)),
        },
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::String(_) => 3,
        Value::DateTime(_) => 4,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(a: Value, b: Value) -> Ordering {
        compare_values(Some(&a), Some(&b))
    }

    #[test]
    fn test_toggle_flips_direction() {
        assert_eq!(Direction::Asc.toggle(), Direction::Desc);
        assert_eq!(Direction::Desc.toggle(), Direction::Asc);
    }

    #[test]
    fn test_apply_reverses_for_desc() {
        assert_eq!(Direction::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Direction::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Direction::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn test_nulls_order_first_ascending() {
        assert_eq!(compare_values(None, Some(&Value::Int(1))), Ordering::Less);
        assert_eq!(compare_values(Some(&Value::Int(1)), None), Ordering::Greater);
        assert_eq!(compare_values(None, None), Ordering::Equal);
        // An explicit null behaves like an absent value.
        assert_eq!(cmp(Value::Null, Value::Int(1)), Ordering::Less);
        assert_eq!(compare_values(Some(&Value::Null), None), Ordering::Equal);
    }

    #[test]
    fn test_numbers_cross_compare() {
        assert_eq!(cmp(Value::Int(2), Value::Float(2.5)), Ordering::Less);
        assert_eq!(cmp(Value::Float(3.0), Value::Int(3)), Ordering::Equal);
        assert_eq!(cmp(Value::Int(10), Value::Int(9)), Ordering::Greater);
    }

    #[test]
    fn test_strings_fold_case() {
        assert_eq!(
            cmp(Value::from("apple"), Value::from("Banana")),
            Ordering::Less
        );
        // Case-insensitively equal, so the case-sensitive comparison decides.
        assert_ne!(
            cmp(Value::from("Apple"), Value::from("apple")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_mixed_types_rank_stably() {
        assert_eq!(cmp(Value::Bool(true), Value::Int(0)), Ordering::Less);
        assert_eq!(cmp(Value::from("9"), Value::Int(10)), Ordering::Greater);
    }
}
