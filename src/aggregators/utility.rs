use crate::record::UserType;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Drops the fractional part of an average, truncating toward zero.
pub fn truncate(value: f64) -> i64 {
    value as i64
}

/// Running mean for a single grouped column.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mean {
    sum: f64,
    n: usize,
}

impl Mean {
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.n += 1;
    }

    pub fn value(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.sum / self.n as f64
        }
    }

    /// The mean truncated to an integer.
    pub fn truncated(&self) -> i64 {
        truncate(self.value())
    }
}

/// Reshapes `(key, casual, registered)` rows into long form: every casual row
/// in key order, followed by every registered row in the same order.
pub fn split_by_user_type<K: Copy, V: Copy, T>(
    wide: &[(K, V, V)],
    make: impl Fn(K, V, UserType) -> T,
) -> Vec<T> {
    let casual = wide
        .iter()
        .map(|&(key, casual, _)| make(key, casual, UserType::Casual));
    let registered = wide
        .iter()
        .map(|&(key, _, registered)| make(key, registered, UserType::Registered));
    casual.chain(registered).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(Mean::default().value(), 0.0);
    }

    #[test]
    fn test_truncate_never_rounds() {
        assert_eq!(truncate(5.9), 5);
        assert_eq!(truncate(5.0), 5);
        assert_eq!(truncate(0.99), 0);
    }

    #[test]
    fn test_running_mean_truncates() {
        let mut m = Mean::default();
        for v in [5.0, 6.0, 6.0, 6.0, 6.0, 6.0, 6.0, 6.0, 6.0, 6.0] {
            m.push(v);
        }
        assert!((m.value() - 5.9).abs() < 1e-9);
        assert_eq!(m.truncated(), 5);
    }

    #[test]
    fn test_split_by_user_type_orders_casual_first() {
        let wide = [("a", 1u64, 10u64), ("b", 2, 20)];
        let long = split_by_user_type(&wide, |k, v, t| (k, v, t));
        assert_eq!(
            long,
            vec![
                ("a", 1, UserType::Casual),
                ("b", 2, UserType::Casual),
                ("a", 10, UserType::Registered),
                ("b", 20, UserType::Registered),
            ]
        );
    }
}
