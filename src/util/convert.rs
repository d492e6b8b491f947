/// Integer percentage of `value` over `total`, truncated and saturating
/// at `u64::MAX`. Non-numeric input or a zero total yields 0.
pub fn percent(value: &str, total: &str) -> u64 {
    match (value.parse::<u64>(), total.parse::<u64>()) {
        (Ok(value), Ok(total)) if total > 0 => {
            u64::try_from(value as u128 * 100 / total as u128).unwrap_or(u64::MAX)
        }
        _ => 0,
    }
}

/// Millisecond duration to whole minutes, rounded to nearest.
pub fn millis_to_minutes(ms: &str) -> String {
    match ms.parse::<u64>() {
        Ok(ms) => (ms / 60_000 + u64::from(ms % 60_000 >= 30_000)).to_string(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent("1500", "3000"), 50);
        assert_eq!(percent("2999", "3000"), 99);
        assert_eq!(percent("3000", "3000"), 100);
        assert_eq!(percent("100", "0"), 0);
        assert_eq!(percent("", "3000"), 0);
        assert_eq!(percent("12", "abc"), 0);
        assert_eq!(percent("18446744073709551615", "18446744073709551615"), 100);
        assert_eq!(percent("18446744073709551615", "1"), u64::MAX);
        assert_eq!(percent("400", "100"), 400);
    }

    #[test]
    fn test_millis_to_minutes() {
        assert_eq!(millis_to_minutes("1320000"), "22");
        assert_eq!(millis_to_minutes("1350000"), "23");
        assert_eq!(millis_to_minutes("1349999"), "22");
        assert_eq!(millis_to_minutes("0"), "0");
        assert_eq!(millis_to_minutes(""), "");
        assert_eq!(millis_to_minutes("n/a"), "");
        assert_eq!(millis_to_minutes("18446744073709551615"), "307445734561826");
    }
}
