/// Formats a number in short compact notation, e.g. `1.2K`, `34M`, `5.6B`.
pub fn compact_number(value: f64) -> String {
    const UNITS: &[(f64, &str)] = &[(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    if !value.is_finite() {
        return "-".to_string();
    }

    let abs = value.abs();
    for (scale, suffix) in UNITS {
        if abs >= *scale {
            return format!("{}{suffix}", trim_decimal(value / scale));
        }
    }

    trim_decimal(value)
}

/// One decimal below 10, none above, without a trailing `.0`.
fn trim_decimal(value: f64) -> String {
    let s = if value.abs() >= 10.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    };

    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_number() {
        assert_eq!(compact_number(0.0), "0");
        assert_eq!(compact_number(950.0), "950");
        assert_eq!(compact_number(1_200.0), "1.2K");
        assert_eq!(compact_number(34_000_000.0), "34M");
        assert_eq!(compact_number(5_600_000_000.0), "5.6B");
        assert_eq!(compact_number(23_300_000_000.0), "23B");
        assert_eq!(compact_number(7_800_000_000_000.0), "7.8T");
        assert_eq!(compact_number(-2_500_000.0), "-2.5M");
        assert_eq!(compact_number(f64::NAN), "-");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank(" Pepsi "));
    }
}
