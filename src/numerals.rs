use std::fmt::Display;

const EASTERN_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Replace every Western digit with its Eastern Arabic-Indic glyph.
/// Non-digit characters pass through untouched.
pub fn to_eastern_digits(value: impl Display) -> String {
    value
        .to_string()
        .chars()
        .map(|ch| match ch.to_digit(10) {
            Some(d) if ch.is_ascii_digit() => EASTERN_DIGITS[d as usize],
            _ => ch,
        })
        .collect()
}

fn eastern_to_western(ch: char) -> char {
    match EASTERN_DIGITS.iter().position(|&e| e == ch) {
        Some(idx) => char::from(b'0' + idx as u8),
        None => ch,
    }
}

/// Convert Eastern digits back to Western ones and parse the leading integer.
///
/// Parsing accepts leading whitespace, an optional sign and then the longest
/// run of digits; trailing garbage is ignored. Anything that does not start
/// with a number resolves to `0` rather than an error, so callers can feed
/// raw learner input straight in.
pub fn to_western_digits(input: &str) -> i64 {
    let normalized: String = input.chars().map(eastern_to_western).collect();
    let trimmed = normalized.trim_start();

    let (negative, rest) = match trimmed.chars().next() {
        Some('-') => (true, &trimmed[1..]),
        Some('+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(|ch| ch.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }

    match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => 0,
    }
}

/// Render a value with either digit set depending on the display preference.
pub fn display_number(value: impl Display, eastern: bool) -> String {
    if eastern {
        to_eastern_digits(value)
    } else {
        value.to_string()
    }
}

/// `m:ss` countdown label.
pub fn format_time(seconds: u32, eastern: bool) -> String {
    let text = format!("{}:{:02}", seconds / 60, seconds % 60);
    display_number(text, eastern)
}

pub fn format_percentage(percentage: u32, eastern: bool) -> String {
    format!("{}%", display_number(percentage, eastern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eastern_digits_for_number() {
        assert_eq!(to_eastern_digits(1234567890), "١٢٣٤٥٦٧٨٩٠");
    }

    #[test]
    fn test_eastern_digits_leave_other_chars() {
        assert_eq!(to_eastern_digits("7 × 8 = ?"), "٧ × ٨ = ?");
    }

    #[test]
    fn test_western_digits_from_eastern() {
        assert_eq!(to_western_digits("٥٦"), 56);
        assert_eq!(to_western_digits("٠"), 0);
    }

    #[test]
    fn test_western_digits_accepts_western_and_mixed_input() {
        assert_eq!(to_western_digits("42"), 42);
        assert_eq!(to_western_digits("٤2"), 42);
        assert_eq!(to_western_digits("  ١٢ "), 12);
    }

    #[test]
    fn test_western_digits_garbage_is_zero() {
        assert_eq!(to_western_digits(""), 0);
        assert_eq!(to_western_digits("abc"), 0);
        assert_eq!(to_western_digits("-"), 0);
        assert_eq!(to_western_digits("؟"), 0);
    }

    #[test]
    fn test_western_digits_ignores_trailing_garbage() {
        assert_eq!(to_western_digits("٣٠abc"), 30);
        assert_eq!(to_western_digits("-7x"), -7);
    }

    #[test]
    fn test_western_digits_overflow_is_zero() {
        assert_eq!(to_western_digits("99999999999999999999999"), 0);
    }

    #[test]
    fn test_eastern_round_trip_for_canonical_numbers() {
        for n in [0_i64, 1, 9, 10, 81, 100, 4096, 1_000_000] {
            let eastern = to_eastern_digits(n);
            assert_eq!(to_eastern_digits(to_western_digits(&eastern)), eastern);
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(300, false), "5:00");
        assert_eq!(format_time(65, false), "1:05");
        assert_eq!(format_time(65, true), "١:٠٥");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(95, false), "95%");
        assert_eq!(format_percentage(95, true), "٩٥%");
    }
}
