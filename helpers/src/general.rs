/// parse_float_prefix returns the number formed by the longest decimal prefix of raw, ignoring
/// leading whitespace, e.g. "  31.5min" yields 31.5. Only the form `[+-]digits[.digits][e[+-]digits]`
/// (digits may be omitted on one side of the point) is read, so words like "inf" or "nan" yield
/// None. Overflowing exponents yield an infinite value, the caller decides on those.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = match bytes.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    };

    let int_digits = count_digits(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // exponent only counts if digits follow
    if let Some(b'e') | Some(b'E') = bytes.get(end) {
        let sign = match bytes.get(end + 1) {
            Some(b'+') | Some(b'-') => 1,
            _ => 0,
        };
        let exp_digits = count_digits(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    trimmed[..end].parse::<f64>().ok()
}

/// parse_int_prefix returns the base-10 integer formed by an optional sign and the leading digits
/// of raw, ignoring leading whitespace, e.g. "38 min" yields 38 and "12.9" yields 12.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = match rest.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => &rest[..idx],
        None => rest,
    };
    if digits.is_empty() {
        return None;
    }

    // saturate instead of failing on absurdly long digit runs
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// format_hms renders a duration given in minutes as HH:MM:SS. The duration is rounded to whole
/// seconds first; hours are unbounded and every field is padded to at least two digits.
/// Negative durations are rendered as zero. Durations that are not finite or too long to count in
/// seconds are rendered as "--:--:--".
pub fn format_hms(minutes: f64) -> String {
    let tot_secs = (minutes * 60.0).round();
    if !tot_secs.is_finite() || tot_secs >= u64::MAX as f64 {
        return String::from("--:--:--");
    }

    let tot_secs = tot_secs.max(0.0) as u64;
    let hours = tot_secs / 3600;
    let mins = (tot_secs % 3600) / 60;
    let secs = tot_secs % 60;

    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}
