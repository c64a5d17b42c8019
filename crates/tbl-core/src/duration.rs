//! Go-style duration codec.
//!
//! Monitor configs write duration thresholds the way the Go standard library
//! does (`24h`, `1h30m`, `1.5h`, `500ms`), and reasons print elapsed time in
//! Go's canonical form (`1h0m0s`, `1h30m0s`, `0s`). Both directions live here.

use std::fmt::Write as _;

use chrono::TimeDelta;

use crate::errors::CoreError;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Nanoseconds per unit suffix.
fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(60 * NANOS_PER_SECOND),
        "h" => Some(3_600 * NANOS_PER_SECOND),
        _ => None,
    }
}

/// Parse a Go duration string such as `24h`, `1h30m`, `1.5s`, or `-90m`.
///
/// A bare `0` is accepted without a unit. Fractional digits beyond nanosecond
/// precision are dropped.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDuration`] on empty input, a missing or unknown
/// unit, a missing number, or a value that does not fit in an `i64` of
/// nanoseconds.
pub fn parse_duration(input: &str) -> Result<TimeDelta, CoreError> {
    let invalid = |reason: &str| CoreError::InvalidDuration {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = input.trim();
    let (negative, mut rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (int_digits, after_int) = rest.split_at(int_len);
        let (frac_digits, after_number) = match after_int.strip_prefix('.') {
            Some(after_dot) => {
                let frac_len = after_dot
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(after_dot.len());
                after_dot.split_at(frac_len)
            }
            None => ("", after_int),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid("expected a number"));
        }

        let unit_len = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        let (unit, remaining) = after_number.split_at(unit_len);
        let scale = unit_nanos(unit).ok_or_else(|| {
            if unit.is_empty() {
                invalid("missing unit")
            } else {
                invalid(&format!("unknown unit '{unit}'"))
            }
        })?;

        let whole: u128 = if int_digits.is_empty() {
            0
        } else {
            int_digits
                .parse()
                .map_err(|_| invalid("number overflows"))?
        };
        total = whole
            .checked_mul(scale)
            .and_then(|value| total.checked_add(value))
            .ok_or_else(|| invalid("duration overflows"))?;

        if !frac_digits.is_empty() {
            let kept = &frac_digits[..frac_digits.len().min(18)];
            let numerator: u128 = kept.parse().map_err(|_| invalid("number overflows"))?;
            let denominator = kept.bytes().fold(1u128, |acc, _| acc * 10);
            total = total
                .checked_add(numerator * scale / denominator)
                .ok_or_else(|| invalid("duration overflows"))?;
        }

        rest = remaining;
    }

    let nanos = i64::try_from(total).map_err(|_| invalid("duration overflows"))?;
    let delta = TimeDelta::nanoseconds(nanos);
    Ok(if negative { -delta } else { delta })
}

/// Format a duration in Go's canonical `time.Duration` form.
///
/// Durations of a second or more print as `[Hh][Mm]S[.fff]s` (hours imply a
/// minutes component, so one hour is `1h0m0s`). Shorter durations use the
/// largest of `ms`, `µs`, `ns` that keeps the integer part non-zero.
#[must_use]
pub fn format_duration(delta: TimeDelta) -> String {
    let total = i128::from(delta.num_seconds()) * 1_000_000_000 + i128::from(delta.subsec_nanos());
    if total == 0 {
        return String::from("0s");
    }

    let mut out = String::new();
    if total < 0 {
        out.push('-');
    }
    let nanos = total.unsigned_abs();

    if nanos < NANOS_PER_SECOND {
        let (scale, unit) = if nanos < 1_000 {
            (1, "ns")
        } else if nanos < 1_000_000 {
            (1_000, "µs")
        } else {
            (1_000_000, "ms")
        };
        push_scaled(&mut out, nanos, scale);
        out.push_str(unit);
        return out;
    }

    let seconds = nanos / NANOS_PER_SECOND;
    let hours = seconds / 3_600;
    let minutes = seconds / 60 % 60;
    if hours > 0 {
        let _ = write!(out, "{hours}h{minutes}m");
    } else if minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    push_scaled(&mut out, nanos % (60 * NANOS_PER_SECOND), NANOS_PER_SECOND);
    out.push('s');
    out
}

/// Write `value / scale` with the remainder as trimmed decimal digits.
fn push_scaled(out: &mut String, value: u128, scale: u128) {
    let _ = write!(out, "{}", value / scale);
    let remainder = value % scale;
    if remainder > 0 {
        let width = scale.ilog10() as usize;
        let digits = format!("{remainder:0width$}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
}
