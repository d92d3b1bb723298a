//! Invariant-culture date and time formatting.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::error::{FormatError, FormatResult};

const KIND: &str = "datetime";

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const DAYS: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

/// Expand a single-letter standard specifier into its custom pattern.
fn standard_pattern(letter: char) -> Option<&'static str> {
    let pattern = match letter {
        'd' => "MM/dd/yyyy",
        'D' => "dddd, dd MMMM yyyy",
        'f' => "dddd, dd MMMM yyyy HH:mm",
        'F' => "dddd, dd MMMM yyyy HH:mm:ss",
        'g' => "MM/dd/yyyy HH:mm",
        'G' => "MM/dd/yyyy HH:mm:ss",
        'm' | 'M' => "MMMM dd",
        'o' | 'O' => "yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fffffff",
        'r' | 'R' => "ddd, dd MMM yyyy HH':'mm':'ss 'GMT'",
        's' => "yyyy'-'MM'-'dd'T'HH':'mm':'ss",
        't' => "HH:mm",
        'T' => "HH:mm:ss",
        'u' => "yyyy'-'MM'-'dd HH':'mm':'ss'Z'",
        'y' | 'Y' => "yyyy MMMM",
        _ => return None,
    };
    Some(pattern)
}

/// Format a date-time against a standard or custom pattern.
pub(crate) fn format_datetime(dt: &NaiveDateTime, spec: &str) -> FormatResult<String> {
    let mut chars = spec.chars();
    let pattern = match (chars.next(), chars.next()) {
        (None, _) => standard_pattern('G').unwrap_or_default(),
        (Some(letter), None) => {
            standard_pattern(letter).ok_or_else(|| FormatError::invalid(spec, KIND))?
        }
        _ => spec,
    };
    render(dt, pattern).ok_or_else(|| FormatError::invalid(spec, KIND))
}

fn render(dt: &NaiveDateTime, pattern: &str) -> Option<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let run = chars[i..].iter().take_while(|x| **x == c).count();
        let mut consumed = run;

        match c {
            'y' => {
                let year = dt.year();
                match run {
                    1 => out.push_str(&(year % 100).to_string()),
                    2 => out.push_str(&format!("{:02}", year % 100)),
                    n => out.push_str(&format!("{:0n$}", year)),
                }
            }
            'M' => push_named(&mut out, dt.month(), run, MONTHS[dt.month0() as usize]),
            'd' => match run {
                1 => out.push_str(&dt.day().to_string()),
                2 => out.push_str(&format!("{:02}", dt.day())),
                _ => {
                    let name = DAYS[dt.weekday().num_days_from_monday() as usize];
                    push_name(&mut out, name, run);
                }
            },
            'h' => {
                let hour = match dt.hour() % 12 {
                    0 => 12,
                    h => h,
                };
                push_number(&mut out, hour, run.min(2));
            }
            'H' => push_number(&mut out, dt.hour(), run.min(2)),
            'm' => push_number(&mut out, dt.minute(), run.min(2)),
            's' => push_number(&mut out, dt.second(), run.min(2)),
            'f' | 'F' => {
                if run > 7 {
                    return None;
                }
                let ticks = format!("{:07}", dt.nanosecond() % 1_000_000_000 / 100);
                let digits = &ticks[..run];
                if c == 'f' {
                    out.push_str(digits);
                } else {
                    out.push_str(digits.trim_end_matches('0'));
                }
            }
            't' => {
                let marker = if dt.hour() < 12 { "AM" } else { "PM" };
                if run == 1 {
                    out.push_str(&marker[..1]);
                } else {
                    out.push_str(marker);
                }
            }
            'g' => out.push_str("A.D."),
            'K' => {}
            '%' => consumed = 1,
            '\\' => {
                out.push(*chars.get(i + 1)?);
                consumed = 2;
            }
            '\'' | '"' => {
                let close = chars[i + 1..].iter().position(|x| *x == c)?;
                out.extend(&chars[i + 1..i + 1 + close]);
                consumed = close + 2;
            }
            other => {
                out.push(other);
                consumed = 1;
            }
        }
        i += consumed;
    }
    Some(out)
}

fn push_number(out: &mut String, value: u32, width: usize) {
    out.push_str(&format!("{:0width$}", value));
}

fn push_name(out: &mut String, name: &str, run: usize) {
    if run == 3 {
        out.push_str(&name[..3]);
    } else {
        out.push_str(name);
    }
}

fn push_named(out: &mut String, number: u32, run: usize, name: &str) {
    match run {
        1 | 2 => push_number(out, number, run),
        _ => push_name(out, name, run),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2010, 1, 5)
            .unwrap()
            .and_hms_nano_opt(14, 7, 9, 123_456_700)
            .unwrap()
    }

    #[test]
    fn test_standard_patterns() {
        let dt = sample();
        assert_eq!(format_datetime(&dt, "d").unwrap(), "01/05/2010");
        assert_eq!(format_datetime(&dt, "D").unwrap(), "Tuesday, 05 January 2010");
        assert_eq!(format_datetime(&dt, "s").unwrap(), "2010-01-05T14:07:09");
        assert_eq!(format_datetime(&dt, "o").unwrap(), "2010-01-05T14:07:09.1234567");
        assert_eq!(format_datetime(&dt, "u").unwrap(), "2010-01-05 14:07:09Z");
        assert_eq!(format_datetime(&dt, "t").unwrap(), "14:07");
        assert_eq!(format_datetime(&dt, "").unwrap(), "01/05/2010 14:07:09");
        assert_eq!(format_datetime(&dt, "M").unwrap(), "January 05");
    }

    #[test]
    fn test_custom_patterns() {
        let dt = sample();
        assert_eq!(format_datetime(&dt, "yyyy-MM-dd").unwrap(), "2010-01-05");
        assert_eq!(format_datetime(&dt, "ddd, MMM d yy").unwrap(), "Tue, Jan 5 10");
        assert_eq!(format_datetime(&dt, "h:mm tt").unwrap(), "2:07 PM");
        assert_eq!(format_datetime(&dt, "HH:mm:ss.fff").unwrap(), "14:07:09.123");
        assert_eq!(format_datetime(&dt, "'Day' d").unwrap(), "Day 5");
        assert_eq!(format_datetime(&dt, "%d").unwrap(), "5");
        assert_eq!(format_datetime(&dt, "\\y yyyy").unwrap(), "y 2010");
    }

    #[test]
    fn test_invalid_patterns() {
        let dt = sample();
        assert!(format_datetime(&dt, "q").is_err());
        assert!(format_datetime(&dt, "ffffffff").is_err());
        assert!(format_datetime(&dt, "'open").is_err());
        assert!(format_datetime(&dt, "yyyy\\").is_err());
    }
}
