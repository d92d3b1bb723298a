//! Invariant-culture number formatting.
//!
//! Supports the standard single-letter specifiers (`C`, `D`, `E`, `F`, `G`,
//! `N`, `P`, `R`, `X`, each with an optional precision) and custom patterns
//! built from `0`, `#`, `.`, `,`, `%`, `‰`, quoted literals and up to three
//! `;`-separated sections.

use crate::error::{FormatError, FormatResult};

const CURRENCY_SYMBOL: &str = "¤";
const MAX_PRECISION: usize = 99;

/// A numeric value normalised for formatting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    fn is_negative(self) -> bool {
        match self {
            Number::Int(i) => i < 0,
            Number::Float(f) => f < 0.0,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    fn abs(self) -> Self {
        match self {
            Number::Int(i) => Number::Int(i.abs()),
            Number::Float(f) => Number::Float(f.abs()),
        }
    }

    fn scale_up(self, factor: i128) -> Self {
        match self {
            Number::Int(i) => i
                .checked_mul(factor)
                .map(Number::Int)
                .unwrap_or(Number::Float(i as f64 * factor as f64)),
            Number::Float(f) => Number::Float(f * factor as f64),
        }
    }
}

/// Format a number against `spec`. `kind` names the original runtime type.
pub(crate) fn format_number(n: Number, spec: &str, kind: &'static str) -> FormatResult<String> {
    if let Number::Float(f) = n {
        if !f.is_finite() {
            validate(spec, n, kind)?;
            return Ok(non_finite(f));
        }
    }

    if spec.is_empty() {
        return Ok(match n {
            Number::Int(i) => i.to_string(),
            Number::Float(f) => general(f, None, true),
        });
    }

    match parse_standard(spec) {
        Some((letter, precision)) => format_standard(n, letter, precision, spec, kind),
        None => format_custom(n, spec, kind),
    }
}

fn validate(spec: &str, n: Number, kind: &'static str) -> FormatResult<()> {
    if spec.is_empty() {
        return Ok(());
    }
    match parse_standard(spec) {
        Some((letter, precision)) => {
            standard_letter_valid(letter, n, precision).ok_or_else(|| FormatError::invalid(spec, kind))
        }
        None => parse_sections(spec)
            .filter(|sections| has_digit_placeholder(sections))
            .map(|_| ())
            .ok_or_else(|| FormatError::invalid(spec, kind)),
    }
}

fn non_finite(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f > 0.0 {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    }
}

/// A standard specifier is one ASCII letter followed by zero or more digits.
fn parse_standard(spec: &str) -> Option<(char, Option<usize>)> {
    let mut chars = spec.chars();
    let letter = chars.next().filter(|c| c.is_ascii_alphabetic())?;
    let rest = chars.as_str();
    if !rest.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if rest.is_empty() {
        return Some((letter, None));
    }
    // Overlong precisions are kept as invalid standard specifiers rather than custom patterns.
    Some((letter, Some(rest.parse().unwrap_or(usize::MAX))))
}

fn standard_letter_valid(letter: char, n: Number, precision: Option<usize>) -> Option<()> {
    if precision.is_some_and(|p| p > MAX_PRECISION) {
        return None;
    }
    let integral = matches!(n, Number::Int(_));
    match letter.to_ascii_uppercase() {
        'C' | 'E' | 'F' | 'G' | 'N' | 'P' | 'R' => Some(()),
        'D' | 'X' if integral => Some(()),
        _ => None,
    }
}

fn format_standard(
    n: Number,
    letter: char,
    precision: Option<usize>,
    spec: &str,
    kind: &'static str,
) -> FormatResult<String> {
    standard_letter_valid(letter, n, precision).ok_or_else(|| FormatError::invalid(spec, kind))?;
    let upper = letter.is_ascii_uppercase();

    let out = match (letter.to_ascii_uppercase(), n) {
        ('D', Number::Int(i)) => {
            let digits = pad_zeros(i.unsigned_abs().to_string(), precision.unwrap_or(0));
            if i < 0 {
                format!("-{digits}")
            } else {
                digits
            }
        }
        ('X', Number::Int(i)) => {
            let hex = if i < 0 {
                format!("{:X}", i as i64)
            } else {
                format!("{:X}", i)
            };
            let hex = if upper { hex } else { hex.to_lowercase() };
            pad_zeros(hex, precision.unwrap_or(0))
        }
        ('F', _) => {
            let (neg, int, frac) = fixed_parts(n, precision.unwrap_or(2));
            join_fixed(neg, &int, &frac)
        }
        ('N', _) => {
            let (neg, int, frac) = fixed_parts(n, precision.unwrap_or(2));
            join_fixed(neg, &group(&int), &frac)
        }
        ('P', _) => {
            let (neg, int, frac) = fixed_parts(n.scale_up(100), precision.unwrap_or(2));
            format!("{} %", join_fixed(neg, &group(&int), &frac))
        }
        ('C', _) => {
            let (neg, int, frac) = fixed_parts(n, precision.unwrap_or(2));
            let body = format!("{CURRENCY_SYMBOL}{}", join_fixed(false, &group(&int), &frac));
            if neg {
                format!("({body})")
            } else {
                body
            }
        }
        ('E', _) => exponential(n.as_f64(), precision.unwrap_or(6), upper),
        ('G', Number::Int(i)) => match precision.filter(|p| *p > 0) {
            Some(p) if i.unsigned_abs().to_string().len() > p => general(i as f64, Some(p), upper),
            _ => i.to_string(),
        },
        ('G', Number::Float(f)) => general(f, precision.filter(|p| *p > 0), upper),
        ('R', Number::Int(i)) => i.to_string(),
        ('R', Number::Float(f)) => general(f, None, true),
        _ => return Err(FormatError::invalid(spec, kind)),
    };
    Ok(out)
}

fn pad_zeros(digits: String, width: usize) -> String {
    if digits.len() >= width {
        digits
    } else {
        format!("{}{}", "0".repeat(width - digits.len()), digits)
    }
}

/// Sign, integral digits and exactly `decimals` fractional digits.
/// A value that rounds to zero is never reported as negative.
fn fixed_parts(n: Number, decimals: usize) -> (bool, String, String) {
    match n {
        Number::Int(i) => (i < 0, i.unsigned_abs().to_string(), "0".repeat(decimals)),
        Number::Float(f) => {
            let text = format!("{:.*}", decimals, f.abs());
            let (int, frac) = match text.split_once('.') {
                Some((int, frac)) => (int.to_string(), frac.to_string()),
                None => (text, String::new()),
            };
            let nonzero = int.chars().chain(frac.chars()).any(|c| c != '0');
            (f < 0.0 && nonzero, int, frac)
        }
    }
}

fn join_fixed(neg: bool, int: &str, frac: &str) -> String {
    let sign = if neg { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{int}")
    } else {
        format!("{sign}{int}.{frac}")
    }
}

fn group(int: &str) -> String {
    let len = int.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Split Rust's `{:e}` rendering into significant digits and a decimal exponent.
fn scientific_digits(text: &str) -> (String, i32) {
    let (mantissa, exp) = text.split_once('e').unwrap_or((text, "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    (digits, exp.parse().unwrap_or(0))
}

fn exponent_suffix(exp: i32, upper: bool, min_digits: usize) -> String {
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{marker}{sign}{:0width$}", exp.unsigned_abs(), width = min_digits)
}

fn exponential(f: f64, precision: usize, upper: bool) -> String {
    let (digits, exp) = scientific_digits(&format!("{:.*e}", precision, f.abs()));
    let sign = if f < 0.0 { "-" } else { "" };
    let (head, tail) = digits.split_at(1);
    let mantissa = if tail.is_empty() {
        head.to_string()
    } else {
        format!("{head}.{tail}")
    };
    format!("{sign}{mantissa}{}", exponent_suffix(exp, upper, 3))
}

/// General format: fixed notation unless the exponent is below -5 or reaches the precision.
fn general(f: f64, precision: Option<usize>, upper: bool) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let text = match precision {
        Some(p) => format!("{:.*e}", p - 1, f.abs()),
        None => format!("{:e}", f.abs()),
    };
    let (digits, exp) = scientific_digits(&text);
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    let sign = if f < 0.0 { "-" } else { "" };
    let threshold = precision.unwrap_or(15) as i32;

    let body = if exp >= threshold || exp < -5 {
        let (head, tail) = digits.split_at(1);
        let mantissa = if tail.is_empty() {
            head.to_string()
        } else {
            format!("{head}.{tail}")
        };
        format!("{mantissa}{}", exponent_suffix(exp, upper, 2))
    } else if exp >= 0 {
        let split = exp as usize + 1;
        if digits.len() <= split {
            format!("{digits}{}", "0".repeat(split - digits.len()))
        } else {
            format!("{}.{}", &digits[..split], &digits[split..])
        }
    } else {
        format!("0.{}{digits}", "0".repeat((-exp - 1) as usize))
    };
    format!("{sign}{body}")
}

/// A token of a custom numeric pattern section.
#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Digit { zero: bool },
    Point,
    Comma,
    Percent,
    PerMille,
    Literal(String),
}

fn parse_sections(spec: &str) -> Option<Vec<Vec<Tok>>> {
    let mut sections = vec![Vec::new()];
    let mut chars = spec.chars();
    while let Some(c) = chars.next() {
        let current = sections.last_mut()?;
        match c {
            '0' => current.push(Tok::Digit { zero: true }),
            '#' => current.push(Tok::Digit { zero: false }),
            '.' => current.push(Tok::Point),
            ',' => current.push(Tok::Comma),
            '%' => current.push(Tok::Percent),
            '‰' => current.push(Tok::PerMille),
            '\\' => {
                let escaped = chars.next()?;
                current.push(Tok::Literal(escaped.to_string()));
            }
            '\'' | '"' => {
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some(q) if q == c => break,
                        Some(other) => text.push(other),
                        None => return None,
                    }
                }
                current.push(Tok::Literal(text));
            }
            ';' => {
                if sections.len() == 3 {
                    return None;
                }
                sections.push(Vec::new());
            }
            other => current.push(Tok::Literal(other.to_string())),
        }
    }
    Some(sections)
}

fn has_digit_placeholder(sections: &[Vec<Tok>]) -> bool {
    sections
        .iter()
        .flatten()
        .any(|t| matches!(t, Tok::Digit { .. }))
}

fn format_custom(n: Number, spec: &str, kind: &'static str) -> FormatResult<String> {
    let sections = parse_sections(spec)
        .filter(|sections| has_digit_placeholder(sections))
        .ok_or_else(|| FormatError::invalid(spec, kind))?;

    // Negative values in a dedicated section drop their sign.
    let (section, value, signed) = match sections.len() {
        3 if n.is_zero() && !sections[2].is_empty() => (&sections[2], n, true),
        2 | 3 if n.is_negative() && !sections[1].is_empty() => (&sections[1], n.abs(), false),
        _ => (&sections[0], n, true),
    };
    Ok(render_section(section, value, signed))
}

fn render_section(tokens: &[Tok], n: Number, signed: bool) -> String {
    let point_at = tokens.iter().position(|t| *t == Tok::Point);
    let (int_toks, frac_toks) = match point_at {
        Some(p) => (&tokens[..p], &tokens[p + 1..]),
        None => (tokens, &tokens[..0]),
    };

    let int_digits: Vec<bool> = int_toks
        .iter()
        .filter_map(|t| match t {
            Tok::Digit { zero } => Some(*zero),
            _ => None,
        })
        .collect();
    let frac_digits: Vec<bool> = frac_toks
        .iter()
        .filter_map(|t| match t {
            Tok::Digit { zero } => Some(*zero),
            _ => None,
        })
        .collect();

    // Commas trailing the last integral placeholder divide by 1000; others group.
    let last_int_digit = int_toks.iter().rposition(|t| matches!(t, Tok::Digit { .. }));
    let first_int_digit = int_toks.iter().position(|t| matches!(t, Tok::Digit { .. }));
    let mut grouping = false;
    let mut thousands = 0i32;
    for (i, t) in int_toks.iter().enumerate() {
        if *t != Tok::Comma {
            continue;
        }
        match (first_int_digit, last_int_digit) {
            (Some(first), Some(last)) if i > first && i < last => grouping = true,
            (_, Some(last)) if i > last => thousands += 1,
            _ => {}
        }
    }

    let mut value = n;
    for t in tokens {
        match t {
            Tok::Percent => value = value.scale_up(100),
            Tok::PerMille => value = value.scale_up(1000),
            _ => {}
        }
    }
    if thousands > 0 {
        value = Number::Float(value.as_f64() / 1000f64.powi(thousands));
    }

    let (neg, int, frac) = fixed_parts(value, frac_digits.len());

    let min_frac = frac_digits.iter().rposition(|z| *z).map_or(0, |i| i + 1);
    let mut frac = frac.trim_end_matches('0').to_string();
    if frac.len() < min_frac {
        frac.push_str(&"0".repeat(min_frac - frac.len()));
    }

    let min_int = int_digits
        .iter()
        .position(|z| *z)
        .map_or(0, |i| int_digits.len() - i);
    let int = if int == "0" { String::new() } else { int };
    let int = pad_zeros(int, min_int);

    let mut out = String::new();
    if neg && signed {
        out.push('-');
    }

    let int_chars: Vec<char> = int.chars().collect();
    let len = int_chars.len();
    let slots = int_digits.len();
    let emit_digit = |out: &mut String, idx: usize| {
        out.push(int_chars[idx]);
        if grouping && idx + 1 < len && (len - 1 - idx) % 3 == 0 {
            out.push(',');
        }
    };

    let mut slot = 0usize;
    for t in int_toks {
        match t {
            Tok::Digit { .. } => {
                // The leftmost slot absorbs any digits beyond the placeholder count.
                if slot == 0 && len > slots {
                    for idx in 0..(len - slots) {
                        emit_digit(&mut out, idx);
                    }
                }
                let idx = len as isize - slots as isize + slot as isize;
                if idx >= 0 {
                    emit_digit(&mut out, idx as usize);
                }
                slot += 1;
            }
            Tok::Comma | Tok::Point => {}
            other => push_literal(&mut out, other),
        }
    }

    if point_at.is_some() {
        if !frac.is_empty() {
            out.push('.');
        }
        let frac_chars: Vec<char> = frac.chars().collect();
        let mut slot = 0usize;
        for t in frac_toks {
            match t {
                Tok::Digit { .. } => {
                    if let Some(c) = frac_chars.get(slot) {
                        out.push(*c);
                    }
                    slot += 1;
                }
                Tok::Comma | Tok::Point => {}
                other => push_literal(&mut out, other),
            }
        }
    }
    out
}

fn push_literal(out: &mut String, tok: &Tok) {
    match tok {
        Tok::Percent => out.push('%'),
        Tok::PerMille => out.push('‰'),
        Tok::Literal(text) => out.push_str(text),
        Tok::Digit { .. } | Tok::Point | Tok::Comma => {}
    }
}
