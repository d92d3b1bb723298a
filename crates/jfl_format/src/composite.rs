//! Composite format strings: `{index[,alignment][:format]}` items mixed with literal text.

use crate::datetime::format_datetime;
use crate::error::{FormatError, FormatResult};
use crate::numeric::{format_number, Number};
use crate::value::Value;

/// Argument indexes and alignment widths must stay below this bound.
const ITEM_LIMIT: usize = 1_000_000;

/// Replace each format item in `format` with the matching entry of `args`.
///
/// `{{` and `}}` produce literal braces. A `Null` argument renders as the
/// empty string.
pub fn format_one(format: &str, args: &[Value]) -> FormatResult<String> {
    let mut parser = Parser { src: format, pos: 0 };
    let mut out = String::with_capacity(format.len());

    while parser.pos < format.len() {
        let rest = &format[parser.pos..];
        let next = rest.find(['{', '}']).unwrap_or(rest.len());
        out.push_str(&rest[..next]);
        parser.pos += next;

        match parser.peek() {
            Some(b'{') if parser.peek_at(1) == Some(b'{') => {
                out.push('{');
                parser.pos += 2;
            }
            Some(b'}') if parser.peek_at(1) == Some(b'}') => {
                out.push('}');
                parser.pos += 2;
            }
            Some(b'{') => {
                let item = parser.item()?;
                let arg = args.get(item.index).ok_or(FormatError::IndexOutOfRange {
                    index: item.index,
                    count: args.len(),
                })?;
                let text = format_value(arg, item.format)?;
                out.push_str(&align(text, item.alignment));
            }
            Some(_) => return Err(FormatError::malformed(parser.pos, "unescaped '}'")),
            None => {}
        }
    }

    Ok(out)
}

/// Format a single value against a format string (the part after `:`).
pub fn format_value(value: &Value, format: &str) -> FormatResult<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(true) => Ok("True".to_string()),
        Value::Bool(false) => Ok("False".to_string()),
        Value::Char(c) => Ok(c.to_string()),
        Value::Str(s) => Ok(s.clone()),
        Value::Int(i) => format_number(Number::Int(*i as i128), format, value.kind()),
        Value::UInt(u) => format_number(Number::Int(*u as i128), format, value.kind()),
        Value::Float(f) => format_number(Number::Float(*f), format, value.kind()),
        Value::DateTime(dt) => format_datetime(dt, format),
    }
}

fn align(text: String, alignment: i64) -> String {
    let width = alignment.unsigned_abs() as usize;
    let len = text.chars().count();
    if len >= width {
        return text;
    }
    let padding = " ".repeat(width - len);
    if alignment > 0 {
        padding + &text
    } else {
        text + &padding
    }
}

struct Item<'a> {
    index: usize,
    alignment: i64,
    format: &'a str,
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    fn number(&mut self, what: &str) -> FormatResult<usize> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits = &self.src[start..self.pos];
        if digits.is_empty() {
            return Err(FormatError::malformed(start, format!("expected {what}")));
        }
        digits
            .parse::<usize>()
            .ok()
            .filter(|n| *n < ITEM_LIMIT)
            .ok_or_else(|| FormatError::malformed(start, format!("{what} out of range")))
    }

    /// Parse one item, positioned on its opening brace.
    fn item(&mut self) -> FormatResult<Item<'a>> {
        self.pos += 1;
        let index = self.number("argument index")?;
        self.skip_spaces();

        let mut alignment = 0i64;
        if self.peek() == Some(b',') {
            self.pos += 1;
            self.skip_spaces();
            let negative = self.peek() == Some(b'-');
            if negative {
                self.pos += 1;
            }
            let width = i64::try_from(self.number("alignment")?)
                .map_err(|_| FormatError::malformed(self.pos, "alignment out of range"))?;
            alignment = if negative { -width } else { width };
            self.skip_spaces();
        }

        let mut format = "";
        if self.peek() == Some(b':') {
            self.pos += 1;
            let start = self.pos;
            loop {
                match self.peek() {
                    Some(b'}') => break,
                    Some(b'{') => {
                        return Err(FormatError::malformed(self.pos, "unexpected '{' in format"))
                    }
                    Some(_) => self.pos += 1,
                    None => return Err(FormatError::malformed(self.pos, "unclosed format item")),
                }
            }
            format = &self.src[start..self.pos];
        }

        match self.peek() {
            Some(b'}') => {
                self.pos += 1;
                Ok(Item {
                    index,
                    alignment,
                    format,
                })
            }
            Some(_) => Err(FormatError::malformed(self.pos, "expected '}'")),
            None => Err(FormatError::malformed(self.pos, "unclosed format item")),
        }
    }
}
