//! Primitive coders: quoting, defaulting numeric coercion and line output.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Strip whitespace and one enclosing pair of single quotes.
///
/// Interior content, including padding inside the quotes, is left alone.
pub fn unquote(s: &str) -> String {
    let s = s.trim();
    match s.strip_prefix('\'').and_then(|rest| rest.strip_suffix('\'')) {
        Some(inner) => inner.to_string(),
        None => s.to_string(),
    }
}

/// Wrap a value in single quotes. Embedded quotes are not escaped.
pub fn quote(s: &str) -> String {
    format!("'{}'", s)
}

/// Shortest text that reads back to the same `f64`, always with a decimal
/// point for integral values.
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Positional reader over the data tokens of one line.
///
/// Each call consumes the next token. A present-but-blank token takes the
/// supplied default; a token missing from the end of the line also takes
/// the default when there is one and fails with [`FieldError::TooFew`]
/// otherwise.
pub struct Fields<'a> {
    tokens: &'a [String],
    pos: usize,
}

impl<'a> Fields<'a> {
    pub fn new(tokens: &'a [String]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Whether any token is left to read.
    pub fn has_more(&self) -> bool {
        self.pos < self.tokens.len()
    }

    pub fn int(&mut self, field: &'static str) -> Result<i32, FieldError> {
        self.take(field, None, "integer", parse_int)
    }

    pub fn int_or(&mut self, field: &'static str, default: i32) -> Result<i32, FieldError> {
        self.take(field, Some(default), "integer", parse_int)
    }

    pub fn float(&mut self, field: &'static str) -> Result<f64, FieldError> {
        self.take(field, None, "number", parse_float)
    }

    pub fn float_or(&mut self, field: &'static str, default: f64) -> Result<f64, FieldError> {
        self.take(field, Some(default), "number", parse_float)
    }

    pub fn string(&mut self, field: &'static str) -> Result<String, FieldError> {
        self.take(field, None, "string", |t| Some(unquote(t)))
    }

    pub fn string_or(&mut self, field: &'static str, default: &str) -> Result<String, FieldError> {
        self.take(field, Some(default.to_string()), "string", |t| {
            Some(unquote(t))
        })
    }

    /// A required record count; negative values are malformed.
    pub fn count(&mut self, field: &'static str) -> Result<usize, FieldError> {
        let pos = self.pos;
        let value = self.int(field)?;
        usize::try_from(value).map_err(|_| FieldError::Malformed {
            field,
            token: self.tokens[pos].clone(),
            expected: "non-negative count",
        })
    }

    /// Same as [`Fields::count`] with a default for blank or absent tokens.
    pub fn count_or(&mut self, field: &'static str, default: usize) -> Result<usize, FieldError> {
        let pos = self.pos;
        let value = self.int_or(field, default as i32)?;
        usize::try_from(value).map_err(|_| FieldError::Malformed {
            field,
            token: self.tokens[pos].clone(),
            expected: "non-negative count",
        })
    }

    fn take<T>(
        &mut self,
        field: &'static str,
        default: Option<T>,
        expected: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, FieldError> {
        let pos = self.pos;
        self.pos += 1;
        match self.tokens.get(pos).map(|t| t.trim()) {
            None => default.ok_or(FieldError::TooFew {
                min: pos + 1,
                found: self.tokens.len(),
            }),
            Some("") => default.ok_or_else(|| FieldError::Malformed {
                field,
                token: String::new(),
                expected,
            }),
            Some(token) => parse(token).ok_or_else(|| FieldError::Malformed {
                field,
                token: token.to_string(),
                expected,
            }),
        }
    }
}

fn parse_int(token: &str) -> Option<i32> {
    token.parse().ok()
}

fn parse_float(token: &str) -> Option<f64> {
    token.parse().ok()
}

/// Builds the canonical comma-joined encoding of one line.
#[derive(Debug, Default)]
pub struct LineWriter {
    parts: Vec<String>,
}

impl LineWriter {
    pub fn int(&mut self, value: i32) -> &mut Self {
        self.parts.push(value.to_string());
        self
    }

    pub fn float(&mut self, value: f64) -> &mut Self {
        self.parts.push(format_float(value));
        self
    }

    pub fn string(&mut self, value: &str) -> &mut Self {
        self.parts.push(quote(value));
        self
    }

    pub fn finish(&self) -> String {
        self.parts.join(", ")
    }
}

/// The four owner / fraction pairs shared by generators, branches,
/// transformers and VSC lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ownership {
    pub o1: i32,
    pub f1: f64,
    pub o2: i32,
    pub f2: f64,
    pub o3: i32,
    pub f3: f64,
    pub o4: i32,
    pub f4: f64,
}

impl Default for Ownership {
    fn default() -> Self {
        Self {
            o1: 1,
            f1: 1.0,
            o2: 0,
            f2: 1.0,
            o3: 0,
            f3: 1.0,
            o4: 0,
            f4: 1.0,
        }
    }
}

impl Ownership {
    pub fn read(fields: &mut Fields<'_>) -> Result<Self, FieldError> {
        let d = Ownership::default();
        Ok(Self {
            o1: fields.int_or("o1", d.o1)?,
            f1: fields.float_or("f1", d.f1)?,
            o2: fields.int_or("o2", d.o2)?,
            f2: fields.float_or("f2", d.f2)?,
            o3: fields.int_or("o3", d.o3)?,
            f3: fields.float_or("f3", d.f3)?,
            o4: fields.int_or("o4", d.o4)?,
            f4: fields.float_or("f4", d.f4)?,
        })
    }

    pub fn write(&self, line: &mut LineWriter) {
        line.int(self.o1)
            .float(self.f1)
            .int(self.o2)
            .float(self.f2)
            .int(self.o3)
            .float(self.f3)
            .int(self.o4)
            .float(self.f4);
    }

    /// `(owner, fraction)` pairs in file order.
    pub fn pairs(&self) -> [(i32, f64); 4] {
        [
            (self.o1, self.f1),
            (self.o2, self.f2),
            (self.o3, self.f3),
            (self.o4, self.f4),
        ]
    }
}
