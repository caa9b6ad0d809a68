//! Splitting one physical RAW line into data tokens and a trailing comment.

/// The data tokens of a line, plus whatever followed the `/` delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    pub fields: Vec<String>,
    pub comment: Option<String>,
}

impl Tokens {
    /// First data token, used to recognise section terminators.
    pub fn first(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or("")
    }
}

/// A line carried more than one unquoted `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraCommentDelimiter;

/// Tokenize a line.
///
/// The line is cut at the first `/` that is not inside single quotes; the
/// remainder is the comment. The data part is split on commas outside single
/// quotes and every token is trimmed. Quotes are kept on the tokens, callers
/// unquote string fields themselves.
pub fn tokenize(line: &str) -> Result<Tokens, ExtraCommentDelimiter> {
    let line = line.trim();

    let mut in_quote = false;
    let mut delimiter = None;
    for (idx, c) in line.char_indices() {
        match c {
            '\'' => in_quote = !in_quote,
            '/' if !in_quote => {
                if delimiter.is_some() {
                    return Err(ExtraCommentDelimiter);
                }
                delimiter = Some(idx);
            }
            _ => {}
        }
    }

    let (data, comment) = match delimiter {
        Some(idx) => (&line[..idx], Some(line[idx + 1..].trim().to_string())),
        None => (line, None),
    };

    Ok(Tokens {
        fields: split_fields(data),
        comment,
    })
}

fn split_fields(data: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut in_quote = false;
    let mut start = 0;
    for (idx, c) in data.char_indices() {
        match c {
            '\'' => in_quote = !in_quote,
            ',' if !in_quote => {
                fields.push(data[start..idx].trim().to_string());
                start = idx + 1;
            }
            _ => {}
        }
    }
    fields.push(data[start..].trim().to_string());
    fields
}
