use crate::error::FieldError;
use crate::fields::{Fields, LineWriter};
use crate::warning::Warning;

/// A record, or sub-record, that occupies exactly one physical line.
pub trait RawLine: Sized {
    /// Fewest tokens the line may carry.
    const MIN_FIELDS: usize;
    /// Tokens past this count are dropped with a warning.
    const MAX_FIELDS: usize;

    /// Build from tokens; blank tokens take their declared default.
    fn read(fields: &mut Fields<'_>) -> Result<Self, FieldError>;

    fn write(&self, line: &mut LineWriter);

    /// Arity-checked constructor over a positional token list.
    fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, FieldError> {
        if tokens.len() < Self::MIN_FIELDS {
            return Err(FieldError::TooFew {
                min: Self::MIN_FIELDS,
                found: tokens.len(),
            });
        }
        let tokens: Vec<String> = tokens
            .iter()
            .take(Self::MAX_FIELDS)
            .map(|t| t.as_ref().to_string())
            .collect();
        Self::read(&mut Fields::new(&tokens))
    }

    /// The canonical single-line encoding.
    fn to_raw(&self) -> String {
        let mut line = LineWriter::default();
        self.write(&mut line);
        line.finish()
    }
}

/// Post-parse range checking. `index` is the record's position in its
/// section and is used to name it when the record has no natural id.
pub trait Validate {
    fn validate(&self, index: usize, warnings: &mut Vec<Warning>);
}
