//! Reader, writer and validator for PSS/E revision 33 RAW power flow cases.
//!
//! ```no_run
//! let parsed = rawcase::read_case("case.raw")?;
//! for warning in parsed.case.validate() {
//!     eprintln!("{}", warning);
//! }
//! print!("{}", rawcase::case_to_raw(&parsed.case));
//! # Ok::<(), rawcase::Error>(())
//! ```

pub mod area;
pub mod branch;
pub mod bus;
pub mod case;
pub mod check;
pub mod dc;
pub mod error;
pub mod export;
pub mod fields;
pub mod line;
pub mod parse;
pub mod record;
pub mod transformer;
pub mod validate;
pub mod warning;

pub use case::{Case, SUPPORTED_REVISION, Section};
pub use error::{Error, FieldError, Result};
pub use export::{case_to_raw, write_case};
pub use parse::{Parsed, parse_raw_str, read_case};
pub use record::{RawLine, Validate};
pub use transformer::Transformer;
pub use validate::validate_case;
pub use warning::Warning;
