//! Record Parsing and Validation
//!
//! Turns raw `name,age,city` lines into validated records and renders them
//! in canonical `name-age-city` form.

mod error;
mod parser;
mod record;
mod transformer;
mod validator;

pub use error::RejectReason;
pub use parser::{RecordParser, DELIMITER};
pub use record::Record;
pub use transformer::{CanonicalRecord, RecordTransformer, CANONICAL_SEPARATOR};
pub use validator::{RecordValidator, ValidationConfig};
