//! Raw Line Parser

use crate::error::RejectReason;
use crate::record::Record;
use tracing::trace;

/// Field separator for raw lines
pub const DELIMITER: char = ',';

/// Number of fields in a well-formed line
const FIELD_COUNT: usize = 3;

/// Parser for `name,age,city` lines
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordParser;

impl RecordParser {
    /// Parse one raw line into a record
    ///
    /// Fields are taken verbatim (no trimming). Checks run in order: field
    /// count, age digits, then city.
    pub fn parse(line: &str) -> Result<Record, RejectReason> {
        let fields: Vec<&str> = line.split(DELIMITER).collect();
        if fields.len() != FIELD_COUNT {
            trace!(fields = fields.len(), "Wrong field count");
            return Err(RejectReason::MalformedShape);
        }

        let (name, age, city) = (fields[0], fields[1], fields[2]);

        if !is_decimal_digits(age) {
            return Err(RejectReason::NonNumericAge);
        }

        if city.is_empty() {
            return Err(RejectReason::EmptyCity);
        }

        // Only overflow can fail here; saturate so range validation rejects it.
        let age = age.parse::<u32>().unwrap_or(u32::MAX);

        Ok(Record::new(name, age, city))
    }
}

/// `^\d+$` over ASCII digits
fn is_decimal_digits(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}
