//! Canonical Record Rendering

use crate::record::Record;

/// Separator between canonical fields
pub const CANONICAL_SEPARATOR: char = '-';

/// Canonical text together with the age it was rendered from
///
/// Carrying the age lets callers order by it without re-splitting `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    pub age: u32,
    pub text: String,
}

impl CanonicalRecord {
    /// Drop the sort key and keep the text
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Renders validated records as `name-age-city`
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordTransformer;

impl RecordTransformer {
    /// Render a record; callers validate first
    pub fn render(record: &Record) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            record.name,
            record.age,
            record.city,
            sep = CANONICAL_SEPARATOR
        )
    }

    /// Render a record and keep its age alongside
    pub fn transform(record: &Record) -> CanonicalRecord {
        CanonicalRecord {
            age: record.age,
            text: Self::render(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_render() {
        assert_eq!(RecordTransformer::render(&Record::new("A", 25, "X")), "A-25-X");
    }

    #[test]
    fn test_transform_keeps_age() {
        let canonical = RecordTransformer::transform(&Record::new("Bob", 32, "Lyon"));
        assert_eq!(canonical.age, 32);
        assert_eq!(canonical.into_text(), "Bob-32-Lyon");
    }

    proptest! {
        #[test]
        fn render_matches_canonical_grammar(
            name in "[A-Za-z]{1,12}",
            age in 20u32..=35,
            city in "[A-Za-z]{1,12}",
        ) {
            let text = RecordTransformer::render(&Record::new(name.clone(), age, city.clone()));
            prop_assert_eq!(text.trim(), text.as_str());
            let expected_prefix = format!("{}-", name);
            prop_assert!(text.starts_with(&expected_prefix));
            let rest = &text[expected_prefix.len()..];
            let (age_text, city_text) = rest.split_once('-').unwrap();
            prop_assert!(age_text.bytes().all(|b| b.is_ascii_digit()));
            prop_assert_eq!(age_text.parse::<u32>().unwrap(), age);
            prop_assert_eq!(city_text, city.as_str());
        }
    }
}
