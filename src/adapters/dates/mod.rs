pub mod flexible_parser;
pub mod iso_parser;

use crate::core::errors::{AuditExportError, Result};
use crate::core::services::date_normalizer::DateNormalizer;
use crate::core::traits::date_parser::DateParser;

use flexible_parser::FlexibleDateParser;
use iso_parser::IsoDateParser;

/// Build the normalizer for the parser named in the configuration.
///
/// `"iso"` leaves out the lenient capability, so timestamps are passed
/// through as given and filtering relies on strict ISO-8601.
pub fn normalizer_for(name: &str) -> Result<DateNormalizer> {
    let flexible: Option<Box<dyn DateParser>> = match name {
        "flexible" => Some(Box::new(FlexibleDateParser)),
        "iso" => None,
        other => {
            return Err(AuditExportError::InvalidConfig {
                detail: format!("Unknown date parser '{other}'. Use \"flexible\" or \"iso\"."),
            });
        }
    };
    Ok(DateNormalizer::new(Box::new(IsoDateParser), flexible))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flexible_normalizes_day_first_with_slashes() {
        let n = normalizer_for("flexible").unwrap();
        assert_eq!(n.normalize("24/07/2025 10:00"), "2025-07-24T10:00:00+00:00");
        assert_eq!(n.normalize("2025-10-01 12:30:00 +0200"), "2025-10-01T12:30:00+02:00");
    }

    #[test]
    fn iso_passes_timestamps_through() {
        let n = normalizer_for("iso").unwrap();
        assert_eq!(n.normalize("2025-10-01T12:30:00.000Z"), "2025-10-01T12:30:00.000Z");
        assert!(n.parse_flexible("2025/07/24").is_some());
        assert!(n.parse_flexible("24/07/2025").is_none());
    }

    #[test]
    fn unknown_parser_is_config_error() {
        let err = normalizer_for("fuzzy").err().unwrap();
        assert!(matches!(err, AuditExportError::InvalidConfig { .. }));
    }
}
