//! Extracted RFQ fields and caller-supplied corrections to them.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum number of characters kept for the description field.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Largest quantity the extractor can read (7 digits).
pub const MAX_QUANTITY: u32 = 9_999_999;

/// Largest delivery-days value the extractor can read (5 digits).
pub const MAX_DELIVERY_DAYS: u32 = 99_999;

/// Fields extracted from one RFQ document.
///
/// Absence of a field is a normal outcome, not an error: a document with no
/// recognizable content yields all fields unset and a confidence score of 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    /// National Stock Number-like identifier (`DDDD-DD-DDD-DDDD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsn: Option<String>,

    /// Requested quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// Requested delivery lead time in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_days: Option<u32>,

    /// Whitespace-compacted document text, truncated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Share of expected fields that were found (0.0 - 1.0).
    #[serde(default)]
    pub confidence_score: f64,
}

/// A manual correction to extracted fields.
///
/// Every member is optional; only the members that are set overwrite the
/// stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_days: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

impl FieldsUpdate {
    /// Whether the update carries no values.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Reject values outside what the extractor itself could produce.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(quantity) = self.quantity {
            check_range("quantity", f64::from(quantity), 1.0, f64::from(MAX_QUANTITY))?;
        }
        if let Some(days) = self.delivery_days {
            check_range("deliveryDays", f64::from(days), 1.0, f64::from(MAX_DELIVERY_DAYS))?;
        }
        if let Some(score) = self.confidence_score {
            // NaN fails both comparisons, so it is rejected here too
            if !(0.0..=1.0).contains(&score) {
                return Err(ValidationError::OutOfRange {
                    field: "confidenceScore",
                    min: 0.0,
                    max: 1.0,
                    value: score,
                });
            }
        }
        if let Some(nsn) = &self.nsn {
            if nsn.trim().is_empty() {
                return Err(ValidationError::Required("nsn"));
            }
        }
        Ok(())
    }

    /// Overlay this update on top of `fields`.
    ///
    /// The description is truncated the same way the extractor truncates it.
    pub fn apply(&self, mut fields: ExtractedFields) -> ExtractedFields {
        if let Some(nsn) = &self.nsn {
            fields.nsn = Some(nsn.trim().to_string());
        }
        if let Some(quantity) = self.quantity {
            fields.quantity = Some(quantity);
        }
        if let Some(days) = self.delivery_days {
            fields.delivery_days = Some(days);
        }
        if let Some(description) = &self.description {
            let truncated: String = description.chars().take(MAX_DESCRIPTION_CHARS).collect();
            fields.description = (!truncated.is_empty()).then_some(truncated);
        }
        if let Some(score) = self.confidence_score {
            fields.confidence_score = score.clamp(0.0, 1.0);
        }
        fields
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serializes_camel_case_and_skips_unset() {
        let fields = ExtractedFields {
            quantity: Some(4),
            delivery_days: Some(30),
            confidence_score: 0.55,
            ..Default::default()
        };

        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "quantity": 4, "deliveryDays": 30, "confidenceScore": 0.55 })
        );
    }

    #[test]
    fn test_update_validation_rejects_out_of_range() {
        let zero_quantity = FieldsUpdate {
            quantity: Some(0),
            ..Default::default()
        };
        assert!(zero_quantity.validate().is_err());

        let huge_delivery = FieldsUpdate {
            delivery_days: Some(MAX_DELIVERY_DAYS + 1),
            ..Default::default()
        };
        assert!(huge_delivery.validate().is_err());

        let bad_score = FieldsUpdate {
            confidence_score: Some(f64::NAN),
            ..Default::default()
        };
        assert!(bad_score.validate().is_err());

        let blank_nsn = FieldsUpdate {
            nsn: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank_nsn.validate(), Err(ValidationError::Required("nsn")));
    }

    #[test]
    fn test_update_apply_overlays_set_members() {
        let base = ExtractedFields {
            nsn: Some("1111-11-111-1111".to_string()),
            quantity: Some(2),
            confidence_score: 0.45,
            ..Default::default()
        };
        let update = FieldsUpdate {
            quantity: Some(12),
            description: Some("x".repeat(250)),
            ..Default::default()
        };

        assert!(update.validate().is_ok());
        let merged = update.apply(base);

        assert_eq!(merged.nsn.as_deref(), Some("1111-11-111-1111"));
        assert_eq!(merged.quantity, Some(12));
        assert_eq!(merged.description.map(|d| d.len()), Some(MAX_DESCRIPTION_CHARS));
        assert_eq!(merged.confidence_score, 0.45);
    }

    #[test]
    fn test_update_is_empty() {
        assert!(FieldsUpdate::default().is_empty());
        let update: FieldsUpdate = serde_json::from_str(r#"{"deliveryDays": 7}"#).unwrap();
        assert!(!update.is_empty());
        assert_eq!(update.delivery_days, Some(7));
    }
}
