//! Feature encoding: raw form input to the fixed-order numeric vectors the
//! artifacts were trained on.
//!
//! The vector passed to a model must match the training-time schema in both
//! column order and cardinality. Anything beyond a pure reordering of known
//! columns is a hard error here, never something to paper over downstream.

use serde::{Deserialize, Serialize};

use crate::error::{FoodcastError, Result};

/// Canonical wastage feature columns (training-time names).
pub const DAYS_UNTIL_EXPIRY: &str = "Days_Until_Expiry";
pub const IS_PERISHABLE: &str = "Is_Perishable";

pub const MAX_DAYS_UNTIL_EXPIRY: u32 = 30;

/// Raw input for a wastage prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WastageInput {
    pub days_until_expiry: u32,
    pub is_perishable: bool,
}

impl WastageInput {
    pub fn validate(&self) -> Result<()> {
        if self.days_until_expiry > MAX_DAYS_UNTIL_EXPIRY {
            return Err(FoodcastError::Validation(format!(
                "days_until_expiry {} out of range [0, {MAX_DAYS_UNTIL_EXPIRY}]",
                self.days_until_expiry
            )));
        }
        Ok(())
    }

    /// Encode into the given training-time column order.
    ///
    /// `feature_order` must be a permutation of the canonical column pair;
    /// a foreign name, a duplicate, or a cardinality difference is a schema
    /// mismatch.
    pub fn encode(&self, feature_order: &[String]) -> Result<Vec<f64>> {
        let canonical = [DAYS_UNTIL_EXPIRY, IS_PERISHABLE];
        let mismatch = || FoodcastError::SchemaMismatch {
            expected: canonical.join(", "),
            got: feature_order.join(", "),
        };

        if feature_order.len() != canonical.len() {
            return Err(mismatch());
        }
        for name in canonical {
            if feature_order.iter().filter(|f| f.as_str() == name).count() != 1 {
                return Err(mismatch());
            }
        }

        Ok(feature_order
            .iter()
            .map(|name| match name.as_str() {
                DAYS_UNTIL_EXPIRY => f64::from(self.days_until_expiry),
                // the duplicate check above leaves only Is_Perishable here
                _ => {
                    if self.is_perishable {
                        1.0
                    } else {
                        0.0
                    }
                }
            })
            .collect())
    }
}

/// One-hot vocabulary for a single categorical field.
///
/// The reference value is implicitly encoded as all indicator columns zero.
/// Adding a category is a data change here, not a code change.
#[derive(Debug, Clone, Copy)]
pub struct OneHotField {
    pub field: &'static str,
    pub reference: &'static str,
    /// (value, indicator column) pairs, in training column order.
    pub columns: &'static [(&'static str, &'static str)],
}

impl OneHotField {
    pub fn allowed_values(&self) -> Vec<&'static str> {
        std::iter::once(self.reference)
            .chain(self.columns.iter().map(|(value, _)| *value))
            .collect()
    }

    /// Indicator values for `value`, one per column, in column order.
    pub fn encode(&self, value: &str) -> Result<Vec<f64>> {
        if value != self.reference && !self.columns.iter().any(|(v, _)| *v == value) {
            return Err(FoodcastError::UnknownCategory {
                field: self.field.to_string(),
                value: value.to_string(),
                allowed: self.allowed_values().join(", "),
            });
        }
        Ok(self
            .columns
            .iter()
            .map(|(v, _)| if *v == value { 1.0 } else { 0.0 })
            .collect())
    }
}

/// Training-time vocabularies for the claims model.
pub const CITY: OneHotField = OneHotField {
    field: "city",
    reference: "Bangalore",
    columns: &[
        ("Chennai", "city_Chennai"),
        ("Delhi", "city_Delhi"),
        ("Mumbai", "city_Mumbai"),
    ],
};

pub const PROVIDER_TYPE: OneHotField = OneHotField {
    field: "provider_type",
    reference: "Individual",
    columns: &[("Restaurant", "provider_type_Restaurant")],
};

/// Raw input for a claimed-quantity prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimsInput {
    pub quantity_listed: u32,
    pub city: String,
    pub provider_type: String,
}

impl ClaimsInput {
    pub fn validate(&self) -> Result<()> {
        if self.quantity_listed < 1 {
            return Err(FoodcastError::Validation(
                "quantity_listed must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Encode into the fixed one-hot layout:
    /// `quantity_listed, city_Chennai, city_Delhi, city_Mumbai,
    /// provider_type_Restaurant`.
    pub fn encode(&self) -> Result<Vec<f64>> {
        let mut out = vec![f64::from(self.quantity_listed)];
        out.extend(CITY.encode(&self.city)?);
        out.extend(PROVIDER_TYPE.encode(&self.provider_type)?);
        Ok(out)
    }

    /// Column names of the encoded vector, in order.
    pub fn feature_columns() -> Vec<&'static str> {
        let mut columns = vec!["quantity_listed"];
        columns.extend(CITY.columns.iter().map(|(_, col)| *col));
        columns.extend(PROVIDER_TYPE.columns.iter().map(|(_, col)| *col));
        columns
    }
}
