use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};

/// Fields accepted by the elo update endpoint, in reporting order.
pub const ELO_UPDATE_FIELDS: [&str; 4] = ["wins_change", "losses_change", "elo_change", "recent_change"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RosterOrder {
    /// Highest elo first, ties broken by name
    #[default]
    Rating,
    /// Alphabetical by name
    Name,
}

impl RosterOrder {
    pub fn as_order_by(&self) -> &'static str {
        match self {
            Self::Rating => "elo DESC, first_name ASC, last_name ASC",
            Self::Name => "first_name ASC, last_name ASC",
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCharactersQuery {
    #[serde(default)]
    pub sort: RosterOrder,
}

/// Deltas applied to a single character after a rated event.
///
/// `recent_change` is the caller's raw trend value; it is merged with
/// `elo_change` before being stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EloUpdateRequest {
    pub wins_change: i32,
    pub losses_change: i32,
    pub elo_change: i32,
    pub recent_change: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeltaValidationError {
    #[error("Invalid fields: {}", .0.join(", "))]
    InvalidFields(Vec<String>),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Fields must be integers: {}", .0.join(", "))]
    NonNumericFields(Vec<String>),
}

impl DeltaValidationError {
    pub fn fields(&self) -> &[String] {
        match self {
            Self::InvalidFields(fields)
            | Self::MissingFields(fields)
            | Self::NonNumericFields(fields) => fields,
        }
    }
}

impl EloUpdateRequest {
    /// Checks a raw JSON body against the exact field set.
    ///
    /// Unknown fields are reported first, then missing ones, then fields whose
    /// value is not an integer that fits in an `i32`.
    pub fn from_value(body: &Value) -> Result<Self, DeltaValidationError> {
        let Some(object) = body.as_object() else {
            return Err(DeltaValidationError::MissingFields(
                ELO_UPDATE_FIELDS.iter().map(|f| f.to_string()).collect(),
            ));
        };

        let invalid: Vec<String> = object
            .keys()
            .filter(|key| !ELO_UPDATE_FIELDS.contains(&key.as_str()))
            .cloned()
            .collect();
        if !invalid.is_empty() {
            return Err(DeltaValidationError::InvalidFields(invalid));
        }

        let missing: Vec<String> = ELO_UPDATE_FIELDS
            .iter()
            .filter(|field| !object.contains_key(**field))
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DeltaValidationError::MissingFields(missing));
        }

        let mut values = [0i32; 4];
        let mut non_numeric = Vec::new();
        for (slot, field) in values.iter_mut().zip(ELO_UPDATE_FIELDS) {
            match object.get(field).and_then(as_i32) {
                Some(value) => *slot = value,
                None => non_numeric.push(field.to_string()),
            }
        }
        if !non_numeric.is_empty() {
            return Err(DeltaValidationError::NonNumericFields(non_numeric));
        }

        let [wins_change, losses_change, elo_change, recent_change] = values;
        Ok(Self {
            wins_change,
            losses_change,
            elo_change,
            recent_change,
        })
    }
}

fn as_i32(value: &Value) -> Option<i32> {
    if let Some(n) = value.as_i64() {
        return i32::try_from(n).ok();
    }

    // Accept integral floats such as `3.0`
    let n = value.as_f64()?;
    if n.fract() == 0.0 && n >= i32::MIN as f64 && n <= i32::MAX as f64 {
        Some(n as i32)
    } else {
        None
    }
}
