use crate::utils::error::{Result, ShippingError};
use crate::utils::validation::{validate_non_empty_string, validate_positive_weight};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Pricing zone a destination country belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Region {
    #[serde(rename = "UK")]
    Uk,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "ROW")]
    Row,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Uk, Region::Eur, Region::Row];

    pub fn code(&self) -> &'static str {
        match self {
            Region::Uk => "UK",
            Region::Eur => "EUR",
            Region::Row => "ROW",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = ShippingError;

    fn from_str(s: &str) -> Result<Self> {
        Region::ALL
            .into_iter()
            .find(|region| region.code() == s)
            .ok_or_else(|| ShippingError::InvalidConfigValueError {
                field: "region_code".to_string(),
                value: s.to_string(),
                reason: "Unsupported region. Valid regions: UK, EUR, ROW".to_string(),
            })
    }
}

/// Minimum charge and per-kilogram rate for one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShippingRule {
    min_charge: f64,
    cost_per_kg: f64,
}

impl ShippingRule {
    pub fn new(min_charge: f64, cost_per_kg: f64) -> Result<Self> {
        for (name, value) in [("min_charge", min_charge), ("cost_per_kg", cost_per_kg)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ShippingError::InvalidRule {
                    reason: format!("{} must be a non-negative number, got {}", name, value),
                });
            }
        }
        Ok(Self {
            min_charge,
            cost_per_kg,
        })
    }

    /// For rates that are known-good at compile time; skips validation.
    pub(crate) const fn new_unchecked(min_charge: f64, cost_per_kg: f64) -> Self {
        Self {
            min_charge,
            cost_per_kg,
        }
    }

    pub fn min_charge(&self) -> f64 {
        self.min_charge
    }

    pub fn cost_per_kg(&self) -> f64 {
        self.cost_per_kg
    }

    /// `max(min_charge, cost_per_kg * weight)`; the caller guarantees `weight > 0`.
    pub fn calculate(&self, weight: f64) -> f64 {
        let linear = self.cost_per_kg * weight;
        if linear < self.min_charge {
            self.min_charge
        } else {
            linear
        }
    }

    /// Weight at which the floor and the linear term meet, if the rate is non-zero.
    pub fn break_even_weight(&self) -> Option<f64> {
        if self.cost_per_kg > 0.0 {
            Some(self.min_charge / self.cost_per_kg)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculateShippingRequest {
    country_code: String,
    weight: f64,
}

impl CalculateShippingRequest {
    pub fn new(country_code: impl Into<String>, weight: f64) -> Result<Self> {
        let country_code = country_code.into();
        validate_non_empty_string("country_code", &country_code)
            .map_err(|_| ShippingError::invalid_request("country_code", "must not be blank"))?;
        validate_positive_weight("weight", weight)?;
        Ok(Self {
            country_code,
            weight,
        })
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculateShippingResponse {
    country_code: String,
    weight: f64,
    region_code: Region,
    cost: f64,
}

impl CalculateShippingResponse {
    pub fn new(country_code: impl Into<String>, weight: f64, region_code: Region, cost: f64) -> Self {
        Self {
            country_code: country_code.into(),
            weight,
            region_code,
            cost,
        }
    }

    pub(crate) fn from_request(request: CalculateShippingRequest, region_code: Region, cost: f64) -> Self {
        Self {
            country_code: request.country_code,
            weight: request.weight,
            region_code,
            cost,
        }
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn region_code(&self) -> Region {
        self.region_code
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }
}
