use crate::domain::model::{Region, ShippingRule};
use crate::utils::error::{Result, ShippingError};
use crate::utils::validation::{validate_file_extensions, validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Rate table and country mapping loaded from a TOML file.
///
/// ```toml
/// lookup_files = ["extra-countries.csv"]
///
/// [rates.EUR]
/// min_charge = 0.0
/// cost_per_kg = 1.25
///
/// [countries]
/// DE = "EUR"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub rates: BTreeMap<String, RateConfig>,
    #[serde(default)]
    pub countries: BTreeMap<String, String>,
    #[serde(default)]
    pub lookup_files: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateConfig {
    pub min_charge: f64,
    pub cost_per_kg: f64,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ShippingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ShippingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ShippingError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn shipping_rules(&self) -> Result<Vec<(Region, ShippingRule)>> {
        self.rates
            .iter()
            .map(|(code, rate)| {
                let region = code.parse::<Region>()?;
                let rule = ShippingRule::new(rate.min_charge, rate.cost_per_kg).map_err(|e| {
                    ShippingError::InvalidConfigValueError {
                        field: format!("rates.{}", code),
                        value: format!("{}/{}", rate.min_charge, rate.cost_per_kg),
                        reason: e.to_string(),
                    }
                })?;
                Ok((region, rule))
            })
            .collect()
    }

    pub fn country_regions(&self) -> Result<Vec<(String, Region)>> {
        self.countries
            .iter()
            .map(|(country, region)| {
                validate_non_empty_string("countries", country)?;
                let region = region
                    .parse::<Region>()
                    .map_err(|_| ShippingError::InvalidConfigValueError {
                        field: format!("countries.{}", country),
                        value: region.clone(),
                        reason: "Unsupported region. Valid regions: UK, EUR, ROW".to_string(),
                    })?;
                Ok((country.clone(), region))
            })
            .collect()
    }

    pub fn validate_config(&self) -> Result<()> {
        let rules = self.shipping_rules()?;
        for (country, region) in self.country_regions()? {
            if !rules.iter().any(|(rated, _)| *rated == region) {
                return Err(ShippingError::InvalidConfigValueError {
                    field: format!("countries.{}", country),
                    value: region.to_string(),
                    reason: format!("No [rates.{}] entry for this region", region),
                });
            }
        }

        validate_file_extensions("lookup_files", &self.lookup_files, &["csv"])?;
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
