use crate::config::toml_config::TomlConfig;
use crate::domain::model::{Region, ShippingRule};
use crate::domain::ports::{CountryDirectory, ShippingRateSource};
use crate::utils::error::{Result, ShippingError};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;

const EUROPE: [&str; 44] = [
    "AL", "AD", "AT", "BY", "BE", "BA", "BG", "HR", "CY", "CZ", "DK", "EE", "FI", "FR", "DE",
    "GR", "HU", "IS", "IE", "IT", "LV", "LI", "LT", "LU", "MT", "MD", "MC", "ME", "NL", "MK",
    "NO", "PL", "PT", "RO", "RU", "SM", "RS", "SK", "SI", "ES", "SE", "CH", "UA", "VA",
];

#[derive(Debug, Deserialize)]
struct CountryRow {
    country_code: String,
    region_code: String,
}

/// In-memory country and rate tables, loaded once and read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ShippingCostDatabase {
    country_regions: HashMap<String, Region>,
    rules: HashMap<Region, ShippingRule>,
}

impl ShippingCostDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in rate table: Europe at 1.25/kg, UK free, rest of world 5.5/kg with a 10.0 minimum.
    pub fn with_default_rates() -> Self {
        let mut database = Self::new();
        for country in EUROPE {
            database.insert_country(country, Region::Eur);
        }
        database.insert_country("GB", Region::Uk);
        database.insert_country("US", Region::Row);
        database.insert_country("CA", Region::Row);

        database.rules.insert(Region::Uk, ShippingRule::new_unchecked(0.0, 0.0));
        database.rules.insert(Region::Eur, ShippingRule::new_unchecked(0.0, 1.25));
        database.rules.insert(Region::Row, ShippingRule::new_unchecked(10.0, 5.5));
        database
    }

    pub fn from_config(config: &TomlConfig) -> Result<Self> {
        let mut database = Self::new();
        for (region, rule) in config.shipping_rules()? {
            database.insert_rule(region, rule);
        }
        for (country, region) in config.country_regions()? {
            database.insert_country(country, region);
        }
        for file in &config.lookup_files {
            database.load_country_lookup(file)?;
        }
        tracing::info!(
            "Loaded {} countries across {} rated regions",
            database.country_regions.len(),
            database.rules.len()
        );
        Ok(database)
    }

    pub fn insert_country(&mut self, country_code: impl Into<String>, region: Region) -> &mut Self {
        let country_code = country_code.into();
        if let Some(previous) = self.country_regions.insert(country_code.clone(), region) {
            if previous != region {
                tracing::debug!(%country_code, from = %previous, to = %region, "country remapped");
            }
        }
        self
    }

    pub fn insert_rule(&mut self, region: Region, rule: ShippingRule) -> &mut Self {
        self.rules.insert(region, rule);
        self
    }

    /// Adds `country_code,region_code` rows from a CSV file with a header line.
    pub fn load_country_lookup<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let file = std::fs::File::open(path.as_ref())?;
        let loaded = self.load_country_lookup_from_reader(file)?;
        tracing::info!("Loaded {} countries from {}", loaded, path.as_ref().display());
        Ok(loaded)
    }

    pub fn load_country_lookup_from_reader<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (line, row) in csv_reader.deserialize::<CountryRow>().enumerate() {
            let row = row?;
            if row.country_code.is_empty() {
                return Err(ShippingError::InvalidConfigValueError {
                    field: "country_code".to_string(),
                    value: String::new(),
                    reason: format!("Blank country code on data row {}", line + 1),
                });
            }
            let region = row.region_code.parse::<Region>()?;
            rows.push((row.country_code, region));
        }

        // Rows are applied only once the whole file parsed.
        let loaded = rows.len();
        for (country, region) in rows {
            self.insert_country(country, region);
        }
        Ok(loaded)
    }

    /// Regions that have countries mapped to them but no shipping rule.
    pub fn unrated_regions(&self) -> BTreeSet<Region> {
        self.country_regions
            .values()
            .filter(|region| !self.rules.contains_key(region))
            .copied()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.country_regions.is_empty()
    }
}

impl ShippingRateSource for ShippingCostDatabase {
    fn region_code(&self, country_code: &str) -> Option<Region> {
        self.country_regions.get(country_code).copied()
    }

    fn shipping_rule_for_region(&self, region: Region) -> Option<ShippingRule> {
        self.rules.get(&region).copied()
    }
}

impl CountryDirectory for ShippingCostDatabase {
    fn region_codes(&self) -> BTreeSet<Region> {
        self.country_regions.values().copied().collect()
    }

    fn country_codes(&self) -> BTreeSet<String> {
        self.country_regions.keys().cloned().collect()
    }
}
