use crate::domain::model::{CalculateShippingRequest, CalculateShippingResponse, Region, ShippingRule};
use crate::utils::error::Result;
use std::collections::BTreeSet;

// Required: implemented by storage adapters, consumed by the use cases.

pub trait ShippingRateSource: Send + Sync {
    fn region_code(&self, country_code: &str) -> Option<Region>;
    fn shipping_rule_for_region(&self, region: Region) -> Option<ShippingRule>;
}

pub trait CountryDirectory: Send + Sync {
    fn region_codes(&self) -> BTreeSet<Region>;
    fn country_codes(&self) -> BTreeSet<String>;
}

// Provided: implemented by the use cases, consumed by presentation adapters.

pub trait CalculateShipping: Send + Sync {
    fn calculate(&self, country_code: &str, weight: f64) -> Result<f64>;
}

pub trait CalculateShippingHandler: Send + Sync {
    fn handle(&self, request: CalculateShippingRequest) -> Result<CalculateShippingResponse>;
}

pub trait ListAvailableCountries: Send + Sync {
    fn list(&self) -> BTreeSet<String>;
    fn regions(&self) -> BTreeSet<Region>;
}

impl<T: ShippingRateSource + ?Sized> ShippingRateSource for &T {
    fn region_code(&self, country_code: &str) -> Option<Region> {
        (**self).region_code(country_code)
    }

    fn shipping_rule_for_region(&self, region: Region) -> Option<ShippingRule> {
        (**self).shipping_rule_for_region(region)
    }
}

impl<T: CountryDirectory + ?Sized> CountryDirectory for &T {
    fn region_codes(&self) -> BTreeSet<Region> {
        (**self).region_codes()
    }

    fn country_codes(&self) -> BTreeSet<String> {
        (**self).country_codes()
    }
}

impl<T: CalculateShippingHandler + ?Sized> CalculateShippingHandler for Box<T> {
    fn handle(&self, request: CalculateShippingRequest) -> Result<CalculateShippingResponse> {
        (**self).handle(request)
    }
}
