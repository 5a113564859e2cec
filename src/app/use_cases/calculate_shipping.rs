use crate::domain::model::{CalculateShippingRequest, CalculateShippingResponse, Region};
use crate::domain::ports::{CalculateShipping, CalculateShippingHandler, ShippingRateSource};
use crate::utils::error::{Result, ShippingError};
use crate::utils::validation::validate_positive_weight;

/// Prices a parcel by resolving country → region → rule through a [`ShippingRateSource`].
///
/// Serves both the plain [`CalculateShipping`] contract and the request/response
/// [`CalculateShippingHandler`] contract from a single resolution routine.
#[derive(Debug, Clone)]
pub struct CalculateShippingUseCase<R: ShippingRateSource> {
    rates: R,
}

impl<R: ShippingRateSource> CalculateShippingUseCase<R> {
    pub fn new(rates: R) -> Self {
        Self { rates }
    }

    fn resolve(&self, country_code: &str, weight: f64) -> Result<(Region, f64)> {
        let region = self
            .rates
            .region_code(country_code)
            .ok_or_else(|| ShippingError::UnknownCountry {
                country_code: country_code.to_string(),
            })?;

        let rule = self
            .rates
            .shipping_rule_for_region(region)
            .ok_or(ShippingError::UnknownRegion { region })?;

        let cost = rule.calculate(weight);
        tracing::debug!(
            country_code,
            %region,
            weight,
            min_charge = rule.min_charge(),
            cost_per_kg = rule.cost_per_kg(),
            cost,
            "shipping cost resolved"
        );
        Ok((region, cost))
    }
}

impl<R: ShippingRateSource> CalculateShipping for CalculateShippingUseCase<R> {
    fn calculate(&self, country_code: &str, weight: f64) -> Result<f64> {
        // No request object guards this path.
        validate_positive_weight("weight", weight)?;
        self.resolve(country_code, weight).map(|(_, cost)| cost)
    }
}

impl<R: ShippingRateSource> CalculateShippingHandler for CalculateShippingUseCase<R> {
    fn handle(&self, request: CalculateShippingRequest) -> Result<CalculateShippingResponse> {
        let (region, cost) = self.resolve(request.country_code(), request.weight())?;
        Ok(CalculateShippingResponse::from_request(request, region, cost))
    }
}
