pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::storage::ShippingCostDatabase;
pub use app::running_total::RunningTotal;
pub use app::use_cases::{
    calculate_shipping::CalculateShippingUseCase,
    list_available_countries::ListAvailableCountriesUseCase,
};
pub use domain::model::{CalculateShippingRequest, CalculateShippingResponse, Region, ShippingRule};
pub use domain::ports::{
    CalculateShipping, CalculateShippingHandler, CountryDirectory, ListAvailableCountries,
    ShippingRateSource,
};
pub use utils::error::{Result, ShippingError};
