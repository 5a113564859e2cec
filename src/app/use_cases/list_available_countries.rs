use crate::domain::model::Region;
use crate::domain::ports::{CountryDirectory, ListAvailableCountries};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct ListAvailableCountriesUseCase<D: CountryDirectory> {
    directory: D,
}

impl<D: CountryDirectory> ListAvailableCountriesUseCase<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }
}

impl<D: CountryDirectory> ListAvailableCountries for ListAvailableCountriesUseCase<D> {
    fn list(&self) -> BTreeSet<String> {
        let countries = self.directory.country_codes();
        tracing::debug!("{} destination countries available", countries.len());
        countries
    }

    fn regions(&self) -> BTreeSet<Region> {
        self.directory.region_codes()
    }
}
