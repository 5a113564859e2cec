use anyhow::Result;
use shipping_cost::utils::validation::Validate;
use shipping_cost::{
    CalculateShipping, CalculateShippingHandler, CalculateShippingRequest, CalculateShippingUseCase,
    ListAvailableCountries, ListAvailableCountriesUseCase, Region, RunningTotal, ShippingCostDatabase,
    ShippingError, TomlConfig,
};
use tempfile::TempDir;

#[test]
fn test_rate_table_with_lookup_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let lookup_path = temp_dir.path().join("asia.csv");
    std::fs::write(&lookup_path, "country_code,region_code\nJP,ROW\nKR,ROW\n")?;

    let normalized_lookup = lookup_path.to_str().unwrap().replace('\\', "/");
    let config_content = format!(
        r#"
lookup_files = ["{}"]

[rates.UK]
min_charge = 0.0
cost_per_kg = 0.0

[rates.EUR]
min_charge = 3.0
cost_per_kg = 2.0

[rates.ROW]
min_charge = 15.0
cost_per_kg = 6.0

[countries]
GB = "UK"
IE = "EUR"
"#,
        normalized_lookup
    );
    let config_path = temp_dir.path().join("rates.toml");
    std::fs::write(&config_path, config_content)?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;
    let database = ShippingCostDatabase::from_config(&config)?;

    let countries = ListAvailableCountriesUseCase::new(&database).list();
    assert_eq!(countries.into_iter().collect::<Vec<_>>(), vec!["GB", "IE", "JP", "KR"]);

    let use_case = CalculateShippingUseCase::new(&database);
    assert_eq!(use_case.calculate("IE", 1.0)?, 3.0);
    assert_eq!(use_case.calculate("IE", 4.0)?, 8.0);
    assert_eq!(use_case.calculate("JP", 2.0)?, 15.0);
    assert_eq!(use_case.calculate("KR", 3.0)?, 18.0);
    assert!(matches!(
        use_case.calculate("DE", 1.0),
        Err(ShippingError::UnknownCountry { .. })
    ));
    Ok(())
}

#[test]
fn test_lookup_file_extends_default_rates() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let lookup_path = temp_dir.path().join("extra.csv");
    std::fs::write(&lookup_path, "country_code,region_code\nAU,ROW\n")?;

    let mut database = ShippingCostDatabase::with_default_rates();
    assert_eq!(database.load_country_lookup(&lookup_path)?, 1);

    let calculator = RunningTotal::new(CalculateShippingUseCase::new(&database));
    let response = calculator.handle(CalculateShippingRequest::new("AU", 1.0)?)?;
    assert_eq!(response.region_code(), Region::Row);
    assert_eq!(response.cost(), 10.0);
    assert_eq!(calculator.total_cost(), 10.0);
    Ok(())
}

#[test]
fn test_missing_lookup_file_is_io_error() {
    let mut database = ShippingCostDatabase::new();
    let err = database
        .load_country_lookup("/definitely/not/here.csv")
        .unwrap_err();
    assert!(matches!(err, ShippingError::IoError(_)));
}

#[test]
fn test_rate_table_missing_region_is_rejected() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[rates.UK]
min_charge = 0.0
cost_per_kg = 0.0

[countries]
GB = "UK"
US = "ROW"
"#,
    )?;

    assert!(config.validate().is_err());

    // Loading without validation still surfaces the gap at calculation time.
    let database = ShippingCostDatabase::from_config(&config)?;
    assert_eq!(database.unrated_regions().into_iter().collect::<Vec<_>>(), vec![Region::Row]);
    let err = CalculateShippingUseCase::new(&database)
        .calculate("US", 1.0)
        .unwrap_err();
    assert!(matches!(err, ShippingError::UnknownRegion { region: Region::Row }));
    Ok(())
}
