use anyhow::Context;
use clap::Parser;
use shipping_cost::adapters::presentation::{self, SessionOptions};
use shipping_cost::utils::error::ErrorSeverity;
use shipping_cost::utils::{logger, validation::Validate};
use shipping_cost::{
    CalculateShippingHandler, CalculateShippingRequest, CalculateShippingUseCase, CliConfig,
    ListAvailableCountries, ListAvailableCountriesUseCase, RunningTotal, ShippingCostDatabase,
    ShippingError, TomlConfig,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting shipping-cost CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let database = match load_database(&config) {
        Ok(database) => database,
        Err(e) => match e.downcast_ref::<ShippingError>() {
            Some(shipping_error) => {
                tracing::error!("❌ {:#}", e);
                exit_with(shipping_error);
            }
            None => return Err(e),
        },
    };
    for region in database.unrated_regions() {
        tracing::warn!("⚠️ Region {} has countries but no shipping rate", region);
    }

    let countries = ListAvailableCountriesUseCase::new(&database);
    if config.list {
        println!("{}", presentation::format_country_list(&countries.list()));
        return Ok(());
    }

    let calculator = RunningTotal::new(CalculateShippingUseCase::new(&database));
    if let Err(e) = run_session(&config, &countries, &calculator) {
        tracing::error!(
            "❌ Shipping calculation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        exit_with(&e);
    }

    if config.show_total {
        println!(
            "{}",
            presentation::render_total(calculator.total_cost(), calculator.handled(), config.format)?
        );
    }

    Ok(())
}

fn load_database(config: &CliConfig) -> anyhow::Result<ShippingCostDatabase> {
    let mut database = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading rate table from: {}", path);
            let toml_config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to read rate table '{}'", path))?;
            toml_config.validate()?;
            ShippingCostDatabase::from_config(&toml_config)?
        }
        None => ShippingCostDatabase::with_default_rates(),
    };

    for file in &config.lookup_files {
        database
            .load_country_lookup(file)
            .with_context(|| format!("failed to load country lookup '{}'", file))?;
    }

    Ok(database)
}

fn run_session<L, P>(config: &CliConfig, countries: &L, calculator: &P) -> shipping_cost::Result<()>
where
    L: ListAvailableCountries,
    P: CalculateShippingHandler,
{
    if let (Some(country), Some(weight)) = (&config.country, config.weight) {
        let request = CalculateShippingRequest::new(country.as_str(), weight)?;
        return presentation::write_response(&mut std::io::stdout(), calculator, request, config.format);
    }

    let options = SessionOptions {
        format: config.format,
        repeat: config.repeat,
    };
    presentation::run_session(
        &mut std::io::stdin().lock(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
        &countries.list(),
        calculator,
        options,
    )
}

fn exit_with(e: &ShippingError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
