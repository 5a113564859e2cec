use crate::adapters::presentation::OutputFormat;
use crate::utils::error::{Result, ShippingError};
use crate::utils::validation::{validate_file_extensions, validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "shipping-cost")]
#[command(about = "Calculate the cost of shipping a parcel to a destination country")]
pub struct CliConfig {
    /// Destination country code (e.g. GB, DE, US)
    #[arg(short, long)]
    pub country: Option<String>,

    /// Parcel weight in kg; give it together with --country, or omit both to be prompted
    #[arg(short, long)]
    pub weight: Option<f64>,

    /// List the available destination countries and exit
    #[arg(long)]
    pub list: bool,

    /// TOML rate table replacing the built-in rates
    #[arg(long)]
    pub config: Option<String>,

    /// Extra country_code,region_code CSV files
    #[arg(long, value_delimiter = ',')]
    pub lookup_files: Vec<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the running total of all costs calculated in this session
    #[arg(long)]
    pub show_total: bool,

    /// Keep prompting for parcels until an empty country is entered
    #[arg(long)]
    pub repeat: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        validate_file_extensions("lookup_files", &self.lookup_files, &["csv"])?;

        match (&self.country, self.weight) {
            (Some(country), None) => Err(ShippingError::InvalidConfigValueError {
                field: "weight".to_string(),
                value: String::new(),
                reason: format!("--country {} needs --weight as well", country),
            }),
            (None, Some(weight)) => Err(ShippingError::InvalidConfigValueError {
                field: "country".to_string(),
                value: String::new(),
                reason: format!("--weight {} needs --country as well", weight),
            }),
            _ => Ok(()),
        }
    }
}
