use crate::domain::model::{CalculateShippingRequest, CalculateShippingResponse};
use crate::domain::ports::CalculateShippingHandler;
use crate::utils::error::{Result, ShippingError};
use std::collections::BTreeSet;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn format_country_list(countries: &BTreeSet<String>) -> String {
    countries.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}

pub fn format_response(response: &CalculateShippingResponse) -> String {
    format!(
        "Shipping cost of {:.2}kg to {} ({}): {:.2}",
        response.weight(),
        response.country_code(),
        response.region_code(),
        response.cost()
    )
}

pub fn render_response(response: &CalculateShippingResponse, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_response(response)),
        OutputFormat::Json => Ok(serde_json::to_string(response)?),
    }
}

pub fn render_total(total_cost: f64, handled: usize, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "Total shipping cost for {} parcel(s): {:.2}",
            handled, total_cost
        )),
        OutputFormat::Json => Ok(serde_json::to_string(&serde_json::json!({
            "handled": handled,
            "total_cost": total_cost,
        }))?),
    }
}

/// Asks for a country and a weight; `Ok(None)` when input ends or the country is left empty.
pub fn prompt_for_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    available: &BTreeSet<String>,
) -> Result<Option<CalculateShippingRequest>> {
    write!(output, "Select a country to ship to ({}): ", format_country_list(available))?;
    output.flush()?;
    let Some(country) = read_trimmed_line(input)? else {
        return Ok(None);
    };
    if country.is_empty() {
        return Ok(None);
    }

    write!(output, "Enter the weight of the package in kg: ")?;
    output.flush()?;
    let weight = read_trimmed_line(input)?.unwrap_or_default();
    let weight = weight
        .parse::<f64>()
        .map_err(|_| ShippingError::invalid_request("weight", format!("'{}' is not a number", weight)))?;

    CalculateShippingRequest::new(country, weight).map(Some)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub format: OutputFormat,
    /// Keep prompting after each parcel; recoverable errors are reported instead of ending the session.
    pub repeat: bool,
}

/// Prompts for parcels on `input`, writes results to `output` and recoverable errors to `errors`.
///
/// Ends on an empty country or end of input, after one parcel unless `repeat` is set,
/// or on the first error that is not recoverable.
pub fn run_session<R, W, E, H>(
    input: &mut R,
    output: &mut W,
    errors: &mut E,
    available: &BTreeSet<String>,
    calculator: &H,
    options: SessionOptions,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
    H: CalculateShippingHandler,
{
    loop {
        let outcome = match prompt_for_request(input, output, available) {
            Ok(None) => break,
            Ok(Some(request)) => write_response(output, calculator, request, options.format),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {}
            Err(e) if options.repeat && e.is_recoverable() => {
                tracing::debug!("recoverable error in session: {}", e);
                writeln!(errors, "❌ {}", e.user_friendly_message())?;
                writeln!(errors, "💡 {}", e.recovery_suggestion())?;
            }
            Err(e) => return Err(e),
        }

        if !options.repeat {
            break;
        }
    }

    Ok(())
}

pub fn write_response<W, H>(
    output: &mut W,
    calculator: &H,
    request: CalculateShippingRequest,
    format: OutputFormat,
) -> Result<()>
where
    W: Write,
    H: CalculateShippingHandler,
{
    let response = calculator.handle(request)?;
    writeln!(output, "{}", render_response(&response, format)?)?;
    Ok(())
}

fn read_trimmed_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::ShippingCostDatabase;
    use crate::app::running_total::RunningTotal;
    use crate::app::use_cases::calculate_shipping::CalculateShippingUseCase;
    use crate::domain::model::Region;
    use std::io::Cursor;

    struct SessionRun {
        result: Result<()>,
        output: String,
        errors: String,
        total_cost: f64,
        handled: usize,
    }

    fn run_with_input(input: &str, repeat: bool) -> SessionRun {
        let database = ShippingCostDatabase::with_default_rates();
        let calculator = RunningTotal::new(CalculateShippingUseCase::new(&database));
        let mut output = Vec::new();
        let mut errors = Vec::new();

        let result = run_session(
            &mut Cursor::new(input),
            &mut output,
            &mut errors,
            &countries(),
            &calculator,
            SessionOptions {
                format: OutputFormat::Text,
                repeat,
            },
        );

        SessionRun {
            result,
            output: String::from_utf8(output).unwrap(),
            errors: String::from_utf8(errors).unwrap(),
            total_cost: calculator.total_cost(),
            handled: calculator.handled(),
        }
    }

    fn countries() -> BTreeSet<String> {
        ["US", "DE", "GB"].iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_format_country_list() {
        assert_eq!(format_country_list(&countries()), "DE,GB,US");
        assert_eq!(format_country_list(&BTreeSet::new()), "");
    }

    #[test]
    fn test_render_response() {
        let response = CalculateShippingResponse::new("US", 3.0, Region::Row, 16.5);

        assert_eq!(
            render_response(&response, OutputFormat::Text).unwrap(),
            "Shipping cost of 3.00kg to US (ROW): 16.50"
        );

        let json: serde_json::Value =
            serde_json::from_str(&render_response(&response, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["country_code"], "US");
        assert_eq!(json["region_code"], "ROW");
        assert_eq!(json["cost"], 16.5);
    }

    #[test]
    fn test_render_total() {
        assert_eq!(
            render_total(10.0, 2, OutputFormat::Text).unwrap(),
            "Total shipping cost for 2 parcel(s): 10.00"
        );
        let json: serde_json::Value =
            serde_json::from_str(&render_total(10.0, 2, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["total_cost"], 10.0);
    }

    #[test]
    fn test_prompt_for_request() {
        let mut input = Cursor::new("DE\n4\n");
        let mut output = Vec::new();

        let request = prompt_for_request(&mut input, &mut output, &countries())
            .unwrap()
            .unwrap();

        assert_eq!(request.country_code(), "DE");
        assert_eq!(request.weight(), 4.0);
        let prompt = String::from_utf8(output).unwrap();
        assert!(prompt.starts_with("Select a country to ship to (DE,GB,US): "));
        assert!(prompt.ends_with("Enter the weight of the package in kg: "));
    }

    #[test]
    fn test_prompt_ends_on_empty_input() {
        let mut output = Vec::new();
        assert!(prompt_for_request(&mut Cursor::new(""), &mut output, &countries())
            .unwrap()
            .is_none());
        assert!(prompt_for_request(&mut Cursor::new("\n"), &mut output, &countries())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_prompt_rejects_bad_weight() {
        let mut output = Vec::new();
        for input in ["DE\nheavy\n", "DE\n0\n", "DE\n"] {
            let err = prompt_for_request(&mut Cursor::new(input), &mut output, &countries()).unwrap_err();
            assert!(matches!(err, ShippingError::InvalidRequest { ref field, .. } if field == "weight"));
        }
    }

    #[test]
    fn test_session_continues_after_bad_weight() {
        let run = run_with_input("DE\nheavy\nDE\n4\n\n", true);

        assert!(run.result.is_ok());
        assert!(run.errors.contains("'heavy' is not a number"));
        assert!(run.output.contains("Shipping cost of 4.00kg to DE (EUR): 5.00"));
        assert_eq!(run.total_cost, 5.0);
        assert_eq!(run.handled, 1);
    }

    #[test]
    fn test_session_continues_after_non_positive_weight() {
        let run = run_with_input("US\n-2\nUS\n0\nUS\n3\n", true);

        assert!(run.result.is_ok());
        assert_eq!(run.errors.matches("❌").count(), 2);
        assert_eq!(run.total_cost, 16.5);
    }

    #[test]
    fn test_session_continues_after_unknown_country() {
        let run = run_with_input("XX\n1\nDE\n4\n\n", true);

        assert!(run.result.is_ok());
        assert!(run.errors.contains("We do not ship to 'XX'"));
        assert_eq!(run.total_cost, 5.0);
        assert_eq!(run.handled, 1);
    }

    #[test]
    fn test_empty_country_ends_session_with_total() {
        let run = run_with_input("US\n3\nDE\n4\n\nGB\n1\n", true);

        assert!(run.result.is_ok());
        assert!(run.errors.is_empty());
        assert_eq!(run.output.matches("Shipping cost of").count(), 2);
        assert_eq!(run.total_cost, 21.5);
        assert_eq!(run.handled, 2);
    }

    #[test]
    fn test_single_parcel_session_stops_on_first_error() {
        let run = run_with_input("DE\nheavy\nDE\n4\n", false);
        assert!(matches!(run.result, Err(ShippingError::InvalidRequest { .. })));
        assert_eq!(run.handled, 0);

        let run = run_with_input("DE\n4\nUS\n3\n", false);
        assert!(run.result.is_ok());
        assert_eq!(run.handled, 1);
        assert_eq!(run.total_cost, 5.0);
    }
}
