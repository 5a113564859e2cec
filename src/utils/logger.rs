use std::io::{self, Stderr};
use tracing::Subscriber;
use tracing_subscriber::fmt::{self, format::DefaultFields, format::Format};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type StderrLayer<S> = fmt::Layer<S, DefaultFields, Format, fn() -> Stderr>;

/// Logs go to stderr so stdout carries only shipping results.
fn stderr_layer<S>() -> StderrLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(io::stderr as fn() -> Stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

fn env_filter_or(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

pub fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        env_filter_or("shipping_cost=debug,info")
    } else {
        env_filter_or("shipping_cost=warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer().compact())
        .init();
}

/// One JSON object per event, for log collectors.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(env_filter_or("shipping_cost=info"))
        .with(stderr_layer().json())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_layer_builds_compact_and_json() {
        let compact = tracing_subscriber::registry()
            .with(env_filter_or("shipping_cost=debug"))
            .with(stderr_layer().compact());
        tracing::subscriber::with_default(compact, || tracing::debug!("compact event"));

        let json = tracing_subscriber::registry()
            .with(env_filter_or("shipping_cost=info"))
            .with(stderr_layer().json());
        tracing::subscriber::with_default(json, || tracing::info!(cost = 5.0, "json event"));
    }
}
