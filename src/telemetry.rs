//! Tracing subscriber setup with optional OTLP export

use anyhow::{Context, Result};
use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::{LogExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

const SERVICE: &str = "weather-service";

/// Keeps exporters alive; flushes them on [`Telemetry::shutdown`]
#[derive(Default)]
pub struct Telemetry {
    tracer_provider: Option<SdkTracerProvider>,
    logger_provider: Option<SdkLoggerProvider>,
}

impl Telemetry {
    pub fn shutdown(self) {
        if let Some(provider) = self.tracer_provider {
            if let Err(e) = provider.shutdown() {
                eprintln!("Failed to flush trace exporter: {e}");
            }
        }
        if let Some(provider) = self.logger_provider {
            if let Err(e) = provider.shutdown() {
                eprintln!("Failed to flush log exporter: {e}");
            }
        }
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LoggingConfig) -> Result<Telemetry> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .context("Invalid log filter")?;

    let json = config.format == "json";
    let pretty_layer = (!json).then(fmt::layer);
    let json_layer = json.then(|| fmt::layer().json());

    let mut telemetry = Telemetry::default();
    let (trace_layer, log_layer) = match &config.otlp_endpoint {
        Some(endpoint) => {
            let resource = Resource::builder()
                .with_attributes([
                    KeyValue::new(SERVICE_NAME, SERVICE),
                    KeyValue::new(SERVICE_VERSION, crate::VERSION),
                ])
                .build();

            let span_exporter = SpanExporter::builder()
                .with_http()
                .with_endpoint(format!("{}/v1/traces", endpoint.trim_end_matches('/')))
                .build()
                .context("Failed to create OTLP span exporter")?;
            let tracer_provider = SdkTracerProvider::builder()
                .with_batch_exporter(span_exporter)
                .with_resource(resource.clone())
                .build();

            let log_exporter = LogExporter::builder()
                .with_http()
                .with_endpoint(format!("{}/v1/logs", endpoint.trim_end_matches('/')))
                .build()
                .context("Failed to create OTLP log exporter")?;
            let logger_provider = SdkLoggerProvider::builder()
                .with_batch_exporter(log_exporter)
                .with_resource(resource)
                .build();

            let trace_layer =
                tracing_opentelemetry::layer().with_tracer(tracer_provider.tracer(SERVICE));
            let log_layer = OpenTelemetryTracingBridge::new(&logger_provider);

            telemetry.tracer_provider = Some(tracer_provider);
            telemetry.logger_provider = Some(logger_provider);
            (Some(trace_layer), Some(log_layer))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty_layer)
        .with(json_layer)
        .with(trace_layer)
        .with(log_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(telemetry)
}
