pub mod meter;

use anyhow::Context as _;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::{ExporterBuildError, WithExportConfig};
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use std::time::Duration;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

//EnvFilter has to be created per layer, it is not Clone

#[derive(Debug, Clone, serde::Deserialize)]
pub struct MonitoringConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default)]
    pub logs: EnvFilterConfig,
    #[serde(default)]
    pub traces: EnvFilterConfig,
    pub otlp: Option<OtlpConfig>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct EnvFilterConfig {
    pub default_level: String,
    #[serde(default)]
    pub filters: Vec<String>,
}

/// Without an url, telemetry is written to stdout.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct OtlpConfig {
    pub url: Option<String>,
}

fn default_service_name() -> String {
    "out-of-office".to_owned()
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            logs: EnvFilterConfig::default(),
            traces: EnvFilterConfig::default(),
            otlp: None,
        }
    }
}

impl Default for EnvFilterConfig {
    fn default() -> Self {
        Self {
            default_level: "info".to_owned(),
            filters: vec![],
        }
    }
}

impl EnvFilterConfig {
    fn env_filter(&self) -> anyhow::Result<EnvFilter> {
        let level: LevelFilter = self
            .default_level
            .parse()
            .with_context(|| format!("Invalid log level {}", self.default_level))?;

        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .parse(self.filters.join(","))
            .with_context(|| format!("Invalid log filters {:?}", self.filters))?;

        Ok(filter)
    }
}

impl MonitoringConfig {
    pub fn init(&self) -> anyhow::Result<()> {
        opentelemetry::global::set_text_map_propagator(TraceContextPropagator::default());

        let Some(otlp) = &self.otlp else {
            tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer())
                .with(self.logs.env_filter()?)
                .try_init()?;
            return Ok(());
        };

        let resource = Resource::builder()
            .with_attribute(KeyValue::new("service.name", self.service_name.clone()))
            .build();
        let url = otlp.url.clone();

        let fmt_layer = tracing_subscriber::fmt::layer().with_filter(self.logs.env_filter()?);

        let logger_provider = init_logs(resource.clone(), url.clone())?;
        let logging_layer =
            OpenTelemetryTracingBridge::new(&logger_provider).with_filter(self.logs.env_filter()?);

        let tracer = init_traces(resource.clone(), url.clone())?.tracer(self.service_name.clone());
        let tracing_layer = OpenTelemetryLayer::new(tracer).with_filter(self.traces.env_filter()?);

        opentelemetry::global::set_meter_provider(init_metrics(resource, url)?);

        tracing_subscriber::registry()
            .with(tracing_layer)
            .with(logging_layer)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }
}

fn init_traces(resource: Resource, url: Option<String>) -> Result<SdkTracerProvider, ExporterBuildError> {
    let builder = SdkTracerProvider::builder().with_resource(resource);

    let provider = match url {
        Some(url) => {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(url)
                .build()?;
            builder.with_batch_exporter(exporter).build()
        }
        None => builder
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build(),
    };

    Ok(provider)
}

fn init_metrics(resource: Resource, url: Option<String>) -> Result<SdkMeterProvider, ExporterBuildError> {
    let builder = SdkMeterProvider::builder().with_resource(resource);

    //Readers are generic over the exporter, so the provider is built per arm
    let provider = match url {
        Some(url) => {
            let exporter = opentelemetry_otlp::MetricExporter::builder()
                .with_tonic()
                .with_endpoint(url)
                .build()?;
            let reader = PeriodicReader::builder(exporter)
                .with_interval(Duration::from_secs(15))
                .build();
            builder.with_reader(reader).build()
        }
        None => {
            let reader = PeriodicReader::builder(opentelemetry_stdout::MetricExporter::default())
                .with_interval(Duration::from_secs(60))
                .build();
            builder.with_reader(reader).build()
        }
    };

    Ok(provider)
}

fn init_logs(resource: Resource, url: Option<String>) -> Result<SdkLoggerProvider, ExporterBuildError> {
    let builder = SdkLoggerProvider::builder().with_resource(resource);

    let provider = match url {
        Some(url) => {
            let exporter = opentelemetry_otlp::LogExporter::builder()
                .with_tonic()
                .with_endpoint(url)
                .build()?;
            builder.with_batch_exporter(exporter).build()
        }
        None => builder
            .with_simple_exporter(opentelemetry_stdout::LogExporter::default())
            .build(),
    };

    Ok(provider)
}
