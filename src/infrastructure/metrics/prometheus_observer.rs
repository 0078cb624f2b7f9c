//! Prometheus-backed observer.

use metrics::{Unit, counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{
    BuildError, Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder,
};
use std::time::Duration;

use crate::domain::observer::{Observer, StorageOperation, StorageOutcome};

const URLS_SHORTENED: &str = "urls_shortened_total";
const URLS_REDIRECTED: &str = "urls_redirected_total";
const URLS_NOT_FOUND: &str = "urls_not_found_total";
const INTERNAL_ERRORS: &str = "internal_errors_total";
const DB_OPERATIONS: &str = "db_operations_total";
const DB_OPERATION_DURATION: &str = "db_operation_duration_seconds";
const HTTP_REQUESTS: &str = "http_requests_total";
const HTTP_REQUEST_DURATION: &str = "http_request_duration_seconds";
const HTTP_RESPONSE_SIZE: &str = "http_response_size_bytes";

const DB_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0];
const HTTP_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
const SIZE_BUCKETS: &[f64] = &[100.0, 500.0, 1000.0, 5000.0, 10000.0, 50000.0];

/// Observer that records into a Prometheus recorder owned by this instance.
///
/// The recorder is never installed as the process-global `metrics` recorder;
/// every event is routed to it explicitly with [`metrics::with_local_recorder`].
pub struct PrometheusObserver {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
}

impl PrometheusObserver {
    /// Builds the recorder and registers metric descriptions.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if a histogram bucket set is invalid.
    pub fn new() -> Result<Self, BuildError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(Matcher::Full(DB_OPERATION_DURATION.to_string()), DB_BUCKETS)?
            .set_buckets_for_metric(
                Matcher::Full(HTTP_REQUEST_DURATION.to_string()),
                HTTP_BUCKETS,
            )?
            .set_buckets_for_metric(Matcher::Full(HTTP_RESPONSE_SIZE.to_string()), SIZE_BUCKETS)?
            .build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, register_descriptions);

        Ok(Self { recorder, handle })
    }

    /// Drains histogram buffers. Call periodically.
    pub fn run_upkeep(&self) {
        self.handle.run_upkeep();
    }
}

fn register_descriptions() {
    describe_counter!(URLS_SHORTENED, "Total number of URLs shortened");
    describe_counter!(URLS_REDIRECTED, "Total number of successful URL redirects");
    describe_counter!(URLS_NOT_FOUND, "Total number of URL not found errors");
    describe_counter!(INTERNAL_ERRORS, "Total number of internal server errors");
    describe_counter!(DB_OPERATIONS, "Total number of database operations");
    describe_histogram!(
        DB_OPERATION_DURATION,
        Unit::Seconds,
        "Duration of database operations in seconds"
    );
    describe_counter!(HTTP_REQUESTS, "Total number of HTTP requests");
    describe_histogram!(
        HTTP_REQUEST_DURATION,
        Unit::Seconds,
        "Duration of HTTP requests in seconds"
    );
    describe_histogram!(
        HTTP_RESPONSE_SIZE,
        Unit::Bytes,
        "Size of HTTP responses in bytes"
    );
}

impl Observer for PrometheusObserver {
    fn url_shortened(&self) {
        metrics::with_local_recorder(&self.recorder, || counter!(URLS_SHORTENED).increment(1));
    }

    fn url_redirected(&self) {
        metrics::with_local_recorder(&self.recorder, || counter!(URLS_REDIRECTED).increment(1));
    }

    fn url_not_found(&self) {
        metrics::with_local_recorder(&self.recorder, || counter!(URLS_NOT_FOUND).increment(1));
    }

    fn internal_error(&self) {
        metrics::with_local_recorder(&self.recorder, || counter!(INTERNAL_ERRORS).increment(1));
    }

    fn storage_operation(
        &self,
        operation: StorageOperation,
        outcome: StorageOutcome,
        elapsed: Duration,
    ) {
        metrics::with_local_recorder(&self.recorder, || {
            counter!(
                DB_OPERATIONS,
                "operation" => operation.as_str(),
                "status" => outcome.as_str()
            )
            .increment(1);
            histogram!(DB_OPERATION_DURATION, "operation" => operation.as_str())
                .record(elapsed.as_secs_f64());
        });
    }

    fn http_request(
        &self,
        method: &str,
        endpoint: &str,
        status: u16,
        response_bytes: u64,
        elapsed: Duration,
    ) {
        let method = method.to_string();
        let endpoint = endpoint.to_string();

        metrics::with_local_recorder(&self.recorder, || {
            counter!(
                HTTP_REQUESTS,
                "method" => method.clone(),
                "endpoint" => endpoint.clone(),
                "status_code" => status.to_string()
            )
            .increment(1);
            histogram!(
                HTTP_REQUEST_DURATION,
                "method" => method.clone(),
                "endpoint" => endpoint.clone()
            )
            .record(elapsed.as_secs_f64());
            histogram!(HTTP_RESPONSE_SIZE, "method" => method, "endpoint" => endpoint)
                .record(response_bytes as f64);
        });
    }

    fn render(&self) -> Option<String> {
        Some(self.handle.render())
    }
}
