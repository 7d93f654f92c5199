//! # prtg-rabbitmq
//!
//! A PRTG "EXE/Script Advanced" sensor for RabbitMQ. Each run polls the
//! Management HTTP API for one queue or exchange and prints a PRTG result
//! document with a fixed set of channels.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌───────────┐    ┌───────────┐
//! │   cli    │───▶│   fetch   │───▶│  extract  │───▶│  report   │───▶ stdout
//! │ (params) │    │ (one GET) │    │ (channels)│    │   (XML)   │
//! └────┬─────┘    └───────────┘    └───────────┘    └───────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │ credentials │◀── prtg-rabbitmq.toml | PRTG_RABBITMQ__* env
//! └─────────────┘
//! ```
//!
//! - **[`cli`]**: positional sensor parameters and usage text
//! - **[`credentials`]**: stored `user:password` lookup ([`CredentialStore`])
//! - **[`fetch`]**: the single authenticated request ([`Fetcher`])
//! - **[`extract`]**: payload to channel mapping, tolerant of missing fields
//! - **[`report`]**: the PRTG result document ([`Report`], [`Channel`])
//!
//! ## Usage
//!
//! ```bash
//! prtg-rabbitmq localhost:15672 guest guest queues %2F orders
//! prtg-rabbitmq localhost:15672 exchanges %2F amq.direct
//! ```
//!
//! ## As a library
//!
//! ```
//! use prtg_rabbitmq::{extract, Report};
//! use serde_json::json;
//!
//! let payload = json!({ "messages": 3, "consumers": 1 });
//! let report = Report::success(extract::extract(&payload, "queues").unwrap());
//! assert_eq!(report.get("Total").unwrap().value, 3.0);
//! ```

pub mod cli;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod report;
pub mod request;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use cli::{Args, Invocation, USAGE};
pub use credentials::{ConfigCredentialStore, CredentialStore};
pub use error::{ArgumentError, SensorError};
pub use fetch::Fetcher;
pub use report::{Channel, ChannelUnit, Report, EXIT_OK, EXIT_SYSTEM_ERROR};
pub use request::{Credentials, ResourceKind, ResourceRequest};

use std::collections::HashMap;

use tracing::{debug, warn};

/// Run the sensor for parsed command line arguments.
///
/// Argument problems are returned as errors and never produce a report.
/// Anything that goes wrong after that is folded into a failed [`Report`].
pub async fn run(args: &Args) -> Result<Report, ArgumentError> {
    let invocation = Invocation::from_params(&args.params)?;

    let store: Box<dyn CredentialStore> = if invocation.needs_store() {
        let path = args
            .config
            .clone()
            .unwrap_or_else(ConfigCredentialStore::default_path);
        match ConfigCredentialStore::load(&path) {
            Ok(store) => Box::new(store),
            Err(err) => return Ok(failure(err)),
        }
    } else {
        Box::new(HashMap::<String, String>::new())
    };

    let fetcher = match Fetcher::builder().build() {
        Ok(fetcher) => fetcher,
        Err(err) => return Ok(failure(err)),
    };

    run_invocation(invocation, store.as_ref(), &fetcher).await
}

/// Resolve credentials for `invocation`, then collect and package a report.
pub async fn run_invocation(
    invocation: Invocation,
    store: &dyn CredentialStore,
    fetcher: &Fetcher,
) -> Result<Report, ArgumentError> {
    let credentials = invocation.credentials(store)?;

    let report = match invocation.into_request(credentials) {
        Ok(request) => collect(&request, fetcher).await.unwrap_or_else(failure),
        Err(err) => failure(err),
    };
    Ok(report)
}

/// Fetch one resource and turn it into a successful report.
pub async fn collect(request: &ResourceRequest, fetcher: &Fetcher) -> Result<Report, SensorError> {
    let payload = fetcher.fetch(request).await?;
    let report = Report::success(extract::extract_kind(&payload, request.kind));
    debug!(kind = %request.kind, name = %request.name, "Collected channels:\n{}", report);
    Ok(report)
}

fn failure(err: SensorError) -> Report {
    warn!(error = %err, "Sensor run failed");
    Report::failure(err.to_string())
}
