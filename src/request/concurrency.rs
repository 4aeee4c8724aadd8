use std::time::Instant;

use futures::future::try_join_all;
use serde_json::Value;
use tracing::info;

use crate::error::Result;
use crate::network::session::build_blocking_client;
use crate::network::Session;
use crate::request::executor::fetch_single_with;
use crate::template::RequestTemplate;
use crate::utils::format_elapsed;

/// Runs every enumerated request of `template` concurrently on one session.
///
/// Results come back in enumeration order. The whole enumeration is drained
/// before anything is sent, so an enumeration error aborts the batch with no
/// request issued. The first failing request drops all the others.
pub async fn dispatch_batch<T: RequestTemplate>(template: &T) -> Result<Vec<Value>> {
    let config = template.config();
    let session = Session::open(&config.client, config.connection_limit)?;

    let tasks = template
        .request_args()?
        .map(|args| args.map(|args| template.send_request(&session, args)))
        .collect::<Result<Vec<_>>>()?;
    info!(
        tasks = tasks.len(),
        method = %config.method,
        connection_limit = session.connection_limit(),
        http_version = config.client.http_version.description(),
        "Dispatching batch"
    );

    let start = Instant::now();
    let responses = try_join_all(tasks).await?;
    info!("----- Total API response took {} seconds -----", format_elapsed(start.elapsed()));

    Ok(responses)
}

/// Issues every enumerated request one after another with the blocking
/// client. No concurrency; meant for debugging.
pub fn fetch_serial<T: RequestTemplate>(template: &T) -> Result<Vec<Value>> {
    let client = build_blocking_client(&template.config().client)?;
    let start = Instant::now();

    let mut results = Vec::new();
    for args in template.request_args()? {
        results.push(fetch_single_with(&client, template, args?)?);
    }

    info!(
        requests = results.len(),
        "----- Serial batch took {} seconds -----",
        format_elapsed(start.elapsed())
    );
    Ok(results)
}
