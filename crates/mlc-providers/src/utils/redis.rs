//! Redis call helpers shared by the distributed store and the pub/sub bus

use mlc_domain::error::{Error, Result};
use redis::RedisError;
use std::future::Future;
use std::time::Duration;

/// Map a Redis error to the domain error
///
/// Transport failures become [`Error::Unavailable`] so the cache facade
/// degrades to a miss; protocol and type errors stay infrastructure errors.
pub fn map_redis_error(operation: &str, err: RedisError) -> Error {
    let message = format!("Redis {operation} failed: {err}");
    if err.is_io_error()
        || err.is_connection_dropped()
        || err.is_connection_refusal()
        || err.is_timeout()
    {
        Error::unavailable_with_source(message, err)
    } else {
        Error::infrastructure_with_source(message, err)
    }
}

/// Run a Redis call with a hard deadline
pub async fn with_timeout<T, F>(operation: &str, limit: Duration, call: F) -> Result<T>
where
    F: Future<Output = redis::RedisResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(map_redis_error(operation, e)),
        Err(_) => Err(Error::unavailable(format!(
            "Redis {operation} timed out after {}ms",
            limit.as_millis()
        ))),
    }
}

/// Open a client for a connection URL
pub fn open_client(url: &str) -> Result<redis::Client> {
    redis::Client::open(url).map_err(|e| {
        Error::configuration_with_source(format!("Invalid Redis URL '{url}': {e}"), e)
    })
}
