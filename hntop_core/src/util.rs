use std::{future::Future, time::Duration};

use futures::FutureExt;

use crate::error::{Error, Result};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Bound `f` by `duration`, reporting an elapsed deadline as `Error::Timeout`.
pub fn timeout<T>(duration: Duration, f: impl Future<Output = Result<T>>) -> impl Future<Output = Result<T>> {
    tokio::time::timeout(duration, f).map(move |result| {
        result.unwrap_or_else(|_| Err(Error::Timeout(format!("after {} ms", duration.as_millis()))))
    })
}
