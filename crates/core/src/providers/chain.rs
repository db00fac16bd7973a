use std::future::Future;

use crate::errors::CoreError;

/// Try `attempt` on each candidate in order and return the first success.
///
/// Candidates run strictly one after another; a failure moves on to the
/// next one. If every candidate fails, all errors are returned in order
/// (empty when there were no candidates).
pub async fn first_success<I, T, F, Fut>(candidates: I, mut attempt: F) -> Result<T, Vec<CoreError>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, CoreError>>,
{
    let mut errors = Vec::new();
    for candidate in candidates {
        match attempt(candidate).await {
            Ok(value) => return Ok(value),
            Err(e) => errors.push(e),
        }
    }
    Err(errors)
}

/// A usable exchange rate is a finite number above zero.
pub fn validate_rate(provider: &str, rate: f64) -> Result<f64, CoreError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(CoreError::Api {
            provider: provider.to_string(),
            message: format!("Invalid rate returned: {rate} (must be finite and positive)"),
        })
    }
}
