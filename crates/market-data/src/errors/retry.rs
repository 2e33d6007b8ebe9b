/// Classification for retry policy.
///
/// Used by the retry loop to decide whether a failed attempt is worth repeating.
///
/// # Behavior Summary
///
/// | Class | Retried? | Examples |
/// |-------|----------|----------|
/// | `Never` | No | 404, 401, unreadable body |
/// | `WithBackoff` | Yes, until `max_retries` | connect error, timeout, 429, 500, 502, 504 |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - the request is fundamentally invalid or the failure is terminal.
    Never,

    /// Retry after an exponentially growing delay.
    ///
    /// Used for transient errors like rate limiting (429), gateway errors,
    /// dropped connections and timeouts.
    WithBackoff,
}
