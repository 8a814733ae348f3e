//! Request correlation identifier.
//!
//! Every HTTP request runs inside a [`TraceId::scope`]; code below the
//! handler reads it back with [`TraceId::current`] instead of taking it as a
//! parameter. Task-locals do not follow `tokio::spawn`, so futures handed to
//! another task must be wrapped with [`TraceId::inherit`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// Response header echoing the request's trace id.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Random per-request identifier.
///
/// # Examples
/// ```
/// use movie_catalog::domain::TraceId;
///
/// fn log_prefix() -> String {
///     TraceId::current().map_or_else(|| "-".to_owned(), |id| id.to_string())
/// }
/// assert_eq!(log_prefix(), "-");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the enclosing scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }

    /// Bind the caller's identifier to `fut` so it survives a `tokio::spawn`.
    ///
    /// The identifier is captured now, not on first poll.
    ///
    /// ```
    /// use movie_catalog::domain::TraceId;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let id = TraceId::generate();
    /// let seen = TraceId::scope(id, async {
    ///     tokio::spawn(TraceId::inherit(async { TraceId::current() })).await
    /// })
    /// .await;
    /// assert_eq!(seen.ok().flatten(), Some(id));
    /// # }
    /// ```
    pub fn inherit<Fut>(fut: Fut) -> impl Future<Output = Fut::Output>
    where
        Fut: Future,
    {
        let captured = Self::current();
        async move {
            if let Some(trace_id) = captured {
                CURRENT.scope(trace_id, fut).await
            } else {
                fut.await
            }
        }
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s).map(Self)
    }
}
