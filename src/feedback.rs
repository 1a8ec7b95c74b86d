//! Channel-based delivery of policy reports for interactive front-ends.

use secrecy::SecretString;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::policy::{MissingReport, Policy};

/// Computes `policy.missing(password)` and sends it on `tx`.
///
/// Nothing is sent when `token` was cancelled before evaluation, so a
/// front-end can drop stale requests while the user keeps typing.
pub async fn missing_tx(
    policy: &Policy,
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<MissingReport>,
) {
    if token.is_cancelled() {
        #[cfg(feature = "tracing")]
        tracing::debug!("Policy report cancelled before evaluation");
        return;
    }

    let report = policy.missing(password);

    if let Err(e) = tx.send(report).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send policy report: {}", e);
        #[cfg(not(feature = "tracing"))]
        let _ = e;
    }
}
