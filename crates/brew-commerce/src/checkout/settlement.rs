//! Payment settlement.
//!
//! Settlement is the one asynchronous step in checkout. It goes through a
//! [`PaymentGateway`]; the storefront ships with [`SimulatedGateway`], which
//! waits a fixed latency and approves every request.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::cart::LineItem;
use crate::ids::OrderId;
use crate::money::Money;
use crate::CommerceError;

/// Latency of the simulated gateway.
pub const DEFAULT_SETTLEMENT_LATENCY: Duration = Duration::from_millis(2000);

/// Upper bound on a single settlement attempt.
pub const DEFAULT_SETTLEMENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared cancellation signal for an in-flight settlement.
///
/// Clones observe the same signal. Once cancelled, a token stays cancelled.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    state: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    /// Create a new non-cancelled token.
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    /// Signal cancellation.
    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// Resolve once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// What the gateway is asked to settle.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementRequest {
    /// Id the order will carry if settlement succeeds.
    pub order_id: OrderId,
    pub amount: Money,
    pub card_last4: String,
    /// Cart contents at the moment settlement began.
    pub items: Vec<LineItem>,
}

/// Proof of a successful settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    /// Gateway-side reference.
    pub reference: String,
    pub amount: Money,
    /// Unix timestamp.
    pub settled_at: i64,
}

/// Something that can take money.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Settle `request`, giving up with `SettlementCancelled` when `cancel`
    /// fires first.
    async fn settle(
        &self,
        request: &SettlementRequest,
        cancel: &CancellationToken,
    ) -> Result<SettlementReceipt, CommerceError>;
}

/// Gateway stand-in that always approves after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    latency: Duration,
}

impl SimulatedGateway {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLEMENT_LATENCY)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn settle(
        &self,
        request: &SettlementRequest,
        cancel: &CancellationToken,
    ) -> Result<SettlementReceipt, CommerceError> {
        tracing::debug!(order = %request.order_id, amount = %request.amount, "simulating settlement");

        tokio::select! {
            _ = cancel.cancelled() => Err(CommerceError::SettlementCancelled),
            _ = tokio::time::sleep(self.latency) => Ok(SettlementReceipt {
                reference: format!("sim_{}", uuid::Uuid::new_v4().simple()),
                amount: request.amount,
                settled_at: current_timestamp(),
            }),
        }
    }
}

/// Get current Unix timestamp.
pub(crate) fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
