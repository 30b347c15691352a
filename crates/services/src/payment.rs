//! Payment gateway trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use domain::{Money, PaymentMethodKind};

use crate::error::ServiceError;

/// Result of a successful authorization.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    /// The confirmation ID assigned by the gateway.
    pub confirmation_id: String,
}

/// Trait for payment processing operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Authorizes a charge for an order total.
    async fn authorize(
        &self,
        method: PaymentMethodKind,
        amount: Money,
    ) -> Result<PaymentReceipt, ServiceError>;
}

#[derive(Debug, Default)]
struct GatewayState {
    authorizations: HashMap<String, (PaymentMethodKind, Money)>,
    next_id: u32,
    fail_on_authorize: bool,
}

/// In-memory payment gateway simulation.
///
/// Charges always succeed (unless failure injection is on) after a fixed
/// artificial delay standing in for network latency.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<GatewayState>>,
    latency: Duration,
}

impl InMemoryPaymentGateway {
    /// Creates a gateway with no artificial latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway that sleeps for `latency` before answering.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            state: Arc::default(),
            latency,
        }
    }

    /// Configures the gateway to decline the next charges.
    pub fn set_fail_on_authorize(&self, fail: bool) {
        self.state.write().unwrap().fail_on_authorize = fail;
    }

    /// Returns the number of successful authorizations.
    pub fn authorization_count(&self) -> usize {
        self.state.read().unwrap().authorizations.len()
    }

    /// Returns true if a charge exists with the given confirmation ID.
    pub fn has_authorization(&self, confirmation_id: &str) -> bool {
        self.state
            .read()
            .unwrap()
            .authorizations
            .contains_key(confirmation_id)
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn authorize(
        &self,
        method: PaymentMethodKind,
        amount: Money,
    ) -> Result<PaymentReceipt, ServiceError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut state = self.state.write().unwrap();

        if state.fail_on_authorize {
            return Err(ServiceError::Gateway("Payment declined".to_string()));
        }

        state.next_id += 1;
        let confirmation_id = format!("PAY-{:04}", state.next_id);
        state
            .authorizations
            .insert(confirmation_id.clone(), (method, amount));

        Ok(PaymentReceipt { confirmation_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_authorize() {
        let gateway = InMemoryPaymentGateway::new();
        let amount = Money::from_cents(5000);

        let receipt = gateway
            .authorize(PaymentMethodKind::Card, amount)
            .await
            .unwrap();
        assert!(receipt.confirmation_id.starts_with("PAY-"));
        assert_eq!(gateway.authorization_count(), 1);
        assert!(gateway.has_authorization(&receipt.confirmation_id));
    }

    #[tokio::test]
    async fn test_fail_on_authorize() {
        let gateway = InMemoryPaymentGateway::new();
        gateway.set_fail_on_authorize(true);

        let result = gateway
            .authorize(PaymentMethodKind::Card, Money::from_cents(5000))
            .await;
        assert!(result.is_err());
        assert_eq!(gateway.authorization_count(), 0);
    }

    #[tokio::test]
    async fn test_sequential_confirmation_ids() {
        let gateway = InMemoryPaymentGateway::new();
        let amount = Money::from_cents(1000);

        let r1 = gateway
            .authorize(PaymentMethodKind::Card, amount)
            .await
            .unwrap();
        let r2 = gateway
            .authorize(PaymentMethodKind::CashOnDelivery, amount)
            .await
            .unwrap();

        assert_eq!(r1.confirmation_id, "PAY-0001");
        assert_eq!(r2.confirmation_id, "PAY-0002");
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let gateway = InMemoryPaymentGateway::with_latency(Duration::from_millis(20));
        let start = std::time::Instant::now();

        gateway
            .authorize(PaymentMethodKind::Card, Money::from_cents(1000))
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
