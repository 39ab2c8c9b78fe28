//! Checkout flow state machine.

use std::time::Duration;

use crate::cart::Cart;
use crate::checkout::{
    CancellationToken, OrderConfirmation, PaymentDetails, PaymentGateway, SettlementReceipt,
    SettlementRequest, ShippingDetails, DEFAULT_SETTLEMENT_TIMEOUT,
};
use crate::ids::OrderId;
use crate::store::{CartStore, Repository};
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutStep {
    /// Shipping address. Initial step.
    #[default]
    Shipping,
    /// Card details and settlement.
    Payment,
    /// Order placed. Terminal for the session.
    Confirmed,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Confirmed => "confirmed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Confirmed => "Confirmed",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Confirmed => 3,
        }
    }
}

/// One checkout session.
///
/// The flow only moves forward: `Shipping → Payment → Confirmed`. Leaving
/// checkout discards the flow; nothing here is persisted.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    /// Order being settled, if any.
    in_flight: Option<OrderId>,
    shipping: Option<ShippingDetails>,
    confirmation: Option<OrderConfirmation>,
    settlement_timeout: Duration,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    /// Start a new checkout session at the shipping step.
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::Shipping,
            in_flight: None,
            shipping: None,
            confirmation: None,
            settlement_timeout: DEFAULT_SETTLEMENT_TIMEOUT,
        }
    }

    /// Bound each settlement attempt by `timeout`.
    pub fn with_settlement_timeout(mut self, timeout: Duration) -> Self {
        self.settlement_timeout = timeout;
        self
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// True while a settlement attempt is in flight.
    pub fn is_processing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn shipping(&self) -> Option<&ShippingDetails> {
        self.shipping.as_ref()
    }

    /// The placed order, once confirmed.
    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Confirmed
    }

    /// Discard this session and start over at the shipping step.
    pub fn reset(&mut self) {
        let timeout = self.settlement_timeout;
        *self = Self::new().with_settlement_timeout(timeout);
    }

    /// Submit the shipping form.
    ///
    /// Moves to `Payment` when every required field is present. On a
    /// validation failure the flow stays at `Shipping`.
    pub fn submit_shipping(&mut self, details: ShippingDetails) -> Result<CheckoutStep, CommerceError> {
        self.expect_step(CheckoutStep::Shipping, CheckoutStep::Payment)?;
        details.validate()?;

        self.shipping = Some(details);
        self.step = CheckoutStep::Payment;
        tracing::info!(step = self.step.as_str(), "checkout advanced");
        Ok(self.step)
    }

    /// Start settlement: validate the payment form and mark the flow as
    /// processing.
    ///
    /// A second call while processing fails with `SettlementInProgress`, so
    /// the same order can never be settled twice.
    pub fn begin_settlement(
        &mut self,
        details: &PaymentDetails,
        cart: &Cart,
    ) -> Result<SettlementRequest, CommerceError> {
        self.expect_step(CheckoutStep::Payment, CheckoutStep::Confirmed)?;
        if self.is_processing() {
            return Err(CommerceError::SettlementInProgress);
        }
        details.validate()?;
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let request = SettlementRequest {
            order_id: OrderId::generate(),
            amount: cart.total(),
            card_last4: details.last4(),
            items: cart.items().to_vec(),
        };
        self.in_flight = Some(request.order_id.clone());
        tracing::info!(order = %request.order_id, amount = %request.amount, "settlement started");
        Ok(request)
    }

    /// Finish settlement with the gateway's outcome.
    ///
    /// Success confirms the order and clears the cart. Failure leaves the
    /// flow at `Payment` with processing off, so the customer can retry.
    /// A request other than the one `begin_settlement` returned is rejected
    /// and the in-flight settlement is left alone.
    pub fn complete_settlement<R: Repository<Cart>>(
        &mut self,
        request: SettlementRequest,
        outcome: Result<SettlementReceipt, CommerceError>,
        cart: &mut CartStore<R>,
    ) -> Result<&OrderConfirmation, CommerceError> {
        match self.in_flight.as_ref() {
            None => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: self.step.as_str().to_string(),
                    to: CheckoutStep::Confirmed.as_str().to_string(),
                })
            }
            Some(id) if *id != request.order_id => {
                return Err(CommerceError::ValidationError(format!(
                    "order {} is not the settlement in flight",
                    request.order_id
                )))
            }
            Some(_) => {}
        }
        self.in_flight = None;

        let receipt = match outcome {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::warn!(order = %request.order_id, error = %e, "settlement did not complete");
                return Err(e);
            }
        };

        let ship_to = self.shipping.clone().unwrap_or_default();
        self.step = CheckoutStep::Confirmed;
        cart.clear_cart();
        tracing::info!(order = %request.order_id, reference = %receipt.reference, "order confirmed");

        let confirmation = self
            .confirmation
            .insert(OrderConfirmation::new(request, receipt, ship_to));
        Ok(&*confirmation)
    }

    /// Submit the payment form and run settlement to completion.
    ///
    /// Processing is on for the duration of the gateway call, and is turned
    /// off again if this future is dropped before settlement finishes. Fails
    /// with `SettlementTimedOut` if the gateway takes longer than the
    /// configured timeout, and with `SettlementCancelled` if `cancel` fires
    /// first.
    pub async fn submit_payment<R, G>(
        &mut self,
        details: &PaymentDetails,
        cart: &mut CartStore<R>,
        gateway: &G,
        cancel: &CancellationToken,
    ) -> Result<OrderConfirmation, CommerceError>
    where
        R: Repository<Cart>,
        G: PaymentGateway + ?Sized,
    {
        let request = self.begin_settlement(details, cart.cart())?;

        let timeout = self.settlement_timeout;
        let guard = InFlightGuard::new(&mut self.in_flight);
        let outcome = match tokio::time::timeout(timeout, gateway.settle(&request, cancel)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(CommerceError::SettlementTimedOut(timeout)),
        };
        guard.disarm();

        self.complete_settlement(request, outcome, cart).cloned()
    }

    fn expect_step(&self, expected: CheckoutStep, to: CheckoutStep) -> Result<(), CommerceError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }
}

/// Clears the in-flight order when a settlement await is abandoned.
struct InFlightGuard<'a> {
    slot: &'a mut Option<OrderId>,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    fn new(slot: &'a mut Option<OrderId>) -> Self {
        Self { slot, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(order_id) = self.slot.take() {
            tracing::warn!(order = %order_id, "settlement abandoned before it finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Customization, LineItemInput};
    use crate::catalog::Catalog;
    use crate::checkout::{SimulatedGateway, DEFAULT_SETTLEMENT_LATENCY};
    use crate::ids::ProductId;
    use crate::money::Money;
    use crate::store::{CacheRepository, CART_KEY};
    use async_trait::async_trait;
    use brew_cache::Cache;

    type TestCart = CartStore<CacheRepository<Cart>>;

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            street: "123 Coffee Lane".to_string(),
            city: "New York".to_string(),
            zip: "10001".to_string(),
        }
    }

    fn card() -> PaymentDetails {
        PaymentDetails::new("4242 4242 4242 4242", "12/29", "123")
    }

    fn latte() -> LineItemInput {
        let catalog = Catalog::builtin();
        let product = catalog.get(&ProductId::new("v-latte")).unwrap();
        Customization::new().line_item(product, 1)
    }

    fn filled_cart() -> (Cache, TestCart) {
        let cache = Cache::in_memory();
        let mut cart = CartStore::load(CacheRepository::new(cache.clone(), CART_KEY));
        cart.add_item(latte());
        cart.add_item(latte());
        (cache, cart)
    }

    struct DecliningGateway;

    #[async_trait]
    impl PaymentGateway for DecliningGateway {
        async fn settle(
            &self,
            _request: &SettlementRequest,
            _cancel: &CancellationToken,
        ) -> Result<SettlementReceipt, CommerceError> {
            Err(CommerceError::SettlementFailed("card declined".to_string()))
        }
    }

    struct HangingGateway;

    #[async_trait]
    impl PaymentGateway for HangingGateway {
        async fn settle(
            &self,
            _request: &SettlementRequest,
            _cancel: &CancellationToken,
        ) -> Result<SettlementReceipt, CommerceError> {
            std::future::pending().await
        }
    }

    #[test]
    fn test_checkout_starts_at_shipping() {
        let flow = CheckoutFlow::new();
        assert_eq!(flow.step(), CheckoutStep::Shipping);
        assert!(!flow.is_processing());
        assert!(flow.confirmation().is_none());
    }

    #[test]
    fn test_shipping_advances_to_payment() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(flow.submit_shipping(shipping()).unwrap(), CheckoutStep::Payment);
        assert_eq!(flow.shipping().unwrap().city, "New York");
    }

    #[test]
    fn test_incomplete_shipping_stays_put() {
        let mut flow = CheckoutFlow::new();
        let details = ShippingDetails {
            street: String::new(),
            ..shipping()
        };

        let err = flow.submit_shipping(details).unwrap_err();
        assert!(matches!(err, CommerceError::CheckoutIncomplete(ref m) if m.contains("street address")));
        assert_eq!(flow.step(), CheckoutStep::Shipping);
    }

    #[test]
    fn test_payment_before_shipping_is_rejected() {
        let (_cache, cart) = filled_cart();
        let mut flow = CheckoutFlow::new();
        assert!(matches!(
            flow.begin_settlement(&card(), cart.cart()),
            Err(CommerceError::InvalidCheckoutTransition { .. })
        ));
        assert!(!flow.is_processing());
    }

    #[test]
    fn test_second_settlement_while_processing_is_rejected() {
        let (_cache, cart) = filled_cart();
        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(shipping()).unwrap();

        let request = flow.begin_settlement(&card(), cart.cart()).unwrap();
        assert!(flow.is_processing());
        assert_eq!(request.amount, Money::usd(1100));
        assert_eq!(request.card_last4, "4242");

        assert!(matches!(
            flow.begin_settlement(&card(), cart.cart()),
            Err(CommerceError::SettlementInProgress)
        ));
    }

    #[test]
    fn test_empty_cart_cannot_settle() {
        let mut cart = CartStore::load(CacheRepository::new(Cache::in_memory(), CART_KEY));
        cart.clear_cart();
        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(shipping()).unwrap();

        assert!(matches!(
            flow.begin_settlement(&card(), cart.cart()),
            Err(CommerceError::EmptyCart)
        ));
        assert!(!flow.is_processing());
    }

    #[test]
    fn test_complete_without_begin_is_rejected() {
        let (_cache, mut cart) = filled_cart();
        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(shipping()).unwrap();
        let request = SettlementRequest {
            order_id: OrderId::new("forged"),
            amount: Money::usd(1),
            card_last4: "0000".to_string(),
            items: vec![],
        };
        let receipt = SettlementReceipt {
            reference: "r".to_string(),
            amount: Money::usd(1),
            settled_at: 0,
        };

        assert!(flow.complete_settlement(request, Ok(receipt), &mut cart).is_err());
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_complete_with_other_order_is_rejected() {
        let (_cache, mut cart) = filled_cart();
        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(shipping()).unwrap();
        let request = flow.begin_settlement(&card(), cart.cart()).unwrap();

        let forged = SettlementRequest {
            order_id: OrderId::new("forged"),
            ..request.clone()
        };
        let receipt = SettlementReceipt {
            reference: "r".to_string(),
            amount: request.amount,
            settled_at: 0,
        };

        let err = flow
            .complete_settlement(forged, Ok(receipt.clone()), &mut cart)
            .unwrap_err();
        assert!(matches!(err, CommerceError::ValidationError(ref m) if m.contains("forged")));
        assert!(flow.is_processing());
        assert_eq!(flow.step(), CheckoutStep::Payment);
        assert!(!cart.is_empty());

        // The real request still completes.
        let order = flow.complete_settlement(request, Ok(receipt), &mut cart).unwrap();
        assert_eq!(order.total, Money::usd(1100));
        assert!(!flow.is_processing());
        assert!(cart.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_checkout_clears_cart() {
        let (cache, mut cart) = filled_cart();
        let mut flow = CheckoutFlow::new();
        let gateway = SimulatedGateway::default();
        let started = tokio::time::Instant::now();

        flow.submit_shipping(shipping()).unwrap();
        let order = flow
            .submit_payment(&card(), &mut cart, &gateway, &CancellationToken::new())
            .await
            .unwrap();

        assert!(started.elapsed() >= DEFAULT_SETTLEMENT_LATENCY);
        assert_eq!(flow.step(), CheckoutStep::Confirmed);
        assert!(!flow.is_processing());
        assert!(cart.is_empty());
        assert_eq!(order.total, Money::usd(1100));
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.ship_to.full_name(), "John Doe");
        assert_eq!(flow.confirmation(), Some(&order));

        // The cleared cart is what storage holds too.
        let saved: Cart = cache.get(CART_KEY).unwrap().unwrap();
        assert!(saved.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmed_is_terminal() {
        let (_cache, mut cart) = filled_cart();
        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(shipping()).unwrap();
        flow.submit_payment(&card(), &mut cart, &SimulatedGateway::default(), &CancellationToken::new())
            .await
            .unwrap();

        cart.add_item(latte());
        assert!(flow.submit_shipping(shipping()).is_err());
        assert!(flow
            .submit_payment(&card(), &mut cart, &SimulatedGateway::default(), &CancellationToken::new())
            .await
            .is_err());
        assert_eq!(cart.item_count(), 1);

        flow.reset();
        assert_eq!(flow.step(), CheckoutStep::Shipping);
        assert!(flow.confirmation().is_none());
    }

    #[tokio::test]
    async fn test_declined_payment_stays_at_payment() {
        let (_cache, mut cart) = filled_cart();
        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(shipping()).unwrap();

        let result = flow
            .submit_payment(&card(), &mut cart, &DecliningGateway, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(CommerceError::SettlementFailed(_))));
        assert_eq!(flow.step(), CheckoutStep::Payment);
        assert!(!flow.is_processing());
        assert_eq!(cart.item_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_settlement_keeps_cart() {
        let (_cache, mut cart) = filled_cart();
        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(shipping()).unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = flow
            .submit_payment(&card(), &mut cart, &SimulatedGateway::default(), &cancel)
            .await;

        assert!(matches!(result, Err(CommerceError::SettlementCancelled)));
        assert_eq!(flow.step(), CheckoutStep::Payment);
        assert!(!flow.is_processing());
        assert!(!cart.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_gateway_times_out() {
        let (_cache, mut cart) = filled_cart();
        let mut flow = CheckoutFlow::new().with_settlement_timeout(Duration::from_secs(5));
        flow.submit_shipping(shipping()).unwrap();

        let result = flow
            .submit_payment(&card(), &mut cart, &HangingGateway, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(CommerceError::SettlementTimedOut(d)) if d == Duration::from_secs(5)));
        assert!(!flow.is_processing());

        // A retry with a working gateway still goes through.
        let order = flow
            .submit_payment(&card(), &mut cart, &SimulatedGateway::default(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(order.total, Money::usd(1100));
        assert!(cart.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_settlement_releases_processing() {
        let (_cache, mut cart) = filled_cart();
        let mut flow = CheckoutFlow::new();
        flow.submit_shipping(shipping()).unwrap();
        let gateway = SimulatedGateway::default();

        // The caller gives up well before the gateway answers.
        let abandoned = tokio::time::timeout(
            Duration::from_millis(100),
            flow.submit_payment(&card(), &mut cart, &gateway, &CancellationToken::new()),
        )
        .await;

        assert!(abandoned.is_err());
        assert!(!flow.is_processing());
        assert_eq!(flow.step(), CheckoutStep::Payment);
        assert_eq!(cart.item_count(), 2);

        let order = flow
            .submit_payment(&card(), &mut cart, &gateway, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(order.total, Money::usd(1100));
        assert_eq!(flow.step(), CheckoutStep::Confirmed);
    }
}
