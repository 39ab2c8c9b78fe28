//! Confirmed orders.

use crate::cart::LineItem;
use crate::checkout::{SettlementReceipt, SettlementRequest, ShippingDetails};
use crate::ids::OrderId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// What the customer sees after a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    /// Cart contents at the time of payment.
    pub items: Vec<LineItem>,
    pub total: Money,
    pub ship_to: ShippingDetails,
    pub card_last4: String,
    pub payment_reference: String,
    /// Unix timestamp.
    pub confirmed_at: i64,
}

impl OrderConfirmation {
    pub(crate) fn new(
        request: SettlementRequest,
        receipt: SettlementReceipt,
        ship_to: ShippingDetails,
    ) -> Self {
        Self {
            order_id: request.order_id,
            items: request.items,
            total: request.amount,
            ship_to,
            card_last4: request.card_last4,
            payment_reference: receipt.reference,
            confirmed_at: receipt.settled_at,
        }
    }

    /// Number of drinks in the order.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
