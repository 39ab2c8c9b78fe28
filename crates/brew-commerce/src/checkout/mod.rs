//! Checkout module.
//!
//! Contains the checkout step machine, the form data for each step,
//! payment settlement and the resulting order confirmation.

mod details;
mod flow;
mod order;
mod settlement;

pub use details::{PaymentDetails, ShippingDetails};
pub use flow::{CheckoutFlow, CheckoutStep};
pub use order::OrderConfirmation;
pub use settlement::{
    CancellationToken, PaymentGateway, SettlementReceipt, SettlementRequest, SimulatedGateway,
    DEFAULT_SETTLEMENT_LATENCY, DEFAULT_SETTLEMENT_TIMEOUT,
};
