//! Checkout state captured at form submission.
//!
//! Card data is an explicit parameter object that travels with the request; it
//! is never cached or stored. Only the masked card number survives into the
//! payment record.

use serde::{Deserialize, Serialize};

/// Raw card fields entered at checkout.
///
/// Expiration fields are strings as entered in the form; the charge builder
/// normalizes the year to two digits before transmission.
#[derive(Debug, Clone, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub exp_month: String,
    pub exp_year: String,
    pub cvc: String,
}

/// Billing contact used for the cardholder name.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingContact {
    pub first_name: String,
    pub last_name: String,
}

/// Shipping address snapshot, copied field-by-field onto the payment when
/// present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub zone: String,
    pub postal_code: String,
    pub country: String,
}

/// Everything the charge builder needs from the checkout submission.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutContext {
    pub card: CardDetails,
    pub billing: BillingContact,
    pub shipping: Option<ShippingAddress>,
}
