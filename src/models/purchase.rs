//! Purchase objects as sent by the host platform.
//!
//! A purchase is an ordered collection of line items, each tagged with a deal
//! identifier and the payment method that paid for it, plus per-method payable
//! totals. The host platform owns these objects; this service only reads them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money;

/// A purchasable line item within a purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Deal this item was purchased from
    pub deal_id: String,

    /// Human-readable item name
    pub name: String,

    /// Payment method label that paid for this item
    pub payment_method: String,
}

/// Line items grouped under the deal they belong to.
///
/// Groups appear in first-seen deal order; items keep their order within each
/// group. Serialized as-is into the payment's `deals` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealGroup {
    pub deal_id: String,
    pub items: Vec<LineItem>,
}

/// A purchase as submitted by the host platform.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "totals": { "Credit (Stripe Direct Payments)": "25.00" },
///   "items": [
///     { "deal_id": "deal-a", "name": "Spa Day", "payment_method": "Credit (Stripe Direct Payments)" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    /// Host-platform purchase identifier
    pub id: Uuid,

    /// Payable total per payment method label, as decimal strings formatted
    /// upstream (may carry separators; parsed defensively)
    #[serde(default)]
    pub totals: HashMap<String, String>,

    /// Ordered line items
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Purchase {
    /// The payable total for a payment method, in cents.
    ///
    /// Methods with no recorded total owe nothing.
    pub fn total_cents_for(&self, payment_method: &str) -> i64 {
        self.totals
            .get(payment_method)
            .map(|total| money::to_cents(total))
            .unwrap_or(0)
    }

    /// The payable total for a payment method as the upstream decimal string.
    pub fn total_for(&self, payment_method: &str) -> &str {
        self.totals
            .get(payment_method)
            .map(String::as_str)
            .unwrap_or("0.00")
    }

    /// Group the line items paid via `payment_method` by deal identifier.
    ///
    /// Deal order follows the first appearance of each deal in the item list;
    /// item order within a deal is preserved.
    pub fn deal_groups(&self, payment_method: &str) -> Vec<DealGroup> {
        let mut groups: Vec<DealGroup> = Vec::new();
        for item in &self.items {
            if item.payment_method != payment_method {
                continue;
            }
            match groups.iter_mut().find(|g| g.deal_id == item.deal_id) {
                Some(group) => group.items.push(item.clone()),
                None => groups.push(DealGroup {
                    deal_id: item.deal_id.clone(),
                    items: vec![item.clone()],
                }),
            }
        }
        groups
    }

    /// Deal identifiers captured when this purchase completes.
    ///
    /// Every line item counts, regardless of which payment method paid for it;
    /// duplicates are kept so the list mirrors the item list one-to-one.
    pub fn captured_deal_ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.deal_id.clone()).collect()
    }
}
