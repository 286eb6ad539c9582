use crate::domain::order::transition_for;
use crate::domain::ports::OrderStoreBox;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::{Value, json};
use sha2::Sha256;
use tracing::{error, info, warn};

type HmacSha256 = Hmac<Sha256>;

/// HTTP-shaped outcome of one webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookReply {
    pub status: u16,
    pub body: Value,
}

impl WebhookReply {
    fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }
}

/// Reconciles payment provider webhooks against the order store.
///
/// Holds no state between invocations beyond the store handle and the shared
/// secret, both injected at construction. `secret` is `None` when the
/// deployment never configured one; deliveries are then answered with 500 so
/// the provider keeps retrying until the operator fixes the configuration.
pub struct WebhookReconciler {
    store: OrderStoreBox,
    secret: Option<String>,
}

impl WebhookReconciler {
    pub fn new(store: OrderStoreBox, secret: Option<String>) -> Self {
        Self { store, secret }
    }

    /// Processes one webhook delivery and returns the reply to send.
    ///
    /// The signature is verified against the exact raw body bytes before
    /// anything is parsed. Status codes carry the retry contract: 4xx means
    /// the sender should not retry, 5xx means it should, and 200 is terminal
    /// even when `processed` is false (unmapped event, unknown order, or a
    /// replay of an already-applied transition).
    ///
    /// Duplicate deliveries of the same event are absorbed by the
    /// already-updated check. Out-of-order delivery of *different* events is
    /// not detected: a late `payment.captured` overwrites an earlier
    /// `payment.failed`.
    pub async fn handle(
        &self,
        method: &str,
        signature: Option<&str>,
        raw_body: &[u8],
    ) -> WebhookReply {
        if method != "POST" {
            return WebhookReply::new(405, json!({"error": "Method not allowed"}));
        }

        let Some(secret) = self.secret.as_deref() else {
            error!("webhook secret not configured");
            return WebhookReply::new(500, json!({"error": "Webhook secret not configured"}));
        };

        if !verify_signature(raw_body, signature, secret) {
            warn!("invalid webhook signature, request rejected");
            return WebhookReply::new(401, json!({"error": "Invalid signature"}));
        }

        let payload: Value = match serde_json::from_slice(raw_body) {
            Ok(payload) => payload,
            Err(_) => return WebhookReply::new(400, json!({"error": "Invalid JSON payload"})),
        };

        let event = payload.get("event").and_then(Value::as_str);
        let payment_id = payload
            .pointer("/payload/payment/entity")
            .filter(|entity| entity.is_object())
            .and_then(|entity| entity.get("id"))
            .and_then(Value::as_str);
        let (Some(event), Some(payment_id)) = (event, payment_id) else {
            return WebhookReply::new(400, json!({"error": "Missing event or payment entity"}));
        };

        info!(event, payment_id, "webhook received");

        let Some((payment_status, status)) = transition_for(event) else {
            // Unhandled event type: acknowledge so the provider stops retrying
            return WebhookReply::new(200, json!({"received": true, "processed": false}));
        };

        let order = match self.store.get(payment_id).await {
            Ok(order) => order,
            Err(e) => {
                error!(payment_id, error = %e, "order lookup failed");
                return WebhookReply::new(500, json!({"error": "Failed to update order"}));
            }
        };
        let Some(order) = order else {
            warn!(payment_id, "no order found for payment");
            return WebhookReply::new(
                200,
                json!({"received": true, "processed": false, "reason": "order_not_found"}),
            );
        };

        // Idempotency under at-least-once delivery: skip writes when the
        // order already sits in the target state
        if order.payment_status == payment_status && order.status == status {
            return WebhookReply::new(
                200,
                json!({"received": true, "processed": false, "reason": "already_updated"}),
            );
        }

        if let Err(e) = self
            .store
            .update_status(&order.id, payment_status, status, Utc::now())
            .await
        {
            error!(order_id = %order.id, error = %e, "failed to update order");
            return WebhookReply::new(500, json!({"error": "Failed to update order"}));
        }

        info!(order_id = %order.id, ?payment_status, ?status, "order updated");
        WebhookReply::new(
            200,
            json!({"received": true, "processed": true, "orderId": order.id}),
        )
    }
}

/// Checks the hex-encoded HMAC-SHA256 of the raw body against the header
/// value. `Mac::verify_slice` compares in constant time; a missing header, a
/// repeated header (collapsed to `None` by the HTTP adapter), or malformed
/// hex all fail the same way.
fn verify_signature(body: &[u8], signature: Option<&str>, secret: &str) -> bool {
    let Some(signature) = signature else {
        return false;
    };
    let Ok(provided) = hex::decode(signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&provided).is_ok()
}
