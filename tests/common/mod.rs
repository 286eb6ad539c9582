use hmac::{Hmac, Mac};
use printdesk::application::reconciler::WebhookReconciler;
use printdesk::infrastructure::in_memory::InMemoryOrderStore;
use sha2::Sha256;

pub const TEST_SECRET: &str = "whsec_printdesk_test";

/// Hex-encoded HMAC-SHA256 of the payload, as Razorpay computes it.
pub fn sign(payload: &[u8], secret: &str) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

pub fn event_body(event: &str, payment_id: &str) -> Vec<u8> {
    serde_json::json!({
        "event": event,
        "payload": {"payment": {"entity": {"id": payment_id, "amount": 12000, "currency": "INR"}}}
    })
    .to_string()
    .into_bytes()
}

/// A reconciler sharing state with the given store, configured with the
/// test secret.
pub fn reconciler(store: &InMemoryOrderStore) -> WebhookReconciler {
    WebhookReconciler::new(Box::new(store.clone()), Some(TEST_SECRET.to_string()))
}
