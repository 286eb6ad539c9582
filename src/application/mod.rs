//! Application layer containing the webhook reconciliation logic.
//!
//! This module defines the `WebhookReconciler`, which processes payment
//! provider callbacks one request at a time against an injected order store.

pub mod reconciler;
