//! Connector for the Tara internet payment gateway.
//!
//! The gateway is driven through a three-phase remote protocol: a bearer
//! token is obtained from merchant credentials, a payment token is issued
//! against the invoice and the payer is redirected to the hosted payment
//! page with it, and once the payer returns through the callback the
//! settlement is confirmed with a verify call. Bearer tokens are short-lived
//! and acquired fresh for every operation; the gateway exposes no refresh
//! mechanism.
//!
//! All remote operations are stateless request/response calls. The
//! [`core::TaraGateway`] entry points for payment request, verification and
//! inquiry always return a result value and never propagate a fault to the
//! caller; only [`core::TaraGateway::authenticate`] surfaces errors, and its
//! two callers catch them exactly once.

pub mod configs;
pub mod connector;
pub mod consts;
pub mod core;
pub mod errors;
pub mod ext_traits;
pub mod http_client;
pub mod request;
pub mod services;
pub mod types;

pub use crate::{connector::Tara, core::TaraGateway};
