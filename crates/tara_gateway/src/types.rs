//! Data types exchanged between the flows and the connector implementation.

pub mod api;

use std::{collections::HashMap, marker::PhantomData};

use masking::Secret;
use serde::{Deserialize, Serialize};

use crate::{configs::TaraGatewayAccount, consts, request::Method};

/// An amount expressed in the currency's minor unit.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MinorUnit(i64);

impl MinorUnit {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flow data threaded through one connector call.
#[derive(Debug, Clone)]
pub struct TaraRouterData<Flow, Request, Response> {
    pub flow: PhantomData<Flow>,
    pub account: TaraGatewayAccount,
    /// Bearer token, present on flows that run after authentication.
    pub access_token: Option<AccessToken>,
    pub request: Request,
    pub response: Result<Response, ErrorResponse>,
}

/// Raw gateway response handed to `handle_response`/`get_error_response`.
#[derive(Clone, Debug)]
pub struct Response {
    pub headers: Option<http::HeaderMap>,
    pub response: bytes::Bytes,
    pub status_code: u16,
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub reason: Option<String>,
    pub status_code: u16,
}

impl ErrorResponse {
    pub(crate) fn get_not_implemented() -> Self {
        Self {
            code: consts::NO_ERROR_CODE.to_string(),
            message: "This step has not been implemented".to_string(),
            reason: None,
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }
}

/// Short-lived bearer token returned by the authenticate flow.
///
/// Never cached across operations: the gateway exposes no refresh mechanism,
/// so each request and each verify performs its own authentication.
#[derive(Clone, Debug)]
pub struct AccessToken {
    pub token: Secret<String>,
}

/// Instruction for sending the payer to the gateway's hosted payment page.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum RedirectForm {
    Form {
        endpoint: String,
        method: Method,
        form_fields: HashMap<String, String>,
    },
}

/// Request data for the authenticate flow. The credentials travel on the
/// account, so there is nothing else to carry.
#[derive(Debug, Clone, Default)]
pub struct AccessTokenRequestData;

/// The merchant-side order the gateway is asked to collect.
#[derive(Debug, Clone)]
pub struct Invoice {
    /// Merchant-assigned order id.
    pub tracking_number: i64,
    pub amount: MinorUnit,
    /// Where the gateway sends the payer back after the payment attempt.
    pub callback_url: String,
}

/// Per-service split of the invoice amount.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaraServiceAmount {
    pub service_id: i64,
    pub amount: i64,
}

/// A line item attached to the payment request.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaraInvoiceItem {
    pub name: String,
    pub code: String,
    pub count: i64,
    pub unit: i64,
    pub fee: i64,
    pub group: String,
    pub group_title: String,
    pub data: String,
}

/// Gateway-specific extensions to a payment request, accepted as an explicit
/// parameter rather than smuggled through the invoice.
#[derive(Clone, Debug, Default)]
pub struct TaraPaymentDetails {
    /// Used verbatim when non-empty; otherwise a single whole-invoice
    /// service amount is synthesized.
    pub service_amount_list: Vec<TaraServiceAmount>,
    pub invoice_item_list: Vec<TaraInvoiceItem>,
    pub mobile: String,
    pub additional_data: String,
    pub vat: i64,
}

#[derive(Debug, Clone)]
pub struct PaymentTokenRequestData {
    pub invoice: Invoice,
    pub details: TaraPaymentDetails,
    /// Environment-resolved hosted payment page URL the redirect form posts
    /// to.
    pub payment_page_url: String,
}

#[derive(Debug, Clone)]
pub struct PaymentTokenResponseData {
    pub token: String,
    pub redirection_data: RedirectForm,
}

#[derive(Debug, Clone)]
pub struct VerifyRequestData {
    /// The payment token echoed through the callback.
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct VerifyResponseData {
    /// The gateway's transaction reference number (`rrn`).
    pub transaction_code: Option<String>,
    pub token: String,
    pub transaction_type: String,
}

#[derive(Debug, Clone)]
pub struct InquiryRequestData {
    pub order_id: i64,
}

/// One purchase attempt returned by the inquiry endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaraTrackPurchase {
    pub token: String,
    pub result: String,
    pub description: String,
    pub do_time: String,
    // The gateway's JSON carries this misspelling.
    #[serde(rename = "serviveAmountList")]
    pub service_amount_list: Vec<TaraServiceAmount>,
    pub amount: String,
    pub rrn: String,
    #[serde(rename = "type")]
    pub purchase_type: String,
}

#[derive(Debug, Clone)]
pub struct InquiryResponseData {
    pub order_id: Option<String>,
    pub do_time: String,
    pub track_purchase_list: Vec<TaraTrackPurchase>,
}

/// Outcome of the payment-request operation. The operation never returns an
/// `Err`; every fault is folded into the `Failed` variant.
#[derive(Debug)]
pub enum PaymentRequestResult {
    /// The payer must now be redirected to the gateway with the enclosed
    /// auto-submit form.
    Succeeded {
        token: String,
        redirect_form: RedirectForm,
    },
    Failed {
        message: String,
    },
}

impl PaymentRequestResult {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerificationStatus {
    Succeeded,
    Failed,
}

/// Outcome of the verify operation.
#[derive(Debug)]
pub struct PaymentVerifyResult {
    pub status: VerificationStatus,
    /// The gateway's transaction reference number, present on success.
    pub transaction_code: Option<String>,
    pub message: String,
    /// Opaque attributes echoed by the gateway (token and purchase type),
    /// kept for persistence by the calling system.
    pub additional_data: Vec<(String, String)>,
}

impl PaymentVerifyResult {
    pub(crate) fn failed(message: String) -> Self {
        Self {
            status: VerificationStatus::Failed,
            transaction_code: None,
            message,
            additional_data: Vec::new(),
        }
    }
}

/// Outcome of the inquiry operation.
#[derive(Debug)]
pub struct PaymentInquiryResult {
    pub status: VerificationStatus,
    pub message: String,
    pub order_id: Option<String>,
    pub track_purchase_list: Vec<TaraTrackPurchase>,
}

impl PaymentInquiryResult {
    pub(crate) fn failed(message: String) -> Self {
        Self {
            status: VerificationStatus::Failed,
            message,
            order_id: None,
            track_purchase_list: Vec::new(),
        }
    }
}

/// Outcome of a refund request. The gateway has no refund capability, so
/// this is always a failure.
#[derive(Debug)]
pub struct PaymentRefundResult {
    pub status: VerificationStatus,
    pub message: String,
}

/// Normalized view of the parameters the gateway appends when the payer
/// returns from the hosted payment page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaraCallbackResult {
    pub is_succeeded: bool,
    pub result: String,
    pub description: String,
    pub token: String,
    pub channel_ref_number: String,
    pub additional_data: String,
    pub order_id: i64,
    pub message: String,
}

/// Wrapper pairing a parsed gateway response with the flow data it answers.
#[derive(Debug, Clone)]
pub struct ResponseRouterData<Flow, R, Request, Response> {
    pub response: R,
    pub data: TaraRouterData<Flow, Request, Response>,
    pub http_code: u16,
}

pub type AuthenticateRouterData =
    TaraRouterData<api::Authenticate, AccessTokenRequestData, AccessToken>;
pub type PaymentTokenRouterData =
    TaraRouterData<api::GetToken, PaymentTokenRequestData, PaymentTokenResponseData>;
pub type VerifyRouterData = TaraRouterData<api::Verify, VerifyRequestData, VerifyResponseData>;
pub type InquiryRouterData = TaraRouterData<api::Inquiry, InquiryRequestData, InquiryResponseData>;

pub type TaraAuthenticateType =
    dyn api::ConnectorIntegration<api::Authenticate, AccessTokenRequestData, AccessToken>;
pub type TaraGetTokenType =
    dyn api::ConnectorIntegration<api::GetToken, PaymentTokenRequestData, PaymentTokenResponseData>;
pub type TaraVerifyType =
    dyn api::ConnectorIntegration<api::Verify, VerifyRequestData, VerifyResponseData>;
pub type TaraInquiryType =
    dyn api::ConnectorIntegration<api::Inquiry, InquiryRequestData, InquiryResponseData>;
