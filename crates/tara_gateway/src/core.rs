//! The gateway's high-level operations.
//!
//! `request_payment`, `verify_payment` and `inquire_payment` never return an
//! `Err`: every fault raised underneath (including authentication faults) is
//! caught here exactly once and folded into a failed result carrying a
//! display-ready message. [`TaraGateway::authenticate`] is the only
//! operation that surfaces errors, since authentication has no
//! partial-success to report.

use std::marker::PhantomData;

use error_stack::report;

use crate::{
    configs::{MessagesOptions, TaraGatewayAccount, TaraGatewayOptions},
    connector::{tara::transformers as tara, Tara},
    consts,
    errors::{ConnectorError, CustomResult},
    services,
    types::{
        AccessToken, AccessTokenRequestData, AuthenticateRouterData, ErrorResponse,
        InquiryRequestData, InquiryRouterData, Invoice, PaymentInquiryResult, PaymentRefundResult,
        PaymentRequestResult, PaymentTokenRequestData, PaymentTokenRouterData,
        PaymentVerifyResult, TaraCallbackResult, TaraPaymentDetails, VerificationStatus,
        VerifyRequestData, VerifyRouterData,
    },
};

/// One configured gateway instance.
///
/// Holds no per-transaction state: concurrent transactions share an instance
/// freely, and nothing is retained between operations beyond what the caller
/// passes in.
#[derive(Clone, Debug)]
pub struct TaraGateway {
    client: reqwest::Client,
    options: TaraGatewayOptions,
    messages: MessagesOptions,
}

impl TaraGateway {
    pub fn new(
        client: reqwest::Client,
        options: TaraGatewayOptions,
        messages: MessagesOptions,
    ) -> Self {
        Self {
            client,
            options,
            messages,
        }
    }

    /// Exchanges the account credentials for a short-lived bearer token.
    ///
    /// Fails on transport errors, non-2xx statuses, unparsable bodies,
    /// gateway-reported declines, and on a reported success that carries no
    /// token. Tokens are never cached: callers run this before every
    /// token-requiring call.
    #[tracing::instrument(skip_all)]
    pub async fn authenticate(
        &self,
        account: &TaraGatewayAccount,
    ) -> CustomResult<AccessToken, ConnectorError> {
        let connector = Tara;
        let router_data = AuthenticateRouterData {
            flow: PhantomData,
            account: account.clone(),
            access_token: None,
            request: AccessTokenRequestData,
            response: Err(ErrorResponse::get_not_implemented()),
        };

        let router_data = services::execute_connector_processing_step(
            &self.client,
            &connector,
            &router_data,
            &self.options,
        )
        .await?;

        match router_data.response {
            Ok(access_token) => Ok(access_token),
            Err(error) => Err(report!(ConnectorError::AuthenticationFailed {
                code: error.code,
                description: error.message,
            })),
        }
    }

    /// Requests a payment token for the invoice and produces the redirect
    /// form sending the payer to the hosted payment page.
    #[tracing::instrument(skip_all, fields(order_id = invoice.tracking_number))]
    pub async fn request_payment(
        &self,
        account: &TaraGatewayAccount,
        invoice: &Invoice,
        details: &TaraPaymentDetails,
    ) -> PaymentRequestResult {
        match self.request_payment_inner(account, invoice, details).await {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(?error, "payment request failed");
                PaymentRequestResult::Failed {
                    message: error.current_context().to_string(),
                }
            }
        }
    }

    async fn request_payment_inner(
        &self,
        account: &TaraGatewayAccount,
        invoice: &Invoice,
        details: &TaraPaymentDetails,
    ) -> CustomResult<PaymentRequestResult, ConnectorError> {
        let access_token = self.authenticate(account).await?;

        let connector = Tara;
        let router_data = PaymentTokenRouterData {
            flow: PhantomData,
            account: account.clone(),
            access_token: Some(access_token),
            request: PaymentTokenRequestData {
                invoice: invoice.clone(),
                details: details.clone(),
                payment_page_url: TaraGatewayOptions::environment_url(
                    &self.options.payment_url,
                    account.is_test,
                ),
            },
            response: Err(ErrorResponse::get_not_implemented()),
        };

        let router_data = services::execute_connector_processing_step(
            &self.client,
            &connector,
            &router_data,
            &self.options,
        )
        .await?;

        Ok(match router_data.response {
            Ok(data) => PaymentRequestResult::Succeeded {
                token: data.token,
                redirect_form: data.redirection_data,
            },
            Err(error) => PaymentRequestResult::Failed {
                message: self.failure_message(error),
            },
        })
    }

    /// Derives the callback outcome from the parameters the gateway
    /// appended to the payer's return. Pure and side-effect-free.
    pub fn handle_callback(&self, params: &tara::TaraCallbackParams) -> TaraCallbackResult {
        tara::build_callback_result(params, &self.messages)
    }

    /// Confirms the settlement of a callback that reported success.
    ///
    /// A callback that did not report success short-circuits to a failed
    /// outcome without touching the network: verify is meaningful only
    /// after a successful callback.
    #[tracing::instrument(skip_all, fields(order_id = callback.order_id))]
    pub async fn verify_payment(
        &self,
        account: &TaraGatewayAccount,
        callback: &TaraCallbackResult,
    ) -> PaymentVerifyResult {
        if !callback.is_succeeded {
            return PaymentVerifyResult::failed(callback.message.clone());
        }

        match self.verify_payment_inner(account, callback).await {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(?error, "payment verification failed");
                PaymentVerifyResult::failed(error.current_context().to_string())
            }
        }
    }

    async fn verify_payment_inner(
        &self,
        account: &TaraGatewayAccount,
        callback: &TaraCallbackResult,
    ) -> CustomResult<PaymentVerifyResult, ConnectorError> {
        let access_token = self.authenticate(account).await?;

        let connector = Tara;
        let router_data = VerifyRouterData {
            flow: PhantomData,
            account: account.clone(),
            access_token: Some(access_token),
            request: VerifyRequestData {
                token: callback.token.clone(),
            },
            response: Err(ErrorResponse::get_not_implemented()),
        };

        let router_data = services::execute_connector_processing_step(
            &self.client,
            &connector,
            &router_data,
            &self.options,
        )
        .await?;

        Ok(match router_data.response {
            Ok(data) => PaymentVerifyResult {
                status: VerificationStatus::Succeeded,
                transaction_code: data.transaction_code,
                message: self.messages.payment_succeeded.clone(),
                additional_data: vec![
                    ("token".to_string(), data.token),
                    ("type".to_string(), data.transaction_type),
                ],
            },
            Err(error) => PaymentVerifyResult::failed(self.failure_message(error)),
        })
    }

    /// Looks up the settlement state of an order on the gateway side.
    #[tracing::instrument(skip_all, fields(order_id = order_id))]
    pub async fn inquire_payment(
        &self,
        account: &TaraGatewayAccount,
        order_id: i64,
    ) -> PaymentInquiryResult {
        match self.inquire_payment_inner(account, order_id).await {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(?error, "payment inquiry failed");
                PaymentInquiryResult::failed(error.current_context().to_string())
            }
        }
    }

    async fn inquire_payment_inner(
        &self,
        account: &TaraGatewayAccount,
        order_id: i64,
    ) -> CustomResult<PaymentInquiryResult, ConnectorError> {
        let access_token = self.authenticate(account).await?;

        let connector = Tara;
        let router_data = InquiryRouterData {
            flow: PhantomData,
            account: account.clone(),
            access_token: Some(access_token),
            request: InquiryRequestData { order_id },
            response: Err(ErrorResponse::get_not_implemented()),
        };

        let router_data = services::execute_connector_processing_step(
            &self.client,
            &connector,
            &router_data,
            &self.options,
        )
        .await?;

        Ok(match router_data.response {
            Ok(data) => PaymentInquiryResult {
                status: VerificationStatus::Succeeded,
                message: self.messages.payment_succeeded.clone(),
                order_id: data.order_id,
                track_purchase_list: data.track_purchase_list,
            },
            Err(error) => PaymentInquiryResult::failed(self.failure_message(error)),
        })
    }

    /// The gateway exposes no refund capability; the operation is reported
    /// as unsupported instead of being emulated.
    pub fn refund(&self) -> PaymentRefundResult {
        let error = ConnectorError::NotSupported {
            message: "Refund".to_string(),
            connector: "Tara",
        };
        PaymentRefundResult {
            status: VerificationStatus::Failed,
            message: error.to_string(),
        }
    }

    /// Message selection shared by the never-throw operations: raw bodies
    /// pass through verbatim, gateway result codes go through the
    /// translator.
    fn failure_message(&self, error: ErrorResponse) -> String {
        if error.code == consts::NO_ERROR_CODE {
            error.message
        } else {
            tara::translate_result_code(&error.code, &self.messages.payment_failed)
        }
    }
}
