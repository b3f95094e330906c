use std::collections::HashMap;

use masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use crate::{
    configs::{MessagesOptions, TaraGatewayAccount},
    consts,
    errors::{ConnectorError, CustomResult},
    request::Method,
    types::{
        api, AccessToken, AccessTokenRequestData, AuthenticateRouterData, ErrorResponse,
        InquiryRequestData, InquiryResponseData, InquiryRouterData, PaymentTokenRequestData,
        PaymentTokenResponseData, PaymentTokenRouterData, RedirectForm, ResponseRouterData,
        TaraCallbackResult, TaraInvoiceItem, TaraServiceAmount, TaraTrackPurchase,
        VerifyRequestData, VerifyResponseData, VerifyRouterData,
    },
};

fn is_success_code(result: &str) -> bool {
    !result.is_empty() && result.eq_ignore_ascii_case(consts::SUCCESS_RESULT_CODE)
}

#[derive(Debug, Serialize)]
pub struct TaraAuthenticateRequest {
    pub username: Secret<String>,
    pub password: Secret<String>,
}

impl From<&TaraGatewayAccount> for TaraAuthenticateRequest {
    fn from(account: &TaraGatewayAccount) -> Self {
        Self {
            username: account.username.clone(),
            password: account.password.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaraAuthenticateResponse {
    pub result: Option<String>,
    pub description: Option<String>,
    pub access_token: Option<Secret<String>>,
}

impl
    TryFrom<
        ResponseRouterData<
            api::Authenticate,
            TaraAuthenticateResponse,
            AccessTokenRequestData,
            AccessToken,
        >,
    > for AuthenticateRouterData
{
    type Error = error_stack::Report<ConnectorError>;

    fn try_from(
        item: ResponseRouterData<
            api::Authenticate,
            TaraAuthenticateResponse,
            AccessTokenRequestData,
            AccessToken,
        >,
    ) -> Result<Self, Self::Error> {
        let response = item.response;
        let result = response.result.unwrap_or_default();
        if !is_success_code(&result) {
            return Err(ConnectorError::AuthenticationFailed {
                code: result,
                description: response
                    .description
                    .unwrap_or_else(|| consts::NO_ERROR_MESSAGE.to_string()),
            }
            .into());
        }
        let token = response
            .access_token
            .filter(|token| !token.peek().is_empty())
            .ok_or(ConnectorError::MissingAccessToken)?;
        Ok(Self {
            response: Ok(AccessToken { token }),
            ..item.data
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaraGetTokenRequest {
    pub ip: String,
    pub service_amount_list: Vec<TaraServiceAmount>,
    pub tara_invoice_item_list: Vec<TaraInvoiceItem>,
    pub additional_data: String,
    pub call_back_url: String,
    pub amount: String,
    pub mobile: String,
    pub order_id: i64,
    pub vat: i64,
}

impl TryFrom<&PaymentTokenRouterData> for TaraGetTokenRequest {
    type Error = error_stack::Report<ConnectorError>;

    fn try_from(item: &PaymentTokenRouterData) -> Result<Self, Self::Error> {
        let invoice = &item.request.invoice;
        let details = &item.request.details;

        // An invoice without an explicit split pays the whole amount into
        // the default service.
        let service_amount_list = if details.service_amount_list.is_empty() {
            vec![TaraServiceAmount {
                service_id: 1,
                amount: invoice.amount.get_amount_as_i64(),
            }]
        } else {
            details.service_amount_list.clone()
        };

        Ok(Self {
            ip: item.account.ip.clone(),
            service_amount_list,
            tara_invoice_item_list: details.invoice_item_list.clone(),
            additional_data: details.additional_data.clone(),
            call_back_url: invoice.callback_url.clone(),
            amount: invoice.amount.to_string(),
            mobile: details.mobile.clone(),
            order_id: invoice.tracking_number,
            vat: details.vat,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TaraGetTokenResponse {
    pub result: Option<String>,
    pub description: Option<String>,
    pub token: Option<String>,
}

impl
    TryFrom<
        ResponseRouterData<
            api::GetToken,
            TaraGetTokenResponse,
            PaymentTokenRequestData,
            PaymentTokenResponseData,
        >,
    > for PaymentTokenRouterData
{
    type Error = error_stack::Report<ConnectorError>;

    fn try_from(
        item: ResponseRouterData<
            api::GetToken,
            TaraGetTokenResponse,
            PaymentTokenRequestData,
            PaymentTokenResponseData,
        >,
    ) -> Result<Self, Self::Error> {
        let response = item.response;
        let result = response.result.unwrap_or_default();
        if !is_success_code(&result) {
            return Ok(Self {
                response: Err(ErrorResponse {
                    code: result,
                    message: response
                        .description
                        .unwrap_or_else(|| consts::NO_ERROR_MESSAGE.to_string()),
                    reason: None,
                    status_code: item.http_code,
                }),
                ..item.data
            });
        }
        let token = response
            .token
            .filter(|token| !token.is_empty())
            .ok_or(ConnectorError::MissingRequiredField {
                field_name: "token",
            })?;

        // The payer reaches the hosted page through an auto-submitting POST
        // form carrying exactly these two fields.
        let form_fields = HashMap::from([
            (
                "username".to_string(),
                item.data.account.username.peek().clone(),
            ),
            ("token".to_string(), token.clone()),
        ]);
        let redirection_data = RedirectForm::Form {
            endpoint: item.data.request.payment_page_url.clone(),
            method: Method::Post,
            form_fields,
        };

        Ok(Self {
            response: Ok(PaymentTokenResponseData {
                token,
                redirection_data,
            }),
            ..item.data
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TaraVerifyRequest {
    pub ip: String,
    pub token: String,
}

impl From<&VerifyRouterData> for TaraVerifyRequest {
    fn from(item: &VerifyRouterData) -> Self {
        Self {
            ip: item.account.ip.clone(),
            token: item.request.token.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaraVerifyResponse {
    pub token: Option<String>,
    pub result: Option<String>,
    pub description: Option<String>,
    pub do_time: Option<String>,
    pub service_amount_list: Vec<TaraServiceAmount>,
    pub amount: Option<String>,
    pub rrn: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

impl
    TryFrom<
        ResponseRouterData<api::Verify, TaraVerifyResponse, VerifyRequestData, VerifyResponseData>,
    > for VerifyRouterData
{
    type Error = error_stack::Report<ConnectorError>;

    fn try_from(
        item: ResponseRouterData<
            api::Verify,
            TaraVerifyResponse,
            VerifyRequestData,
            VerifyResponseData,
        >,
    ) -> Result<Self, Self::Error> {
        let response = item.response;
        let result = response.result.unwrap_or_default();
        if !is_success_code(&result) {
            return Ok(Self {
                response: Err(ErrorResponse {
                    code: result,
                    message: response
                        .description
                        .unwrap_or_else(|| consts::NO_ERROR_MESSAGE.to_string()),
                    reason: None,
                    status_code: item.http_code,
                }),
                ..item.data
            });
        }
        Ok(Self {
            response: Ok(VerifyResponseData {
                transaction_code: response.rrn,
                token: response.token.unwrap_or_default(),
                transaction_type: response.transaction_type.unwrap_or_default(),
            }),
            ..item.data
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaraInquiryRequest {
    pub ip: String,
    pub order_id: i64,
}

impl From<&InquiryRouterData> for TaraInquiryRequest {
    fn from(item: &InquiryRouterData) -> Self {
        Self {
            ip: item.account.ip.clone(),
            order_id: item.request.order_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaraInquiryResponse {
    pub result: Option<String>,
    pub description: Option<String>,
    pub do_time: Option<String>,
    pub track_purchase_list: Vec<TaraTrackPurchase>,
    pub order_id: Option<String>,
}

impl
    TryFrom<
        ResponseRouterData<
            api::Inquiry,
            TaraInquiryResponse,
            InquiryRequestData,
            InquiryResponseData,
        >,
    > for InquiryRouterData
{
    type Error = error_stack::Report<ConnectorError>;

    fn try_from(
        item: ResponseRouterData<
            api::Inquiry,
            TaraInquiryResponse,
            InquiryRequestData,
            InquiryResponseData,
        >,
    ) -> Result<Self, Self::Error> {
        let response = item.response;
        let result = response.result.unwrap_or_default();
        if !is_success_code(&result) {
            return Ok(Self {
                response: Err(ErrorResponse {
                    code: result,
                    message: response
                        .description
                        .unwrap_or_else(|| consts::NO_ERROR_MESSAGE.to_string()),
                    reason: None,
                    status_code: item.http_code,
                }),
                ..item.data
            });
        }
        Ok(Self {
            response: Ok(InquiryResponseData {
                order_id: response.order_id,
                do_time: response.do_time.unwrap_or_default(),
                track_purchase_list: response.track_purchase_list,
            }),
            ..item.data
        })
    }
}

/// Maps a gateway result code to its merchant-facing description.
///
/// The table is a fixed contract with the gateway; codes outside it return
/// the caller-supplied fallback verbatim.
pub fn translate_result_code(result: &str, fallback: &str) -> String {
    match result {
        "0" => "موفق",
        "1" => "درخواست از IP غیر مجاز",
        "2" => "نام کاربری یا رمز عبور نامعتبر است",
        "3" => "کاربر دسترسی ندارد",
        "4" => "پذیرنده یافت نشد",
        "5" => "هدایت به صفحه پرداخت",
        "6" => "تراکنش یافت نشد",
        "7" => "شماره سرویس نامعتبر است",
        "8" => "توکن تکراری است",
        "9" => "مبالغ یکسان نیست",
        "10" => "کانال یافت نشد",
        "11" => "مبلغ بیشتر از حد مجاز",
        "12" => "مبلغ کمتر از حد مجاز",
        "13" => "مبلغ نمی تواند خالی باشد",
        "14" => "IP نمی تواد خالی باشد",
        "15" => "مبلغ نامعتبر می باشد",
        "16" => "لیست مبالغ سرویس خالی میباشد",
        "17" => "شناسه سرویس نامعتبر",
        "18" => "فرمت آدرس برگشتی صحیح نمی‌باشد",
        "19" => "خطای عمومی",
        "20" => "توکن یافت نشد",
        "21" => "شماره پیگیری به پذیرنده تعلق ندارد",
        "22" => "خطای عمومی",
        "23" => "تراکنش اصلی موفق نبوده است",
        _ => return fallback.to_string(),
    }
    .to_string()
}

/// The parameters the gateway delivers through the payer's browser, as
/// either query-string or form fields. Every field is optional on the wire.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaraCallbackParams {
    pub result: Option<String>,
    pub desc: Option<String>,
    pub token: Option<String>,
    pub channel_ref_number: Option<String>,
    pub additional_data: Option<String>,
    pub order_id: Option<String>,
}

impl TaraCallbackParams {
    /// Parses an urlencoded payload, which covers both the query-string and
    /// the form-body transport.
    pub fn from_urlencoded(encoded: &str) -> CustomResult<Self, ConnectorError> {
        use error_stack::ResultExt;
        serde_urlencoded::from_str(encoded)
            .change_context(ConnectorError::ResponseDeserializationFailed)
    }
}

/// Derives the callback outcome from the returned parameters.
///
/// A missing or empty `result` is a failure, never a success. The order id
/// parses totally: absent, empty or non-numeric values become zero.
pub fn build_callback_result(
    params: &TaraCallbackParams,
    messages: &MessagesOptions,
) -> TaraCallbackResult {
    let result = params.result.clone().unwrap_or_default();
    let is_succeeded = is_success_code(&result);

    let message = if is_succeeded {
        messages.payment_succeeded.clone()
    } else {
        translate_result_code(&result, &messages.payment_failed)
    };

    let order_id = params
        .order_id
        .as_deref()
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<i64>().ok())
        .unwrap_or_default();

    TaraCallbackResult {
        is_succeeded,
        result,
        description: params.desc.clone().unwrap_or_default(),
        token: params.token.clone().unwrap_or_default(),
        channel_ref_number: params.channel_ref_number.clone().unwrap_or_default(),
        additional_data: params.additional_data.clone().unwrap_or_default(),
        order_id,
        message,
    }
}

#[cfg(test)]
mod tests {
    use std::marker::PhantomData;

    use super::*;
    use crate::types::{Invoice, MinorUnit, TaraPaymentDetails};

    fn test_account() -> TaraGatewayAccount {
        TaraGatewayAccount {
            username: Secret::new("merchant".to_string()),
            password: Secret::new("secret".to_string()),
            ip: "10.0.0.1".to_string(),
            is_test: false,
        }
    }

    fn payment_token_router_data(details: TaraPaymentDetails) -> PaymentTokenRouterData {
        PaymentTokenRouterData {
            flow: PhantomData,
            account: test_account(),
            access_token: Some(AccessToken {
                token: Secret::new("T1".to_string()),
            }),
            request: PaymentTokenRequestData {
                invoice: Invoice {
                    tracking_number: 42,
                    amount: MinorUnit::new(10000),
                    callback_url: "https://merchant.example/callback".to_string(),
                },
                details,
                payment_page_url: "https://pay.tara360.ir/pay/api/ipgPurchase".to_string(),
            },
            response: Err(ErrorResponse::get_not_implemented()),
        }
    }

    #[test]
    fn known_result_codes_translate_to_fixed_descriptions() {
        let expected = [
            ("0", "موفق"),
            ("1", "درخواست از IP غیر مجاز"),
            ("2", "نام کاربری یا رمز عبور نامعتبر است"),
            ("3", "کاربر دسترسی ندارد"),
            ("4", "پذیرنده یافت نشد"),
            ("5", "هدایت به صفحه پرداخت"),
            ("6", "تراکنش یافت نشد"),
            ("7", "شماره سرویس نامعتبر است"),
            ("8", "توکن تکراری است"),
            ("9", "مبالغ یکسان نیست"),
            ("10", "کانال یافت نشد"),
            ("11", "مبلغ بیشتر از حد مجاز"),
            ("12", "مبلغ کمتر از حد مجاز"),
            ("13", "مبلغ نمی تواند خالی باشد"),
            ("14", "IP نمی تواد خالی باشد"),
            ("15", "مبلغ نامعتبر می باشد"),
            ("16", "لیست مبالغ سرویس خالی میباشد"),
            ("17", "شناسه سرویس نامعتبر"),
            ("18", "فرمت آدرس برگشتی صحیح نمی‌باشد"),
            ("19", "خطای عمومی"),
            ("20", "توکن یافت نشد"),
            ("21", "شماره پیگیری به پذیرنده تعلق ندارد"),
            ("22", "خطای عمومی"),
            ("23", "تراکنش اصلی موفق نبوده است"),
        ];
        for (code, description) in expected {
            assert_eq!(translate_result_code(code, "fallback"), description);
        }
    }

    #[test]
    fn unknown_result_codes_return_the_fallback_verbatim() {
        for code in ["24", "99", "", "abc", "-1"] {
            assert_eq!(translate_result_code(code, "fallback"), "fallback");
        }
    }

    #[test]
    fn callback_with_success_result_succeeds_regardless_of_other_fields() {
        let params = TaraCallbackParams {
            result: Some("0".to_string()),
            ..Default::default()
        };
        let outcome = build_callback_result(&params, &MessagesOptions::default());
        assert!(outcome.is_succeeded);
        assert_eq!(outcome.message, MessagesOptions::default().payment_succeeded);
        assert_eq!(outcome.order_id, 0);
    }

    #[test]
    fn callback_without_result_fails() {
        let outcome =
            build_callback_result(&TaraCallbackParams::default(), &MessagesOptions::default());
        assert!(!outcome.is_succeeded);
        assert_eq!(outcome.message, MessagesOptions::default().payment_failed);
    }

    #[test]
    fn callback_with_known_failure_code_carries_its_description() {
        let params = TaraCallbackParams {
            result: Some("8".to_string()),
            ..Default::default()
        };
        let outcome = build_callback_result(&params, &MessagesOptions::default());
        assert!(!outcome.is_succeeded);
        assert_eq!(outcome.message, "توکن تکراری است");
    }

    #[test]
    fn callback_order_id_parses_totally() {
        let mut params = TaraCallbackParams {
            result: Some("0".to_string()),
            order_id: Some("12345".to_string()),
            ..Default::default()
        };
        let messages = MessagesOptions::default();
        assert_eq!(build_callback_result(&params, &messages).order_id, 12345);

        params.order_id = Some(String::new());
        assert_eq!(build_callback_result(&params, &messages).order_id, 0);

        params.order_id = None;
        assert_eq!(build_callback_result(&params, &messages).order_id, 0);

        params.order_id = Some("not-a-number".to_string());
        assert_eq!(build_callback_result(&params, &messages).order_id, 0);
    }

    #[test]
    fn callback_parsing_is_idempotent() {
        let params = TaraCallbackParams {
            result: Some("0".to_string()),
            desc: Some("ok".to_string()),
            token: Some("P1".to_string()),
            channel_ref_number: Some("CH-9".to_string()),
            additional_data: Some("extra".to_string()),
            order_id: Some("7".to_string()),
        };
        let messages = MessagesOptions::default();
        assert_eq!(
            build_callback_result(&params, &messages),
            build_callback_result(&params, &messages),
        );
    }

    #[test]
    fn callback_params_deserialize_from_query_encoding() {
        let params = TaraCallbackParams::from_urlencoded(
            "result=0&desc=done&token=P1&channelRefNumber=CH-9&additionalData=x&orderId=12",
        )
        .unwrap();
        assert_eq!(params.result.as_deref(), Some("0"));
        assert_eq!(params.desc.as_deref(), Some("done"));
        assert_eq!(params.token.as_deref(), Some("P1"));
        assert_eq!(params.channel_ref_number.as_deref(), Some("CH-9"));
        assert_eq!(params.additional_data.as_deref(), Some("x"));
        assert_eq!(params.order_id.as_deref(), Some("12"));
    }

    #[test]
    fn get_token_request_synthesizes_the_default_service_amount() {
        let router_data = payment_token_router_data(TaraPaymentDetails::default());
        let request = TaraGetTokenRequest::try_from(&router_data).unwrap();
        assert_eq!(
            request.service_amount_list,
            vec![TaraServiceAmount {
                service_id: 1,
                amount: 10000,
            }],
        );
        assert_eq!(request.amount, "10000");
        assert_eq!(request.order_id, 42);
    }

    #[test]
    fn get_token_request_keeps_explicit_service_amounts_verbatim() {
        let details = TaraPaymentDetails {
            service_amount_list: vec![
                TaraServiceAmount {
                    service_id: 3,
                    amount: 4000,
                },
                TaraServiceAmount {
                    service_id: 4,
                    amount: 6000,
                },
            ],
            ..Default::default()
        };
        let router_data = payment_token_router_data(details.clone());
        let request = TaraGetTokenRequest::try_from(&router_data).unwrap();
        assert_eq!(request.service_amount_list, details.service_amount_list);
    }

    #[test]
    fn get_token_request_serializes_with_gateway_field_names() {
        let router_data = payment_token_router_data(TaraPaymentDetails::default());
        let request = TaraGetTokenRequest::try_from(&router_data).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        for field in [
            "ip",
            "serviceAmountList",
            "taraInvoiceItemList",
            "additionalData",
            "callBackUrl",
            "amount",
            "mobile",
            "orderId",
            "vat",
        ] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(value["serviceAmountList"][0]["serviceId"], 1);
    }

    #[test]
    fn get_token_success_yields_the_redirect_form() {
        let router_data = payment_token_router_data(TaraPaymentDetails::default());
        let response = TaraGetTokenResponse {
            result: Some("0".to_string()),
            description: None,
            token: Some("P1".to_string()),
        };
        let updated = PaymentTokenRouterData::try_from(ResponseRouterData {
            response,
            data: router_data,
            http_code: 200,
        })
        .unwrap();
        let data = updated.response.unwrap();
        assert_eq!(data.token, "P1");
        let RedirectForm::Form {
            endpoint,
            method,
            form_fields,
        } = data.redirection_data;
        assert_eq!(endpoint, "https://pay.tara360.ir/pay/api/ipgPurchase");
        assert_eq!(method, Method::Post);
        assert_eq!(form_fields.len(), 2);
        assert_eq!(form_fields["username"], "merchant");
        assert_eq!(form_fields["token"], "P1");
    }

    #[test]
    fn get_token_decline_surfaces_the_result_code() {
        let router_data = payment_token_router_data(TaraPaymentDetails::default());
        let response = TaraGetTokenResponse {
            result: Some("11".to_string()),
            description: Some("over limit".to_string()),
            token: None,
        };
        let updated = PaymentTokenRouterData::try_from(ResponseRouterData {
            response,
            data: router_data,
            http_code: 200,
        })
        .unwrap();
        let error = updated.response.unwrap_err();
        assert_eq!(error.code, "11");
        assert_eq!(error.message, "over limit");
    }

    #[test]
    fn authenticate_decline_is_an_error() {
        let router_data = AuthenticateRouterData {
            flow: PhantomData,
            account: test_account(),
            access_token: None,
            request: AccessTokenRequestData,
            response: Err(ErrorResponse::get_not_implemented()),
        };
        let response = TaraAuthenticateResponse {
            result: Some("2".to_string()),
            description: Some("bad credentials".to_string()),
            access_token: None,
        };
        let error = AuthenticateRouterData::try_from(ResponseRouterData {
            response,
            data: router_data,
            http_code: 200,
        })
        .unwrap_err();
        assert!(matches!(
            error.current_context(),
            ConnectorError::AuthenticationFailed { code, .. } if code == "2",
        ));
    }

    #[test]
    fn authenticate_success_without_token_is_an_error() {
        let router_data = AuthenticateRouterData {
            flow: PhantomData,
            account: test_account(),
            access_token: None,
            request: AccessTokenRequestData,
            response: Err(ErrorResponse::get_not_implemented()),
        };
        let response = TaraAuthenticateResponse {
            result: Some("0".to_string()),
            description: None,
            access_token: Some(Secret::new(String::new())),
        };
        let error = AuthenticateRouterData::try_from(ResponseRouterData {
            response,
            data: router_data,
            http_code: 200,
        })
        .unwrap_err();
        assert!(matches!(
            error.current_context(),
            ConnectorError::MissingAccessToken,
        ));
    }
}
