pub mod transformers;

use error_stack::ResultExt;
use masking::{Mask, Maskable, PeekInterface};

use crate::{
    configs::TaraGatewayOptions,
    consts::{self, headers},
    errors::{ConnectorError, CustomResult},
    ext_traits::BytesExt,
    request::{Method, RequestBuilder},
    types::{
        self,
        api::{self, ConnectorCommon, ConnectorCommonExt, ConnectorIntegration},
    },
};

use transformers as tara;

#[derive(Debug, Clone)]
pub struct Tara;

impl ConnectorCommon for Tara {
    fn id(&self) -> &'static str {
        "tara"
    }

    fn base_url<'a>(&self, options: &'a TaraGatewayOptions) -> &'a str {
        &options.base_url
    }

    fn build_error_response(
        &self,
        res: types::Response,
    ) -> CustomResult<types::ErrorResponse, ConnectorError> {
        // The gateway answers non-2xx with an error page or an unstructured
        // payload; the raw body is the only usable diagnostic.
        Ok(types::ErrorResponse {
            status_code: res.status_code,
            code: consts::NO_ERROR_CODE.to_string(),
            message: String::from_utf8_lossy(&res.response).into_owned(),
            reason: None,
        })
    }
}

impl<Flow, Request, Response> ConnectorCommonExt<Flow, Request, Response> for Tara
where
    Self: ConnectorIntegration<Flow, Request, Response>,
{
    fn build_headers(
        &self,
        req: &types::TaraRouterData<Flow, Request, Response>,
        _options: &TaraGatewayOptions,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        let mut header = vec![(
            headers::ACCEPT.to_string(),
            self.get_content_type().to_string().into(),
        )];
        let access_token = req
            .access_token
            .clone()
            .ok_or(ConnectorError::FailedToObtainAuthType)?;
        header.push((
            headers::AUTHORIZATION.to_string(),
            format!("Bearer {}", access_token.token.peek()).into_masked(),
        ));
        Ok(header)
    }
}

impl ConnectorIntegration<api::Authenticate, types::AccessTokenRequestData, types::AccessToken>
    for Tara
{
    fn get_headers(
        &self,
        _req: &types::AuthenticateRouterData,
        _options: &TaraGatewayOptions,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        // No bearer yet; this call is what produces it.
        Ok(vec![(
            headers::ACCEPT.to_string(),
            <Self as ConnectorIntegration<
                api::Authenticate,
                types::AccessTokenRequestData,
                types::AccessToken,
            >>::get_content_type(self)
            .to_string()
            .into(),
        )])
    }

    fn get_url(
        &self,
        req: &types::AuthenticateRouterData,
        options: &TaraGatewayOptions,
    ) -> CustomResult<String, ConnectorError> {
        Ok(TaraGatewayOptions::environment_url(
            &options.authentication_url,
            req.account.is_test,
        ))
    }

    fn get_request_body(
        &self,
        req: &types::AuthenticateRouterData,
        _options: &TaraGatewayOptions,
    ) -> CustomResult<crate::request::RequestContent, ConnectorError> {
        let connector_req = tara::TaraAuthenticateRequest::from(&req.account);
        Ok(crate::request::RequestContent::Json(Box::new(connector_req)))
    }

    fn build_request(
        &self,
        req: &types::AuthenticateRouterData,
        options: &TaraGatewayOptions,
    ) -> CustomResult<Option<crate::request::Request>, ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(Method::Post)
                .url(&types::TaraAuthenticateType::get_url(self, req, options)?)
                .headers(types::TaraAuthenticateType::get_headers(
                    self, req, options,
                )?)
                .set_body(types::TaraAuthenticateType::get_request_body(
                    self, req, options,
                )?)
                .build(),
        ))
    }

    fn handle_response(
        &self,
        data: &types::AuthenticateRouterData,
        res: types::Response,
    ) -> CustomResult<types::AuthenticateRouterData, ConnectorError> {
        let response: tara::TaraAuthenticateResponse = res
            .response
            .parse_struct("TaraAuthenticateResponse")
            .change_context(ConnectorError::ResponseDeserializationFailed)?;
        tracing::info!(connector_response = ?response);
        types::AuthenticateRouterData::try_from(types::ResponseRouterData {
            response,
            data: data.clone(),
            http_code: res.status_code,
        })
    }
}

impl
    ConnectorIntegration<
        api::GetToken,
        types::PaymentTokenRequestData,
        types::PaymentTokenResponseData,
    > for Tara
{
    fn get_headers(
        &self,
        req: &types::PaymentTokenRouterData,
        options: &TaraGatewayOptions,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        self.build_headers(req, options)
    }

    fn get_url(
        &self,
        req: &types::PaymentTokenRouterData,
        options: &TaraGatewayOptions,
    ) -> CustomResult<String, ConnectorError> {
        Ok(TaraGatewayOptions::environment_url(
            &options.get_token_url,
            req.account.is_test,
        ))
    }

    fn get_request_body(
        &self,
        req: &types::PaymentTokenRouterData,
        _options: &TaraGatewayOptions,
    ) -> CustomResult<crate::request::RequestContent, ConnectorError> {
        let connector_req = tara::TaraGetTokenRequest::try_from(req)?;
        Ok(crate::request::RequestContent::Json(Box::new(connector_req)))
    }

    fn build_request(
        &self,
        req: &types::PaymentTokenRouterData,
        options: &TaraGatewayOptions,
    ) -> CustomResult<Option<crate::request::Request>, ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(Method::Post)
                .url(&types::TaraGetTokenType::get_url(self, req, options)?)
                .headers(types::TaraGetTokenType::get_headers(self, req, options)?)
                .set_body(types::TaraGetTokenType::get_request_body(
                    self, req, options,
                )?)
                .build(),
        ))
    }

    fn handle_response(
        &self,
        data: &types::PaymentTokenRouterData,
        res: types::Response,
    ) -> CustomResult<types::PaymentTokenRouterData, ConnectorError> {
        let response: tara::TaraGetTokenResponse = res
            .response
            .parse_struct("TaraGetTokenResponse")
            .change_context(ConnectorError::ResponseDeserializationFailed)?;
        tracing::info!(connector_response = ?response);
        types::PaymentTokenRouterData::try_from(types::ResponseRouterData {
            response,
            data: data.clone(),
            http_code: res.status_code,
        })
    }
}

impl ConnectorIntegration<api::Verify, types::VerifyRequestData, types::VerifyResponseData>
    for Tara
{
    fn get_headers(
        &self,
        req: &types::VerifyRouterData,
        options: &TaraGatewayOptions,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        self.build_headers(req, options)
    }

    fn get_url(
        &self,
        req: &types::VerifyRouterData,
        options: &TaraGatewayOptions,
    ) -> CustomResult<String, ConnectorError> {
        Ok(TaraGatewayOptions::environment_url(
            &options.verify_url,
            req.account.is_test,
        ))
    }

    fn get_request_body(
        &self,
        req: &types::VerifyRouterData,
        _options: &TaraGatewayOptions,
    ) -> CustomResult<crate::request::RequestContent, ConnectorError> {
        let connector_req = tara::TaraVerifyRequest::from(req);
        Ok(crate::request::RequestContent::Json(Box::new(connector_req)))
    }

    fn build_request(
        &self,
        req: &types::VerifyRouterData,
        options: &TaraGatewayOptions,
    ) -> CustomResult<Option<crate::request::Request>, ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(Method::Post)
                .url(&types::TaraVerifyType::get_url(self, req, options)?)
                .headers(types::TaraVerifyType::get_headers(self, req, options)?)
                .set_body(types::TaraVerifyType::get_request_body(
                    self, req, options,
                )?)
                .build(),
        ))
    }

    fn handle_response(
        &self,
        data: &types::VerifyRouterData,
        res: types::Response,
    ) -> CustomResult<types::VerifyRouterData, ConnectorError> {
        let response: tara::TaraVerifyResponse = res
            .response
            .parse_struct("TaraVerifyResponse")
            .change_context(ConnectorError::ResponseDeserializationFailed)?;
        tracing::info!(connector_response = ?response);
        types::VerifyRouterData::try_from(types::ResponseRouterData {
            response,
            data: data.clone(),
            http_code: res.status_code,
        })
    }
}

impl ConnectorIntegration<api::Inquiry, types::InquiryRequestData, types::InquiryResponseData>
    for Tara
{
    fn get_headers(
        &self,
        req: &types::InquiryRouterData,
        options: &TaraGatewayOptions,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        self.build_headers(req, options)
    }

    fn get_url(
        &self,
        req: &types::InquiryRouterData,
        options: &TaraGatewayOptions,
    ) -> CustomResult<String, ConnectorError> {
        Ok(TaraGatewayOptions::environment_url(
            &options.inquiry_url,
            req.account.is_test,
        ))
    }

    fn get_request_body(
        &self,
        req: &types::InquiryRouterData,
        _options: &TaraGatewayOptions,
    ) -> CustomResult<crate::request::RequestContent, ConnectorError> {
        let connector_req = tara::TaraInquiryRequest::from(req);
        Ok(crate::request::RequestContent::Json(Box::new(connector_req)))
    }

    fn build_request(
        &self,
        req: &types::InquiryRouterData,
        options: &TaraGatewayOptions,
    ) -> CustomResult<Option<crate::request::Request>, ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(Method::Post)
                .url(&types::TaraInquiryType::get_url(self, req, options)?)
                .headers(types::TaraInquiryType::get_headers(self, req, options)?)
                .set_body(types::TaraInquiryType::get_request_body(
                    self, req, options,
                )?)
                .build(),
        ))
    }

    fn handle_response(
        &self,
        data: &types::InquiryRouterData,
        res: types::Response,
    ) -> CustomResult<types::InquiryRouterData, ConnectorError> {
        let response: tara::TaraInquiryResponse = res
            .response
            .parse_struct("TaraInquiryResponse")
            .change_context(ConnectorError::ResponseDeserializationFailed)?;
        tracing::info!(connector_response = ?response);
        types::InquiryRouterData::try_from(types::ResponseRouterData {
            response,
            data: data.clone(),
            http_code: res.status_code,
        })
    }
}
