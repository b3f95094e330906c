//! Integration interface for the gateway's remote operations.
//!
//! Each remote call is described by a flow marker type and one
//! [`ConnectorIntegration`] implementation: how to build the request and how
//! to read the response. Execution lives in [`crate::services`]; nothing in
//! this module performs IO.

use masking::Maskable;

use crate::{
    configs::TaraGatewayOptions,
    consts,
    errors::{ConnectorError, CustomResult},
    request::{Request, RequestContent},
    types::{ErrorResponse, Response, TaraRouterData},
};

/// Bearer-token acquisition flow.
#[derive(Debug, Clone)]
pub struct Authenticate;

/// Payment-token acquisition flow.
#[derive(Debug, Clone)]
pub struct GetToken;

/// Post-payment verification flow.
#[derive(Debug, Clone)]
pub struct Verify;

/// Settlement inquiry flow.
#[derive(Debug, Clone)]
pub struct Inquiry;

/// Behaviour shared by every flow of the connector.
pub trait ConnectorCommon {
    /// Name of the connector (in lowercase).
    fn id(&self) -> &'static str;

    /// HTTP `Content-Type` used for POST requests.
    fn common_get_content_type(&self) -> &'static str {
        mime::APPLICATION_JSON.essence_str()
    }

    /// The base URL for interacting with the gateway's API.
    fn base_url<'a>(&self, options: &'a TaraGatewayOptions) -> &'a str;

    /// Common error response for replies outside the 2xx class.
    fn build_error_response(&self, res: Response) -> CustomResult<ErrorResponse, ConnectorError> {
        Ok(ErrorResponse {
            status_code: res.status_code,
            code: consts::NO_ERROR_CODE.to_string(),
            message: consts::NO_ERROR_MESSAGE.to_string(),
            reason: None,
        })
    }
}

/// One remote operation of the connector.
pub trait ConnectorIntegration<Flow, Req, Resp>: ConnectorCommon + Sync {
    fn get_headers(
        &self,
        _req: &TaraRouterData<Flow, Req, Resp>,
        _options: &TaraGatewayOptions,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(vec![])
    }

    fn get_content_type(&self) -> &'static str {
        self.common_get_content_type()
    }

    fn get_url(
        &self,
        _req: &TaraRouterData<Flow, Req, Resp>,
        _options: &TaraGatewayOptions,
    ) -> CustomResult<String, ConnectorError> {
        Ok(String::new())
    }

    fn get_request_body(
        &self,
        _req: &TaraRouterData<Flow, Req, Resp>,
        _options: &TaraGatewayOptions,
    ) -> CustomResult<RequestContent, ConnectorError> {
        Ok(RequestContent::Json(Box::new(serde_json::json!({}))))
    }

    fn build_request(
        &self,
        _req: &TaraRouterData<Flow, Req, Resp>,
        _options: &TaraGatewayOptions,
    ) -> CustomResult<Option<Request>, ConnectorError> {
        Ok(None)
    }

    fn handle_response(
        &self,
        data: &TaraRouterData<Flow, Req, Resp>,
        _res: Response,
    ) -> CustomResult<TaraRouterData<Flow, Req, Resp>, ConnectorError>
    where
        Flow: Clone,
        Req: Clone,
        Resp: Clone,
    {
        Ok(data.clone())
    }

    fn get_error_response(&self, res: Response) -> CustomResult<ErrorResponse, ConnectorError> {
        self.build_error_response(res)
    }
}

/// Shared header construction for flows carrying the bearer token.
pub trait ConnectorCommonExt<Flow, Req, Resp>:
    ConnectorCommon + ConnectorIntegration<Flow, Req, Resp>
{
    fn build_headers(
        &self,
        _req: &TaraRouterData<Flow, Req, Resp>,
        _options: &TaraGatewayOptions,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(Vec::new())
    }
}
