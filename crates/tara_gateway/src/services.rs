//! Driving one connector flow from built request to interpreted response.

use error_stack::ResultExt;

use crate::{
    configs::TaraGatewayOptions,
    errors::{ConnectorError, CustomResult},
    http_client,
    types::{api::ConnectorIntegration, Response, TaraRouterData},
};

/// Builds the flow's request, sends it, and hands the raw response to the
/// flow's own interpretation: `handle_response` for the 2xx class,
/// `get_error_response` for everything else.
pub async fn execute_connector_processing_step<Flow, Req, Resp>(
    client: &reqwest::Client,
    connector_integration: &(dyn ConnectorIntegration<Flow, Req, Resp>),
    router_data: &TaraRouterData<Flow, Req, Resp>,
    options: &TaraGatewayOptions,
) -> CustomResult<TaraRouterData<Flow, Req, Resp>, ConnectorError>
where
    Flow: Clone,
    Req: Clone,
    Resp: Clone,
{
    let request = connector_integration.build_request(router_data, options)?;

    match request {
        Some(request) => {
            tracing::debug!(
                connector = connector_integration.id(),
                "executing connector processing step"
            );
            let raw_response = http_client::send_request(client, request, None)
                .await
                .change_context(ConnectorError::ProcessingStepFailed(None))?;

            let status_code = raw_response.status().as_u16();
            let headers = Some(raw_response.headers().to_owned());
            let response_bytes = raw_response
                .bytes()
                .await
                .change_context(ConnectorError::ResponseHandlingFailed)?;

            tracing::info!(status_code, "gateway response received");

            let response = Response {
                headers,
                response: response_bytes,
                status_code,
            };

            if (200..300).contains(&status_code) {
                connector_integration.handle_response(router_data, response)
            } else {
                let error_response = connector_integration.get_error_response(response)?;
                let mut data = router_data.clone();
                data.response = Err(error_response);
                Ok(data)
            }
        }
        None => Ok(router_data.clone()),
    }
}
