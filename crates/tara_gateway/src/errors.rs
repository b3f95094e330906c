//! Error types surfaced by the connector.
//!
//! Gateway-reported declines on the get-token, verify and inquiry flows are
//! not errors: they come back to the caller as failed result values with a
//! translated message. The variants here cover everything else: transport,
//! protocol and authentication faults.

/// Result alias carrying an [`error_stack::Report`].
pub type CustomResult<T, E> = error_stack::Result<T, E>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConnectorError {
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Failed to execute a processing step: {0:?}")]
    ProcessingStepFailed(Option<bytes::Bytes>),
    #[error("Failed to handle connector response")]
    ResponseHandlingFailed,
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Failed to obtain authentication type")]
    FailedToObtainAuthType,
    #[error("Authentication failed (code {code}): {description}")]
    AuthenticationFailed { code: String, description: String },
    #[error("Authentication succeeded but no access token was returned")]
    MissingAccessToken,
    #[error("{message} is not supported by {connector}")]
    NotSupported {
        message: String,
        connector: &'static str,
    },
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum HttpClientError {
    #[error("URL parsing failed")]
    UrlParsingFailed,
    #[error("Header map construction failed")]
    HeaderMapConstructionFailed,
    #[error("Failed to send HTTP request {0}")]
    RequestNotSent(String),
    #[error("Request timed out before the gateway responded")]
    RequestTimeoutReceived,
    #[error("Failed to read the response body")]
    ResponseDecodingFailed,
}

#[derive(Debug, thiserror::Error)]
pub enum ParsingError {
    #[error("Failed to parse struct: {0}")]
    StructParseFailure(&'static str),
}
