//! Crate-wide constants.

/// The result code the gateway reports for every successful operation.
/// Every other code is a failure, whether or not it is recognized.
pub const SUCCESS_RESULT_CODE: &str = "0";

/// Placeholder code for error responses the gateway did not structure.
pub const NO_ERROR_CODE: &str = "No error code";

/// Placeholder message for error responses carrying no description.
pub const NO_ERROR_MESSAGE: &str = "No error message";

/// Timeout applied to outbound gateway calls when the caller does not
/// provide one, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Header names used on outbound calls.
pub mod headers {
    pub const ACCEPT: &str = "Accept";
    pub const AUTHORIZATION: &str = "Authorization";
}
