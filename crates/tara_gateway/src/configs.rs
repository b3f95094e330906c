//! Gateway configuration.

use masking::Secret;
use serde::Deserialize;

/// URLs for the gateway's remote operations.
///
/// The defaults point at the production environment. Accounts flagged as
/// test accounts are routed to staging through [`Self::environment_url`].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TaraGatewayOptions {
    /// Base URL for the gateway API.
    pub base_url: String,
    /// Bearer-token authentication URL.
    pub authentication_url: String,
    /// Payment-token acquisition URL.
    pub get_token_url: String,
    /// Hosted payment page the payer is redirected to.
    pub payment_url: String,
    /// Post-payment verification URL.
    pub verify_url: String,
    /// Settlement inquiry URL.
    pub inquiry_url: String,
}

impl TaraGatewayOptions {
    /// Production base URL for the Tara API.
    pub const PRODUCTION_BASE_URL: &'static str = "https://pay.tara360.ir/pay";

    /// Staging base URL for the Tara API.
    pub const STAGING_BASE_URL: &'static str = "https://stage-pay.tara360.ir/pay";

    /// Returns the URL for the environment the account targets.
    ///
    /// Test accounts get the production base substituted with the staging
    /// base. A URL that does not contain the production base is returned
    /// untouched, which lets deployments configure staging (or any custom
    /// host) directly. It also means a mistyped production URL will silently
    /// skip the staging redirection.
    pub fn environment_url(url: &str, is_test: bool) -> String {
        if is_test {
            url.replace(Self::PRODUCTION_BASE_URL, Self::STAGING_BASE_URL)
        } else {
            url.to_owned()
        }
    }
}

impl Default for TaraGatewayOptions {
    fn default() -> Self {
        Self {
            base_url: Self::PRODUCTION_BASE_URL.to_string(),
            authentication_url: format!("{}/api/v2/authenticate", Self::PRODUCTION_BASE_URL),
            get_token_url: format!("{}/api/getToken", Self::PRODUCTION_BASE_URL),
            payment_url: format!("{}/api/ipgPurchase", Self::PRODUCTION_BASE_URL),
            verify_url: format!("{}/api/purchaseVerify", Self::PRODUCTION_BASE_URL),
            inquiry_url: format!("{}/api/purchaseInquiry", Self::PRODUCTION_BASE_URL),
        }
    }
}

/// One merchant credential set. Immutable for the lifetime of a transaction.
#[derive(Clone, Debug, Deserialize)]
pub struct TaraGatewayAccount {
    /// Username for gateway authentication.
    pub username: Secret<String>,
    /// Password for gateway authentication.
    pub password: Secret<String>,
    /// Originating IP address the gateway expects on API calls.
    pub ip: String,
    /// Routes this account to the staging environment when set.
    #[serde(default)]
    pub is_test: bool,
}

/// Merchant-facing message defaults, overridable through configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MessagesOptions {
    pub payment_succeeded: String,
    pub payment_failed: String,
}

impl Default for MessagesOptions {
    fn default() -> Self {
        Self {
            payment_succeeded: "پرداخت با موفقیت انجام شد.".to_string(),
            payment_failed: "پرداخت انجام نشد.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_url_substitutes_staging_for_test_accounts() {
        let url = format!("{}/api/getToken", TaraGatewayOptions::PRODUCTION_BASE_URL);
        assert_eq!(
            TaraGatewayOptions::environment_url(&url, true),
            format!("{}/api/getToken", TaraGatewayOptions::STAGING_BASE_URL),
        );
    }

    #[test]
    fn environment_url_keeps_production_urls_untouched() {
        let url = format!("{}/api/getToken", TaraGatewayOptions::PRODUCTION_BASE_URL);
        assert_eq!(TaraGatewayOptions::environment_url(&url, false), url);
    }

    #[test]
    fn environment_url_passes_custom_hosts_through() {
        let url = "https://gateway.internal.example/pay/api/getToken";
        assert_eq!(TaraGatewayOptions::environment_url(url, true), url);
    }
}
