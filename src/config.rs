//! Client configuration types.
//!
//! [`Config`] carries merchant credentials, the default hash algorithm and
//! the gateway endpoint set. It is deserializable so it can be loaded from
//! any serde-compatible source, and immutable for the lifetime of a
//! [`crate::Robokassa`] instance; there is no mutable global state.

use serde::Deserialize;

use crate::{
    error::{Result, RobokassaError},
    signature::HashAlgorithm,
};

fn default_hash_algorithm() -> String {
    "md5".to_owned()
}

/// Merchant credentials and client settings.
///
/// `password1` signs payment and fiscal requests, `password2` signs status
/// queries. In test mode (`is_test`) the test passwords are used instead;
/// [`Config::validate`] rejects test mode without them.
///
/// # Examples
///
/// ```
/// use robokassa_client::Config;
///
/// let config = Config::new("demo", "password1", "password2");
/// assert!(config.validate().is_ok());
/// assert_eq!(config.hash_algorithm, "md5");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Merchant identifier assigned by the gateway.
    pub merchant_login: String,

    /// Password #1: payment, invoice and fiscal signing secret.
    pub password1: String,

    /// Password #2: status-query signing secret.
    pub password2: String,

    /// Password #1 for the gateway's test environment.
    #[serde(default)]
    pub test_password1: Option<String>,

    /// Password #2 for the gateway's test environment.
    #[serde(default)]
    pub test_password2: Option<String>,

    /// Whether requests target the test environment.
    #[serde(default)]
    pub is_test: bool,

    /// Default hash algorithm name (`md5`, `sha256` or `sha512`).
    ///
    /// This is the request-time default; individual signing calls may
    /// override it per request.
    #[serde(default = "default_hash_algorithm")]
    pub hash_algorithm: String,

    /// Gateway endpoint URLs.
    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Config {
    /// Creates a configuration with production credentials and defaults.
    #[must_use]
    pub fn new(
        merchant_login: impl Into<String>,
        password1: impl Into<String>,
        password2: impl Into<String>,
    ) -> Self {
        Self {
            merchant_login: merchant_login.into(),
            password1: password1.into(),
            password2: password2.into(),
            test_password1: None,
            test_password2: None,
            is_test: false,
            hash_algorithm: default_hash_algorithm(),
            endpoints: Endpoints::default(),
        }
    }

    /// Validates credentials and the hash algorithm name.
    ///
    /// # Errors
    ///
    /// Returns [`RobokassaError::ConfigError`] if a credential is empty,
    /// test mode lacks test passwords, or `hash_algorithm` is not one of
    /// `md5`, `sha256`, `sha512` (case-insensitive).
    pub fn validate(&self) -> Result<()> {
        if self.merchant_login.is_empty() {
            return Err(RobokassaError::ConfigError("merchant_login is not defined".to_owned()));
        }
        if self.password1.is_empty() {
            return Err(RobokassaError::ConfigError("password1 is not defined".to_owned()));
        }
        if self.password2.is_empty() {
            return Err(RobokassaError::ConfigError("password2 is not defined".to_owned()));
        }
        if self.is_test {
            if self.test_password1.as_deref().unwrap_or("").is_empty() {
                return Err(RobokassaError::ConfigError(
                    "test_password1 is not defined".to_owned(),
                ));
            }
            if self.test_password2.as_deref().unwrap_or("").is_empty() {
                return Err(RobokassaError::ConfigError(
                    "test_password2 is not defined".to_owned(),
                ));
            }
        }
        if HashAlgorithm::parse(&self.hash_algorithm).is_none() {
            return Err(RobokassaError::ConfigError(format!(
                "hash_algorithm must be one of md5, sha256, sha512; got '{}'",
                self.hash_algorithm
            )));
        }
        Ok(())
    }

    /// Effective payment/fiscal signing secret for the active environment.
    pub(crate) fn effective_password1(&self) -> &str {
        if self.is_test {
            self.test_password1.as_deref().unwrap_or(&self.password1)
        } else {
            &self.password1
        }
    }

    /// Effective status-query signing secret for the active environment.
    pub(crate) fn effective_password2(&self) -> &str {
        if self.is_test {
            self.test_password2.as_deref().unwrap_or(&self.password2)
        } else {
            &self.password2
        }
    }
}

fn default_payment_base() -> String {
    "https://auth.robokassa.ru/Merchant/Index/".to_owned()
}

fn default_payment_json() -> String {
    "https://auth.robokassa.ru/Merchant/Indexjson.aspx".to_owned()
}

fn default_create_invoice() -> String {
    "https://services.robokassa.ru/InvoiceServiceWebApi/api/CreateInvoice".to_owned()
}

fn default_invoice_list() -> String {
    "https://services.robokassa.ru/InvoiceServiceWebApi/api/GetInvoiceInformationList".to_owned()
}

fn default_web_service() -> String {
    "https://auth.robokassa.ru/Merchant/WebService/Service.asmx".to_owned()
}

fn default_second_check() -> String {
    "https://ws.roboxchange.com/RoboFiscal/Receipt/Attach".to_owned()
}

fn default_check_status() -> String {
    "https://ws.roboxchange.com/RoboFiscal/Receipt/Status".to_owned()
}

/// Gateway endpoint URLs, overridable per deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct Endpoints {
    /// Base URL the created invoice id is appended to, forming the payment link.
    #[serde(default = "default_payment_base")]
    pub payment_base: String,

    /// Form-POST payment link creation endpoint.
    #[serde(default = "default_payment_json")]
    pub payment_json: String,

    /// JWT invoice creation endpoint.
    #[serde(default = "default_create_invoice")]
    pub create_invoice: String,

    /// JWT invoice listing endpoint.
    #[serde(default = "default_invoice_list")]
    pub invoice_list: String,

    /// XML WebService base URL (payment methods, OpStateExt).
    #[serde(default = "default_web_service")]
    pub web_service: String,

    /// Fiscal second-check submission endpoint.
    #[serde(default = "default_second_check")]
    pub second_check: String,

    /// Fiscal receipt status endpoint.
    #[serde(default = "default_check_status")]
    pub check_status: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            payment_base: default_payment_base(),
            payment_json: default_payment_json(),
            create_invoice: default_create_invoice(),
            invoice_list: default_invoice_list(),
            web_service: default_web_service(),
            second_check: default_second_check(),
            check_status: default_check_status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = Config::new("demo", "pw1", "pw2");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_login_rejected() {
        let config = Config::new("", "pw1", "pw2");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("merchant_login"));
    }

    #[test]
    fn test_missing_passwords_rejected() {
        assert!(Config::new("demo", "", "pw2").validate().is_err());
        assert!(Config::new("demo", "pw1", "").validate().is_err());
    }

    #[test]
    fn test_test_mode_requires_test_passwords() {
        let mut config = Config::new("demo", "pw1", "pw2");
        config.is_test = true;
        assert!(config.validate().is_err());

        config.test_password1 = Some("tpw1".to_owned());
        config.test_password2 = Some("tpw2".to_owned());
        assert!(config.validate().is_ok());
        assert_eq!(config.effective_password1(), "tpw1");
        assert_eq!(config.effective_password2(), "tpw2");
    }

    #[test]
    fn test_unknown_hash_algorithm_rejected() {
        let mut config = Config::new("demo", "pw1", "pw2");
        config.hash_algorithm = "sha1".to_owned();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, RobokassaError::ConfigError(_)));
    }

    #[test]
    fn test_hash_algorithm_case_insensitive() {
        let mut config = Config::new("demo", "pw1", "pw2");
        config.hash_algorithm = "SHA256".to_owned();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();
        assert!(endpoints.payment_json.ends_with("Indexjson.aspx"));
        assert!(endpoints.second_check.ends_with("/Receipt/Attach"));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"merchant_login":"demo","password1":"a","password2":"b"}"#,
        )
        .unwrap();
        assert!(!config.is_test);
        assert_eq!(config.hash_algorithm, "md5");
        assert!(config.endpoints.web_service.ends_with("Service.asmx"));
    }
}
