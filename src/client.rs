//! Client facade wiring configuration, transport and signer together.

use std::sync::Arc;

use crate::{
    config::Config,
    error::Result,
    services::{PaymentService, ReceiptService, StatusService, WebService},
    signature::SignatureService,
    transport::HttpTransport,
    xml::XmlDecoder,
};

/// Robokassa gateway client.
///
/// Construction validates the configuration once; afterwards everything is
/// immutable and the client (and every service handle it returns) can be
/// shared freely across threads and tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use robokassa_client::{
///     transport::ReqwestTransport, Config, CreateInvoiceParams, Robokassa,
/// };
///
/// # async fn example() -> robokassa_client::Result<()> {
/// let config = Config::new("demo", "password1", "password2");
/// let client = Robokassa::new(config, Arc::new(ReqwestTransport::new()))?;
///
/// let url = client.payment().create_invoice(&CreateInvoiceParams::new(1, 100.0)).await?;
/// println!("pay at: {url}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Robokassa {
    config: Arc<Config>,
    transport: Arc<dyn HttpTransport>,
    signer: Arc<SignatureService>,
    payment: PaymentService,
    receipt: ReceiptService,
    status: StatusService,
}

impl std::fmt::Debug for Robokassa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Robokassa")
            .field("merchant_login", &self.config.merchant_login)
            .field("is_test", &self.config.is_test)
            .finish_non_exhaustive()
    }
}

impl Robokassa {
    /// Creates a client over the given transport.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RobokassaError::ConfigError`] if the configuration
    /// fails [`Config::validate`].
    pub fn new(config: Config, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let signer = Arc::new(SignatureService::new(config.hash_algorithm.clone()));
        let payment = PaymentService::new(transport.clone(), signer.clone(), config.clone());
        let receipt = ReceiptService::new(transport.clone(), signer.clone(), config.clone());
        let status = StatusService::new(transport.clone(), signer.clone(), config.clone());
        Ok(Self { config, transport, signer, payment, receipt, status })
    }

    /// Payment link and invoice creation.
    #[must_use]
    pub fn payment(&self) -> &PaymentService {
        &self.payment
    }

    /// Fiscal receipt submission and status.
    #[must_use]
    pub fn receipt(&self) -> &ReceiptService {
        &self.receipt
    }

    /// JWT invoice listing.
    #[must_use]
    pub fn status(&self) -> &StatusService {
        &self.status
    }

    /// Legacy XML WebService, decoding replies through `decoder`.
    ///
    /// The decoder is injected here rather than at construction so that
    /// clients using only the JSON interfaces never have to supply one.
    #[must_use]
    pub fn web_service(&self, decoder: Arc<dyn XmlDecoder>) -> WebService {
        WebService::new(self.transport.clone(), self.signer.clone(), self.config.clone(), decoder)
    }

    /// The signing service, for callers embedding signatures themselves.
    #[must_use]
    pub fn signature(&self) -> &SignatureService {
        &self.signer
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
