//! Robokassa gateway client.
//!
//! A client library for the Robokassa payment processor API family:
//! payment-link creation, invoice status lookup and fiscal-receipt
//! submission. The heart of the crate is the signature/canonicalization
//! core in [`signature`]: deterministic byte strings, keyed hashes and
//! the base64url/JWT envelopes the gateway authenticates with. The
//! request builders in [`services`] are thin orchestration on top.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐
//! │  Application  │
//! └───────┬───────┘
//!         │
//! ┌───────▼───────────────────────────────────────┐
//! │         robokassa-client (this crate)         │
//! │  ┌─────────────┐      ┌────────────────────┐  │
//! │  │  services   │──────│  signature core    │  │
//! │  │  (payment,  │      │  (canonical string,│  │
//! │  │   receipt,  │      │   digest, HMAC,    │  │
//! │  │   status)   │      │   base64url, JWT)  │  │
//! │  └──────┬──────┘      └────────────────────┘  │
//! └─────────┼─────────────────────────────────────┘
//!           │ HttpTransport (pluggable)
//! ┌─────────▼─────────┐
//! │  Robokassa gateway │
//! └───────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use robokassa_client::{
//!     transport::ReqwestTransport, Config, CreateInvoiceParams, Robokassa,
//! };
//!
//! # async fn example() -> robokassa_client::Result<()> {
//! let config = Config::new("demo", "password1", "password2");
//! let client = Robokassa::new(config, Arc::new(ReqwestTransport::new()))?;
//!
//! // Create an invoice through the JWT interface
//! let mut params = CreateInvoiceParams::new(133765623, 10.0);
//! params.description = Some("Оплата тестового заказа".to_owned());
//! let url = client.payment().create_invoice(&params).await?;
//! println!("payment link: {url}");
//! # Ok(())
//! # }
//! ```
//!
//! Signatures can also be produced directly, without a client:
//!
//! ```
//! use robokassa_client::signature::SignatureService;
//!
//! let signer = SignatureService::new("md5");
//! let signature = signer.sign_op_state("login123", "1973546115", "secret2", None);
//! assert_eq!(signature, "5a00debc80b608b85f22b1ae6dd0c16f");
//! ```
//!
//! # Module organization
//!
//! - [`signature`]: the signing core (canonical strings, digest engine,
//!   HMAC, base64url, JWT envelopes)
//! - [`services`]: per-endpoint request builders
//! - [`transport`]: pluggable HTTP capability + reqwest implementation
//! - [`xml`]: XML decoding capability for the legacy WebService
//! - [`config`]: credentials, algorithm default, endpoint URLs
//! - [`error`]: error taxonomy
//!
//! # Signing conventions
//!
//! The gateway uses three distinct schemes, all built from the same
//! primitives:
//!
//! | Scheme | Input | Output |
//! |--------|-------|--------|
//! | Payment | ordered field string + `Shp_*` group + secret | hex digest (`SignatureValue`) |
//! | Fiscal | `base64url(payload) + secret` | base64url of the hex digest |
//! | Status query | `login:invoice_id:secret` | hex digest |
//!
//! The JWT interfaces sign `base64url(header).base64url(payload)` with
//! HMAC-MD5 under `login:password1`. The algorithm allow-list everywhere
//! is `md5`, `sha256`, `sha512`; anything else silently degrades to MD5.
//!
//! # Concurrency
//!
//! Every signing operation is a pure function; configuration is immutable
//! after construction. All types are safe to share across threads without
//! synchronization.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod error;
pub mod services;
pub mod signature;
pub mod transport;
pub mod xml;

pub use client::Robokassa;
pub use config::{Config, Endpoints};
pub use error::{Result, RobokassaError};
pub use services::{CreateInvoiceParams, PaymentService, ReceiptService, StatusService, WebService};
pub use signature::{HashAlgorithm, SignatureService};
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};
pub use xml::XmlDecoder;
