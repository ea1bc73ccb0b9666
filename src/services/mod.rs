//! Gateway request builders.
//!
//! Thin orchestration over the signing core and the transport capability:
//! each service assembles a parameter mapping or payload, invokes the
//! matching signature scheme, and sends the result through the injected
//! [`crate::transport::HttpTransport`].
//!
//! - [`PaymentService`]: payment links (form POST) and invoices (JWT).
//! - [`ReceiptService`]: fiscal second checks and receipt status.
//! - [`WebService`]: legacy XML WebService (payment methods, `OpStateExt`).
//! - [`StatusService`]: JWT invoice listing.

pub mod payment;
pub mod receipt;
pub mod status;
pub mod web;

pub use payment::{CreateInvoiceParams, PaymentService};
pub use receipt::ReceiptService;
pub use status::StatusService;
pub use web::WebService;
