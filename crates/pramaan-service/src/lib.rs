//! Certificate ingestion and verification services.
//!
//! [`BatchIngestor`] turns a parsed record set into one atomic ledger
//! submission: canonicalize and hash every record in input order, estimate
//! the batch cost, submit with a fixed safety margin on the ceiling.
//! [`VerificationService`] answers "was this exact record attested, when,
//! and by whom" with a single read-only lookup. Both run against any
//! [`LedgerClient`](pramaan_ledger::LedgerClient), injected at construction.
//!
//! Boundary helpers parse delimiter-separated record files ([`reader`]) and
//! pull candidate records out of raw certificate text ([`extract`]).

pub mod error;
pub mod extract;
pub mod info;
pub mod ingest;
pub mod reader;
pub mod verify;

pub use error::{ServiceError, ServiceResult};
pub use extract::extract_record;
pub use info::{service_info, ServiceInfo};
pub use ingest::{BatchIngestor, IngestReport, COST_MARGIN_PERCENT, DEFAULT_UNIT_PRICE};
pub use reader::{parse_records, read_records_file};
pub use verify::{VerificationOutcome, VerificationService};
