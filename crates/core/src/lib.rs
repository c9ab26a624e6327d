pub mod audit;
pub mod error;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod normalize;
pub mod parse;
pub mod report;
pub mod scoring;
pub mod signals;

pub use audit::{AuditRequest, assemble_report, audit_html};
#[cfg(feature = "fetch")]
pub use audit::{Auditor, audit};
pub use error::{AuditError, FetchError, Result};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, FetchResult, build_client, check_resource, fetch_all, fetch_page};
pub use normalize::normalize_url;
pub use parse::{Document, Element};
pub use report::{AuditReport, ReportFields};
pub use scoring::{KeywordLocation, ScoreBreakdown, Verdict, normalize_keyword, score};
pub use signals::{AuxiliaryResources, PageSignals, count_words, extract_signals, extract_signals_from_html};
