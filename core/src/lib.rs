#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

pub mod client;
pub mod error;
pub mod filter;
pub mod form;
pub mod format;
pub mod models;
pub mod session;

// Re-export commonly used types
pub use client::{ClientConfig, HttpMonitorClient, MonitorApi, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{MonitorError, Result};
pub use filter::filter_by_creation_date;
pub use form::{parse_court, MonitorForm, COURT_OPTIONS};
pub use format::{
    flatten_auxiliary_terms, format_date, group_auxiliary_terms, navigate_to_case, strip_html,
    CaseAction, CaseLink,
};
pub use models::{
    AuxiliaryTerm, AuxiliaryTermMap, Condition, FoundCase, Monitor, NewMonitorRequest, OriginState,
};
pub use session::{Notice, Session, View};
