//! Browser-backed implementations of the core seams.
pub(crate) mod api;
pub(crate) mod mailer;
pub(crate) mod storage;
