//! Request middleware.
//!
//! - [`request_log::log_request`] -- logs method, path and client IP of every request.

pub mod request_log;
