pub mod error;

pub use error::{handle_bad_request, handle_domain_error, handle_validation_errors, status_for};
