//! Utility functions shared by channel resolution and feed construction.
//!
//! - **Text**: first-non-empty fallback selection and XML character cleanup
//! - **URL checks**: non-fatal validation of link, image and audio URLs

mod text;
mod url_validator;

pub use text::{first_non_empty, replace_invalid_xml_chars, REPLACEMENT_CHAR};
pub use url_validator::{validate_url, warn_if_invalid_url, UrlValidationError};
