//! Wire contract shared by every service.
//!
//! Every HTTP response body is an [`Envelope`]; every JSON request body is
//! read through [`JsonBody`], which enforces a size cap and exactly one
//! JSON value per body.

pub mod body;
pub mod response;

pub use body::JsonBody;
pub use body::JsonBodyRejection;
pub use body::DEFAULT_MAX_BODY_BYTES;
pub use response::Envelope;
