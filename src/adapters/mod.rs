//! Adapters - Bridges between the outside world and the application layer.

pub mod request_file;

pub use request_file::{read_request, read_request_file, RequestError, RequestFormat};
