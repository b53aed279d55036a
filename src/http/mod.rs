pub mod client;
pub mod method;
pub mod request;
pub mod response;

pub use client::{ClientConfig, HttpClient};
pub use method::HttpMethod;
pub use request::{ApiRequest, RequestBody};
pub use response::ApiResponse;
