pub mod call;
pub mod client;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod mock;
pub mod model;
pub mod remote;

pub use call::{ApiCall, Reply};
pub use client::{ApiClient, ApiRequest, ApiResponse, HttpTransport, Transport};
pub use endpoint::{Endpoint, Method};
pub use error::{classify, ApiError, ErrorCopy};
pub use remote::{Remote, RemoteState, Ticket, Tickets};
