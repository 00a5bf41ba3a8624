//! Operation dispatch table
//!
//! Every supported (resource, operation) pair maps to one `Endpoint`: an
//! HTTP method, a path template and the parameters that feed the query
//! string and JSON body. Building a request for an item is a lookup in
//! `ENDPOINTS` followed by `Endpoint::build_request`.

mod table;
mod types;

pub use table::{lookup, BodyField, Endpoint, FieldKind, QueryField, ENDPOINTS};
pub use types::{Operation, OperationSelector, Resource};
