pub mod resolve;
pub mod validate;

pub use resolve::{InvalidUrl, ResolvedRoute, UrlMap};
pub use validate::{BodyError, ValidationError};
