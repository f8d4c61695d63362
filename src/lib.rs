pub mod constants;
pub mod decode;
pub mod document;
pub mod encode;
pub mod error;
pub mod key;
pub mod query;
pub mod text;

pub use crate::decode::parse;
pub use crate::document::{Document, Kind};
pub use crate::encode::{ArrayWriter, ObjectWriter, Writer};
pub use crate::error::ParseError;
pub use crate::key::{HashedKey, HashedKeyStripped};
pub use crate::query::Proxy;
pub use crate::text::unescape;

pub type Result<T> = std::result::Result<T, ParseError>;
