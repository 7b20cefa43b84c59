#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod error;
mod node;

pub mod xml;

pub use error::TreeError;
pub use node::Node;
