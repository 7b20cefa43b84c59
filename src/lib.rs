#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use xylo_reflect as reflect;
pub use xylo_tree as tree;
