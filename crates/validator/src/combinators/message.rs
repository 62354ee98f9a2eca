//! Explained rules - a canned report message for a whole subtree
//!
//! ```rust,ignore
//! use verdict::prelude::*;
//!
//! let rule = explain(
//!     "password is too weak",
//!     and([member("password").length().gte(12), member("password").ne("123456789012")]),
//! );
//! ```
//!
//! The status of the subtree is unchanged; only its report text is replaced.

use std::borrow::Cow;

use crate::adapter::Adapter;
use crate::combinators::{Node, evaluate};
use crate::foundation::Status;
use crate::path::Member;

pub fn explain(message: impl Into<Cow<'static, str>>, node: Node) -> Node {
    Node::Explained {
        message: message.into(),
        node: Box::new(node),
    }
}

pub(crate) fn inner(adapter: &Adapter<'_>, scope: &Member, node: &Node) -> Status {
    evaluate(adapter, scope, node)
}
