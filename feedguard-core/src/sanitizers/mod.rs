//! Policy-level building blocks for the sanitizers.
//!
//! `compiler` turns a `MarkupPolicy` into a ready-to-use ammonia builder and
//! caches the result. `template` scrubs client-side template expressions from
//! serialized output. `links` is the standalone absolute-link validator used for
//! URL fields, which does not go through a markup policy at all.

pub mod compiler;
pub mod template;
pub mod links;
