//! Singleton values.
//!
//! A singleton is the one value of its kind (the identity operator, the
//! trivial space, ...). It is identified by a key rather than by an address,
//! so two handles created from the same key are equal. Algebras keep the
//! canonical handle in a lazily initialised static:
//!
//! ```
//! termalg_core::singleton! {
//!     /// The identity operator.
//!     pub static IDENTITY = "II";
//! }
//!
//! assert!(IDENTITY.is_singleton());
//! assert_eq!(termalg_core::singleton_key(&IDENTITY), Some("II"));
//! ```

use crate::expr::ExprNode;
use crate::handle::Expr;

/// Declares a lazily created singleton expression.
#[macro_export]
macro_rules! singleton {
    ($(#[$meta:meta])* $vis:vis static $name:ident = $key:expr;) => {
        $(#[$meta])*
        $vis static $name: $crate::once_cell::sync::Lazy<$crate::Expr> =
            $crate::once_cell::sync::Lazy::new(|| $crate::Expr::singleton($key));
    };
}

/// Returns the identity key of a singleton.
#[must_use]
pub fn singleton_key(expr: &Expr) -> Option<&str> {
    match expr.node() {
        ExprNode::Singleton(key) => Some(key),
        _ => None,
    }
}
