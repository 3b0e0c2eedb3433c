//! Ordered storage for reconstructed trace entities
//!
//! [`SplayTree`] keeps entries keyed by address, line number, timestamp or any
//! other orderable key, and answers exact and nearest-key queries in amortized
//! logarithmic time.

pub mod comparator;
pub mod iter;
pub mod splay;

pub use comparator::{KeyComparator, NaturalOrder};
pub use iter::{Iter, Keys, Values};
pub use splay::{SplayNode, SplayTree};
