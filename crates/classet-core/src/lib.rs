//! Group-aware class state: spec indexes, update normalization, the state
//! reducer, a reactive binding, and deterministic serialization.

pub mod binding;
pub mod normalize;
pub mod reduce;
pub mod serialize;
pub mod set_ops;
pub mod spec;

pub use binding::{
    Binder, Classes, LocalCell, StateCell, SubscriptionId, acquire, acquire_with, bind,
};
pub use normalize::{Normalized, normalize};
pub use reduce::{apply, reduce, update};
pub use serialize::{ordered, serialize};
pub use spec::Spec;
