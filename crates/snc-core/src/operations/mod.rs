//! Envelope algebra.
//!
//! Every operator is itself an envelope built from shared children, so
//! composite paths form an immutable tree evaluated bottom-up at each θ.

mod aggregate;
mod convolve;
mod deconvolve;
mod dependence;
mod leftover;
mod stability;

pub use aggregate::{AggregateList, AggregateTwo};
pub use convolve::{Convolve, ConvolveAlter};
pub use deconvolve::Deconvolve;
pub use dependence::Dependence;
pub use leftover::Leftover;
pub use stability::stability_check;

pub(crate) use stability::check_rates;
