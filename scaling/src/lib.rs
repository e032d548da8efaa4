//! Train/test-consistent centering and scaling of feature matrices.
//!
//! Statistics are fitted once on the training matrix and applied unchanged to
//! everything else, so held-out data never leaks into the fit.

#![deny(unused_imports)]
#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod scaler;

pub use scaler::{scale_pair, ScaledPair, ScalerState, ScalingMode};
