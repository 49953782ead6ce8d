//! Form input handling: raw records, feature vectors, assembly, and
//! standardization.
//!
//! The flow per submission is `RawRecord` → [`assemble`] → (optionally)
//! [`standardize`] → prediction. Both functions are pure; the vector is owned
//! by the submission that created it and dropped afterwards.

mod assemble;
mod record;
mod standardize;
mod vector;

pub use assemble::assemble;
pub use record::RawRecord;
pub use standardize::standardize;
pub use vector::FeatureVector;
