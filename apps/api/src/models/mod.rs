pub mod cv;
pub mod rfp;

pub use cv::{Candidate, NewCandidate};
pub use rfp::{NewRfp, Rfp};
