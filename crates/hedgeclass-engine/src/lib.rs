//! Primary label resolution: strict ground-truth labelling for synthetic
//! training data, ranked probabilistic labelling for model output, and the
//! Arrow batch and agreement tooling built on them.

pub mod batch;
pub mod compare;
mod engine;
pub mod ranked;
mod report;
pub mod strict;

pub use batch::{label_batch, predict_batch, vectors_from_batch};
pub use compare::{AgreementStatus, AgreementSummary, compare};
pub use engine::{Engine, Mode, Resolution, resolve};
pub use ranked::resolve_ranked;
pub use report::Prediction;
pub use strict::resolve_strict;
