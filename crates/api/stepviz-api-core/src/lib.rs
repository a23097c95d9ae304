//! stepviz-api-core: shared step model for the stepviz replay engine.
//!
//! This crate defines the weakly-typed `Step` record exchanged with the
//! translation service, the `StepValue` coercion layer, and the inbound
//! analysis payload parser. It carries no replay logic; the engine lives in
//! stepviz-replay-core.

pub mod payload;
pub mod step;
pub mod value;

pub use payload::{parse_analysis_json, AnalysisPayload, Meta, PayloadError};
pub use step::{Endpoint, Step};
pub use value::StepValue;
