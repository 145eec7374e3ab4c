//! Analysis request construction: the validated input record, the
//! configuration options and their enums, and the promotion rules that let
//! callers pass a bare matrix, a bare count, or a 1-D behavioural column.
pub mod data;
pub mod errors;
pub mod options;

pub use data::{AnalysisRequest, Behav, Counts, Groups};
pub use errors::{RequestError, RequestResult};
pub use options::{BootType, CorMode, MeanCentering, PLSOptions};
