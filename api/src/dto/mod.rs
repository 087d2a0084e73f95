//! Request and response bodies for the HTTP surface

pub mod maintenance;
pub mod verification;

pub use maintenance::{ClearAction, ClearCacheRequest, ClearCacheResponse, DeleteVerificationResponse};
pub use verification::{
    BatchStatisticsDto, BatchVerifyRequest, BatchVerifyResponse, PrefixCheckRequest,
    PrefixCheckResponse, VerifyRequest,
};
