use crate::estimator::Variant;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EstimationResponse {
    pub request_id: String,
    pub variant: Variant,
    pub output: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
