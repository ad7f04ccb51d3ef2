mod prompt;
mod submission;
mod variant;

pub use prompt::{COMPOSITION_PROMPT, build_prompt};
pub use submission::{
    AGE_RANGE, Demographics, Gender, HEIGHT_RANGE, ImageSlot, MISSING_IMAGES_WARNING, RawUpload,
    Submission, SubmissionForm, UploadedImage, WEIGHT_RANGE,
};
pub use variant::{OutputStyle, Variant};

use crate::{
    Result,
    llm::{GenerateRequest, LlmClient},
};
use std::sync::Arc;
use tracing::{error, info};

pub const SAMPLING_TEMPERATURE: f32 = 0.4;

/// The model's answer, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResult {
    pub text: String,
}

/// Turns a submission into exactly one external inference call.
pub struct Estimator {
    client: Arc<dyn LlmClient>,
}

impl Estimator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn estimate(&self, submission: &Submission) -> Result<InferenceResult> {
        let request = GenerateRequest {
            prompt: build_prompt(submission.demographics.as_ref()),
            images: vec![submission.front.to_part(), submission.side.to_part()],
            temperature: SAMPLING_TEMPERATURE,
        };

        info!(
            request_id = %submission.id,
            variant = %submission.variant,
            front_bytes = submission.front.bytes.len(),
            side_bytes = submission.side.bytes.len(),
            "Submitting estimation request"
        );

        match self.client.generate_content(request).await {
            Ok(response) => {
                info!(
                    request_id = %submission.id,
                    model = %response.model,
                    "Estimation completed"
                );
                Ok(InferenceResult {
                    text: response.text,
                })
            }
            Err(e) => {
                error!(request_id = %submission.id, "Estimation failed: {}", e);
                Err(e)
            }
        }
    }
}
