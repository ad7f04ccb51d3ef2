use crate::{
    Result,
    estimator::{Demographics, RawUpload, SubmissionForm},
};
use axum::extract::Multipart;
use tracing::debug;

/// Reads every multipart field into a [`SubmissionForm`] without judging it.
pub async fn read_submission_form(mut multipart: Multipart) -> Result<SubmissionForm> {
    let mut form = SubmissionForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "front_image" | "side_image" => {
                let file_name = field
                    .file_name()
                    .filter(|file_name| !file_name.is_empty())
                    .map(str::to_string);
                let bytes = field.bytes().await?.to_vec();

                debug!(field = %name, size = bytes.len(), "Received upload");

                let upload = Some(RawUpload { file_name, bytes });
                if name == "front_image" {
                    form.front_image = upload;
                } else {
                    form.side_image = upload;
                }
            }
            "gender" => form.gender = Some(field.text().await?),
            "age" => form.age = Some(field.text().await?),
            "height" => form.height = Some(field.text().await?),
            "weight" => form.weight = Some(field.text().await?),
            other => debug!("Ignoring unknown form field: {}", other),
        }
    }

    Ok(form)
}

/// Values to put back into the form when it is shown again. Anything that
/// does not parse falls back to the defaults.
pub fn prefill(form: &SubmissionForm) -> Demographics {
    let defaults = Demographics::default();
    let number = |value: &Option<String>, fallback: i32| {
        value
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(fallback)
    };

    Demographics {
        gender: form
            .gender
            .as_deref()
            .and_then(|gender| gender.parse().ok())
            .unwrap_or(defaults.gender),
        age: number(&form.age, defaults.age),
        height_cm: number(&form.height, defaults.height_cm),
        weight_kg: number(&form.weight, defaults.weight_kg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::Gender;

    #[test]
    fn test_prefill_keeps_entered_values() {
        let form = SubmissionForm {
            gender: Some("Female".to_string()),
            age: Some("41".to_string()),
            height: Some("abc".to_string()),
            ..Default::default()
        };

        let demographics = prefill(&form);
        assert_eq!(demographics.gender, Gender::Female);
        assert_eq!(demographics.age, 41);
        assert_eq!(demographics.height_cm, 170);
        assert_eq!(demographics.weight_kg, 70);
    }
}
