use crate::estimator::{
    AGE_RANGE, Demographics, Gender, HEIGHT_RANGE, InferenceResult, OutputStyle, Submission,
    Variant, WEIGHT_RANGE,
};
use askama::Template;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub entries: Vec<IndexEntry>,
}

pub struct IndexEntry {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

impl IndexPage {
    pub fn new() -> Self {
        let entries = Variant::ALL
            .into_iter()
            .map(|variant| IndexEntry {
                slug: variant.slug(),
                title: variant.title(),
                description: variant.description(),
            })
            .collect();

        Self { entries }
    }
}

impl Default for IndexPage {
    fn default() -> Self {
        Self::new()
    }
}

/// The form page of one variant, optionally with a warning, an error, or a
/// result below the form.
#[derive(Template)]
#[template(path = "estimator.html")]
pub struct EstimatorPage {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub loading_message: &'static str,
    pub collects_demographics: bool,
    pub gender_options: Vec<SelectOption>,
    pub number_fields: Vec<NumberField>,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub result: Option<ResultView>,
}

pub struct SelectOption {
    pub value: &'static str,
    pub selected: bool,
}

pub struct NumberField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: i32,
    pub min: i32,
    pub max: i32,
}

pub struct ResultView {
    pub heading: &'static str,
    pub code_language: Option<&'static str>,
    pub text: String,
    pub previews: Vec<Preview>,
}

pub struct Preview {
    pub caption: &'static str,
    pub data_url: String,
}

impl EstimatorPage {
    pub fn new(variant: Variant, prefill: &Demographics) -> Self {
        let gender_options = Gender::ALL
            .into_iter()
            .map(|gender| SelectOption {
                value: gender.as_str(),
                selected: gender == prefill.gender,
            })
            .collect();

        let number_fields = vec![
            NumberField {
                name: "age",
                label: "Age",
                value: prefill.age,
                min: *AGE_RANGE.start(),
                max: *AGE_RANGE.end(),
            },
            NumberField {
                name: "height",
                label: "Height (cm)",
                value: prefill.height_cm,
                min: *HEIGHT_RANGE.start(),
                max: *HEIGHT_RANGE.end(),
            },
            NumberField {
                name: "weight",
                label: "Weight (kg)",
                value: prefill.weight_kg,
                min: *WEIGHT_RANGE.start(),
                max: *WEIGHT_RANGE.end(),
            },
        ];

        Self {
            slug: variant.slug(),
            title: variant.title(),
            description: variant.description(),
            loading_message: variant.loading_message(),
            collects_demographics: variant.collects_demographics(),
            gender_options,
            number_fields,
            warning: None,
            error: None,
            result: None,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_result(mut self, submission: &Submission, result: InferenceResult) -> Self {
        self.result = Some(ResultView::new(submission, result));
        self
    }
}

impl ResultView {
    pub fn new(submission: &Submission, result: InferenceResult) -> Self {
        let code_language = match submission.variant.output_style() {
            OutputStyle::CodeBlock { language } => Some(language),
            OutputStyle::Success => None,
        };

        let previews = [&submission.front, &submission.side]
            .into_iter()
            .map(|image| Preview {
                caption: image.slot.caption(),
                data_url: image.to_data_url(),
            })
            .collect();

        Self {
            heading: submission.variant.result_heading(),
            code_language,
            text: result.text,
            previews,
        }
    }
}
