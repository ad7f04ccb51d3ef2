use serde::Serialize;
use std::fmt;

/// The two entry points. They share one pipeline and differ only in the
/// inputs they collect and how the answer is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Photos only; the answer is shown as a `json` code block.
    Composition,
    /// Photos plus demographics; the answer is shown as success text.
    Insight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    CodeBlock { language: &'static str },
    Success,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Composition, Variant::Insight];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Composition => "composition",
            Self::Insight => "insight",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Composition => "Body Composition Estimator",
            Self::Insight => "Body Fat Percentage Estimator",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Composition => {
                "Upload front and side full-body images to estimate height, weight, and body fat percentage."
            }
            Self::Insight => {
                "Enter your details and upload front + side full-body images to estimate body fat % and get categorized insights."
            }
        }
    }

    pub fn result_heading(self) -> &'static str {
        match self {
            Self::Composition => "Estimated Body Composition:",
            Self::Insight => "Estimation & Health Insight",
        }
    }

    pub fn error_prefix(self) -> &'static str {
        match self {
            Self::Composition => "Error",
            Self::Insight => "Error during analysis",
        }
    }

    pub fn loading_message(self) -> &'static str {
        match self {
            Self::Composition => "Analyzing images...",
            Self::Insight => "Analyzing...",
        }
    }

    pub fn collects_demographics(self) -> bool {
        matches!(self, Self::Insight)
    }

    pub fn output_style(self) -> OutputStyle {
        match self {
            Self::Composition => OutputStyle::CodeBlock { language: "json" },
            Self::Insight => OutputStyle::Success,
        }
    }

    /// The generic failure message shown for any external-call error.
    pub fn error_message(self, cause: &impl fmt::Display) -> String {
        format!("{}: {}", self.error_prefix(), cause)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
