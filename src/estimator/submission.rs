use super::Variant;
use crate::{Error, Result, llm::ImagePart};
use image::{ImageFormat, ImageReader};
use serde::Serialize;
use std::{fmt, io::Cursor, ops::RangeInclusive, str::FromStr};
use uuid::Uuid;
use validator::Validate;

pub const MISSING_IMAGES_WARNING: &str = "Please upload both front and side images.";

pub const AGE_RANGE: RangeInclusive<i32> = 10..=100;
pub const HEIGHT_RANGE: RangeInclusive<i32> = 100..=250;
pub const WEIGHT_RANGE: RangeInclusive<i32> = 30..=200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(Error::invalid_input(format!(
                "Gender must be Male or Female, got '{}'",
                other
            ))),
        }
    }
}

/// Self-reported details collected by the insight form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct Demographics {
    pub gender: Gender,
    #[validate(range(min = 10, max = 100, message = "Age must be between 10 and 100"))]
    pub age: i32,
    #[validate(range(min = 100, max = 250, message = "Height must be between 100 and 250 cm"))]
    pub height_cm: i32,
    #[validate(range(min = 30, max = 200, message = "Weight must be between 30 and 200 kg"))]
    pub weight_kg: i32,
}

impl Default for Demographics {
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            age: 25,
            height_cm: 170,
            weight_kg: 70,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Front,
    Side,
}

impl ImageSlot {
    pub fn caption(self) -> &'static str {
        match self {
            Self::Front => "Front View",
            Self::Side => "Side View",
        }
    }
}

impl fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Front => f.write_str("Front"),
            Self::Side => f.write_str("Side"),
        }
    }
}

/// A file field exactly as it arrived, before any checks.
#[derive(Debug, Clone, Default)]
pub struct RawUpload {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl RawUpload {
    /// Browsers send an empty part when no file was chosen.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A JPEG or PNG photo whose header decoded to real dimensions.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub slot: ImageSlot,
    pub file_name: Option<String>,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn decode(slot: ImageSlot, raw: RawUpload) -> Result<Self> {
        let reader = ImageReader::new(Cursor::new(raw.bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| Error::invalid_input(format!("{} image could not be read: {}", slot, e)))?;

        let mime_type = match reader.format() {
            Some(ImageFormat::Jpeg) => "image/jpeg",
            Some(ImageFormat::Png) => "image/png",
            _ => {
                return Err(Error::invalid_input(format!(
                    "{} image must be a JPG, JPEG or PNG file",
                    slot
                )));
            }
        };

        let (width, height) = reader.into_dimensions().map_err(|e| {
            Error::invalid_input(format!("{} image could not be decoded: {}", slot, e))
        })?;

        Ok(Self {
            slot,
            file_name: raw.file_name,
            mime_type,
            width,
            height,
            bytes: raw.bytes,
        })
    }

    pub fn to_part(&self) -> ImagePart {
        ImagePart::new(self.mime_type, self.bytes.clone())
    }

    pub fn to_data_url(&self) -> String {
        self.to_part().to_data_url()
    }
}

/// One estimation request. Holding both images is a precondition for
/// constructing it.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: Uuid,
    pub variant: Variant,
    pub front: UploadedImage,
    pub side: UploadedImage,
    pub demographics: Option<Demographics>,
}

/// Unvalidated form fields as read off the request body.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub front_image: Option<RawUpload>,
    pub side_image: Option<RawUpload>,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
}

impl SubmissionForm {
    /// Validates the form for `variant` and assembles a submission.
    ///
    /// Images are checked first so a form without photos always produces the
    /// missing-images warning.
    pub fn into_submission(self, variant: Variant) -> Result<Submission> {
        let (Some(front), Some(side)) = (
            self.front_image.filter(|upload| !upload.is_empty()),
            self.side_image.filter(|upload| !upload.is_empty()),
        ) else {
            return Err(Error::missing_input(MISSING_IMAGES_WARNING));
        };

        let demographics = if variant.collects_demographics() {
            let demographics = Demographics {
                gender: match self.gender.as_deref().map(str::trim) {
                    Some(gender) if !gender.is_empty() => gender.parse()?,
                    _ => return Err(Error::missing_input("Please select a gender.")),
                },
                age: parse_whole_number("Age", self.age.as_deref())?,
                height_cm: parse_whole_number("Height", self.height.as_deref())?,
                weight_kg: parse_whole_number("Weight", self.weight.as_deref())?,
            };
            demographics.validate()?;
            Some(demographics)
        } else {
            None
        };

        Ok(Submission {
            id: Uuid::new_v4(),
            variant,
            front: UploadedImage::decode(ImageSlot::Front, front)?,
            side: UploadedImage::decode(ImageSlot::Side, side)?,
            demographics,
        })
    }
}

fn parse_whole_number(label: &str, value: Option<&str>) -> Result<i32> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(Error::missing_input(format!("Please enter your {}.", label.to_lowercase())));
    }

    value
        .parse()
        .map_err(|_| Error::invalid_input(format!("{} must be a whole number, got '{}'", label, value)))
}
