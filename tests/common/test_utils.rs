use axum::{
    body::Body,
    http::{Request, header},
};
use bodycomp_estimator::estimator::{RawUpload, SubmissionForm};
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;

pub const BOUNDARY: &str = "bodycomp-test-boundary";

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut Cursor::new(&mut bytes), format)
        .expect("Failed to encode test image");
    bytes
}

pub fn png_bytes() -> Vec<u8> {
    encode(4, 8, ImageFormat::Png)
}

pub fn jpeg_bytes() -> Vec<u8> {
    encode(8, 16, ImageFormat::Jpeg)
}

pub fn upload(file_name: &str, bytes: Vec<u8>) -> RawUpload {
    RawUpload {
        file_name: Some(file_name.to_string()),
        bytes,
    }
}

/// A composition form with a PNG front view and a JPEG side view.
pub fn complete_form() -> SubmissionForm {
    SubmissionForm {
        front_image: Some(upload("front.png", png_bytes())),
        side_image: Some(upload("side.jpg", jpeg_bytes())),
        ..Default::default()
    }
}

/// An insight form with valid demographics.
pub fn complete_insight_form() -> SubmissionForm {
    SubmissionForm {
        gender: Some("Female".to_string()),
        age: Some("34".to_string()),
        height: Some("168".to_string()),
        weight: Some("61".to_string()),
        ..complete_form()
    }
}

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Both photos, as a browser would send them.
    pub fn with_images(self) -> Self {
        self.file("front_image", "front.png", "image/png", &png_bytes())
            .file("side_image", "side.jpg", "image/jpeg", &jpeg_bytes())
    }

    /// Valid insight demographics.
    pub fn with_demographics(self) -> Self {
        self.text("gender", "Male")
            .text("age", "29")
            .text("height", "181")
            .text("weight", "77")
    }

    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}

/// Reads a whole response body as UTF-8.
pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Response body is not UTF-8")
}
