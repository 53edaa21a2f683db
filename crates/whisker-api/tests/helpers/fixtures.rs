//! Test fixtures: small encoded images and multipart forms.

use axum_test::multipart::{MultipartForm, Part};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

fn encode(format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(48, 32, |x, y| Rgb([(x * 5) as u8, (y * 7) as u8, 128]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), format)
        .expect("encode test image");
    buf
}

pub fn create_test_png() -> Vec<u8> {
    encode(ImageFormat::Png)
}

pub fn create_test_jpeg() -> Vec<u8> {
    encode(ImageFormat::Jpeg)
}

fn mime_for(filename: &str) -> &'static str {
    if filename.to_lowercase().ends_with(".png") {
        "image/png"
    } else if filename.to_lowercase().ends_with(".txt") {
        "text/plain"
    } else {
        "image/jpeg"
    }
}

/// `/upload` form: `image`, `name`, `email`.
pub fn upload_form(filename: &str, data: Vec<u8>, name: &str, email: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part(
            "image",
            Part::bytes(data)
                .file_name(filename.to_string())
                .mime_type(mime_for(filename)),
        )
        .add_text("name", name.to_string())
        .add_text("email", email.to_string())
}

/// `/register` form: `image`, `chat_name`, `owner_email`.
pub fn register_form(filename: &str, data: Vec<u8>, name: &str, email: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part(
            "image",
            Part::bytes(data)
                .file_name(filename.to_string())
                .mime_type(mime_for(filename)),
        )
        .add_text("chat_name", name.to_string())
        .add_text("owner_email", email.to_string())
}
