//! Multipart form extraction for upload handlers

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::HttpAppError;
use crate::services::UploadRequest;

/// Read a multipart form into an [`UploadRequest`].
///
/// `file_field` carries the image; `name_field` and `email_field` are text.
/// A missing file part yields an empty request with no filename, which the
/// pipeline answers with its "no file" outcome. Unknown fields are ignored.
pub async fn extract_upload_request(
    mut multipart: Multipart,
    file_field: &str,
    name_field: &str,
    email_field: &str,
) -> Result<UploadRequest, HttpAppError> {
    let mut data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut text_fields: HashMap<String, String> = HashMap::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == file_field {
            if data.is_some() {
                // Only the first file part counts.
                continue;
            }
            filename = field.file_name().map(|s: &str| s.to_string());
            data = Some(field.bytes().await?.to_vec());
        } else if field_name == name_field || field_name == email_field {
            let value = field.text().await?;
            text_fields.insert(field_name, value);
        }
    }

    Ok(UploadRequest {
        data: data.unwrap_or_default(),
        filename,
        name: text_fields.remove(name_field).unwrap_or_default(),
        email: text_fields.remove(email_field).unwrap_or_default(),
    })
}
