use serde::{Deserialize, Serialize};

use super::{segment, ApiRequest, Backend, Part};
use crate::errors::AppError;
use crate::models::Attachment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub url: String,
    #[serde(default)]
    pub file_name: String,
}

impl Backend<'_> {
    pub async fn upload_file(&self, folder: &str, file: &Attachment) -> Result<StoredFile, AppError> {
        let parts = vec![Part::File {
            name: "file".to_string(),
            file: file.clone(),
        }];
        self.fetch(
            ApiRequest::post(format!("/files/upload/{}", segment(folder))).multipart(parts),
        )
        .await
    }
}
