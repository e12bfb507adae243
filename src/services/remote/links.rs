use super::{segment, ApiRequest, Backend};
use crate::errors::AppError;
use crate::models::{EnrollmentLink, EnrollmentLinkInput};

const ADMIN_LINKS: &str = "/PublicEnrollment/admin/links";

impl Backend<'_> {
    pub async fn enrollment_links(&self) -> Result<Vec<EnrollmentLink>, AppError> {
        self.fetch(ApiRequest::get(ADMIN_LINKS)).await
    }

    pub async fn create_enrollment_link(
        &self,
        input: &EnrollmentLinkInput,
    ) -> Result<EnrollmentLink, AppError> {
        self.fetch(ApiRequest::post(ADMIN_LINKS).json(input)?).await
    }

    pub async fn update_enrollment_link(
        &self,
        id: &str,
        input: &EnrollmentLinkInput,
    ) -> Result<EnrollmentLink, AppError> {
        self.fetch(ApiRequest::put(format!("{ADMIN_LINKS}/{}", segment(id))).json(input)?)
            .await
    }

    pub async fn delete_enrollment_link(&self, id: &str) -> Result<String, AppError> {
        self.execute(ApiRequest::delete(format!("{ADMIN_LINKS}/{}", segment(id))))
            .await
    }

    pub async fn regenerate_link_qr(&self, id: &str) -> Result<EnrollmentLink, AppError> {
        self.fetch(ApiRequest::post(format!(
            "{ADMIN_LINKS}/{}/regenerate-qr",
            segment(id)
        )))
        .await
    }

    pub async fn resolve_enrollment_link(&self, code: &str) -> Result<EnrollmentLink, AppError> {
        self.fetch(ApiRequest::get(format!("/PublicEnrollment/{}", segment(code))))
            .await
    }
}
