use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header,
    Form, Json,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::tts::Language;

/// Fields of a synthesis request.
///
/// Accepted as `application/x-www-form-urlencoded`, `multipart/form-data`
/// or a JSON object with the same field names.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisForm {
    pub text: String,
    pub language: Option<Language>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFields {
    text: Option<String>,
    language: Option<String>,
}

impl RawFields {
    fn into_form(self) -> Result<SynthesisForm, AppError> {
        let text = self
            .text
            .ok_or_else(|| AppError::InvalidInput("Missing form field 'text'".into()))?;

        // An empty hint means "detect it"
        let language = match self.language.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(tag) => Some(
                tag.parse::<Language>()
                    .map_err(|e| AppError::InvalidInput(e.to_string()))?,
            ),
        };

        Ok(SynthesisForm { text, language })
    }
}

#[async_trait]
impl<S> FromRequest<S> for SynthesisForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let fields = if content_type.starts_with("multipart/form-data") {
            read_multipart(
                Multipart::from_request(req, state)
                    .await
                    .map_err(|e| AppError::InvalidInput(e.body_text()))?,
            )
            .await?
        } else if content_type.starts_with("application/json") {
            let Json(fields) = Json::<RawFields>::from_request(req, state)
                .await
                .map_err(|e| AppError::InvalidInput(e.body_text()))?;
            fields
        } else {
            let Form(fields) = Form::<RawFields>::from_request(req, state)
                .await
                .map_err(|e| AppError::InvalidInput(e.body_text()))?;
            fields
        };

        fields.into_form()
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<RawFields, AppError> {
    let mut fields = RawFields::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        let slot = match name.as_deref() {
            Some("text") => &mut fields.text,
            Some("language") => &mut fields.language,
            _ => continue,
        };
        *slot = Some(
            field
                .text()
                .await
                .map_err(|e| AppError::InvalidInput(e.body_text()))?,
        );
    }

    Ok(fields)
}
