use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::borrow::Cow;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    // Corpo que nem chegou a virar o payload (campo ausente, tipo errado, JSON quebrado)
    #[error("Corpo da requisição inválido: {field}")]
    InvalidBody { field: String, message: String },

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Conta desativada")]
    AccountInactive,

    #[error("Acesso negado")]
    Forbidden,

    // Não diz se o registro existe em outro hotel.
    #[error("Registro não encontrado: {0}")]
    NotFound(&'static str),

    #[error("Quarto {room_number} não está disponível")]
    RoomUnavailable { room_number: String },

    #[error("Conflito: {0}")]
    Conflict(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Erro de validação ligado a um único campo (ex: `roomId`).
    pub fn field(field: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut err = ValidationError::new(code);
        err.message = Some(Cow::Borrowed(message));
        let mut errors = ValidationErrors::new();
        errors.add(field, err);
        AppError::ValidationError(errors)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::AccountInactive | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RoomUnavailable { .. }
            | AppError::Conflict(_)
            | AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(camel_case(&field), messages);
                }
                json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                })
            }
            AppError::InvalidBody { field, message } => {
                let mut details = serde_json::Map::new();
                details.insert(field.clone(), json!([message]));
                json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                })
            }
            AppError::RoomUnavailable { room_number } => json!({
                "error": format!("O quarto {} não está disponível. Escolha outro quarto.", room_number),
                "roomNumber": room_number,
            }),
            AppError::EmailAlreadyExists => json!({ "error": "Este e-mail já está em uso." }),
            AppError::InvalidCredentials => json!({ "error": "E-mail ou senha inválidos." }),
            AppError::InvalidToken => {
                json!({ "error": "Token de autenticação inválido ou ausente." })
            }
            AppError::AccountInactive => json!({ "error": "Sua conta foi desativada." }),
            AppError::Forbidden => {
                json!({ "error": "Você não tem permissão para realizar esta ação." })
            }
            AppError::NotFound(_) | AppError::Conflict(_) => json!({ "error": self.to_string() }),

            // Todos os outros erros viram 500.
            // O `tracing` loga a mensagem detalhada, o cliente recebe uma genérica.
            e => {
                tracing::error!(error = ?e, "Erro Interno do Servidor: {}", e);
                json!({ "error": "Ocorreu um erro inesperado." })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let (field, message) = match &rejection {
            JsonRejection::JsonDataError(_) => {
                let text = rejection.body_text();
                // "<prefixo fixo do axum>: <caminho>: <erro do serde>"
                let detail = text.split_once(": ").map(|(_, d)| d).unwrap_or(&text);
                match rejected_field(detail) {
                    Some((field, true)) => {
                        let message = format!("O campo '{field}' é obrigatório.");
                        (field, message)
                    }
                    Some((field, false)) => {
                        let message = format!("Valor inválido para o campo '{field}'.");
                        (field, message)
                    }
                    None => ("body".to_string(), "Formato do corpo inválido.".to_string()),
                }
            }
            JsonRejection::JsonSyntaxError(_) => (
                "body".to_string(),
                "O corpo da requisição não é um JSON válido.".to_string(),
            ),
            JsonRejection::MissingJsonContentType(_) => (
                "body".to_string(),
                "Envie o corpo como JSON (Content-Type: application/json).".to_string(),
            ),
            _ => ("body".to_string(), "Não foi possível ler o corpo da requisição.".to_string()),
        };

        tracing::debug!(%field, "Corpo rejeitado: {}", rejection.body_text());
        AppError::InvalidBody { field, message }
    }
}

/// Campo apontado por um erro de desserialização do serde. `true` quando o campo faltou.
fn rejected_field(detail: &str) -> Option<(String, bool)> {
    if let Some((_, rest)) = detail.split_once("missing field `") {
        let field = rest.split('`').next()?;
        return Some((field.to_string(), true));
    }

    // Erros dentro de um campo vêm prefixados pelo caminho: "roomId: invalid type ..."
    let (path, _) = detail.split_once(": ")?;
    if path.is_empty() || path == "." || path.contains(' ') {
        return None;
    }
    Some((path.to_string(), false))
}

// O derive do validator usa o nome Rust do campo; a API fala camelCase.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn room_unavailable_reports_room_number() {
        let (status, body) = body_json(AppError::RoomUnavailable {
            room_number: "101".into(),
        })
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["roomNumber"], "101");
        assert!(body["error"].as_str().unwrap().contains("101"));
    }

    #[tokio::test]
    async fn field_error_carries_field_details() {
        let (status, body) = body_json(AppError::field(
            "roomId",
            "not_found",
            "Quarto não encontrado neste hotel.",
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["roomId"][0], "Quarto não encontrado neste hotel.");
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let (status, body) = body_json(AppError::DatabaseError(sqlx::Error::PoolTimedOut)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Ocorreu um erro inesperado.");
    }

    #[test]
    fn not_found_is_the_same_for_every_tenant() {
        assert_eq!(AppError::NotFound("Reserva").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotFound("Reserva").to_string(), "Registro não encontrado: Reserva");
    }

    #[derive(Debug, serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct StayBody {
        guest_id: uuid::Uuid,
        check_in_date: chrono::NaiveDate,
    }

    async fn reject(body: &'static str, content_type: Option<&str>) -> (StatusCode, serde_json::Value) {
        use axum::extract::FromRequest;

        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        let request = builder.body(axum::body::Body::from(body)).unwrap();

        let rejection = Json::<StayBody>::from_request(request, &()).await.unwrap_err();
        body_json(AppError::from(rejection)).await
    }

    #[tokio::test]
    async fn missing_json_field_is_reported_by_name() {
        let (status, body) = reject(r#"{"checkInDate": "2026-01-10"}"#, Some("application/json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["guestId"][0], "O campo 'guestId' é obrigatório.");
    }

    #[tokio::test]
    async fn wrong_json_type_points_at_the_field() {
        let (status, body) = reject(
            r#"{"guestId": "não-é-uuid", "checkInDate": "2026-01-10"}"#,
            Some("application/json"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["guestId"].is_array());
    }

    #[tokio::test]
    async fn broken_json_and_missing_content_type_use_the_body_key() {
        let (status, body) = reject("{", Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["body"].is_array());

        let (status, body) = reject("{}", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["body"].is_array());
    }

    #[test]
    fn serde_messages_are_mapped_to_fields() {
        assert_eq!(
            rejected_field("missing field `roomId` at line 1 column 2"),
            Some(("roomId".to_string(), true))
        );
        assert_eq!(
            rejected_field("pricePerNight: invalid type: string \"x\", expected a Decimal"),
            Some(("pricePerNight".to_string(), false))
        );
        assert_eq!(rejected_field("invalid type: map, expected a sequence"), None);
    }

    #[tokio::test]
    async fn derived_field_names_are_rendered_in_camel_case() {
        let mut errors = ValidationErrors::new();
        errors.add("price_per_night", ValidationError::new("range"));
        let (_, body) = body_json(AppError::ValidationError(errors)).await;

        assert!(body["details"]["pricePerNight"].is_array());
        assert_eq!(camel_case("room_number"), "roomNumber");
        assert_eq!(camel_case("roomId"), "roomId");
    }
}
