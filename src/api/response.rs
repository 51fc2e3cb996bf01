use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::error::AppError;

/// Success envelope: `{ code, status: "success", data }`
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub code: StatusCode,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { code: StatusCode::OK, data }
    }

    pub fn created(data: T) -> Self {
        Self { code: StatusCode::CREATED, data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "code": self.code.as_u16(),
            "status": "success",
            "data": self.data,
        }));
        (self.code, body).into_response()
    }
}

/// Success envelope without a payload: `{ code, status: "success", message }`
#[derive(Debug)]
pub struct ApiMessage(pub &'static str);

impl IntoResponse for ApiMessage {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "code": StatusCode::OK.as_u16(),
            "status": "success",
            "message": self.0,
        }));
        (StatusCode::OK, body).into_response()
    }
}

/// Unwrap a JSON body, turning extractor rejections into the error envelope
pub fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> crate::error::Result<T> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
