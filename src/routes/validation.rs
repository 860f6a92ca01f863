use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor whose rejections render as [`AppError`] (400)
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Parse a path identifier the way the listing and account routes expect
///
/// Only plain decimal integers are accepted.
pub fn parse_id(raw: &str, error_message: &'static str) -> Result<i32, AppError> {
    raw.trim().parse::<i32>().map_err(|_| {
        tracing::warn!("Rejected path identifier: {:?}", raw);
        AppError::invalid(error_message)
    })
}
