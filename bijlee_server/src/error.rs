use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToResponse;

use bijlee_core::error::TransferError;

#[derive(Debug, Serialize, ToResponse)]
pub struct ErrorServer {
    pub message: String,
    pub status: u16,
}

impl std::fmt::Display for ErrorServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ErrorServer {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<TransferError> for ErrorServer {
    fn from(err: TransferError) -> Self {
        let status: u16 = match &err {
            TransferError::InvalidAddress(_) | TransferError::InvalidAmount => {
                StatusCode::BAD_REQUEST.into()
            }
            TransferError::WalletNotConnected => StatusCode::UNAUTHORIZED.into(),
            TransferError::AccountLookupFailed(_)
            | TransferError::SigningRejected(_)
            | TransferError::TransactionFailed(_) => StatusCode::BAD_GATEWAY.into(),
            TransferError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR.into(),
        };
        ErrorServer {
            message: err.to_string(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_errors_map_to_http_statuses() {
        let bad_request: ErrorServer = TransferError::InvalidAmount.into();
        assert_eq!(bad_request.status, 400);

        let unauthorized: ErrorServer = TransferError::WalletNotConnected.into();
        assert_eq!(unauthorized.status, 401);

        let bad_gateway: ErrorServer =
            TransferError::TransactionFailed("blockhash expired".to_string()).into();
        assert_eq!(bad_gateway.status, 502);
        assert!(bad_gateway.message.contains("blockhash expired"));
    }
}
