use std::sync::Arc;

use axum::extract::{Json, State};

use bijlee_chain::execute_transfer;
use bijlee_core::helpers::dto::{TransferRequest, TransferResponse};

use crate::{error::ErrorServer, state::ServerState};

#[utoipa::path(
    post,
    path = "/transfer",
    request_body = TransferRequest,
    description = "Send Bijlee tokens from the configured wallet",
    responses(
        (status = 200, description = "Transfer confirmed", body = TransferResponse),
        (status = 400, description = "Bad Request"),
        (status = 502, description = "Chain or wallet failure"),
    )
)]
#[axum::debug_handler]
pub async fn transfer(
    State(server_state): State<Arc<ServerState>>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, ErrorServer> {
    let signature = execute_transfer(
        server_state.node(),
        server_state.wallet(),
        &request.recipient,
        request.amount,
    )
    .await?;

    Ok(Json(TransferResponse { signature }))
}
