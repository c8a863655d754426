use std::sync::Arc;

use axum::extract::{Json, State};

use bijlee_chain::ChainClient;
use bijlee_core::helpers::amount::BIJLEE_DECIMALS;
use bijlee_core::helpers::dto::{TokenBalance, TokenInfoResponse, TokenMetadata};

use crate::{error::ErrorServer, state::ServerState};

const TOKEN_NAME: &str = "Bijlee Token";
const TOKEN_SYMBOL: &str = "BIJLEE";
const TOKEN_TOTAL_SUPPLY: u64 = 1_000_000_000;

#[utoipa::path(
    get,
    path = "/token-info",
    description = "Token metadata plus the configured wallet's balance",
    responses(
        (status = 200, description = "Success", body = TokenInfoResponse),
        (status = 502, description = "Chain failure"),
    )
)]
#[axum::debug_handler]
pub async fn token_info(
    State(server_state): State<Arc<ServerState>>,
) -> Result<Json<TokenInfoResponse>, ErrorServer> {
    let wallet_address = server_state.wallet().address();
    let balance = server_state
        .node()
        .get_token_balance(&wallet_address)
        .await?;

    let metadata = TokenMetadata {
        name: TOKEN_NAME.to_string(),
        symbol: TOKEN_SYMBOL.to_string(),
        decimals: BIJLEE_DECIMALS,
        mint: server_state.mint().to_base58(),
        total_supply: TOKEN_TOTAL_SUPPLY,
    };

    Ok(Json(TokenInfoResponse { metadata, balance }))
}

#[utoipa::path(
    get,
    path = "/balance",
    description = "The configured wallet's Bijlee balance",
    responses(
        (status = 200, description = "Success", body = TokenBalance),
        (status = 502, description = "Chain failure"),
    )
)]
#[axum::debug_handler]
pub async fn balance(
    State(server_state): State<Arc<ServerState>>,
) -> Result<Json<TokenBalance>, ErrorServer> {
    let wallet_address = server_state.wallet().address();
    let balance = server_state
        .node()
        .get_token_balance(&wallet_address)
        .await?;

    Ok(Json(balance))
}
