use std::{env, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use bijlee_chain::token::bijlee_mint;
use bijlee_chain::{HttpChainClient, LocalWallet, Network};

use crate::{
    docs::{dto::ApiDoc, handler::api_docs},
    info::handler::info,
    state::ServerState,
    token_info::handler::{balance, token_info},
    transfer::handler::transfer,
};

pub async fn router() -> Router {
    let network = env::var("BIJLEE_NETWORK").unwrap_or_else(|_| "devnet".to_string());

    let network = match network.as_str() {
        "mainnet" | "mainnet-beta" => Network::MainnetBeta,
        "testnet" => Network::Testnet,
        "devnet" => Network::Devnet,
        _ => Network::Devnet,
    };

    let node = match env::var("BIJLEE_RPC_URL") {
        Ok(url) => HttpChainClient::new(url),
        Err(_) => HttpChainClient::for_network(network),
    };

    let wallet_key =
        env::var("BIJLEE_WALLET_KEY").expect("BIJLEE_WALLET_KEY environment variable not set");
    let wallet = LocalWallet::from_base58_seed(&wallet_key)
        .expect("BIJLEE_WALLET_KEY is not a valid base58 seed");

    let state = Arc::new(ServerState::from((node, wallet, bijlee_mint())));

    let doc = ApiDoc::openapi();

    Router::new()
        .merge(Redoc::with_url("/redoc", doc))
        .route("/", get(info))
        .route("/docs", get(api_docs))
        .route("/transfer", post(transfer))
        .route("/token-info", get(token_info))
        .route("/balance", get(balance))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
