use crate::{info, token_info, transfer};
use bijlee_core::helpers::dto::{
    TokenBalance, TokenInfoResponse, TokenMetadata, TransferRequest, TransferResponse,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        info::handler::info,
        transfer::handler::transfer,
        token_info::handler::token_info,
        token_info::handler::balance,
    ),
    components(schemas(
        info::dto::Info,
        TransferRequest,
        TransferResponse,
        TokenInfoResponse,
        TokenMetadata,
        TokenBalance
    ))
)]
pub struct ApiDoc;
