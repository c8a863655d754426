use bijlee_chain::{Address, HttpChainClient, LocalWallet};

pub struct ServerState {
    node: HttpChainClient,
    wallet: LocalWallet,
    mint: Address,
}

impl From<(HttpChainClient, LocalWallet, Address)> for ServerState {
    fn from(states: (HttpChainClient, LocalWallet, Address)) -> Self {
        let (node, wallet, mint) = states;
        Self { node, wallet, mint }
    }
}

impl ServerState {
    pub fn node(&self) -> &HttpChainClient {
        &self.node
    }

    pub fn wallet(&self) -> &LocalWallet {
        &self.wallet
    }

    pub fn mint(&self) -> Address {
        self.mint
    }
}
