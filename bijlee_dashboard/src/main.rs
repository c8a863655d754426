use std::env;
use std::process;

use anyhow::Result;
use dotenvy::dotenv;
use getopts::Options;

use bijlee_chain::{ChainClient, HttpChainClient, LocalWallet, Network, execute_transfer};
use bijlee_core::helpers::dto::TransferStatus;
use bijlee_dashboard::form::{REFRESH_DELAY, TransferForm};

fn print_usage(program: &str, opts: Options) {
    let brief = format!("Usage: {} [OPTIONS]", program);
    print!("{}", opts.usage(&brief));
    println!("\nEnvironment variables:");
    println!("  BIJLEE_NETWORK     mainnet-beta | testnet | devnet (default: devnet)");
    println!("  BIJLEE_RPC_URL     Custom RPC endpoint (overrides the network)");
    println!("  BIJLEE_WALLET_KEY  Base58-encoded 32-byte wallet seed (required)");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optflag("b", "balance", "Show the wallet's Bijlee balance");
    opts.optflag("t", "transfer", "Send Bijlee tokens");
    opts.optopt("r", "recipient", "Recipient wallet address", "ADDRESS");
    opts.optopt("a", "amount", "Amount of BIJLEE to send", "AMOUNT");
    opts.optflag("h", "help", "Show this help message");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(f) => {
            eprintln!("Error parsing arguments: {}", f);
            print_usage(&program, opts);
            process::exit(1);
        }
    };

    if matches.opt_present("h") || matches.opt_present("help") {
        print_usage(&program, opts);
        return Ok(());
    }

    let balance_flag = matches.opt_present("b") || matches.opt_present("balance");
    let transfer_flag = matches.opt_present("t") || matches.opt_present("transfer");

    if balance_flag && transfer_flag {
        eprintln!("Error: Cannot specify both balance and transfer options");
        process::exit(1);
    }

    if !balance_flag && !transfer_flag {
        eprintln!("Error: Must specify either balance (-b) or transfer (-t) option");
        print_usage(&program, opts);
        process::exit(1);
    }

    let node = connect_node();
    let wallet = load_wallet()?;

    if balance_flag {
        show_balance(&node, &wallet).await?;
    } else {
        let recipient = matches.opt_str("r").unwrap_or_default();
        let amount = matches.opt_str("a").unwrap_or_default();
        run_transfer(&node, &wallet, recipient, amount).await?;
    }

    Ok(())
}

fn connect_node() -> HttpChainClient {
    let network = env::var("BIJLEE_NETWORK").unwrap_or_else(|_| "devnet".to_string());
    let network = match network.as_str() {
        "mainnet" | "mainnet-beta" => Network::MainnetBeta,
        "testnet" => Network::Testnet,
        _ => Network::Devnet,
    };
    match env::var("BIJLEE_RPC_URL") {
        Ok(url) => HttpChainClient::new(url),
        Err(_) => HttpChainClient::for_network(network),
    }
}

fn load_wallet() -> Result<LocalWallet> {
    let seed = env::var("BIJLEE_WALLET_KEY")
        .map_err(|_| anyhow::anyhow!("BIJLEE_WALLET_KEY environment variable not set"))?;
    Ok(LocalWallet::from_base58_seed(&seed)?)
}

async fn show_balance(node: &HttpChainClient, wallet: &LocalWallet) -> Result<()> {
    let address = wallet.address();
    let balance = node.get_token_balance(&address).await?;
    println!("Wallet:  {}", address);
    println!("Balance: {} BIJLEE", balance.ui_amount);
    Ok(())
}

async fn run_transfer(
    node: &HttpChainClient,
    wallet: &LocalWallet,
    recipient: String,
    amount: String,
) -> Result<()> {
    let mut form = TransferForm::new();
    form.on_success(|signature| println!("✅ Transfer successful: {}", signature));
    form.on_error(|message| eprintln!("❌ Transfer failed: {}", message));

    form.connect_wallet(Some(wallet.address()));
    form.set_recipient(recipient);
    form.set_amount(amount);

    let request = match form.begin_submit() {
        Ok(request) => request,
        Err(message) => {
            eprintln!("Error: {}", message);
            process::exit(1);
        }
    };

    println!(
        "💸 Sending {} BIJLEE to {}...",
        request.amount, request.recipient
    );

    let result = execute_transfer(node, wallet, &request.recipient, request.amount).await;
    form.complete(result);

    if form.status() == TransferStatus::Success {
        // Give the chain a moment before showing the refreshed balance.
        tokio::time::sleep(REFRESH_DELAY).await;
        show_balance(node, wallet).await?;
        Ok(())
    } else {
        process::exit(1);
    }
}
