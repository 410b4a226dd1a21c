//! # Cart CLI Entry Point
//!
//! The actual setup is in lib.rs so it can be tested.

#[tokio::main]
async fn main() {
    let code = cart_cli::run(std::env::args().skip(1)).await;
    std::process::exit(code);
}
