use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = attio_node::cli::Cli::parse();
    if let Err(err) = attio_node::cli::run(cli).await {
        eprintln!("attio-node: {}", err);
        if let Some(hint) = err.hint.as_deref() {
            eprintln!("hint: {}", hint);
        }
        std::process::exit(1);
    }
}
