use tlskit::cli::start;

#[tokio::main]
async fn main() {
    if let Err(e) = start::start().await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
