#[tokio::main]
async fn main() {
    if let Err(e) = discharge_summary_lib::run().await {
        eprintln!("discharge-summary: {e}");
        std::process::exit(1);
    }
}
