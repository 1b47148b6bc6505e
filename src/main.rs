// src/main.rs

use taskplan::{cli, logging, run};

/// Exit status when at least one request failed validation.
const EXIT_REJECTED: i32 = 2;

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_REJECTED),
        Err(err) => {
            eprintln!("taskplan error: {err:?}");
            std::process::exit(1);
        }
    }
}

/// Returns `false` if any request was rejected.
async fn run_main() -> anyhow::Result<bool> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    let summary = run(args).await?;
    Ok(!summary.has_failures())
}
