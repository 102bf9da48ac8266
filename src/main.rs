// src/main.rs

use speech_installer::{cli, config, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("speech-installer error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    let data_dir = config::resolve_data_dir(args.data_dir.as_deref())?;
    logging::init_logging(args.log_level, &data_dir)?;
    run(args, data_dir).await
}
