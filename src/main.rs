use clap::Parser;
use dynamic_prefix_pool::config::Args;
use dynamic_prefix_pool::logging::init_logging;
use dynamic_prefix_pool::output::print_failure;
use dynamic_prefix_pool::run;

#[tokio::main]
async fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let args = Args::parse();
    if let Err(e) = init_logging(&args.log_config) {
        eprintln!("{e}");
    }
    log::info!("#Start main() pool={}", args.pool_name);

    if let Err(e) = run(&args).await {
        print_failure(&e);
        std::process::exit(1);
    }
}
