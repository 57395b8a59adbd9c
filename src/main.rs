use reqlog::cli::Cli;
use reqlog::config::Config;
use reqlog::util::telemetry;

#[tokio::main]
async fn main() {
    let args = Cli::parse_args(); // clap exits with a usage error on bad flags

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("reqlog: {}", e);
            std::process::exit(e.exit_code());
        }
    };
    telemetry::init(&config.logging.level, args.verbose);

    match args.run(&config).await {
        Ok(report) => print!("{}", report),
        Err(e) => {
            eprintln!("reqlog: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
