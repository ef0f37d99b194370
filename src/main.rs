// src/main.rs

use neovide_start::config::Settings;
use neovide_start::diagnostics::Diagnostics;
use neovide_start::errors::exit_code;
use neovide_start::{logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let settings = Settings::from_env();
    if let Err(err) = logging::init_logging(settings.log_level) {
        eprintln!("neovide-start: {err:?}");
    }

    let code = match run(&settings, std::env::args_os().skip(1)).await {
        Ok(_) => exit_code::SUCCESS,
        Err(err) => {
            Diagnostics::stderr(settings.no_color).report(&err);
            err.exit_code()
        }
    };
    std::process::exit(code);
}
