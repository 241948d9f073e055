//! tasklens CLI binary

// The binary reports fatal errors on stderr before and after tracing is up.
#![allow(clippy::print_stderr)]

use std::io;
use tasklens::cli::{self, EXIT_CLI, exit_code_for, render_error};
use tasklens::tracing::{TracingConfig, init_tracing};

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();

    let tracing_config = TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
    };
    if let Err(error) = init_tracing(tracing_config) {
        eprintln!("{error:?}");
        std::process::exit(EXIT_CLI);
    }

    let exit_code = match tasklens::run(&cli, &mut io::stdout().lock()) {
        Ok(code) => code,
        Err(err) => {
            let code = exit_code_for(&err);
            render_error(err);
            code
        }
    };
    std::process::exit(exit_code);
}
