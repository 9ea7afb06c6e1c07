use std::process::ExitCode;

use clap::error::ErrorKind;
use mssql_json::args::{argument_error, parse_args};
use mssql_json::{MssqlJsonError, QueryConfig, logging};

fn main() -> ExitCode {
    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return match err.print() {
                Ok(()) => ExitCode::SUCCESS,
                Err(io) => ExitCode::from(MssqlJsonError::from(io).exit_code(false)),
            };
        }
        Err(err) => {
            let err = argument_error(&err);
            eprintln!("{err}");
            return ExitCode::from(err.exit_code(false));
        }
    };

    logging::init(args.verbose);

    let config = match QueryConfig::from_args(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(err.exit_code(false));
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("failed to start runtime: {err}");
            return ExitCode::from(1);
        }
    };

    let mut stdout = std::io::stdout().lock();
    match runtime.block_on(mssql_json::run(&config, &mut stdout)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code(config.strict))
        }
    }
}
