use clap::Parser;
use clean_folder::cli::{Cli, run_cli_with_config};
use clean_folder::output::OutputFormatter;
use std::process;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if !cli.path.is_dir() {
        OutputFormatter::error(&format!("Invalid folder path: {}", cli.path.display()));
        process::exit(1);
    }

    let result = run_cli_with_config(
        cli.organize_command(),
        &cli.path,
        cli.config.as_deref(),
    );
    match result {
        Ok(()) if cli.dry_run => {}
        Ok(()) => {
            OutputFormatter::success("Files organized and renamed, empty folders removed!")
        }
        Err(e) => {
            OutputFormatter::error(&e);
            process::exit(1);
        }
    }
}
