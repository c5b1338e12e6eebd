use clap::Parser;
use env_logger::Env;
use log::debug;
use rdfprint_api::print::PrintMode;
use rdfprint_cli::{run, PrintOptions};
use std::io::stdout;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "rdfprint", version)]
#[command(about = "Prints the statements of an RDF/XML document")]
struct Cli {
    /// Print each statement as soon as it is parsed (default)
    #[clap(long, action, overrides_with = "static_")]
    streaming: bool,
    /// Print the statements once the whole document has been parsed, without duplicates
    #[clap(long = "static", action, overrides_with = "streaming")]
    static_: bool,
    /// Strict mode - fails on the first invalid element instead of skipping it
    #[clap(long, action, default_value = "false")]
    strict: bool,
    /// Verbose mode - sets the RUST_LOG level to info, defaults to warning level
    #[clap(long, short, action, default_value = "false")]
    verbose: bool,
    /// Debug mode - sets the RUST_LOG level to debug, defaults to warning level
    #[clap(long, action, default_value = "false")]
    debug: bool,
    /// The URI or the file name of the RDF/XML document
    source: String,
}

fn main() -> ExitCode {
    let cmd = match Cli::try_parse() {
        Ok(cmd) => cmd,
        Err(error) if error.use_stderr() => {
            let _ = error.print();
            return ExitCode::FAILURE;
        }
        // --help and --version
        Err(error) => error.exit(),
    };

    let log_level = if cmd.verbose { "info" } else { "warn" };
    let log_level = if cmd.debug { "debug" } else { log_level };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();
    debug!("{:?}", cmd);

    let options = PrintOptions {
        mode: if cmd.static_ {
            PrintMode::Buffered
        } else {
            PrintMode::Streaming
        },
        robust: !cmd.strict,
    };
    match run(&cmd.source, options, stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("rdfprint: {:#}", error);
            ExitCode::FAILURE
        }
    }
}
