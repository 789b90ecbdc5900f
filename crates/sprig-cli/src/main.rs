mod cli;
mod config;
mod driver;

use clap::Parser;

use cli::Cli;
use driver::Exit;

fn main() {
    std::process::exit(run() as i32);
}

fn run() -> Exit {
    if std::env::args_os().len() < 2 {
        let _ = <Cli as clap::CommandFactory>::command().print_help();
        return Exit::Success;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap routes --help and --version through the error path
            if err.use_stderr() {
                eprint!("{err}");
                return Exit::InvalidArgs;
            }
            print!("{err}");
            return Exit::Success;
        }
    };

    if let Some(path) = &cli.generate_rcfile {
        return match std::fs::write(path, config::TEMPLATE) {
            Ok(()) => Exit::Success,
            Err(err) => {
                eprintln!("failed to write {}: {err}", path.display());
                Exit::InvalidArgs
            }
        };
    }

    let mut settings = config::Settings::default();
    if let Some(path) = &cli.configuration {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("failed to read {}: {err}", path.display());
                return Exit::InvalidArgs;
            }
        };
        settings = match config::parse(&text) {
            Ok(settings) => settings,
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                return Exit::InvalidArgs;
            }
        };
    }
    driver::merge_cli(&mut settings, &cli);

    driver::run(&settings)
}
