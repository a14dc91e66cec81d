use clap::{
    crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches, Command,
};
use std::path::Path;
use std::time::Instant;

use vinnig::config::{Config, CONFIG_FILE_NAME};
use vinnig::materialize::EntryOutcome;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Toml configuration file to run from"),
        )
        .subcommand(
            Command::new("list")
                .about("Lists the entries currently present in a directory")
                .arg(Arg::new("directory").help("directory to inspect").required(true)),
        )
        .get_matches();

    let is_verbose = matches.get_flag("verbose");

    init_logging(is_verbose);

    match matches.subcommand() {
        Some(("list", args)) => handle_list(args),
        _ => handle_run(&matches),
    }
}

fn init_logging(is_verbose: bool) {
    let level = if is_verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new().filter_level(level).init();
}

fn handle_run(args: &ArgMatches) -> miette::Result<()> {
    let started = Instant::now();

    // an explicit --config wins; otherwise a vinnig.toml in the working
    // directory; otherwise the built-in skeleton
    let config = match args.get_one::<String>("config") {
        Some(path) => Config::from_file(path)?,
        None if Path::new(CONFIG_FILE_NAME).exists() => Config::from_file(CONFIG_FILE_NAME)?,
        None => Config::default(),
    };

    let report = vinnig::api::run(&config)?;

    log::debug!(
        "{} created, {} existing, {} rejected",
        report.count(EntryOutcome::Created),
        report.count(EntryOutcome::AlreadyExists),
        report.count(EntryOutcome::RejectedExtension),
    );

    println!("{}: {:.2?}", crate_name!(), started.elapsed());

    Ok(())
}

fn handle_list(args: &ArgMatches) -> miette::Result<()> {
    let directory = args
        .get_one::<String>("directory")
        .expect("directory required");

    let names = vinnig::api::list_existing_files(Path::new(directory))?;

    for name in names {
        println!("{}", name);
    }

    Ok(())
}
