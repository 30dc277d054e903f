
extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;
extern crate teeny;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use teeny::checker::{self, Token};

use std::fs;
use std::path::Path;

fn main() {
    let args = process_arguments();
    let verbosity = args.occurrences_of("verbose");
    initialize_logging(verbosity);

    debug!("Arguments:\n\tVerbosity: {}\n\tPrint Tokens: {}\n\tQuiet: {}\n\tInfile: {}",
        level_for(verbosity),
        args.is_present("tokens"),
        args.is_present("quiet"),
        args.value_of("INPUT").unwrap_or("None")
    );

    // INPUT is a required argument, so clap has already rejected a missing one.
    let ipath = Path::new(args.value_of("INPUT").unwrap_or_default());

    let source = match fs::read_to_string(&ipath) {
        Err(err) => {
            error!("fatal: unable to read input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(text) => text,
    };

    if args.is_present("tokens") {
        // Lexer faults are reported by the validation run below.
        if let Ok(tokens) = checker::tokenize(&source, &mut checker::Trace::new()) {
            println!("{}", token_grid(&tokens));
        }
    }

    let validation = checker::validate(&source);

    match validation.outcome {
        Ok(_) => {
            if !args.is_present("quiet") {
                print!("{}", validation.trace);
            }
            info!("`{}` is a valid program", ipath.display());
        },
        Err(err) => {
            if verbosity >= 3 {
                print!("{}", validation.trace);
            }
            error!("fatal: `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
    }
}

fn token_grid(tokens: &[Token]) -> String {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for (idx, token) in tokens.iter().enumerate() {
        grid.add(Cell::from(format!("0x{:04X}:", idx)));
        grid.add(Cell::from(format!("{}", token.line)));
        grid.add(Cell::from(format!("{}", token.kind)));
        grid.add(Cell::from(format!("{:?}", token.text)));
    }

    grid.fit_into_columns(4).to_string()
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(Arg::with_name("INPUT")
            .help("Sets the Teeny source file to check")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("tokens")
            .short("t")
            .long("tokens")
            .takes_value(false)
            .help("prints the token stream as a table before checking"))
        .arg(Arg::with_name("quiet")
            .short("q")
            .long("quiet")
            .takes_value(false)
            .help("does not print the parse trace of a valid program"))
        .get_matches()
}

fn level_for(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level_for(verbosity))
        .chain(std::io::stderr())
        .apply().ok();
}
