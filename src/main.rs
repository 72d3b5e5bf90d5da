use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{arg, crate_version, ArgMatches, Command};

use archronis::{archive, Error};

const RCH: &str = "unreachable was reached";

fn main() -> ExitCode {
    let long_help =
"Examples:
---------
Pack:    `archronis pack notes.txt diary.txt bundle.arc`
Unpack:  `archronis unpack bundle.arc`";

    let main_cmd = Command::new("archronis")
        .about("pack and unpack files into a checksummed LZW archive")
        .after_long_help(long_help)
        .version(crate_version!())
        .arg(arg!(-v --verbose "enable verbose logging").global(true))
        .subcommand(
            Command::new("pack")
                .about("compress one or more files into an archive")
                .arg(arg!(<FILES> ... "input files, followed by the archive to create")),
        )
        .subcommand(
            Command::new("unpack")
                .about("extract every file recorded in an archive")
                .arg(arg!(<ARCHIVE> "archive to extract")),
        );

    let matches = main_cmd.get_matches();

    let level = if matches.get_flag("verbose") {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new().filter_level(level).init();

    let result = match matches.subcommand() {
        Some(("pack", sub)) => run_pack(sub),
        Some(("unpack", sub)) => run_unpack(sub),
        _ => Err(Error::NoCommand),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("archronis: {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run_pack(sub: &ArgMatches) -> Result<(), Error> {
    let mut files: Vec<String> = sub
        .get_many::<String>("FILES")
        .expect(RCH)
        .cloned()
        .collect();
    if files.len() < 2 {
        log::error!("an archive name and at least one input file are required");
        return Err(Error::NoCommand);
    }
    let archive_name = files.pop().expect(RCH);
    archive::pack(&files, Path::new(&archive_name))
}

fn run_unpack(sub: &ArgMatches) -> Result<(), Error> {
    let archive_name = sub.get_one::<String>("ARCHIVE").expect(RCH);
    archive::unpack(&PathBuf::from(archive_name))
}
