use std::path::PathBuf;

use airfield_extract::{extract_file, Settings};
use clap::{Arg, ArgAction, Command};
use log::LevelFilter;

fn main() {
    let matches = Command::new("Airfield Extract")
        .version("1.0")
        .author("Jesper Fjellin")
        .about("Exports features from a GeoJSON file within a rough radius around a point of interest")
        .arg(
            Arg::new("geojson_file")
                .value_name("GEOJSON_FILE")
                .required(true)
                .help("The GeoJSON file containing all of the shapes to consider"),
        )
        .arg(
            Arg::new("output_path")
                .long("output-path")
                .visible_alias("outputPath")
                .num_args(1)
                .help("Write output to this directory instead of the configured outputPath"),
        )
        .arg(
            Arg::new("settings")
                .short('s')
                .long("settings")
                .num_args(1)
                .help("Settings file (defaults to settings.json in the working directory)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log every dropped feature"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Only log warnings and errors"),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else if matches.get_flag("quiet") {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let input: PathBuf = matches
        .get_one::<String>("geojson_file")
        .map(PathBuf::from)
        .unwrap_or_default();
    let output_path = matches.get_one::<String>("output_path").map(PathBuf::from);
    let settings_path = matches.get_one::<String>("settings").map(PathBuf::from);

    let settings = match Settings::load(settings_path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match extract_file(&input, output_path.as_deref(), &settings) {
        Ok(summary) => println!(
            "Kept {} of {} {} features in {} file(s)",
            summary.kept_features(),
            summary.input_features,
            summary.category,
            summary.groups.len()
        ),
        Err(e) => {
            eprintln!("Error processing file: {}", e);
            std::process::exit(1);
        }
    }
}
