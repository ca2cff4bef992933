//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "sayings-dataset",
    about = "Luxembourgish sayings dataset generation tool."
)]
/// Holds every command that is callable by the `sayings-dataset` command.
pub enum SayingsDataset {
    #[structopt(about = "Translate and split pending sayings")]
    Generate(Generate),
    #[structopt(about = "Print the JSON schema expected from backends")]
    Schema,
    #[structopt(about = "List generated records matching score filters")]
    Stats(Stats),
}

#[derive(Debug, StructOpt)]
/// Generate command and parameters.
///
/// ```sh
/// USAGE:
///     sayings-dataset generate [FLAGS] [OPTIONS] [limit]
///
/// FLAGS:
///     -o, --overwrite    regenerate sayings that already have an output
///
/// OPTIONS:
///         --batch-size <batch-size>    number of sayings per model call [default: 10]
///         --datasets <datasets>        datasets folder [default: datasets]
///     -n, --n <per-folder>             maximum number of sayings taken from each folder
///
/// ARGS:
///     <limit>    maximum number of sayings to process
/// ```
pub struct Generate {
    #[structopt(help = "maximum number of sayings to process")]
    pub limit: Option<usize>,
    #[structopt(
        short = "o",
        long = "overwrite",
        help = "regenerate sayings that already have an output"
    )]
    pub overwrite: bool,
    #[structopt(
        short = "n",
        long = "n",
        help = "maximum number of sayings taken from each folder"
    )]
    pub per_folder: Option<usize>,
    #[structopt(
        parse(from_os_str),
        long = "datasets",
        help = "datasets folder",
        default_value = "datasets"
    )]
    pub datasets: PathBuf,
    #[structopt(
        long = "batch-size",
        help = "number of sayings per model call",
        default_value = "10"
    )]
    pub batch_size: usize,
}

#[derive(Debug, StructOpt)]
/// Stats command and parameters.
pub struct Stats {
    #[structopt(
        parse(from_os_str),
        long = "datasets",
        help = "datasets folder",
        default_value = "datasets"
    )]
    pub datasets: PathBuf,
    #[structopt(long = "vulgarity", help = "only keep records with this vulgarity")]
    pub vulgarity: Option<u8>,
    #[structopt(long = "popularity", help = "only keep records with this popularity")]
    pub popularity: Option<u8>,
    #[structopt(long = "difficulty", help = "only keep records with this difficulty")]
    pub difficulty: Option<u8>,
}
