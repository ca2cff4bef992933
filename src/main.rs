//! # sayings-dataset
//!
//! ```sh
//! sayings-dataset 0.1.0
//! Luxembourgish sayings dataset generation tool.
//!
//! USAGE:
//!     sayings-dataset <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     generate    Translate and split pending sayings
//!     help        Prints this message or the help of the given subcommand(s)
//!     schema      Print the JSON schema expected from backends
//!     stats       List generated records matching score filters
//! ```
//!
//! Backends are configured through `MISTRAL_API_KEY` and/or `GOOGLE_GENERATIVE_AI_API_KEY`.
use structopt::StructOpt;

use sayings_dataset::error::Error;
use sayings_dataset::gateway::{backends_from_env, Fallback};
use sayings_dataset::pipelines::{Generate, Pipeline};
use sayings_dataset::record::BatchData;
use sayings_dataset::stats::{matching_entries, ScoreFilter};
use sayings_dataset::walker::Discovery;

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = cli::SayingsDataset::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::SayingsDataset::Generate(g) => {
            let gateway = Fallback::new(backends_from_env()?)?;
            let discovery = Discovery {
                limit: g.limit,
                overwrite: g.overwrite,
                limit_per_dir: g.per_folder,
            };
            let p = Generate::new(g.datasets, discovery, gateway).with_batch_size(g.batch_size)?;
            match p.run() {
                Ok(summary) => println!("\n{}", summary),
                Err(Error::Aborted { summary, cause }) => {
                    println!("\n{}", summary);
                    return Err(*cause);
                }
                Err(e) => return Err(e),
            }
        }

        cli::SayingsDataset::Schema => {
            println!("{}", serde_json::to_string_pretty(&BatchData::schema())?);
        }

        cli::SayingsDataset::Stats(s) => {
            let filter = ScoreFilter {
                vulgarity: s.vulgarity,
                popularity: s.popularity,
                difficulty: s.difficulty,
            };
            let entries = matching_entries(&s.datasets, &filter)?;
            for (path, entry) in &entries {
                println!("{}: {}", path.display(), serde_json::to_string(entry)?);
            }
            println!("length {}", entries.len());
        }
    };
    Ok(())
}
