mod genotype;

use anyhow::Result;
use clap::Command;
use env_logger::Env;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "gtars";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Tools for validating and normalizing genotype allele calls.")
        .subcommand_required(true)
        .subcommand(genotype::cli::create_genotype_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // GENOTYPE ALLELES
        //
        Some((genotype::cli::GENOTYPE_CMD, matches)) => {
            genotype::handlers::run_genotype(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
