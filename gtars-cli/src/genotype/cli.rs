use clap::{Arg, ArgAction, Command, arg};

pub const GENOTYPE_CMD: &str = "genotype";

pub fn create_genotype_cli() -> Command {
    Command::new(GENOTYPE_CMD)
        .author("Databio")
        .about("Validate allele tokens from genotype fields and print their canonical form.")
        .arg(
            Arg::new("alleles")
                .num_args(0..)
                .help("Allele tokens to parse, e.g. A . D5 IACGT"),
        )
        .arg(arg!(-i --input <input> "File with one allele token per line (plain or .gz)"))
        .arg(
            arg!(--"allow-multi-base-reference")
                .help("Keep unrecognized multi-character alleles verbatim as mixed alleles")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(--lenient)
                .help("Skip malformed alleles with a warning instead of failing")
                .action(ArgAction::SetTrue),
        )
}
