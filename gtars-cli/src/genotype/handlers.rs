use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use flate2::read::MultiGzDecoder;
use log::{info, warn};

use gtars_genotype::{AlleleToken, ParseOptions};

fn get_dynamic_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("Can't open {}", path.display()))?;
    let is_gzipped = path.extension().is_some_and(|ext| ext == "gz");
    if is_gzipped {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

fn read_alleles(matches: &ArgMatches) -> Result<Vec<String>> {
    let mut alleles: Vec<String> = matches
        .get_many::<String>("alleles")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();

    if let Some(input) = matches.get_one::<String>("input") {
        let reader = get_dynamic_reader(Path::new(input))?;
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if !line.is_empty() {
                alleles.push(line.to_string());
            }
        }
    }

    Ok(alleles)
}

///
/// Parse every raw allele. Strict mode stops at the first bad allele,
/// lenient mode logs and drops it.
///
pub fn parse_tokens(
    raw_alleles: &[String],
    options: ParseOptions,
    lenient: bool,
) -> Result<Vec<(String, AlleleToken)>> {
    let mut tokens = Vec::with_capacity(raw_alleles.len());
    for raw in raw_alleles {
        match AlleleToken::parse(raw, options) {
            Ok(token) => tokens.push((raw.clone(), token)),
            Err(e) if lenient => warn!("Skipping allele: {}", e),
            Err(e) => return Err(e).with_context(|| format!("Failed to parse allele `{}`", raw)),
        }
    }
    Ok(tokens)
}

/// One TSV line: raw, canonical, kind, length.
pub fn format_row(raw: &str, token: &AlleleToken) -> String {
    format!("{}\t{}\t{}\t{}", raw, token, token.kind(), token.length())
}

pub fn run_genotype(matches: &ArgMatches) -> Result<()> {
    let options = ParseOptions {
        allow_multi_base_reference: matches.get_flag("allow-multi-base-reference"),
    };
    let lenient = matches.get_flag("lenient");

    let raw_alleles = read_alleles(matches)?;
    if raw_alleles.is_empty() {
        anyhow::bail!("No alleles supplied. Pass them as arguments or with --input.");
    }

    let tokens = parse_tokens(&raw_alleles, options, lenient)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    for (raw, token) in &tokens {
        writeln!(writer, "{}", format_row(raw, token))?;
    }
    writer.flush()?;

    info!(
        "Parsed {} of {} alleles",
        tokens.len(),
        raw_alleles.len()
    );

    Ok(())
}
