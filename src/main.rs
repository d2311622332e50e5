//! Sheetcalc - build a sheet from the command line and print evaluated cells.

mod default_functions;
mod table;

use anyhow::{Context, Result, bail};
use sheetcalc_core::Document;
use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: sheetcalc [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --set <ADDR=TEXT>     Set a cell; '=' or '@' starts a formula (repeatable)");
    eprintln!("  -c, --command <FORMULA>   Evaluate a formula against the sheet (repeatable);");
    eprintln!("                            a leading '=' or '@' is stripped, so escape with '=@'");
    eprintln!("  -g, --get <ADDR>          Print a cell's displayed value (repeatable)");
    eprintln!("  -t, --table               Print the populated region as a markdown table");
    eprintln!("  -f, --functions <FILE>    Load custom Rhai functions (repeatable)");
    eprintln!("  --no-default-functions    Do not auto-load default.rhai from config dir");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Set RUST_LOG=debug to trace evaluation.");
}

#[derive(Debug, Default)]
struct Options {
    sets: Vec<(String, String)>,
    commands: Vec<String>,
    gets: Vec<String>,
    table: bool,
    functions_files: Vec<PathBuf>,
    no_default_functions: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut opts = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |what: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{} requires {}", arg, what))
        };
        match arg.as_str() {
            "-h" | "--help" => opts.help = true,
            "-s" | "--set" => {
                let pair = value("an ADDR=TEXT pair")?;
                let Some((address, text)) = pair.split_once('=') else {
                    bail!("expected ADDR=TEXT, got: {}", pair);
                };
                opts.sets.push((address.trim().to_string(), text.to_string()));
            }
            "-c" | "--command" => opts.commands.push(value("a formula")?),
            "-g" | "--get" => opts.gets.push(value("a cell address")?),
            "-t" | "--table" => opts.table = true,
            "-f" | "--functions" => opts.functions_files.push(PathBuf::from(value("a file path")?)),
            "--no-default-functions" => opts.no_default_functions = true,
            other => bail!("Unknown option: {}", other),
        }
    }

    Ok(opts)
}

fn run(mut opts: Options) -> Result<()> {
    let mut doc = Document::new();

    // Autoload default functions first, then user-specified functions.
    default_functions::prepend_default_functions_if_present(
        &mut opts.functions_files,
        opts.no_default_functions,
    );
    for path in &opts.functions_files {
        doc.load_functions(path)
            .with_context(|| format!("loading functions from {}", path.display()))?;
    }

    for (address, text) in &opts.sets {
        doc.set_cell(address, text)
            .with_context(|| format!("setting {}", address))?;
    }

    for formula in &opts.commands {
        let value = doc
            .evaluate(formula)
            .with_context(|| format!("evaluating {:?}", formula))?;
        println!("{}", value);
    }

    for address in &opts.gets {
        let value = doc
            .get_cell(address)
            .with_context(|| format!("reading {}", address))?;
        println!("{}", value);
    }

    if opts.table {
        print!("{}", table::render_markdown(&doc));
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if opts.help {
        print_usage();
        return;
    }

    if let Err(e) = run(opts) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
