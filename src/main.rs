use anyhow::{bail, Context, Result};
use exonmap::fetch::{CachedFetcher, FileCache, HttpFetcher, DEFAULT_CACHE_DIR, DEFAULT_CACHE_TTL};
use exonmap::layout::{layout_tracks, LayoutSettings};
use exonmap::lookup::transcript_tracks;
use exonmap::render_svg::svg_string;
use exonmap::report::{json_report, text_report};
use std::{env, fs};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
    Svg,
}

struct Args {
    transcript_id: String,
    format: Format,
    out: Option<String>,
    cache_dir: String,
    no_cache: bool,
    verbose: bool,
}

fn usage() {
    eprintln!(
        "Usage:\n  \
  exonmap [--format text|json|svg] [--out PATH] [--cache-dir PATH] [--no-cache] [--verbose] TRANSCRIPT_ID\n\n  \
  TRANSCRIPT_ID is an unversioned Ensembl accession, e.g. ENST00000357033"
    );
}

fn parse_args() -> Result<Args> {
    let argv: Vec<String> = env::args().skip(1).collect();
    let mut format = Format::Text;
    let mut out = None;
    let mut cache_dir = DEFAULT_CACHE_DIR.to_string();
    let mut no_cache = false;
    let mut verbose = false;
    let mut transcript_id = None;

    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "--format" | "-f" => {
                i += 1;
                let value = argv.get(i).context("--format needs a value")?;
                format = match value.as_str() {
                    "text" => Format::Text,
                    "json" => Format::Json,
                    "svg" => Format::Svg,
                    other => bail!("Unknown format '{other}', expected text|json|svg"),
                };
            }
            "--out" | "-o" => {
                i += 1;
                out = Some(argv.get(i).context("--out needs a path")?.clone());
            }
            "--cache-dir" => {
                i += 1;
                cache_dir = argv.get(i).context("--cache-dir needs a path")?.clone();
            }
            "--no-cache" => no_cache = true,
            "--verbose" | "-v" => verbose = true,
            flag if flag.starts_with('-') => {
                usage();
                bail!("Unknown flag '{flag}'");
            }
            id => {
                if transcript_id.replace(id.to_string()).is_some() {
                    usage();
                    bail!("Only one transcript id may be given");
                }
            }
        }
        i += 1;
    }

    let Some(transcript_id) = transcript_id else {
        usage();
        bail!("Missing transcript id");
    };
    Ok(Args {
        transcript_id,
        format,
        out,
        cache_dir,
        no_cache,
        verbose,
    })
}

fn emit(content: &str, out: Option<&str>) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Could not write '{path}'"))?;
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn run() -> Result<()> {
    let args = parse_args()?;
    let level = if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(level).context("Could not initialize logging")?;

    let result = if args.no_cache {
        transcript_tracks(&HttpFetcher::new(), &args.transcript_id)?
    } else {
        let cache = FileCache::new(&args.cache_dir, DEFAULT_CACHE_TTL);
        let fetcher = CachedFetcher::new(HttpFetcher::new(), cache);
        transcript_tracks(&fetcher, &args.transcript_id)?
    };

    let content = match args.format {
        Format::Text => text_report(&result),
        Format::Json => json_report(&result)?,
        Format::Svg => {
            let drawing = layout_tracks(&result.tracks, result.offset, &LayoutSettings::default());
            svg_string(&drawing)
        }
    };
    emit(&content, args.out.as_deref())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
