//! Scripture Citation Cross-Reference Pipeline
//!
//! Scans a directory of HTML articles for scripture citations and joins them
//! against a table of biblical figures.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use env_logger::Builder;
use log::{info, LevelFilter};
use std::io::Write;
use std::path::PathBuf;

use verse_xref::analyze::analyze_corpus;
use verse_xref::books::BookCode;
use verse_xref::count::{calculate_count_stats, count_citations};
use verse_xref::extract::CitationExtractor;
use verse_xref::index::{load_person_index, reference_key};
use verse_xref::models::{AnalysisParams, Citation, Language};
use verse_xref::output::{print_rows, print_summary, write_outputs};

#[derive(Parser)]
#[command(name = "verse-xref")]
#[command(about = "Scripture citation extraction and cross-referencing for article corpora")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors and hide progress bars
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Citation script (CLI version, mirrors models::Language)
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliLanguage {
    /// Traditional Chinese book names and numerals
    Zh,
    /// English book names and abbreviations
    En,
}

impl From<CliLanguage> for Language {
    fn from(language: CliLanguage) -> Self {
        match language {
            CliLanguage::Zh => Language::Zh,
            CliLanguage::En => Language::En,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an article directory and write the cross-reference report
    ///
    /// Unset options fall back to the --config file, then to AnalysisParams::default().
    Analyze {
        /// Directory of articles, scanned recursively [default: articles]
        #[arg(long)]
        articles: Option<PathBuf>,

        /// Reference table, CSV or XLSX [default: tPerson.csv]
        #[arg(long)]
        reference: Option<PathBuf>,

        /// Report CSV path; the summary goes next to it as <stem>_summary.csv
        /// [default: verse_analysis_results.csv]
        #[arg(long)]
        output: Option<PathBuf>,

        /// Citation language [default: zh]
        #[arg(long, value_enum)]
        language: Option<CliLanguage>,

        /// JSON file with AnalysisParams fields
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also write the full result as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Process files on one thread
        #[arg(long)]
        sequential: bool,

        /// Skip the per-person summary file
        #[arg(long)]
        no_summary: bool,

        /// Print first N report rows to console
        #[arg(long)]
        show_rows: Option<usize>,
    },

    /// Print the citations found in one article or text snippet
    Extract {
        /// Article path (.htm/.html are reduced to text); reads stdin when omitted
        file: Option<PathBuf>,

        /// Text to scan instead of a file
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Citation language
        #[arg(long, value_enum, default_value = "zh")]
        language: CliLanguage,
    },

    /// Show the persons linked to a citation
    Lookup {
        /// Reference table, CSV or XLSX
        #[arg(long, default_value = "tPerson.csv")]
        reference: PathBuf,

        /// Citation in canonical form, e.g. "John 3:16"
        citation: String,
    },

    /// Show reference table statistics
    Stats {
        /// Reference table, CSV or XLSX
        #[arg(long, default_value = "tPerson.csv")]
        reference: PathBuf,
    },

    /// List canonical book codes with their English and Chinese names
    Books,

    /// Benchmark extraction throughput
    Benchmark {
        /// Number of extraction iterations
        #[arg(long, default_value = "1000")]
        iterations: usize,

        /// Citation language
        #[arg(long, value_enum, default_value = "zh")]
        language: CliLanguage,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    match cli.command {
        Commands::Analyze {
            articles,
            reference,
            output,
            language,
            config,
            json,
            sequential,
            no_summary,
            show_rows,
        } => {
            // Defaults, then the config file, then explicit flags
            let base = match config {
                Some(path) => {
                    info!("Loading config from {}", path.display());
                    AnalysisParams::from_json_file(&path)?
                }
                None => AnalysisParams::default(),
            };

            let params = AnalysisParams {
                article_dir: articles.unwrap_or(base.article_dir),
                reference_path: reference.unwrap_or(base.reference_path),
                output_path: output.unwrap_or(base.output_path),
                language: language.map(Language::from).unwrap_or(base.language),
                extensions: base.extensions,
                parallel: base.parallel && !sequential,
                write_summary: base.write_summary && !no_summary,
            };

            let result = analyze_corpus(&params, !cli.quiet)?;
            let written = write_outputs(&result, &params, json.as_deref());

            if result.rows.is_empty() {
                println!("No results: no citations matched the reference table.");
            }
            if let Ok(files) = &written {
                if !cli.quiet {
                    if let Some(report) = &files.report {
                        eprintln!("Results written to {}", report.display());
                        eprintln!("Number of rows: {}", result.rows.len());
                    }
                    if let Some(summary) = &files.summary {
                        eprintln!("Summary written to {}", summary.display());
                        eprintln!("Number of summary rows: {}", result.person_summary.len());
                    }
                    if let Some(json) = &files.json {
                        eprintln!("JSON output: {}", json.display());
                    }
                }
            }

            if !cli.quiet {
                print_summary(&result);
            }

            if let Some(limit) = show_rows {
                println!("\n=== Sample Rows ===");
                print_rows(&result.rows, Some(limit));
            }

            written?;
        }

        Commands::Extract {
            file,
            text,
            language,
        } => {
            let extractor = CitationExtractor::new(language.into());
            let citations = match (file, text) {
                (_, Some(text)) => extractor.extract(&text),
                (Some(path), None) => extractor.extract_file(&path)?,
                (None, None) => extractor.extract(&std::io::read_to_string(std::io::stdin())?),
            };

            let counts = count_citations(&citations);
            let stats = calculate_count_stats(&counts);

            println!("=== Citations ===");
            for (citation, count) in &counts {
                println!("  {:<16} x{}", citation.key(), count);
            }
            println!();
            println!("Total: {}", stats.total_citations);
            println!("Unique: {}", stats.unique_citations);
            println!("Books: {}", stats.books_cited);
            if let Some((citation, count)) = stats.most_cited {
                println!("Most cited: {} ({}x)", citation, count);
            }
        }

        Commands::Lookup {
            reference,
            citation,
        } => {
            let index = load_person_index(&reference)?;
            let key = match citation.parse::<Citation>() {
                Ok(c) => c.key(),
                Err(_) => reference_key(&citation),
            };

            let persons = index.lookup_key(&key);
            println!("=== {} ===", key);
            if persons.is_empty() {
                println!("No persons linked to this citation.");
            }
            for person in persons {
                if person.localized_name.is_empty() {
                    println!("  [{}] {}", person.person_id, person.name);
                } else {
                    println!(
                        "  [{}] {} / {}",
                        person.person_id, person.name, person.localized_name
                    );
                }
            }
        }

        Commands::Stats { reference } => {
            let index = load_person_index(&reference)?;
            let stats = index.stats();

            println!("=== Reference Table Statistics ===");
            println!("Persons: {}", stats.persons);
            println!("Unique citations: {}", stats.citations);
            println!("Person-citation links: {}", stats.links);
            println!("Rows without verses: {}", stats.rows_without_verses);
            println!("Rows without PersonID: {}", stats.rows_without_id);
            println!("Non-canonical entries: {}", stats.unparsed_entries);
        }

        Commands::Books => {
            println!("=== Canonical Books ===");
            for book in BookCode::ALL {
                let testament = if book.is_new_testament() { "NT" } else { "OT" };
                println!(
                    "  {:<6} {} {:<16} {} ({})",
                    book.code(),
                    testament,
                    book.english_name(),
                    book.chinese_name(),
                    book.chinese_abbreviation()
                );
            }
        }

        Commands::Benchmark {
            iterations,
            language,
        } => {
            run_benchmark(iterations, language.into());
        }
    }

    Ok(())
}

/// Run extraction benchmark to measure throughput.
fn run_benchmark(iterations: usize, language: Language) {
    use std::time::Instant;

    println!("=== Extraction Benchmark ===");
    println!("Iterations: {}", iterations);
    println!("Language: {}", language);

    let paragraph = match language {
        Language::Zh => "經上記著說：約翰福音3:16，又參《羅馬書》八章28節與詩一一九105。",
        Language::En => "As written in John 3:16, see also Rom 8:28 and 1 Cor 13:4.",
    };
    let text = paragraph.repeat(100);

    let start = Instant::now();
    let extractor = CitationExtractor::new(language);
    println!("\nPattern build: {:.3}ms", start.elapsed().as_secs_f64() * 1000.0);

    let start = Instant::now();
    let mut found = 0;
    for _ in 0..iterations {
        found += extractor.extract(&text).len();
    }
    let elapsed = start.elapsed();
    let per_doc = elapsed.as_secs_f64() / iterations.max(1) as f64;
    let mb = (text.len() * iterations) as f64 / (1024.0 * 1024.0);

    println!("\nExtraction ({} bytes per document):", text.len());
    println!("  Total time: {:.3}s", elapsed.as_secs_f64());
    println!("  Per document: {:.3}ms", per_doc * 1000.0);
    println!("  Citations found: {}", found);
    println!("  Throughput: {:.1} MB/s", mb / elapsed.as_secs_f64().max(f64::EPSILON));
}
