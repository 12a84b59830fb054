//! pdfsift CLI - rank PDF sections for a persona and task

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use pdfsift::render::{self, JsonFormat};
use pdfsift::{AnalysisConfig, JobDescription, ParseOptions, Pipeline};

#[derive(Parser)]
#[command(name = "pdfsift")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rank PDF sections against a persona and task", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// <PDF_DIR> <PERSONA> <TASK> <OUTPUT> or <INPUT_JSON> <OUTPUT>
    ///
    /// A first argument named `outline` or `version` is read as a
    /// subcommand; put `--` before the arguments to pass it as a path.
    #[arg(value_name = "ARGS")]
    args: Vec<String>,

    /// Directory of PDFs used with a JSON job description
    #[arg(long, env = "PDFSIFT_PDF_DIR", default_value = "pdfs")]
    pdf_dir: PathBuf,

    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
struct Settings {
    /// Output compact JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Keep going when a page cannot be read
    #[arg(long, global = true)]
    lenient: bool,

    /// Also report first-page title lines as headings
    #[arg(long, global = true)]
    keep_title_headings: bool,

    /// Minimum relevance score (exclusive) for a section
    #[arg(long, env = "PDFSIFT_RELEVANCE_THRESHOLD", default_value_t = 0.3)]
    relevance_threshold: f64,

    /// Maximum number of ranked sections
    #[arg(long, env = "PDFSIFT_MAX_SECTIONS", default_value_t = 25)]
    max_sections: usize,
}

impl Settings {
    fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::default()
            .with_relevance_threshold(self.relevance_threshold)
            .with_max_sections(self.max_sections)
            .with_exclude_title_lines(!self.keep_title_headings)
    }

    fn parse_options(&self) -> ParseOptions {
        if self.lenient {
            ParseOptions::new().lenient()
        } else {
            ParseOptions::new()
        }
    }

    fn json_format(&self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the title and heading outline of one PDF
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

/// What the positional arguments ask for.
#[derive(Debug, PartialEq)]
enum Invocation<'a> {
    Literal {
        pdf_dir: &'a str,
        persona: &'a str,
        task: &'a str,
        output: &'a str,
    },
    JsonInput {
        input: &'a str,
        output: &'a str,
    },
    Usage,
}

fn classify_args(args: &[String]) -> Invocation<'_> {
    match args {
        [pdf_dir, persona, task, output] => Invocation::Literal {
            pdf_dir,
            persona,
            task,
            output,
        },
        [input, output] => Invocation::JsonInput { input, output },
        _ => Invocation::Usage,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline { ref input, ref output }) => {
            cmd_outline(input, output.as_deref(), &cli.settings)
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_rank(&cli.args, &cli.pdf_dir, &cli.settings),
    };

    // Failures are reported, not turned into exit codes
    if let Err(e) = result {
        log::error!("{}", e);
    }
}

fn cmd_rank(
    args: &[String],
    default_pdf_dir: &Path,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let (pdf_dir, job, output) = match classify_args(args) {
        Invocation::Literal {
            pdf_dir,
            persona,
            task,
            output,
        } => (
            PathBuf::from(pdf_dir),
            JobDescription::new(persona, task),
            output,
        ),
        Invocation::JsonInput { input, output } => (
            default_pdf_dir.to_path_buf(),
            JobDescription::from_json_file(input)?,
            output,
        ),
        Invocation::Usage => {
            print_usage();
            return Ok(());
        }
    };

    log::info!("Persona: {}", job.persona);
    log::info!("Task: {}", job.task);

    let pipeline = Pipeline::new(settings.analysis_config(), settings.parse_options());
    let record = pipeline.run(&pdf_dir, &job)?;

    render::write_json(output, &record, settings.json_format())?;

    println!(
        "{} {} ({} sections, {} snippets)",
        "Saved to".green(),
        output,
        record.extracted_sections.len(),
        record.sub_section_analysis.len()
    );
    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = pdfsift::extract_outline_with_config(
        input,
        &settings.analysis_config(),
        settings.parse_options(),
    )?;

    if let Some(path) = output {
        render::write_json(path, &outline, settings.json_format())?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", render::to_json(&outline, settings.json_format())?);
    }

    Ok(())
}

fn print_usage() {
    println!(
        "{}",
        "Usage: pdfsift <PDF_DIR> <PERSONA> <TASK> <OUTPUT_JSON>".yellow()
    );
    println!("       pdfsift <INPUT_JSON> <OUTPUT_JSON>   (PDFs from --pdf-dir)");
    println!("       pdfsift outline <FILE> [-o OUTPUT]");
    println!("       pdfsift -- <ARGS>...                 (when a path is named outline or version)");
    println!("       pdfsift --help for more information");
}

fn cmd_version() {
    println!("{} {}", "pdfsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and section ranking tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_args() {
        let args = strings(&["pdfs", "Chef", "vegetarian menu", "out.json"]);
        assert_eq!(
            classify_args(&args),
            Invocation::Literal {
                pdf_dir: "pdfs",
                persona: "Chef",
                task: "vegetarian menu",
                output: "out.json",
            }
        );

        let args = strings(&["input.json", "out.json"]);
        assert_eq!(
            classify_args(&args),
            Invocation::JsonInput {
                input: "input.json",
                output: "out.json",
            }
        );

        for n in [0, 1, 3, 5] {
            let args = strings(&vec!["x"; n]);
            assert_eq!(classify_args(&args), Invocation::Usage);
        }
    }

    #[test]
    fn test_parse_positional_and_flags() {
        let cli = Cli::try_parse_from([
            "pdfsift",
            "--compact",
            "--max-sections",
            "5",
            "pdfs",
            "Chef",
            "menu",
            "out.json",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.args.len(), 4);
        assert!(cli.settings.compact);
        assert_eq!(cli.settings.max_sections, 5);
        assert_eq!(cli.settings.json_format(), JsonFormat::Compact);
        assert_eq!(cli.settings.analysis_config().max_sections, 5);
        assert!(cli.settings.analysis_config().exclude_title_lines);
    }

    #[test]
    fn test_parse_outline_subcommand() {
        let cli = Cli::try_parse_from([
            "pdfsift",
            "outline",
            "report.pdf",
            "-o",
            "outline.json",
            "--keep-title-headings",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Outline { input, output }) => {
                assert_eq!(input, PathBuf::from("report.pdf"));
                assert_eq!(output, Some(PathBuf::from("outline.json")));
            }
            _ => panic!("expected outline subcommand"),
        }
        assert!(!cli.settings.analysis_config().exclude_title_lines);
    }

    #[test]
    fn test_double_dash_keeps_subcommand_names_positional() {
        // Without `--` the name selects the subcommand, which takes one file
        assert!(Cli::try_parse_from(["pdfsift", "outline", "Chef", "menu", "out.json"]).is_err());

        let cli =
            Cli::try_parse_from(["pdfsift", "--", "outline", "Chef", "menu", "out.json"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(
            classify_args(&cli.args),
            Invocation::Literal {
                pdf_dir: "outline",
                persona: "Chef",
                task: "menu",
                output: "out.json",
            }
        );

        let cli = Cli::try_parse_from(["pdfsift", "--", "version", "out.json"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(
            classify_args(&cli.args),
            Invocation::JsonInput {
                input: "version",
                output: "out.json",
            }
        );
    }

    #[test]
    fn test_usage_does_no_work() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Cli::try_parse_from(["pdfsift"]).unwrap().settings;

        cmd_rank(&strings(&["only-one"]), dir.path(), &settings).unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_rank_empty_directory_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let pdfs = dir.path().join("pdfs");
        std::fs::create_dir(&pdfs).unwrap();
        let output = dir.path().join("out.json");
        let settings = Cli::try_parse_from(["pdfsift"]).unwrap().settings;

        let args = vec![
            pdfs.to_string_lossy().to_string(),
            "Chef".to_string(),
            "vegetarian menu".to_string(),
            output.to_string_lossy().to_string(),
        ];
        cmd_rank(&args, &pdfs, &settings).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["metadata"]["persona"], "Chef");
        assert_eq!(value["metadata"]["job_to_be_done"], "vegetarian menu");
        assert!(value["extracted_sections"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_rank_from_json_missing_keys_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.json");
        std::fs::write(&input, r#"{"persona": {"role": "Chef"}}"#).unwrap();
        let output = dir.path().join("out.json");
        let settings = Cli::try_parse_from(["pdfsift"]).unwrap().settings;

        let args = vec![
            input.to_string_lossy().to_string(),
            output.to_string_lossy().to_string(),
        ];
        assert!(cmd_rank(&args, dir.path(), &settings).is_err());
        assert!(!output.exists());
    }
}
