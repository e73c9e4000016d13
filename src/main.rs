//! course-extract CLI: turns a folder of course materials into
//! text artifacts ready to hand to an LLM.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use course_extract_lib::config::default_output_dir;
use course_extract_lib::Config;

#[derive(Debug, Parser)]
#[command(name = "course-extract", version, about)]
struct Cli {
    /// Course folder to scan recursively
    #[arg(env = "COURSE_ROOT")]
    root: PathBuf,

    /// Where the artifacts are written (defaults to the executable's folder)
    #[arg(short, long, env = "COURSE_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Course name used in the report titles
    #[arg(short, long, default_value = course_extract_lib::config::DEFAULT_TITLE)]
    title: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let output_dir = match cli.output_dir {
        Some(dir) => dir,
        None => match default_output_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error: cannot locate the executable's folder: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let config = Config::new(cli.root, &output_dir).with_title(cli.title);

    println!("Procesando curso de {}...", config.title);

    let report = match course_extract_lib::run(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("\nProcesamiento completado:");
    println!("- Archivos totales encontrados: {}", report.stats.total_files);
    println!("- Archivos procesados exitosamente: {}", report.stats.processed_files);

    println!("\nArchivos generados en: {}", output_dir.display());
    for artifact in &report.artifacts {
        if let Some(name) = artifact.file_name() {
            println!("- {}", name.to_string_lossy());
        }
    }

    ExitCode::SUCCESS
}
