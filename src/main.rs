//! Command-line front end for exact graph invariants

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use graph_invariants::{
    config::{Backend, CliOverrides, OutputFormat, Settings},
    graph::{create_example_graphs, load_graph_from_file, Graph, GraphView},
    invariants::{api::forcing_closure, Invariant, InvariantSolver, Params},
    utils::{ColorOutput, ResultFormatter},
};
use log::{info, log, Level, LevelFilter};
use std::io::Write;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = "config/default.yaml";

#[derive(Parser)]
#[command(name = "graph_invariants")]
#[command(about = "Exact graph invariants with witness sets")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute one invariant and an optimal witness
    Compute {
        /// Edge-list file
        #[arg(short, long)]
        graph: PathBuf,

        /// Invariant name, e.g. domination or zero_forcing
        #[arg(short, long)]
        invariant: String,

        /// Parameter for k-variants
        #[arg(short, long, allow_negative_numbers = true)]
        k: Option<i64>,

        /// Search backend (overrides config)
        #[arg(short, long)]
        backend: Option<Backend>,

        /// Output format (overrides config)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Search without degree-sequence bounds
        #[arg(long)]
        no_bounds: bool,

        /// Print bound, backend and search statistics
        #[arg(long)]
        stats: bool,
    },

    /// Check whether a node set is valid for an invariant
    Check {
        /// Edge-list file
        #[arg(short, long)]
        graph: PathBuf,

        /// Invariant name
        #[arg(short, long)]
        invariant: String,

        /// Comma separated node labels
        #[arg(short, long, value_delimiter = ',')]
        set: Vec<String>,

        /// Parameter for k-variants
        #[arg(short, long, allow_negative_numbers = true)]
        k: Option<i64>,
    },

    /// Run k-forcing from an initial black set
    Simulate {
        /// Edge-list file
        #[arg(short, long)]
        graph: PathBuf,

        /// Comma separated node labels
        #[arg(short, long, value_delimiter = ',')]
        initial: Vec<String>,

        /// Forcing parameter
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        k: i64,
    },

    /// Compute every registered invariant
    Report {
        /// Edge-list file
        #[arg(short, long)]
        graph: PathBuf,

        /// Parameter passed to the invariants that take one
        #[arg(short, long, allow_negative_numbers = true)]
        k: Option<i64>,
    },

    /// Create a default configuration and example graphs
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_logging(cli.verbose);

    match cli.command {
        Commands::Compute {
            graph,
            invariant,
            k,
            backend,
            format,
            no_bounds,
            stats,
        } => {
            let overrides = CliOverrides {
                backend,
                no_bounds,
                max_order: None,
                format,
                show_stats: stats,
            };
            let settings = load_settings(&cli.config, &overrides)?;
            compute_command(&settings, graph, &invariant, k)
        }
        Commands::Check {
            graph,
            invariant,
            set,
            k,
        } => {
            let settings = load_settings(&cli.config, &CliOverrides::default())?;
            check_command(&settings, graph, &invariant, &set, k)
        }
        Commands::Simulate { graph, initial, k } => simulate_command(graph, &initial, k),
        Commands::Report { graph, k } => {
            let settings = load_settings(&cli.config, &CliOverrides::default())?;
            report_command(&settings, graph, k)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            if record.level() != Level::Info {
                write!(buf, "{} ", record.level())?;
            }
            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
    info!("Logging successfully configured");
}

fn load_settings(config_path: &PathBuf, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        let level = missing_config_level(config_path);
        log!(
            level,
            "Config file {} not found, using defaults",
            config_path.display()
        );
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings
        .validate()
        .context("Configuration validation failed")?;
    Ok(settings)
}

/// Running outside a setup directory is routine; a config that was asked
/// for by name and is missing is not
fn missing_config_level(config_path: &Path) -> Level {
    if config_path == Path::new(DEFAULT_CONFIG) {
        Level::Info
    } else {
        Level::Warn
    }
}

fn load_graph(path: &PathBuf) -> Result<Graph<String>> {
    load_graph_from_file(path)
        .with_context(|| format!("Failed to load graph from {}", path.display()))
}

fn params(k: Option<i64>) -> Params {
    k.map_or_else(Params::new, Params::with_k)
}

fn compute_command(
    settings: &Settings,
    graph_path: PathBuf,
    invariant: &str,
    k: Option<i64>,
) -> Result<()> {
    let invariant: Invariant = invariant.parse()?;
    let graph = load_graph(&graph_path)?;

    let result = InvariantSolver::new(settings.search)
        .witness(&graph, invariant, params(k))
        .with_context(|| format!("Failed to compute {}", invariant))?;

    println!(
        "{}",
        ResultFormatter::render(
            &result.summary(),
            settings.output.format,
            settings.output.show_stats
        )?
    );
    Ok(())
}

fn check_command(
    settings: &Settings,
    graph_path: PathBuf,
    invariant: &str,
    set: &[String],
    k: Option<i64>,
) -> Result<()> {
    let invariant: Invariant = invariant.parse()?;
    let graph = load_graph(&graph_path)?;

    let valid = InvariantSolver::new(settings.search)
        .is_valid(&graph, invariant, set, params(k))
        .with_context(|| format!("Failed to check {}", invariant))?;

    let labels = ResultFormatter::format_set(set);
    if valid {
        println!(
            "{}",
            ColorOutput::success(&format!("{} is a valid {} set", labels, invariant))
        );
    } else {
        println!(
            "{}",
            ColorOutput::error(&format!("{} is not a valid {} set", labels, invariant))
        );
    }
    Ok(())
}

fn simulate_command(graph_path: PathBuf, initial: &[String], k: i64) -> Result<()> {
    let graph = load_graph(&graph_path)?;

    let closure = forcing_closure(&graph, initial, k).context("Forcing simulation failed")?;
    println!("{}", ResultFormatter::format_closure(&closure));
    Ok(())
}

fn report_command(settings: &Settings, graph_path: PathBuf, k: Option<i64>) -> Result<()> {
    let graph = load_graph(&graph_path)?;

    let results = InvariantSolver::new(settings.search)
        .compute_all(&graph, k)
        .context("Failed to compute report")?;
    let rows: Vec<_> = results
        .into_iter()
        .map(|(invariant, result)| {
            let row = result
                .map(|result| result.summary())
                .map_err(|error| error.to_string());
            (invariant, row)
        })
        .collect();

    match settings.output.format {
        OutputFormat::Text => {
            println!(
                "{}",
                ColorOutput::info(&format!(
                    "Graph {}: {} nodes",
                    graph_path.display(),
                    graph.order()
                ))
            );
            println!("{}", ResultFormatter::format_report(&rows));
        }
        OutputFormat::Json => println!("{}", ResultFormatter::report_json(&rows)?),
    }
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_dir = directory.join("config");
    let graph_dir = directory.join("input/graphs");

    for dir in [&config_dir, &graph_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_graphs(&graph_dir).context("Failed to create example graphs")?;
    println!("Created example graphs in: {}", graph_dir.display());

    let variants_dir = config_dir.join("examples");
    std::fs::create_dir_all(&variants_dir)?;

    let mut sat_config = Settings::default();
    sat_config.search.backend = Backend::Sat;
    sat_config.output.show_stats = true;
    sat_config.to_file(&variants_dir.join("sat.yaml"))?;

    let mut unbounded_config = Settings::default();
    unbounded_config.search.use_bounds = false;
    unbounded_config.output.format = OutputFormat::Json;
    unbounded_config.to_file(&variants_dir.join("unbounded.yaml"))?;

    println!(
        "Created example configurations in: {}",
        variants_dir.display()
    );
    println!("\n{}", ColorOutput::success("Setup complete"));
    println!(
        "Try: graph_invariants compute --graph {} --invariant domination",
        graph_dir.join("petersen.txt").display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "graph_invariants",
            "compute",
            "--graph",
            "petersen.txt",
            "--invariant",
            "zero_forcing",
            "--k",
            "2",
            "--backend",
            "sat",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Compute {
                invariant,
                k,
                backend,
                ..
            } => {
                assert_eq!(invariant, "zero_forcing");
                assert_eq!(k, Some(2));
                assert_eq!(backend, Some(Backend::Sat));
            }
            _ => panic!("expected compute"),
        }
    }

    #[test]
    fn test_set_parsing() {
        let cli = Cli::try_parse_from([
            "graph_invariants",
            "check",
            "--graph",
            "g.txt",
            "--invariant",
            "domination",
            "--set",
            "a,b,c",
        ])
        .unwrap();

        match cli.command {
            Commands::Check { set, k, .. } => {
                assert_eq!(set, vec!["a", "b", "c"]);
                assert_eq!(k, None);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_missing_default_config_is_not_a_warning() {
        assert_eq!(missing_config_level(Path::new(DEFAULT_CONFIG)), Level::Info);
        assert_eq!(
            missing_config_level(Path::new("config/examples/sat.yaml")),
            Level::Warn
        );

        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("absent.yaml");
        let settings = load_settings(&missing, &CliOverrides::default()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_report_json_with_failed_invariants() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let mut settings = Settings::default();
        settings.output.format = OutputFormat::Json;
        // independent 2-domination is undefined on C5
        report_command(&settings, temp_dir.path().join("input/graphs/cycle5.txt"), Some(2))
            .unwrap();
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let config_path = temp_dir.path().join("config/default.yaml");
        assert_eq!(Settings::from_file(&config_path).unwrap(), Settings::default());
        assert!(temp_dir.path().join("input/graphs/petersen.txt").exists());
        assert!(temp_dir.path().join("config/examples/sat.yaml").exists());
    }

    #[test]
    fn test_setup_then_compute() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let settings = Settings::default();
        let graph_path = temp_dir.path().join("input/graphs/cycle5.txt");
        compute_command(&settings, graph_path.clone(), "domination", None).unwrap();
        check_command(&settings, graph_path.clone(), "domination", &["0".to_string()], None)
            .unwrap();
        simulate_command(graph_path.clone(), &["0".to_string(), "1".to_string()], 1).unwrap();
        assert!(compute_command(&settings, graph_path, "no_such_invariant", None).is_err());
    }
}
