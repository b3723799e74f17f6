mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "one-hooks",
    about = "Ontology hooks — cycle tracking, classification, and structure validation",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: CLAUDE_PROJECT_DIR, then auto-detect from one/ or .git/)
    #[arg(long, global = true, env = "CLAUDE_PROJECT_DIR")]
    project_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inject current-cycle context (UserPromptSubmit hook)
    Context,

    /// Mark the current cycle complete and advance (Stop hook)
    Done {
        /// Lesson learned during this cycle
        #[arg(long)]
        lesson: Option<String>,
    },

    /// Show the 100-cycle plan
    Plan {
        /// Show a single cycle instead of the full plan
        #[arg(long)]
        cycle: Option<u32>,
    },

    /// Suggest placement and labels for an incoming artifact (PreToolUse hook)
    Guide,

    /// Check ontology structure and file naming (exits 1 on violations)
    Check,

    /// Run the cleanliness audit
    Audit {
        /// Exit 1 when errors push the score under the threshold
        #[arg(long)]
        gate: bool,

        /// Blocking score threshold used with --gate
        #[arg(long, default_value_t = hooks_core::audit::DEFAULT_BLOCK_THRESHOLD)]
        threshold: u32,
    },

    /// Add metadata front matter to documentation under one/
    Tag {
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Show every file, including ones already tagged
        #[arg(long)]
        verbose: bool,
    },

    /// Record a written artifact in the knowledge log (PostToolUse hook)
    Knowledge,

    /// Validate import boundaries (PostToolUse hook; exits 2 to block)
    Imports,

    /// Validate ontology types in backend code (PostToolUse hook; exits 2 to block)
    Ontology,

    /// Move stray root documents into one/events/
    Cleanup {
        /// Report what would move without touching anything
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.project_dir.as_deref());

    // Hook commands handle their own failures (they must never block the
    // assistant); standalone commands report fatal errors with exit 1.
    let code = match cli.command {
        Commands::Context => cmd::context::run(&root),
        Commands::Done { lesson } => cmd::done::run(&root, lesson.as_deref()),
        Commands::Plan { cycle } => fallible(cmd::plan::run(cycle, cli.json)),
        Commands::Guide => cmd::guide::run(),
        Commands::Check => fallible(cmd::check::run(&root, cli.json)),
        Commands::Audit { gate, threshold } => {
            fallible(cmd::audit::run(&root, gate, threshold, cli.json))
        }
        Commands::Tag { dry_run, verbose } => fallible(cmd::tag::run(&root, dry_run, verbose)),
        Commands::Knowledge => cmd::knowledge::run(&root),
        Commands::Imports => cmd::imports::run(),
        Commands::Ontology => cmd::ontology::run(),
        Commands::Cleanup { dry_run } => fallible(cmd::cleanup::run(&root, dry_run, cli.json)),
    };

    std::process::exit(code);
}

fn fallible(result: anyhow::Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            1
        }
    }
}
