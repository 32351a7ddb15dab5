use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{CommandFactory, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use reposcope_core::humanize::{human_count, human_size};
use reposcope_core::{OutputFormat, RepoLocator, ScopeConfig};
use reposcope_github::manifests::fetch_dependency_reports;
use reposcope_github::{
    analyze, Analysis, AnalysisCache, AnalyzeOptions, FileStore, GitHubClient, KeyValueStore,
    RecentRepos,
};
use reposcope_tree::{
    count_matches, estimate_loc, filter_tree, serialize_tree, top_largest_files, TreeFormat,
};

#[derive(Parser)]
#[command(
    name = "reposcope",
    version,
    about = "GitHub repository explorer for the terminal",
    long_about = "Reposcope fetches a repository's file tree straight from the GitHub API —\n\
                   no clone needed — and turns it into browsable trees, statistics, and\n\
                   dependency summaries.\n\n\
                   Examples:\n  \
                     reposcope tree rust-lang/cargo            Print the file tree\n  \
                     reposcope tree owner/repo --find index    Only files matching a query\n  \
                     reposcope stats owner/repo --ref v1.0     Sizes, types, LOC estimate\n  \
                     reposcope deps owner/repo                 Dependency manifests\n  \
                     reposcope refs owner/repo                 Branches and tags\n  \
                     reposcope export owner/repo -o out.json   Full analysis as JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .reposcope.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for command results.\n\n\
                       Formats:\n  \
                         text      Human-readable output (default)\n  \
                         json      Machine-readable JSON with camelCase keys\n  \
                         markdown  GitHub-flavored Markdown"
    )]
    format: OutputFormat,

    /// GitHub token (default: GITHUB_TOKEN / GH_TOKEN env, then config)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Disable the local analysis cache for this invocation
    #[arg(long, global = true)]
    no_cache: bool,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the repository file tree
    #[command(long_about = "Print the repository file tree.\n\n\
        Fetches the recursive git tree at the requested ref (default branch when\n\
        omitted), reconstructs the directory hierarchy, and renders it.\n\n\
        Examples:\n  reposcope tree rust-lang/cargo\n  \
        reposcope tree owner/repo --ref v2.1 --path src\n  \
        reposcope tree owner/repo --find test --style paths")]
    Tree {
        /// Repository (owner/repo or a github.com URL)
        repo: RepoLocator,

        /// Branch, tag, or commit SHA (default: the default branch)
        #[arg(long = "ref")]
        ref_name: Option<String>,

        /// Analyze only this subdirectory
        #[arg(long)]
        path: Option<String>,

        /// Keep only files whose name contains this text (case-insensitive)
        #[arg(long)]
        find: Option<String>,

        /// Tree style for text output: ascii, markdown, or paths
        #[arg(long, default_value = "ascii")]
        style: TreeFormat,

        /// Skip the cache and fetch fresh data
        #[arg(long)]
        refresh: bool,
    },
    /// Show file statistics, sizes, and a lines-of-code estimate
    #[command(long_about = "Show file statistics, sizes, and a lines-of-code estimate.\n\n\
        Totals, per-extension breakdowns, the largest files, and an approximate\n\
        line count derived from file sizes (no blob contents are read).\n\n\
        Examples:\n  reposcope stats rust-lang/cargo\n  reposcope stats owner/repo --format json")]
    Stats {
        /// Repository (owner/repo or a github.com URL)
        repo: RepoLocator,

        /// Branch, tag, or commit SHA (default: the default branch)
        #[arg(long = "ref")]
        ref_name: Option<String>,

        /// Analyze only this subdirectory
        #[arg(long)]
        path: Option<String>,

        /// How many entries to show in top lists (default: 10)
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Skip the cache and fetch fresh data
        #[arg(long)]
        refresh: bool,
    },
    /// List declared dependencies across package ecosystems
    #[command(long_about = "List declared dependencies across package ecosystems.\n\n\
        Probes the repository root for known manifest files (package.json,\n\
        requirements.txt, Cargo.toml, go.mod, Gemfile, pom.xml, build.gradle,\n\
        pubspec.yaml) and parses the ones that exist.\n\n\
        Examples:\n  reposcope deps tokio-rs/tokio\n  reposcope deps owner/repo --ref dev")]
    Deps {
        /// Repository (owner/repo or a github.com URL)
        repo: RepoLocator,

        /// Branch, tag, or commit SHA (default: the default branch)
        #[arg(long = "ref")]
        ref_name: Option<String>,
    },
    /// List branches and tags
    Refs {
        /// Repository (owner/repo or a github.com URL)
        repo: RepoLocator,
    },
    /// Export the full analysis as JSON
    #[command(long_about = "Export the full analysis as JSON.\n\n\
        Writes the complete record — tree, statistics, ref, truncation flag,\n\
        export timestamp — to a file or stdout.\n\n\
        Examples:\n  reposcope export owner/repo -o analysis.json\n  \
        reposcope export owner/repo --ref v1.0")]
    Export {
        /// Repository (owner/repo or a github.com URL)
        repo: RepoLocator,

        /// Branch, tag, or commit SHA (default: the default branch)
        #[arg(long = "ref")]
        ref_name: Option<String>,

        /// Analyze only this subdirectory
        #[arg(long)]
        path: Option<String>,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Skip the cache and fetch fresh data
        #[arg(long)]
        refresh: bool,
    },
    /// Show recently analyzed repositories
    Recent {
        /// Forget all remembered repositories
        #[arg(long)]
        clear: bool,
    },
    /// Show the GitHub API rate limit status
    Limits,
    /// Create a default .reposcope.toml configuration file
    #[command(long_about = "Create a default .reposcope.toml configuration file.\n\n\
        Generates a commented template with all available options.\n\
        Fails if .reposcope.toml already exists.")]
    Init,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

const DEFAULT_CONFIG: &str = r#"# reposcope configuration

[github]
# Personal access token; GITHUB_TOKEN / GH_TOKEN env vars also work.
# token = "ghp_..."
# API base URL, for GitHub Enterprise.
# api_base = "https://api.github.com"

[cache]
# enabled = true
# ttl_secs = 3600
# dir = "/path/to/cache"
# max_recent = 10

[tree]
# Directory names to ignore on top of the built-in set
# (.git, node_modules, .next, dist, build, .cache, __pycache__, .venv, venv).
# extra_ignored_dirs = ["target", "coverage"]
"#;

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!("reposcope v{version} — explore GitHub repositories from the terminal\n");

    println!("Quick start:");
    println!("  reposcope tree rust-lang/cargo     Print a repository's file tree");
    println!("  reposcope stats rust-lang/cargo    File statistics and LOC estimate");
    println!("  reposcope init                     Create a .reposcope.toml config file\n");

    println!("All commands:");
    println!("  tree      File tree (ascii, markdown, or flat paths)");
    println!("  stats     Totals, per-type breakdowns, largest files, LOC estimate");
    println!("  deps      Dependency manifests across ecosystems");
    println!("  refs      Branches and tags");
    println!("  export    Full analysis as JSON");
    println!("  recent    Recently analyzed repositories");
    println!("  limits    GitHub API rate limit status");
    println!("  init      Create default configuration\n");

    println!("Run 'reposcope <command> --help' for details.");
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,reposcope=debug,reposcope_tree=debug,reposcope_github=debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<ScopeConfig> {
    match &cli.config {
        Some(path) => ScopeConfig::from_file(path).into_diagnostic(),
        None => {
            let default_path = std::path::Path::new(".reposcope.toml");
            if default_path.exists() {
                ScopeConfig::from_file(default_path).into_diagnostic()
            } else {
                Ok(ScopeConfig::default())
            }
        }
    }
}

struct Context {
    client: GitHubClient,
    cache: Option<AnalysisCache>,
    recent: Option<RecentRepos>,
    extra_ignored: Vec<String>,
}

fn build_context(cli: &Cli, config: &ScopeConfig) -> Context {
    let token = cli.token.as_deref().or(config.github.token.as_deref());
    let client = GitHubClient::new(token).with_api_base(&config.github.api_base);

    let store: Option<Arc<dyn KeyValueStore>> = if config.cache.enabled {
        let result = match &config.cache.dir {
            Some(dir) => Ok(FileStore::new(dir.clone())),
            None => FileStore::default_location(),
        };
        match result {
            Ok(store) => {
                let store: Arc<dyn KeyValueStore> = Arc::new(store);
                Some(store)
            }
            Err(err) => {
                tracing::warn!(%err, "local cache unavailable");
                None
            }
        }
    } else {
        None
    };

    let cache = store
        .clone()
        .filter(|_| !cli.no_cache)
        .map(|store| AnalysisCache::new(store, config.cache.ttl_secs));
    let recent = store.map(|store| RecentRepos::new(store, config.cache.max_recent));

    Context {
        client,
        cache,
        recent,
        extra_ignored: config.tree.extra_ignored_dirs.clone(),
    }
}

fn spinner(message: String) -> Option<indicatif::ProgressBar> {
    if !std::io::stderr().is_terminal() {
        return None;
    }
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(
        indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})").unwrap(),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(120));
    Some(pb)
}

async fn run_analysis(
    ctx: &Context,
    repo: &RepoLocator,
    ref_name: Option<&str>,
    path: Option<&str>,
    refresh: bool,
) -> Result<Analysis> {
    let options = AnalyzeOptions {
        ref_name: ref_name.map(str::to_string),
        path: path.map(str::to_string),
        force_refresh: refresh,
        extra_ignored: ctx.extra_ignored.clone(),
    };

    let pb = spinner(format!("Analyzing {repo}..."));
    let analysis = analyze(&ctx.client, ctx.cache.as_ref(), repo, &options).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let analysis = analysis.into_diagnostic()?;

    if analysis.result.truncated {
        eprintln!(
            "warning: the tree listing was truncated by the GitHub API; \
             results cover only the returned entries"
        );
    }
    if let Some(cached_at) = analysis.cached_at {
        eprintln!(
            "(cached result from {}; use --refresh to refetch)",
            cached_at.format("%Y-%m-%d %H:%M UTC")
        );
    }
    if let Some(recent) = &ctx.recent {
        recent.record(&analysis.result.repo_name, ref_name);
    }
    Ok(analysis)
}

fn print_tree(
    analysis: &Analysis,
    format: OutputFormat,
    style: TreeFormat,
    find: Option<&str>,
) -> Result<()> {
    let mut tree = analysis.result.tree.clone();

    if let Some(query) = find.filter(|q| !q.is_empty()) {
        match filter_tree(&tree, query) {
            Some(filtered) => {
                let matches = count_matches(&tree, query);
                let total = count_matches(&tree, "");
                eprintln!("{matches} of {total} files match \"{query}\"");
                tree = filtered;
            }
            None => {
                println!("No files match \"{query}\"");
                return Ok(());
            }
        }
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tree).into_diagnostic()?);
        }
        OutputFormat::Markdown => {
            print!("{}", serialize_tree(&tree, TreeFormat::Markdown));
        }
        OutputFormat::Text => {
            print!("{}", serialize_tree(&tree, style));
        }
    }
    Ok(())
}

fn print_stats(analysis: &Analysis, format: OutputFormat, limit: usize) -> Result<()> {
    let result = &analysis.result;
    let stats = &result.stats;
    let loc = estimate_loc(&stats.extension_sizes);
    let largest = top_largest_files(&result.tree, limit);

    let mut by_size: Vec<(&String, &u64)> = stats.extension_sizes.iter().collect();
    by_size.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "repoName": result.repo_name,
                "refName": result.ref_name,
                "truncated": result.truncated,
                "stats": stats,
                "loc": loc,
                "largestFiles": largest,
            });
            println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        }
        OutputFormat::Markdown => {
            println!("# {}@{}\n", result.repo_name, result.ref_name);
            println!("- **Files:** {}", stats.total_files);
            println!("- **Directories:** {}", stats.total_directories);
            println!("- **Total size:** {}\n", human_size(stats.total_size));

            println!("## Size by type\n");
            println!("| Type | Files | Size | Share |");
            println!("|------|-------|------|-------|");
            for (ext, size) in by_size.iter().take(limit) {
                let count = stats.extension_counts.get(*ext).copied().unwrap_or(0);
                let share = percentage(**size, stats.total_size);
                println!(
                    "| `{}` | {count} | {} | {share} |",
                    label(ext),
                    human_size(**size)
                );
            }

            if !loc.by_extension.is_empty() {
                println!("\n## Lines of code (estimate)\n");
                println!(
                    "~{} total, derived from file sizes and typical bytes-per-line.\n",
                    human_count(loc.total)
                );
                println!("| Type | Lines | Share |");
                println!("|------|-------|-------|");
                for entry in loc.by_extension.iter().take(limit) {
                    println!(
                        "| `.{}` | {} | {} |",
                        entry.ext,
                        human_count(entry.loc),
                        percentage(entry.loc, loc.total)
                    );
                }
            }

            if !largest.is_empty() {
                println!("\n## Largest files\n");
                for (idx, file) in largest.iter().enumerate() {
                    println!("{}. `{}` — {}", idx + 1, file.path, human_size(file.size));
                }
            }
        }
        OutputFormat::Text => {
            println!("{}@{}", result.repo_name, result.ref_name);
            println!("{:-<60}", "");
            println!("  Files:        {}", stats.total_files);
            println!("  Directories:  {}", stats.total_directories);
            let average = if stats.total_files > 0 {
                stats.total_size / stats.total_files
            } else {
                0
            };
            println!(
                "  Total size:   {} (avg {} per file)",
                human_size(stats.total_size),
                human_size(average)
            );

            if !by_size.is_empty() {
                println!("\nSize by type (top {limit}):");
                for (ext, size) in by_size.iter().take(limit) {
                    let count = stats.extension_counts.get(*ext).copied().unwrap_or(0);
                    println!(
                        "  {:<12} {:>9}  {:>6}  {} files",
                        label(ext),
                        human_size(**size),
                        percentage(**size, stats.total_size),
                        count
                    );
                }
            }

            if !loc.by_extension.is_empty() {
                println!(
                    "\nLines of code (estimate): ~{} total",
                    human_count(loc.total)
                );
                for entry in loc.by_extension.iter().take(limit) {
                    println!(
                        "  {:<12} {:>9} lines  {:>6}",
                        format!(".{}", entry.ext),
                        human_count(entry.loc),
                        percentage(entry.loc, loc.total)
                    );
                }
                println!("  (derived from file sizes; no contents are read)");
            }

            if !largest.is_empty() {
                println!("\nLargest files (top {limit}):");
                for (idx, file) in largest.iter().enumerate() {
                    println!(
                        "  {:>2}. {:<44} {:>9}",
                        idx + 1,
                        file.path,
                        human_size(file.size)
                    );
                }
            }
        }
    }
    Ok(())
}

fn label(ext: &str) -> String {
    if ext == reposcope_tree::NO_EXT {
        "(no ext)".to_string()
    } else {
        format!(".{ext}")
    }
}

fn percentage(part: u64, whole: u64) -> String {
    if whole == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 / whole as f64 * 100.0)
}

async fn run_deps(
    ctx: &Context,
    repo: &RepoLocator,
    ref_name: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let repository = ctx.client.get_repository(repo).await.into_diagnostic()?;
    let target_ref = ref_name.unwrap_or(&repository.default_branch);

    let pb = spinner(format!("Probing manifests in {repo}..."));
    let reports = fetch_dependency_reports(&ctx.client, repo, target_ref).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let summary = reposcope_deps::summarize(&reports);

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "repoName": repo.to_string(),
                "refName": target_ref,
                "reports": reports,
                "summary": summary,
            });
            println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        }
        OutputFormat::Markdown => {
            println!("# Dependencies of {repo}@{target_ref}\n");
            if reports.is_empty() {
                println!("No dependency manifests found.");
                return Ok(());
            }
            for report in &reports {
                println!("## {} (`{}`)\n", report.ecosystem, report.file);
                for dep in &report.dependencies {
                    match &dep.version {
                        Some(version) => println!("- `{}` {version}", dep.name),
                        None => println!("- `{}`", dep.name),
                    }
                }
                if !report.dev_dependencies.is_empty() {
                    println!("\n**Dev:**\n");
                    for dep in &report.dev_dependencies {
                        match &dep.version {
                            Some(version) => println!("- `{}` {version}", dep.name),
                            None => println!("- `{}`", dep.name),
                        }
                    }
                }
                println!();
            }
        }
        OutputFormat::Text => {
            if reports.is_empty() {
                println!("No dependency manifests found in {repo}@{target_ref}.");
                return Ok(());
            }
            println!(
                "{} manifests, {} dependencies ({} dev) — {}",
                summary.manifest_count,
                summary.total_dependencies,
                summary.total_dev_dependencies,
                summary.ecosystems.join(", "),
            );
            for report in &reports {
                println!(
                    "\n{} ({}): {} runtime, {} dev",
                    report.ecosystem,
                    report.file,
                    report.dependencies.len(),
                    report.dev_dependencies.len(),
                );
                for dep in &report.dependencies {
                    match &dep.version {
                        Some(version) => println!("  {} {version}", dep.name),
                        None => println!("  {}", dep.name),
                    }
                }
                for dep in &report.dev_dependencies {
                    match &dep.version {
                        Some(version) => println!("  {} {version} (dev)", dep.name),
                        None => println!("  {} (dev)", dep.name),
                    }
                }
            }
        }
    }
    Ok(())
}

async fn run_refs(ctx: &Context, repo: &RepoLocator, format: OutputFormat) -> Result<()> {
    let repository = ctx.client.get_repository(repo).await.into_diagnostic()?;
    let branches = ctx
        .client
        .list_branches(repo, &repository.default_branch)
        .await;
    let tags = ctx.client.list_tags(repo).await;

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "repoName": repo.to_string(),
                "defaultBranch": repository.default_branch,
                "branches": branches,
                "tags": tags,
            });
            println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        }
        OutputFormat::Markdown => {
            println!("# Refs of {repo}\n");
            println!("## Branches ({})\n", branches.len());
            for branch in &branches {
                let mut markers = Vec::new();
                if branch.name == repository.default_branch {
                    markers.push("default");
                }
                if branch.protected {
                    markers.push("protected");
                }
                if markers.is_empty() {
                    println!("- `{}`", branch.name);
                } else {
                    println!("- `{}` ({})", branch.name, markers.join(", "));
                }
            }
            println!("\n## Tags ({})\n", tags.len());
            for tag in &tags {
                println!("- `{}`", tag.name);
            }
        }
        OutputFormat::Text => {
            println!("Branches ({}):", branches.len());
            for branch in &branches {
                let default_marker = if branch.name == repository.default_branch {
                    " *"
                } else {
                    ""
                };
                let protected_marker = if branch.protected { " (protected)" } else { "" };
                println!("  {}{default_marker}{protected_marker}", branch.name);
            }
            println!("\nTags ({}):", tags.len());
            for tag in &tags {
                println!("  {}", tag.name);
            }
        }
    }
    Ok(())
}

fn run_export(analysis: &Analysis, path: Option<&str>, output: Option<&PathBuf>) -> Result<()> {
    let result = &analysis.result;
    let export = serde_json::json!({
        "exportedAt": Utc::now(),
        "repoName": result.repo_name,
        "ref": result.ref_name,
        "path": path.unwrap_or(""),
        "tree": result.tree,
        "stats": result.stats,
        "truncated": result.truncated,
    });
    let serialized = serde_json::to_string_pretty(&export).into_diagnostic()?;

    match output {
        Some(file) => {
            std::fs::write(file, serialized).into_diagnostic()?;
            eprintln!("Wrote analysis to {}", file.display());
        }
        None => println!("{serialized}"),
    }
    Ok(())
}

fn run_recent(ctx: &Context, clear: bool, format: OutputFormat) -> Result<()> {
    let Some(recent) = &ctx.recent else {
        println!("Recent history is unavailable (cache disabled).");
        return Ok(());
    };
    if clear {
        recent.clear();
        println!("Cleared recent repositories.");
        return Ok(());
    }

    let list = recent.list();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&list).into_diagnostic()?);
        }
        _ => {
            if list.is_empty() {
                println!("No recently analyzed repositories.");
                return Ok(());
            }
            for entry in &list {
                match &entry.ref_name {
                    Some(ref_name) => println!(
                        "  {}@{ref_name}  ({})",
                        entry.repo_name,
                        entry.analyzed_at.format("%Y-%m-%d %H:%M UTC")
                    ),
                    None => println!(
                        "  {}  ({})",
                        entry.repo_name,
                        entry.analyzed_at.format("%Y-%m-%d %H:%M UTC")
                    ),
                }
            }
        }
    }
    Ok(())
}

async fn run_limits(ctx: &Context, format: OutputFormat) -> Result<()> {
    let limit = ctx.client.rate_limit().await.into_diagnostic()?;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&limit).into_diagnostic()?);
        }
        _ => {
            println!(
                "GitHub API rate limit: {}/{} remaining, resets at {}",
                limit.remaining,
                limit.limit,
                limit.reset_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            if !ctx.client.is_authenticated() {
                println!("(unauthenticated — set GITHUB_TOKEN for a higher limit)");
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(&cli)?;
    let ctx = build_context(&cli, &config);

    match cli.command {
        None => {
            print_welcome();
        }
        Some(Command::Tree {
            ref repo,
            ref ref_name,
            ref path,
            ref find,
            style,
            refresh,
        }) => {
            let analysis =
                run_analysis(&ctx, repo, ref_name.as_deref(), path.as_deref(), refresh).await?;
            print_tree(&analysis, cli.format, style, find.as_deref())?;
        }
        Some(Command::Stats {
            ref repo,
            ref ref_name,
            ref path,
            limit,
            refresh,
        }) => {
            let analysis =
                run_analysis(&ctx, repo, ref_name.as_deref(), path.as_deref(), refresh).await?;
            print_stats(&analysis, cli.format, limit)?;
        }
        Some(Command::Deps {
            ref repo,
            ref ref_name,
        }) => {
            run_deps(&ctx, repo, ref_name.as_deref(), cli.format).await?;
        }
        Some(Command::Refs { ref repo }) => {
            run_refs(&ctx, repo, cli.format).await?;
        }
        Some(Command::Export {
            ref repo,
            ref ref_name,
            ref path,
            ref output,
            refresh,
        }) => {
            let analysis =
                run_analysis(&ctx, repo, ref_name.as_deref(), path.as_deref(), refresh).await?;
            run_export(&analysis, path.as_deref(), output.as_ref())?;
        }
        Some(Command::Recent { clear }) => {
            run_recent(&ctx, clear, cli.format)?;
        }
        Some(Command::Limits) => {
            run_limits(&ctx, cli.format).await?;
        }
        Some(Command::Init) => {
            let path = std::path::Path::new(".reposcope.toml");
            if path.exists() {
                miette::bail!(".reposcope.toml already exists");
            }
            std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
            println!("Created .reposcope.toml with default configuration");
        }
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "reposcope", &mut std::io::stdout());
        }
    }

    Ok(())
}
