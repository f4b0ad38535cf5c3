//! CLI entry point for story_script.
//! Usage: story_script --manifest story.toml compile script.txt --out-dir build/

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use story_data::{Block, Lector, Scenario, validate_blocks};
use story_script::{
    ScenarioOptions, StoryManifest, export_scenario_json, generate_sql, parse_story, scenario_from_json, to_dsl,
    to_transcript,
};

const DEFAULT_MANIFEST: &str = "story.toml";

#[derive(Parser)]
#[command(author, version, about = "Compile Story Script timelines into DSL, scenario JSON, and SQL.")]
struct Cli {
    /// Story manifest (TOML) with story metadata and lectors.
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical DSL for a script.
    Dsl(ScriptArgs),
    /// Print the editor transcript for a script.
    Transcript(ScriptArgs),
    /// Print the scenario JSON map.
    Scenario {
        #[command(flatten)]
        script: ScriptArgs,
        /// Export static (S) lines as well as dynamic ones.
        #[arg(long)]
        include_static: bool,
    },
    /// Print the four SQL insert scripts.
    Sql(ScriptArgs),
    /// Write every artifact into a directory.
    Compile {
        #[command(flatten)]
        script: ScriptArgs,
        #[arg(long, default_value = "build")]
        out_dir: PathBuf,
    },
    /// Report structural problems in a script.
    Lint {
        #[command(flatten)]
        script: ScriptArgs,
        /// Exit with an error when any finding is reported.
        #[arg(long)]
        deny_warnings: bool,
    },
}

#[derive(Args)]
struct ScriptArgs {
    /// Script text (DSL or editor shorthand).
    script: PathBuf,
    /// Scenario JSON used to fill line text after parsing.
    #[arg(long)]
    scenario: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let manifest = load_manifest(cli.manifest.as_deref())?;
    let lectors = manifest.as_ref().map(|m| m.lectors.clone()).unwrap_or_default();

    match cli.command {
        Commands::Dsl(args) => {
            let blocks = load_blocks(&args, &lectors)?;
            print!("{}", to_dsl(&blocks));
        },
        Commands::Transcript(args) => {
            let blocks = load_blocks(&args, &lectors)?;
            println!("{}", to_transcript(&blocks, &lectors));
        },
        Commands::Scenario { script, include_static } => {
            let blocks = load_blocks(&script, &lectors)?;
            println!("{}", export_scenario_json(&blocks, &lectors, ScenarioOptions { include_static })?);
        },
        Commands::Sql(args) => {
            let manifest = require_manifest(manifest.as_ref())?;
            let blocks = load_blocks(&args, &lectors)?;
            let dsl = to_dsl(&blocks);
            let bundle = generate_sql(&manifest.story, &manifest.voice_settings, &blocks, &lectors, &dsl)?;
            for (name, script) in bundle.files() {
                println!("-- {name}\n{script}");
            }
        },
        Commands::Compile { script, out_dir } => {
            let manifest = require_manifest(manifest.as_ref())?;
            let blocks = load_blocks(&script, &lectors)?;
            compile(manifest, &blocks, &out_dir)?;
        },
        Commands::Lint { script, deny_warnings } => {
            let blocks = load_blocks(&script, &lectors)?;
            let findings = validate_blocks(&blocks, &lectors);
            for finding in &findings {
                warn!("{}: {finding}", script.script.display());
            }
            if findings.is_empty() {
                info!("lint: OK ({} blocks)", blocks.len());
            } else if deny_warnings {
                return Ok(ExitCode::FAILURE);
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn load_manifest(path: Option<&Path>) -> Result<Option<StoryManifest>> {
    let path = match path {
        Some(p) => p,
        None if Path::new(DEFAULT_MANIFEST).exists() => Path::new(DEFAULT_MANIFEST),
        None => return Ok(None),
    };
    let manifest = StoryManifest::load(path).with_context(|| format!("while loading manifest '{}'", path.display()))?;
    info!(
        "manifest '{}': story '{}', {} lectors",
        path.display(),
        manifest.story.title,
        manifest.lectors.len()
    );
    Ok(Some(manifest))
}

fn require_manifest(manifest: Option<&StoryManifest>) -> Result<&StoryManifest> {
    match manifest {
        Some(m) => Ok(m),
        None => bail!("this command needs story metadata; pass --manifest <{DEFAULT_MANIFEST}>"),
    }
}

fn load_blocks(args: &ScriptArgs, lectors: &[Lector]) -> Result<Vec<Block>> {
    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("unable to read script '{}'", args.script.display()))?;
    let scenario = args.scenario.as_deref().map(load_scenario).transpose()?;
    Ok(parse_story(&text, lectors, scenario.as_ref()))
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let text = fs::read_to_string(path).with_context(|| format!("unable to read scenario '{}'", path.display()))?;
    scenario_from_json(&text).with_context(|| format!("while decoding scenario '{}'", path.display()))
}

fn compile(manifest: &StoryManifest, blocks: &[Block], out_dir: &Path) -> Result<()> {
    let lectors = &manifest.lectors;
    let dsl = to_dsl(blocks);
    let scenario = export_scenario_json(blocks, lectors, ScenarioOptions::default())?;
    let sql = generate_sql(&manifest.story, &manifest.voice_settings, blocks, lectors, &dsl)?;

    fs::create_dir_all(out_dir).with_context(|| format!("creating '{}'", out_dir.display()))?;
    let mut files = vec![("schema.dsl", dsl.as_str()), ("scenario.json", scenario.as_str())];
    files.extend(sql.files());
    for (name, contents) in &files {
        let path = out_dir.join(name);
        fs::write(&path, contents).with_context(|| format!("writing '{}'", path.display()))?;
    }
    info!("compiled {} blocks into {} files under '{}'", blocks.len(), files.len(), out_dir.display());
    Ok(())
}
