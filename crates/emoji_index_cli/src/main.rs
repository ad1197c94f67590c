//! `emoji-index` command-line entry point.
//!
//! # Responsibility
//! - Map command-line options onto pipeline configuration.
//! - Acquire chart documents and write the JSON index.

mod source;

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use emoji_index_core::{
    default_log_level, init_logging, run, write_output, CorrectionFiles, Indent, KeywordMode,
    KeywordPolicy, PipelineConfig,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

const DEFAULT_CHART_SOURCE: &str = "https://www.unicode.org/emoji/charts-13.1/emoji-list.html";
const DEFAULT_MODIFIERS_SOURCE: &str =
    "https://www.unicode.org/emoji/charts-13.1/full-emoji-modifiers.html";

#[derive(Parser, Debug)]
#[command(
    name = "emoji-index",
    version,
    about = "Build an emoji keyword index from the Unicode emoji charts"
)]
struct Cli {
    #[arg(long, default_value = DEFAULT_CHART_SOURCE, help = "Emoji list chart (path or URL)")]
    chart: String,
    #[arg(
        long,
        default_value = DEFAULT_MODIFIERS_SOURCE,
        help = "Skin-tone modifier chart (path or URL)"
    )]
    modifiers: String,
    #[arg(long = "force-vs", help = "Sequences that get U+FE0F appended")]
    force_vs: Option<PathBuf>,
    #[arg(
        long = "extra-keywords",
        visible_alias = "overlay",
        help = "CSV of sequence,keyword pairs to add"
    )]
    extra_keywords: Option<PathBuf>,
    #[arg(long, help = "Sequences removed from the index")]
    exclude: Option<PathBuf>,
    #[arg(short, long, help = "Output file (stdout when omitted)")]
    output: Option<PathBuf>,
    #[arg(long, default_value_t = false, help = "Pretty-print the JSON output")]
    pretty: bool,
    #[arg(long, value_enum, default_value_t = ModeArg::Words)]
    keyword_mode: ModeArg,
    #[arg(long, default_value_t = false, help = "Keep duplicate keywords in source order")]
    keep_duplicates: bool,
    #[arg(long)]
    log_level: Option<String>,
    #[arg(long, help = "Absolute directory for rotating log files")]
    log_dir: Option<String>,
    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Words,
    Phrases,
}

impl From<ModeArg> for KeywordMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Words => KeywordMode::Words,
            ModeArg::Phrases => KeywordMode::Phrases,
        }
    }
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            keyword_policy: KeywordPolicy {
                mode: self.keyword_mode.into(),
                dedup: !self.keep_duplicates,
            },
            ..PipelineConfig::default()
        }
    }

    fn correction_files(&self) -> CorrectionFiles<'_> {
        CorrectionFiles {
            force_variation_selector: self.force_vs.as_deref(),
            extra_keywords: self.extra_keywords.as_deref(),
            exclude: self.exclude.as_deref(),
        }
    }

    fn indent(&self) -> Indent {
        if self.pretty {
            Indent::Pretty
        } else {
            Indent::Compact
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, cli.log_dir.as_deref()).map_err(|err| anyhow!(err))?;

    let corrections = cli.correction_files().load()?;
    let (chart_html, modifiers_html) =
        source::load_documents(&cli.chart, &cli.modifiers, cli.timeout_ms)?;

    let output = run(
        &chart_html,
        &modifiers_html,
        &corrections,
        &cli.pipeline_config(),
    )?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create `{}`", path.display()))?;
            write_output(&mut BufWriter::new(file), &output, cli.indent())?;
        }
        None => {
            write_output(&mut std::io::stdout().lock(), &output, cli.indent())?;
        }
    }

    log::info!(
        "event=index_written module=cli status=ok records={} destination={}",
        output.index.len(),
        cli.output
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "stdout".to_string())
    );
    Ok(())
}
