use std::fs::File;
use std::io::BufReader;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stitch::boundary::AnchorPattern;
use stitch::config::StitchConfig;
use stitch::pipeline::Pipeline;
use stitch::progress::ConsoleProgress;
use stitch::sink::{schema, JsonLinesSink};
use stitch::template::{AlignTemplateBuilder, ExtractOptions, TemplateSequence};

/// Initialise the tracing / logging subsystem. Logs go to stderr so the
/// record stream on stdout stays clean.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stitch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = StitchConfig::from_env();
    config.validate()?;
    info!(
        input = %config.input,
        pattern = %config.pattern_file,
        line_start = %config.line_start,
        "parsing records"
    );

    let options = ExtractOptions {
        quote_replace: (config.quote_replace != "\"").then(|| config.quote_replace.clone()),
    };
    let sequence =
        TemplateSequence::from_file(&config.pattern_file, &AlignTemplateBuilder, &options)?;
    let anchor = AnchorPattern::from_sample(&config.line_start)?;

    let columns = sequence.columns();
    info!(sql = %schema::create_table_sql(&config.table, &columns), "derived table schema");
    info!(sql = %schema::insert_sql(&config.table, &columns), "derived insert statement");

    let source = BufReader::new(File::open(&config.input)?);
    let sink = JsonLinesSink::new(std::io::stdout().lock());
    let mut pipeline = Pipeline::new(anchor, sequence, sink);
    let mut progress = ConsoleProgress::stderr();

    let stats = pipeline.run(source, &mut progress)?;
    info!(
        chunks = stats.chunks,
        records = stats.records,
        mismatched = stats.mismatched,
        "run complete"
    );
    Ok(())
}
