use std::io;

use anyhow::Result;
use clap::Parser;
use jtoh::Selector;

#[derive(Parser)]
#[command(author, version, about = "Transforms streams of JSON documents into delimited text lines", long_about = None)]
#[command(after_help = "EXAMPLES:
    kubectl logs mypod | jtoh :timestamp:message
    cat events.json | jtoh \":level:caller.file\"

The first character of the selector is the separator; the rest are field
paths split on it. Nested fields use '.', so ':' can select :a.b.c.
Non-JSON input is echoed verbatim, one line per unparsed span.")]
struct Args {
    /// Field selector, e.g. ":field1:nested.field2"
    selector: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let selector = Selector::parse(&args.selector)?;
    jtoh::project(&selector, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
