use clap::Parser;
use docket_ai_context::text::{DEFAULT_MAX_SIZE, DEFAULT_OVERLAP, TextSplitter};
use std::fs;
use std::io::{self, Read};

/// A CLI tool to split document text into JSON segments using docket-ai-context.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input text file. If not provided, reads from stdin.
    #[arg(short, long)]
    input: Option<String>,

    /// Maximum length for each segment, in characters.
    #[arg(short, long, default_value_t = DEFAULT_MAX_SIZE)]
    max_size: usize,

    /// Overlap in characters between fallback windows.
    #[arg(short, long, default_value_t = DEFAULT_OVERLAP)]
    overlap: usize,

    /// Comma-separated list of delimiter strings tried in priority order.
    /// Defaults to the legal-document delimiters if not provided.
    #[arg(short, long, value_delimiter = ',')]
    delimiters: Option<Vec<String>>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let text = if let Some(input_path) = args.input {
        fs::read_to_string(input_path)?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let mut splitter = TextSplitter::new(args.max_size, args.overlap);
    if let Some(delimiters) = args.delimiters {
        splitter = splitter.with_delimiters(delimiters);
    }

    let segments = splitter.split_text_indexed(&text);

    let json_output = serde_json::to_string_pretty(&segments)?;
    println!("{}", json_output);

    Ok(())
}
