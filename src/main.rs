use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use png_text_meta::{
    cli, list_chunks, CodecOptions, KeywordPolicy, PngFile, TextEncoding, COMMON_KEYWORDS,
};

#[derive(Parser)]
#[command(name = "png-text-meta")]
#[command(about = "Read and edit tEXt metadata in PNG files")]
struct Cli {
    /// Log chunk-level detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tEXt metadata of a PNG file
    Read {
        /// Path to input PNG file
        input: PathBuf,

        /// Decode text values as Latin-1 instead of UTF-8
        #[arg(long)]
        latin1: bool,
    },

    /// Set or remove tEXt metadata and write a new PNG file
    Write {
        /// Path to input PNG file
        input: PathBuf,

        /// Path for output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Keyword to set, as KEY=VALUE (an empty value removes the keyword)
        #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = cli::parse_assignment)]
        set: Vec<(String, String)>,

        /// Keyword to remove
        #[arg(short, long, value_name = "KEY")]
        delete: Vec<String>,

        /// Encode text values as Latin-1 instead of UTF-8
        #[arg(long)]
        latin1: bool,

        /// Skip keywords that cannot be written instead of failing
        #[arg(long)]
        skip_invalid: bool,

        /// Refuse input files with bad chunk checksums
        #[arg(long)]
        verify_crc: bool,
    },

    /// List the chunks of a PNG file
    Chunks {
        /// Path to input PNG file
        input: PathBuf,
    },

    /// Print the registered PNG keywords
    Keys,
}

fn text_encoding(latin1: bool) -> TextEncoding {
    if latin1 { TextEncoding::Latin1 } else { TextEncoding::Utf8 }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Read { input, latin1 } => {
            let options = CodecOptions::new().text_encoding(text_encoding(latin1));
            let file = PngFile::from_file(&input)
                .with_context(|| format!("failed to load {}", input.display()))?
                .with_options(options);

            let metadata = file.metadata()?;
            if metadata.is_empty() {
                eprintln!("No tEXt metadata in {}", input.display());
            } else {
                print!("{}", cli::format_metadata(&metadata));
            }
        }

        Commands::Write { input, output, set, delete, latin1, skip_invalid, verify_crc } => {
            let edits = cli::build_edits(&set, &delete);
            if edits.is_empty() {
                anyhow::bail!("nothing to do: pass --set KEY=VALUE or --delete KEY");
            }

            let policy = if skip_invalid { KeywordPolicy::Skip } else { KeywordPolicy::Abort };
            let options = CodecOptions::new()
                .text_encoding(text_encoding(latin1))
                .keyword_policy(policy)
                .verify_checksums(verify_crc);

            let mut file = PngFile::from_file(&input)
                .with_context(|| format!("failed to load {}", input.display()))?
                .with_options(options);
            file.apply(&edits)
                .with_context(|| format!("failed to update metadata of {}", input.display()))?;
            file.write_to_file(&output)
                .with_context(|| format!("failed to write {}", output.display()))?;

            println!("Wrote {} ({} bytes)", output.display(), file.as_bytes().len());
        }

        Commands::Chunks { input } => {
            let data = std::fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let rows = list_chunks(&data)?;
            print!("{}", cli::format_chunk_table(&rows));
        }

        Commands::Keys => {
            for keyword in COMMON_KEYWORDS {
                println!("{keyword}");
            }
        }
    }

    Ok(())
}
