//! linkseal CLI: create and open link envelopes from the terminal
//!
//! Usage:
//!   linkseal create [--input <file>] --record <file> [--max-views N] [--max-days N]
//!   linkseal digest <LINK>
//!   linkseal open --record <file> <LINK> [--output <file>]
//!   linkseal encode --codec <hex|base64|base64url|base58> [--input <file>]
//!   linkseal decode --codec <hex|base64|base64url|base58> <TEXT>
//!
//! Environment:
//!   LINKSEAL_ORIGIN      origin used for share links (default http://localhost:4000)
//!   LINKSEAL_LOG_FORMAT  pretty | json
//!   RUST_LOG             tracing filter (default linkseal=info)

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use linkseal::{
    Codec, Envelope, LinkPolicy, Operation, PassphraseDigest, ShareLink, StoredRecord,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(name = "linkseal", version, about = "Zero-knowledge link envelopes")]
struct Cli {
    /// Log output format
    #[arg(long, env = "LINKSEAL_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt content, write the storage record, print the share link
    Create(CreateArgs),
    /// Print the lookup digest for a share link
    Digest {
        link: String,
    },
    /// Decrypt a stored record with a share link
    Open(OpenArgs),
    /// Encode bytes as text
    Encode {
        #[arg(long)]
        codec: Codec,
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
    /// Decode text to bytes on stdout
    Decode {
        #[arg(long)]
        codec: Codec,
        text: String,
    },
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// Plaintext file (stdin when omitted)
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Where to write the JSON storage record
    #[arg(long, short)]
    record: PathBuf,

    /// Origin for the share link
    #[arg(long, env = "LINKSEAL_ORIGIN", default_value = "http://localhost:4000")]
    origin: String,

    /// View limit stored with the record
    #[arg(long)]
    max_views: Option<u32>,

    /// Expiry in days stored with the record
    #[arg(long)]
    max_days: Option<u32>,
}

#[derive(Args, Debug)]
struct OpenArgs {
    /// JSON storage record
    #[arg(long, short)]
    record: PathBuf,

    /// Share link carrying the id and passphrase
    link: String,

    /// Plaintext destination (stdout when omitted)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let result = match cli.command {
        Command::Create(args) => cmd_create(args).await,
        Command::Digest { link } => cmd_digest(&link),
        Command::Open(args) => cmd_open(args).await,
        Command::Encode { codec, input } => cmd_encode(codec, input.as_deref()),
        Command::Decode { codec, text } => cmd_decode(codec, &text),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "linkseal=info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr);
    match format {
        LogFormat::Json => builder.json().with_target(true).init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn read_input(path: Option<&Path>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

async fn cmd_create(args: CreateArgs) -> CliResult {
    let plaintext = zeroize::Zeroizing::new(read_input(args.input.as_deref())?);
    if plaintext.is_empty() {
        return Err("refusing to share empty content".into());
    }

    let envelope = Envelope::new()
        .create_async(&plaintext)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "create failed");
            e.user_message(Operation::Create)
        })?;
    let (passphrase, parts) = envelope.into_parts();

    let policy = LinkPolicy {
        max_views: args.max_views.map(Into::into),
        max_days: args.max_days.map(Into::into),
    };
    let record = StoredRecord::from_parts(&parts, policy);
    fs::write(&args.record, serde_json::to_vec_pretty(&record)?)?;

    let link = ShareLink::new(&args.origin, parts.id, passphrase);
    tracing::info!(
        record = %args.record.display(),
        ciphertext_len = parts.ciphertext.len(),
        "envelope created"
    );

    eprintln!("Record:  {}", args.record.display());
    eprintln!("Lookup:  {}", record.passphrase_digest);
    println!("{}", link.to_url());

    Ok(())
}

fn cmd_digest(link: &str) -> CliResult {
    let link = ShareLink::parse(link)?;
    println!("{}", link.lookup_digest());
    Ok(())
}

async fn cmd_open(args: OpenArgs) -> CliResult {
    let link = ShareLink::parse(&args.link)?;
    let record: StoredRecord = serde_json::from_slice(&fs::read(&args.record)?)?;

    if !record.matches_digest(&PassphraseDigest::of(link.passphrase())) {
        tracing::warn!(record = %args.record.display(), "record does not match link digest");
        return Err("unable to retrieve content".into());
    }

    let parts = record.decode()?;
    let plaintext = zeroize::Zeroizing::new(
        linkseal::open_async(link.id(), link.passphrase(), &parts.salt, &parts.iv, &parts.ciphertext)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "open failed");
                e.user_message(Operation::Open)
            })?,
    );

    match args.output {
        Some(path) => {
            fs::write(&path, plaintext.as_slice())?;
            eprintln!("Decrypted {} bytes -> {}", plaintext.len(), path.display());
        }
        None => io::stdout().write_all(&plaintext)?,
    }

    Ok(())
}

fn cmd_encode(codec: Codec, input: Option<&Path>) -> CliResult {
    let data = read_input(input)?;
    println!("{}", codec.encode(&data));
    Ok(())
}

fn cmd_decode(codec: Codec, text: &str) -> CliResult {
    let data = codec.decode(text.trim())?;
    io::stdout().write_all(&data)?;
    Ok(())
}
