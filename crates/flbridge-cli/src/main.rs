use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use crossbeam_channel::Receiver;
use tracing_subscriber::EnvFilter;

use flbridge_core::{
    BridgeConfig, BridgeError, ChannelTransport, Delivery, FixedDiscovery, StudioBridge, WindowRef,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Probe(args) => probe(args),
        Commands::Send(args) => send(args),
        Commands::Exercise(args) => exercise(args),
    }
}

#[derive(Parser)]
#[command(author, version, about = "Diagnostics for the FL Studio window-message bridge")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look for the external window and report whether it was found.
    Probe(TargetArgs),
    /// Connect and forward a raw payload to the external window.
    Send(SendArgs),
    /// Connect and run the placeholder operations, reporting each result.
    Exercise(TargetArgs),
}

#[derive(Args)]
struct TargetArgs {
    /// Window class to discover instead of the default.
    #[arg(long)]
    window_class: Option<String>,
    /// Use an in-process loopback target instead of a real external window.
    #[arg(long)]
    offline: bool,
}

#[derive(Args)]
struct SendArgs {
    #[command(flatten)]
    target: TargetArgs,
    /// Message tag. Defaults to the configured tag.
    #[arg(long)]
    tag: Option<u32>,
    /// Read the payload bytes from a file.
    #[arg(long, conflicts_with = "hex")]
    file: Option<PathBuf>,
    /// Payload as a hex string, e.g. `deadbeef`.
    #[arg(long)]
    hex: Option<String>,
}

fn build_bridge(target: &TargetArgs) -> (StudioBridge, Option<Receiver<Delivery>>) {
    let mut config = BridgeConfig::default();
    if let Some(class) = &target.window_class {
        config.window_class = class.clone();
    }
    if target.offline {
        let (transport, rx) = ChannelTransport::new();
        let discovery = FixedDiscovery(WindowRef::from_raw(1));
        let bridge =
            StudioBridge::with_backends(config, Box::new(discovery), Box::new(transport));
        (bridge, Some(rx))
    } else {
        (StudioBridge::with_config(config), None)
    }
}

fn connect_or_bail(bridge: &mut StudioBridge) -> Result<()> {
    if bridge.connect() {
        Ok(())
    } else {
        bail!(BridgeError::WindowNotFound(
            bridge.config().window_class.clone()
        ))
    }
}

fn probe(args: TargetArgs) -> Result<()> {
    let (mut bridge, _rx) = build_bridge(&args);
    connect_or_bail(&mut bridge)?;
    println!(
        "External window found for class {:?}.",
        bridge.config().window_class
    );
    Ok(())
}

fn send(args: SendArgs) -> Result<()> {
    let payload = read_payload(&args)?;
    let (mut bridge, rx) = build_bridge(&args.target);
    connect_or_bail(&mut bridge)?;

    let tag = args.tag.unwrap_or(bridge.config().default_tag);
    let delivered = bridge.send_raw(tag, &payload);
    println!(
        "Sent {} bytes with tag {tag}; delivered: {delivered}",
        payload.len()
    );

    if let Some(rx) = rx {
        for delivery in rx.try_iter() {
            println!(
                "loopback received tag {} ({} bytes) for window {:#x}",
                delivery.message.tag(),
                delivery.message.len(),
                delivery.target.raw()
            );
        }
    }
    Ok(())
}

fn exercise(args: TargetArgs) -> Result<()> {
    let (mut bridge, _rx) = build_bridge(&args);
    connect_or_bail(&mut bridge)?;

    println!("tempo: {}", bridge.tempo());
    println!("key: {}", bridge.key());
    println!("load_sample: {}", bridge.load_sample("sample.wav"));
    println!("create_channel: {}", bridge.create_channel("Sampler"));
    println!(
        "set_sample_properties: {}",
        bridge.set_sample_properties("sample.wav", 174.0, "Am")
    );
    Ok(())
}

fn read_payload(args: &SendArgs) -> Result<Vec<u8>> {
    match (&args.file, &args.hex) {
        (Some(path), None) => fs::read(path)
            .with_context(|| format!("failed to read payload file {}", path.display())),
        (None, Some(hex)) => decode_hex(hex),
        (None, None) => bail!("provide a payload via --file or --hex"),
        (Some(_), Some(_)) => unreachable!("clap enforces --file/--hex exclusivity"),
    }
}

fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.len() % 2 != 0 {
        bail!("hex payload must contain an even number of digits");
    }
    (0..cleaned.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&cleaned[i..i + 2], 16)
                .with_context(|| format!("invalid hex byte {:?}", &cleaned[i..i + 2]))
        })
        .collect()
}
