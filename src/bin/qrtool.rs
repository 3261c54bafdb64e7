use clap::{Parser, Subcommand};
use qr_forge::config::{module_pixels, quiet_zone};
use qr_forge::render::{render_text, save_image};
use qr_forge::tools::decode_image;
use qr_forge::{ECLevel, EncodeOptions, MaskPattern, Mode, QRCode};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR code generator and reader")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct EncodeArgs {
    /// Text to encode
    text: String,
    /// Error correction level (L, M, Q, H)
    #[arg(long)]
    level: Option<ECLevel>,
    /// Force a mask pattern (0-7) instead of the penalty search
    #[arg(long)]
    mask: Option<MaskPattern>,
    /// Encode the whole text as one byte-mode segment
    #[arg(long)]
    single_byte: bool,
    /// Smallest version to use
    #[arg(long, default_value_t = 1)]
    min_version: u8,
}

impl EncodeArgs {
    fn options(&self) -> EncodeOptions {
        let mut options = EncodeOptions::new().with_min_version(self.min_version);
        if let Some(level) = self.level {
            options = options.with_level(level);
        }
        if let Some(mask) = self.mask {
            options = options.with_mask(mask);
        }
        if self.single_byte {
            options = options.single_mode(Mode::Byte);
        }
        options
    }
}

#[derive(Subcommand)]
enum Command {
    /// Encode text and write the symbol as an image
    Generate {
        #[command(flatten)]
        encode: EncodeArgs,
        /// Output image path; the format follows the extension
        output: PathBuf,
        /// Pixels per module
        #[arg(long)]
        module_px: Option<usize>,
        /// Light margin in modules
        #[arg(long)]
        quiet_zone: Option<usize>,
    },
    /// Read a symbol back from a clean, unrotated image
    Decode { image: PathBuf },
    /// Encode text and print the symbol to the terminal
    Print {
        #[command(flatten)]
        encode: EncodeArgs,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate {
            encode,
            output,
            module_px,
            quiet_zone: margin,
        } => generate_cmd(
            &encode,
            &output,
            module_px.unwrap_or_else(module_pixels),
            margin.unwrap_or_else(quiet_zone),
        ),
        Command::Decode { image } => decode_cmd(&image),
        Command::Print { encode } => print_cmd(&encode),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn describe(qr: &QRCode) -> String {
    format!(
        "version={} ({}x{}), error_correction={}, mask={}",
        qr.version,
        qr.size(),
        qr.size(),
        qr.error_correction,
        qr.mask_pattern.bits()
    )
}

fn generate_cmd(
    args: &EncodeArgs,
    output: &Path,
    module_px: usize,
    margin: usize,
) -> qr_forge::Result<()> {
    let qr = qr_forge::encode(&args.text, &args.options())?;
    save_image(&qr.modules, output, module_px, margin)?;
    println!("Wrote {}: {}", output.display(), describe(&qr));
    Ok(())
}

fn decode_cmd(image: &Path) -> qr_forge::Result<()> {
    let qr = decode_image(image)?;
    eprintln!("{}", describe(&qr));
    println!("{}", qr.content);
    Ok(())
}

fn print_cmd(args: &EncodeArgs) -> qr_forge::Result<()> {
    let qr = qr_forge::encode(&args.text, &args.options())?;
    print!("{}", render_text(&qr.modules, quiet_zone()));
    println!("{}", describe(&qr));
    Ok(())
}
