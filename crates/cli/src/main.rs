//! delivery-note - generate PDF delivery notes for digital products
//!
//! With no arguments at all the binary runs a demonstration on fixed
//! sample data. Otherwise `--title` and `--link` are required, unless
//! `--config` points at a JSON file, which overrides all other flags.

use clap::Parser;
use delivery_note::{DeliveryRequest, PageFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "delivery-note",
    version,
    about = "Generate professional PDF delivery notes for digital products"
)]
struct Args {
    /// Product title (Arabic/English)
    #[arg(long)]
    title: Option<String>,

    /// Product subtitle
    #[arg(long)]
    subtitle: Option<String>,

    /// Download link URL
    #[arg(long)]
    link: Option<String>,

    /// Path to logo file (PNG/JPEG)
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Output PDF path
    #[arg(long, default_value = "delivery_note.pdf")]
    output: PathBuf,

    /// Vendor support email
    #[arg(long, default_value = "leve1up999q@gmail.com")]
    email: String,

    /// Buyer name
    #[arg(long)]
    buyer: Option<String>,

    /// Link expiry in days (0 = no expiry)
    #[arg(long, default_value_t = 0)]
    expiry: u32,

    /// Use link shortener (stub)
    #[arg(long)]
    shorten: bool,

    /// Language locale (ar or en)
    #[arg(long, default_value = "ar")]
    locale: String,

    /// Page format (A4 or EBOOK)
    #[arg(long, default_value = "A4")]
    format: String,

    /// Load configuration from JSON file (overrides all other flags)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    match run(args) {
        Ok(path) => println!("Success! PDF generated: {}", path.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> anyhow::Result<PathBuf> {
    let request = build_request(args)?;

    println!("Generating PDF delivery note...");
    let path = delivery_note::generate(&request)?;

    Ok(path)
}

fn build_request(args: Args) -> anyhow::Result<DeliveryRequest> {
    if let Some(config) = &args.config {
        let request = DeliveryRequest::from_config_file(config)?;
        println!("Loaded configuration from: {}", config.display());
        return Ok(request);
    }

    if let (Some(title), Some(link)) = (&args.title, &args.link) {
        return Ok(DeliveryRequest {
            product_title: title.clone(),
            product_subtitle: args.subtitle,
            download_link: link.clone(),
            logo_path: args.logo,
            output_path: args.output,
            vendor_email: args.email,
            buyer_name: args.buyer,
            expiry_days: args.expiry,
            use_shortener: args.shorten,
            locale: args.locale,
            format: PageFormat::parse_lossy(&args.format),
        });
    }

    println!("No arguments provided. Running demonstration with sample data...");
    let sample = DeliveryRequest::sample();
    println!("{}", serde_json::to_string_pretty(&sample)?);
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_builds_sample() {
        let args = Args::parse_from(["delivery-note"]);
        let request = build_request(args).unwrap();
        assert_eq!(request.product_title, DeliveryRequest::sample().product_title);
    }

    #[test]
    fn test_flags_build_request() {
        let args = Args::parse_from([
            "delivery-note",
            "--title",
            "Pro Pack",
            "--link",
            "https://example.com/file",
            "--locale",
            "en",
            "--expiry",
            "7",
            "--format",
            "ebook",
        ]);

        let request = build_request(args).unwrap();
        assert_eq!(request.product_title, "Pro Pack");
        assert_eq!(request.download_link, "https://example.com/file");
        assert_eq!(request.locale, "en");
        assert_eq!(request.expiry_days, 7);
        assert_eq!(request.format, PageFormat::Ebook);
    }

    #[test]
    fn test_title_without_link_falls_back_to_demo() {
        let args = Args::parse_from(["delivery-note", "--title", "Pro Pack"]);
        let request = build_request(args).unwrap();
        assert_eq!(request.product_title, DeliveryRequest::sample().product_title);
    }

    #[test]
    fn test_missing_config_file_errors() {
        let args = Args::parse_from(["delivery-note", "--config", "/no/such.json"]);
        assert!(build_request(args).is_err());
    }
}
