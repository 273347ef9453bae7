//! CLI tool for the payment card form.
//!
//! # Usage
//!
//! ```bash
//! # Show a card number as the form would display it
//! card-form format 378282246310005
//!
//! # Map a cursor position into the display text
//! card-form format 930 --field expiry --cursor 1
//!
//! # Detect the card type
//! card-form detect 5555
//!
//! # Check a complete form
//! card-form check --number 4242424242424242 --expiry 09/30 --cvv 123
//!
//! # Submit for verification (needs the `http` feature)
//! card-form submit --config checkout.json --number 4242424242424242 --expiry 0930 --cvv 123
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use card_form::{detect_card_type, PaymentCardForm};

#[derive(Parser)]
#[command(name = "card-form")]
#[command(author, version, about = "Payment card entry: format, validate and submit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a field value as it would be displayed
    Format {
        /// Raw input as typed
        value: String,

        /// Which field the input belongs to
        #[arg(short, long, default_value = "number")]
        field: FieldArg,

        /// Raw cursor offset to map into the display text
        #[arg(short, long)]
        cursor: Option<usize>,
    },

    /// Detect the card type from a (partial) number
    Detect {
        /// Card number digits
        card_number: String,
    },

    /// Check whether a filled-in form is valid
    Check {
        #[command(flatten)]
        card: CardArgs,
    },

    /// Submit a filled-in form for verification (needs the `http` feature)
    Submit {
        #[command(flatten)]
        card: CardArgs,

        #[command(flatten)]
        endpoint: EndpointArgs,
    },
}

#[derive(clap::Args)]
struct CardArgs {
    /// Card number
    #[arg(short, long, default_value = "")]
    number: String,

    /// Expiry date (MMYY, MM/YY or MYY)
    #[arg(short, long, default_value = "")]
    expiry: String,

    /// Security code
    #[arg(short, long, default_value = "")]
    cvv: String,
}

#[derive(clap::Args)]
struct EndpointArgs {
    /// JSON config file with base_url, success_url, failure_url, timeout_secs
    #[arg(long, conflicts_with_all = ["base_url", "success_url", "failure_url", "timeout"])]
    config: Option<std::path::PathBuf>,

    /// Checkout service root URL
    #[arg(long)]
    base_url: Option<String>,

    /// Redirect target after successful verification
    #[arg(long, default_value = "")]
    success_url: String,

    /// Redirect target after failed verification
    #[arg(long, default_value = "")]
    failure_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = card_form::config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldArg {
    Number,
    Expiry,
    Cvv,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Format {
            value,
            field,
            cursor,
        } => {
            cmd_format(&value, field, cursor);
        }
        Commands::Detect { card_number } => {
            cmd_detect(&card_number);
        }
        Commands::Check { card } => {
            cmd_check(&card);
        }
        Commands::Submit { card, endpoint } => {
            cmd_submit(&card, &endpoint);
        }
    }
}

fn fill_form(card: &CardArgs) -> PaymentCardForm {
    let mut form = PaymentCardForm::new();
    form.set_number(&card.number);
    form.set_expiry(&card.expiry);
    form.set_cvv(&card.cvv);
    form
}

fn cmd_format(value: &str, field: FieldArg, cursor: Option<usize>) {
    let mut form = PaymentCardForm::new();
    let shown = match field {
        FieldArg::Number => {
            form.set_number(value);
            form.number_display()
        }
        FieldArg::Expiry => {
            form.set_expiry(value);
            form.expiry_display()
        }
        FieldArg::Cvv => {
            form.set_cvv(value);
            form.cvv_display()
        }
    };

    println!("{}", shown.text());
    if let Some(cursor) = cursor {
        let display = shown.raw_to_display(cursor);
        println!("Cursor: {} -> {}", cursor, display);
    }
}

fn cmd_detect(card_number: &str) {
    let digits: String = card_number.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        eprintln!("Error: No digits provided");
        std::process::exit(1);
    }

    match detect_card_type(&digits) {
        Some(card_type) => {
            println!("Detected Type: {}", card_type.name());
            println!("Blocks: {:?}", card_type.number_blocks());
            println!("CVV Length: {}", card_type.cvv_length());
        }
        None => {
            println!("Detected Type: Unknown");
        }
    }
}

fn cmd_check(card: &CardArgs) {
    let form = fill_form(card);

    println!(
        "Type: {}",
        form.card_type().map_or("Unknown", |t| t.name())
    );
    for (name, field) in [
        ("Number", form.number()),
        ("Expiry", form.expiry()),
        ("CVV", form.cvv()),
    ] {
        println!(
            "{}: complete={} valid={}",
            name,
            field.is_complete(),
            field.is_input_valid()
        );
    }

    if form.is_valid() {
        println!("Valid: yes");
        std::process::exit(0);
    } else {
        println!("Valid: no");
        std::process::exit(1);
    }
}

#[cfg(feature = "http")]
fn cmd_submit(card: &CardArgs, endpoint: &EndpointArgs) {
    use card_form::{CheckoutConfig, CheckoutEvent, CheckoutFeature, HttpCheckoutService};

    let config = match &endpoint.config {
        Some(path) => CheckoutConfig::from_file(path),
        None => {
            let config = CheckoutConfig {
                base_url: endpoint.base_url.clone().unwrap_or_default(),
                success_url: endpoint.success_url.clone(),
                failure_url: endpoint.failure_url.clone(),
                timeout_secs: endpoint.timeout,
            };
            config.validate().map(|_| config)
        }
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let service = match HttpCheckoutService::new(&config) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let form = fill_form(card);
    if !form.is_valid() {
        println!("Valid: no");
        std::process::exit(1);
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let feature = CheckoutFeature::with_form(service, form);
    let event = runtime.block_on(async {
        feature
            .request_verification(&config.success_url, &config.failure_url)
            .await;
        feature.try_next_event()
    });

    match event {
        Some(CheckoutEvent::VerificationReady { url }) => {
            println!("Verification URL: {}", url);
            std::process::exit(0);
        }
        _ => {
            println!("Verification failed");
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "http"))]
fn cmd_submit(_card: &CardArgs, _endpoint: &EndpointArgs) {
    eprintln!("Error: built without the `http` feature");
    std::process::exit(2);
}
