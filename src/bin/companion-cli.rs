use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

use travel_companion::lifecycle::startup::resolve_config;
use travel_companion::pricing::{self, DiscountType, PricingInput};
use travel_companion::routing::{
    is_followable_redirect, resolve_post_login_redirect, Role, RouteAuthorizer,
};

#[derive(Parser)]
#[command(name = "companion-cli")]
#[command(about = "Management CLI for the travel companion service", long_about = None)]
struct Cli {
    /// Config file used for local route and pricing commands.
    #[arg(short, long, env = "COMPANION_CONFIG")]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum DiscountArg {
    None,
    Percentage,
    Flat,
}

impl From<DiscountArg> for DiscountType {
    fn from(arg: DiscountArg) -> Self {
        match arg {
            DiscountArg::None => DiscountType::None,
            DiscountArg::Percentage => DiscountType::Percentage,
            DiscountArg::Flat => DiscountType::Flat,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a plan's final price
    Price {
        base_price: f64,
        #[arg(long, value_enum)]
        discount_type: Option<DiscountArg>,
        #[arg(long)]
        discount_value: Option<f64>,
    },
    /// Show which role owns a path
    Classify { path: String },
    /// Check a post-login redirect for a role
    Redirect { path: String, role: Role },
    /// Show a role's default dashboard
    Dashboard { role: String },
    /// Check service status
    Status,
    /// List subscription plans on a running service
    Plans,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Price {
            base_price,
            discount_type,
            discount_value,
        } => {
            let config = resolve_config(cli.config.as_deref())?;
            let input = PricingInput {
                base_price,
                discount_type: discount_type.map(DiscountType::from),
                discount_value,
            };
            let breakdown = pricing::breakdown(&input, &config.pricing.currency)?;
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        }
        Commands::Classify { path } => {
            let authorizer = authorizer(&cli.config)?;
            match authorizer.classify_route(&path) {
                Some(owner) => println!("{}", serde_json::to_string(&owner)?),
                None => println!("public"),
            }
        }
        Commands::Redirect { path, role } => {
            let authorizer = authorizer(&cli.config)?;
            let valid = is_followable_redirect(&authorizer, &path, role);
            let target = resolve_post_login_redirect(&authorizer, Some(&path), role);
            println!("valid:  {}", valid);
            println!("target: {}", target);
        }
        Commands::Dashboard { role } => {
            let authorizer = authorizer(&cli.config)?;
            println!("{}", authorizer.default_dashboard_for(&role));
        }
        Commands::Status => {
            let res = reqwest::Client::new()
                .get(format!("{}/health", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Plans => {
            let res = reqwest::Client::new()
                .get(format!("{}/plans", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

fn authorizer(config: &Option<PathBuf>) -> Result<RouteAuthorizer, Box<dyn std::error::Error>> {
    let config = resolve_config(config.as_deref())?;
    Ok(RouteAuthorizer::new(&config.routes, config.dashboards)?)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
