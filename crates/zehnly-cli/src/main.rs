use anyhow::Context;
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use zehnly_client::{
    ApiGateway, CreateCouponRequest, CreatePopupRequest, GatewayConfig, LoginRequest,
    OrdersParams, RangeParams, UpdateCouponRequest, UpdatePopupRequest,
};
use zehnly_core::{AdminUser, OrderStatus, RateKind};
use zehnly_session::{default_credentials_path, FileCredentialStore, SessionStore};

#[derive(Parser)]
#[command(name = "zehnly")]
#[command(about = "Zehnly admin console")]
#[command(version)]
struct Cli {
    /// API origin
    #[arg(long, env = "ZEHNLY_BASE_URL", default_value = zehnly_client::DEFAULT_BASE_URL)]
    base_url: String,

    /// Credential file (defaults to ~/.zehnly/credentials.json)
    #[arg(long, env = "ZEHNLY_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Captcha token issued by the login page widget
        #[arg(long)]
        captcha_token: String,
    },
    /// Sign out locally and (best-effort) on the server
    Logout,
    /// Show local and server-side session state
    Status,
    /// Coupon management
    Coupons(CouponsArgs),
    /// Popup management
    Popups(PopupsArgs),
    /// Analytics views
    Analytics(AnalyticsArgs),
    /// Payment orders with filters and aggregates
    Orders {
        #[arg(long)]
        status: Option<OrderStatus>,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        end_date: Option<NaiveDate>,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long)]
        skip: Option<u64>,
    },
}

#[derive(Args)]
struct CouponsArgs {
    #[command(subcommand)]
    command: CouponsCommands,
}

#[derive(Subcommand)]
enum CouponsCommands {
    /// List all coupons
    List,
    /// Show one coupon
    Get { id: String },
    /// Create a coupon
    Create {
        #[arg(long)]
        code: String,
        #[arg(long)]
        commission_value: f64,
        /// "fixed" or "percentage"
        #[arg(long, default_value = "fixed")]
        commission_type: RateKind,
        #[arg(long)]
        discount_value: f64,
        /// "fixed" or "percentage"
        #[arg(long, default_value = "percentage")]
        discount_type: RateKind,
        /// Subscription ids the coupon applies to (repeatable)
        #[arg(long = "subscription")]
        subscriptions: Vec<String>,
        /// Expiration day (the coupon dies at midnight UTC)
        #[arg(long)]
        expires: NaiveDate,
        #[arg(long)]
        max_usage: u32,
        /// Create in disabled state
        #[arg(long, default_value = "false")]
        inactive: bool,
    },
    /// Update fields on a coupon
    Update {
        id: String,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        expires: Option<NaiveDate>,
        #[arg(long)]
        max_usage: Option<u32>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a coupon
    Delete { id: String },
}

#[derive(Args)]
struct PopupsArgs {
    #[command(subcommand)]
    command: PopupsCommands,
}

#[derive(Subcommand)]
enum PopupsCommands {
    /// List all popups
    List,
    /// Show one popup
    Get { id: String },
    /// Create a popup
    Create {
        #[arg(long)]
        title: String,
        /// Hosted image URL (see `popups upload`)
        #[arg(long)]
        image_url: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        button_text: Option<String>,
        /// Create in disabled state
        #[arg(long, default_value = "false")]
        inactive: bool,
    },
    /// Update fields on a popup
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        button_text: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a popup
    Delete { id: String },
    /// Upload an image to temp storage and print the hosted URL
    Upload { file: PathBuf },
}

#[derive(Args)]
struct AnalyticsArgs {
    #[command(subcommand)]
    command: AnalyticsCommands,
}

#[derive(Subcommand)]
enum AnalyticsCommands {
    /// Daily activity snapshot
    Overview {
        /// Defaults to today (UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// New premium subscribers per day over a range
    PremiumUsers {
        #[arg(long)]
        start_date: NaiveDate,
        #[arg(long)]
        end_date: NaiveDate,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long)]
        skip: Option<u64>,
    },
    /// New premium subscribers for one day
    PremiumUsersDay {
        #[arg(long)]
        date: NaiveDate,
    },
    /// New registrations per day over a range
    NewUsers {
        #[arg(long)]
        start_date: NaiveDate,
        #[arg(long)]
        end_date: NaiveDate,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long)]
        skip: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let credentials_path = cli
        .credentials
        .clone()
        .unwrap_or_else(default_credentials_path);
    let credentials = Arc::new(
        FileCredentialStore::open(credentials_path)
            .await
            .context("failed to open credential store")?,
    );
    let session = Arc::new(SessionStore::load(credentials).await);
    let gateway = ApiGateway::new(GatewayConfig::new(cli.base_url.clone()), session.clone())
        .context("failed to build API gateway")?;

    match cli.command {
        Commands::Login {
            email,
            password,
            captcha_token,
        } => {
            let request = LoginRequest {
                email: email.clone(),
                password,
                captcha_token,
            };
            match gateway.auth().login(&request).await {
                Ok(response) => {
                    // The server session lives in HTTP-only cookies; record
                    // the operator locally the way the console did.
                    session.login(AdminUser::new(1, email, "admin")).await?;
                    println!("{} {}", "✓".green(), response.message);
                }
                Err(e) => {
                    if let Some(hint) = e.code().and_then(login_hint) {
                        anyhow::bail!("{hint}");
                    }
                    return Err(e.into());
                }
            }
        }
        Commands::Logout => {
            gateway.auth().logout().await;
            println!("{} signed out", "✓".green());
        }
        Commands::Status => {
            let current = session.current();
            match &current.user {
                Some(user) if current.is_authenticated => {
                    println!(
                        "{} signed in as {} ({})",
                        "●".green(),
                        user.email.bold(),
                        user.role
                    );
                }
                _ => println!("{} signed out", "○".yellow()),
            }
            let live = gateway.auth().check_auth().await;
            let label = if live {
                "valid".green()
            } else {
                "invalid".red()
            };
            println!("server session: {label}");
        }
        Commands::Coupons(args) => run_coupons(&gateway, args.command).await?,
        Commands::Popups(args) => run_popups(&gateway, args.command).await?,
        Commands::Analytics(args) => run_analytics(&gateway, args.command).await?,
        Commands::Orders {
            status,
            start_date,
            end_date,
            limit,
            skip,
        } => {
            let params = OrdersParams {
                status,
                start_date,
                end_date,
                limit,
                skip,
            };
            let report = gateway.analytics().orders(&params).await?;
            println!(
                "{} orders, revenue {}",
                report.total.to_string().bold(),
                format!("{:.0}", report.summary.total_revenue).bold()
            );
            print_json(&report.orders)?;
        }
    }

    Ok(())
}

async fn run_coupons(gateway: &ApiGateway, command: CouponsCommands) -> anyhow::Result<()> {
    match command {
        CouponsCommands::List => print_json(&gateway.coupons().list().await?),
        CouponsCommands::Get { id } => print_json(&gateway.coupons().get(&id).await?),
        CouponsCommands::Create {
            code,
            commission_value,
            commission_type,
            discount_value,
            discount_type,
            subscriptions,
            expires,
            max_usage,
            inactive,
        } => {
            let request = CreateCouponRequest {
                code,
                user_commission_value: commission_value,
                user_commission_type: commission_type,
                user_discount_value: discount_value,
                user_discount_type: discount_type,
                applicable_subscriptions: if subscriptions.is_empty() {
                    None
                } else {
                    Some(subscriptions)
                },
                expiration_date: expires.and_time(NaiveTime::MIN).and_utc(),
                is_active: !inactive,
                max_usage,
            };
            let coupon = gateway.coupons().create(&request).await?;
            println!("{} created {}", "✓".green(), coupon.code.bold());
            print_json(&coupon)
        }
        CouponsCommands::Update {
            id,
            code,
            expires,
            max_usage,
            active,
        } => {
            let request = UpdateCouponRequest {
                code,
                expiration_date: expires.map(|d| d.and_time(NaiveTime::MIN).and_utc()),
                max_usage,
                is_active: active,
                ..Default::default()
            };
            print_json(&gateway.coupons().update(&id, &request).await?)
        }
        CouponsCommands::Delete { id } => {
            let coupon = gateway.coupons().delete(&id).await?;
            println!("{} deleted {}", "✓".green(), coupon.code.bold());
            Ok(())
        }
    }
}

async fn run_popups(gateway: &ApiGateway, command: PopupsCommands) -> anyhow::Result<()> {
    match command {
        PopupsCommands::List => print_json(&gateway.popups().list().await?),
        PopupsCommands::Get { id } => print_json(&gateway.popups().get(&id).await?),
        PopupsCommands::Create {
            title,
            image_url,
            url,
            description,
            button_text,
            inactive,
        } => {
            let request = CreatePopupRequest {
                title,
                image_url,
                url,
                description,
                button_text,
                is_active: Some(!inactive),
            };
            let popup = gateway.popups().create(&request).await?;
            println!("{} created {}", "✓".green(), popup.title.bold());
            print_json(&popup)
        }
        PopupsCommands::Update {
            id,
            title,
            image_url,
            url,
            description,
            button_text,
            active,
        } => {
            let request = UpdatePopupRequest {
                title,
                image_url,
                url,
                description,
                button_text,
                is_active: active,
            };
            print_json(&gateway.popups().update(&id, &request).await?)
        }
        PopupsCommands::Delete { id } => {
            gateway.popups().delete(&id).await?;
            println!("{} deleted", "✓".green());
            Ok(())
        }
        PopupsCommands::Upload { file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            let url = gateway.popups().upload_image(&file_name, bytes).await?;
            println!("{url}");
            Ok(())
        }
    }
}

async fn run_analytics(gateway: &ApiGateway, command: AnalyticsCommands) -> anyhow::Result<()> {
    match command {
        AnalyticsCommands::Overview { date } => {
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            print_json(&gateway.analytics().overview(date).await?)
        }
        AnalyticsCommands::PremiumUsers {
            start_date,
            end_date,
            limit,
            skip,
        } => {
            let params = RangeParams {
                start_date,
                end_date,
                limit,
                skip,
            };
            let range = gateway.analytics().new_premium_users_range(&params).await?;
            print_json(&range.results)
        }
        AnalyticsCommands::PremiumUsersDay { date } => {
            print_json(&gateway.analytics().new_premium_users_by_date(date).await?)
        }
        AnalyticsCommands::NewUsers {
            start_date,
            end_date,
            limit,
            skip,
        } => {
            let params = RangeParams {
                start_date,
                end_date,
                limit,
                skip,
            };
            let range = gateway.analytics().new_users_range(&params).await?;
            print_json(&range.results)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Operator-facing messages for the known login failure codes
fn login_hint(code: &str) -> Option<&'static str> {
    match code {
        "INCORRECT_PASSWORD" => Some("Incorrect password. Please try again."),
        "USER_NOT_FOUND" => Some("User not found. Please check your email address."),
        "CAPTCHA_TOKEN_NOT_EXIST" => Some("Captcha token is missing. Please refresh and try again."),
        "INVALID_EMAIL" => Some("Please enter a valid email address."),
        "USER_BLOCKED" => Some("Your account has been blocked. Please contact support."),
        _ => None,
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}
