use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foodhub::config::parse_base_url;
use foodhub::model::{DeliveryRequest, Order};
use foodhub::screens::{HomeState, LoginEvent, SignupEvent};
use foodhub::session::UserRole;
use foodhub::{AppContext, ClientConfig, ClientError, StartupError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("{0}")]
    Rejected(String),
}

#[derive(Parser, Debug)]
#[command(name = "foodhub", about = "FoodHub delivery client")]
struct Cli {
    /// API root, overrides FOODHUB_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Distribution channel id, overrides FOODHUB_APP_ID.
    #[arg(long)]
    app_id: Option<String>,

    /// Session directory, overrides FOODHUB_DATA_DIR.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Skip the artificial delay on fixture listings.
    #[arg(long)]
    no_latency: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with email and password.
    Login {
        email: String,
        #[arg(long, env = "FOODHUB_PASSWORD", hide_env_values = true)]
        password: String,
        /// Role to record when the server returns no profile.
        #[arg(long)]
        role: Option<UserRole>,
    },
    /// Create an account and log in.
    Signup {
        name: String,
        email: String,
        #[arg(long, env = "FOODHUB_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "customer")]
        role: UserRole,
    },
    /// Log in with a Google or Facebook access token.
    Oauth {
        /// `google` or `facebook`.
        provider: String,
        #[arg(long, env = "FOODHUB_OAUTH_TOKEN", hide_env_values = true)]
        token: String,
        #[arg(long, default_value = "customer")]
        role: UserRole,
    },
    /// Forget the stored session.
    Logout,
    /// Show the logged-in user and role.
    Whoami,
    /// List restaurants near the configured or given location.
    Restaurants {
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// List food categories.
    Categories,
    /// List orders for the current role.
    Orders,
    /// List open delivery requests.
    Deliveries,
    /// Load the home screen for the current role and print a summary.
    Home,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let ctx = AppContext::from_config(config_for(&cli)?)?;

    match cli.command {
        Command::Login { email, password, role } => run_login(&ctx, email, password, role).await,
        Command::Signup { name, email, password, role } => run_signup(&ctx, name, email, password, role).await,
        Command::Oauth { provider, token, role } => run_oauth(&ctx, &provider, &token, role).await,
        Command::Logout => {
            ctx.session.clear_session();
            println!("logged out");
            Ok(())
        }
        Command::Whoami => {
            run_whoami(&ctx);
            Ok(())
        }
        Command::Restaurants { lat, lon } => run_restaurants(&ctx, lat.zip(lon)).await,
        Command::Categories => {
            for category in ctx.data.get_food_categories().await? {
                println!("{} {:<8} {}", category.icon, category.name, category.color);
            }
            Ok(())
        }
        Command::Orders => {
            let orders = if ctx.session.user_role() == UserRole::RestaurantOwner {
                ctx.data.get_restaurant_orders().await?
            } else {
                ctx.data.get_user_orders().await?
            };
            orders.iter().for_each(print_order);
            Ok(())
        }
        Command::Deliveries => {
            ctx.data.get_delivery_requests().await?.iter().for_each(print_delivery);
            Ok(())
        }
        Command::Home => run_home(&ctx).await,
    }
}

fn config_for(cli: &Cli) -> Result<ClientConfig, StartupError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = parse_base_url(base_url)?;
    }
    if let Some(app_id) = &cli.app_id {
        config.app_id.clone_from(app_id);
    }
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir.clone_from(data_dir);
    }
    if cli.no_latency {
        config.simulated_latency = false;
    }
    Ok(config)
}

async fn run_login(ctx: &AppContext, email: String, password: String, role: Option<UserRole>) -> Result<(), CliError> {
    let screen = ctx.login_screen();
    screen.handle(LoginEvent::UsernameChanged(email)).await;
    screen.handle(LoginEvent::PasswordChanged(password)).await;
    if let Some(role) = role {
        screen.handle(LoginEvent::RoleChanged(role)).await;
    }
    screen.handle(LoginEvent::LoginClicked).await;

    let state = screen.state();
    if let Some(message) = state.error_message {
        return Err(CliError::Rejected(message));
    }
    println!("logged in as {}", ctx.session.current_role());
    Ok(())
}

async fn run_signup(
    ctx: &AppContext,
    name: String,
    email: String,
    password: String,
    role: UserRole,
) -> Result<(), CliError> {
    let screen = ctx.signup_screen();
    screen.handle(SignupEvent::NameChanged(name)).await;
    screen.handle(SignupEvent::EmailChanged(email)).await;
    screen.handle(SignupEvent::PasswordChanged(password.clone())).await;
    screen.handle(SignupEvent::ConfirmPasswordChanged(password)).await;
    screen.handle(SignupEvent::RoleChanged(role)).await;
    screen.handle(SignupEvent::SignupClicked).await;

    if let Some(message) = screen.state().error_message {
        return Err(CliError::Rejected(message));
    }
    println!("account created, logged in as {}", ctx.session.current_role());
    Ok(())
}

async fn run_oauth(ctx: &AppContext, provider: &str, token: &str, role: UserRole) -> Result<(), CliError> {
    let auth = ctx.auth.oauth_login(provider, token, role).await?;
    ctx.session.store_token(&auth.token)?;
    match &auth.user {
        Some(user) => ctx.session.store_user_data(user),
        None => ctx.session.store_user_role(role),
    }
    println!("logged in with {provider} as {}", ctx.session.current_role());
    Ok(())
}

fn run_whoami(ctx: &AppContext) {
    let session = &ctx.session;
    if !session.is_logged_in() {
        println!("not logged in ({} app)", session.default_role());
        return;
    }
    match session.user_data() {
        Some(user) => println!("{} <{}> {}", user.name, user.email, session.current_role()),
        None => println!("logged in as {}", session.current_role()),
    }
    if let Some(restaurant_id) = session.restaurant_id() {
        println!("restaurant: {restaurant_id}");
    }
    if let Some(ts) = session.login_timestamp() {
        println!("since: {ts} (unix ms)");
    }
}

async fn run_restaurants(ctx: &AppContext, location: Option<(f64, f64)>) -> Result<(), CliError> {
    let restaurants = match location {
        Some((lat, lon)) => ctx.data.get_restaurants_near(lat, lon).await?,
        None => ctx.data.get_restaurants().await?,
    };
    if restaurants.is_empty() {
        println!("no restaurants nearby");
    }
    for r in restaurants {
        println!("{:<24} {:>8}  {}  ({})", r.name, r.distance, r.description, r.id);
    }
    Ok(())
}

async fn run_home(ctx: &AppContext) -> Result<(), CliError> {
    let screen = ctx.home_screen();
    screen.load().await;
    let state = screen.state();
    if let Some(message) = state.error_message {
        return Err(CliError::Rejected(message));
    }
    print_home(ctx.session.user_role(), &state);
    Ok(())
}

fn print_home(role: UserRole, state: &HomeState) {
    println!("{role} home, {}", state.current_location);
    match role {
        UserRole::Customer => {
            println!("{} restaurants, {} categories", state.restaurants.len(), state.categories.len());
            state.recent_orders.iter().for_each(print_order);
        }
        UserRole::RestaurantOwner => {
            println!(
                "{} orders today, ${:.2} earned, {} pending",
                state.today_orders_count,
                state.today_earnings,
                state.pending_orders.len()
            );
            state.pending_orders.iter().for_each(print_order);
        }
        UserRole::Rider => {
            println!("{} deliveries today, ${:.2} earned", state.today_deliveries, state.today_earnings_rider);
            state.available_deliveries.iter().for_each(print_delivery);
        }
    }
}

fn print_order(order: &Order) {
    let items: u32 = order.items.iter().map(|i| i.quantity).sum();
    println!(
        "{:<6} {:<14} {:?}  {} items  ${:.2}  {}",
        order.id, order.restaurant_name, order.status, items, order.total_amount, order.created_at
    );
}

fn print_delivery(delivery: &DeliveryRequest) {
    println!(
        "{:<6} {} -> {}  {}  ${:.2}",
        delivery.id, delivery.pickup_address, delivery.delivery_address, delivery.distance, delivery.estimated_earnings
    );
}
