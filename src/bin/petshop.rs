//! Petshop CLI - storefront client for the Rabbit Storefront API.
//!
//! # Usage
//!
//! ```bash
//! petshop register -u tae -p secret -e tae@example.com
//! petshop login -u tae -p secret
//! petshop rabbits list
//! petshop profile set --phone 0812345678 --gender male
//! petshop profile image ./avatar.png
//! petshop logout
//! ```
//!
//! The logged-in user is kept in a JSON session file (`--session`).

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use rabbit_storefront::client::{
    change_profile_image, ApiClient, AuthSession, FileSessionStore, NavBar, ProfileForm,
    SelectedImage,
};
use rabbit_storefront::models::{RabbitInput, RegisterRequest};

#[derive(Parser)]
#[command(name = "petshop")]
#[command(author, version, about = "Rabbit Storefront client")]
struct Cli {
    /// Storefront server base URL
    #[arg(long, env = "PETSHOP_SERVER", default_value = "http://localhost:3000")]
    server: String,

    /// Session file holding the logged-in user
    #[arg(long, env = "PETSHOP_SESSION", default_value = "petshop-session.json")]
    session: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        email: String,
    },
    /// Log in and remember the user
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log in as the mock Google account
    LoginGoogle,
    /// Forget the logged-in user
    Logout,
    /// Show the navigation state for the current session
    Whoami,
    /// Browse and manage rabbit listings
    Rabbits {
        #[command(subcommand)]
        action: RabbitAction,
    },
    /// View and edit the logged-in profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum RabbitAction {
    /// List all listings
    List,
    /// Show one listing
    Show { id: i32 },
    /// Add a listing for the logged-in seller
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        price: Decimal,
        #[arg(short, long)]
        breed: Option<String>,
        #[arg(short, long)]
        age: Option<i32>,
        #[arg(long, default_value = "available")]
        status: String,
    },
    /// Delete a listing
    Delete { id: i32 },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Refetch and print the profile
    Show,
    /// Change profile fields; unspecified fields keep their values
    Set {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        gender: Option<String>,
    },
    /// Upload a new profile image
    Image { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rabbit_storefront=warn,petshop=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = ApiClient::new(cli.server);
    let store = FileSessionStore::new(cli.session);
    let mut session = AuthSession::load(&store).context("failed to read session")?;

    match cli.command {
        Commands::Register {
            username,
            password,
            email,
        } => {
            let request = RegisterRequest {
                username: Some(username),
                password: Some(password),
                email: Some(email),
            };
            let response = api.register(&request).await?;
            println!("{}", response.message);
        }
        Commands::Login { username, password } => {
            let response = api.login(&username, &password).await?;
            session.login(response.user);
            println!("{}", response.message);
        }
        Commands::LoginGoogle => {
            session.login_with_google();
            println!("Logged in as google_user");
        }
        Commands::Logout => {
            session.logout();
            println!("Logged out");
        }
        Commands::Whoami => {
            let nav = NavBar::new(&session);
            println!("{}", nav.display_name());
            for (title, route) in nav.links() {
                println!("  {:<8} {}", title, route.path());
            }
        }
        Commands::Rabbits { action } => run_rabbits(&api, &session, action).await?,
        Commands::Profile { action } => run_profile(&api, &mut session, action).await?,
    }

    if session.is_dirty() {
        session.save(&store).context("failed to write session")?;
    }

    Ok(())
}

async fn run_rabbits(
    api: &ApiClient,
    session: &AuthSession,
    action: RabbitAction,
) -> anyhow::Result<()> {
    match action {
        RabbitAction::List => {
            for rabbit in api.list_rabbits().await? {
                println!(
                    "#{:<4} {:<20} {:>10} {}",
                    rabbit.rabbit_id, rabbit.name, rabbit.price, rabbit.status
                );
            }
        }
        RabbitAction::Show { id } => {
            let rabbit = api.get_rabbit(id).await?;
            println!("{}", serde_json::to_string_pretty(&rabbit)?);
        }
        RabbitAction::Add {
            name,
            price,
            breed,
            age,
            status,
        } => {
            let input = RabbitInput {
                seller_id: session.user().map(|u| u.user_id),
                name,
                breed,
                age,
                gender: None,
                price,
                description: None,
                image_url: None,
                status,
            };
            let response = api.create_rabbit(&input).await?;
            println!("{} (#{})", response.message, response.rabbit.rabbit_id);
        }
        RabbitAction::Delete { id } => {
            println!("{}", api.delete_rabbit(id).await?.message);
        }
    }
    Ok(())
}

async fn run_profile(
    api: &ApiClient,
    session: &mut AuthSession,
    action: ProfileAction,
) -> anyhow::Result<()> {
    match action {
        ProfileAction::Show => {
            ProfileForm::load(api, session).await?;
            if let Some(user) = session.user() {
                println!("{}", serde_json::to_string_pretty(user)?);
            }
        }
        ProfileAction::Set {
            email,
            phone,
            address,
            gender,
        } => {
            let mut form = ProfileForm::load(api, session).await?;
            if let Some(email) = email {
                form.email = email;
            }
            if let Some(phone) = phone {
                form.phone = phone;
            }
            if let Some(address) = address {
                form.address = address;
            }
            if let Some(gender) = gender {
                form.gender = gender;
            }
            let user = form.save(api, session, None).await?;
            println!("Saved profile for {}", user.username);
        }
        ProfileAction::Image { path } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let user = change_profile_image(api, session, SelectedImage { file_name, bytes }).await?;
            println!("{}", user.profile_image);
        }
    }
    Ok(())
}
