use std::io::BufRead;
use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use authgate::infra::{
    InfraError,
    app::create_app,
    config::AppConfig,
    password::hash_password,
    setup::{init_app_state, init_tracing},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // `authgate hash-password` reads one line from stdin and prints its hash,
    // for seeding the users table.
    if std::env::args().nth(1).as_deref() == Some("hash-password") {
        return print_password_hash();
    }

    init_tracing();

    let config = AppConfig::from_env()?;
    let bind_addr = config.bind_addr;

    let app_state = init_app_state(config).await?;
    let app = create_app(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(InfraError::TcpBind)?;

    info!("Backend listening at {}", &listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(InfraError::Server)?;

    Ok(())
}

fn print_password_hash() -> anyhow::Result<()> {
    let mut password = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut password)
        .context("failed to read password from stdin")?;
    let password = password.trim_end_matches(['\r', '\n']);
    anyhow::ensure!(!password.is_empty(), "password must not be empty");

    let hash = hash_password(password)?;
    println!("{hash}");
    Ok(())
}
