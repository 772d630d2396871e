mod config;
mod error;
mod loader;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use quiz_core::Category;
use server::LightboxQuizServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting lightbox-quiz MCP server");

    let config = Config::from_env()?;
    info!(
        catalog_path = config.catalog_path.as_deref().unwrap_or("<builtin>"),
        tcp = config.listen_addr.is_some(),
        "configuration loaded"
    );

    let catalog = Arc::new(loader::load_catalog(&config)?);
    info!(
        questions = catalog.questions().len(),
        archetypes = catalog.archetypes().len(),
        default = %catalog.default_archetype().slug,
        "catalog ready"
    );
    for category in Category::ALL {
        if let Some(primary) = catalog.primary(category) {
            info!(category = %category, slug = %primary.slug, "primary archetype");
        }
    }

    let server = LightboxQuizServer::new(catalog);

    if let Some(addr) = config.listen_addr.as_deref() {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
