//! Serve command - serves a built bundle locally

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use tokio::net::TcpListener;

use crate::server::{ServerState, create_router};

/// Run the serve command.
///
/// Serves `dir`, or the configured output directory, on localhost. The bundle
/// must already be built.
pub async fn run(config_path: &Path, port: u16, dir: Option<&Path>) -> Result<()> {
    let output_dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => {
            let config =
                Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
            let root = config_path.parent().unwrap_or(Path::new("."));
            root.join(&config.build.output_dir)
        }
    };
    tracing::info!(?output_dir, port, "Starting server");

    let state = ServerState::from_bundle(&output_dir).wrap_err_with(|| {
        format!(
            "No site bundle in {}, run `folio build` first",
            output_dir.display()
        )
    })?;
    let posts = state.post_count();
    let app = create_router(Arc::new(state));

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Serving {posts} posts at http://{addr}");
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app).await.wrap_err("Server error")?;

    Ok(())
}
