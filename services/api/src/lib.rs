mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use content_signal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
