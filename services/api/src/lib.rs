mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use pip_choice::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
