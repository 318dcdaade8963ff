mod cli;
mod infra;
mod lookups;
mod query;
mod routes;
mod server;

use flatwise::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
