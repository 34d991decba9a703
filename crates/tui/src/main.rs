mod app;
mod client;
mod config;
mod error;
mod ui;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let mut app = app::App::new(config::load()?)?;
    app.run().await
}
