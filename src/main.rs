use crate::{
    configuration::Configuration, configuration_handler::ConfigurationHandler, http::create_app,
    json_file_store::JsonFileStore, local_bookings::LocalBookings,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod backend;
mod booking_manager;
mod configuration;
mod configuration_handler;
mod errors;
mod http;
mod json_file_store;
mod local_bookings;
#[cfg(test)]
mod testutils;
mod types;
mod validation;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("################");
    println!("# Slot Booking #");
    println!("################");

    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("{}:{}", configuration.host(), configuration.port());
    println!("Accessable at:\n{}", address.clone());
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    let app = if configuration.ephemeral() {
        warn!("Bookings are kept in memory only and are lost on restart");
        create_app(LocalBookings::default(), configuration)
    } else {
        let bookings_file = configuration.bookings_file();
        match JsonFileStore::new(&bookings_file) {
            Ok(store) => {
                info!(path = %store.path().display(), "Using bookings file");
                create_app(store, configuration)
            }
            Err(err) => {
                error!(?err, "Failed to prepare bookings file: {}", bookings_file.display());
                std::process::exit(1);
            }
        }
    };

    axum::serve(listener, app).await.unwrap();
}
