use mongodb::{
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client,
};
use std::sync::Arc;
use std::time::Duration;

pub const DB_NAME: &str = "staybook";

pub async fn create_mongo_client(uri: &str) -> Arc<Client> {
    let mut client_options = ClientOptions::parse(uri)
        .await
        .expect("MONGODB_URI may be incorrect! Failed to parse.");

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client =
        Client::with_options(client_options).expect("Failed to create MongoDB client with options");

    // The driver connects lazily; ping so a bad URI is visible at startup.
    match client
        .database(DB_NAME)
        .run_command(mongodb::bson::doc! {"ping": 1})
        .await
    {
        Ok(_) => println!("Successfully connected to MongoDB"),
        Err(e) => {
            eprintln!("WARNING: MongoDB ping failed: {}", e);
            eprintln!(
                "The API will start anyway; storage calls will fail until the database is reachable"
            );
        }
    }

    Arc::new(client)
}
