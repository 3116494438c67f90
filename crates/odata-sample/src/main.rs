//! # OData Sample
//!
//! Runs the `People` service in-process and walks through the main request
//! kinds: a feed read with advertised actions, a deep insert, a bound action
//! and a failed update.

use std::sync::Arc;

use odata_recipe::config::ServiceConfig;
use odata_recipe::framework::EntitySetClient;
use odata_recipe::runtime::{setup_tracing, ServiceSystem};
use odata_sample::client::PeopleClient;
use odata_sample::model::build_model;
use odata_sample::provider::PeopleActionProvider;
use serde_json::json;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => ServiceConfig::load_from_file(path).map_err(|e| e.to_string())?,
        None => ServiceConfig::default().with_max_page_size(2),
    };
    let model = build_model().map_err(|e| e.to_string())?;
    info!(root = %config.service_root, "Starting sample service");

    let system = ServiceSystem::new(model.metadata.clone(), Arc::new(PeopleActionProvider), config);
    system
        .seed(
            "People",
            vec![
                model.person("Ada", Some(36)),
                model.important_person("Grace", "Rear Admiral"),
                model.very_important_person("Margaret", "Director", "Building 1"),
            ],
        )
        .await
        .map_err(|e| e.to_string())?;

    let people = PeopleClient::new(system.client.clone());

    let span = tracing::info_span!("feed");
    async {
        let feed = people.list().await.map_err(|e| e.to_string())?;
        info!(status = feed.status, "People feed");
        println!("{}", serde_json::to_string_pretty(&feed.json()).unwrap_or_default());
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("deep_insert");
    let created = async {
        people
            .create_person(json!({
                "Name": "Linus",
                "Age": 30,
                "Tags": ["kernel"],
                "BestFriend@odata.bind": "People(1)",
                "Friends": [{ "Name": "Junio" }],
            }))
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    info!(uri = %created, "Created with a deep insert");

    let span = tracing::info_span!("actions");
    async {
        let greeting = people.invoke(1, None, "Greet", json!({})).await;
        match greeting {
            Ok(response) => info!(body = %response.json(), "Greet"),
            Err(e) => error!(error = %e, "Greet failed"),
        }
        let promoted = people
            .invoke(2, Some("ImportantPerson"), "Promote", json!({ "Title": "Admiral" }))
            .await;
        match promoted {
            Ok(response) => info!(status = response.status, "Promote"),
            Err(e) => error!(error = %e, "Promote failed"),
        }
    }
    .instrument(span)
    .await;

    let rejected = system
        .client
        .patch("People(1)", json!({ "Friends": [{ "Name": "Nobody" }] }))
        .await
        .map_err(|e| e.to_string())?;
    info!(status = rejected.status, body = %rejected.json(), "Expanded content in an update");

    drop(people);
    system.shutdown().await?;

    info!("Sample completed successfully");
    Ok(())
}
