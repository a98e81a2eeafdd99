use std::sync::Arc;

use estate_db::api::routes::create_router;
use estate_db::seed::load_seed_data;
use estate_db::store::MemoryStore;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    async fn head(&self, path: &str) -> reqwest::Response {
        self.client
            .head(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("HEAD request failed")
    }

    async fn post(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .expect("POST request failed")
    }

    async fn put(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .put(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .expect("PUT request failed")
    }

    async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("DELETE request failed")
    }
}

/// Serve the app over an in-memory store on an ephemeral port.
async fn spawn_server(store: Arc<MemoryStore>) -> TestClient {
    let app = create_router().with_state(store);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("no local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server failed");
    });

    TestClient::new(format!("http://{}", addr))
}

fn owner_payload(name: &str) -> Value {
    json!({
        "name": name,
        "address": "Carrera 15 #45-67, Cali",
        "photo": "https://example.com/photo.jpg",
        "birthday": "1985-03-15T00:00:00Z"
    })
}

fn property_payload(name: &str, price: i64, owner_id: i64) -> Value {
    json!({
        "name": name,
        "address": format!("{} address, Cali", name),
        "price": price,
        "codeInternal": format!("CODE-{}", price),
        "year": 2015,
        "idOwner": owner_id
    })
}

#[tokio::test]
async fn test_health_check() {
    let client = spawn_server(Arc::new(MemoryStore::new())).await;

    let response = client.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_owner_crud_lifecycle() {
    let client = spawn_server(Arc::new(MemoryStore::new())).await;

    // Create
    let response = client.post("/api/owners", owner_payload("María García")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["idOwner"], 1);
    assert_eq!(created["name"], "María García");

    // Read
    let response = client.get("/api/owners/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    // List
    let response = client.get("/api/owners").await;
    let owners: Value = response.json().await.unwrap();
    assert_eq!(owners.as_array().unwrap().len(), 1);

    // Update replaces every field; identity comes from the path
    let response = client
        .put("/api/owners/1", owner_payload("María García Rodríguez"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["idOwner"], 1);
    assert_eq!(updated["name"], "María García Rodríguez");

    // Delete, then the id is gone
    let response = client.delete("/api/owners/1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = client.get("/api/owners/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = client.delete("/api/owners/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_property_crud_and_existence_probe() {
    let client = spawn_server(Arc::new(MemoryStore::new())).await;
    client.post("/api/owners", owner_payload("Carlos Rodríguez")).await;

    // Sequential ids from an empty collection
    let response = client
        .post("/api/properties", property_payload("Casa Colonial", 450000, 1))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let first: Value = response.json().await.unwrap();
    assert_eq!(first["idProperty"], 1);
    assert_eq!(first["ownerName"], "Carlos Rodríguez");

    let response = client
        .post("/api/properties", property_payload("Apartamento", 280000, 1))
        .await;
    let second: Value = response.json().await.unwrap();
    assert_eq!(second["idProperty"], 2);

    // HEAD probe
    assert_eq!(client.head("/api/properties/1").await.status(), StatusCode::OK);
    assert_eq!(
        client.head("/api/properties/99999").await.status(),
        StatusCode::NOT_FOUND
    );

    // Full replace keeps the path identity
    let response = client
        .put("/api/properties/1", property_payload("Casa Renovada", 475000, 1))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["idProperty"], 1);
    assert_eq!(updated["name"], "Casa Renovada");

    // Delete
    let response = client.delete("/api/properties/2").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        client.get("/api/properties/2").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_negative_price_is_rejected() {
    let client = spawn_server(Arc::new(MemoryStore::new())).await;
    client.post("/api/owners", owner_payload("Ana Martínez")).await;

    let response = client
        .post("/api/properties", property_payload("Casa", -5, 1))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_listing_pagination_envelope() {
    let client = spawn_server(Arc::new(MemoryStore::new())).await;
    client.post("/api/owners", owner_payload("Sofía López")).await;
    for i in 1..=12i64 {
        client
            .post(
                "/api/properties",
                property_payload(&format!("Propiedad {}", i), 100000 + i, 1),
            )
            .await;
    }

    let response = client.get("/api/properties?page=2&pageSize=5").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page: Value = response.json().await.unwrap();

    assert_eq!(page["totalCount"], 12);
    assert_eq!(page["page"], 2);
    assert_eq!(page["pageSize"], 5);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(page["hasNextPage"], true);
    assert_eq!(page["hasPreviousPage"], true);

    // Identity-ordered window: page 2 of 5 starts at id 6
    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["idProperty"], 6);
    assert_eq!(items[4]["idProperty"], 10);

    // Same query again returns the identical page
    let repeat: Value = client
        .get("/api/properties?page=2&pageSize=5")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(page, repeat);
}

#[tokio::test]
async fn test_listing_filters() {
    let client = spawn_server(Arc::new(MemoryStore::new())).await;
    client.post("/api/owners", owner_payload("Luis Hernández")).await;
    for (name, price) in [
        ("Casa El Peñón", 120000),
        ("Casa Granada", 350000),
        ("Apartamento Normandía", 420000),
        ("Penthouse Pance", 520000),
    ] {
        client
            .post("/api/properties", property_payload(name, price, 1))
            .await;
    }

    // Price band keeps exactly the two mid-range listings
    let page: Value = client
        .get("/api/properties?minPrice=300000&maxPrice=500000")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(page["totalCount"], 2);
    let names: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Casa Granada", "Apartamento Normandía"]);

    // Case-insensitive name substring
    let page: Value = client
        .get("/api/properties?name=casa")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(page["totalCount"], 2);

    // Contradictory bounds are an empty page, not an error
    let response = client.get("/api/properties?minPrice=500000&maxPrice=100000").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page: Value = response.json().await.unwrap();
    assert_eq!(page["totalCount"], 0);
    assert_eq!(page["items"].as_array().unwrap().len(), 0);
    assert_eq!(page["totalPages"], 0);
}

#[tokio::test]
async fn test_property_detail_aggregation() {
    let store = Arc::new(MemoryStore::new());
    load_seed_data(&*store).await.unwrap();
    let client = spawn_server(store).await;

    // Property 1 has an owner, two images (one disabled), two traces
    let response = client.get("/api/properties/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail: Value = response.json().await.unwrap();

    assert_eq!(detail["idProperty"], 1);
    assert_eq!(detail["owner"]["name"], "María García Rodríguez");
    assert_eq!(detail["images"].as_array().unwrap().len(), 2);
    assert_eq!(detail["traces"].as_array().unwrap().len(), 2);

    // Property 3 has no traces: empty array, never null
    let detail: Value = client.get("/api/properties/3").await.json().await.unwrap();
    assert_eq!(detail["traces"].as_array().unwrap().len(), 0);

    // Unknown id is a 404
    let response = client.get("/api/properties/99999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detail_with_dangling_owner_returns_placeholder() {
    let store = Arc::new(MemoryStore::new());
    load_seed_data(&*store).await.unwrap();
    let client = spawn_server(store).await;

    // Remove property 1's owner out from under it
    let response = client.delete("/api/owners/1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client.get("/api/properties/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail: Value = response.json().await.unwrap();
    assert_eq!(detail["owner"]["idOwner"], 0);
    assert_eq!(detail["owner"]["name"], "");

    // The list view likewise falls back to an empty owner name
    let page: Value = client
        .get("/api/properties?name=El Peñón")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(page["items"][0]["ownerName"], "");
}

#[tokio::test]
async fn test_seeded_listing_counts() {
    let store = Arc::new(MemoryStore::new());
    load_seed_data(&*store).await.unwrap();
    let client = spawn_server(store).await;

    let page: Value = client.get("/api/properties?pageSize=20").await.json().await.unwrap();
    assert_eq!(page["totalCount"], 8);

    // First item carries the first enabled image, not the disabled one
    assert!(page["items"][0]["image"]
        .as_str()
        .unwrap()
        .contains("photo-1522708323590"));

    // Ids created after seeding continue past the seeded range
    let response = client
        .post("/api/properties", property_payload("Casa Nueva", 225000, 2))
        .await;
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["idProperty"], 9);
}
