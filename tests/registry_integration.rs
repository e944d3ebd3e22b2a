use ownership_registry::{MemoryStore, UrlMap};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    /// Start a server on an ephemeral port backed by a fresh in-memory store.
    async fn spawn() -> Self {
        Self::spawn_with(UrlMap::relative()).await
    }

    async fn spawn_with(urls: UrlMap) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            ownership_registry::serve(listener, MemoryStore::new(), urls)
                .await
                .unwrap();
        });

        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn post(&self, path: &str, json: Value) -> reqwest::Response {
        self.client
            .post(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
            .unwrap()
    }

    async fn put(&self, path: &str, json: Value) -> reqwest::Response {
        self.client
            .put(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
            .unwrap()
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(&format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap()
    }

    async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(&format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap()
    }

    async fn get_json(&self, path: &str) -> Value {
        let response = self.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {}", path);
        response.json().await.unwrap()
    }

    /// POST and return the Location of the created resource.
    async fn create(&self, path: &str, json: Value) -> String {
        let response = self.post(path, json).await;
        assert_eq!(response.status(), StatusCode::CREATED, "POST {}", path);
        response.headers()["location"].to_str().unwrap().to_string()
    }
}

async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_owner_create_read_scenario() {
    let client = TestClient::spawn().await;

    let response = client
        .post("/owners/", json!({"nombre": "Ana", "dni": "123"}))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()["location"], "/owners/1");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({}));

    let owner = client.get_json("/owners/1").await;
    assert_eq!(owner["id"], 1);
    assert_eq!(owner["nombres"], "Ana");
    assert_eq!(owner["dni"], 123);
    assert_eq!(owner["self_url"], "/owners/1");
    assert_eq!(owner["propietariopropiedades_url"], "/owners/1/ownerships/");

    let list = client.get_json("/owners/").await;
    assert_eq!(list, json!({"propietarios": ["/owners/1"]}));

    let summary = client.get_json("/owners/summary/").await;
    assert_eq!(summary["propietarios"][0]["nombres"], "Ana");

    let by_nid = client.get_json("/owners/by-national-id/123").await;
    assert_eq!(by_nid["id"], 1);
}

#[tokio::test]
async fn test_missing_owner_and_national_id_are_not_found() {
    let client = TestClient::spawn().await;

    assert_eq!(client.get("/owners/999").await.status(), StatusCode::NOT_FOUND);

    let response = client.get("/owners/by-national-id/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        error_message(response).await,
        "propietario with dni 42 not found"
    );

    for path in ["/owners/abc", "/owners/99999999999999999999", "/ownerships/x"] {
        let response = client.get(path).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", path);
        assert_eq!(error_message(response).await, format!("Not found: {}", path));
    }
    assert_eq!(
        client
            .put("/properties/abc", json!({"numero": 1, "particion": "A", "estado": 0}))
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        client.get("/owners/by-national-id/abc").await.status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        client.get("/owners/999/ownerships/").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_missing_required_field_is_named() {
    let client = TestClient::spawn().await;

    let response = client.post("/owners/", json!({"nombre": "Ana"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "Invalid propietario: missing dni");

    let response = client
        .post("/properties/", json!({"numero": 1, "estado": 0}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(response).await, "Invalid propiedad: missing particion");

    let response = client
        .post("/parking-spots/", json!({"numero": "x", "particion": "A", "estado": 0}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(response).await,
        "Invalid cochera: numero must be an integer"
    );

    // Nothing was written by the failed requests.
    assert_eq!(
        client.get_json("/properties/").await,
        json!({"propiedades": []})
    );
}

#[tokio::test]
async fn test_units_round_trip_with_coercion() {
    let client = TestClient::spawn().await;

    let property_url = client
        .create(
            "/properties/",
            json!({"numero": "101", "particion": "A", "estado": "2"}),
        )
        .await;
    assert_eq!(property_url, "/properties/1");

    let property = client.get_json(&property_url).await;
    assert_eq!(property["numero"], 101);
    assert_eq!(property["particion"], "A");
    assert_eq!(property["estado"], 2);

    let spot_url = client
        .create(
            "/parking-spots/",
            json!({"numero": 7, "particion": "S1", "estado": 0}),
        )
        .await;
    let spot = client.get_json(&spot_url).await;
    assert_eq!(spot["numero"], 7);
    assert_eq!(spot["self_url"], "/parking-spots/1");
}

#[tokio::test]
async fn test_replace_updates_in_place() {
    let client = TestClient::spawn().await;
    let owner_url = client
        .create("/owners/", json!({"nombre": "Ana", "dni": 123}))
        .await;

    let response = client
        .put(&owner_url, json!({"nombre": "Ana Maria", "dni": "124"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({}));

    let owner = client.get_json(&owner_url).await;
    assert_eq!(owner["nombres"], "Ana Maria");
    assert_eq!(owner["dni"], 124);

    let response = client
        .put("/owners/77", json!({"nombre": "Nadie", "dni": 1}))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client.put(&owner_url, json!({"dni": 1})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(client.get_json(&owner_url).await["nombres"], "Ana Maria");
}

#[tokio::test]
async fn test_delete_then_read_is_not_found() {
    let client = TestClient::spawn().await;
    let spot_url = client
        .create(
            "/parking-spots/",
            json!({"numero": 1, "particion": "A", "estado": 0}),
        )
        .await;

    assert_eq!(client.delete(&spot_url).await.status(), StatusCode::OK);
    assert_eq!(client.get(&spot_url).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(client.delete(&spot_url).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        client.delete("/properties/5").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_ownership_scenario() {
    let client = TestClient::spawn().await;
    client
        .create("/owners/", json!({"nombre": "Ana", "dni": "123"}))
        .await;
    client
        .create(
            "/properties/",
            json!({"numero": 101, "particion": "A", "estado": 1}),
        )
        .await;

    let response = client
        .post(
            "/owners/1/ownerships/",
            json!({"totalp": "50", "propiedad_url": "/properties/1"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let ownership_url = response.headers()["location"].to_str().unwrap().to_string();
    assert_eq!(ownership_url, "/ownerships/1");

    let ownership = client.get_json(&ownership_url).await;
    assert_eq!(ownership["totalp"], 50);
    assert_eq!(ownership["propiedad_url"], "/properties/1");
    assert_eq!(ownership["propietario_url"], "/owners/1");
    assert_eq!(ownership["ppcocheras_url"], "/ownerships/1/parking-assignments/");

    let response = client
        .post(
            "/owners/1/ownerships/",
            json!({"totalp": "50", "propiedad_url": "/properties/99"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(response).await,
        "Invalid propiedad URL: /properties/99"
    );

    let response = client
        .post(
            "/owners/42/ownerships/",
            json!({"totalp": "50", "propiedad_url": "/properties/1"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(
        client.get_json("/owners/1/ownerships/").await,
        json!({"propietariopropiedades": ["/ownerships/1"]})
    );
    assert_eq!(
        client.get_json("/ownerships/").await,
        json!({"propietariopropiedades": ["/ownerships/1"]})
    );
}

#[tokio::test]
async fn test_replace_join_rows() {
    let client = TestClient::spawn().await;
    client
        .create("/owners/", json!({"nombre": "Ana", "dni": 123}))
        .await;
    for numero in [101, 102] {
        client
            .create(
                "/properties/",
                json!({"numero": numero, "particion": "A", "estado": 1}),
            )
            .await;
        client
            .create(
                "/parking-spots/",
                json!({"numero": numero, "particion": "B", "estado": 0}),
            )
            .await;
    }
    let ownership_url = client
        .create(
            "/owners/1/ownerships/",
            json!({"totalp": 50, "propiedad_url": "/properties/1"}),
        )
        .await;
    let assignment_url = client
        .create(
            "/ownerships/1/parking-assignments/",
            json!({"cochera_url": "/parking-spots/1"}),
        )
        .await;

    // Ownership: new share and property, owner unchanged
    let response = client
        .put(
            &ownership_url,
            json!({"totalp": "75", "propiedad_url": "/properties/2"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let ownership = client.get_json(&ownership_url).await;
    assert_eq!(ownership["totalp"], 75);
    assert_eq!(ownership["propiedad_url"], "/properties/2");
    assert_eq!(ownership["propietario_url"], "/owners/1");

    let response = client
        .put(
            &ownership_url,
            json!({"totalp": 10, "propiedad_url": "/parking-spots/1"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(response).await,
        "Invalid propiedad URL: /parking-spots/1"
    );
    assert_eq!(client.get_json(&ownership_url).await["totalp"], 75);

    let response = client
        .put(
            "/ownerships/99",
            json!({"totalp": 10, "propiedad_url": "/properties/1"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Parking assignment: new spot, ownership unchanged
    let response = client
        .put(&assignment_url, json!({"cochera_url": "/parking-spots/2"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let assignment = client.get_json(&assignment_url).await;
    assert_eq!(assignment["cochera_url"], "/parking-spots/2");
    assert_eq!(assignment["pp_url"], "/ownerships/1");

    let response = client
        .put(&assignment_url, json!({"cochera_url": "/properties/1"}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(response).await,
        "Invalid cochera URL: /properties/1"
    );
    assert_eq!(
        client.get_json(&assignment_url).await["cochera_url"],
        "/parking-spots/2"
    );

    let response = client
        .put(
            "/parking-assignments/99",
            json!({"cochera_url": "/parking-spots/1"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_url_links_are_absolute_and_resolve() {
    let public = "http://registry.local/api";
    let client = TestClient::spawn_with(UrlMap::with_public_url(public).unwrap()).await;

    let owner_location = client
        .create("/owners/", json!({"nombre": "Ana", "dni": 123}))
        .await;
    assert_eq!(owner_location, format!("{}/owners/1", public));
    let property_location = client
        .create(
            "/properties/",
            json!({"numero": 101, "particion": "A", "estado": 1}),
        )
        .await;
    assert_eq!(property_location, format!("{}/properties/1", public));

    // The property's own self link is accepted back as a reference.
    let property = client.get_json("/properties/1").await;
    assert_eq!(property["self_url"], property_location.as_str());
    let ownership_location = client
        .create(
            "/owners/1/ownerships/",
            json!({"totalp": 100, "propiedad_url": property["self_url"]}),
        )
        .await;
    assert_eq!(ownership_location, format!("{}/ownerships/1", public));

    let ownership = client.get_json("/ownerships/1").await;
    assert_eq!(ownership["self_url"], ownership_location.as_str());
    assert_eq!(ownership["propiedad_url"], property_location.as_str());
    assert_eq!(ownership["propietario_url"], owner_location.as_str());

    let response = client
        .post(
            "/owners/1/ownerships/",
            json!({"totalp": 100, "propiedad_url": "http://elsewhere.local/api/properties/1"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(response).await,
        "Invalid URL: http://elsewhere.local/api/properties/1"
    );
}

#[tokio::test]
async fn test_parking_assignment_requires_parking_spot_url() {
    let client = TestClient::spawn().await;
    client
        .create("/owners/", json!({"nombre": "Ana", "dni": 123}))
        .await;
    client
        .create(
            "/properties/",
            json!({"numero": 101, "particion": "A", "estado": 1}),
        )
        .await;
    client
        .create(
            "/parking-spots/",
            json!({"numero": 7, "particion": "S1", "estado": 0}),
        )
        .await;
    let ownership_url = client
        .create(
            "/owners/1/ownerships/",
            json!({"totalp": 100, "propiedad_url": "/properties/1"}),
        )
        .await;
    let nested = format!("{}/parking-assignments/", ownership_url);

    // A property URL where a parking spot URL is expected.
    let response = client
        .post(&nested, json!({"cochera_url": "/properties/1"}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(response).await,
        "Invalid cochera URL: /properties/1"
    );

    // A host other than ours.
    let response = client
        .post(
            &nested,
            json!({"cochera_url": "http://elsewhere.example/parking-spots/1"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(response).await,
        "Invalid URL: http://elsewhere.example/parking-spots/1"
    );

    let assignment_url = client
        .create(&nested, json!({"cochera_url": "/parking-spots/1"}))
        .await;
    let assignment = client.get_json(&assignment_url).await;
    assert_eq!(assignment["pp_url"], ownership_url);
    assert_eq!(assignment["cochera_url"], "/parking-spots/1");

    assert_eq!(
        client.get_json(&nested).await,
        json!({"ppcocheras": [assignment_url]})
    );

    assert_eq!(
        client.post("/ownerships/9/parking-assignments/", json!({"cochera_url": "/parking-spots/1"}))
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_parent_delete_is_restricted() {
    let client = TestClient::spawn().await;
    client
        .create("/owners/", json!({"nombre": "Ana", "dni": 123}))
        .await;
    client
        .create(
            "/properties/",
            json!({"numero": 101, "particion": "A", "estado": 1}),
        )
        .await;
    let ownership_url = client
        .create(
            "/owners/1/ownerships/",
            json!({"totalp": 100, "propiedad_url": "/properties/1"}),
        )
        .await;

    let response = client.delete("/owners/1").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        error_message(response).await,
        "propietario 1 is still referenced by propietariopropiedades"
    );
    assert_eq!(client.get("/owners/1").await.status(), StatusCode::OK);

    assert_eq!(client.delete(&ownership_url).await.status(), StatusCode::OK);
    assert_eq!(client.delete("/owners/1").await.status(), StatusCode::OK);
    assert_eq!(client.delete("/properties/1").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let client = TestClient::spawn().await;
    let health = client.get_json("/health").await;
    assert_eq!(health["status"], "healthy");
}
