//! API integration tests
//!
//! These walk the full rental lifecycle against a live server.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Register a fresh user and return (id, email, password)
async fn register_user(client: &Client, tag: &str, is_admin: bool) -> (i64, String, String) {
    let email = format!("{}@example.com", tag);
    let password = "test1234".to_string();

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({
            "name": tag,
            "email": email,
            "password": password,
            "phone_number": "11987654321",
            "is_admin": is_admin,
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse register response");
    (body["id"].as_i64().expect("No user ID"), email, password)
}

/// Log a user in and return the bearer token
async fn get_auth_token(client: &Client, email: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/token", BASE_URL))
        .form(&[("username", email), ("password", password)])
        .send()
        .await
        .expect("Failed to send login request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["access_token"]
        .as_str()
        .expect("No token in response")
        .to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_unknown_user() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/token", BASE_URL))
        .form(&[("username", "nobody@example.com"), ("password", "whatever")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_login_wrong_password() {
    let client = Client::new();
    let (_, email, _) = register_user(&client, "login-wrong-pw", false).await;

    let response = client
        .post(format!("{}/auth/token", BASE_URL))
        .form(&[("username", email.as_str()), ("password", "wrong")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_refresh_token() {
    let client = Client::new();
    let (_, email, password) = register_user(&client, "refresh", false).await;
    let token = get_auth_token(&client, &email, &password).await;

    let response = client
        .post(format!("{}/auth/refresh_token", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["access_token"].is_string());
    assert_eq!(body["token_type"], "bearer");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_user_email_conflicts() {
    let client = Client::new();
    let (_, email, _) = register_user(&client, "dup-email", false).await;

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({
            "name": "someone else",
            "email": email,
            "password": "test1234",
            "phone_number": "11987654321",
            "is_admin": false,
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_self_or_admin_permissions() {
    let client = Client::new();
    let (user_id, email, password) = register_user(&client, "perm-self", false).await;
    let (other_id, _, _) = register_user(&client, "perm-other", false).await;
    let token = get_auth_token(&client, &email, &password).await;

    // Updating one's own record is allowed
    let response = client
        .put(format!("{}/users/{}", BASE_URL, user_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "perm-self-renamed",
            "email": email,
            "password": password,
            "phone_number": "11987654321",
            "is_admin": false,
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    // Updating another user's record is not
    let response = client
        .put(format!("{}/users/{}", BASE_URL, other_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "hijacked",
            "email": "hijacked@example.com",
            "password": "hijacked1",
            "phone_number": "11987654321",
            "is_admin": false,
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Not enough permissions");

    // Neither is deleting it
    let response = client
        .delete(format!("{}/users/{}", BASE_URL, other_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_non_admin_cannot_self_grant_admin() {
    let client = Client::new();
    let (user_id, email, password) = register_user(&client, "escalation", false).await;
    let token = get_auth_token(&client, &email, &password).await;

    let response = client
        .put(format!("{}/users/{}", BASE_URL, user_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "escalation",
            "email": email,
            "password": password,
            "phone_number": "11987654321",
            "is_admin": true,
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_admin"], false);
}

#[tokio::test]
#[ignore]
async fn test_costume_name_uniqueness() {
    let client = Client::new();
    let (_, email, password) = register_user(&client, "costume-dup", false).await;
    let token = get_auth_token(&client, &email, &password).await;

    let costume = json!({
        "name": "Dracula (dup test)",
        "description": "Cape and fangs",
        "fee": 150.0,
        "availability": "available",
    });

    let response = client
        .post(format!("{}/costumes", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&costume)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/costumes", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&costume)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_costume_mutation_requires_auth() {
    let client = Client::new();

    let response = client
        .post(format!("{}/costumes", BASE_URL))
        .json(&json!({
            "name": "Unauthenticated costume",
            "description": "Should not exist",
            "fee": 10.0,
            "availability": "available",
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_rental_lifecycle() {
    let client = Client::new();
    let (_, email, password) = register_user(&client, "rental-lifecycle", false).await;
    let token = get_auth_token(&client, &email, &password).await;
    let auth = format!("Bearer {}", token);

    // Create an available costume
    let response = client
        .post(format!("{}/costumes", BASE_URL))
        .header("Authorization", &auth)
        .json(&json!({
            "name": "Zorro (lifecycle test)",
            "description": "Mask, hat and rapier",
            "fee": 120.0,
            "availability": "available",
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let costume: Value = response.json().await.expect("Failed to parse costume");
    let costume_id = costume["id"].as_i64().expect("No costume ID");

    // Create a customer
    let response = client
        .post(format!("{}/customers", BASE_URL))
        .header("Authorization", &auth)
        .json(&json!({
            "cpf": "52998224725",
            "name": "Ana Souza",
            "email": "ana.souza@example.com",
            "phone_number": "11987654321",
            "address": "Rua das Flores, 100",
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let customer: Value = response.json().await.expect("Failed to parse customer");
    let customer_id = customer["id"].as_i64().expect("No customer ID");

    // Rent the costume
    let response = client
        .post(format!("{}/rental", BASE_URL))
        .header("Authorization", &auth)
        .json(&json!({
            "customer_id": customer_id,
            "costume_id": costume_id,
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let rental: Value = response.json().await.expect("Failed to parse rental");
    let rental_id = rental["id"].as_i64().expect("No rental ID");

    // The response carries denormalized snapshots
    assert_eq!(rental["costume"]["availability"], "unavailable");
    assert_eq!(rental["customer"]["cpf"], "52998224725");
    assert_eq!(rental["user"]["email"], email);

    // The costume itself is now unavailable
    let response = client
        .get(format!("{}/costumes/{}", BASE_URL, costume_id))
        .send()
        .await
        .expect("Failed to send request");
    let costume: Value = response.json().await.expect("Failed to parse costume");
    assert_eq!(costume["availability"], "unavailable");

    // A second rental of the same costume conflicts
    let response = client
        .post(format!("{}/rental", BASE_URL))
        .header("Authorization", &auth)
        .json(&json!({
            "customer_id": customer_id,
            "costume_id": costume_id,
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Deleting the rental restores availability
    let response = client
        .delete(format!("{}/rental/{}", BASE_URL, rental_id))
        .header("Authorization", &auth)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/costumes/{}", BASE_URL, costume_id))
        .send()
        .await
        .expect("Failed to send request");
    let costume: Value = response.json().await.expect("Failed to parse costume");
    assert_eq!(costume["availability"], "available");
}

#[tokio::test]
#[ignore]
async fn test_rental_of_missing_costume_is_rejected() {
    let client = Client::new();
    let (_, email, password) = register_user(&client, "rental-missing", false).await;
    let token = get_auth_token(&client, &email, &password).await;

    let response = client
        .post(format!("{}/rental", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "customer_id": 1,
            "costume_id": 999999,
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_invalid_patch_leaves_rental_unchanged() {
    let client = Client::new();
    let (_, email, password) = register_user(&client, "rental-patch", false).await;
    let token = get_auth_token(&client, &email, &password).await;
    let auth = format!("Bearer {}", token);

    // Set up costume, customer and rental
    let response = client
        .post(format!("{}/costumes", BASE_URL))
        .header("Authorization", &auth)
        .json(&json!({
            "name": "Pirate (patch test)",
            "description": "Tricorn and hook",
            "fee": 90.0,
            "availability": "available",
        }))
        .send()
        .await
        .expect("Failed to send request");
    let costume_id = response.json::<Value>().await.unwrap()["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/customers", BASE_URL))
        .header("Authorization", &auth)
        .json(&json!({
            "cpf": "15350946056",
            "name": "Bruno Lima",
            "email": "bruno.lima@example.com",
            "phone_number": "11912345678",
            "address": "Av. Paulista, 1000",
        }))
        .send()
        .await
        .expect("Failed to send request");
    let customer_id = response.json::<Value>().await.unwrap()["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/rental", BASE_URL))
        .header("Authorization", &auth)
        .json(&json!({
            "customer_id": customer_id,
            "costume_id": costume_id,
        }))
        .send()
        .await
        .expect("Failed to send request");
    let rental: Value = response.json().await.unwrap();
    let rental_id = rental["id"].as_i64().unwrap();

    // A return date before the rental date is rejected
    let response = client
        .patch(format!("{}/rental/{}", BASE_URL, rental_id))
        .header("Authorization", &auth)
        .json(&json!({
            "return_date": "2000-01-01T00:00:00Z",
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // And nothing was persisted
    let response = client
        .get(format!("{}/rental/{}", BASE_URL, rental_id))
        .header("Authorization", &auth)
        .send()
        .await
        .expect("Failed to send request");
    let unchanged: Value = response.json().await.unwrap();
    assert_eq!(unchanged["rental_date"], rental["rental_date"]);
    assert_eq!(unchanged["return_date"], rental["return_date"]);

    // A valid patch goes through
    let response = client
        .patch(format!("{}/rental/{}", BASE_URL, rental_id))
        .header("Authorization", &auth)
        .json(&json!({
            "return_date": "2099-01-01T00:00:00Z",
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let patched: Value = response.json().await.unwrap();
    assert_eq!(patched["rental_date"], rental["rental_date"]);
    assert_eq!(patched["return_date"], "2099-01-01T00:00:00Z");
}

#[tokio::test]
#[ignore]
async fn test_customer_crud_requires_auth() {
    let client = Client::new();

    let response = client
        .get(format!("{}/customers", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_customer_cpf_uniqueness() {
    let client = Client::new();
    let (_, email, password) = register_user(&client, "customer-dup", false).await;
    let token = get_auth_token(&client, &email, &password).await;
    let auth = format!("Bearer {}", token);

    let customer = json!({
        "cpf": "11144477735",
        "name": "Carla Dias",
        "email": "carla.dias@example.com",
        "phone_number": "11955554444",
        "address": "Rua Augusta, 500",
    });

    let response = client
        .post(format!("{}/customers", BASE_URL))
        .header("Authorization", &auth)
        .json(&customer)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/customers", BASE_URL))
        .header("Authorization", &auth)
        .json(&customer)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // And the customer is addressable by cpf
    let response = client
        .get(format!("{}/customers/11144477735", BASE_URL))
        .header("Authorization", &auth)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "Carla Dias");
}
