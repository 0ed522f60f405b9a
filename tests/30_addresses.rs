mod common;

use anyhow::Result;
use reqwest::StatusCode;

// Addresses are reachable only through the full ownership chain:
// user -> contact -> address. Breaking any link yields NotFound.

async fn create_contact(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
) -> Result<i64> {
    let res = client
        .post(format!("{}/api/contacts", base_url))
        .header("Authorization", token)
        .json(&serde_json::json!({ "firstName": "Holder" }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create contact failed");
    let payload = res.json::<serde_json::Value>().await?;
    payload["data"]["id"]
        .as_i64()
        .ok_or_else(|| anyhow::anyhow!("create response missing id"))
}

async fn create_address(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    contact_id: i64,
) -> Result<i64> {
    let res = client
        .post(format!("{}/api/contacts/{}/addresses", base_url, contact_id))
        .header("Authorization", token)
        .json(&serde_json::json!({
            "street": "Jl. Merdeka 1",
            "city": "Jakarta",
            "country": "Indonesia",
            "postalCode": "10110",
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "create address failed with {}",
        res.status()
    );
    let payload = res.json::<serde_json::Value>().await?;
    payload["data"]["id"]
        .as_i64()
        .ok_or_else(|| anyhow::anyhow!("create response missing id"))
}

#[tokio::test]
async fn create_list_get_update_delete_address() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (_username, token) = common::register_and_login(&client, &server.base_url, "addr").await?;
    let contact_id = create_contact(&client, &server.base_url, &token).await?;
    let address_id = create_address(&client, &server.base_url, &token, contact_id).await?;

    // List
    let res = client
        .get(format!(
            "{}/api/contacts/{}/addresses",
            server.base_url, contact_id
        ))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["data"].as_array().map(|a| a.len()), Some(1));

    // Get
    let res = client
        .get(format!(
            "{}/api/contacts/{}/addresses/{}",
            server.base_url, contact_id, address_id
        ))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["data"]["city"], "Jakarta");
    assert_eq!(payload["data"]["postalCode"], "10110");

    // Full-field replace: omitted optional fields are cleared
    let res = client
        .put(format!(
            "{}/api/contacts/{}/addresses/{}",
            server.base_url, contact_id, address_id
        ))
        .header("Authorization", &token)
        .json(&serde_json::json!({ "country": "Indonesia", "postalCode": "40115" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["data"]["postalCode"], "40115");
    assert_eq!(payload["data"]["street"], serde_json::Value::Null);
    assert_eq!(payload["data"]["city"], serde_json::Value::Null);

    // Delete
    let res = client
        .delete(format!(
            "{}/api/contacts/{}/addresses/{}",
            server.base_url, contact_id, address_id
        ))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["data"], true);

    let res = client
        .get(format!(
            "{}/api/contacts/{}/addresses/{}",
            server.base_url, contact_id, address_id
        ))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn address_create_requires_country_and_postal_code() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (_username, token) = common::register_and_login(&client, &server.base_url, "aval").await?;
    let contact_id = create_contact(&client, &server.base_url, &token).await?;

    let res = client
        .post(format!(
            "{}/api/contacts/{}/addresses",
            server.base_url, contact_id
        ))
        .header("Authorization", &token)
        .json(&serde_json::json!({ "country": "", "postalCode": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn addresses_are_scoped_through_the_parent_contact() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (_owner, owner_token) =
        common::register_and_login(&client, &server.base_url, "aowner").await?;
    let (_other, other_token) =
        common::register_and_login(&client, &server.base_url, "aother").await?;

    let contact_id = create_contact(&client, &server.base_url, &owner_token).await?;
    let address_id = create_address(&client, &server.base_url, &owner_token, contact_id).await?;

    // Another tenant cannot create under or read through the owner's contact
    let res = client
        .post(format!(
            "{}/api/contacts/{}/addresses",
            server.base_url, contact_id
        ))
        .header("Authorization", &other_token)
        .json(&serde_json::json!({ "country": "Indonesia", "postalCode": "10110" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!(
            "{}/api/contacts/{}/addresses/{}",
            server.base_url, contact_id, address_id
        ))
        .header("Authorization", &other_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // A real address under the wrong parent contact does not resolve either
    let other_contact = create_contact(&client, &server.base_url, &owner_token).await?;
    let res = client
        .get(format!(
            "{}/api/contacts/{}/addresses/{}",
            server.base_url, other_contact, address_id
        ))
        .header("Authorization", &owner_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn deleting_the_contact_breaks_the_chain() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let (_username, token) = common::register_and_login(&client, &server.base_url, "chain").await?;
    let contact_id = create_contact(&client, &server.base_url, &token).await?;
    let address_id = create_address(&client, &server.base_url, &token, contact_id).await?;

    let res = client
        .delete(format!("{}/api/contacts/{}", server.base_url, contact_id))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Address operations under the deleted contact all fail with NotFound
    let res = client
        .get(format!(
            "{}/api/contacts/{}/addresses/{}",
            server.base_url, contact_id, address_id
        ))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!(
            "{}/api/contacts/{}/addresses",
            server.base_url, contact_id
        ))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
