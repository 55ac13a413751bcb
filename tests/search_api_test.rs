//! Router-level tests for the global search endpoints

mod common;

use axum::http::StatusCode;
use common::{get, spawn_app};

#[tokio::test]
async fn test_requires_identity_headers() {
    let app = spawn_app();
    let (status, _) = get(&app.router, "/api/global-search?q=smith", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rejects_short_query() {
    let app = spawn_app();
    let (status, body) = get(
        &app.router,
        "/api/global-search?q=a",
        Some((app.admin_id, "admin")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_rejects_out_of_range_limit() {
    let app = spawn_app();
    let (status, _) = get(
        &app.router,
        "/api/global-search?q=smith&limit=21",
        Some((app.admin_id, "admin")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rejects_full_limit_over_max() {
    let app = spawn_app();
    let (status, body) = get(
        &app.router,
        "/api/global-search/full?q=smith&limit=51",
        Some((app.admin_id, "admin")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_rejects_unknown_sort() {
    let app = spawn_app();
    let (status, _) = get(
        &app.router,
        "/api/global-search/full?q=smith&sort=magic",
        Some((app.admin_id, "admin")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_type_directive_dispatches_only_users() {
    let app = spawn_app();
    let (status, body) = get(
        &app.router,
        "/api/global-search?q=john%20type:user&limit=5",
        Some((app.admin_id, "admin")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let users = body["data"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["title"], "John Carter");
    assert_eq!(users[0]["type"], "user");

    // The other eight buckets exist and are empty
    for bucket in [
        "leads",
        "orders",
        "campaigns",
        "tickets",
        "announcements",
        "clientBrokers",
        "clientNetworks",
        "ourNetworks",
    ] {
        assert!(body["data"][bucket].as_array().unwrap().is_empty(), "{bucket}");
    }

    assert_eq!(body["meta"]["counts"]["users"], 1);
    assert_eq!(body["meta"]["totalResults"], 1);
    assert_eq!(body["meta"]["parsedQuery"]["filters"]["types"][0], "user");
}

#[tokio::test]
async fn test_unknown_type_directive_searches_nothing() {
    let app = spawn_app();
    let (status, body) = get(
        &app.router,
        "/api/global-search?q=john%20type:bogus",
        Some((app.admin_id, "admin")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // An unknown type restriction matches no entity kind; it must not fall
    // back to searching everything the role permits
    assert_eq!(body["meta"]["totalResults"], 0);
    assert!(body["data"]["users"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_types_param_searches_nothing() {
    let app = spawn_app();
    let (status, body) = get(
        &app.router,
        "/api/global-search?q=john&types=bogus",
        Some((app.admin_id, "admin")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["totalResults"], 0);
}

#[tokio::test]
async fn test_agent_scope_and_row_narrowing() {
    let app = spawn_app();
    let (status, body) = get(
        &app.router,
        "/api/global-search?q=smith",
        Some((app.agent_id, "agent")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Only the agent's own lead, despite two Smith leads in the collection
    let leads = body["data"]["leads"].as_array().unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["title"], "Anna Smith");

    // Tickets and announcements are visible to agents
    assert_eq!(body["data"]["tickets"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["announcements"].as_array().unwrap().len(), 1);

    // Everything admin-only stays empty even though it matches "smith"
    for bucket in ["orders", "users", "campaigns", "clientBrokers", "clientNetworks", "ourNetworks"]
    {
        assert!(body["data"][bucket].as_array().unwrap().is_empty(), "{bucket}");
    }
}

#[tokio::test]
async fn test_agent_cannot_widen_into_users() {
    let app = spawn_app();
    let (status, body) = get(
        &app.router,
        "/api/global-search?q=john&types=user",
        Some((app.agent_id, "agent")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["users"].as_array().unwrap().is_empty());
    assert_eq!(body["meta"]["totalResults"], 0);
}

#[tokio::test]
async fn test_admin_sees_network_collections() {
    let app = spawn_app();
    let (status, body) = get(
        &app.router,
        "/api/global-search?q=smith",
        Some((app.admin_id, "admin")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["clientBrokers"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["clientNetworks"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["ourNetworks"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_quick_search_repeat_is_cached_verbatim() {
    let app = spawn_app();
    let identity = Some((app.admin_id, "admin"));

    let (_, first) = get(&app.router, "/api/global-search?q=smith", identity).await;
    let (_, second) = get(&app.router, "/api/global-search?q=smith", identity).await;
    assert_eq!(first, second);
    assert_eq!(second["meta"]["query"], "smith");
}

#[tokio::test]
async fn test_filter_only_query_yields_no_results() {
    let app = spawn_app();
    let (status, body) = get(
        &app.router,
        "/api/global-search?q=status:active",
        Some((app.admin_id, "admin")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["totalResults"], 0);
}

#[tokio::test]
async fn test_full_search_flat_page_and_pagination_meta() {
    let app = spawn_app();
    let identity = Some((app.admin_id, "admin"));

    let (status, all) = get(
        &app.router,
        "/api/global-search/full?q=smith&limit=50",
        identity,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let everything = all["data"].as_array().unwrap().clone();
    let total = everything.len();
    assert!(total >= 6);
    assert_eq!(all["meta"]["totalResults"], total as u64);
    assert_eq!(all["meta"]["pagination"]["hasMore"], false);

    // Page 2 with limit 2 is exactly the [2, 4) slice of the flat order
    let (_, page2) = get(
        &app.router,
        "/api/global-search/full?q=smith&page=2&limit=2",
        identity,
    )
    .await;
    let items = page2["data"].as_array().unwrap();
    assert_eq!(items.as_slice(), &everything[2..4]);
    assert_eq!(page2["meta"]["pagination"]["page"], 2);
    assert_eq!(page2["meta"]["pagination"]["hasMore"], true);
}

#[tokio::test]
async fn test_full_search_name_sort() {
    let app = spawn_app();
    let (_, body) = get(
        &app.router,
        "/api/global-search/full?q=smith&sort=name&limit=50",
        Some((app.admin_id, "admin")),
    )
    .await;

    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect();
    let mut sorted = titles.clone();
    sorted.sort();
    assert_eq!(titles, sorted);
}
