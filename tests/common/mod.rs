//! Shared fixtures for API integration tests

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use backoffice_search::api::{build_router, AppState};
use backoffice_search::config::{CacheConfig, HistoryConfig, SearchLimitsConfig};
use backoffice_search::models::{
    Announcement, Campaign, ClientBroker, ClientNetwork, Lead, Order, OurNetwork, Role, Ticket,
    User,
};
use backoffice_search::search::{SearchCache, SearchHistoryStore, SearchService};
use backoffice_search::state::Database;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Router plus the identities seeded into it
pub struct TestApp {
    pub router: Router,
    pub admin_id: Uuid,
    pub agent_id: Uuid,
    pub affiliate_id: Uuid,
}

pub fn spawn_app() -> TestApp {
    let db = Database::new();

    let admin = User::new("John Carter", "carter@example.com", Role::Admin);
    let admin_id = admin.id;
    db.users.insert(admin_id, admin);

    let agent = User::new("Agent Jones", "jones@example.com", Role::Agent);
    let agent_id = agent.id;
    db.users.insert(agent_id, agent);

    let affiliate = User::new("Amy Fields", "amy@example.com", Role::AffiliateManager);
    let affiliate_id = affiliate.id;
    db.users.insert(affiliate_id, affiliate);

    // Two "Smith" leads; only one belongs to the agent
    let mut assigned = Lead::new("Anna", "Smith", "anna.smith@example.com", "+1555100", "US");
    assigned.assigned_agent = Some(agent_id);
    db.leads.insert(assigned.id, assigned);

    let unassigned = Lead::new("Bob", "Smith", "bob.smith@example.com", "+1555101", "DE");
    db.leads.insert(unassigned.id, unassigned);

    let campaign = Campaign::new("Smith Winter Push");
    let campaign_id = campaign.id;
    db.campaigns.insert(campaign_id, campaign);

    let mut order = Order::new(affiliate_id, 40);
    order.campaign = Some(campaign_id);
    order.country_filter = Some("US".to_string());
    db.orders.insert(order.id, order);

    let ticket = Ticket::new(
        "Smith lead dispute",
        "The smith lead was double-billed",
        "fine_dispute",
        agent_id,
    );
    db.tickets.insert(ticket.id, ticket);

    let announcement = Announcement::new(
        "Smith campaign payout schedule",
        "Payouts for the smith campaign land on Friday",
        vec![Role::Agent],
        admin_id,
    );
    db.announcements.insert(announcement.id, announcement);

    let broker = ClientBroker::new("Smithfield Brokerage");
    db.client_brokers.insert(broker.id, broker);

    let client_network = ClientNetwork::new("Smith & Co Network");
    db.client_networks.insert(client_network.id, client_network);

    let our_network = OurNetwork::new("Smithline Internal");
    db.our_networks.insert(our_network.id, our_network);

    let limits = SearchLimitsConfig::default();
    let cache = Arc::new(SearchCache::from_config(&CacheConfig::default()));
    let history = Arc::new(SearchHistoryStore::new(HistoryConfig::default()));
    let search = Arc::new(SearchService::new(db, cache, history, limits.clone()));
    let router = build_router(AppState::new(search, limits));

    TestApp {
        router,
        admin_id,
        agent_id,
        affiliate_id,
    }
}

/// Issue a request with the gateway identity headers and decode the body
pub async fn request(
    router: &Router,
    method: &str,
    path: &str,
    identity: Option<(Uuid, &str)>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some((id, role)) = identity {
        builder = builder
            .header("x-user-id", id.to_string())
            .header("x-user-role", role);
    }

    let response = router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

pub async fn get(
    router: &Router,
    path: &str,
    identity: Option<(Uuid, &str)>,
) -> (StatusCode, serde_json::Value) {
    request(router, "GET", path, identity).await
}
