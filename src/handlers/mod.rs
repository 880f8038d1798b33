pub mod account;
pub mod parts;
pub mod phones;

use axum::{
    routing::{get, post},
    Router,
};

use crate::db::{part_store::PartStore, phone_store::PhoneStore, DbPool};

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    pub phone_store: PhoneStore,
    pub part_store: PartStore,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            phone_store: PhoneStore::new(pool.clone()),
            part_store: PartStore::new(pool),
        }
    }
}

/// Build the application router with every endpoint the client uses
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/addPhone", post(phones::add_phone))
        .route("/updatePhone", post(phones::update_phone))
        .route("/deletePhone", post(phones::delete_phone))
        .route("/phoneInfo", post(phones::phone_info))
        .route("/allPhones", get(phones::all_phones))
        .route("/phonesByStatus", get(phones::phones_by_status))
        .route("/allParts", get(parts::all_parts))
        .route("/phoneParts", post(parts::phone_parts))
        .route("/partsCost", post(parts::parts_cost))
        .route("/account", get(account::account))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        router(AppState::new(test_pool().await))
    }

    fn get_request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    fn form_post(path: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_post(path: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    async fn add_phone(app: &Router, form: &str) -> i64 {
        let response = app
            .clone()
            .oneshot(form_post("/addPhone", form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["phone_id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn add_then_fetch_a_phone() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(form_post(
                "/addPhone",
                "model=60&color=green&cost=18.00&date=2020-07-14",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let added = body_json(response).await;
        assert_eq!(added["message"], "Phone added to inventory");
        let phone_id = added["phone_id"].as_i64().unwrap();

        let response = app
            .oneshot(form_post("/phoneInfo", &format!("phone_id={phone_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let phone = body_json(response).await;
        assert_eq!(phone["model"], "iPhone 6 green");
        assert_eq!(phone["status"], 0);
        assert_eq!(phone["issues"], "");
        assert_eq!(phone["date_acquired"], "2020-07-14");
    }

    #[tokio::test]
    async fn add_rejects_bad_dates_and_models() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(form_post(
                "/addPhone",
                "model=60&color=green&cost=18.00&date=07/14/2020",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(form_post(
                "/addPhone",
                "model=42&color=green&cost=18.00&date=2020-07-14",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_phone_is_a_404() {
        let app = test_app().await;
        let response = app
            .oneshot(form_post("/phoneInfo", "phone_id=123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Phone not found");
    }

    #[tokio::test]
    async fn update_reports_success_and_persists() {
        let app = test_app().await;
        let phone_id = add_phone(&app, "model=60&color=black&cost=25.00&date=2020-06-07").await;

        let response = app
            .clone()
            .oneshot(json_post(
                "/updatePhone",
                json!({
                    "phoneId": phone_id,
                    "update": ["status =?", "sold =?"],
                    "value": ["4", "95.00"],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Updated successfully");

        let response = app
            .oneshot(form_post("/phoneInfo", &format!("phone_id={phone_id}")))
            .await
            .unwrap();
        let phone = body_json(response).await;
        assert_eq!(phone["status"], 4);
        assert_eq!(phone["sold"], 95.0);
    }

    #[tokio::test]
    async fn delete_returns_a_text_message() {
        let app = test_app().await;
        let phone_id = add_phone(&app, "model=60&color=black&cost=25.00&date=2020-06-07").await;

        let response = app
            .clone()
            .oneshot(form_post("/deletePhone", &format!("phone_id={phone_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Phone removed");

        let response = app
            .oneshot(form_post("/phoneInfo", &format!("phone_id={phone_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn all_phones_honors_the_order_key() {
        let app = test_app().await;
        add_phone(&app, "model=60&color=a&cost=30.00&date=2020-06-01").await;
        add_phone(&app, "model=60&color=b&cost=10.00&date=2020-06-02").await;

        let response = app
            .clone()
            .oneshot(get_request("/allPhones?order=6"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let phones = body_json(response).await;
        assert_eq!(phones[0]["phone_cost"], 10.0);
        assert_eq!(phones[1]["phone_cost"], 30.0);

        let response = app
            .oneshot(get_request("/allPhones?order=8"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn status_listing_validates_the_status() {
        let app = test_app().await;
        add_phone(&app, "model=60&color=a&cost=30.00&date=2020-06-01").await;

        let response = app
            .clone()
            .oneshot(get_request("/phonesByStatus?status=0"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let phones = body_json(response).await;
        assert_eq!(phones.as_array().unwrap().len(), 1);

        let response = app
            .oneshot(get_request("/phonesByStatus?status=9"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn parts_catalog_is_served_per_model() {
        let app = test_app().await;
        let response = app.oneshot(get_request("/allParts?model=60")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let parts = body_json(response).await;
        let parts = parts.as_array().unwrap();
        assert_eq!(parts.len(), 5);
        assert!(parts[0]["part_id"].is_i64());
        assert!(parts[0]["part_name"].is_string());
    }

    #[tokio::test]
    async fn phone_parts_wraps_each_entry() {
        let app = test_app().await;
        let response = app
            .oneshot(form_post("/phoneParts", "parts=2,1,2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let entries = body_json(response).await;
        let entries = entries.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["part"]["part_id"], 2);
        assert_eq!(entries[1]["part"]["part_id"], 1);
        assert_eq!(entries[2]["part"]["part_id"], 2);
        assert_eq!(entries[0]["part"]["part_name"], "Battery");
    }

    #[tokio::test]
    async fn parts_cost_is_a_two_place_decimal() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(form_post("/partsCost", "parts="))
            .await
            .unwrap();
        assert_eq!(body_text(response).await, "0.00");

        let response = app
            .clone()
            .oneshot(form_post("/partsCost", "parts=3,4"))
            .await
            .unwrap();
        assert_eq!(body_text(response).await, "8.50");

        let response = app
            .oneshot(form_post("/partsCost", "parts=3,oops"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn account_reports_counts_and_money() {
        let app = test_app().await;
        let sold_id = add_phone(&app, "model=60&color=green&cost=18.00&date=2020-07-14").await;
        add_phone(&app, "model=70&color=black&cost=25.00&date=2020-07-15").await;

        let response = app
            .clone()
            .oneshot(json_post(
                "/updatePhone",
                json!({
                    "phoneId": sold_id,
                    "update": ["status =?", "sold =?", "parts_purchased =?"],
                    "value": [4, "120.00", "[3,4]"],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_request("/account")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let stats = body_json(response).await;
        assert_eq!(stats["status"]["sold"], 1);
        assert_eq!(stats["status"]["need"], 1);
        assert_eq!(stats["status"]["fixing"], 0);
        assert_eq!(stats["money"]["phones"], 43.0);
        assert_eq!(stats["money"]["parts"], 8.5);
        assert_eq!(stats["money"]["profit"], 120.0);
        assert_eq!(stats["money"]["net"], 68.5);
    }
}
