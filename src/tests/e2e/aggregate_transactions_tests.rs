use crate::modules::user_summaries::adapters::outbound::summary_store::SummaryStore;
use crate::modules::user_summaries::adapters::outbound::summary_store_in_memory::InMemorySummaryStore;
use crate::modules::user_summaries::use_cases::aggregate_transactions::handler::Aggregator;
use crate::shared::core::clock::SystemClock;
use crate::shell::http::router;
use crate::shell::state::AppState;
use crate::tests::fixtures::change_records::{ChangeRecordBuilder, stream_event};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn maintains_the_summary_across_invocations() {
    let store = Arc::new(InMemorySummaryStore::new());
    let dyn_store: Arc<dyn SummaryStore> = store.clone();
    let state = AppState {
        aggregator: Arc::new(Aggregator::new(dyn_store, Arc::new(SystemClock))),
    };

    let batches = vec![
        stream_event(vec![
            ChangeRecordBuilder::new()
                .user("U1")
                .amount("40")
                .transaction_type("Purchase")
                .build(),
            ChangeRecordBuilder::new()
                .user("U2")
                .amount("12.75")
                .transaction_type("Credit")
                .category("Udhaar")
                .build(),
        ]),
        stream_event(vec![
            ChangeRecordBuilder::new().event_name("MODIFY").user("U1").amount("999").build(),
            ChangeRecordBuilder::new().user("U1").amount("100").build(),
            ChangeRecordBuilder::new().user("U2").amount("oops").build(),
        ]),
        stream_event(vec![]),
    ];

    for batch in batches {
        let response = router(state.clone())
            .oneshot(
                Request::post("/invocations")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&batch).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let u1 = store.get("U1").await.unwrap();
    assert_eq!(u1.total_revenue, Decimal::from(100));
    assert_eq!(u1.cogs, Decimal::from(40));
    assert_eq!(u1.trapped_capital, Decimal::ZERO);

    let u2 = store.get("U2").await.unwrap();
    assert_eq!(u2.total_revenue, Decimal::ZERO);
    assert_eq!(u2.cogs, Decimal::ZERO);
    assert_eq!(u2.trapped_capital, Decimal::new(1275, 2));

    assert_eq!(store.len().await, 2);
}
