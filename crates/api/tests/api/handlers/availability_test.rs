use axum::{extract::State, http::StatusCode};
use mockall::predicate;
use mentorbook_api::{
    extract::{Json, Path, Query},
    handlers::availability::*,
};
use mentorbook_core::{
    errors::BookingError,
    models::{
        availability::{
            AvailabilityRule, BlockDateRequest, BlockedDate, CreateRuleRequest, NewAvailabilityRule,
            RuleKind,
        },
        booking::BookingStatus,
    },
};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{booking, monday, monday_rule, time, TestContext};

#[tokio::test]
async fn test_get_slots_recurring_only() {
    let mut ctx = TestContext::new();
    let mentor = Uuid::new_v4();
    ctx.with_calendar(vec![monday_rule(mentor, time(9, 0), time(11, 0))], vec![]);

    let response = get_slots(
        State(ctx.build_state()),
        Path(mentor),
        Query(SlotsQuery {
            date: "2025-01-06".to_string(),
            duration_minutes: 60,
        }),
    )
    .await
    .unwrap();

    let starts: Vec<_> = response.slots.iter().map(|s| (s.start_time, s.available)).collect();
    assert_eq!(
        starts,
        vec![(time(9, 0), true), (time(9, 30), true), (time(10, 0), true)]
    );
    assert_eq!(response.date, monday());
    assert_eq!(response.mentor_id, mentor);
}

#[tokio::test]
async fn test_get_slots_marks_confirmed_overlap() {
    let mut ctx = TestContext::new();
    let mentor = Uuid::new_v4();
    ctx.with_calendar(
        vec![monday_rule(mentor, time(9, 0), time(11, 0))],
        vec![booking(mentor, time(9, 30), 60, BookingStatus::Confirmed)],
    );

    let response = get_slots(
        State(ctx.build_state()),
        Path(mentor),
        Query(SlotsQuery {
            date: "2025-01-06".to_string(),
            duration_minutes: 60,
        }),
    )
    .await
    .unwrap();

    assert_eq!(response.slots.len(), 3);
    assert!(response.slots.iter().all(|s| !s.available));
}

#[tokio::test]
async fn test_get_slots_queries_store_for_that_day_only() {
    let mut ctx = TestContext::new();
    let mentor = Uuid::new_v4();

    ctx.store
        .expect_availability_rules()
        .with(predicate::eq(mentor))
        .times(1)
        .returning(|_| Ok(vec![]));
    ctx.store
        .expect_blocked_dates()
        .with(predicate::eq(mentor), predicate::eq(monday()), predicate::eq(monday()))
        .times(1)
        .returning(|_, _, _| Ok(vec![]));
    ctx.store
        .expect_confirmed_bookings()
        .with(predicate::eq(mentor), predicate::eq(monday()), predicate::eq(monday()))
        .times(1)
        .returning(|_, _, _| Ok(vec![]));

    let response = get_slots(
        State(ctx.build_state()),
        Path(mentor),
        Query(SlotsQuery {
            date: "2025-01-06".to_string(),
            duration_minutes: 30,
        }),
    )
    .await
    .unwrap();

    assert!(response.slots.is_empty());
}

#[tokio::test]
async fn test_get_slots_blocked_date() {
    let mut ctx = TestContext::new();
    let mentor = Uuid::new_v4();
    let rules = vec![monday_rule(mentor, time(9, 0), time(11, 0))];

    ctx.store
        .expect_availability_rules()
        .returning(move |_| Ok(rules.clone()));
    ctx.store.expect_blocked_dates().returning(move |mentor_id, date, _| {
        Ok(vec![BlockedDate {
            id: Uuid::new_v4(),
            mentor_id,
            date,
            reason: None,
        }])
    });
    ctx.store
        .expect_confirmed_bookings()
        .returning(|_, _, _| Ok(vec![]));

    let response = get_slots(
        State(ctx.build_state()),
        Path(mentor),
        Query(SlotsQuery {
            date: "2025-01-06".to_string(),
            duration_minutes: 60,
        }),
    )
    .await
    .unwrap();

    assert!(response.slots.is_empty());
}

#[tokio::test]
async fn test_get_slots_malformed_date_never_reaches_store() {
    // No expectations: any store call would panic
    let ctx = TestContext::new();

    let result = get_slots(
        State(ctx.build_state()),
        Path(Uuid::new_v4()),
        Query(SlotsQuery {
            date: "06/01/2025".to_string(),
            duration_minutes: 60,
        }),
    )
    .await;

    match result.unwrap_err().0 {
        BookingError::InvalidInput(_) => {}
        e => panic!("Expected InvalidInput error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_get_slots_non_positive_duration() {
    let ctx = TestContext::new();

    let result = get_slots(
        State(ctx.build_state()),
        Path(Uuid::new_v4()),
        Query(SlotsQuery {
            date: "2025-01-06".to_string(),
            duration_minutes: 0,
        }),
    )
    .await;

    assert!(matches!(result.unwrap_err().0, BookingError::InvalidInput(_)));
}

#[tokio::test]
async fn test_get_slots_upstream_failure_is_propagated() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_availability_rules()
        .returning(|_| Err(BookingError::Upstream(eyre::eyre!("connection reset"))));

    let result = get_slots(
        State(ctx.build_state()),
        Path(Uuid::new_v4()),
        Query(SlotsQuery {
            date: "2025-01-06".to_string(),
            duration_minutes: 60,
        }),
    )
    .await;

    match result.unwrap_err().0 {
        BookingError::Upstream(report) => assert!(report.to_string().contains("connection reset")),
        e => panic!("Expected Upstream error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_get_slot_range() {
    let mut ctx = TestContext::new();
    let mentor = Uuid::new_v4();
    ctx.with_calendar(vec![monday_rule(mentor, time(9, 0), time(10, 0))], vec![]);

    let response = get_slot_range(
        State(ctx.build_state()),
        Path(mentor),
        Query(SlotRangeQuery {
            from: "2025-01-05".to_string(),
            to: "2025-01-13".to_string(),
            duration_minutes: 60,
        }),
    )
    .await
    .unwrap();

    let per_day: Vec<usize> = response.days.iter().map(|d| d.slots.len()).collect();
    // Sunday, Monday ... Sunday, Monday
    assert_eq!(per_day, vec![0, 1, 0, 0, 0, 0, 0, 0, 1]);
}

#[tokio::test]
async fn test_get_slot_range_too_long() {
    let mut ctx = TestContext::new();
    ctx.settings.max_range_days = 7;

    let result = get_slot_range(
        State(ctx.build_state()),
        Path(Uuid::new_v4()),
        Query(SlotRangeQuery {
            from: "2025-01-01".to_string(),
            to: "2025-01-08".to_string(),
            duration_minutes: 60,
        }),
    )
    .await;

    assert!(matches!(result.unwrap_err().0, BookingError::InvalidInput(_)));
}

#[tokio::test]
async fn test_create_rule() {
    let mut ctx = TestContext::new();
    let mentor = Uuid::new_v4();

    ctx.store
        .expect_insert_availability_rule()
        .with(predicate::eq(NewAvailabilityRule {
            mentor_id: mentor,
            kind: RuleKind::Specific { date: monday() },
            start_time: time(14, 0),
            end_time: time(16, 30),
        }))
        .times(1)
        .returning(|rule| {
            Ok(AvailabilityRule {
                id: Uuid::new_v4(),
                mentor_id: rule.mentor_id,
                kind: rule.kind,
                start_time: rule.start_time,
                end_time: rule.end_time,
            })
        });

    let (status, rule) = create_rule(
        State(ctx.build_state()),
        Path(mentor),
        Json(CreateRuleRequest {
            kind: RuleKind::Specific { date: monday() },
            start_time: "14:00".to_string(),
            end_time: "16:30:00".to_string(),
        }),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rule.mentor_id, mentor);
}

#[tokio::test]
async fn test_create_rule_rejects_inverted_window() {
    let ctx = TestContext::new();

    let result = create_rule(
        State(ctx.build_state()),
        Path(Uuid::new_v4()),
        Json(CreateRuleRequest {
            kind: RuleKind::Recurring { day_of_week: 1 },
            start_time: "11:00".to_string(),
            end_time: "09:00".to_string(),
        }),
    )
    .await;

    assert!(matches!(result.unwrap_err().0, BookingError::InvalidInput(_)));
}

#[tokio::test]
async fn test_delete_missing_rule() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_delete_availability_rule()
        .returning(|_, _| Ok(false));

    let result = delete_rule(State(ctx.build_state()), Path((Uuid::new_v4(), Uuid::new_v4()))).await;

    assert!(matches!(result.unwrap_err().0, BookingError::NotFound(_)));
}

#[tokio::test]
async fn test_block_and_unblock_date() {
    let mut ctx = TestContext::new();
    let mentor = Uuid::new_v4();
    let blocked_id = Uuid::new_v4();

    ctx.store
        .expect_insert_blocked_date()
        .with(
            predicate::eq(mentor),
            predicate::eq(monday()),
            predicate::eq(Some("Holiday".to_string())),
        )
        .times(1)
        .returning(move |mentor_id, date, reason| {
            Ok(BlockedDate {
                id: blocked_id,
                mentor_id,
                date,
                reason,
            })
        });
    ctx.store
        .expect_delete_blocked_date()
        .with(predicate::eq(mentor), predicate::eq(blocked_id))
        .times(1)
        .returning(|_, _| Ok(true));

    let state = ctx.build_state();

    let (status, blocked) = block_date(
        State(state.clone()),
        Path(mentor),
        Json(BlockDateRequest {
            date: "2025-01-06".to_string(),
            reason: Some("Holiday".to_string()),
        }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(blocked.id, blocked_id);

    let status = unblock_date(State(state), Path((mentor, blocked_id))).await.unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);
}
