//! Service tests against a real Postgres database
//!
//! Each test gets a fresh database with migrations and the
//! `maintenance` fixture applied. Run with:
//! `DATABASE_URL=postgres://... cargo test --test db_tests -- --ignored`

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use sqlx::PgPool;

use gearguard_server::{
    config::AuthConfig,
    models::{
        enums::{RequestState, RequestType},
        equipment::{EquipmentDetails, UpdateEquipment},
        request::{CreateRequest, UpdateRequest, CALENDAR_OVERDUE, CALENDAR_SCHEDULED},
        team::{CreateTeam, UpdateTeam},
    },
    repository::Repository,
    services::Services,
    AppError,
};

const ALICE: i32 = 2;
const BOB: i32 = 3;
const CAROL: i32 = 4;

const PRESS: i32 = 1;
const LATHE: i32 = 2;
const OLD_DRILL: i32 = 3;
const GENERATOR: i32 = 4;

fn services(pool: PgPool) -> Services {
    Services::new(Repository::new(pool), AuthConfig::default())
}

fn corrective(subject: &str) -> CreateRequest {
    CreateRequest {
        subject: subject.to_string(),
        request_type: RequestType::Corrective,
        equipment_id: None,
        scheduled_date: None,
    }
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_new_request_goes_to_least_loaded_technician(pool: PgPool) {
    let services = services(pool);

    // alice already holds one open request on the press
    let request = services
        .requests
        .create(corrective("Noisy pump"), Some(PRESS), CAROL)
        .await
        .unwrap();

    assert_eq!(request.state, RequestState::New);
    assert_eq!(request.assigned_technician_id, Some(BOB));
    assert_eq!(request.created_by, CAROL);
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_tie_goes_to_lowest_user_id(pool: PgPool) {
    let services = services(pool);

    services
        .requests
        .create(corrective("Noisy pump"), Some(PRESS), CAROL)
        .await
        .unwrap();
    let request = services
        .requests
        .create(corrective("Worn belt"), Some(PRESS), CAROL)
        .await
        .unwrap();

    assert_eq!(request.assigned_technician_id, Some(ALICE));
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_default_technician_wins_over_load(pool: PgPool) {
    let services = services(pool);

    for subject in ["Chuck jammed", "Coolant low"] {
        let request = services
            .requests
            .create(corrective(subject), Some(LATHE), CAROL)
            .await
            .unwrap();
        assert_eq!(request.assigned_technician_id, Some(BOB));
    }
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_team_without_members_leaves_request_unassigned(pool: PgPool) {
    let services = services(pool);

    let request = services
        .requests
        .create(corrective("Won't start"), Some(GENERATOR), CAROL)
        .await
        .unwrap();

    assert_eq!(request.assigned_technician_id, None);
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_body_equipment_overrides_url_equipment(pool: PgPool) {
    let services = services(pool);

    let mut data = corrective("Chuck jammed");
    data.equipment_id = Some(LATHE);
    let request = services.requests.create(data, Some(PRESS), CAROL).await.unwrap();

    assert_eq!(request.equipment_id, LATHE);
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_scrapped_equipment_rejects_new_requests(pool: PgPool) {
    let services = services(pool);

    let err = services
        .requests
        .create(corrective("Spin it up again"), Some(OLD_DRILL), CAROL)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::BusinessRule(_)));
    let requests = services
        .requests
        .list(&Default::default())
        .await
        .unwrap();
    assert_eq!(requests.len(), 1);
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_scrap_state_retires_equipment(pool: PgPool) {
    let services = services(pool);

    services.requests.set_state(1, RequestState::Scrap).await.unwrap();

    let equipment = services.equipment.get_by_id(PRESS).await.unwrap();
    assert!(equipment.is_scrapped);

    // every later save against the press is refused and changes nothing
    let err = services
        .requests
        .set_state(1, RequestState::InProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    let details = services.requests.get_details(1).await.unwrap();
    assert_eq!(details.request.request.state, RequestState::Scrap);
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_open_count_follows_state_changes(pool: PgPool) {
    let services = services(pool);
    let open_count = |details: &EquipmentDetails| details.equipment.open_requests_count;

    let details = services.equipment.get_details(PRESS).await.unwrap();
    assert_eq!(open_count(&details), 1);
    assert_eq!(details.open_requests.len(), 1);

    services.requests.set_state(1, RequestState::InProgress).await.unwrap();
    let details = services.equipment.get_details(PRESS).await.unwrap();
    assert_eq!(open_count(&details), 1);

    services.requests.set_state(1, RequestState::Repaired).await.unwrap();
    let details = services.equipment.get_details(PRESS).await.unwrap();
    assert_eq!(open_count(&details), 0);
    assert!(details.open_requests.is_empty());
    assert_eq!(details.equipment.badge_color, "#198754");

    services.requests.set_state(1, RequestState::New).await.unwrap();
    let details = services.equipment.get_details(PRESS).await.unwrap();
    assert_eq!(open_count(&details), 1);
    assert_eq!(details.equipment.badge_color, "#dc3545");
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_update_rejects_technician_outside_team(pool: PgPool) {
    let services = services(pool);

    let err = services
        .requests
        .update(
            1,
            UpdateRequest {
                assigned_technician_id: Some(CAROL),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = services
        .requests
        .update(
            1,
            UpdateRequest {
                assigned_technician_id: Some(999),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_update_assigns_technician_to_unassigned_request(pool: PgPool) {
    let services = services(pool);

    let request = services
        .requests
        .create(corrective("Won't start"), Some(GENERATOR), CAROL)
        .await
        .unwrap();
    assert_eq!(request.assigned_technician_id, None);

    services
        .teams
        .update(
            2,
            &UpdateTeam {
                name: None,
                member_ids: Some(vec![BOB, ALICE]),
            },
        )
        .await
        .unwrap();

    // no technician in the update, so the policy picks one even off state new
    let updated = services
        .requests
        .update(
            request.id,
            UpdateRequest {
                state: Some("in_progress".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // alice still carries the open request on the press
    assert_eq!(updated.state, RequestState::InProgress);
    assert_eq!(updated.assigned_technician_id, Some(BOB));
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_create_rejects_overlong_subject(pool: PgPool) {
    let services = services(pool);

    let err = services
        .requests
        .create(corrective(&"x".repeat(256)), Some(PRESS), CAROL)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    let requests = services.requests.list(&Default::default()).await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_update_rejects_unknown_state(pool: PgPool) {
    let services = services(pool);

    let err = services
        .requests
        .update(
            1,
            UpdateRequest {
                state: Some("bogus".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    let request = services.requests.get_details(1).await.unwrap();
    assert_eq!(request.request.request.state, RequestState::New);
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_duration_is_stored_only_when_repaired(pool: PgPool) {
    let services = services(pool);
    let duration = Decimal::new(250, 2);

    let request = services
        .requests
        .update(
            1,
            UpdateRequest {
                state: Some("in_progress".to_string()),
                duration_hours: Some(duration),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(request.duration_hours, None);

    let request = services
        .requests
        .update(
            1,
            UpdateRequest {
                state: Some("repaired".to_string()),
                assigned_technician_id: Some(BOB),
                duration_hours: Some(duration),
            },
        )
        .await
        .unwrap();
    assert_eq!(request.state, RequestState::Repaired);
    assert_eq!(request.assigned_technician_id, Some(BOB));
    assert_eq!(request.duration_hours, Some(duration));
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_calendar_colours_overdue_preventive_work(pool: PgPool) {
    let services = services(pool);
    let today = NaiveDate::from_ymd_opt(2030, 6, 15).unwrap();

    let request = services
        .requests
        .create(
            CreateRequest {
                subject: "Annual service".to_string(),
                request_type: RequestType::Preventive,
                equipment_id: Some(GENERATOR),
                scheduled_date: Some(today - Duration::days(1)),
            },
            None,
            CAROL,
        )
        .await
        .unwrap();

    let events = services.requests.calendar_events_at(today).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, request.id);
    assert_eq!(events[0].title, "Annual service (Generator)");
    assert_eq!(events[0].start, "2030-06-14");
    assert_eq!(events[0].url, format!("/requests/{}/", request.id));
    assert_eq!(events[0].color, CALENDAR_OVERDUE);

    services
        .requests
        .set_state(request.id, RequestState::Repaired)
        .await
        .unwrap();

    let events = services.requests.calendar_events_at(today).await.unwrap();
    assert_eq!(events[0].color, CALENDAR_SCHEDULED);
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_kanban_has_every_column(pool: PgPool) {
    let services = services(pool);

    let board = services.requests.kanban().await.unwrap();
    assert_eq!(board.new.len(), 1);
    assert!(board.in_progress.is_empty());
    assert!(board.repaired.is_empty());
    assert!(board.scrap.is_empty());
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_form_context_flags_scrapped_equipment(pool: PgPool) {
    let services = services(pool);

    let context = services
        .requests
        .form_context(Some(OLD_DRILL), Some("2030-01-31"))
        .await
        .unwrap();

    assert!(context.is_scrapped);
    assert_eq!(context.initial_scheduled_date, NaiveDate::from_ymd_opt(2030, 1, 31));
    assert!(context.equipment_choices.iter().all(|choice| choice.id != OLD_DRILL));
    assert_eq!(context.equipment_choices.len(), 3);
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_equipment_cannot_be_unscrapped(pool: PgPool) {
    let services = services(pool);

    let err = services
        .equipment
        .update(
            OLD_DRILL,
            &UpdateEquipment {
                is_scrapped: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // a default technician outside the owning team is refused
    let err = services
        .equipment
        .update(
            GENERATOR,
            &UpdateEquipment {
                default_technician_id: Some(Some(ALICE)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_duplicate_team_name_is_a_conflict(pool: PgPool) {
    let services = services(pool);

    let err = services
        .teams
        .create(&CreateTeam {
            name: "Mechanics".to_string(),
            member_ids: vec![],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations", fixtures("maintenance"))]
#[ignore]
async fn test_equipment_search_matches_holder_login(pool: PgPool) {
    let services = services(pool);

    let query = gearguard_server::models::equipment::EquipmentQuery {
        q: Some("CAROL".to_string()),
        ..Default::default()
    };
    let equipment = services.equipment.list(&query).await.unwrap();

    assert_eq!(equipment.len(), 1);
    assert_eq!(equipment[0].equipment.id, PRESS);
    assert_eq!(equipment[0].open_requests_count, 1);
    assert_eq!(equipment[0].badge_color, "#dc3545");
}
