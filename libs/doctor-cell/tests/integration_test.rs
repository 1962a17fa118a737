use assert_matches::assert_matches;
use serde_json::json;
use tokio_test::assert_ok;
use uuid::Uuid;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::models::DoctorSearchFilters;
use doctor_cell::services::DoctorService;
use shared_models::{AppError, Locale};
use shared_utils::test_utils::{MockClinicResponses, TestConfig};

fn create_test_service(mock_server: &MockServer, locale: Locale) -> DoctorService {
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();
    DoctorService::new(&config, locale)
}

#[tokio::test]
async fn test_list_specializations() {
    let mock_server = MockServer::start().await;
    let cardiology = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/specializations"))
        .and(header("X-Language", "ru"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockClinicResponses::envelope(json!([
            MockClinicResponses::specialization(&cardiology.to_string(), "Кардиология"),
            MockClinicResponses::specialization(&Uuid::new_v4().to_string(), "Неврология"),
        ]))))
        .mount(&mock_server)
        .await;

    let service = create_test_service(&mock_server, Locale::Ru);
    let specializations = assert_ok!(service.list_specializations().await);

    assert_eq!(specializations.len(), 2);
    assert_eq!(specializations[0].uuid, cardiology);
    assert_eq!(specializations[0].name, "Кардиология");
}

#[tokio::test]
async fn test_search_doctors_by_specialization() {
    let mock_server = MockServer::start().await;
    let specialization = Uuid::new_v4();
    let doctor_id = Uuid::new_v4();

    setup_search_mocks(&mock_server, specialization, doctor_id).await;

    let service = create_test_service(&mock_server, Locale::En);
    let page = assert_ok!(
        service
            .search_doctors(&DoctorSearchFilters::by_specialization(specialization))
            .await
    );

    assert_eq!(page.doctors.len(), 2);
    assert_eq!(page.meta.total, 2);
    assert!(!page.meta.has_more());

    let first = &page.doctors[0];
    assert_eq!(first.id, doctor_id);
    assert_eq!(first.specialization, "Cardiology");
    assert_eq!(first.languages, vec!["English", "Uzbek"]);
    assert!(first.available_times.contains(&"09:00".to_string()));

    // null languages fall back to the default pair
    assert_eq!(page.doctors[1].languages, vec!["русский", "узбекский"]);
}

#[tokio::test]
async fn test_search_doctors_by_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors"))
        .and(query_param("full_name", "Aliev"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockClinicResponses::paginated(
            json!([MockClinicResponses::doctor(&Uuid::new_v4().to_string(), "Aliev Bobur", "Therapy", None)]),
            1,
            1,
            1,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = create_test_service(&mock_server, Locale::En);
    let filters = DoctorSearchFilters {
        full_name: Some("Aliev".to_string()),
        ..DoctorSearchFilters::default()
    };

    let page = assert_ok!(service.search_doctors(&filters).await);
    assert_eq!(page.doctors[0].name, "Aliev Bobur");
}

#[tokio::test]
async fn test_get_doctor_not_found() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/doctors/{}", doctor_id)))
        .respond_with(ResponseTemplate::new(404).set_body_json(MockClinicResponses::error_response("Not found")))
        .mount(&mock_server)
        .await;

    let service = create_test_service(&mock_server, Locale::Ru);
    let result = service.get_doctor(doctor_id).await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn test_get_doctor_success() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/doctors/{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockClinicResponses::envelope(
            MockClinicResponses::doctor(&doctor_id.to_string(), "Rakhimova Zarina", "Pediatrics", Some("русский")),
        )))
        .mount(&mock_server)
        .await;

    let service = create_test_service(&mock_server, Locale::Ru);
    let doctor = assert_ok!(service.get_doctor(doctor_id).await);

    assert_eq!(doctor.id, doctor_id);
    assert_eq!(doctor.languages, vec!["русский"]);
    assert_eq!(doctor.price, Some(150000));
}

#[tokio::test]
async fn test_server_error_is_propagated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/specializations"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let service = create_test_service(&mock_server, Locale::Ru);
    assert_matches!(
        service.list_specializations().await,
        Err(AppError::Server { status: 502, .. })
    );
}

async fn setup_search_mocks(mock_server: &MockServer, specialization: Uuid, doctor_id: Uuid) {
    Mock::given(method("GET"))
        .and(path("/doctors"))
        .and(query_param("specialization_uuid", specialization.to_string()))
        .and(query_param("per_page", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockClinicResponses::paginated(
            json!([
                MockClinicResponses::doctor(&doctor_id.to_string(), "Dr. John Smith", "Cardiology", Some("English, Uzbek")),
                MockClinicResponses::doctor(&Uuid::new_v4().to_string(), "Dr. Jane Doe", "Cardiology", None),
            ]),
            1,
            1,
            2,
        )))
        .mount(mock_server)
        .await;
}
