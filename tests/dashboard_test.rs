mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{install_aggregate_functions, Factory, TestApp};
use kuesioner::models::{CreateResponse, QuestionType};

fn respondent(
    nama: &str,
    usia: i32,
    jenis_kelamin: &str,
    pekerjaan: &str,
    jaminan: &str,
) -> CreateResponse {
    CreateResponse {
        nama: nama.to_string(),
        usia,
        jenis_kelamin: jenis_kelamin.to_string(),
        pekerjaan: pekerjaan.to_string(),
        jaminan: jaminan.to_string(),
        saran: None,
    }
}

/// Value of the named bar in a `{name, value}` series
fn bar(data: &Value, name: &str) -> Option<i64> {
    data.as_array()?
        .iter()
        .find(|point| point["name"] == name)
        .and_then(|point| point["value"].as_i64())
}

fn choice(choice: &str) -> String {
    json!({ "choice": choice }).to_string()
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/admin/questionnaires").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get(&format!("/api/admin/questionnaires/{}/raw-data", Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_questionnaires_paginated() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    factory.create_questionnaire().await;

    let response = app
        .server
        .get("/api/admin/questionnaires?limit=1")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["limit"], 1);
    assert!(body["total"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn test_get_questionnaire_not_found() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .get(&format!("/api/admin/questionnaires/{}", Uuid::new_v4()))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_overview_rejects_bad_date() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let questionnaire = factory.create_questionnaire().await;

    let response = app
        .server
        .get(&format!(
            "/api/admin/questionnaires/{}/overview?start_date=31-12-2025",
            questionnaire.id
        ))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_raw_data_search_and_sort() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let questionnaire = factory.create_questionnaire().await;
    let question = factory
        .create_question(questionnaire.id, "Dokter", 1, QuestionType::Scale)
        .await;

    factory
        .create_response(questionnaire.id, "Budi", "Guru", None, vec![(question.id, "3".to_string())])
        .await;
    factory
        .create_response(questionnaire.id, "Andi", "Petani", None, vec![(question.id, "5".to_string())])
        .await;
    factory
        .create_response(questionnaire.id, "Citra", "guru les", None, vec![])
        .await;

    let response = app
        .server
        .get(&format!(
            "/api/admin/questionnaires/{}/raw-data?search=GURU&sort=nama&direction=asc",
            questionnaire.id
        ))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["nama"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Budi", "Citra"]);
    assert_eq!(
        body["data"][0]["summary"].as_str().unwrap(),
        format!("({}: Cukup Puas)", question.text)
    );
    assert_eq!(body["data"][1]["summary"].as_str().unwrap(), "");
}

#[tokio::test]
async fn test_raw_data_header_click_toggles_direction() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let questionnaire = factory.create_questionnaire().await;

    factory.create_response(questionnaire.id, "Andi", "Guru", None, vec![]).await;
    factory.create_response(questionnaire.id, "Budi", "Guru", None, vec![]).await;

    let response = app
        .server
        .get(&format!(
            "/api/admin/questionnaires/{}/raw-data?sort=nama&direction=asc&clicked=nama",
            questionnaire.id
        ))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["sort"], "nama");
    assert_eq!(body["direction"], "desc");
    assert_eq!(body["data"][0]["nama"], "Budi");
}

#[tokio::test]
async fn test_export_csv() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let questionnaire = factory.create_questionnaire().await;
    let scale = factory
        .create_question(questionnaire.id, "Dokter", 1, QuestionType::Scale)
        .await;
    let yes_no = factory
        .create_question(questionnaire.id, "Fasilitas", 2, QuestionType::YesNoText)
        .await;

    factory
        .create_response(
            questionnaire.id,
            "Siti, S.Pd",
            "Guru",
            None,
            vec![(
                yes_no.id,
                r#"{"choice":"Ya","keterangan":"bersih"}"#.to_string(),
            )],
        )
        .await;

    let response = app
        .server
        .get(&format!(
            "/api/admin/questionnaires/{}/raw-data/export",
            questionnaire.id
        ))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "text/csv; charset=utf-8"
    );
    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"data_responden_"));
    assert!(disposition.ends_with(".csv\""));

    let csv = response.text();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        format!(
            "Waktu Submit,Nama,Usia,Jenis Kelamin,Pekerjaan,Jaminan,{},{}",
            scale.text, yes_no.text
        )
    );
    assert!(lines[1].contains(",\"Siti, S.Pd\",30,Perempuan,Guru,BPJS,N/A,Ya (Ket: bersih)"));
}

#[tokio::test]
async fn test_export_empty_questionnaire() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let questionnaire = factory.create_questionnaire().await;

    let response = app
        .server
        .get(&format!(
            "/api/admin/questionnaires/{}/raw-data/export",
            questionnaire.id
        ))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), "");
}

#[tokio::test]
async fn test_suggestions_skip_empty_and_filter() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let questionnaire = factory.create_questionnaire().await;

    factory
        .create_response(questionnaire.id, "Andi", "Guru", Some("Parkir sempit"), vec![])
        .await;
    factory
        .create_response(questionnaire.id, "Budi", "Petani", Some("Antrian lama"), vec![])
        .await;
    factory
        .create_response(questionnaire.id, "Citra", "Guru", Some(""), vec![])
        .await;
    factory
        .create_response(questionnaire.id, "Dewi", "Guru", None, vec![])
        .await;

    let response = app
        .server
        .get(&format!(
            "/api/admin/questionnaires/{}/suggestions?jenis_kelamin=Semua",
            questionnaire.id
        ))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let saran: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["saran"].as_str().unwrap())
        .collect();
    // Newest first
    assert_eq!(saran, vec!["Antrian lama", "Parkir sempit"]);
    assert!(body["filter"]["jenis_kelamin"].is_null());

    let response = app
        .server
        .get(&format!(
            "/api/admin/questionnaires/{}/suggestions?pekerjaan=Petani",
            questionnaire.id
        ))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["nama"], "Budi");
}

#[tokio::test]
async fn test_suggestions_outside_range() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let questionnaire = factory.create_questionnaire().await;

    factory
        .create_response(questionnaire.id, "Andi", "Guru", Some("Parkir sempit"), vec![])
        .await;

    let response = app
        .server
        .get(&format!(
            "/api/admin/questionnaires/{}/suggestions?start_date=2020-01-01&end_date=2020-01-31",
            questionnaire.id
        ))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["filter"]["start_date"], "2020-01-01");
}

#[tokio::test]
async fn test_overview_radar_and_heatmap() {
    let app = TestApp::new().await;
    install_aggregate_functions(&app.state.db).await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let questionnaire = factory.create_questionnaire().await;
    let dokter = factory
        .create_question(questionnaire.id, "Dokter", 1, QuestionType::Scale)
        .await;
    let perawat = factory
        .create_question(questionnaire.id, "Perawat", 2, QuestionType::Scale)
        .await;
    let fasilitas = factory
        .create_question(questionnaire.id, "Fasilitas", 3, QuestionType::YesNoText)
        .await;

    factory
        .create_response(
            questionnaire.id,
            "Andi",
            "Guru",
            None,
            vec![(dokter.id, "4".to_string()), (fasilitas.id, choice("Ya"))],
        )
        .await;
    factory
        .create_response(
            questionnaire.id,
            "Budi",
            "Petani",
            None,
            vec![(dokter.id, "5".to_string()), (fasilitas.id, choice("Tidak"))],
        )
        .await;

    let response = app
        .server
        .get(&format!("/api/admin/questionnaires/{}/overview", questionnaire.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["stats"]["total_responden"], 2);

    let heatmap = body["heatmap"].as_array().unwrap();
    assert_eq!(heatmap.len(), 2);
    assert_eq!(heatmap[0]["question_id"], dokter.id.to_string());
    assert_eq!(heatmap[0]["puas"], 1);
    assert_eq!(heatmap[0]["sangat_puas"], 1);
    // No answers at all: the SQL sums are NULL
    assert_eq!(heatmap[1]["question_id"], perawat.id.to_string());
    assert_eq!(heatmap[1]["sangat_tidak_puas"], 0);

    let radar = body["radar"].as_array().unwrap();
    assert_eq!(radar.len(), 2);
    assert_eq!(radar[0]["subject"], dokter.text);
    assert_eq!(radar[0]["score"].as_f64(), Some(4.5));
    assert_eq!(radar[0]["full_mark"], 5);
    assert_eq!(radar[1]["score"].as_f64(), Some(0.0));

    // Filters reach the database functions
    let response = app
        .server
        .get(&format!(
            "/api/admin/questionnaires/{}/overview?pekerjaan=Petani",
            questionnaire.id
        ))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["filter"]["pekerjaan"], "Petani");
    assert_eq!(body["stats"]["total_responden"], 1);
    assert_eq!(body["radar"][0]["score"].as_f64(), Some(5.0));
}

#[tokio::test]
async fn test_demographics_charts() {
    let app = TestApp::new().await;
    install_aggregate_functions(&app.state.db).await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let questionnaire = factory.create_questionnaire().await;

    for input in [
        respondent("Andi", 22, "Laki-laki", "Guru", "Umum"),
        respondent("Sari", 30, "Perempuan", "Guru", "BPJS"),
        respondent("Wati", 51, "Perempuan", "Petani", "BPJS"),
    ] {
        factory
            .create_response_from(questionnaire.id, input, vec![])
            .await;
    }

    let response = app
        .server
        .get(&format!("/api/admin/questionnaires/{}/demographics", questionnaire.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    let charts = body["charts"].as_array().unwrap();
    let titles: Vec<_> = charts.iter().map(|c| c["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Jenis Kelamin", "Rentang Usia", "Pekerjaan", "Jaminan"]);

    assert_eq!(bar(&charts[0]["data"], "Laki-laki"), Some(1));
    assert_eq!(bar(&charts[0]["data"], "Perempuan"), Some(2));
    assert_eq!(charts[1]["data"].as_array().unwrap().len(), 3);
    assert_eq!(bar(&charts[1]["data"], ">45"), Some(1));
    assert_eq!(bar(&charts[2]["data"], "Guru"), Some(2));
    assert_eq!(bar(&charts[2]["data"], "Petani"), Some(1));
    assert_eq!(bar(&charts[3]["data"], "BPJS"), Some(2));
    assert_eq!(bar(&charts[3]["data"], "Umum"), Some(1));
}

#[tokio::test]
async fn test_details_grouped_by_label() {
    let app = TestApp::new().await;
    install_aggregate_functions(&app.state.db).await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let questionnaire = factory.create_questionnaire().await;
    let ramah = factory
        .create_question(questionnaire.id, "Dokter", 1, QuestionType::Scale)
        .await;
    let jelas = factory
        .create_question(questionnaire.id, "Dokter", 2, QuestionType::Scale)
        .await;
    let bersih = factory
        .create_question(questionnaire.id, "Fasilitas", 3, QuestionType::YesNoText)
        .await;

    factory
        .create_response(
            questionnaire.id,
            "Andi",
            "Guru",
            None,
            vec![(ramah.id, "4".to_string()), (bersih.id, choice("Ya"))],
        )
        .await;
    factory
        .create_response(
            questionnaire.id,
            "Budi",
            "Guru",
            None,
            vec![(ramah.id, "4".to_string()), (bersih.id, choice("Tidak"))],
        )
        .await;

    let response = app
        .server
        .get(&format!("/api/admin/questionnaires/{}/details", questionnaire.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    let groups = body["groups"].as_array().unwrap();
    let labels: Vec<_> = groups.iter().map(|g| g["label"].as_str().unwrap()).collect();
    assert_eq!(labels, vec!["Dokter", "Fasilitas"]);

    let dokter = groups[0]["charts"].as_array().unwrap();
    assert_eq!(dokter.len(), 2);
    assert_eq!(dokter[0]["question_id"], ramah.id.to_string());
    assert_eq!(bar(&dokter[0]["data"], "Puas"), Some(2));
    assert_eq!(dokter[1]["question_id"], jelas.id.to_string());
    assert!(dokter[1]["data"].as_array().unwrap().is_empty());

    let fasilitas = &groups[1]["charts"][0];
    assert_eq!(fasilitas["question_type"], "yes_no_text");
    assert_eq!(bar(&fasilitas["data"], "Ya"), Some(1));
    assert_eq!(bar(&fasilitas["data"], "Tidak"), Some(1));
}
