//! HTTP handler functions for the risk prevalence API.

use std::sync::PoisonError;

use actix_files::NamedFile;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use risk_prevalence_locale::normalize_locale;
use risk_prevalence_location::{
    DatasetSource, SelectionError, location_set, restore_on_mount, select_sub, select_sub_sub,
    select_top, set_manual_entry, show_sub_location, show_sub_sub_location, sub_prompt_type,
    subdivision_options,
};
use risk_prevalence_location_models::{CascadeLevel, LocationTable, PrevalenceForm};
use risk_prevalence_server_models::{
    ApiHealth, ManualRequest, OptionsQueryParams, PrevalenceResponse, RestoreRequest,
    SelectRequest,
};

use crate::AppState;

fn prevalence_response(form: PrevalenceForm, table: &LocationTable) -> PrevalenceResponse {
    PrevalenceResponse {
        show_sub_location: show_sub_location(&form, table),
        show_sub_sub_location: show_sub_sub_location(&form, table),
        location_set: location_set(&form, table),
        sub_prompt_type: sub_prompt_type(&form, table),
        form,
    }
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        location_count: state.table.len(),
    })
}

/// `GET /api/locations/options`
///
/// Returns the top-level picker options for the requested locale.
pub async fn location_options(
    state: web::Data<AppState>,
    params: web::Query<OptionsQueryParams>,
) -> HttpResponse {
    let locale = params
        .locale
        .as_deref()
        .map_or_else(|| state.default_locale.clone(), normalize_locale);

    let mut cache = state
        .options
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let options = cache.get_or_build(
        AppState::DATASET_VERSION,
        &state.table,
        state.locales.as_ref(),
        &locale,
    );

    HttpResponse::Ok().json(options)
}

/// `GET /api/locations/{key}/subdivisions`
///
/// Returns the subdivisions of a location, sorted by label.
pub async fn subdivisions(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let key = path.into_inner();
    match subdivision_options(&state.table, &key) {
        Some(options) => HttpResponse::Ok().json(options),
        None => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Unknown location: {key}")
        })),
    }
}

/// `POST /api/prevalence/select`
///
/// Applies a picker change and returns the replacement form.
pub async fn select(state: web::Data<AppState>, body: web::Json<SelectRequest>) -> HttpResponse {
    let SelectRequest { form, level, value } = body.into_inner();
    let now = Utc::now();
    let table = state.table.as_ref();

    let result: Result<PrevalenceForm, SelectionError> = match level {
        CascadeLevel::Top => Ok(select_top(&form, table, value.as_deref(), now)),
        CascadeLevel::Sub => select_sub(&form, table, value.as_deref(), now),
        CascadeLevel::SubSub => select_sub_sub(&form, table, value.as_deref(), now),
    };

    match result {
        Ok(next) => HttpResponse::Ok().json(prevalence_response(next, table)),
        Err(e) => {
            log::warn!("Rejected {level} selection: {e}");
            HttpResponse::UnprocessableEntity().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
    }
}

/// `POST /api/prevalence/manual`
///
/// Turns manual entry on or off.
pub async fn manual(state: web::Data<AppState>, body: web::Json<ManualRequest>) -> HttpResponse {
    let ManualRequest { form, manual } = body.into_inner();
    let next = set_manual_entry(&form, &state.table, manual, Utc::now());
    HttpResponse::Ok().json(prevalence_response(next, &state.table))
}

/// `POST /api/prevalence/restore`
///
/// Refreshes a stored form's figures from the loaded dataset. Forms in
/// manual mode or without a selection come back unchanged.
pub async fn restore(state: web::Data<AppState>, body: web::Json<RestoreRequest>) -> HttpResponse {
    let RestoreRequest { form } = body.into_inner();
    let next = restore_on_mount(&form, &state.table, Utc::now()).unwrap_or(form);
    HttpResponse::Ok().json(prevalence_response(next, &state.table))
}

/// `GET /location.json`
///
/// Serves the dataset file when it was loaded from the local filesystem.
pub async fn dataset_file(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let DatasetSource::Path(path) = &state.dataset else {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": "Dataset is not served locally"
        }));
    };

    match NamedFile::open_async(path).await {
        Ok(file) => file.into_response(&req),
        Err(e) => {
            log::error!("Failed to open {}: {e}", path.display());
            HttpResponse::NotFound().json(serde_json::json!({
                "error": "Dataset file not found"
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use risk_prevalence_location_models::{LocationOption, LocationRecord, PrevalenceData};
    use serde_json::Value;

    use super::*;
    use crate::{ServerConfig, configure};

    fn record(label: &str, cases: i64, group: Option<&str>, subs: &[&str]) -> LocationRecord {
        LocationRecord {
            label: label.into(),
            iso3: None,
            population: "1,000".into(),
            cases_past_week: cases,
            cases_increasing_percentage: 0.0,
            positive_case_percentage: None,
            top_level_group: group.map(String::from),
            subdivisions: subs.iter().map(|s| (*s).to_string()).collect(),
            incomplete_vaccinations: None,
            complete_vaccinations: None,
            unvaccinated_prevalence_ratio: None,
            average_fully_vaccinated_multiplier: None,
            updated_at: "2022-01-10T00:00:00Z".into(),
        }
    }

    fn state(dataset: &str) -> web::Data<AppState> {
        let table: LocationTable = [
            (
                "US_13",
                record("Georgia", 700, Some("US states"), &["US_13_121", "US_13_089"]),
            ),
            ("US_13_121", record("Fulton", 70, None, &[])),
            ("US_13_089", record("DeKalb", 60, None, &[])),
            (
                "Georgia",
                LocationRecord {
                    iso3: Some("GEO".into()),
                    ..record("Georgia", 30, Some("Countries"), &[])
                },
            ),
        ]
        .into_iter()
        .map(|(k, r)| (k.to_string(), r))
        .collect();
        let config = ServerConfig {
            dataset: dataset.to_string(),
            ..ServerConfig::default()
        };
        web::Data::new(AppState::new(table, &config))
    }

    fn form() -> Value {
        serde_json::to_value(PrevalenceForm::new(PrevalenceData::absent(Utc::now()))).unwrap()
    }

    #[actix_web::test]
    async fn health_reports_location_count() {
        let app =
            test::init_service(App::new().app_data(state("x.json")).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["locationCount"], 4);
    }

    #[actix_web::test]
    async fn options_disambiguate_georgia() {
        let app =
            test::init_service(App::new().app_data(state("x.json")).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/locations/options?locale=en-US")
            .to_request();
        let options: Vec<LocationOption> = test::call_and_read_body_json(&app, req).await;
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Georgia (US state)", "Georgia (country)"]);
    }

    #[actix_web::test]
    async fn subdivisions_are_sorted_and_unknown_key_is_404() {
        let app =
            test::init_service(App::new().app_data(state("x.json")).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/api/locations/US_13/subdivisions")
            .to_request();
        let options: Vec<LocationOption> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(options[0].label, "DeKalb");
        assert_eq!(options[1].label, "Fulton");

        let req = test::TestRequest::get()
            .uri("/api/locations/Atlantis/subdivisions")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn select_resolves_and_rejects_orphan_levels() {
        let app =
            test::init_service(App::new().app_data(state("x.json")).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/prevalence/select")
            .set_json(serde_json::json!({ "form": form(), "level": "top", "value": "US_13" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["form"]["topLocation"], "US_13");
        assert_eq!(body["form"]["casesPastWeek"], 700);
        assert_eq!(body["showSubLocation"], true);
        assert_eq!(body["subPromptType"], "US");

        let req = test::TestRequest::post()
            .uri("/api/prevalence/select")
            .set_json(serde_json::json!({
                "form": body["form"],
                "level": "sub",
                "value": "US_13_121",
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["form"]["casesPastWeek"], 70);

        let req = test::TestRequest::post()
            .uri("/api/prevalence/select")
            .set_json(serde_json::json!({ "form": form(), "level": "subSub", "value": "X" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 422);
    }

    #[actix_web::test]
    async fn select_accepts_form_without_figures() {
        let app =
            test::init_service(App::new().app_data(state("x.json")).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/prevalence/select")
            .set_json(serde_json::json!({
                "form": { "topLocation": "" },
                "level": "top",
                "value": "Georgia",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["form"]["topLocation"], "Georgia");
        assert_eq!(body["form"]["casesPastWeek"], 30);
        assert_eq!(body["locationSet"], true);
    }

    #[actix_web::test]
    async fn manual_toggle_round_trip() {
        let app =
            test::init_service(App::new().app_data(state("x.json")).configure(configure)).await;
        let mut start = form();
        start["topLocation"] = "Georgia".into();
        start["casesPastWeek"] = serde_json::json!(5);

        let req = test::TestRequest::post()
            .uri("/api/prevalence/manual")
            .set_json(serde_json::json!({ "form": start, "manual": true }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["form"]["useManualEntry"], true);
        assert_eq!(body["form"]["casesPastWeek"], 5);
        assert_eq!(body["locationSet"], false);

        let req = test::TestRequest::post()
            .uri("/api/prevalence/manual")
            .set_json(serde_json::json!({ "form": body["form"], "manual": false }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["form"]["useManualEntry"], false);
        assert_eq!(body["form"]["casesPastWeek"], 30);
    }

    #[actix_web::test]
    async fn restore_refreshes_stored_selection() {
        let app =
            test::init_service(App::new().app_data(state("x.json")).configure(configure)).await;
        let mut stored = form();
        stored["topLocation"] = "US_13".into();
        stored["subLocation"] = "US_13_089".into();
        stored["riskProfile"] = "average".into();

        let req = test::TestRequest::post()
            .uri("/api/prevalence/restore")
            .set_json(serde_json::json!({ "form": stored }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["form"]["casesPastWeek"], 60);
        assert_eq!(body["form"]["riskProfile"], "average");
    }

    #[actix_web::test]
    async fn remote_dataset_is_not_served() {
        let app = test::init_service(
            App::new()
                .app_data(state("https://example.com/location.json"))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/location.json").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }
}
