use crate::request::{Body, GENERATE_RESUME_PATH, HttpRequest, join_url};
use resumegen_core::fields::FORM_FIELDS;
use resumegen_core::types::FormData;
use serde_json::{Map, Value};

pub fn build_generate_resume_request(base_url: &str, form: &FormData) -> HttpRequest {
    HttpRequest::post(
        join_url(base_url, GENERATE_RESUME_PATH),
        Body::Json(generation_payload(form).to_string()),
    )
    .with_header("Content-Type", "application/json")
    .with_header("Accept", "application/json")
}

/// JSON object with every known field (empty when unset) plus any extra form keys.
pub fn generation_payload(form: &FormData) -> Value {
    let mut payload = Map::new();
    for field in FORM_FIELDS {
        payload.insert(field.name.into(), Value::String(form.get(field.name).into()));
    }
    for (k, v) in form.iter() {
        payload.insert(k.into(), Value::String(v.into()));
    }
    Value::Object(payload)
}
