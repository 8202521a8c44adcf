use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use std::{fmt::Write, sync::Arc};

use crate::{
    inputs::{SliderRange, TrafficInputs, DAY_OF_WEEK, SEVERITY, START_HOUR},
    predictor::{AppContext, StartupBanner},
    weather::WEATHER_CONDITIONS,
};

// ---------- Request/Response types ----------

/// Raw form post. Missing keys fall back to the form defaults.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct PredictionForm {
    pub distance: f64,
    pub severity: i64,
    pub temperature: f64,
    pub congestion_speed: f64,
    pub start_hour: i64,
    pub visibility: f64,
    pub delay_typical: f64,
    pub day_of_week: i64,
    pub weather: String,
}

impl Default for PredictionForm {
    fn default() -> Self {
        let d = TrafficInputs::default();
        Self {
            distance: d.distance_mi,
            severity: d.severity as i64,
            temperature: d.temperature_f,
            congestion_speed: d.congestion_speed_mph,
            start_hour: d.start_hour as i64,
            visibility: d.visibility_mi,
            delay_typical: d.delay_typical_mins,
            day_of_week: d.day_of_week as i64,
            weather: d.weather,
        }
    }
}

impl PredictionForm {
    /// Sliders are pulled into their range; everything else goes through as sent.
    pub fn into_inputs(self) -> TrafficInputs {
        TrafficInputs {
            distance_mi: self.distance,
            severity: SEVERITY.clamp(self.severity),
            temperature_f: self.temperature,
            congestion_speed_mph: self.congestion_speed,
            start_hour: START_HOUR.clamp(self.start_hour),
            visibility_mi: self.visibility,
            delay_typical_mins: self.delay_typical,
            day_of_week: DAY_OF_WEEK.clamp(self.day_of_week),
            weather: self.weather,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Succeeded(f64),
    Failed(String),
}

// ---------- Router ----------

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit))
        .with_state(ctx)
}

// ---------- Handlers ----------

pub async fn show_form(State(ctx): State<Arc<AppContext>>) -> Html<String> {
    Html(render_page(
        &ctx.banner(),
        &TrafficInputs::default(),
        None,
    ))
}

pub async fn submit(
    State(ctx): State<Arc<AppContext>>,
    form: Result<Form<PredictionForm>, FormRejection>,
) -> Html<String> {
    // A cleared number box posts `name=`; answer with the page, not a bare 422.
    let inputs = match form {
        Ok(Form(form)) => form.into_inputs(),
        Err(rejection) => {
            let reason = rejection.body_text();
            tracing::warn!("form rejected: {}", reason);
            let outcome = Outcome::Failed(format!("Invalid input: {reason}"));
            return Html(render_page(&ctx.banner(), &TrafficInputs::default(), Some(&outcome)));
        }
    };

    if !ctx.can_predict() {
        tracing::warn!("prediction requested but no model is loaded");
        return Html(render_page(&ctx.banner(), &inputs, None));
    }

    let outcome = match ctx.predict(&inputs) {
        Ok(mins) => {
            tracing::info!("predicted duration {:.2} mins", mins);
            Outcome::Succeeded(mins)
        }
        Err(e) => {
            tracing::warn!("prediction failed: {}", e);
            Outcome::Failed(format!("Prediction failed: {e}"))
        }
    };

    Html(render_page(&ctx.banner(), &inputs, Some(&outcome)))
}

// ---------- Rendering ----------

pub fn format_duration(mins: f64) -> String {
    format!("{mins:.2} mins")
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const STYLE: &str = "body{font-family:sans-serif;margin:0;background:#f1f5f9}\
.page{max-width:1100px;margin:0 auto;padding:20px}\
.header-box{background:#1e3a8a;color:#fff;padding:32px 20px;border-radius:16px;text-align:center;margin-bottom:24px}\
.header-title{margin:0;font-size:36px}.header-sub{margin-top:10px;opacity:.9}\
.banner{padding:12px 16px;border-radius:8px;margin-bottom:16px}\
.banner.ok{background:#dcfce7;color:#166534}.banner.err{background:#fee2e2;color:#991b1b}\
.cols{display:flex;gap:24px}.col{flex:1}.col label{display:block;margin:12px 0 4px}\
.col input,.col select{width:100%}\
button{background:#2563eb;color:#fff;border:none;border-radius:10px;padding:.8rem 1.4rem;font-size:18px;width:100%;margin-top:20px}\
button:disabled{background:#94a3b8}\
.pred-card{background:#fff;border-left:6px solid #2563eb;padding:25px;border-radius:12px;margin-top:20px}\
.pred-card h1{color:#2563eb}";

fn number_input(out: &mut String, name: &str, label: &str, value: f64) {
    let _ = write!(
        out,
        r#"<label for="{name}">{label}</label><input type="number" step="any" id="{name}" name="{name}" value="{value}">"#,
        label = escape_html(label),
    );
}

fn slider(out: &mut String, name: &str, label: &str, range: SliderRange, value: u8) {
    let _ = write!(
        out,
        r#"<label for="{name}">{label}: <output>{value}</output></label><input type="range" id="{name}" name="{name}" min="{min}" max="{max}" step="1" value="{value}" oninput="this.previousElementSibling.firstElementChild.value=this.value">"#,
        label = escape_html(label),
        min = range.min,
        max = range.max,
    );
}

fn weather_select(out: &mut String, selected: &str) {
    out.push_str(r#"<label for="weather">Weather Conditions</label><select id="weather" name="weather">"#);
    for label in WEATHER_CONDITIONS {
        let sel = if label == selected { " selected" } else { "" };
        let label = escape_html(label);
        let _ = write!(out, r#"<option value="{label}"{sel}>{label}</option>"#);
    }
    out.push_str("</select>");
}

/// Whole page: banner, the three input columns, the button and, after a
/// submission, either the result card or the failure message.
pub fn render_page(banner: &StartupBanner, inputs: &TrafficInputs, outcome: Option<&Outcome>) -> String {
    let mut out = String::with_capacity(8 * 1024);
    let _ = write!(
        out,
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>Traffic Duration Predictor</title><style>{STYLE}</style></head><body><div class="page">"#
    );
    out.push_str(
        r#"<div class="header-box"><h1 class="header-title">Traffic Duration Prediction</h1><p class="header-sub">Predict accurate travel time using traffic, road &amp; weather conditions</p></div>"#,
    );

    let class = if banner.is_ok() { "ok" } else { "err" };
    let _ = write!(
        out,
        r#"<div class="banner {class}" id="banner">{}</div>"#,
        escape_html(&banner.message())
    );

    out.push_str(r#"<h3>Input Parameters</h3><form method="post" action="/"><div class="cols">"#);

    out.push_str(r#"<div class="col">"#);
    number_input(&mut out, "distance", "Distance (mi)", inputs.distance_mi);
    slider(&mut out, "severity", "Severity (0–4)", SEVERITY, inputs.severity);
    number_input(&mut out, "temperature", "Temperature (F)", inputs.temperature_f);
    out.push_str("</div>");

    out.push_str(r#"<div class="col">"#);
    number_input(&mut out, "congestion_speed", "Congestion Speed (mph)", inputs.congestion_speed_mph);
    slider(&mut out, "start_hour", "Start Hour", START_HOUR, inputs.start_hour);
    number_input(&mut out, "visibility", "Visibility (mi)", inputs.visibility_mi);
    out.push_str("</div>");

    out.push_str(r#"<div class="col">"#);
    number_input(&mut out, "delay_typical", "Delay From Typical Traffic (mins)", inputs.delay_typical_mins);
    slider(&mut out, "day_of_week", "Day of Week (0=Monday)", DAY_OF_WEEK, inputs.day_of_week);
    weather_select(&mut out, &inputs.weather);
    out.push_str("</div>");

    out.push_str("</div><h3>Prediction</h3>");
    let disabled = if banner.is_ok() { "" } else { " disabled" };
    let _ = write!(out, r#"<button type="submit"{disabled}>Predict Duration (mins)</button></form>"#);

    match outcome {
        Some(Outcome::Succeeded(mins)) => {
            let _ = write!(
                out,
                r#"<div class="pred-card" id="result"><h3>Predicted Duration</h3><h1>{}</h1></div>"#,
                format_duration(*mins)
            );
        }
        Some(Outcome::Failed(msg)) => {
            let _ = write!(
                out,
                r#"<div class="banner err" id="result">{}</div>"#,
                escape_html(msg)
            );
        }
        None => {}
    }

    out.push_str("</div></body></html>");
    out
}
