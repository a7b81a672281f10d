//! Public site pages
//!
//! Server-rendered views over the backend and the external providers.
//! Everything here is read-only except the prayer wall (submit and
//! like) and the two intake forms. Provider or backend failures
//! degrade to empty lists; the page always renders.

use axum::{
    extract::{Form, Path, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::str::FromStr;

use super::middleware::{extract_cookie_from_headers, ApiError, AppState, LANG_COOKIE};
use crate::models::{CreatePrayerInput, FaqCategory, NationalEvent, PrayerCategory, UpdateCategory};
use crate::provider::events::{matches_category, partition_events};
use crate::provider::locations::{group_by_province, MOZAMBIQUE_PROVINCES};
use crate::services::geo::sort_by_distance;
use crate::services::locale::{bundle, Lang};
use crate::services::translator::translate_dynamic;

/// Build the public pages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/history", get(history))
        .route("/events", get(events))
        .route("/locations", get(locations))
        .route("/faq", get(faq))
        .route("/updates", get(updates))
        .route("/prayer-wall", get(prayer_wall).post(submit_prayer))
        .route("/prayer-wall/{id}/like", post(like_prayer))
        .route("/counselling", get(counselling).post(submit_counselling))
        .route("/receive-jesus", get(receive_jesus).post(submit_decision))
        .route("/contact", get(contact))
        .route("/lang/{code}", get(switch_lang))
}

/// Support types offered on the counselling intake form.
pub const SUPPORT_TYPES: &[(&str, &str, &str)] = &[
    ("spiritual", "Spiritual Guidance", "Faith questions, spiritual growth, biblical understanding"),
    ("marital", "Marital Counselling", "Marriage support, relationship guidance, family planning"),
    ("family", "Family Support", "Parenting, family conflicts, generational issues"),
    ("grief", "Grief Support", "Loss of loved ones, processing grief, finding hope"),
    ("general", "General Life Counselling", "Life decisions, personal challenges, guidance"),
];

/// Country calling codes for the phone field, Mozambique first.
pub const COUNTRY_CODES: &[(&str, &str, &str)] = &[
    ("MZ", "Mozambique", "+258"),
    ("ZA", "South Africa", "+27"),
    ("ZW", "Zimbabwe", "+263"),
    ("MW", "Malawi", "+265"),
    ("TZ", "Tanzania", "+255"),
    ("ZM", "Zambia", "+260"),
    ("SZ", "Eswatini", "+268"),
    ("BW", "Botswana", "+267"),
    ("AO", "Angola", "+244"),
    ("PT", "Portugal", "+351"),
    ("BR", "Brazil", "+55"),
    ("GB", "United Kingdom", "+44"),
    ("US", "United States", "+1"),
    ("FR", "France", "+33"),
    ("DE", "Germany", "+49"),
    ("KE", "Kenya", "+254"),
    ("NG", "Nigeria", "+234"),
    ("IN", "India", "+91"),
    ("CN", "China", "+86"),
    ("AU", "Australia", "+61"),
];

fn lang_from_headers(headers: &HeaderMap) -> Lang {
    extract_cookie_from_headers(headers, LANG_COOKIE)
        .and_then(|v| Lang::from_str(&v).ok())
        .unwrap_or_default()
}

/// Base template context shared by every page.
fn base_context(lang: Lang, path: &str) -> tera::Context {
    let mut ctx = tera::Context::new();
    ctx.insert("t", bundle(lang));
    ctx.insert("lang", &lang.to_string());
    ctx.insert("path", path);
    ctx
}

fn render(state: &AppState, template: &str, ctx: &tera::Context) -> Result<Html<String>, ApiError> {
    state.tera.render(template, ctx).map(Html).map_err(|e| {
        tracing::error!(template, error = %e, "template rendering failed");
        ApiError::internal_error("Page failed to render")
    })
}

/// GET /lang/{code} - switch the UI language and bounce back.
async fn switch_lang(
    Path(code): Path<String>,
    Query(query): Query<NextQuery>,
) -> Response {
    let lang = Lang::from_str(&code).unwrap_or_default();
    let next = query.next.unwrap_or_else(|| "/".to_string());
    // Only same-site relative targets; anything else goes home.
    let next = if next.starts_with('/') && !next.starts_with("//") {
        next
    } else {
        "/".to_string()
    };

    let mut response = Redirect::to(&next).into_response();
    if let Ok(cookie) =
        axum::http::HeaderValue::from_str(&format!("{}={}; Path=/; SameSite=Lax", LANG_COOKIE, lang))
    {
        response
            .headers_mut()
            .insert(axum::http::header::SET_COOKIE, cookie);
    }
    response
}

#[derive(Debug, Deserialize)]
struct NextQuery {
    next: Option<String>,
}

// ============================================================================
// Home / static pages
// ============================================================================

/// Event as the templates consume it: dynamic text already localized,
/// date split for the card badge.
#[derive(Debug, Serialize)]
struct EventView {
    id: i64,
    title: String,
    category: Option<String>,
    location: Option<String>,
    description: Option<String>,
    start_date: String,
    day: u32,
    month: String,
    year: i32,
    is_past: bool,
}

impl EventView {
    fn build(event: &NationalEvent, lang: Lang, is_past: bool) -> Self {
        let month = lang.month_names()[event.start_date.month0() as usize];
        Self {
            id: event.id,
            title: translate_dynamic(&event.title, lang),
            category: event
                .category
                .as_deref()
                .map(|c| translate_dynamic(c, lang)),
            location: event
                .location
                .as_deref()
                .map(|l| translate_dynamic(l, lang)),
            description: event
                .description
                .as_deref()
                .map(|d| translate_dynamic(d, lang)),
            start_date: event.start_date.to_string(),
            day: event.start_date.day(),
            month: month.chars().take(3).collect(),
            year: event.start_date.year(),
            is_past,
        }
    }
}

/// GET /
async fn home(State(state): State<AppState>, headers: HeaderMap) -> Result<Html<String>, ApiError> {
    let lang = lang_from_headers(&headers);
    let mut ctx = base_context(lang, "/");

    let plan = state.events_provider.load().await;
    let today = Utc::now().date_naive();
    let (upcoming, _) = partition_events(&plan, today);
    let strip: Vec<EventView> = upcoming
        .iter()
        .take(3)
        .map(|e| EventView::build(e, lang, false))
        .collect();
    ctx.insert("events", &strip);

    render(&state, "home.html", &ctx)
}

/// GET /about
async fn about(State(state): State<AppState>, headers: HeaderMap) -> Result<Html<String>, ApiError> {
    let lang = lang_from_headers(&headers);
    let ctx = base_context(lang, "/about");
    render(&state, "about.html", &ctx)
}

/// GET /contact
async fn contact(State(state): State<AppState>, headers: HeaderMap) -> Result<Html<String>, ApiError> {
    let lang = lang_from_headers(&headers);
    let ctx = base_context(lang, "/contact");
    render(&state, "contact.html", &ctx)
}

/// GET /history
async fn history(State(state): State<AppState>, headers: HeaderMap) -> Result<Html<String>, ApiError> {
    let lang = lang_from_headers(&headers);
    let mut ctx = base_context(lang, "/history");

    let events = match state.history.list().await {
        Ok(events) => events,
        Err(e) => {
            tracing::error!(error = %e, "history fetch failed");
            Vec::new()
        }
    };

    #[derive(Serialize)]
    struct YearGroup {
        year: i32,
        events: Vec<crate::models::HistoryEvent>,
    }
    let groups: Vec<YearGroup> = crate::models::history::timeline(events)
        .into_iter()
        .map(|(year, events)| YearGroup { year, events })
        .collect();
    ctx.insert("timeline", &groups);

    render(&state, "history.html", &ctx)
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Deserialize)]
struct EventsQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// GET /events
async fn events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<EventsQuery>,
) -> Result<Html<String>, ApiError> {
    let lang = lang_from_headers(&headers);
    let mut ctx = base_context(lang, "/events");

    let plan = state.events_provider.load().await;
    let chip = query.category.as_deref().unwrap_or("all");
    let needle = query.q.as_deref().unwrap_or("").to_lowercase();

    let filtered: Vec<NationalEvent> = plan
        .iter()
        .filter(|e| matches_category(e, chip))
        .filter(|e| needle.is_empty() || e.search_text().contains(&needle))
        .cloned()
        .collect();

    let today = Utc::now().date_naive();
    let (upcoming, past) = partition_events(&filtered, today);

    let upcoming: Vec<EventView> = upcoming.iter().map(|e| EventView::build(e, lang, false)).collect();
    let past: Vec<EventView> = past.iter().map(|e| EventView::build(e, lang, true)).collect();

    ctx.insert("upcoming", &upcoming);
    ctx.insert("past", &past);
    ctx.insert("active_category", chip);
    ctx.insert("query", &needle);
    ctx.insert(
        "categories",
        &["all", "conferences", "executive", "seminars", "training", "workshops", "youth"],
    );

    render(&state, "events.html", &ctx)
}

// ============================================================================
// Locations
// ============================================================================

#[derive(Debug, Deserialize)]
struct LocationsQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    province: Option<String>,
    /// Visitor coordinates for nearest-first sorting
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// GET /locations
async fn locations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LocationsQuery>,
) -> Result<Html<String>, ApiError> {
    let lang = lang_from_headers(&headers);
    let mut ctx = base_context(lang, "/locations");

    let directory = state.locations_provider.load().await;
    let needle = query.q.as_deref().unwrap_or("").to_lowercase();
    let province = query.province.as_deref().unwrap_or("all");

    let mut filtered: Vec<_> = directory
        .iter()
        .filter(|l| {
            province == "all"
                || l.province
                    .as_deref()
                    .map(|p| p.eq_ignore_ascii_case(province))
                    .unwrap_or(false)
        })
        .filter(|l| needle.is_empty() || l.search_text().contains(&needle))
        .cloned()
        .collect();

    let sorted_by_distance = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => {
            sort_by_distance(&mut filtered, (lat, lon));
            true
        }
        _ => false,
    };

    #[derive(Serialize)]
    struct ProvinceGroup {
        province: String,
        churches: Vec<crate::models::ChurchLocation>,
    }
    let groups: Vec<ProvinceGroup> = group_by_province(&filtered)
        .into_iter()
        .map(|(province, churches)| ProvinceGroup { province, churches })
        .collect();

    ctx.insert("groups", &groups);
    ctx.insert("locations", &filtered);
    ctx.insert("provinces", MOZAMBIQUE_PROVINCES);
    ctx.insert("active_province", province);
    ctx.insert("query", &needle);
    ctx.insert("sorted_by_distance", &sorted_by_distance);

    render(&state, "locations.html", &ctx)
}

// ============================================================================
// FAQ
// ============================================================================

#[derive(Debug, Deserialize)]
struct FaqQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// GET /faq
async fn faq(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<FaqQuery>,
) -> Result<Html<String>, ApiError> {
    let lang = lang_from_headers(&headers);
    let mut ctx = base_context(lang, "/faq");

    let mut faqs = match state.faqs.list().await {
        Ok(faqs) => faqs,
        Err(e) => {
            tracing::error!(error = %e, "faq fetch failed");
            Vec::new()
        }
    };
    crate::models::faq::sort_for_display(&mut faqs);

    let category = query.category.as_deref().unwrap_or("All");
    let needle = query.q.as_deref().unwrap_or("").to_lowercase();
    let faqs: Vec<_> = faqs
        .into_iter()
        .filter(|f| category == "All" || f.category.to_string() == category)
        .filter(|f| {
            needle.is_empty()
                || f.question.to_lowercase().contains(&needle)
                || f.answer.to_lowercase().contains(&needle)
        })
        .collect();

    let categories: Vec<String> = FaqCategory::ALL.iter().map(|c| c.to_string()).collect();
    ctx.insert("faqs", &faqs);
    ctx.insert("categories", &categories);
    ctx.insert("active_category", category);
    ctx.insert("query", &needle);

    render(&state, "faq.html", &ctx)
}

// ============================================================================
// Updates (public gallery)
// ============================================================================

#[derive(Debug, Deserialize)]
struct UpdatesQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// GET /updates
async fn updates(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<UpdatesQuery>,
) -> Result<Html<String>, ApiError> {
    let lang = lang_from_headers(&headers);
    let mut ctx = base_context(lang, "/updates");

    let all = match state.updates.list_public().await {
        Ok(updates) => updates,
        Err(e) => {
            tracing::error!(error = %e, "public updates fetch failed");
            Vec::new()
        }
    };

    let needle = query.q.as_deref().unwrap_or("").to_lowercase();
    let category = query.category.as_deref().unwrap_or("all");

    // Only live updates ever reach the public page, whatever the
    // backend happened to return.
    let visible: Vec<_> = all
        .into_iter()
        .filter(|u| u.is_public())
        .filter(|u| category == "all" || u.category.to_string() == category)
        .filter(|u| {
            needle.is_empty()
                || u.title.to_lowercase().contains(&needle)
                || u.description.to_lowercase().contains(&needle)
                || u.category.to_string().contains(&needle)
        })
        .collect();

    let categories: Vec<String> = [
        UpdateCategory::Video,
        UpdateCategory::Announcement,
        UpdateCategory::Newsletter,
        UpdateCategory::Gallery,
        UpdateCategory::Apostle,
    ]
    .iter()
    .map(|c| c.to_string())
    .collect();

    ctx.insert("updates", &visible);
    ctx.insert("categories", &categories);
    ctx.insert("active_category", category);
    ctx.insert("query", &needle);

    render(&state, "updates.html", &ctx)
}

// ============================================================================
// Prayer wall
// ============================================================================

#[derive(Debug, Deserialize)]
struct PrayerWallQuery {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    submitted: Option<bool>,
    #[serde(default)]
    error: Option<bool>,
}

/// GET /prayer-wall
async fn prayer_wall(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PrayerWallQuery>,
) -> Result<Html<String>, ApiError> {
    let lang = lang_from_headers(&headers);
    let mut ctx = base_context(lang, "/prayer-wall");

    let requests = match state.prayers.list_public().await {
        Ok(requests) => requests,
        Err(e) => {
            tracing::error!(error = %e, "prayer wall fetch failed");
            Vec::new()
        }
    };

    let category = query.category.as_deref().unwrap_or("All");
    // Unapproved requests never render, whatever the backend returned.
    let visible: Vec<_> = requests
        .into_iter()
        .filter(|p| p.is_approved)
        .filter(|p| category == "All" || p.category.to_string() == category)
        .collect();

    let categories: Vec<String> = PrayerCategory::ALL.iter().map(|c| c.to_string()).collect();
    ctx.insert("requests", &visible);
    ctx.insert("categories", &categories);
    ctx.insert("active_category", category);
    ctx.insert("submitted", &query.submitted.unwrap_or(false));
    ctx.insert("error", &query.error.unwrap_or(false));

    render(&state, "prayer_wall.html", &ctx)
}

#[derive(Debug, Deserialize)]
struct PrayerForm {
    #[serde(default)]
    author: String,
    category: String,
    content: String,
}

/// POST /prayer-wall - submit a request; it stays off the wall until
/// an admin approves it.
async fn submit_prayer(
    State(state): State<AppState>,
    Form(form): Form<PrayerForm>,
) -> Redirect {
    let category = match PrayerCategory::from_str(&form.category) {
        Ok(category) => category,
        Err(_) => return Redirect::to("/prayer-wall?error=true"),
    };
    if form.content.trim().is_empty() {
        return Redirect::to("/prayer-wall?error=true");
    }

    let author = {
        let trimmed = form.author.trim();
        if trimmed.is_empty() {
            "Anonymous".to_string()
        } else {
            trimmed.to_string()
        }
    };

    let input = CreatePrayerInput {
        author,
        category,
        content: form.content.trim().to_string(),
    };

    match state.prayers.create(input).await {
        Ok(created) => {
            tracing::info!(prayer_id = created.id, "prayer request submitted");
            Redirect::to("/prayer-wall?submitted=true")
        }
        Err(e) => {
            tracing::error!(error = %e, "prayer submission failed");
            Redirect::to("/prayer-wall?error=true")
        }
    }
}

/// POST /prayer-wall/{id}/like - fire-and-forget; a failure changes
/// nothing and the visitor just lands back on the wall.
async fn like_prayer(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    if let Err(e) = state.prayers.like(id).await {
        tracing::warn!(prayer_id = id, error = %e, "prayer like failed");
    }
    Redirect::to("/prayer-wall")
}

// ============================================================================
// Counselling intake
// ============================================================================

/// GET /counselling
async fn counselling(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let lang = lang_from_headers(&headers);
    let mut ctx = base_context(lang, "/counselling");

    let country = state.geoip.country_for(client_ip(&headers)).await;
    let country = if COUNTRY_CODES.iter().any(|(iso, _, _)| *iso == country) {
        country
    } else {
        state.geoip.default_country().to_string()
    };

    insert_counselling_context(&mut ctx, &country);
    ctx.insert("errors", &Vec::<String>::new());
    render(&state, "counselling.html", &ctx)
}

fn insert_counselling_context(ctx: &mut tera::Context, country: &str) {
    #[derive(Serialize)]
    struct SupportType {
        id: &'static str,
        title: &'static str,
        desc: &'static str,
    }
    #[derive(Serialize)]
    struct Country {
        iso: &'static str,
        label: &'static str,
        code: &'static str,
    }

    let support: Vec<SupportType> = SUPPORT_TYPES
        .iter()
        .map(|(id, title, desc)| SupportType { id, title, desc })
        .collect();
    let countries: Vec<Country> = COUNTRY_CODES
        .iter()
        .map(|(iso, label, code)| Country { iso, label, code })
        .collect();

    ctx.insert("support_types", &support);
    ctx.insert("countries", &countries);
    ctx.insert("selected_country", country);
}

/// Best-effort client address for the geo lookup.
fn client_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let forwarded = headers.get("x-forwarded-for")?.to_str().ok()?;
    forwarded.split(',').next()?.trim().parse().ok()
}

#[derive(Debug, Deserialize)]
struct CounsellingForm {
    name: String,
    phone: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    email: String,
    support_type: String,
    message: String,
    #[serde(default)]
    contact_method: String,
}

/// POST /counselling
async fn submit_counselling(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CounsellingForm>,
) -> Result<Html<String>, ApiError> {
    let lang = lang_from_headers(&headers);

    let mut errors: Vec<String> = Vec::new();
    if form.name.trim().is_empty() {
        errors.push(crate::services::locale::t(lang, "contact.nameLabel"));
    }
    if form.phone.trim().is_empty() {
        errors.push("phone".to_string());
    }
    if !SUPPORT_TYPES.iter().any(|(id, _, _)| *id == form.support_type) {
        errors.push(crate::services::locale::t(lang, "counselling.supportTypeRequired"));
    }
    if form.message.trim().chars().count() < 10 {
        errors.push(crate::services::locale::t(lang, "counselling.messageTooShort"));
    }
    // Phone calls are only offered inside Mozambique; email needs an
    // address to answer to.
    if form.contact_method == "phone" && form.country != "MZ" {
        errors.push("contact_method".to_string());
    }
    if form.contact_method == "email" && form.email.trim().is_empty() {
        errors.push("contact_method".to_string());
    }

    if !errors.is_empty() {
        let mut ctx = base_context(lang, "/counselling");
        insert_counselling_context(
            &mut ctx,
            if form.country.is_empty() { "MZ" } else { &form.country },
        );
        ctx.insert("errors", &errors);
        ctx.insert("form_name", &form.name);
        ctx.insert("form_email", &form.email);
        ctx.insert("form_phone", &form.phone);
        ctx.insert("form_message", &form.message);
        ctx.insert("form_support_type", &form.support_type);
        return render(&state, "counselling.html", &ctx);
    }

    // There is no backend endpoint for counselling requests; the
    // pastoral team picks them up from the log feed.
    tracing::info!(
        support_type = %form.support_type,
        country = %form.country,
        contact_method = %form.contact_method,
        "counselling request received"
    );

    let ctx = base_context(lang, "/counselling");
    render(&state, "counselling_done.html", &ctx)
}

// ============================================================================
// Receive Jesus
// ============================================================================

/// GET /receive-jesus
async fn receive_jesus(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let lang = lang_from_headers(&headers);
    let mut ctx = base_context(lang, "/receive-jesus");
    ctx.insert("submitted", &false);
    ctx.insert("error", &false);
    render(&state, "receive_jesus.html", &ctx)
}

#[derive(Debug, Deserialize)]
struct DecisionForm {
    name: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    location: String,
}

/// POST /receive-jesus - record the decision for pastoral follow-up.
async fn submit_decision(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<DecisionForm>,
) -> Result<Html<String>, ApiError> {
    let lang = lang_from_headers(&headers);
    let mut ctx = base_context(lang, "/receive-jesus");

    if form.name.trim().is_empty() {
        ctx.insert("submitted", &false);
        ctx.insert("error", &true);
        return render(&state, "receive_jesus.html", &ctx);
    }

    tracing::info!(
        has_phone = !form.phone.trim().is_empty(),
        has_email = !form.email.trim().is_empty(),
        location = %form.location,
        "salvation decision recorded"
    );

    ctx.insert("submitted", &true);
    render(&state, "receive_jesus.html", &ctx)
}
