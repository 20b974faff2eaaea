//! Display API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DisplayState>`.
//! Price descriptors are computed per request from the raw menu text.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::{AppConfig, LinksConfig, RestaurantConfig};
use crate::price::{classify, matched_rule, PriceDescriptor, PriceShape};
use crate::render::{render, PriceRow};
use crate::types::{Category, Menu, MenuError, MenuItem};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Read-only state shared by all route handlers.
pub struct DisplayState {
    pub menu: Menu,
    pub restaurant: RestaurantConfig,
    pub links: LinksConfig,
    pub default_category: Option<String>,
}

impl DisplayState {
    pub fn new(menu: Menu, config: &AppConfig) -> Self {
        Self {
            menu,
            restaurant: config.restaurant.clone(),
            links: config.links.clone(),
            default_category: config.menu.default_category.clone(),
        }
    }
}

pub type AppState = Arc<DisplayState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantResponse {
    pub name: String,
    pub tagline: String,
    pub phone: String,
    pub hours: String,
    pub open_now: bool,
    pub links: LinksConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub item_count: usize,
    pub veg_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavigationResponse {
    pub default_category: Option<String>,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub id: u32,
    pub name: String,
    pub veg: bool,
    /// Raw price text as authored.
    pub price: String,
    pub descriptor: PriceDescriptor,
    pub rows: Vec<PriceRow>,
}

impl From<&MenuItem> for ItemView {
    fn from(item: &MenuItem) -> Self {
        let descriptor = item.descriptor();
        let rows = render(&descriptor);
        ItemView {
            id: item.id,
            name: item.name.clone(),
            veg: item.veg,
            price: item.price.clone(),
            descriptor,
            rows,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub items: Vec<ItemView>,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        CategoryView {
            id: category.id.clone(),
            name: category.name.clone(),
            items: category.items.iter().map(ItemView::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClassifyParams {
    #[serde(default)]
    pub price: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyResponse {
    pub price: String,
    pub shape: PriceShape,
    pub rule: &'static str,
    pub descriptor: PriceDescriptor,
    pub rows: Vec<PriceRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for MenuError {
    fn into_response(self) -> Response {
        let status = match &self {
            MenuError::CategoryNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/restaurant
pub async fn get_restaurant(State(state): State<AppState>) -> Json<RestaurantResponse> {
    let r = &state.restaurant;
    let open_now = r.is_open_at_instant(chrono::Utc::now()).unwrap_or_else(|e| {
        warn!(error = %e, "Service hours misconfigured");
        false
    });

    Json(RestaurantResponse {
        name: r.name.clone(),
        tagline: r.tagline.clone(),
        phone: r.phone.clone(),
        hours: r.hours_label().unwrap_or_default(),
        open_now,
        links: state.links.clone(),
    })
}

/// GET /api/categories
pub async fn get_categories(State(state): State<AppState>) -> Json<NavigationResponse> {
    let menu = &state.menu;
    Json(NavigationResponse {
        default_category: menu
            .default_category(state.default_category.as_deref())
            .map(|c| c.id.clone()),
        categories: menu
            .categories
            .iter()
            .map(|c| CategorySummary {
                id: c.id.clone(),
                name: c.name.clone(),
                item_count: c.items.len(),
                veg_count: c.veg_count(),
            })
            .collect(),
    })
}

/// GET /api/menu
pub async fn get_menu(State(state): State<AppState>) -> Json<Vec<CategoryView>> {
    Json(state.menu.categories.iter().map(CategoryView::from).collect())
}

/// GET /api/menu/:category
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CategoryView>, MenuError> {
    state
        .menu
        .category(&id)
        .map(|c| Json(CategoryView::from(c)))
        .ok_or(MenuError::CategoryNotFound(id))
}

/// GET /api/classify?price=...
pub async fn classify_price(Query(params): Query<ClassifyParams>) -> Json<ClassifyResponse> {
    let descriptor = classify(&params.price);
    let rule = matched_rule(&params.price);
    debug!(price = %params.price, rule, "Ad-hoc price classification");

    Json(ClassifyResponse {
        shape: descriptor.shape(),
        rows: render(&descriptor),
        price: params.price,
        rule,
        descriptor,
    })
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Small two-category menu for handler and router tests.
#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    let menu = Menu {
        categories: vec![
            Category {
                id: "starter".into(),
                name: "Starters".into(),
                items: vec![
                    MenuItem::sample(1, "Crispy Corn", "Half 90 | Full 150", true),
                    MenuItem::sample(2, "Chicken Lollipop", "₹220", false),
                ],
            },
            Category {
                id: "omelette".into(),
                name: "Omelettes".into(),
                items: vec![MenuItem::sample(
                    1,
                    "Cheese Omelette",
                    "Half: Oil | 70, Full: Butter | 130",
                    false,
                )],
            },
        ],
    };
    let config = AppConfig {
        restaurant: RestaurantConfig {
            name: "Mahi Omlette & Chinese".into(),
            tagline: "Where Taste Meets Tradition".into(),
            phone: "+91 99982 82121".into(),
            opens_at: "12:00".into(),
            closes_at: "23:00".into(),
            utc_offset: "+05:30".into(),
        },
        links: LinksConfig {
            order_url: "https://example.com/order".into(),
            maps_url: "https://example.com/maps".into(),
            credit_url: None,
        },
        menu: crate::config::MenuConfig {
            default_category: Some("omelette".into()),
            ..crate::config::MenuConfig::default()
        },
        server: crate::config::ServerConfig { enabled: true, port: 0 },
    };
    Arc::new(DisplayState::new(menu, &config))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
