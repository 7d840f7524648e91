//! Order management routes.
//!
//! The order form keeps its draft in the query string: the add-item and
//! remove-row buttons submit the whole form back to `GET /orders/new`, so
//! typed values survive row edits without any client-side script. Numeric
//! draft fields stay as strings until the final submit, partial input
//! included.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{Form, Query};
use chrono::NaiveDate;
use serde::Deserialize;
use shopdesk_core::{ClientId, OrderId, OrderStatus};
use tracing::instrument;

use crate::api::{ApiError, NewOrder, NewOrderItem, Order};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireSession;
use crate::state::AppState;

use super::auth::MessageQuery;

/// Upper bound on item rows in the order form.
const MAX_ITEM_ROWS: usize = 50;

// ============================================================================
// Form Types
// ============================================================================

/// Order form draft.
///
/// Doubles as the query payload for `GET /orders/new` and the body for
/// `POST /orders`. The five `item_*` vectors are parallel; row `i` is the
/// `i`-th element of each.
#[derive(Debug, Default, Deserialize)]
pub struct OrderDraft {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_bank: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub item_name: Vec<String>,
    #[serde(default)]
    pub item_quantity: Vec<String>,
    #[serde(default)]
    pub item_base_price: Vec<String>,
    #[serde(default)]
    pub item_tax_percent: Vec<String>,
    #[serde(default)]
    pub item_commission_percent: Vec<String>,
    /// Desired row count, set by the add-item button.
    pub items: Option<usize>,
    /// Row index to drop, set by a remove button.
    pub remove: Option<usize>,
    /// Banner code carried through validation redirects.
    pub error: Option<String>,
}

/// Status select form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

// ============================================================================
// Templates
// ============================================================================

/// One row of the order table.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: String,
    pub date: String,
    pub status: OrderStatus,
    pub total: String,
    pub profit: String,
}

/// A client option in the order form select.
#[derive(Debug, Clone)]
pub struct ClientOptionView {
    pub id: String,
    pub name: String,
}

/// An editable item row in the order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub name: String,
    pub quantity: String,
    pub base_price: String,
    pub tax_percent: String,
    pub commission_percent: String,
}

/// Order list page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub current_path: String,
    pub orders: Vec<OrderView>,
    pub statuses: Vec<OrderStatus>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Order form page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/new.html")]
pub struct NewOrderTemplate {
    pub current_path: String,
    pub clients: Vec<ClientOptionView>,
    pub client_id: String,
    pub date: String,
    pub payment_method: String,
    pub payment_bank: String,
    pub notes: String,
    pub rows: Vec<ItemRow>,
    pub next_count: usize,
    pub error: Option<String>,
}

// ============================================================================
// Type Conversions
// ============================================================================

/// Format an amount as a price string.
fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            date: order.date.format("%b %d, %Y").to_string(),
            status: order.status,
            total: format_price(order.total_amount),
            profit: format_price(order.total_profit),
        }
    }
}

fn blank_row() -> ItemRow {
    ItemRow {
        name: String::new(),
        quantity: "1".to_string(),
        base_price: "0".to_string(),
        tax_percent: "0".to_string(),
        commission_percent: "0".to_string(),
    }
}

/// Zip the draft's parallel vectors into rows. A vector running short
/// yields empty fields rather than dropping the row.
fn item_rows(draft: &OrderDraft) -> Vec<ItemRow> {
    let count = draft
        .item_name
        .len()
        .max(draft.item_quantity.len())
        .max(draft.item_base_price.len())
        .max(draft.item_tax_percent.len())
        .max(draft.item_commission_percent.len());

    let field = |vec: &[String], index: usize| vec.get(index).cloned().unwrap_or_default();

    (0..count)
        .map(|index| ItemRow {
            name: field(&draft.item_name, index),
            quantity: field(&draft.item_quantity, index),
            base_price: field(&draft.item_base_price, index),
            tax_percent: field(&draft.item_tax_percent, index),
            commission_percent: field(&draft.item_commission_percent, index),
        })
        .collect()
}

/// Rows for rendering the form: the zipped draft with the add/remove
/// adjustments applied, never fewer than one row.
fn adjusted_rows(draft: &OrderDraft) -> Vec<ItemRow> {
    let mut rows = item_rows(draft);

    if let Some(index) = draft.remove {
        if index < rows.len() && rows.len() > 1 {
            rows.remove(index);
        }
    }
    if let Some(wanted) = draft.items {
        rows.resize_with(wanted.clamp(1, MAX_ITEM_ROWS), blank_row);
    }
    if rows.is_empty() {
        rows.push(blank_row());
    }

    rows
}

/// Re-encode a draft as a query string for validation redirects.
fn draft_query(draft: &OrderDraft) -> String {
    let mut pairs: Vec<(&str, &str)> = vec![
        ("client_id", draft.client_id.as_str()),
        ("date", draft.date.as_str()),
        ("payment_method", draft.payment_method.as_str()),
        ("payment_bank", draft.payment_bank.as_str()),
        ("notes", draft.notes.as_str()),
    ];
    for value in &draft.item_name {
        pairs.push(("item_name", value));
    }
    for value in &draft.item_quantity {
        pairs.push(("item_quantity", value));
    }
    for value in &draft.item_base_price {
        pairs.push(("item_base_price", value));
    }
    for value in &draft.item_tax_percent {
        pairs.push(("item_tax_percent", value));
    }
    for value in &draft.item_commission_percent {
        pairs.push(("item_commission_percent", value));
    }

    let mut query = String::new();
    for (key, value) in pairs {
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(key);
        query.push('=');
        query.push_str(&urlencoding::encode(value));
    }
    query
}

/// Trim a form field, mapping the empty string to `None`.
fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Validate a submitted draft into an API payload, or return a banner code.
fn validate_draft(draft: &OrderDraft) -> std::result::Result<NewOrder, &'static str> {
    let Ok(client_id) = draft.client_id.parse::<ClientId>() else {
        return Err("client_required");
    };
    let Ok(date) = NaiveDate::parse_from_str(draft.date.trim(), "%Y-%m-%d") else {
        return Err("date_invalid");
    };

    let rows = item_rows(draft);
    if rows.is_empty() {
        return Err("items_required");
    }

    let mut items = Vec::with_capacity(rows.len());
    for row in &rows {
        items.push(validate_row(row)?);
    }

    Ok(NewOrder {
        client_id,
        date,
        payment_method: draft.payment_method.trim().to_string(),
        payment_bank: optional(&draft.payment_bank),
        notes: optional(&draft.notes),
        items,
    })
}

/// Validate one item row. Every row must carry a name, a quantity of at
/// least one, and a base price above zero.
fn validate_row(row: &ItemRow) -> std::result::Result<NewOrderItem, &'static str> {
    let name = row.name.trim().to_string();
    if name.is_empty() {
        return Err("item_invalid");
    }

    let quantity = match row.quantity.trim().parse::<u32>() {
        Ok(quantity) if quantity >= 1 => quantity,
        _ => return Err("item_invalid"),
    };
    let base_price = match row.base_price.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => price,
        _ => return Err("item_invalid"),
    };
    let tax_percent = parse_percent(&row.tax_percent)?;
    let commission_percent = parse_percent(&row.commission_percent)?;

    Ok(NewOrderItem {
        name,
        base_price,
        tax_percent,
        commission_percent,
        quantity,
    })
}

/// Parse a percent field, treating blank as zero.
fn parse_percent(value: &str) -> std::result::Result<f64, &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(percent) if percent.is_finite() => Ok(percent),
        _ => Err("item_invalid"),
    }
}

/// Map an order banner error code to a user-facing message.
fn error_message(code: &str) -> String {
    match code {
        "not_found" => "That order no longer exists.".to_string(),
        "client_required" => "Select a client for the order.".to_string(),
        "date_invalid" => "Enter a valid order date.".to_string(),
        "items_required" => "Add at least one item.".to_string(),
        "item_invalid" => {
            "Review the order items. Each needs a name and a base price above zero.".to_string()
        }
        "invalid_status" => "That status is not recognized.".to_string(),
        "rejected" => "The order was rejected. Review the details and try again.".to_string(),
        "unavailable" => {
            "The service is temporarily unavailable. Please try again.".to_string()
        }
        _ => "Something went wrong. Please try again.".to_string(),
    }
}

/// Map an order banner success code to a user-facing message.
fn success_message(code: &str) -> String {
    match code {
        "created" => "Order created.".to_string(),
        "status_updated" => "Order status updated.".to_string(),
        _ => "Done.".to_string(),
    }
}

// ============================================================================
// Routes
// ============================================================================

/// `GET /orders` - Order list page.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    Query(query): Query<MessageQuery>,
) -> Result<OrdersTemplate> {
    let orders = state
        .api()
        .list_orders(&user.token())
        .await?
        .into_iter()
        .map(OrderView::from)
        .collect();

    Ok(OrdersTemplate {
        current_path: "/orders".to_string(),
        orders,
        statuses: OrderStatus::variants().to_vec(),
        error: query.error.as_deref().map(error_message),
        success: query.success.as_deref().map(success_message),
    })
}

/// `GET /orders/new` - Order form. The draft travels in the query string.
#[instrument(skip(state, user, draft))]
pub async fn new_form(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    Query(draft): Query<OrderDraft>,
) -> Result<NewOrderTemplate> {
    let clients = state
        .api()
        .list_clients(&user.token())
        .await?
        .into_iter()
        .map(|client| ClientOptionView {
            id: client.id.to_string(),
            name: client.full_name(),
        })
        .collect();

    let rows = adjusted_rows(&draft);
    let next_count = (rows.len() + 1).min(MAX_ITEM_ROWS);

    let date = if draft.date.trim().is_empty() {
        chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
    } else {
        draft.date
    };
    let payment_method = if draft.payment_method.is_empty() {
        "Zelle".to_string()
    } else {
        draft.payment_method
    };

    Ok(NewOrderTemplate {
        current_path: "/orders".to_string(),
        clients,
        client_id: draft.client_id,
        date,
        payment_method,
        payment_bank: draft.payment_bank,
        notes: draft.notes,
        rows,
        next_count,
        error: draft.error.as_deref().map(error_message),
    })
}

/// `POST /orders` - Create an order.
///
/// Validation failures bounce back to the form with the draft re-encoded
/// in the query string, so nothing the user typed is lost.
#[instrument(skip(state, user, draft))]
pub async fn create(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    Form(draft): Form<OrderDraft>,
) -> Redirect {
    let order = match validate_draft(&draft) {
        Ok(order) => order,
        Err(code) => {
            return Redirect::to(&format!("/orders/new?{}&error={code}", draft_query(&draft)));
        }
    };

    match state.api().create_order(&user.token(), &order).await {
        Ok(created) => {
            tracing::info!(order_id = %created.id, total = created.total_amount, "Order created");
            Redirect::to("/orders?success=created")
        }
        Err(ApiError::Unauthorized) => Redirect::to("/logout?error=session_expired"),
        Err(ApiError::Api { status, message }) => {
            tracing::warn!(status, detail = %message, "Order rejected by the API");
            Redirect::to(&format!("/orders/new?{}&error=rejected", draft_query(&draft)))
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to create order");
            Redirect::to(&format!("/orders/new?{}&error=unavailable", draft_query(&draft)))
        }
    }
}

/// `POST /orders/{id}/status` - Update an order's lifecycle status.
#[instrument(skip(state, user))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    Path(id): Path<OrderId>,
    Form(form): Form<StatusForm>,
) -> Redirect {
    let Ok(status) = form.status.parse::<OrderStatus>() else {
        return Redirect::to("/orders?error=invalid_status");
    };

    match state.api().update_order_status(&user.token(), id, status).await {
        Ok(_) => Redirect::to("/orders?success=status_updated"),
        Err(ApiError::Unauthorized) => Redirect::to("/logout?error=session_expired"),
        Err(ApiError::NotFound) => Redirect::to("/orders?error=not_found"),
        Err(err) => {
            tracing::error!(error = %err, order_id = %id, "Failed to update order status");
            Redirect::to("/orders?error=unavailable")
        }
    }
}

/// `GET /orders/{id}/invoice` - Download the invoice PDF.
#[instrument(skip(state, user))]
pub async fn invoice(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    Path(id): Path<OrderId>,
) -> Result<Response> {
    let pdf = match state.api().download_invoice(&user.token(), id).await {
        Ok(pdf) => pdf,
        Err(ApiError::NotFound) => {
            return Ok(Redirect::to("/orders?error=not_found").into_response());
        }
        Err(err) => return Err(err.into()),
    };

    let filename = format!("invoice_{}.pdf", id.short());
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft_with_rows(rows: &[(&str, &str, &str)]) -> OrderDraft {
        OrderDraft {
            client_id: "c56a4180-65aa-42ec-a945-5fd21dec0538".to_string(),
            date: "2026-08-20".to_string(),
            payment_method: "Zelle".to_string(),
            item_name: rows.iter().map(|r| r.0.to_string()).collect(),
            item_quantity: rows.iter().map(|r| r.1.to_string()).collect(),
            item_base_price: rows.iter().map(|r| r.2.to_string()).collect(),
            item_tax_percent: rows.iter().map(|_| "0".to_string()).collect(),
            item_commission_percent: rows.iter().map(|_| "10".to_string()).collect(),
            ..OrderDraft::default()
        }
    }

    #[test]
    fn item_rows_zip_uneven_vectors() {
        let mut draft = draft_with_rows(&[("Widget", "2", "10.00")]);
        draft.item_name.push("Gadget".to_string());

        let rows = item_rows(&draft);
        assert_eq!(rows.len(), 2);
        let second = rows.get(1).unwrap();
        assert_eq!(second.name, "Gadget");
        assert_eq!(second.quantity, "");
    }

    #[test]
    fn adjusted_rows_appends_blank_rows() {
        let mut draft = draft_with_rows(&[("Widget", "2", "10.00")]);
        draft.items = Some(3);

        let rows = adjusted_rows(&draft);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.first().unwrap().name, "Widget");
        assert_eq!(rows.last().unwrap(), &blank_row());
    }

    #[test]
    fn adjusted_rows_removes_requested_row() {
        let mut draft = draft_with_rows(&[("Widget", "2", "10.00"), ("Gadget", "1", "5.00")]);
        draft.remove = Some(0);

        let rows = adjusted_rows(&draft);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.first().unwrap().name, "Gadget");
    }

    #[test]
    fn adjusted_rows_never_drops_the_last_row() {
        let mut draft = draft_with_rows(&[("Widget", "2", "10.00")]);
        draft.remove = Some(0);

        let rows = adjusted_rows(&draft);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.first().unwrap().name, "Widget");
    }

    #[test]
    fn adjusted_rows_gives_one_blank_row_for_an_empty_draft() {
        let rows = adjusted_rows(&OrderDraft::default());
        assert_eq!(rows, vec![blank_row()]);
    }

    #[test]
    fn validate_draft_builds_payload() {
        let draft = draft_with_rows(&[("Widget", "2", "10.50")]);
        let order = validate_draft(&draft).unwrap();

        assert_eq!(order.date.to_string(), "2026-08-20");
        assert_eq!(order.payment_method, "Zelle");
        assert_eq!(order.payment_bank, None);
        assert_eq!(order.items.len(), 1);
        let item = order.items.first().unwrap();
        assert_eq!(item.name, "Widget");
        assert_eq!(item.quantity, 2);
        assert!((item.base_price - 10.5).abs() < f64::EPSILON);
        assert!((item.commission_percent - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_draft_requires_a_client() {
        let mut draft = draft_with_rows(&[("Widget", "2", "10.00")]);
        draft.client_id = String::new();
        assert_eq!(validate_draft(&draft).unwrap_err(), "client_required");
    }

    #[test]
    fn validate_draft_rejects_a_bad_date() {
        let mut draft = draft_with_rows(&[("Widget", "2", "10.00")]);
        draft.date = "20/08/2026".to_string();
        assert_eq!(validate_draft(&draft).unwrap_err(), "date_invalid");
    }

    #[test]
    fn validate_draft_rejects_zero_priced_items() {
        let draft = draft_with_rows(&[("Widget", "2", "0")]);
        assert_eq!(validate_draft(&draft).unwrap_err(), "item_invalid");
    }

    #[test]
    fn validate_draft_rejects_unnamed_items() {
        let draft = draft_with_rows(&[("", "2", "10.00")]);
        assert_eq!(validate_draft(&draft).unwrap_err(), "item_invalid");
    }

    #[test]
    fn validate_draft_rejects_zero_quantity() {
        let draft = draft_with_rows(&[("Widget", "0", "10.00")]);
        assert_eq!(validate_draft(&draft).unwrap_err(), "item_invalid");
    }

    #[test]
    fn blank_percent_fields_count_as_zero() {
        assert!((parse_percent("").unwrap()).abs() < f64::EPSILON);
        assert!((parse_percent("  ").unwrap()).abs() < f64::EPSILON);
        assert!((parse_percent("12.5").unwrap() - 12.5).abs() < f64::EPSILON);
        assert_eq!(parse_percent("abc").unwrap_err(), "item_invalid");
    }

    #[test]
    fn draft_query_round_trips_row_fields() {
        let draft = draft_with_rows(&[("Widget A", "2", "10.00")]);
        let query = draft_query(&draft);

        assert!(query.starts_with("client_id=c56a4180-65aa-42ec-a945-5fd21dec0538"));
        assert!(query.contains("item_name=Widget%20A"));
        assert!(query.contains("item_quantity=2"));
        assert!(query.contains("item_commission_percent=10"));
    }

    #[test]
    fn order_view_formats_amounts() {
        let json = serde_json::json!({
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "client_id": "c56a4180-65aa-42ec-a945-5fd21dec0538",
            "user_id": "550e8400-e29b-41d4-a716-446655440000",
            "status": "PENDING",
            "date": "2026-08-20T00:00:00",
            "payment_method": "Zelle",
            "payment_bank": null,
            "notes": null,
            "total_tax": 1.0,
            "total_commission": 2.0,
            "total_profit": 2.0,
            "total_amount": 23.0,
            "created_at": "2026-08-20T14:30:00",
            "items": []
        });
        let order: Order = serde_json::from_value(json).unwrap();

        let view = OrderView::from(order);
        assert_eq!(view.date, "Aug 20, 2026");
        assert_eq!(view.total, "$23.00");
        assert_eq!(view.profit, "$2.00");
        assert_eq!(view.status, OrderStatus::Pending);
    }
}
