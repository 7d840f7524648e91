//! Dashboard route handler.
//!
//! Shows the current month's business metrics next to the best-client
//! ranking. Both come from the ShopDesk API and are fetched in parallel.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::api::{BestClient, DashboardMetrics};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireSession;
use crate::state::AppState;

// ============================================================================
// Templates
// ============================================================================

/// Metric cards, pre-formatted for display.
#[derive(Debug, Clone)]
pub struct MetricsView {
    pub period: String,
    pub total_revenue: String,
    pub total_profit: String,
    pub order_count: i64,
    pub average_ticket: String,
}

/// One row of the best-client ranking.
#[derive(Debug, Clone)]
pub struct BestClientView {
    pub rank: usize,
    pub name: String,
    pub orders: i64,
    pub total_spent: String,
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_path: String,
    pub metrics: MetricsView,
    pub best_clients: Vec<BestClientView>,
}

// ============================================================================
// Type Conversions
// ============================================================================

/// Format an amount as a price string.
fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

const fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

impl From<DashboardMetrics> for MetricsView {
    fn from(metrics: DashboardMetrics) -> Self {
        Self {
            period: format!("{} {}", month_name(metrics.month), metrics.year),
            total_revenue: format_price(metrics.total_revenue),
            total_profit: format_price(metrics.total_profit),
            order_count: metrics.order_count,
            average_ticket: format_price(metrics.average_ticket),
        }
    }
}

fn best_client_view(rank: usize, client: BestClient) -> BestClientView {
    BestClientView {
        rank,
        name: client.name,
        orders: client.total_orders,
        total_spent: format_price(client.total_spent),
    }
}

// ============================================================================
// Routes
// ============================================================================

/// `GET /` - Dashboard page.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
) -> Result<DashboardTemplate> {
    let token = user.token();
    let (metrics, best_clients) = tokio::join!(
        state.api().monthly_metrics(&token, None, None),
        state.api().best_clients(&token),
    );

    let metrics = MetricsView::from(metrics?);
    let best_clients = best_clients?
        .into_iter()
        .enumerate()
        .map(|(index, client)| best_client_view(index + 1, client))
        .collect();

    Ok(DashboardTemplate {
        current_path: "/".to_string(),
        metrics,
        best_clients,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn metrics_view_formats_amounts() {
        let view = MetricsView::from(DashboardMetrics {
            month: 8,
            year: 2026,
            total_revenue: 1540.5,
            total_profit: 231.075,
            order_count: 12,
            average_ticket: 128.375,
        });

        assert_eq!(view.period, "August 2026");
        assert_eq!(view.total_revenue, "$1540.50");
        assert_eq!(view.total_profit, "$231.08");
        assert_eq!(view.average_ticket, "$128.38");
        assert_eq!(view.order_count, 12);
    }

    #[test]
    fn best_client_view_is_ranked() {
        let view = best_client_view(
            1,
            BestClient {
                client_id: "c56a4180-65aa-42ec-a945-5fd21dec0538".parse().unwrap(),
                name: "Carla Soto".to_string(),
                email: None,
                total_orders: 4,
                total_spent: 320.0,
            },
        );

        assert_eq!(view.rank, 1);
        assert_eq!(view.name, "Carla Soto");
        assert_eq!(view.total_spent, "$320.00");
    }

    #[test]
    fn month_names_cover_the_calendar() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "Unknown");
    }
}
