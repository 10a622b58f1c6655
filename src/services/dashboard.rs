// Dashboard service — the executive overview numbers and the recent-quote
// chart series.

use serde::Serialize;

use crate::services::tasks::urgent_tasks;
use crate::types::{Company, Quote, Task};

/// How many urgent tasks the overview lists.
const URGENT_TASK_LIMIT: usize = 5;
/// How many recent quotes feed the value chart.
const CHART_QUOTE_LIMIT: usize = 7;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub products: usize,
    pub active_clients: usize,
    pub pending_tasks: usize,
    /// Σ selling price × MOQ over all sent quotes.
    pub pipeline_value: f64,
}

/// One bar of the recent-quote chart: the quote label and its deal value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub chart: Vec<ChartPoint>,
    pub urgent_tasks: Vec<Task>,
}

pub fn build_stats(
    product_count: usize,
    clients: &[Company],
    tasks: &[Task],
    quotes_sent: &[Quote],
) -> DashboardStats {
    DashboardStats {
        products: product_count,
        active_clients: clients
            .iter()
            .filter(|c| c.status.as_deref() == Some("Active"))
            .count(),
        pending_tasks: tasks.iter().filter(|t| !t.is_completed()).count(),
        pipeline_value: quotes_sent.iter().map(|q| q.selling_price * q.moq).sum(),
    }
}

/// The first `CHART_QUOTE_LIMIT` sent quotes as labeled value bars.
pub fn recent_quote_values(quotes_sent: &[Quote]) -> Vec<ChartPoint> {
    quotes_sent
        .iter()
        .take(CHART_QUOTE_LIMIT)
        .map(|q| ChartPoint {
            name: q
                .quote_id
                .clone()
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            value: q.selling_price * q.moq,
        })
        .collect()
}

pub fn build_dashboard(
    product_count: usize,
    clients: &[Company],
    tasks: &[Task],
    quotes_sent: &[Quote],
) -> DashboardData {
    DashboardData {
        stats: build_stats(product_count, clients, tasks, quotes_sent),
        chart: recent_quote_values(quotes_sent),
        urgent_tasks: urgent_tasks(tasks, URGENT_TASK_LIMIT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent(quote_id: &str, price: f64, moq: f64) -> Quote {
        Quote {
            quote_id: Some(quote_id.to_string()),
            selling_price: price,
            moq,
            ..Quote::default()
        }
    }

    #[test]
    fn stats_count_active_clients_and_open_tasks() {
        let clients = vec![
            Company {
                status: Some("Active".to_string()),
                ..Company::default()
            },
            Company {
                status: Some("Lead".to_string()),
                ..Company::default()
            },
            Company::default(),
        ];
        let tasks = vec![
            Task {
                status: "Pending".to_string(),
                ..Task::default()
            },
            Task {
                status: "Completed".to_string(),
                ..Task::default()
            },
        ];
        let quotes = vec![sent("Q-1", 100.0, 10.0), sent("Q-2", 50.0, 4.0)];

        let stats = build_stats(12, &clients, &tasks, &quotes);
        assert_eq!(stats.products, 12);
        assert_eq!(stats.active_clients, 1);
        assert_eq!(stats.pending_tasks, 1);
        assert_eq!(stats.pipeline_value, 1200.0);
    }

    #[test]
    fn chart_takes_first_seven_with_unknown_fallback() {
        let mut quotes: Vec<Quote> = (0..9).map(|i| sent(&format!("Q-{i}"), 10.0, 1.0)).collect();
        quotes[0].quote_id = None;

        let chart = recent_quote_values(&quotes);
        assert_eq!(chart.len(), 7);
        assert_eq!(chart[0].name, "Unknown");
        assert_eq!(chart[1].name, "Q-1");
        assert_eq!(chart[0].value, 10.0);
    }

    #[test]
    fn dashboard_bundles_urgent_tasks() {
        let tasks: Vec<Task> = (0..8)
            .map(|i| Task {
                id: format!("t{i}"),
                status: "Pending".to_string(),
                due_date: Some(format!("2024-01-0{}", i + 1)),
                ..Task::default()
            })
            .collect();
        let data = build_dashboard(0, &[], &tasks, &[]);
        assert_eq!(data.urgent_tasks.len(), 5);
        assert_eq!(data.urgent_tasks[0].id, "t0");
    }
}
