//! The showcase dashboard datasets: static sample charts with no
//! persistence, served as JSON for the shell to render.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use vita_core::{SamplePoint, TimelineRow};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("hard-coded showcase date")
}

// ---------------------------------------------------------------------------
// Project management
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RiskEntry {
    pub risk: String,
    pub probability: f64,
    pub impact: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectManagementShowcase {
    pub gantt: Vec<TimelineRow>,
    pub risks: Vec<RiskEntry>,
}

pub fn project_management() -> ProjectManagementShowcase {
    let gantt = vec![
        row("Research", date(2024, 1, 1), date(2024, 2, 15), "Planning"),
        row("Design", date(2024, 2, 16), date(2024, 3, 31), "Development"),
        row("Development", date(2024, 4, 1), date(2024, 7, 31), "Development"),
        row("Testing", date(2024, 8, 1), date(2024, 9, 15), "QA"),
        row("Deployment", date(2024, 9, 16), date(2024, 10, 15), "Operations"),
    ];
    let risks = vec![
        risk("Technical Failure", 0.2, 0.8),
        risk("Budget Overrun", 0.4, 0.6),
        risk("Scope Creep", 0.6, 0.5),
        risk("Resource Unavailability", 0.3, 0.7),
    ];
    ProjectManagementShowcase { gantt, risks }
}

fn row(task: &str, start: NaiveDate, finish: NaiveDate, group: &str) -> TimelineRow {
    TimelineRow {
        task: task.to_string(),
        start,
        finish,
        group: group.to_string(),
    }
}

fn risk(name: &str, probability: f64, impact: f64) -> RiskEntry {
    RiskEntry {
        risk: name.to_string(),
        probability,
        impact,
    }
}

// ---------------------------------------------------------------------------
// Data science
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RegressionSummary {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub mean_squared_error: f64,
    pub train_size: usize,
    pub test_size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataScienceShowcase {
    pub points: Vec<SamplePoint>,
    pub regression: RegressionSummary,
}

/// A toy regression demo: a fixed-seed sample cloud, an 80/20 split, a
/// least-squares line fitted on the training slice and scored on the rest.
pub fn data_science() -> DataScienceShowcase {
    let mut rng = StdRng::seed_from_u64(42);
    let categories = ["A", "B", "C"];
    let points: Vec<SamplePoint> = (0..100)
        .map(|_| {
            let x: f64 = rng.gen_range(-3.0..3.0);
            let noise: f64 = rng.gen_range(-1.0..1.0);
            SamplePoint {
                x,
                y: 0.6 * x + noise,
                label: Some(categories[rng.gen_range(0..categories.len())].to_string()),
            }
        })
        .collect();

    let split = points.len() * 8 / 10;
    let (train, test) = points.split_at(split);
    let (slope, intercept) = fit_line(train);
    let regression = RegressionSummary {
        slope,
        intercept,
        r_squared: r_squared(test, slope, intercept),
        mean_squared_error: mean_squared_error(test, slope, intercept),
        train_size: train.len(),
        test_size: test.len(),
    };

    DataScienceShowcase { points, regression }
}

/// Ordinary least squares over (x, y) samples
pub fn fit_line(points: &[SamplePoint]) -> (f64, f64) {
    let n = points.len() as f64;
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;
    let var_x: f64 = points.iter().map(|p| (p.x - mean_x).powi(2)).sum();
    if var_x == 0.0 {
        return (0.0, mean_y);
    }
    let cov: f64 = points
        .iter()
        .map(|p| (p.x - mean_x) * (p.y - mean_y))
        .sum();
    let slope = cov / var_x;
    (slope, mean_y - slope * mean_x)
}

pub fn mean_squared_error(points: &[SamplePoint], slope: f64, intercept: f64) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points
        .iter()
        .map(|p| (p.y - (slope * p.x + intercept)).powi(2))
        .sum::<f64>()
        / points.len() as f64
}

pub fn r_squared(points: &[SamplePoint], slope: f64, intercept: f64) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / points.len() as f64;
    let ss_tot: f64 = points.iter().map(|p| (p.y - mean_y).powi(2)).sum();
    if ss_tot == 0.0 {
        return 0.0;
    }
    let ss_res: f64 = points
        .iter()
        .map(|p| (p.y - (slope * p.x + intercept)).powi(2))
        .sum();
    1.0 - ss_res / ss_tot
}

// ---------------------------------------------------------------------------
// Logistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct InventoryItem {
    pub product: String,
    pub quantity: u32,
    pub reorder_point: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogisticsShowcase {
    pub inventory: Vec<InventoryItem>,
    pub network: Vec<NetworkEdge>,
}

pub fn logistics() -> LogisticsShowcase {
    let inventory = vec![
        item("A", 100, 50),
        item("B", 150, 75),
        item("C", 80, 40),
        item("D", 120, 60),
    ];
    let network = vec![
        edge("Supplier", "Warehouse"),
        edge("Warehouse", "Distribution Center"),
        edge("Distribution Center", "Retailer 1"),
        edge("Distribution Center", "Retailer 2"),
    ];
    LogisticsShowcase { inventory, network }
}

fn item(product: &str, quantity: u32, reorder_point: u32) -> InventoryItem {
    InventoryItem {
        product: product.to_string(),
        quantity,
        reorder_point,
    }
}

fn edge(from: &str, to: &str) -> NetworkEdge {
    NetworkEdge {
        from: from.to_string(),
        to: to.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_points(slope: f64, intercept: f64) -> Vec<SamplePoint> {
        (0..10)
            .map(|i| {
                let x = i as f64;
                SamplePoint {
                    x,
                    y: slope * x + intercept,
                    label: None,
                }
            })
            .collect()
    }

    #[test]
    fn test_fit_recovers_exact_line() {
        let points = line_points(2.5, -1.0);
        let (slope, intercept) = fit_line(&points);
        assert!((slope - 2.5).abs() < 1e-9);
        assert!((intercept + 1.0).abs() < 1e-9);
        assert!((r_squared(&points, slope, intercept) - 1.0).abs() < 1e-9);
        assert!(mean_squared_error(&points, slope, intercept) < 1e-9);
    }

    #[test]
    fn test_data_science_showcase_is_deterministic() {
        let a = data_science();
        let b = data_science();
        assert_eq!(a.points.len(), 100);
        assert_eq!(a.regression.train_size, 80);
        assert_eq!(a.regression.test_size, 20);
        assert_eq!(a.regression.slope, b.regression.slope);
        // The generating process is y = 0.6x + noise
        assert!((a.regression.slope - 0.6).abs() < 0.2);
    }

    #[test]
    fn test_project_management_shapes() {
        let showcase = project_management();
        assert_eq!(showcase.gantt.len(), 5);
        assert_eq!(showcase.risks.len(), 4);
        assert!(showcase.gantt[0].start < showcase.gantt[0].finish);
    }

    #[test]
    fn test_logistics_shapes() {
        let showcase = logistics();
        assert_eq!(showcase.inventory.len(), 4);
        assert_eq!(showcase.network.len(), 4);
    }
}
