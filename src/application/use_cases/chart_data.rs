use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use serde_json::Number;

use crate::domain::error::Result;
use crate::infrastructure::db::StudentRepository;

#[derive(Debug, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub data: Vec<Number>,
    pub background_color: Vec<String>,
}

/// Builds the per-student mark totals consumed by the frontend chart.
/// Labels follow store order; every student gets a fresh random color.
pub struct ChartDataUseCase {
    repository: Arc<StudentRepository>,
}

impl ChartDataUseCase {
    pub fn new(repository: Arc<StudentRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<ChartData> {
        let students = self.repository.list_students().await?;

        let mut labels = Vec::with_capacity(students.len());
        let mut data = Vec::with_capacity(students.len());
        let mut background_color = Vec::with_capacity(students.len());

        for student in students {
            let total: f64 = student
                .marks
                .iter()
                .map(|mark| mark.as_f64().unwrap_or(0.0))
                .sum();
            labels.push(student.name);
            data.push(total_as_number(total));
            background_color.push(random_color());
        }

        Ok(ChartData {
            labels,
            datasets: vec![ChartDataset {
                data,
                background_color,
            }],
        })
    }
}

/// Integral totals render as integers (175, not 175.0)
fn total_as_number(total: f64) -> Number {
    if total.fract() == 0.0 && total.abs() <= i64::MAX as f64 {
        Number::from(total as i64)
    } else {
        Number::from_f64(total).unwrap_or_else(|| Number::from(0))
    }
}

fn random_color() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "rgb({},{},{})",
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
        rng.gen_range(0..=255)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::student::StudentInput;
    use tempfile::TempDir;

    fn input(name: &str, marks: Vec<Number>) -> StudentInput {
        StudentInput {
            name: name.to_string(),
            standard: "5".to_string(),
            marks,
        }
    }

    async fn chart_fixture(dir: &TempDir) -> (ChartDataUseCase, Arc<StudentRepository>) {
        let db_path = dir.path().join("students.db");
        let url = format!("sqlite://{}", db_path.display());
        let repository = Arc::new(StudentRepository::connect(&url).await.unwrap());
        (ChartDataUseCase::new(Arc::clone(&repository)), repository)
    }

    #[tokio::test]
    async fn sums_marks_in_store_order() {
        let dir = TempDir::new().unwrap();
        let (chart, repository) = chart_fixture(&dir).await;

        repository
            .insert_students(&[
                input("Alice", vec![Number::from(90), Number::from(85)]),
                input("Bob", vec![Number::from(70), Number::from(60)]),
            ])
            .await
            .unwrap();

        let data = chart.execute().await.unwrap();
        assert_eq!(data.labels, vec!["Alice", "Bob"]);
        assert_eq!(data.datasets.len(), 1);
        assert_eq!(
            data.datasets[0].data,
            vec![Number::from(175), Number::from(130)]
        );
        assert_eq!(data.datasets[0].background_color.len(), 2);
        assert!(data.datasets[0].background_color[0].starts_with("rgb("));
    }

    #[tokio::test]
    async fn fractional_totals_stay_fractional() {
        let dir = TempDir::new().unwrap();
        let (chart, repository) = chart_fixture(&dir).await;

        repository
            .insert_students(&[input(
                "Alice",
                vec![Number::from_f64(90.5).unwrap(), Number::from(2)],
            )])
            .await
            .unwrap();

        let data = chart.execute().await.unwrap();
        assert_eq!(data.datasets[0].data, vec![Number::from_f64(92.5).unwrap()]);
    }

    #[tokio::test]
    async fn empty_store_yields_empty_chart() {
        let dir = TempDir::new().unwrap();
        let (chart, _) = chart_fixture(&dir).await;

        let data = chart.execute().await.unwrap();
        assert!(data.labels.is_empty());
        assert!(data.datasets[0].data.is_empty());
    }

    #[test]
    fn dataset_serializes_camel_case_background_color() {
        let dataset = ChartDataset {
            data: vec![Number::from(175)],
            background_color: vec!["rgb(1,2,3)".to_string()],
        };
        let json = serde_json::to_value(&dataset).unwrap();
        assert_eq!(json["data"][0], 175);
        assert!(json.get("backgroundColor").is_some());
        assert!(json.get("background_color").is_none());
    }
}
