use crate::domain::error::{AppError, Result};
use crate::domain::student::{StudentInput, StudentRecord};
use serde_json::Number;

use super::StudentRepository;

impl StudentRepository {
    pub async fn list_students(&self) -> Result<Vec<StudentRecord>> {
        let students = sqlx::query_as::<_, StudentEntity>(
            "SELECT id, name, standard, marks_json, created_at FROM students ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list students: {}", e)))?;

        Ok(students.into_iter().map(|s| s.into()).collect())
    }

    pub async fn insert_student(&self, input: &StudentInput) -> Result<StudentRecord> {
        let student = sqlx::query_as::<_, StudentEntity>(
            "INSERT INTO students (name, standard, marks_json) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.standard)
        .bind(encode_marks(&input.marks)?)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert student: {}", e)))?;

        Ok(student.into())
    }

    /// Single batch insert; the whole batch commits in one transaction.
    /// Returns the number of affected rows.
    pub async fn insert_students(&self, inputs: &[StudentInput]) -> Result<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        let mut affected: u64 = 0;
        for input in inputs {
            let res =
                sqlx::query("INSERT INTO students (name, standard, marks_json) VALUES (?, ?, ?)")
                    .bind(&input.name)
                    .bind(&input.standard)
                    .bind(encode_marks(&input.marks)?)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::DatabaseError(format!("Failed to insert student row: {}", e))
                    })?;
            affected += res.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit transaction: {}", e)))?;

        Ok(affected)
    }

    /// Full replace of one record. Returns the number of matched rows;
    /// zero means the id is unknown.
    pub async fn update_student(&self, id: i64, input: &StudentInput) -> Result<u64> {
        let result =
            sqlx::query("UPDATE students SET name = ?, standard = ?, marks_json = ? WHERE id = ?")
                .bind(&input.name)
                .bind(&input.standard)
                .bind(encode_marks(&input.marks)?)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Failed to update student: {}", e)))?;

        Ok(result.rows_affected())
    }
}

fn encode_marks(marks: &[Number]) -> Result<String> {
    serde_json::to_string(marks)
        .map_err(|e| AppError::DatabaseError(format!("Failed to encode marks: {}", e)))
}

// Internal entity for database mapping
#[derive(sqlx::FromRow)]
struct StudentEntity {
    id: i64,
    name: String,
    standard: String,
    marks_json: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<StudentEntity> for StudentRecord {
    fn from(entity: StudentEntity) -> Self {
        let marks = serde_json::from_str(&entity.marks_json).unwrap_or_default();
        Self {
            id: entity.id.to_string(),
            name: entity.name,
            standard: entity.standard,
            marks,
            created_at: Some(entity.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_repository(dir: &TempDir) -> StudentRepository {
        let db_path = dir.path().join("students.db");
        let url = format!("sqlite://{}", db_path.display());
        StudentRepository::connect(&url).await.unwrap()
    }

    fn input(name: &str, standard: &str, marks: &[i64]) -> StudentInput {
        StudentInput {
            name: name.to_string(),
            standard: standard.to_string(),
            marks: marks.iter().map(|&m| Number::from(m)).collect(),
        }
    }

    #[tokio::test]
    async fn insert_and_list_round_trip() {
        let dir = TempDir::new().unwrap();
        let repository = test_repository(&dir).await;

        let stored = repository
            .insert_student(&input("Alice", "5", &[90, 85]))
            .await
            .unwrap();
        assert_eq!(stored.name, "Alice");
        assert!(!stored.id.is_empty());
        assert!(stored.created_at.is_some());

        let students = repository.list_students().await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].standard, "5");
        assert_eq!(students[0].marks, vec![Number::from(90), Number::from(85)]);
    }

    #[tokio::test]
    async fn batch_insert_reports_affected_rows() {
        let dir = TempDir::new().unwrap();
        let repository = test_repository(&dir).await;

        let affected = repository
            .insert_students(&[input("Alice", "5", &[90]), input("Bob", "7", &[70])])
            .await
            .unwrap();
        assert_eq!(affected, 2);

        let students = repository.list_students().await.unwrap();
        assert_eq!(students.len(), 2);
        // Listing follows insertion order
        assert_eq!(students[0].name, "Alice");
        assert_eq!(students[1].name, "Bob");
    }

    #[tokio::test]
    async fn update_replaces_the_record() {
        let dir = TempDir::new().unwrap();
        let repository = test_repository(&dir).await;

        let stored = repository
            .insert_student(&input("Alice", "5", &[90]))
            .await
            .unwrap();
        let id: i64 = stored.id.parse().unwrap();

        let matched = repository
            .update_student(id, &input("Alice", "6", &[95, 88]))
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let students = repository.list_students().await.unwrap();
        assert_eq!(students[0].standard, "6");
        assert_eq!(students[0].marks, vec![Number::from(95), Number::from(88)]);
    }

    #[tokio::test]
    async fn update_of_unknown_id_matches_nothing() {
        let dir = TempDir::new().unwrap();
        let repository = test_repository(&dir).await;

        let matched = repository
            .update_student(999, &input("Alice", "5", &[90]))
            .await
            .unwrap();
        assert_eq!(matched, 0);
    }

    #[tokio::test]
    async fn health_check_succeeds_on_fresh_database() {
        let dir = TempDir::new().unwrap();
        let repository = test_repository(&dir).await;
        assert!(repository.health_check().await.is_ok());
    }
}
