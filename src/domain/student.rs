use serde::{Deserialize, Serialize};
use serde_json::Number;
use validator::Validate;

/// A student record as stored. The id is assigned by the store and
/// rendered as a string at the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub standard: String,
    pub marks: Vec<Number>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// The id-less shape accepted by create/update and produced by the
/// import pipeline. Marks keep their integral/fractional form, so a
/// mark of 90 serializes as 90 rather than 90.0.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StudentInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub standard: String,
    #[validate(length(min = 1))]
    pub marks: Vec<Number>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, standard: &str, marks: Vec<Number>) -> StudentInput {
        StudentInput {
            name: name.to_string(),
            standard: standard.to_string(),
            marks,
        }
    }

    #[test]
    fn valid_input_passes_validation() {
        let input = input("Alice", "5", vec![Number::from(90)]);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn empty_fields_fail_validation() {
        assert!(input("", "5", vec![Number::from(90)]).validate().is_err());
        assert!(input("Alice", "", vec![Number::from(90)]).validate().is_err());
        assert!(input("Alice", "5", Vec::new()).validate().is_err());
    }

    #[test]
    fn integral_marks_serialize_without_decimal_point() {
        let input = input("Alice", "5", vec![Number::from(90), Number::from(85)]);
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("[90,85]"));
    }
}
