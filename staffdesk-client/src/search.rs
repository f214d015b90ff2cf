//! Free-text search over cached employees
//!
//! Case-insensitive substring match against first name, last name, department
//! and position. The whole query is one needle; an empty query matches all.

use shared::models::Employee;

/// Whether `emp` matches an already lower-cased needle
pub fn matches(emp: &Employee, needle: &str) -> bool {
    [
        emp.first_name.as_str(),
        emp.last_name.as_str(),
        emp.department.as_str(),
        emp.position.as_str(),
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Records matching `query`, in cache order
pub fn filter<'a>(records: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records.iter().filter(|emp| matches(emp, &needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::employee;
    use shared::models::Department;

    fn roster() -> Vec<Employee> {
        vec![
            employee("1", "Ada", "Lovelace", Department::Engineering, "Backend Developer"),
            employee("2", "Grace", "Hopper", Department::Finance, "Controller"),
            employee("3", "Linus", "Meng", Department::Sales, "Account Executive"),
            employee("4", "Alan", "Turing", Department::Hr, "Recruiter"),
        ]
    }

    fn ids(found: Vec<&Employee>) -> Vec<&str> {
        found.into_iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let records = roster();
        assert_eq!(ids(filter(&records, "")), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_matches_department_case_insensitively() {
        let records = roster();
        // "eng" hits Engineering and the last name "Meng"
        assert_eq!(ids(filter(&records, "eng")), vec!["1", "3"]);
        assert_eq!(ids(filter(&records, "ENGINEERING")), vec!["1"]);
    }

    #[test]
    fn test_whole_query_is_one_substring() {
        let records = roster();
        assert_eq!(ids(filter(&records, "ada lovelace")), Vec::<&str>::new());
        assert_eq!(ids(filter(&records, "account exec")), vec!["3"]);
    }

    #[test]
    fn test_fields_outside_the_set_are_ignored() {
        let records = roster();
        // email and phone are not searched
        assert!(filter(&records, "example.com").is_empty());
        assert_eq!(ids(filter(&records, "hr")), vec!["4"]);
    }
}
