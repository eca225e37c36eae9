use serde_json::Value;

use super::Exchange;
use crate::domain::{id_text, ids_match, DomainError, Entity};

/// A field counts as provided unless it is absent, `null`, or a blank
/// string. `0` and `false` are values, not omissions.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Integral JSON number strictly greater than zero.
pub fn positive_integer(value: Option<&Value>) -> Option<u64> {
    value.and_then(Value::as_u64).filter(|n| *n > 0)
}

/// Rejects the request unless `data[field]` was provided.
pub fn has_field<T: Entity>(
    field: &'static str,
) -> impl Fn(&mut Exchange<'_, T>) -> Result<(), DomainError> + Send + Sync + 'static {
    move |exchange| {
        if is_present(exchange.field(field)) {
            Ok(())
        } else {
            Err(DomainError::invalid(format!("Must include a {field}")))
        }
    }
}

/// Looks up the path id and attaches the matching entity to the exchange.
pub fn exists<T: Entity>(exchange: &mut Exchange<'_, T>) -> Result<(), DomainError> {
    let id = exchange.path_id().unwrap_or_default().to_string();
    match exchange.store().position(&id) {
        Some(index) => {
            exchange.attach(index);
            Ok(())
        }
        None => Err(DomainError::NotFound {
            resource: T::RESOURCE,
            id,
        }),
    }
}

/// An id in the body is optional, but when given it must name the same
/// entity as the path.
pub fn id_matches_path<T: Entity>(exchange: &mut Exchange<'_, T>) -> Result<(), DomainError> {
    let Some(value) = exchange.field("id").filter(|v| is_present(Some(*v))) else {
        return Ok(());
    };
    let body_id = id_text(value).unwrap_or_else(|| value.to_string());
    let path_id = exchange.path_id().unwrap_or_default();
    if ids_match(&body_id, path_id) {
        Ok(())
    } else {
        Err(DomainError::invalid(format!(
            "{} id {} does not match {}",
            T::RESOURCE,
            body_id,
            path_id
        )))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::*;
    use crate::domain::{Dish, DishFields};
    use crate::infrastructure::Repository;

    fn repo() -> Repository<Dish> {
        Repository::with_records(vec![Dish::new(
            "4".to_string(),
            DishFields {
                name: "Soup".to_string(),
                description: "hot".to_string(),
                price: 4,
                image_url: "soup.png".to_string(),
            },
        )])
    }

    fn data(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn presence_distinguishes_missing_from_zero() {
        assert!(!is_present(None));
        assert!(!is_present(Some(&Value::Null)));
        assert!(!is_present(Some(&json!(""))));
        assert!(!is_present(Some(&json!("   "))));
        assert!(is_present(Some(&json!(0))));
        assert!(is_present(Some(&json!(false))));
        assert!(is_present(Some(&json!("x"))));
    }

    #[test]
    fn positive_integer_rejects_zero_negatives_and_fractions() {
        assert_eq!(positive_integer(Some(&json!(3))), Some(3));
        assert_eq!(positive_integer(Some(&json!(0))), None);
        assert_eq!(positive_integer(Some(&json!(-2))), None);
        assert_eq!(positive_integer(Some(&json!(1.5))), None);
        assert_eq!(positive_integer(Some(&json!("3"))), None);
        assert_eq!(positive_integer(None), None);
    }

    #[test]
    fn has_field_names_the_missing_field() {
        let repo = repo();
        let mut exchange = Exchange::new(repo.lock(), data(json!({"name": "x"})));
        assert_eq!(has_field::<Dish>("name")(&mut exchange), Ok(()));
        assert_eq!(
            has_field::<Dish>("description")(&mut exchange),
            Err(DomainError::invalid("Must include a description"))
        );
    }

    #[test]
    fn exists_attaches_matching_entity() {
        let repo = repo();
        let mut exchange = Exchange::new(repo.lock(), Map::new()).with_path_id("04");
        assert_eq!(exists(&mut exchange), Ok(()));
        assert_eq!(exchange.found().map(|d| d.name.clone()), Ok("Soup".to_string()));
    }

    #[test]
    fn exists_reports_unknown_id() {
        let repo = repo();
        let mut exchange = Exchange::new(repo.lock(), Map::new()).with_path_id("99");
        assert_eq!(
            exists(&mut exchange).map_err(|e| e.to_string()),
            Err("Dish id not found: 99".to_string())
        );
    }

    #[test]
    fn id_mismatch_is_rejected_but_absent_or_equal_id_passes() {
        let repo = repo();
        let mut exchange = Exchange::new(repo.lock(), data(json!({"id": 5}))).with_path_id("4");
        assert_eq!(
            id_matches_path(&mut exchange),
            Err(DomainError::invalid("Dish id 5 does not match 4"))
        );
        drop(exchange);

        let mut exchange = Exchange::new(repo.lock(), data(json!({"id": "4"}))).with_path_id("4");
        assert_eq!(id_matches_path(&mut exchange), Ok(()));
        drop(exchange);

        let mut exchange = Exchange::new(repo.lock(), data(json!({"id": ""}))).with_path_id("4");
        assert_eq!(id_matches_path(&mut exchange), Ok(()));
    }
}
