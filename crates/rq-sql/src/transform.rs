//! Transformation pipeline
//!
//! Transformations (filters, sorts, groupings, ...) are supplied by the
//! caller. The pipeline only guarantees that they run strictly in list
//! order, each receiving the previous result, and that an empty list
//! returns the initial relation unchanged.

use crate::error::SqlResult;
use crate::relation::Relation;

/// A relation-to-relation transformation
pub trait Transformation: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Produce the transformed relation, usually via [`Relation::derive`]
    fn apply(&self, relation: Relation) -> SqlResult<Relation>;
}

/// Transformation backed by a closure
pub struct FnTransformation<F> {
    name: String,
    f: F,
}

impl<F> Transformation for FnTransformation<F>
where
    F: Fn(Relation) -> SqlResult<Relation> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, relation: Relation) -> SqlResult<Relation> {
        (self.f)(relation)
    }
}

/// Wrap a closure as a boxed transformation
pub fn from_fn<F>(name: impl Into<String>, f: F) -> Box<dyn Transformation>
where
    F: Fn(Relation) -> SqlResult<Relation> + Send + Sync + 'static,
{
    Box::new(FnTransformation {
        name: name.into(),
        f,
    })
}

/// Apply transformations in order
pub fn apply_transformations(
    initial: Relation,
    transformations: &[Box<dyn Transformation>],
) -> SqlResult<Relation> {
    transformations.iter().try_fold(initial, |relation, t| {
        log::debug!("Applying transformation '{}' to '{}'", t.name(), relation.name());
        t.apply(relation)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SqlError;
    use rq_core::Dialect;

    fn numbers() -> Relation {
        Relation::initial(
            "numbers",
            "SELECT * FROM range(10) t(n)".to_string(),
            vec!["n".to_string()],
            Dialect::DuckDb,
        )
        .unwrap()
    }

    fn stage(name: &'static str, clause: &'static str) -> Box<dyn Transformation> {
        from_fn(name, move |relation: Relation| {
            let sql = format!("SELECT * FROM {} {}", relation.source(), clause);
            let columns = relation.columns().to_vec();
            relation.derive(name, sql, columns)
        })
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let relation = numbers();
        let result = apply_transformations(relation.clone(), &[]).unwrap();
        assert_eq!(result, relation);
    }

    #[test]
    fn test_applied_in_order() {
        let result = apply_transformations(
            numbers(),
            &[stage("evens", "WHERE n % 2 = 0"), stage("top", "LIMIT 3")],
        )
        .unwrap();
        let names: Vec<&str> = result.stages().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["numbers", "evens", "top"]);
        assert_eq!(result.stages()[2].sql(), r#"SELECT * FROM "evens" LIMIT 3"#);
    }

    #[test]
    fn test_failure_stops_pipeline() {
        let failing = from_fn("fail", |_relation: Relation| {
            Err(SqlError::TransformationFailed {
                name: "fail".to_string(),
                message: "nope".to_string(),
            })
        });
        let err = apply_transformations(numbers(), &[failing, stage("top", "LIMIT 3")])
            .unwrap_err();
        assert!(err.to_string().contains("'fail' failed"));
    }
}
