//! Integration tests for Customer repository.

mod common;

use bankroll_core::RepositoryError;
use bankroll_core::customer::{CustomerCriteria, CustomerFields, CustomerRepository as _};
use bankroll_db::CustomerRepository;
use bankroll_shared::types::{CustomerId, Page};

fn fields(first: &str, ssn: &str) -> CustomerFields {
    CustomerFields {
        first_name: first.to_string(),
        last_name: "Tester".to_string(),
        ssn: ssn.to_string(),
    }
}

#[tokio::test]
async fn test_customer_insert_and_find() {
    let repo = CustomerRepository::new(common::test_db().await);

    let created = repo.save(None, &fields("Ada", "111")).await.unwrap();
    let found = repo.find_by_id(created.id).await.unwrap();

    assert_eq!(found, Some(created.clone()));
    assert_eq!(created.fields, fields("Ada", "111"));
}

#[tokio::test]
async fn test_customer_find_missing() {
    let repo = CustomerRepository::new(common::test_db().await);

    assert_eq!(repo.find_by_id(CustomerId::new(1)).await.unwrap(), None);
    assert_eq!(repo.find_by_id(CustomerId::new(i64::MAX)).await.unwrap(), None);
}

#[tokio::test]
async fn test_customer_update_overwrites() {
    let repo = CustomerRepository::new(common::test_db().await);
    let created = repo.save(None, &fields("Ada", "111")).await.unwrap();

    let updated = repo
        .save(Some(created.id), &fields("Augusta", "111"))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(
        repo.find_by_id(created.id).await.unwrap().unwrap().fields.first_name,
        "Augusta"
    );
}

#[tokio::test]
async fn test_customer_duplicate_ssn_is_unique_violation() {
    let repo = CustomerRepository::new(common::test_db().await);
    repo.save(None, &fields("Ada", "111")).await.unwrap();

    let err = repo.save(None, &fields("Grace", "111")).await.unwrap_err();

    assert!(matches!(err, RepositoryError::UniqueViolation(_)), "{err:?}");
}

#[tokio::test]
async fn test_customer_find_by_pages_and_filters() {
    let repo = CustomerRepository::new(common::test_db().await);
    for n in 0..5 {
        repo.save(None, &fields(&format!("C{n}"), &format!("ssn-{n}")))
            .await
            .unwrap();
    }

    let page = repo
        .find_by(&CustomerCriteria::default(), Page::new(Some(2), Some(1)))
        .await
        .unwrap();
    let by_ssn = repo
        .find_by(&CustomerCriteria::by_ssn("ssn-3"), Page::default())
        .await
        .unwrap();

    let names: Vec<&str> = page.iter().map(|c| c.fields.first_name.as_str()).collect();
    assert_eq!(names, vec!["C1", "C2"]);
    assert_eq!(by_ssn.len(), 1);
    assert_eq!(by_ssn[0].fields.first_name, "C3");
}

#[tokio::test]
async fn test_customer_delete() {
    let repo = CustomerRepository::new(common::test_db().await);
    let created = repo.save(None, &fields("Ada", "111")).await.unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert_eq!(repo.find_by_id(created.id).await.unwrap(), None);
}
