//! Ranking and capping behavior of the census population parser.

use civiq::Parser;

use super::support::{dominican_backend, parser_over};

#[tokio::test]
async fn ranks_matches_by_descending_population() {
    let parser = parser_over(dominican_backend(&[100, 50000, 20]));

    let matches = parser
        .search("how many dominicans live in springfield?")
        .await
        .unwrap()
        .unwrap();

    let populations: Vec<i64> = matches.iter().map(|m| m.population).collect();
    assert_eq!(populations, vec![50000, 100, 20]);
}

#[tokio::test]
async fn caps_during_discovery_then_sorts() {
    // Ten candidate (field, place) pairs; the cap keeps the first five
    // discovered, and only that set is ranked. The globally largest
    // populations (60..100) are never fetched.
    let parser = parser_over(dominican_backend(&[
        10, 20, 30, 40, 50, 60, 70, 80, 90, 100,
    ]));

    let matches = parser
        .search("how many dominicans live in springfield?")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(matches.len(), 5);
    let populations: Vec<i64> = matches.iter().map(|m| m.population).collect();
    assert_eq!(populations, vec![50, 40, 30, 20, 10]);
}

#[tokio::test]
async fn no_places_is_a_normal_negative() {
    let parser = parser_over(dominican_backend(&[]));

    let result = parser
        .search("how many dominicans live in springfield?")
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn unrecognized_question_is_a_normal_negative() {
    let parser = parser_over(dominican_backend(&[100]));

    let result = parser.search("what time is it?").await.unwrap();
    assert!(result.is_none());
}
