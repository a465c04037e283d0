//! End-to-end search and view scenarios against an in-memory store

use directory_server::db::models::{Category, City, ReviewInsert, Shop};
use directory_server::db::repository::ReviewRepository;
use directory_server::services::SearchService;
use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

async fn memory_db() -> Surreal<Db> {
    let db: Surreal<Db> = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    directory_server::db::define_schema(&db).await.unwrap();
    db
}

async fn seed_category(db: &Surreal<Db>, key: &str, name: &str) {
    let _: Option<Category> = db
        .create(("category", key))
        .content(json!({ "name": name }))
        .await
        .unwrap();
}

async fn seed_city(db: &Surreal<Db>, key: &str, name: &str) {
    let _: Option<City> = db
        .create(("city", key))
        .content(json!({
            "city_name": name,
            "district": "Central",
            "pincode": "400001",
            "state": "IL",
        }))
        .await
        .unwrap();
}

async fn seed_shop(db: &Surreal<Db>, key: &str, doc: serde_json::Value) {
    let _: Option<Shop> = db.create(("shop", key)).content(doc).await.unwrap();
}

async fn rate(db: &Surreal<Db>, shop: &str, ratings: &[f64]) {
    let reviews = ReviewRepository::new(db.clone());
    for &rating in ratings {
        reviews
            .create(ReviewInsert {
                shop_id: shop.to_string(),
                rating,
                review: "test".into(),
            })
            .await
            .unwrap();
    }
}

fn result_names(results: &[shared::models::ShopSearchResult]) -> Vec<String> {
    results.iter().map(|r| r.shop_name.clone()).collect()
}

#[tokio::test]
async fn empty_name_returns_empty_result_set() {
    let db = memory_db().await;
    seed_shop(&db, "a", json!({ "shop_name": "Pizza Palace" })).await;

    let search = SearchService::new(db.clone());
    assert!(search.search(None, None).await.unwrap().is_empty());
    assert!(search.search(Some(""), None).await.unwrap().is_empty());
    assert!(search.search(Some("  "), None).await.unwrap().is_empty());
}

#[tokio::test]
async fn keyword_only_match_appears_in_results() {
    let db = memory_db().await;
    seed_shop(
        &db,
        "luigi",
        json!({
            "shop_name": "Luigi's Trattoria",
            "keywords": ["pizza", "pasta"],
            "category": [],
        }),
    )
    .await;

    let results = SearchService::new(db.clone())
        .search(Some("pizza"), None)
        .await
        .unwrap();
    assert_eq!(result_names(&results), vec!["Luigi's Trattoria"]);
}

#[tokio::test]
async fn category_reference_matches_in_both_representations() {
    let db = memory_db().await;
    seed_category(&db, "pizza", "Pizza").await;
    // One shop stores the reference as a native record link, one as the
    // string encoding, one as free text
    seed_shop(&db, "a", json!({ "shop_name": "A" })).await;
    db.query("UPDATE shop:a SET category = [category:pizza]")
        .await
        .unwrap();
    seed_shop(&db, "b", json!({ "shop_name": "B", "category": ["category:pizza"] })).await;
    seed_shop(&db, "c", json!({ "shop_name": "C", "category": ["Pizza Takeaway"] })).await;

    let results = SearchService::new(db.clone())
        .search(Some("pizza"), None)
        .await
        .unwrap();
    let mut names = result_names(&results);
    names.sort();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn unresolvable_city_survives_the_place_filter() {
    let db = memory_db().await;
    seed_city(&db, "sf", "Springfield").await;
    seed_shop(
        &db,
        "resolved",
        json!({ "shop_name": "Pizza Resolved", "city_id": "city:sf" }),
    )
    .await;
    seed_shop(
        &db,
        "dangling",
        json!({ "shop_name": "Pizza Dangling", "city_id": "city:gone" }),
    )
    .await;
    seed_shop(
        &db,
        "elsewhere",
        json!({ "shop_name": "Pizza Elsewhere", "city_id": "city:other" }),
    )
    .await;
    seed_city(&db, "other", "Shelbyville").await;

    let results = SearchService::new(db.clone())
        .search(Some("pizza"), Some("springfield"))
        .await
        .unwrap();
    let mut names = result_names(&results);
    names.sort();
    // The dangling reference is retained; the resolved mismatch is not
    assert_eq!(names, vec!["Pizza Dangling", "Pizza Resolved"]);
}

#[tokio::test]
async fn results_sort_by_rating_with_stable_ties() {
    let db = memory_db().await;
    for key in ["a", "b", "c"] {
        seed_shop(
            &db,
            key,
            json!({ "shop_name": format!("Pizza {key}") }),
        )
        .await;
    }
    rate(&db, "shop:a", &[3.0]).await;
    rate(&db, "shop:b", &[5.0]).await;
    // shop:c keeps zero reviews -> 0.0

    let results = SearchService::new(db.clone())
        .search(Some("pizza"), None)
        .await
        .unwrap();
    assert_eq!(
        result_names(&results),
        vec!["Pizza b", "Pizza a", "Pizza c"]
    );

    // Equal ratings keep retrieval order
    rate(&db, "shop:a", &[5.0, 7.0]).await; // avg 5.0 over [3,5,7]
    let results = SearchService::new(db.clone())
        .search(Some("pizza"), None)
        .await
        .unwrap();
    assert_eq!(
        result_names(&results),
        vec!["Pizza a", "Pizza b", "Pizza c"]
    );
}

#[tokio::test]
async fn pizza_in_springfield_scenario() {
    let db = memory_db().await;
    seed_category(&db, "pz", "Pizza").await;
    seed_city(&db, "sf", "Springfield").await;
    seed_city(&db, "sh", "Shelbyville").await;

    // Matches by name, in Springfield
    seed_shop(
        &db,
        "byname",
        json!({ "shop_name": "Springfield Pizza Co", "city_id": "city:sf" }),
    )
    .await;
    // Matches by keyword, but in the wrong city
    seed_shop(
        &db,
        "bykeyword",
        json!({
            "shop_name": "Shelby Diner",
            "keywords": ["pizza"],
            "city_id": "city:sh",
        }),
    )
    .await;
    // Matches by category reference, in Springfield
    seed_shop(
        &db,
        "bycategory",
        json!({
            "shop_name": "Corner Oven",
            "category": ["category:pz"],
            "city_id": "city:sf",
        }),
    )
    .await;

    rate(&db, "shop:byname", &[3.0, 4.0]).await; // 3.5
    rate(&db, "shop:bycategory", &[5.0, 4.0]).await; // 4.5

    let results = SearchService::new(db.clone())
        .search(Some("pizza"), Some("Springfield"))
        .await
        .unwrap();
    assert_eq!(
        result_names(&results),
        vec!["Corner Oven", "Springfield Pizza Co"]
    );
    assert_eq!(results[0].avg_rating, 4.5);
    assert_eq!(results[1].avg_rating, 3.5);
    assert_eq!(results[1].reviews_count, 2);
    // City join resolved on both
    assert_eq!(
        results[0].city.as_ref().unwrap().city_name,
        "Springfield"
    );
}

#[tokio::test]
async fn assembled_views_expose_only_string_identifiers() {
    let db = memory_db().await;
    seed_category(&db, "pz", "Pizza").await;
    seed_shop(&db, "a", json!({ "shop_name": "Pizza A", "keywords": [] })).await;
    db.query("UPDATE shop:a SET category = [category:pz], user_id = user:u1")
        .await
        .unwrap();

    let results = SearchService::new(db.clone())
        .search(Some("pizza"), None)
        .await
        .unwrap();
    let shop_doc = &results[0].shop;
    assert_eq!(shop_doc["id"], json!("shop:a"));
    assert_eq!(shop_doc["user_id"], json!("user:u1"));
    assert_eq!(shop_doc["category"][0], json!("category:pz"));
    assert_eq!(results[0].categories[0].id, "category:pz");
}
