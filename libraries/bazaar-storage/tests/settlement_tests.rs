//! Integration tests for purchase settlement
//!
//! Covers balance conservation, the audit trail, and every rejection path
//! leaving the database untouched.


use bazaar_core::types::*;
use bazaar_storage::{purchases, settlement, transactions, users, StorageError};
use test_helpers::*;

async fn balances(db: &TestDb, region: Region, id: &UserId) -> (f64, f64) {
    let user = users::get_by_id(db.pool(), region, id)
        .await
        .unwrap()
        .unwrap();
    (user.balance, user.earnings)
}

#[tokio::test]
async fn test_purchase_moves_price_from_buyer_to_seller() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let buyer = create_funded_user(pool, Region::East, "buyer", 100.0).await;
    let seller = create_funded_user(pool, Region::East, "seller", 10.0).await;
    let product = create_test_product(pool, Region::East, &seller.id, "clock", 35.0).await;

    let transaction = settlement::purchase(
        pool,
        Region::East,
        Purchase {
            buyer_id: buyer.id.clone(),
            seller_id: seller.id.clone(),
            product_id: product.id.clone(),
        },
    )
    .await
    .unwrap();

    assert_eq!(balances(&test_db, Region::East, &buyer.id).await, (65.0, 0.0));
    assert_eq!(balances(&test_db, Region::East, &seller.id).await, (45.0, 35.0));

    assert_eq!(transaction.amount, product.price);
    assert_eq!(transaction.product_id, product.id);
    assert_eq!(transaction.buyer.username, "buyer");
    assert_eq!(transaction.seller.email, "seller@example.com");

    let stored = transactions::get_by_id(pool, &transaction.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.amount, 35.0);
    assert_eq!(stored.buyer.id, buyer.id);
    assert_eq!(stored.date.timestamp_millis(), transaction.date.timestamp_millis());
}

#[tokio::test]
async fn test_purchase_copies_product_into_history_and_keeps_listing() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let buyer = create_funded_user(pool, Region::West, "buyer", 50.0).await;
    let seller = create_test_user(pool, Region::West, "seller").await;
    let product = create_test_product(pool, Region::West, &seller.id, "rug", 20.0).await;

    let purchase = Purchase {
        buyer_id: buyer.id.clone(),
        seller_id: seller.id.clone(),
        product_id: product.id.clone(),
    };
    settlement::purchase(pool, Region::West, purchase.clone())
        .await
        .unwrap();

    let history = purchases::get_by_owner(pool, Region::West, &buyer.id)
        .await
        .unwrap();
    assert_eq!(history, vec![ProductSnapshot::from(&product)]);

    // Listing survives the sale and can be bought again
    settlement::purchase(pool, Region::West, purchase)
        .await
        .unwrap();
    assert_eq!(balances(&test_db, Region::West, &buyer.id).await.0, 10.0);
    assert_eq!(count_rows(pool, "west_inventory").await, 1);
    assert_eq!(count_rows(pool, "west_purchased").await, 2);
}

#[tokio::test]
async fn test_history_snapshot_ignores_later_edits() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let buyer = create_funded_user(pool, Region::East, "buyer", 50.0).await;
    let seller = create_test_user(pool, Region::East, "seller").await;
    let product = create_test_product(pool, Region::East, &seller.id, "print", 15.0).await;

    settlement::purchase(
        pool,
        Region::East,
        Purchase {
            buyer_id: buyer.id.clone(),
            seller_id: seller.id.clone(),
            product_id: product.id.clone(),
        },
    )
    .await
    .unwrap();

    bazaar_storage::inventory::update(
        pool,
        Region::East,
        &seller.id,
        &product.id,
        ProductPatch {
            name: Some("signed print".to_string()),
            price: Some(99.0),
            description: None,
        },
    )
    .await
    .unwrap();

    let history = purchases::get_by_owner(pool, Region::East, &buyer.id)
        .await
        .unwrap();
    assert_eq!(history[0].name, "print");
    assert_eq!(history[0].price, 15.0);
}

#[tokio::test]
async fn test_insufficient_balance_changes_nothing() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let buyer = create_funded_user(pool, Region::East, "poor", 5.0).await;
    let seller = create_funded_user(pool, Region::East, "rich", 1.0).await;
    let product = create_test_product(pool, Region::East, &seller.id, "piano", 500.0).await;

    let result = settlement::purchase(
        pool,
        Region::East,
        Purchase {
            buyer_id: buyer.id.clone(),
            seller_id: seller.id.clone(),
            product_id: product.id.clone(),
        },
    )
    .await;

    assert!(matches!(
        result,
        Err(StorageError::InsufficientBalance { balance, price }) if balance == 5.0 && price == 500.0
    ));
    assert_eq!(balances(&test_db, Region::East, &buyer.id).await, (5.0, 0.0));
    assert_eq!(balances(&test_db, Region::East, &seller.id).await, (1.0, 0.0));
    assert_eq!(count_rows(pool, "transactions").await, 0);
    assert_eq!(count_rows(pool, "east_purchased").await, 0);
}

#[tokio::test]
async fn test_exact_balance_is_sufficient() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let buyer = create_funded_user(pool, Region::West, "exact", 12.0).await;
    let seller = create_test_user(pool, Region::West, "shop").await;
    let product = create_test_product(pool, Region::West, &seller.id, "hat", 12.0).await;

    settlement::purchase(
        pool,
        Region::West,
        Purchase {
            buyer_id: buyer.id.clone(),
            seller_id: seller.id.clone(),
            product_id: product.id,
        },
    )
    .await
    .unwrap();

    assert_eq!(balances(&test_db, Region::West, &buyer.id).await.0, 0.0);
}

#[tokio::test]
async fn test_self_purchase_is_rejected_without_mutation() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = create_funded_user(pool, Region::East, "solo", 100.0).await;
    let product = create_test_product(pool, Region::East, &user.id, "own goods", 10.0).await;

    let result = settlement::purchase(
        pool,
        Region::East,
        Purchase {
            buyer_id: user.id.clone(),
            seller_id: user.id.clone(),
            product_id: product.id,
        },
    )
    .await;

    assert!(matches!(result, Err(StorageError::SelfPurchase)));
    assert_eq!(balances(&test_db, Region::East, &user.id).await, (100.0, 0.0));
    assert_eq!(count_rows(pool, "transactions").await, 0);
}

#[tokio::test]
async fn test_unknown_product_fails_without_mutation() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let buyer = create_funded_user(pool, Region::East, "buyer", 100.0).await;
    let seller = create_test_user(pool, Region::East, "seller").await;

    let result = settlement::purchase(
        pool,
        Region::East,
        Purchase {
            buyer_id: buyer.id.clone(),
            seller_id: seller.id.clone(),
            product_id: ProductId::generate(),
        },
    )
    .await;

    assert!(matches!(result, Err(StorageError::ProductNotFound { .. })));
    assert_eq!(balances(&test_db, Region::East, &buyer.id).await.0, 100.0);
}

#[tokio::test]
async fn test_seller_in_other_region_is_not_found() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let buyer = create_funded_user(pool, Region::East, "buyer", 100.0).await;
    let seller = create_test_user(pool, Region::West, "abroad").await;
    let product = create_test_product(pool, Region::West, &seller.id, "tea", 3.0).await;

    let result = settlement::purchase(
        pool,
        Region::East,
        Purchase {
            buyer_id: buyer.id.clone(),
            seller_id: seller.id.clone(),
            product_id: product.id,
        },
    )
    .await;

    assert!(matches!(result, Err(StorageError::UserNotFound(id)) if id == seller.id));
    assert_eq!(count_rows(pool, "transactions").await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_purchases_never_overdraw() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool().clone();
    let buyer = create_funded_user(&pool, Region::East, "racer", 30.0).await;
    let seller = create_test_user(&pool, Region::East, "stall").await;
    let product = create_test_product(&pool, Region::East, &seller.id, "ticket", 20.0).await;

    let attempts: Vec<_> = (0..4)
        .map(|_| {
            let pool = pool.clone();
            let purchase = Purchase {
                buyer_id: buyer.id.clone(),
                seller_id: seller.id.clone(),
                product_id: product.id.clone(),
            };
            tokio::spawn(async move { settlement::purchase(&pool, Region::East, purchase).await })
        })
        .collect();

    let mut settled: u32 = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            Ok(_) => settled += 1,
            Err(err) => assert!(
                matches!(err, StorageError::InsufficientBalance { .. }),
                "unexpected failure: {err}"
            ),
        }
    }

    let (buyer_balance, _) = balances(&test_db, Region::East, &buyer.id).await;
    let (seller_balance, seller_earnings) = balances(&test_db, Region::East, &seller.id).await;

    // Balance covers exactly one ticket
    assert_eq!(settled, 1);
    assert_eq!(buyer_balance, 10.0);
    assert_eq!(buyer_balance + seller_balance, 30.0);
    assert_eq!(seller_earnings, 20.0);
    assert_eq!(count_rows(&pool, "transactions").await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_purchases_by_distinct_buyers_all_settle() {
    const BUYERS: u32 = 5;
    const ROUNDS: u32 = 10;
    const PRICE: f64 = 1.0;

    let test_db = TestDb::new().await;
    let pool = test_db.pool().clone();
    let seller = create_test_user(&pool, Region::East, "stall").await;
    let product = create_test_product(&pool, Region::East, &seller.id, "ticket", PRICE).await;

    let mut buyers = Vec::new();
    for i in 0..BUYERS {
        buyers.push(create_funded_user(&pool, Region::East, &format!("buyer{i}"), 100.0).await);
    }

    for _ in 0..ROUNDS {
        let attempts: Vec<_> = buyers
            .iter()
            .map(|buyer| {
                let pool = pool.clone();
                let purchase = Purchase {
                    buyer_id: buyer.id.clone(),
                    seller_id: seller.id.clone(),
                    product_id: product.id.clone(),
                };
                tokio::spawn(
                    async move { settlement::purchase(&pool, Region::East, purchase).await },
                )
            })
            .collect();

        for attempt in attempts {
            let result = attempt.await.unwrap();
            assert!(result.is_ok(), "solvent buyer was refused: {:?}", result.err());
        }
    }

    let settled = BUYERS * ROUNDS;
    let (_, seller_earnings) = balances(&test_db, Region::East, &seller.id).await;
    assert_eq!(seller_earnings, PRICE * f64::from(settled));
    assert_eq!(count_rows(&pool, "transactions").await, i64::from(settled));

    for buyer in &buyers {
        let (balance, _) = balances(&test_db, Region::East, &buyer.id).await;
        assert_eq!(balance, 100.0 - PRICE * f64::from(ROUNDS));
    }
}

#[tokio::test]
async fn test_recent_transactions_newest_first_and_limited() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let buyer = create_funded_user(pool, Region::West, "collector", 1000.0).await;
    let seller = create_test_user(pool, Region::West, "mint").await;
    let product = create_test_product(pool, Region::West, &seller.id, "coin", 1.0).await;

    let mut ids = Vec::new();
    for _ in 0..7 {
        let transaction = settlement::purchase(
            pool,
            Region::West,
            Purchase {
                buyer_id: buyer.id.clone(),
                seller_id: seller.id.clone(),
                product_id: product.id.clone(),
            },
        )
        .await
        .unwrap();
        ids.push(transaction.id);
    }

    let recent = transactions::recent(pool, 5).await.unwrap();
    let recent_ids: Vec<_> = recent.into_iter().map(|t| t.id).collect();
    let expected: Vec<_> = ids.into_iter().rev().take(5).collect();
    assert_eq!(recent_ids, expected);
}
