//! Integration tests running list queries over the platform entities

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::{NaiveDate, TimeZone, Utc};
use gymadmin_core::types::{
    Order, OrderStatus, PaymentStatus, PlanSummary, Product, Role, ShippingAddress, Subscription,
    SubscriptionStatus, User, UserStatus, UserSummary,
};
use gymadmin_listing::{Filter, ListQuery, ListingError, PageRequest, Sort};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn product(i: usize, category: &str) -> Product {
    Product {
        id: format!("p{i}"),
        name: format!("Product {i}"),
        description: String::new(),
        price: Decimal::from(10 + i),
        category: category.to_string(),
        stock_quantity: u32::try_from(i).unwrap(),
        sizes: Vec::new(),
        colors: Vec::new(),
        images: Vec::new(),
        rating: 4.0,
        featured: false,
    }
}

fn user(name: &str, role: Role, status: UserStatus, created_day: u32) -> User {
    User {
        id: name.to_lowercase(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role,
        status,
        phone: None,
        created_at: Some(Utc.with_ymd_and_hms(2024, 3, created_day, 9, 0, 0).unwrap()),
        updated_at: None,
    }
}

fn order(id: &str, status: OrderStatus, total: i64, day: u32) -> Order {
    Order {
        id: id.to_string(),
        user: UserSummary {
            id: "u1".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
        },
        items: Vec::new(),
        total_amount: Decimal::from(total),
        status,
        payment_status: PaymentStatus::Paid,
        shipping_address: ShippingAddress::default(),
        tracking_number: None,
        created_at: Some(Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()),
    }
}

#[test]
fn test_product_grid_pages() {
    let products: Vec<Product> = (0..23).map(|i| product(i, "gear")).collect();

    let page = ListQuery::new(PageRequest::new(2, 12)).run(&products).unwrap();

    assert_eq!(page.total_count, 23);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 11);
    assert_eq!(page.items[0].id, "p12");
}

#[test]
fn test_product_category_filter_then_sort() {
    let mut products: Vec<Product> = (0..6).map(|i| product(i, "gear")).collect();
    products.extend((6..10).map(|i| product(i, "Supplements")));

    let page = ListQuery::new(PageRequest::first(3))
        .with_filter(Filter::new().category("supplements"))
        .with_sort(Sort::desc("price"))
        .run(&products)
        .unwrap();

    assert_eq!(page.total_count, 4);
    assert_eq!(page.total_pages, 2);
    let ids: Vec<&str> = page.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p9", "p8", "p7"]);
}

#[test]
fn test_user_role_status_and_search() {
    let users = vec![
        user("Admin", Role::Admin, UserStatus::Active, 1),
        user("Bruno", Role::Member, UserStatus::Active, 2),
        user("Carla", Role::Member, UserStatus::Suspended, 3),
        user("Brenda", Role::Customer, UserStatus::Active, 4),
    ];

    let members = ListQuery::default()
        .with_filter(Filter::new().role("member").status("active"))
        .run(&users)
        .unwrap();
    assert_eq!(members.items.len(), 1);
    assert_eq!(members.items[0].name, "Bruno");

    let search = ListQuery::default()
        .with_filter(Filter::new().search("br"))
        .run(&users)
        .unwrap();
    let names: Vec<&str> = search.items.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Bruno", "Brenda"]);

    let registered = ListQuery::default()
        .with_filter(Filter::new().between(NaiveDate::from_ymd_opt(2024, 3, 2), NaiveDate::from_ymd_opt(2024, 3, 3)))
        .run(&users)
        .unwrap();
    assert_eq!(registered.total_count, 2);
}

#[test]
fn test_order_status_and_date_range() {
    let orders = vec![
        order("o1", OrderStatus::Pending, 40, 1),
        order("o2", OrderStatus::Shipped, 90, 10),
        order("o3", OrderStatus::Pending, 15, 20),
    ];

    let page = ListQuery::default()
        .with_filter(
            Filter::new()
                .status("pending")
                .between(NaiveDate::from_ymd_opt(2024, 5, 5), None),
        )
        .run(&orders)
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "o3");
}

#[test]
fn test_subscription_filter_by_plan() {
    let sub = |id: &str, plan: &str, status| Subscription {
        id: id.to_string(),
        user: UserSummary::default(),
        plan: PlanSummary {
            id: plan.to_string(),
            ..PlanSummary::default()
        },
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        status,
        payment_method: "card".to_string(),
        auto_renew: false,
        payments: Vec::new(),
    };
    let subs = vec![
        sub("s1", "monthly", SubscriptionStatus::Active),
        sub("s2", "annual", SubscriptionStatus::Active),
        sub("s3", "annual", SubscriptionStatus::Canceled),
    ];

    let page = ListQuery::default()
        .with_filter(Filter::new().category("annual").status("active"))
        .run(&subs)
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "s2");
}

#[test]
fn test_query_errors() {
    let products: Vec<Product> = (0..3).map(|i| product(i, "gear")).collect();

    let zero = ListQuery::new(PageRequest::new(1, 0)).run(&products);
    assert_eq!(zero.unwrap_err(), ListingError::ZeroPageSize);

    let bad_sort = ListQuery::default().with_sort(Sort::asc("weight")).run(&products);
    assert!(matches!(bad_sort, Err(ListingError::UnknownSortKey { .. })));
}

#[test]
fn test_empty_state() {
    let page = ListQuery::default().run::<Product>(&[]).unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_pages, 0);
}

proptest! {
    #[test]
    fn prop_category_filter_never_leaks(
        categories in proptest::collection::vec(prop_oneof!["gear", "apparel", "supplements"], 0..80),
        per_page in 1usize..15,
    ) {
        let products: Vec<Product> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| product(i, c))
            .collect();
        let query = ListQuery::new(PageRequest::first(per_page))
            .with_filter(Filter::new().category("apparel"));

        let first = query.run(&products).unwrap();
        let expected = categories.iter().filter(|c| c.as_str() == "apparel").count();
        prop_assert_eq!(first.total_count, expected);
        prop_assert_eq!(first.total_pages, expected.div_ceil(per_page));

        for p in 1..=first.total_pages {
            let page = ListQuery { page: PageRequest::new(p, per_page), ..query.clone() }
                .run(&products)
                .unwrap();
            prop_assert!(page.items.iter().all(|item| item.category == "apparel"));
        }
    }
}
