//! Integration tests for the Payroll Engine HTTP API.
//!
//! This suite drives `GET /payroll` end to end:
//! - Reference net pays across every contribution and withholding bracket
//! - Dependents and the itemized/simplified choice
//! - Fixed and percentage discounts
//! - Validation and malformed query errors
//! - Schedules assembled in code instead of loaded from disk

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{
    ConfigLoader, ContributionRules, PayrollRules, ScheduleMetadata, WithholdingRules,
};
use payroll_engine::models::BracketRange;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/br-2026").expect("Failed to load config");
    create_router(AppState::new(config))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn payroll_uri(gross: &str, dependents: &str, fixed: &str, percentage: &str) -> String {
    format!(
        "/payroll?grossPay={}&numberOfDependents={}&fixedAmountDiscount={}&percentageDiscount={}",
        gross, dependents, fixed, percentage
    )
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn calculate(gross: &str, dependents: &str, fixed: &str, percentage: &str) -> Value {
    let (status, json) = get_json(
        create_router_for_test(),
        &payroll_uri(gross, dependents, fixed, percentage),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", json);
    json
}

fn money(json: &Value, field: &str) -> Decimal {
    decimal(json[field].as_str().unwrap())
}

fn discount_values(json: &Value) -> Vec<Decimal> {
    json["discounts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| decimal(d["value"].as_str().unwrap()))
        .collect()
}

async fn assert_error(uri: &str, expected_code: &str) {
    let (status, json) = get_json(create_router_for_test(), uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], expected_code, "unexpected body: {}", json);
}

// =============================================================================
// SECTION 1: Reference net pays
// =============================================================================

#[tokio::test]
async fn test_minimum_wage() {
    let result = calculate("1621.00", "0", "0", "0").await;

    assert_eq!(money(&result, "grossPay"), decimal("1621.00"));
    assert_eq!(money(&result, "netPay"), decimal("1499.42"));
    assert_eq!(money(&result, "totalDiscount"), decimal("121.58"));
    assert_eq!(
        discount_values(&result),
        vec![
            decimal("121.58"),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO
        ]
    );
}

#[tokio::test]
async fn test_second_contribution_bracket_is_exempt_from_withholding() {
    let result = calculate("3000.00", "0", "0", "0").await;
    assert_eq!(money(&result, "netPay"), decimal("2751.40"));
    assert_eq!(discount_values(&result)[0], decimal("248.60"));
    assert_eq!(discount_values(&result)[1], Decimal::ZERO);
}

#[tokio::test]
async fn test_relief_band_uses_itemized_method() {
    let result = calculate("6000.00", "0", "0", "0").await;
    assert_eq!(money(&result, "netPay"), decimal("4973.39"));
    assert_eq!(discount_values(&result)[0], decimal("641.51"));
    assert_eq!(discount_values(&result)[1], decimal("385.10"));
}

#[tokio::test]
async fn test_above_relief_band() {
    let result = calculate("8000.00", "0", "0", "0").await;
    assert_eq!(money(&result, "netPay"), decimal("6040.64"));
    assert_eq!(discount_values(&result)[1], decimal("1037.85"));
}

#[tokio::test]
async fn test_contribution_capped_at_ceiling() {
    let result = calculate("10000.00", "0", "0", "0").await;
    assert_eq!(money(&result, "netPay"), decimal("7442.36"));
    assert_eq!(discount_values(&result)[0], decimal("988.09"));
    assert_eq!(discount_values(&result)[1], decimal("1569.55"));
}

#[tokio::test]
async fn test_gross_pay_above_last_bracket_sentinel() {
    let result = calculate("1000000000.00", "0", "0", "0").await;
    assert_eq!(discount_values(&result)[0], decimal("988.09"));
    assert_eq!(discount_values(&result)[1], decimal("274998819.55"));
    assert_eq!(money(&result, "netPay"), decimal("725000192.36"));
}

#[tokio::test]
async fn test_dependents_lower_withholding() {
    let result = calculate("10000.00", "3", "0", "0").await;
    assert_eq!(money(&result, "netPay"), decimal("7598.78"));
    assert_eq!(discount_values(&result)[1], decimal("1413.13"));
}

#[tokio::test]
async fn test_dependents_irrelevant_when_exempt() {
    let without = calculate("1621.00", "0", "0", "0").await;
    let with = calculate("1621.00", "5", "0", "0").await;
    assert_eq!(without["netPay"], with["netPay"]);
}

// =============================================================================
// SECTION 2: Optional discounts
// =============================================================================

#[tokio::test]
async fn test_percentage_discount_of_gross() {
    let result = calculate("2500.00", "0", "0", "0.2").await;
    assert_eq!(discount_values(&result)[3], decimal("500.00"));
    assert_eq!(money(&result, "netPay"), decimal("1799.32"));
}

#[tokio::test]
async fn test_misspelled_percentage_parameter_is_accepted() {
    let (status, result) = get_json(
        create_router_for_test(),
        "/payroll?grossPay=2500.00&numberOfDependents=0&fixedAmountDiscount=0&percentangeDiscount=0.2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(money(&result, "netPay"), decimal("1799.32"));
}

#[tokio::test]
async fn test_fixed_discount() {
    let result = calculate("6500.00", "0", "18.57", "0").await;
    assert_eq!(discount_values(&result)[2], decimal("18.57"));
    assert_eq!(money(&result, "netPay"), decimal("5200.00"));
}

#[tokio::test]
async fn test_discounts_are_listed_in_order_with_names() {
    let result = calculate("5000.00", "1", "10", "0.1").await;
    let discounts = result["discounts"].as_array().unwrap();

    let names: Vec<&str> = discounts.iter().map(|d| d["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["INSS", "IRRF", "Fixed amount", "Percentage"]);

    let kinds: Vec<&str> = discounts.iter().map(|d| d["kind"].as_str().unwrap()).collect();
    assert_eq!(
        kinds,
        vec!["contribution", "withholding", "fixed_amount", "percentage"]
    );
}

#[tokio::test]
async fn test_net_plus_total_equals_gross() {
    for (gross, dependents, fixed, percentage) in [
        ("1621.00", "0", "0", "0"),
        ("2902.85", "2", "15.50", "0.05"),
        ("4354.28", "1", "0", "0.33"),
        ("7350.00", "0", "100", "0"),
        ("12345.67", "4", "0.01", "0.125"),
    ] {
        let result = calculate(gross, dependents, fixed, percentage).await;
        assert_eq!(
            money(&result, "netPay") + money(&result, "totalDiscount"),
            money(&result, "grossPay")
        );
    }
}

#[tokio::test]
async fn test_response_metadata() {
    let result = calculate("3000.00", "0", "0", "0").await;
    assert!(result["calculationId"].is_string());
    assert!(result["timestamp"].is_string());
    assert_eq!(result["engineVersion"], env!("CARGO_PKG_VERSION"));
    assert_eq!(result["schedule"], "2026-01");
}

// =============================================================================
// SECTION 3: Errors
// =============================================================================

#[tokio::test]
async fn test_gross_pay_below_minimum() {
    assert_error(&payroll_uri("1620.99", "0", "0", "0"), "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn test_missing_parameter() {
    assert_error(
        "/payroll?grossPay=3000&numberOfDependents=0&fixedAmountDiscount=0",
        "VALIDATION_ERROR",
    )
    .await;
}

#[tokio::test]
async fn test_negative_dependents() {
    assert_error(&payroll_uri("3000", "-1", "0", "0"), "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn test_percentage_above_one() {
    assert_error(&payroll_uri("3000", "0", "0", "1.5"), "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn test_negative_fixed_discount() {
    assert_error(&payroll_uri("3000", "0", "-5", "0"), "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn test_fixed_discount_near_decimal_max() {
    assert_error(
        &payroll_uri("3000", "0", "79228162514264337593543950335", "0"),
        "VALIDATION_ERROR",
    )
    .await;
}

#[tokio::test]
async fn test_gross_pay_above_maximum() {
    assert_error(
        &payroll_uri("79228162514264337593543950335", "0", "0", "1"),
        "VALIDATION_ERROR",
    )
    .await;
    assert_error(&payroll_uri("1000000000000.01", "0", "0", "0"), "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn test_non_numeric_gross_pay() {
    assert_error(&payroll_uri("abc", "0", "0", "0"), "INVALID_QUERY").await;
}

#[tokio::test]
async fn test_fractional_dependents() {
    assert_error(&payroll_uri("3000", "1.5", "0", "0"), "INVALID_QUERY").await;
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let response = create_router_for_test()
        .oneshot(Request::builder().uri("/calculate").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// SECTION 4: Schedules built in code
// =============================================================================

fn range(ordinal: u32, lower: &str, upper: &str, rate: &str, deduction: &str) -> BracketRange {
    BracketRange {
        ordinal,
        lower_bound: decimal(lower),
        upper_bound: decimal(upper),
        rate: decimal(rate),
        deduction_constant: decimal(deduction),
    }
}

fn custom_rules() -> PayrollRules {
    let contribution = ContributionRules::new(
        "Pension",
        vec![
            range(1, "0", "1000.00", "0.05", "0"),
            range(2, "1000.01", "3000.00", "0.10", "0"),
            range(3, "3000.01", "999999999.99", "0.10", "0"),
        ],
        decimal("250.00"),
    )
    .unwrap();
    let withholding = WithholdingRules::new(
        "Income tax",
        vec![
            range(1, "0", "1000.00", "0", "0"),
            range(2, "1000.01", "999999999.99", "0.20", "200.00"),
        ],
        decimal("100.00"),
        decimal("0.5"),
        None,
    )
    .unwrap();
    let metadata = ScheduleMetadata {
        code: "TEST".to_string(),
        name: "Test schedule".to_string(),
        version: "test-1".to_string(),
        effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        source_url: "https://example.invalid/schedule".to_string(),
        minimum_gross_pay: decimal("500.00"),
        maximum_amount: decimal("1000000.00"),
    };
    PayrollRules::new(metadata, contribution, withholding).unwrap()
}

#[tokio::test]
async fn test_schedule_built_in_code() {
    let router = create_router(AppState::new(ConfigLoader::from_rules(custom_rules())));
    let (status, result) = get_json(router, &payroll_uri("2000.00", "0", "0", "0")).await;

    assert_eq!(status, StatusCode::OK);
    // Contribution: 1000 × 0.05 + 1000 × 0.10 = 150
    // Itemized base 1850 → 170, simplified base 1500 → 100
    assert_eq!(discount_values(&result)[0], decimal("150.00"));
    assert_eq!(discount_values(&result)[1], decimal("100.00"));
    assert_eq!(money(&result, "netPay"), decimal("1750.00"));
    assert_eq!(result["schedule"], "test-1");
    assert_eq!(result["discounts"][0]["name"], "Pension");
    assert_eq!(result["discounts"][1]["name"], "Income tax");
}

#[tokio::test]
async fn test_schedule_minimum_is_enforced() {
    let router = create_router(AppState::new(ConfigLoader::from_rules(custom_rules())));
    let (status, json) = get_json(router, &payroll_uri("499.99", "0", "0", "0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_schedule_maximum_is_enforced() {
    let router = create_router(AppState::new(ConfigLoader::from_rules(custom_rules())));
    let (status, json) = get_json(router, &payroll_uri("3000.00", "0", "1000000.01", "0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["details"], "Check the 'fixedAmountDiscount' query parameter");
}
